//! Count rows in dashboard reports and publish them as measurements.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use row_counter_lib::{Host, run};
use std::io::{Write, stderr, stdout};

/// Host backed by the process's standard streams.
#[derive(Debug, Default)]
struct ProcessHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for ProcessHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut ProcessHost, std::env::args()).await
}
