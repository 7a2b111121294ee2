//! Command-line interface and orchestration for row-counter
//!
//! This module implements the CLI commands and wires the fetcher, parser, counter and
//! publisher together into complete probe invocations.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **run**: Load the configuration, set the probe up once, then run one invocation
//!   or keep running on an interval until interrupted
//! - **count**: Count rows in a report file on disk, without a server
//! - **init**: Generate a default configuration file
//! - **validate**: Check the configuration and print the report URL that would be fetched
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. Measurements are rendered into an in-memory buffer
//! per invocation and flushed to the host's output, or appended to `--output`, once the
//! invocation is over.
//!
//! Errors inside an invocation are logged and turn into a failure status; errors in the
//! command layer itself are returned as `ohno::AppError`.

mod common;
mod config;
mod count;
mod host;
mod init;
mod run;
mod run_probe;
mod validate;

pub use common::{ColorMode, CommonArgs, FormattedSink, LogLevel, OutputFormat, init_logging};
pub use config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML, FilterToggle, FiltersConfig, Password, PatternFilterToggle};
pub use count::{CountArgs, count_report};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use run_probe::{RunArgs, run_probe};
pub use validate::{ValidateArgs, validate_config};
