use super::Host;
use super::common::CommonArgs;
use crate::Result;
use crate::counting::{CountingMode, DashboardKind};
use crate::probe::{evaluate, publish};
use crate::xml::{PathQuery, RawDocument, parse};
use camino::Utf8PathBuf;
use chrono::Utc;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "     count";

#[derive(Parser, Debug)]
pub struct CountArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// XML report file to count rows in
    #[arg(long, value_name = "PATH")]
    pub report: Utf8PathBuf,

    /// Dashboard kind, overriding the configuration file
    #[arg(long, value_name = "KIND")]
    pub dashboard_kind: Option<DashboardKind>,

    /// Counting mode, overriding the configuration file
    #[arg(long, value_name = "MODE")]
    pub mode: Option<CountingMode>,

    /// Print the number of nodes matching this path query instead of counting rows,
    /// e.g. `dashboardreport/data/chartdashlet/measures/measure[contains(@measure, 'CPU')]`
    #[arg(long, value_name = "EXPR", conflicts_with_all = ["mode", "dashboard_kind"])]
    pub query: Option<PathQuery>,
}

/// Count rows in a report saved on disk, without contacting a server
pub fn count_report<H: Host>(host: &mut H, args: &CountArgs) -> Result<()> {
    let config = args.common.prepare()?;

    let body = fs::read(&args.report).into_app_err_with(|| format!("reading report '{}'", args.report))?;
    let raw = RawDocument::from(body);
    log::debug!(target: LOG_TARGET, "Read {} bytes from '{}'", raw.len(), args.report);

    if let Some(query) = &args.query {
        let report = parse(&raw).into_app_err_with(|| format!("parsing report '{}'", args.report))?;
        let count = report.evaluate_count(query);
        writeln!(host.output(), "{query}: {count}").into_app_err("writing query result")?;
        return Ok(());
    }

    let mode = args.mode.unwrap_or(config.count_mode);
    let kind = args.dashboard_kind.unwrap_or(config.dashboard_kind);

    let points = evaluate(&raw, mode, kind).into_app_err_with(|| format!("counting rows in '{}'", args.report))?;

    let mut sink = args.common.sink();
    let _ = publish(&points, Utc::now(), &mut sink)?;
    args.common.emit(host, sink)
}
