//! Command dispatch logic for row-counter

use super::{CountArgs, InitArgs, RunArgs, ValidateArgs, count_report, init_config, run_probe, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "row-counter", version, author, long_about = None)]
#[command(about = "Count rows in dashboard reports and publish them as measurements")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: RowCounterSubcommand,
}

#[derive(Subcommand, Debug)]
enum RowCounterSubcommand {
    /// Fetch the configured report, count its rows and publish the measurements
    Run(Box<RunArgs>),
    /// Count rows in a report file on disk
    Count(Box<CountArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        RowCounterSubcommand::Run(run_args) => run_probe(host, run_args).await,
        RowCounterSubcommand::Count(count_args) => count_report(host, count_args),
        RowCounterSubcommand::Init(init_args) => init_config(host, init_args),
        RowCounterSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_arguments() {
        let cli = Cli::try_parse_from([
            "row-counter",
            "run",
            "--interval",
            "1m",
            "--iterations",
            "3",
            "--mode",
            "count-instances",
            "--dashboard-kind",
            "chart",
            "--format",
            "json",
        ])
        .unwrap();

        let RowCounterSubcommand::Run(args) = cli.command else {
            panic!("expected the run command");
        };
        assert_eq!(args.interval, Some(core::time::Duration::from_secs(60)));
        assert_eq!(args.iterations, Some(3));
        assert_eq!(args.mode, Some(crate::counting::CountingMode::InstancesPerUniqueRow));
        assert_eq!(args.dashboard_kind, Some(crate::counting::DashboardKind::Chart));
    }

    #[test]
    fn test_iterations_require_interval() {
        assert!(Cli::try_parse_from(["row-counter", "run", "--iterations", "3"]).is_err());
    }

    #[test]
    fn test_query_conflicts_with_mode() {
        let result = Cli::try_parse_from([
            "row-counter",
            "count",
            "--report",
            "r.xml",
            "--mode",
            "count-rows",
            "--query",
            "dashboardreport/data",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_query_rejected() {
        assert!(Cli::try_parse_from(["row-counter", "count", "--report", "r.xml", "--query", "//a"]).is_err());
    }
}
