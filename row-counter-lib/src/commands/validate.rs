use super::Host;
use super::config::Config;
use crate::Result;
use crate::probe::Probe;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `row-counter.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Loads a configuration file and runs the same checks as probe setup
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or parsed, or if setup would fail
fn validate_config_inner(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Probe> {
    let config = Config::load(base_dir, config_path)?;
    Ok(Probe::setup(config.probe_settings())?)
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let base_dir = Utf8PathBuf::from(".");
    let config_path = args.config.as_ref();

    match validate_config_inner(&base_dir, config_path) {
        Ok(probe) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file found)");
            }
            let _ = writeln!(host.output(), "Report URL: {}", probe.url());
            let _ = writeln!(host.output(), "Counting mode: {} ({})", probe.mode(), probe.kind());
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
