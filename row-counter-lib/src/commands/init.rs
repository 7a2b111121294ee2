use super::Host;
use super::config::{Config, DEFAULT_CONFIG_FILE};
use crate::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::app_err;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `row-counter.toml`)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CONFIG_FILE));

    if output.exists() && !args.force {
        let _ = writeln!(host.error(), "❌ {output} already exists; use --force to overwrite it");
        host.exit(1);
        return Err(app_err!("configuration file '{output}' already exists"));
    }

    Config::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_init_writes_default() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::try_from(tmp.path().join("probe.toml")).unwrap();

        let mut host = TestHost::new();
        init_config(&mut host, &InitArgs { output: Some(output.clone()), force: false }).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), super::super::config::DEFAULT_CONFIG_TOML);
        assert!(host.output_text().contains("Generated default configuration file"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_init_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::try_from(tmp.path().join("probe.toml")).unwrap();
        std::fs::write(&output, "port = 1\n").unwrap();

        let mut host = TestHost::new();
        let result = init_config(&mut host, &InitArgs { output: Some(output.clone()), force: false });

        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "port = 1\n");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_init_force_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::try_from(tmp.path().join("probe.toml")).unwrap();
        std::fs::write(&output, "port = 1\n").unwrap();

        let mut host = TestHost::new();
        init_config(&mut host, &InitArgs { output: Some(output.clone()), force: true }).unwrap();

        assert!(std::fs::read_to_string(&output).unwrap().contains("count_mode"));
    }
}
