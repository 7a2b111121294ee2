//! Argument types and helpers shared by the commands.

use super::Host;
use super::config::Config;
use crate::Result;
use crate::error::ProbeError;
use crate::publish::{JsonLinesSink, Measurement, MeasurementSink, TextSink};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use ohno::IntoAppError;
use std::fs::OpenOptions;
use std::io::Write;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// How published measurements are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,

    /// Human-readable lines
    Text,
}

/// Arguments shared by the commands that publish measurements
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file (default is `row-counter.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Format of published measurements
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Append measurements to this file instead of writing them to the terminal
    #[arg(long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

impl CommonArgs {
    /// Initialize logging and load the configuration
    pub fn prepare(&self) -> Result<Config> {
        init_logging(self.log_level);
        Config::load(Utf8Path::new("."), self.config.as_ref())
    }

    /// A sink buffering measurements in the requested format
    #[must_use]
    pub fn sink(&self) -> FormattedSink {
        let use_colors = self.output.is_none()
            && match self.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => {
                    use std::io::{IsTerminal, stdout};
                    stdout().is_terminal()
                }
            };

        match self.format {
            OutputFormat::Json => FormattedSink::Json(JsonLinesSink::new(Vec::new())),
            OutputFormat::Text => FormattedSink::Text(TextSink::new(Vec::new(), use_colors)),
        }
    }

    /// Write rendered measurements to the output file, or to the host's output
    pub fn emit<H: Host>(&self, host: &mut H, sink: FormattedSink) -> Result<()> {
        let bytes = sink.into_bytes();
        if bytes.is_empty() {
            return Ok(());
        }

        if let Some(path) = &self.output {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .into_app_err_with(|| format!("opening output file '{path}'"))?;
            file.write_all(&bytes).into_app_err_with(|| format!("writing measurements to '{path}'"))?;
        } else {
            host.output().write_all(&bytes).into_app_err("writing measurements")?;
        }

        Ok(())
    }
}

/// Measurements rendered into an in-memory buffer
#[derive(Debug)]
pub enum FormattedSink {
    Json(JsonLinesSink<Vec<u8>>),
    Text(TextSink<Vec<u8>>),
}

impl FormattedSink {
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Json(sink) => sink.into_inner(),
            Self::Text(sink) => sink.into_inner(),
        }
    }
}

impl MeasurementSink for FormattedSink {
    fn publish(&mut self, measurement: &Measurement) -> core::result::Result<(), ProbeError> {
        match self {
            Self::Json(sink) => sink.publish(measurement),
            Self::Text(sink) => sink.publish(measurement),
        }
    }
}

/// Initialize logger based on log level
///
/// Only the first call in a process installs the logger.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
