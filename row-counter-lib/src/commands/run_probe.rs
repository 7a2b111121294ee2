use super::Host;
use super::common::CommonArgs;
use crate::Result;
use crate::counting::{CountingMode, DashboardKind};
use crate::probe::{Probe, Status};
use clap::Parser;
use core::time::Duration;
use ohno::app_err;
use std::io::Write;
use tokio::time::MissedTickBehavior;

const LOG_TARGET: &str = "       run";

#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Repeat the invocation at this interval (e.g. `1m`) until interrupted
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Stop after this many invocations when repeating
    #[arg(long, value_name = "N", requires = "interval")]
    pub iterations: Option<u64>,

    /// Abandon an invocation that takes longer than this
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub execution_timeout: Option<Duration>,

    /// Report server host, overriding the configuration file
    #[arg(long, value_name = "HOST", help_heading = "Overrides")]
    pub host: Option<String>,

    /// User name, overriding the configuration file
    #[arg(long, value_name = "NAME", help_heading = "Overrides")]
    pub username: Option<String>,

    /// Password, overriding the configuration file
    #[arg(long, value_name = "PASSWORD", env = "ROW_COUNTER_PASSWORD", hide_env_values = true, help_heading = "Overrides")]
    pub password: Option<String>,

    /// Dashboard name, overriding the configuration file
    #[arg(long, value_name = "NAME", help_heading = "Overrides")]
    pub dashboard_name: Option<String>,

    /// Dashboard kind, overriding the configuration file
    #[arg(long, value_name = "KIND", help_heading = "Overrides")]
    pub dashboard_kind: Option<DashboardKind>,

    /// Counting mode, overriding the configuration file
    #[arg(long, value_name = "MODE", help_heading = "Overrides")]
    pub mode: Option<CountingMode>,
}

/// Set the probe up, then run one invocation or keep running on an interval
pub async fn run_probe<H: Host>(host: &mut H, args: &RunArgs) -> Result<()> {
    let mut config = args.common.prepare()?;

    if let Some(server) = &args.host {
        config.host.clone_from(server);
    }
    if let Some(username) = &args.username {
        config.username.clone_from(username);
    }
    if let Some(password) = &args.password {
        config.password = password.clone().into();
    }
    if let Some(name) = &args.dashboard_name {
        config.dashboard_name.clone_from(name);
    }
    if let Some(kind) = args.dashboard_kind {
        config.dashboard_kind = kind;
    }
    if let Some(mode) = args.mode {
        config.count_mode = mode;
    }
    config.validate()?;

    let probe = match Probe::setup(config.probe_settings()) {
        Ok(probe) => probe,
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Row counter setup failed: {e}");
            host.exit(1);
            return Err(e.into());
        }
    };

    match args.interval {
        None => {
            if invoke(host, &probe, args).await? == Status::Failure {
                let _ = writeln!(host.error(), "❌ Row counter invocation failed");
                host.exit(1);
                return Err(app_err!("row counter invocation failed"));
            }
            Ok(())
        }

        Some(interval) => run_on_interval(host, &probe, args, interval).await,
    }
}

async fn run_on_interval<H: Host>(host: &mut H, probe: &Probe, args: &RunArgs, interval: Duration) -> Result<()> {
    if interval.is_zero() {
        return Err(app_err!("--interval must be greater than zero"));
    }

    log::info!(target: LOG_TARGET, "Running every {}", humantime::format_duration(interval));

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut completed = 0_u64;
    loop {
        if args.iterations.is_some_and(|limit| completed >= limit) {
            break;
        }

        tokio::select! {
            signal = &mut shutdown => {
                log_shutdown(signal);
                break;
            }
            _ = ticker.tick() => {}
        }

        tokio::select! {
            signal = &mut shutdown => {
                log_shutdown(signal);
                break;
            }
            status = invoke(host, probe, args) => {
                if status? == Status::Failure {
                    let _ = writeln!(host.error(), "❌ Row counter invocation failed");
                }
            }
        }

        completed += 1;
    }

    log::info!(target: LOG_TARGET, "Stopped after {completed} invocation(s)");
    Ok(())
}

/// Run one invocation and flush its measurements
async fn invoke<H: Host>(host: &mut H, probe: &Probe, args: &RunArgs) -> Result<Status> {
    let mut sink = args.common.sink();

    let status = match args.execution_timeout {
        Some(limit) => match tokio::time::timeout(limit, probe.execute(&mut sink)).await {
            Ok(status) => status,
            Err(elapsed) => {
                log::error!(
                    target: LOG_TARGET,
                    "Invocation abandoned after {} ({elapsed})",
                    humantime::format_duration(limit)
                );
                Status::Failure
            }
        },
        None => probe.execute(&mut sink).await,
    };

    args.common.emit(host, sink)?;
    Ok(status)
}

fn log_shutdown(signal: std::io::Result<()>) {
    match signal {
        Ok(()) => log::info!(target: LOG_TARGET, "Interrupted, shutting down"),
        Err(e) => log::warn!(target: LOG_TARGET, "Unable to listen for Ctrl-C, shutting down: {e}"),
    }
}
