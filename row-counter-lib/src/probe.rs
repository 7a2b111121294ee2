//! Setup and execution of a probe invocation
//!
//! [`Probe::setup`] checks the settings and prepares the fetcher once. Every call to
//! [`Probe::execute`] then runs one complete invocation: fetch, parse, count, publish.
//! Invocations share nothing but the immutable settings captured at setup.

use crate::counting::{CountingMode, DashboardKind, MeasurementPoint, count_rows};
use crate::error::ProbeError;
use crate::fetch::{Credentials, Endpoint, ReportFetcher, ReportQuery, TransportOptions};
use crate::publish::{Measurement, MeasurementSink};
use crate::xml::{RawDocument, parse};
use chrono::{DateTime, Utc};
use core::fmt;
use url::Url;

pub(crate) const LOG_TARGET: &str = "     probe";

/// Outcome of one invocation, as reported to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Status {
    Success,
    Failure,
}

/// Everything [`Probe::setup`] needs.
#[derive(Clone)]
pub struct ProbeSettings {
    pub endpoint: Endpoint,
    pub query: ReportQuery,
    pub username: String,
    pub password: String,
    pub transport: TransportOptions,
    pub dashboard_kind: DashboardKind,
    pub count_mode: CountingMode,
}

impl fmt::Debug for ProbeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeSettings")
            .field("endpoint", &self.endpoint)
            .field("query", &self.query)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("transport", &self.transport)
            .field("dashboard_kind", &self.dashboard_kind)
            .field("count_mode", &self.count_mode)
            .finish()
    }
}

#[derive(Debug)]
pub struct Probe {
    fetcher: ReportFetcher,
    mode: CountingMode,
    kind: DashboardKind,
}

impl Probe {
    /// Validate the settings and prepare the report request.
    ///
    /// Fails with [`ProbeError::Config`] when credentials or the dashboard name are
    /// missing, or when no valid URL can be built from the endpoint.
    pub fn setup(settings: ProbeSettings) -> Result<Self, ProbeError> {
        if settings.query.report_name().trim().is_empty() {
            return Err(ProbeError::config("dashboard name is required"));
        }

        let credentials = Credentials::new(settings.username, settings.password)?;
        let fetcher = ReportFetcher::new(&settings.endpoint, &settings.query, credentials, &settings.transport)?;

        log::info!(
            target: LOG_TARGET,
            "Row counter ready: dashboard '{}', mode {}, kind {}",
            settings.query.report_name(),
            settings.count_mode,
            settings.dashboard_kind
        );

        Ok(Self {
            fetcher,
            mode: settings.count_mode,
            kind: settings.dashboard_kind,
        })
    }

    /// The URL every invocation fetches.
    #[must_use]
    pub const fn url(&self) -> &Url {
        self.fetcher.url()
    }

    #[must_use]
    pub const fn mode(&self) -> CountingMode {
        self.mode
    }

    #[must_use]
    pub const fn kind(&self) -> DashboardKind {
        self.kind
    }

    /// Run one invocation. Errors are logged and reported as [`Status::Failure`].
    pub async fn execute(&self, sink: &mut impl MeasurementSink) -> Status {
        match self.try_execute(sink).await {
            Ok(published) => {
                log::info!(target: LOG_TARGET, "Published {published} measurement(s)");
                Status::Success
            }
            Err(e) => {
                log::error!(target: LOG_TARGET, "Row counter invocation failed: {e:#}");
                Status::Failure
            }
        }
    }

    /// Run one invocation, returning the number of measurements published.
    pub async fn try_execute(&self, sink: &mut impl MeasurementSink) -> Result<usize, ProbeError> {
        let raw = self.fetcher.fetch().await?;
        let points = evaluate(&raw, self.mode, self.kind)?;
        publish(&points, Utc::now(), sink)
    }
}

/// Parse a raw report and count its rows.
pub fn evaluate(raw: &RawDocument, mode: CountingMode, kind: DashboardKind) -> Result<Vec<MeasurementPoint>, ProbeError> {
    let report = parse(raw)?;
    log::debug!(target: LOG_TARGET, "Parsed report rooted at <{}>", report.root_name());
    Ok(count_rows(&report, mode, kind))
}

/// Hand every point to `sink` as a [`Measurement`] stamped with `timestamp`.
pub fn publish(points: &[MeasurementPoint], timestamp: DateTime<Utc>, sink: &mut impl MeasurementSink) -> Result<usize, ProbeError> {
    for point in points {
        match point.label() {
            Some(label) => log::debug!(target: LOG_TARGET, "Publishing {label} = {}", point.value),
            None => log::debug!(target: LOG_TARGET, "Publishing {}", point.value),
        }
        sink.publish(&Measurement::from_point(point, timestamp))?;
    }

    Ok(points.len())
}
