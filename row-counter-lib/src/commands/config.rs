use crate::Result;
use crate::counting::{CountingMode, DashboardKind};
use crate::fetch::{Endpoint, FilterKind, Protocol, ReportFilter, ReportQuery, TransportOptions};
use crate::probe::ProbeSettings;
use camino::{Utf8Path, Utf8PathBuf};
use core::fmt;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

const LOG_TARGET: &str = "    config";

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File looked up in the base directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "row-counter.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scheme used to reach the report server
    #[serde(default = "default_protocol")]
    pub protocol: Protocol,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: Password,

    /// Accept unverifiable server certificates on the report connection
    #[serde(default)]
    pub insecure_tls: bool,

    /// Time allowed to establish the connection
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Upper bound for the whole request
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,

    /// Name of the dashboard whose report is generated
    #[serde(default)]
    pub dashboard_name: String,

    /// Human timeframe such as `Last 5 Minutes`
    #[serde(default = "default_timeframe")]
    pub timeframe: String,

    #[serde(default = "default_dashboard_kind")]
    pub dashboard_kind: DashboardKind,

    #[serde(default = "default_count_mode")]
    pub count_mode: CountingMode,

    #[serde(default)]
    pub filters: FiltersConfig,
}

/// Password that never shows up in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("\"\"")
        } else {
            f.write_str("<redacted>")
        }
    }
}

/// Optional restrictions applied to the generated report.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FiltersConfig {
    /// Master switch; individual filters only apply when this is set
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub system_profile: FilterToggle,

    #[serde(default)]
    pub business_transaction: FilterToggle,

    #[serde(default)]
    pub agent_group: FilterToggle,

    #[serde(default)]
    pub agent_pattern: PatternFilterToggle,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilterToggle {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PatternFilterToggle {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub value: String,

    /// How the pattern is matched against agent names, e.g. `Contains` or `Starts With`
    #[serde(default = "default_match_type")]
    pub match_type: String,
}

impl Default for PatternFilterToggle {
    fn default() -> Self {
        Self {
            enabled: false,
            value: String::new(),
            match_type: default_match_type(),
        }
    }
}

const fn default_protocol() -> Protocol {
    Protocol::Https
}

fn default_host() -> String {
    "localhost".to_string()
}

const fn default_port() -> u16 {
    8021
}

const fn default_connect_timeout() -> Duration {
    crate::fetch::DEFAULT_CONNECT_TIMEOUT
}

fn default_timeframe() -> String {
    "Last 5 Minutes".to_string()
}

const fn default_dashboard_kind() -> DashboardKind {
    DashboardKind::BusinessTransaction
}

const fn default_count_mode() -> CountingMode {
    CountingMode::RowCount
}

fn default_match_type() -> String {
    "Contains".to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading row-counter configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!(target: LOG_TARGET, "No '{path}' found, using the default configuration");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading row-counter configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!(target: LOG_TARGET, "Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a connection setting is unusable
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(app_err!("host must not be empty"));
        }

        if self.port == 0 {
            return Err(app_err!("port must be between 1 and 65535, got 0"));
        }

        if self.connect_timeout.is_zero() {
            return Err(app_err!("connect_timeout must be greater than zero"));
        }

        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(app_err!("request_timeout must be greater than zero when set"));
        }

        Ok(())
    }

    /// The report query described by this configuration, with all applicable filters
    #[must_use]
    pub fn report_query(&self) -> ReportQuery {
        let mut query = ReportQuery::new(self.dashboard_name.trim(), self.timeframe.as_str());

        if !self.filters.enabled {
            return query;
        }

        let filters = &self.filters;
        let candidates = [
            ("system_profile", &filters.system_profile, FilterKind::SystemProfile),
            ("business_transaction", &filters.business_transaction, FilterKind::BusinessTransaction),
            ("agent_group", &filters.agent_group, FilterKind::AgentGroup),
        ];

        for (name, toggle, kind) in candidates {
            if let Some(filter) = make_filter(name, toggle.enabled, &toggle.value, kind) {
                query = query.with_filter(filter);
            }
        }

        let pattern = &filters.agent_pattern;
        let kind = FilterKind::AgentPattern {
            match_type: pattern.match_type.clone(),
        };
        if let Some(filter) = make_filter("agent_pattern", pattern.enabled, &pattern.value, kind) {
            query = query.with_filter(filter);
        }

        query
    }

    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.protocol, self.host.trim(), self.port)
    }

    #[must_use]
    pub const fn transport(&self) -> TransportOptions {
        TransportOptions {
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            insecure_tls: self.insecure_tls,
        }
    }

    #[must_use]
    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            endpoint: self.endpoint(),
            query: self.report_query(),
            username: self.username.clone(),
            password: self.password.expose().to_string(),
            transport: self.transport(),
            dashboard_kind: self.dashboard_kind,
            count_mode: self.count_mode,
        }
    }
}

fn make_filter(name: &str, enabled: bool, value: &str, kind: FilterKind) -> Option<ReportFilter> {
    if !enabled {
        return None;
    }

    let value = value.trim();
    if value.is_empty() {
        log::warn!(target: LOG_TARGET, "Filter '{name}' is enabled but has no value; ignoring it");
        return None;
    }

    Some(ReportFilter::new(kind, value))
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
