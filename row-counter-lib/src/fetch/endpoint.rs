use super::ReportQuery;
use crate::error::ProbeError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

/// Where the report server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    #[must_use]
    pub fn new(protocol: Protocol, host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol,
            host: host.into(),
            port,
        }
    }

    /// Full URL of the report request.
    pub fn report_url(&self, query: &ReportQuery) -> Result<Url, ProbeError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ProbeError::config("server host is required"));
        }

        if host.contains(['/', '?', '#', '@', ' ']) {
            return Err(ProbeError::config(format!("invalid server host '{host}'")));
        }

        if self.port == 0 {
            return Err(ProbeError::config("server port must not be 0"));
        }

        // bare IPv6 literals need brackets inside a URL
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]")
        } else {
            host.to_string()
        };

        let text = format!("{}://{host}:{}{}", self.protocol, self.port, query.request_path());
        Url::parse(&text).map_err(|e| ProbeError::config(format!("invalid report URL '{text}': {e}")))
    }
}
