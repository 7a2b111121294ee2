use super::{Credentials, Endpoint, ReportQuery};
use crate::error::{FetchError, ProbeError};
use crate::xml::RawDocument;
use core::time::Duration;
use url::Url;

pub(super) const LOG_TARGET: &str = "     fetch";

/// Time allowed for establishing the connection to the report server.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(50);

const USER_AGENT: &str = concat!("row-counter/", env!("CARGO_PKG_VERSION"));

/// Transport settings for the report connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    pub connect_timeout: Duration,

    /// Upper bound for the whole request, body included.
    pub request_timeout: Option<Duration>,

    /// Skip certificate and hostname validation for this connection only.
    pub insecure_tls: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: None,
            insecure_tls: false,
        }
    }
}

/// Retrieves one report over HTTP(S) with basic authentication.
///
/// The HTTP client is owned by the fetcher, so relaxed TLS validation never
/// leaks into other connections made by the process.
#[derive(Debug, Clone)]
pub struct ReportFetcher {
    client: reqwest::Client,
    url: Url,
    credentials: Credentials,
}

impl ReportFetcher {
    pub fn new(endpoint: &Endpoint, query: &ReportQuery, credentials: Credentials, transport: &TransportOptions) -> Result<Self, ProbeError> {
        let url = endpoint.report_url(query)?;
        let client = build_client(transport)?;

        Ok(Self { client, url, credentials })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Perform the request. Failures are returned as-is; nothing is retried here.
    pub async fn fetch(&self) -> Result<RawDocument, FetchError> {
        log::debug!(target: LOG_TARGET, "Executing URL: {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::RemoteStatus {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        log::debug!(target: LOG_TARGET, "Received {} bytes from {}", body.len(), self.url);

        Ok(RawDocument::new(body))
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        let url = self.url.to_string();
        if error.is_timeout() {
            FetchError::Timeout { url }
        } else {
            FetchError::Network { url, source: error }
        }
    }
}

/// Retrieve a report in one call.
pub async fn fetch(query: &ReportQuery, credentials: Credentials, endpoint: &Endpoint, transport: &TransportOptions) -> Result<RawDocument, ProbeError> {
    let fetcher = ReportFetcher::new(endpoint, query, credentials, transport)?;
    Ok(fetcher.fetch().await?)
}

fn build_client(transport: &TransportOptions) -> Result<reqwest::Client, ProbeError> {
    let builder = || {
        let builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(transport.connect_timeout);

        match transport.request_timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    };

    if transport.insecure_tls {
        log::debug!(target: LOG_TARGET, "Disabling certificate validation for the report connection");
        match builder().danger_accept_invalid_certs(true).build() {
            Ok(client) => return Ok(client),
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not disable certificate validation, keeping default validation: {e}");
            }
        }
    }

    builder()
        .build()
        .map_err(|e| ProbeError::config(format!("unable to create HTTP client: {e}")))
}
