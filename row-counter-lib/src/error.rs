//! Typed error taxonomy for a single probe invocation.
//!
//! Every failure of setup or execution is one of these variants. The command layer
//! converts them into [`ohno::AppError`] with `?`.

use thiserror::Error;

/// Why an invocation could not complete.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Bad or missing configuration; raised before any network traffic.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The measurement sink refused a measurement.
    #[error("unable to publish measurement: {0}")]
    Publish(String),
}

impl ProbeError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the scheduler may reasonably retry on its next tick.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::Timeout { .. } | FetchError::Network { .. }))
    }
}

/// Failures while retrieving the report.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out connecting to {url}")]
    Timeout { url: String },

    #[error("could not retrieve {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server answered {status} for {url}")]
    RemoteStatus { url: String, status: u16 },
}

impl FetchError {
    /// HTTP status carried by a [`FetchError::RemoteStatus`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteStatus { status, .. } => Some(*status),
            Self::Timeout { .. } | Self::Network { .. } => None,
        }
    }
}

/// Failures while turning the response body into a document tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("report body is empty")]
    Empty,

    #[error("report body is not valid UTF-8: {0}")]
    Encoding(#[from] core::str::Utf8Error),

    #[error("report body is not well-formed XML: {0}")]
    Malformed(#[from] roxmltree::Error),
}
