//! Report retrieval
//!
//! Builds the report-creation request from a [`ReportQuery`] and an [`Endpoint`],
//! performs an authenticated GET and hands back the body as a
//! [`RawDocument`](crate::xml::RawDocument).
//!
//! # Implementation Model
//!
//! The request path is assembled once, at setup, by [`ReportQuery::request_path`]:
//! the report name becomes an escaped path segment, the timeframe is normalized to the
//! server's `LAST:n:UNIT` form and each enabled filter contributes one query segment.
//!
//! [`ReportFetcher`] owns its own `reqwest` client. When [`TransportOptions::insecure_tls`]
//! is set, certificate validation is relaxed on that client only. Failures are classified
//! into [`FetchError`](crate::error::FetchError) variants and are never retried; retrying is
//! left to whoever schedules the probe.

mod credentials;
mod endpoint;
mod fetcher;
mod report_query;

pub use credentials::Credentials;
pub use endpoint::{Endpoint, Protocol};
pub use fetcher::{DEFAULT_CONNECT_TIMEOUT, ReportFetcher, TransportOptions, fetch};
pub use report_query::{FilterKind, REPORT_RESOURCE, ReportFilter, ReportQuery, normalize_timeframe};
