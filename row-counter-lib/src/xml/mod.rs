//! Report document parsing and path queries
//!
//! Reports arrive as XML exports. This module turns the raw response body into a
//! [`ParsedReport`] and evaluates [`PathQuery`] expressions against it, either as a
//! node set in document order or as a count.
//!
//! Only the query shapes the report format needs are supported: a child-axis path
//! rooted at the document element, optionally ending in a `contains` or
//! `not(contains)` attribute test.

mod parser;
mod path_query;
mod raw_document;

pub(crate) use parser::as_count;
pub use parser::{ParsedReport, parse};
pub use path_query::{PathQuery, Predicate, QueryError};
pub use raw_document::RawDocument;
