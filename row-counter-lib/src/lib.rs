#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for row-counter
//!
//! This library holds all functionality of the row-counter probe, which fetches a
//! dashboard report as XML, counts its rows and publishes the counts as measurements.
//!
//! # Module Organization
//!
//! - [`fetch`]: Report request construction and retrieval
//! - [`xml`]: Report parsing and path queries
//! - [`counting`]: The row counting strategies
//! - [`publish`]: Measurements and the sinks receiving them
//! - [`probe`]: Setup and execution of a single invocation
//! - [`error`]: Typed errors of an invocation
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod counting;
pub mod error;
pub mod fetch;
pub mod probe;
pub mod publish;
pub mod xml;

pub use crate::commands::{Host, run};
