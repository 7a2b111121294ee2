//! Measurement publishing
//!
//! Every [`MeasurementPoint`](crate::counting::MeasurementPoint) becomes one [`Measurement`]
//! in the fixed `Row Counter` / `Rows` group, with the group label, when there is one,
//! carried as the `unique measure` sub-dimension.
//!
//! Measurements are handed to a [`MeasurementSink`]. Three sinks are provided:
//!
//! - [`JsonLinesSink`]: one JSON object per line, for machine consumption
//! - [`TextSink`]: human-readable lines, optionally colored
//! - [`MemorySink`]: collects measurements for inspection

mod json_lines;
mod measurement;
mod sink;
mod text;

pub use json_lines::JsonLinesSink;
pub use measurement::{DIMENSION_NAME, Dimension, GROUP_NAME, METRIC_NAME, Measurement};
pub use sink::{MeasurementSink, MemorySink};
pub use text::TextSink;
