//! Row counting over parsed reports
//!
//! This is the core of the probe. Given a [`ParsedReport`](crate::xml::ParsedReport),
//! a [`CountingMode`] and a [`DashboardKind`], [`count_rows`] produces the
//! [`MeasurementPoint`]s to publish.
//!
//! # Implementation Model
//!
//! The dashboard kind fixes two query shapes: the row query selecting the elements
//! that count as rows, and the label query selecting the elements whose group
//! attribute contains a given label. Group labels come out of the composite
//! attribute through [`extract_group_label`].
//!
//! - **Row count**: size of the row query's node set
//! - **Unique row count**: number of distinct labels among those nodes
//! - **Instances per unique row**: for every distinct label, size of the label query's node set
//!
//! Counting is a pure function of its inputs; nothing is retained between calls.

mod counting_mode;
mod dashboard_kind;
mod group_label;
mod measurement_point;
mod row_counter;

pub use counting_mode::CountingMode;
pub use dashboard_kind::{DashboardKind, SPLIT_BY};
pub use group_label::extract_group_label;
pub use measurement_point::MeasurementPoint;
pub use row_counter::count_rows;
