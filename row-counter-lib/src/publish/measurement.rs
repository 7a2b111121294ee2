use crate::counting::MeasurementPoint;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Measure group every measurement belongs to.
pub const GROUP_NAME: &str = "Row Counter";

/// Name of the single metric the probe reports.
pub const METRIC_NAME: &str = "Rows";

/// Name of the dynamic sub-dimension carrying the group label.
pub const DIMENSION_NAME: &str = "unique measure";

/// A dynamic sub-dimension of a measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub name: &'static str,
    pub value: String,
}

/// The record handed to a [`MeasurementSink`](super::MeasurementSink).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub group: &'static str,
    pub metric: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,

    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

impl Measurement {
    #[must_use]
    pub fn from_point(point: &MeasurementPoint, timestamp: DateTime<Utc>) -> Self {
        Self {
            group: GROUP_NAME,
            metric: METRIC_NAME,
            dimension: point.label().map(|label| Dimension {
                name: DIMENSION_NAME,
                value: label.to_string(),
            }),
            value: point.value,
            timestamp,
        }
    }
}
