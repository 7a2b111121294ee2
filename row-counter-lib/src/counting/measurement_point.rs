use std::sync::Arc;

/// One counted value, optionally tagged with the group label it was counted for.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementPoint {
    pub label: Option<Arc<str>>,
    pub value: f64,
}

impl MeasurementPoint {
    /// An unlabeled point covering the whole report.
    #[must_use]
    pub const fn total(value: f64) -> Self {
        Self { label: None, value }
    }

    /// The point emitted when a report holds no qualifying rows.
    #[must_use]
    pub const fn zero() -> Self {
        Self::total(0.0)
    }

    #[must_use]
    pub fn labeled(label: impl Into<Arc<str>>, value: f64) -> Self {
        Self {
            label: Some(label.into()),
            value,
        }
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
