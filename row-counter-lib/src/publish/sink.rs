use super::Measurement;
use crate::error::ProbeError;

/// Destination for published measurements.
pub trait MeasurementSink {
    fn publish(&mut self, measurement: &Measurement) -> Result<(), ProbeError>;
}

/// Keeps every measurement in memory, in publication order.
#[derive(Debug, Default)]
pub struct MemorySink {
    measurements: Vec<Measurement>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    #[must_use]
    pub fn into_measurements(self) -> Vec<Measurement> {
        self.measurements
    }
}

impl MeasurementSink for MemorySink {
    fn publish(&mut self, measurement: &Measurement) -> Result<(), ProbeError> {
        self.measurements.push(measurement.clone());
        Ok(())
    }
}

impl<S: MeasurementSink + ?Sized> MeasurementSink for &mut S {
    fn publish(&mut self, measurement: &Measurement) -> Result<(), ProbeError> {
        (**self).publish(measurement)
    }
}
