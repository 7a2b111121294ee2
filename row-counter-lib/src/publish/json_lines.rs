use super::{Measurement, MeasurementSink};
use crate::error::ProbeError;
use std::io::Write;

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MeasurementSink for JsonLinesSink<W> {
    fn publish(&mut self, measurement: &Measurement) -> Result<(), ProbeError> {
        serde_json::to_writer(&mut self.writer, measurement).map_err(|e| ProbeError::Publish(e.to_string()))?;
        writeln!(self.writer).map_err(|e| ProbeError::Publish(e.to_string()))
    }
}
