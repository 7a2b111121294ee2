use super::{Measurement, MeasurementSink};
use crate::error::ProbeError;
use owo_colors::OwoColorize;
use std::io::Write;

/// Human-readable output, one measurement per line.
#[derive(Debug)]
pub struct TextSink<W> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> TextSink<W> {
    pub const fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MeasurementSink for TextSink<W> {
    fn publish(&mut self, measurement: &Measurement) -> Result<(), ProbeError> {
        let timestamp = measurement.timestamp.format("%Y-%m-%d %H:%M:%S");
        let name = format!("{}/{}", measurement.group, measurement.metric);
        let dimension = measurement
            .dimension
            .as_ref()
            .map(|d| format!(" [{}={}]", d.name, d.value))
            .unwrap_or_default();

        let result = if self.use_colors {
            writeln!(
                self.writer,
                "{} {}{} = {}",
                timestamp.dimmed(),
                name.bold(),
                dimension.cyan(),
                measurement.value.green().bold()
            )
        } else {
            writeln!(self.writer, "{timestamp} {name}{dimension} = {}", measurement.value)
        };

        result.map_err(|e| ProbeError::Publish(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting::MeasurementPoint;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_plain_output() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let mut sink = TextSink::new(Vec::new(), false);
        sink.publish(&Measurement::from_point(&MeasurementPoint::total(3.0), timestamp)).unwrap();
        sink.publish(&Measurement::from_point(&MeasurementPoint::labeled("A", 2.0), timestamp)).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "2024-01-15 10:30:00 Row Counter/Rows = 3\n2024-01-15 10:30:00 Row Counter/Rows [unique measure=A] = 2\n"
        );
    }

    #[test]
    fn test_colored_output_contains_escape_codes() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let mut sink = TextSink::new(Vec::new(), true);
        sink.publish(&Measurement::from_point(&MeasurementPoint::total(3.0), timestamp)).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("Row Counter/Rows"));
    }
}
