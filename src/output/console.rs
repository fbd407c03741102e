use std::io::Write;

use flight_core::{TelemetryError, TelemetryReport, TelemetrySink};

/// Telemetry sink that prints each report as a text block.
pub struct ConsoleReporter<W> {
    writer: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TelemetrySink for ConsoleReporter<W> {
    async fn publish(&mut self, report: &TelemetryReport) -> Result<(), TelemetryError> {
        write!(self.writer, "{}", report).map_err(|_| TelemetryError::Io)?;
        self.writer.flush().map_err(|_| TelemetryError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use flight_core::FlightSnapshot;

    #[test]
    fn test_prints_report_block() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        let report = TelemetryReport(FlightSnapshot {
            battery_percent: 5,
            battery_low: true,
            height: 12,
            ground_speed: 3,
        });

        block_on(reporter.publish(&report)).unwrap();

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            text,
            " -- Battery low: 5% --\nBattery:        5%\nHeight:         12\nGround Speed:   3\n"
        );
    }

    #[test]
    fn test_reports_append() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        let report = TelemetryReport(FlightSnapshot::default());
        block_on(reporter.publish(&report)).unwrap();
        block_on(reporter.publish(&report)).unwrap();

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(text.matches("Battery:").count(), 2);
    }
}
