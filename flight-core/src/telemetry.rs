//! Telemetry snapshots, the latest-value holder, and report formatting.
//!
//! Telemetry flows independently of control: a [`TelemetrySource`] delivers
//! [`FlightSnapshot`]s, the session keeps only the most recent one in a
//! [`LatestSnapshot`], and the periodic report task hands a
//! [`TelemetryReport`] to a [`TelemetrySink`].

use core::cell::Cell;
use core::fmt;
use core::future::Future;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Most recent flight data reported by the vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlightSnapshot {
    /// Remaining battery (0-100).
    pub battery_percent: u8,
    /// Vehicle-side low battery flag.
    pub battery_low: bool,
    /// Height in vehicle units.
    pub height: i16,
    /// Ground speed in vehicle units.
    pub ground_speed: i16,
}

/// Holder for the latest [`FlightSnapshot`].
///
/// Each store replaces the previous snapshot wholesale. Readers get a copy.
pub struct LatestSnapshot {
    inner: Mutex<CriticalSectionRawMutex, Cell<Option<FlightSnapshot>>>,
}

impl LatestSnapshot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(None)),
        }
    }

    /// Replace the held snapshot.
    pub fn store(&self, snapshot: FlightSnapshot) {
        self.inner.lock(|cell| cell.set(Some(snapshot)));
    }

    /// Copy of the latest snapshot, `None` before the first one arrives.
    #[must_use]
    pub fn latest(&self) -> Option<FlightSnapshot> {
        self.inner.lock(Cell::get)
    }
}

impl Default for LatestSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable rendering of a [`FlightSnapshot`].
///
/// ```rust
/// use flight_core::{FlightSnapshot, TelemetryReport};
///
/// let snapshot = FlightSnapshot {
///     battery_percent: 5,
///     battery_low: true,
///     height: 12,
///     ground_speed: 3,
/// };
/// let text = TelemetryReport(snapshot).to_string();
/// assert!(text.starts_with(" -- Battery low: 5% --\n"));
/// assert!(text.contains("Height:         12\n"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryReport(pub FlightSnapshot);

impl fmt::Display for TelemetryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = &self.0;
        if data.battery_low {
            writeln!(f, " -- Battery low: {}% --", data.battery_percent)?;
        }
        writeln!(f, "Battery:        {}%", data.battery_percent)?;
        writeln!(f, "Height:         {}", data.height)?;
        writeln!(f, "Ground Speed:   {}", data.ground_speed)
    }
}

/// Error type for telemetry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError {
    /// I/O error while writing the report.
    Io,
}

/// Trait for receiving telemetry from the vehicle link.
pub trait TelemetrySource {
    /// Wait for the next telemetry snapshot.
    ///
    /// Implementations pend until data arrives.
    fn receive(&mut self) -> impl Future<Output = FlightSnapshot>;
}

/// Trait for displaying telemetry reports.
pub trait TelemetrySink {
    /// Publish one report.
    fn publish(&mut self, report: &TelemetryReport)
        -> impl Future<Output = Result<(), TelemetryError>>;
}
