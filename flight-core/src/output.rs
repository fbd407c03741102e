//! Command sink trait and error types.

use core::future::Future;

use crate::types::FlightCommand;

/// Error type for command sink operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// Link/communication I/O error.
    Io,
    /// The flight driver refused the command.
    Rejected,
}

/// Async trait for flight command sinks.
///
/// This trait abstracts the flight-control driver that encodes commands into
/// link packets. Every command is safe to send repeatedly; the control loop
/// re-issues motion commands on every tick and never retries a failed send.
pub trait CommandSink {
    /// Send one command to the vehicle.
    fn send(&mut self, command: &FlightCommand) -> impl Future<Output = Result<(), SinkError>>;

    /// Check if the sink is ready to accept commands.
    fn is_ready(&self) -> bool;
}
