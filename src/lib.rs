//! Host side of the stick pilot: link reader and console sinks.
//!
//! The control logic lives in [`flight_core`]. This crate connects it to a
//! line-oriented link on stdin, parses the link's line protocol and writes
//! commands and telemetry reports as text.

pub mod link;
pub mod output;
pub mod parser;

pub use link::{ChannelInput, EventChannel, LinkReader, SignalTelemetry, TelemetrySignal};
pub use output::{ConsoleReporter, TextCommandSink};
pub use parser::{calculate_checksum, parse_message, ParsedMessage, MAX_LINE_LENGTH};
