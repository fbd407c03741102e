//! Platform-agnostic gamepad-to-flight-command translation.
//!
//! This crate turns controller events into flight commands for a small
//! quadcopter. It has no platform-specific dependencies and runs both in
//! embedded `no_std` environments and on host.
//!
//! # Overview
//!
//! - [`types`]: Axis channels, buttons, input events and [`FlightCommand`]
//! - [`axis`]: Latest value per axis channel ([`AxisStore`])
//! - [`mapper`]: Events to axis updates and one-shot commands ([`map_event`])
//! - [`translator`]: Stick positions to paired motion commands ([`scale`])
//! - [`scheduler`]: Repeating and one-shot task timing ([`Scheduler`])
//! - [`telemetry`]: Flight data snapshots and reports ([`TelemetryReport`])
//! - [`input`] / [`output`]: Source and sink traits ([`InputSource`], [`CommandSink`])
//! - [`session`]: Ties everything together ([`FlightSession`])
//!
//! # Control Model
//!
//! Controller axes are sampled, not forwarded: axis events only update the
//! [`AxisStore`], and every `control_period` each stick is translated into
//! one command per axis. Inside the dead zone the command is an explicit
//! zero, so a released stick stops the vehicle. Button presses are sent
//! immediately. A one-shot task lands the vehicle `safety_land_after` the
//! session starts.
//!
//! # Example
//!
//! ```rust
//! use flight_core::{translate_right, FlightCommand, StickPair, DEFAULT_CONFIG};
//!
//! // Right stick pushed halfway forward
//! let [pitch, roll] = translate_right(StickPair::new(0.0, -16383.5), &DEFAULT_CONFIG);
//! assert_eq!(pitch, FlightCommand::Forward(50.0));
//! assert_eq!(roll, FlightCommand::Right(0.0));
//! assert_eq!(pitch.to_string(), "forward 50.0");
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt (for embedded targets)
//! - **`log`**: Log through the `log` facade (for host builds)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod axis;
pub mod config;
pub mod input;
pub mod mapper;
pub mod output;
pub mod scheduler;
pub mod session;
pub mod telemetry;
pub mod translator;
pub mod types;

// Re-export main types at crate root
pub use axis::AxisStore;
pub use config::{ConfigError, ControlConfig, AXIS_OFFSET, DEFAULT_CONFIG};
pub use input::{InputError, InputSource};
pub use mapper::{button_command, map_event};
pub use output::{CommandSink, SinkError};
pub use scheduler::{ScheduledTask, Scheduler, SchedulerError, TaskAction, TaskKind};
pub use session::FlightSession;
pub use telemetry::{
    FlightSnapshot, LatestSnapshot, TelemetryError, TelemetryReport, TelemetrySink,
    TelemetrySource,
};
pub use translator::{scale, translate_left, translate_right};
pub use types::{AxisChannel, Button, FlightCommand, FlipDirection, InputEvent, Stick, StickPair};
