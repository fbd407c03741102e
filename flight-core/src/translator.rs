//! Stick-to-command translation.
//!
//! Each control tick reads one stick and issues exactly one command per axis,
//! every tick, whether or not the stick moved. Inside the dead zone the
//! command is an explicit zero so that residual motion is cancelled.
//!
//! | Stick | Axis | Below `-zone` | Above `+zone` | Otherwise |
//! |-------|------|---------------|---------------|-----------|
//! | Right | Y | `Forward` | `Backward` | `Forward(0)` |
//! | Right | X | `Left` | `Right` | `Right(0)` |
//! | Left | Y | `Up` | `Down` | `Up(0)` |
//! | Left | X | `CounterClockwise` | `Clockwise` | `Clockwise(0)` |
//!
//! The yaw axis (left X) uses the wider rotation dead zone.

use crate::config::ControlConfig;
use crate::types::{FlightCommand, StickPair};

/// Map a raw axis value onto the sink's magnitude range.
///
/// Linear in `|raw| / axis_offset`, clamped to `0.0..=max_magnitude`.
/// NaN maps to zero.
#[must_use]
pub fn scale(raw: f32, config: &ControlConfig) -> f32 {
    let magnitude = if raw < 0.0 { -raw } else { raw };
    let scaled = magnitude / config.axis_offset * config.max_magnitude;
    if scaled.is_nan() {
        0.0
    } else {
        scaled.min(config.max_magnitude)
    }
}

/// Translate the right stick: `[pitch command, roll command]`.
pub fn translate_right(stick: StickPair, config: &ControlConfig) -> [FlightCommand; 2] {
    let zone = config.translate_dead_zone;

    let pitch = if stick.y < -zone {
        FlightCommand::Forward(scale(stick.y, config))
    } else if stick.y > zone {
        FlightCommand::Backward(scale(stick.y, config))
    } else {
        FlightCommand::Forward(0.0)
    };

    let roll = if stick.x > zone {
        FlightCommand::Right(scale(stick.x, config))
    } else if stick.x < -zone {
        FlightCommand::Left(scale(stick.x, config))
    } else {
        FlightCommand::Right(0.0)
    };

    [pitch, roll]
}

/// Translate the left stick: `[vertical command, yaw command]`.
pub fn translate_left(stick: StickPair, config: &ControlConfig) -> [FlightCommand; 2] {
    let zone = config.translate_dead_zone;
    let yaw_zone = config.rotate_dead_zone;

    let vertical = if stick.y < -zone {
        FlightCommand::Up(scale(stick.y, config))
    } else if stick.y > zone {
        FlightCommand::Down(scale(stick.y, config))
    } else {
        FlightCommand::Up(0.0)
    };

    let yaw = if stick.x > yaw_zone {
        FlightCommand::Clockwise(scale(stick.x, config))
    } else if stick.x < -yaw_zone {
        FlightCommand::CounterClockwise(scale(stick.x, config))
    } else {
        FlightCommand::Clockwise(0.0)
    };

    [vertical, yaw]
}
