//! Core control types: AxisChannel, Button, StickPair, InputEvent, FlightCommand.

use core::fmt;

/// One analog input dimension of the controller.
///
/// Values are raw controller units, symmetric around zero and bounded by
/// [`AXIS_OFFSET`](crate::config::AXIS_OFFSET) in magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisChannel {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

impl AxisChannel {
    /// All channels, in storage order.
    pub const ALL: [Self; 4] = [Self::LeftX, Self::LeftY, Self::RightX, Self::RightY];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::LeftX => 0,
            Self::LeftY => 1,
            Self::RightX => 2,
            Self::RightY => 3,
        }
    }
}

/// Which physical stick a control tick reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stick {
    /// Vertical (Y) and yaw (X).
    Left,
    /// Pitch (Y) and roll (X).
    Right,
}

impl Stick {
    /// The `(x, y)` channels backing this stick.
    #[inline]
    #[must_use]
    pub const fn channels(self) -> (AxisChannel, AxisChannel) {
        match self {
            Self::Left => (AxisChannel::LeftX, AxisChannel::LeftY),
            Self::Right => (AxisChannel::RightX, AxisChannel::RightY),
        }
    }
}

/// Snapshot of one stick's axes.
///
/// `x` and `y` are read independently, so they are not guaranteed to come
/// from the same instant.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickPair {
    pub x: f32,
    pub y: f32,
}

impl StickPair {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const NEUTRAL: Self = Self { x: 0.0, y: 0.0 };
}

/// Discrete controller buttons that trigger one-shot commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    TakeOff,
    Land,
    FlipUp,
    FlipDown,
    FlipLeft,
    FlipRight,
}

/// Flip manoeuvre direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlipDirection {
    Forward,
    Back,
    Left,
    Right,
}

impl FlipDirection {
    /// Single-letter code used in the text command vocabulary.
    #[inline]
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Forward => 'f',
            Self::Back => 'b',
            Self::Left => 'l',
            Self::Right => 'r',
        }
    }
}

/// A single raw controller event.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// An analog axis moved to `value` (raw controller units).
    AxisChanged { channel: AxisChannel, value: f32 },
    /// A button transitioned to pressed.
    ButtonPressed(Button),
}

/// Abstract flight intent accepted by a [`CommandSink`](crate::CommandSink).
///
/// Motion variants carry a non-negative magnitude in
/// `0.0..=max_magnitude`; zero means neutral/hold. Every command may be
/// re-sent any number of times.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum FlightCommand {
    TakeOff,
    Land,
    Flip(FlipDirection),
    Forward(f32),
    Backward(f32),
    Left(f32),
    Right(f32),
    Up(f32),
    Down(f32),
    Clockwise(f32),
    CounterClockwise(f32),
}

impl FlightCommand {
    /// Magnitude of a motion command, `None` for one-shot commands.
    #[inline]
    #[must_use]
    pub const fn magnitude(&self) -> Option<f32> {
        match *self {
            Self::TakeOff | Self::Land | Self::Flip(_) => None,
            Self::Forward(m)
            | Self::Backward(m)
            | Self::Left(m)
            | Self::Right(m)
            | Self::Up(m)
            | Self::Down(m)
            | Self::Clockwise(m)
            | Self::CounterClockwise(m) => Some(m),
        }
    }
}

impl fmt::Display for FlightCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TakeOff => f.write_str("takeoff"),
            Self::Land => f.write_str("land"),
            Self::Flip(dir) => write!(f, "flip {}", dir.code()),
            Self::Forward(m) => write!(f, "forward {m:.1}"),
            Self::Backward(m) => write!(f, "back {m:.1}"),
            Self::Left(m) => write!(f, "left {m:.1}"),
            Self::Right(m) => write!(f, "right {m:.1}"),
            Self::Up(m) => write!(f, "up {m:.1}"),
            Self::Down(m) => write!(f, "down {m:.1}"),
            Self::Clockwise(m) => write!(f, "cw {m:.1}"),
            Self::CounterClockwise(m) => write!(f, "ccw {m:.1}"),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::format;

    #[test]
    fn test_stick_channels() {
        assert_eq!(Stick::Left.channels(), (AxisChannel::LeftX, AxisChannel::LeftY));
        assert_eq!(Stick::Right.channels(), (AxisChannel::RightX, AxisChannel::RightY));
    }

    #[test]
    fn test_channel_indices_are_distinct() {
        let mut seen = [false; 4];
        for channel in AxisChannel::ALL {
            assert!(!seen[channel.index()]);
            seen[channel.index()] = true;
        }
    }

    #[test]
    fn test_command_display() {
        assert_eq!(format!("{}", FlightCommand::TakeOff), "takeoff");
        assert_eq!(format!("{}", FlightCommand::Flip(FlipDirection::Back)), "flip b");
        assert_eq!(format!("{}", FlightCommand::Forward(12.34)), "forward 12.3");
        assert_eq!(format!("{}", FlightCommand::CounterClockwise(0.0)), "ccw 0.0");
    }

    #[test]
    fn test_command_magnitude() {
        assert_eq!(FlightCommand::Land.magnitude(), None);
        assert_eq!(FlightCommand::Up(12.5).magnitude(), Some(12.5));
    }
}
