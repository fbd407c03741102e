//! Raw controller events to axis updates and one-shot commands.

use crate::axis::AxisStore;
use crate::types::{Button, FlightCommand, FlipDirection, InputEvent};

/// One-shot command bound to `button`.
#[inline]
pub const fn button_command(button: Button) -> FlightCommand {
    match button {
        Button::TakeOff => FlightCommand::TakeOff,
        Button::Land => FlightCommand::Land,
        Button::FlipUp => FlightCommand::Flip(FlipDirection::Forward),
        Button::FlipDown => FlightCommand::Flip(FlipDirection::Back),
        Button::FlipLeft => FlightCommand::Flip(FlipDirection::Left),
        Button::FlipRight => FlightCommand::Flip(FlipDirection::Right),
    }
}

/// Apply `event` to `axes`, returning the command a button press triggers.
///
/// Axis events only update the store. Every button press yields exactly one
/// command; presses are not debounced.
pub fn map_event(axes: &AxisStore, event: InputEvent) -> Option<FlightCommand> {
    match event {
        InputEvent::AxisChanged { channel, value } => {
            axes.set(channel, value);
            None
        }
        InputEvent::ButtonPressed(button) => {
            let command = button_command(button);
            if let FlightCommand::Flip(direction) = command {
                info!("Flip {:?}", direction);
            }
            Some(command)
        }
    }
}
