//! Input source trait and error types.

use core::future::Future;

use crate::types::InputEvent;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Link/communication I/O error.
    Io,
    /// Protocol parsing error (invalid format).
    Parse,
    /// Checksum mismatch.
    Checksum,
    /// Controller link lost.
    Disconnected,
    /// Buffer overflow (line too long).
    BufferOverflow,
}

/// Async trait for controller event sources.
///
/// This trait abstracts where controller events come from (a joystick
/// driver, a serial link, a test script), so the session can consume them
/// without knowing the transport.
///
/// Events must be yielded in the order the controller produced them.
pub trait InputSource {
    /// Wait for and receive the next controller event.
    ///
    /// This is an async operation that yields when no event is available.
    /// A malformed event is reported as an error and does not end the
    /// stream; the next call continues with the following event.
    fn receive(&mut self) -> impl Future<Output = Result<InputEvent, InputError>>;
}
