//! Lock-free store for the four analog stick channels.

use portable_atomic::{AtomicF32, Ordering};

use crate::types::{AxisChannel, Stick, StickPair};

/// Latest raw value of each [`AxisChannel`].
///
/// Every channel is an independent atomic cell: the input mapper is the
/// single writer and the control tick for that stick is the single reader.
/// There is no cross-channel consistency, a [`StickPair`] may combine an
/// `x` and a `y` written at different times.
///
/// Values are stored as given; range handling belongs to the translator.
pub struct AxisStore {
    channels: [AtomicF32; 4],
}

impl AxisStore {
    /// Create a store with every channel at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            channels: [
                AtomicF32::new(0.0),
                AtomicF32::new(0.0),
                AtomicF32::new(0.0),
                AtomicF32::new(0.0),
            ],
        }
    }

    /// Overwrite `channel` with `value`.
    #[inline]
    pub fn set(&self, channel: AxisChannel, value: f32) {
        self.channels[channel.index()].store(value, Ordering::Relaxed);
    }

    /// Latest value of `channel`, zero if it was never set.
    #[inline]
    #[must_use]
    pub fn get(&self, channel: AxisChannel) -> f32 {
        self.channels[channel.index()].load(Ordering::Relaxed)
    }

    /// Read both axes of `stick`.
    #[must_use]
    pub fn stick(&self, stick: Stick) -> StickPair {
        let (x, y) = stick.channels();
        StickPair::new(self.get(x), self.get(y))
    }

    /// Return every channel to neutral.
    pub fn reset(&self) {
        for channel in AxisChannel::ALL {
            self.set(channel, 0.0);
        }
    }
}

impl Default for AxisStore {
    fn default() -> Self {
        Self::new()
    }
}
