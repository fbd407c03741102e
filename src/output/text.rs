use std::io::Write;

use flight_core::{CommandSink, FlightCommand, SinkError};

/// Command sink writing one text command per line.
///
/// Each [`FlightCommand`] is written in its `Display` form
/// (`takeoff`, `flip l`, `forward 45.8`, ...) and the writer is flushed
/// so a downstream flight driver sees every command as soon as it is sent.
pub struct TextCommandSink<W> {
    writer: W,
    sent: usize,
}

impl<W: Write> TextCommandSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, sent: 0 }
    }

    /// Number of commands written successfully.
    #[inline]
    #[must_use]
    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CommandSink for TextCommandSink<W> {
    async fn send(&mut self, command: &FlightCommand) -> Result<(), SinkError> {
        writeln!(self.writer, "{}", command).map_err(|_| SinkError::Io)?;
        self.writer.flush().map_err(|_| SinkError::Io)?;
        self.sent += 1;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }
}
