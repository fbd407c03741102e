//! Line-oriented link from the controller bridge.
//!
//! A blocking reader thread frames the link into lines, parses them and
//! routes the results to the async side: controller events through an
//! [`EventChannel`] (FIFO, order preserved) and telemetry through a
//! [`TelemetrySignal`] (latest value wins).
//!
//! See [`crate::parser`] for the line protocol.

use std::io::{Bytes, Read};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use embassy_sync::signal::Signal;
use flight_core::{FlightSnapshot, InputError, InputEvent, InputSource, TelemetrySource};
use heapless::Vec;
use log::{debug, error, info, warn};

use crate::parser::{parse_message, ParsedMessage, MAX_LINE_LENGTH};

/// Depth of the controller event queue.
pub const EVENT_QUEUE_DEPTH: usize = 16;

/// Reader thread sleep between retries while the event queue is full.
pub const FULL_QUEUE_BACKOFF: Duration = Duration::from_millis(1);

/// Queue of controller events (and per-line errors) from the reader thread.
pub type EventChannel =
    Channel<CriticalSectionRawMutex, Result<InputEvent, InputError>, EVENT_QUEUE_DEPTH>;

/// Latest telemetry snapshot from the reader thread.
pub type TelemetrySignal = Signal<CriticalSectionRawMutex, FlightSnapshot>;

/// Frames a byte stream into protocol lines and parses them.
///
/// Lines longer than [`MAX_LINE_LENGTH`] are discarded up to the next
/// newline and reported as [`InputError::BufferOverflow`].
pub struct LinkReader<R> {
    bytes: Bytes<R>,
    buffer: Vec<u8, MAX_LINE_LENGTH>,
}

impl<R: Read> LinkReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            buffer: Vec::new(),
        }
    }

    /// Parse the next non-empty line. `None` once the stream ends.
    pub fn next_message(&mut self) -> Option<Result<ParsedMessage, InputError>> {
        loop {
            match self.read_line() {
                Ok(None) => return None,
                Ok(Some(line)) if is_blank(line) => continue,
                Ok(Some(line)) => return Some(parse_message(line)),
                Err(e) => return Some(Err(e)),
            }
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, InputError> {
        match self.bytes.next() {
            Some(Ok(byte)) => Ok(Some(byte)),
            Some(Err(_)) => Err(InputError::Io),
            None => Ok(None),
        }
    }

    /// Read bytes until a newline or the end of the stream.
    ///
    /// A final line without a trailing newline is still returned.
    fn read_line(&mut self) -> Result<Option<&[u8]>, InputError> {
        self.buffer.clear();

        loop {
            let Some(byte) = self.next_byte()? else {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(&self.buffer[..]));
            };

            if byte == b'\n' {
                return Ok(Some(&self.buffer[..]));
            }

            if self.buffer.push(byte).is_err() {
                // Buffer overflow - discard rest of line until newline
                while let Some(byte) = self.next_byte()? {
                    if byte == b'\n' {
                        break;
                    }
                }
                return Err(InputError::BufferOverflow);
            }
        }
    }
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|b| b.is_ascii_whitespace())
}

/// Route every message from `reader` until the stream ends or fails.
///
/// Controller events and per-line errors are queued in order. Telemetry
/// replaces the pending snapshot. When the link closes, a final
/// [`InputError::Disconnected`] is queued.
pub fn pump<R: Read>(mut reader: LinkReader<R>, events: &EventChannel, telemetry: &TelemetrySignal) {
    while let Some(message) = reader.next_message() {
        match message {
            Ok(ParsedMessage::Input(event)) => enqueue(events, Ok(event)),
            Ok(ParsedMessage::Telemetry(snapshot)) => telemetry.signal(snapshot),
            Err(InputError::Io) => {
                error!("Link read failed");
                break;
            }
            Err(e) => {
                debug!("Bad link line: {:?}", e);
                enqueue(events, Err(e));
            }
        }
    }

    info!("Link closed");
    enqueue(events, Err(InputError::Disconnected));
}

/// Queue `item`, sleeping [`FULL_QUEUE_BACKOFF`] between attempts while the
/// session is behind. Nothing is dropped, so button presses and the final
/// disconnect always arrive, in order.
fn enqueue(events: &EventChannel, mut item: Result<InputEvent, InputError>) {
    let mut waited = false;
    loop {
        match events.try_send(item) {
            Ok(()) => return,
            Err(TrySendError::Full(rejected)) => {
                if !waited {
                    warn!("Event queue full, reader waiting");
                    waited = true;
                }
                item = rejected;
                thread::sleep(FULL_QUEUE_BACKOFF);
            }
        }
    }
}

/// Run [`pump`] on a dedicated reader thread.
pub fn spawn_reader<R>(
    reader: R,
    events: &'static EventChannel,
    telemetry: &'static TelemetrySignal,
) -> std::io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("link-reader".into())
        .spawn(move || pump(LinkReader::new(reader), events, telemetry))
}

/// [`InputSource`] fed by the reader thread.
pub struct ChannelInput<'a> {
    events: &'a EventChannel,
}

impl<'a> ChannelInput<'a> {
    pub fn new(events: &'a EventChannel) -> Self {
        Self { events }
    }
}

impl InputSource for ChannelInput<'_> {
    async fn receive(&mut self) -> Result<InputEvent, InputError> {
        self.events.receive().await
    }
}

/// [`TelemetrySource`] fed by the reader thread.
pub struct SignalTelemetry<'a> {
    signal: &'a TelemetrySignal,
}

impl<'a> SignalTelemetry<'a> {
    pub fn new(signal: &'a TelemetrySignal) -> Self {
        Self { signal }
    }
}

impl TelemetrySource for SignalTelemetry<'_> {
    async fn receive(&mut self) -> FlightSnapshot {
        self.signal.wait().await
    }
}
