//! Line protocol spoken by the controller bridge.
//!
//! Three message types share one link:
//! - Axis update (U prefix): `U<field>:<value>*<checksum>\n`
//! - Button press (P prefix): `P<button>*<checksum>\n`
//! - Telemetry (T prefix): `T<battery>:<low>:<height>:<speed>*<checksum>\n`
//!
//! The checksum is the XOR of every byte between the prefix and `*`,
//! written as two hex digits.

use std::str;

use flight_core::{AxisChannel, Button, FlightSnapshot, InputError, InputEvent};

/// Maximum line length for the protocol (including newline).
pub const MAX_LINE_LENGTH: usize = 64;

/// Parsed message - either a controller event or a telemetry snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub enum ParsedMessage {
    /// Axis update or button press (U or P prefix)
    Input(InputEvent),
    /// Telemetry snapshot (T prefix)
    Telemetry(FlightSnapshot),
}

/// Parse one protocol line, with or without its CR/LF ending.
///
/// ```text
/// URY:-15000*XX\n   -> ParsedMessage::Input(AxisChanged { RightY, -15000.0 })
/// PTO*XX\n          -> ParsedMessage::Input(ButtonPressed(TakeOff))
/// T5:1:12:3*XX\n    -> ParsedMessage::Telemetry(FlightSnapshot { .. })
/// ```
pub fn parse_message(line: &[u8]) -> Result<ParsedMessage, InputError> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    let (&prefix, rest) = line.split_first().ok_or(InputError::Parse)?;
    if !matches!(prefix, b'U' | b'P' | b'T') {
        return Err(InputError::Parse);
    }

    let payload = verified_payload(rest)?;
    match prefix {
        b'U' => parse_update(payload).map(ParsedMessage::Input),
        b'P' => parse_press(payload).map(ParsedMessage::Input),
        _ => parse_telemetry(payload).map(ParsedMessage::Telemetry),
    }
}

/// XOR checksum of the payload bytes.
#[inline]
pub fn calculate_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc ^ b)
}

/// Split `<payload>*<checksum>` and verify the checksum.
fn verified_payload(rest: &[u8]) -> Result<&str, InputError> {
    let text = str::from_utf8(rest).map_err(|_| InputError::Parse)?;
    let (payload, checksum) = text.rsplit_once('*').ok_or(InputError::Parse)?;

    if checksum.len() != 2 || !checksum.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(InputError::Parse);
    }
    let received = u8::from_str_radix(checksum, 16).map_err(|_| InputError::Parse)?;

    if calculate_checksum(payload.as_bytes()) != received {
        return Err(InputError::Checksum);
    }
    Ok(payload)
}

/// `LX|LY|RX|RY:<i16>`
fn parse_update(payload: &str) -> Result<InputEvent, InputError> {
    let (field, value) = payload.split_once(':').ok_or(InputError::Parse)?;

    let channel = match field {
        "LX" => AxisChannel::LeftX,
        "LY" => AxisChannel::LeftY,
        "RX" => AxisChannel::RightX,
        "RY" => AxisChannel::RightY,
        _ => return Err(InputError::Parse),
    };
    let value: i16 = value.parse().map_err(|_| InputError::Parse)?;

    Ok(InputEvent::AxisChanged {
        channel,
        value: f32::from(value),
    })
}

/// `TO` take off, `LD` land, `FU|FD|FL|FR` flips.
fn parse_press(payload: &str) -> Result<InputEvent, InputError> {
    let button = match payload {
        "TO" => Button::TakeOff,
        "LD" => Button::Land,
        "FU" => Button::FlipUp,
        "FD" => Button::FlipDown,
        "FL" => Button::FlipLeft,
        "FR" => Button::FlipRight,
        _ => return Err(InputError::Parse),
    };
    Ok(InputEvent::ButtonPressed(button))
}

/// `<battery 0-100>:<low 0|1>:<height i16>:<speed i16>`
fn parse_telemetry(payload: &str) -> Result<FlightSnapshot, InputError> {
    let mut fields = payload.split(':');
    let mut next = || fields.next().ok_or(InputError::Parse);

    let battery_percent: u8 = next()?.parse().map_err(|_| InputError::Parse)?;
    let battery_low = match next()? {
        "0" => false,
        "1" => true,
        _ => return Err(InputError::Parse),
    };
    let height: i16 = next()?.parse().map_err(|_| InputError::Parse)?;
    let ground_speed: i16 = next()?.parse().map_err(|_| InputError::Parse)?;

    if next().is_ok() || battery_percent > 100 {
        return Err(InputError::Parse);
    }

    Ok(FlightSnapshot {
        battery_percent,
        battery_low,
        height,
        ground_speed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(prefix: char, payload: &str) -> String {
        let checksum = calculate_checksum(payload.as_bytes());
        format!("{}{}*{:02X}\n", prefix, payload, checksum)
    }

    fn parse(text: &str) -> Result<ParsedMessage, InputError> {
        parse_message(text.as_bytes())
    }

    #[test]
    fn test_parse_axis_updates() {
        let cases = [
            ("LX:-500", AxisChannel::LeftX, -500.0),
            ("LY:1000", AxisChannel::LeftY, 1000.0),
            ("RX:2000", AxisChannel::RightX, 2000.0),
            ("RY:-15000", AxisChannel::RightY, -15000.0),
            ("LX:32767", AxisChannel::LeftX, 32767.0),
            ("LX:-32768", AxisChannel::LeftX, -32768.0),
        ];
        for (payload, channel, value) in cases {
            assert_eq!(
                parse(&line('U', payload)),
                Ok(ParsedMessage::Input(InputEvent::AxisChanged { channel, value }))
            );
        }
    }

    #[test]
    fn test_axis_out_of_range() {
        assert_eq!(parse(&line('U', "LX:32768")), Err(InputError::Parse));
    }

    #[test]
    fn test_parse_button_presses() {
        let cases = [
            ("TO", Button::TakeOff),
            ("LD", Button::Land),
            ("FU", Button::FlipUp),
            ("FD", Button::FlipDown),
            ("FL", Button::FlipLeft),
            ("FR", Button::FlipRight),
        ];
        for (payload, button) in cases {
            assert_eq!(
                parse(&line('P', payload)),
                Ok(ParsedMessage::Input(InputEvent::ButtonPressed(button)))
            );
        }
        assert_eq!(parse(&line('P', "XX")), Err(InputError::Parse));
    }

    #[test]
    fn test_parse_telemetry() {
        assert_eq!(
            parse(&line('T', "5:1:12:-3")),
            Ok(ParsedMessage::Telemetry(FlightSnapshot {
                battery_percent: 5,
                battery_low: true,
                height: 12,
                ground_speed: -3,
            }))
        );
    }

    #[test]
    fn test_parse_telemetry_rejects_bad_fields() {
        for payload in ["101:0:0:0", "50:2:0:0", "50:0:0", "50:0:0:0:0", "50:0:x:0", "-1:0:0:0"] {
            assert_eq!(parse(&line('T', payload)), Err(InputError::Parse), "{}", payload);
        }
    }

    #[test]
    fn test_checksum_mismatch() {
        assert_eq!(parse("PTO*00\n"), Err(InputError::Checksum));
        assert_eq!(parse("ULX:5*00\n"), Err(InputError::Checksum));
    }

    #[test]
    fn test_lowercase_checksum_accepted() {
        let text = format!("PFL*{:02x}", calculate_checksum(b"FL"));
        assert!(parse(&text).is_ok());
    }

    #[test]
    fn test_invalid_prefix() {
        assert_eq!(parse(&line('X', "LX:0")), Err(InputError::Parse));
    }

    #[test]
    fn test_empty_lines_rejected() {
        assert_eq!(parse(""), Err(InputError::Parse));
        assert_eq!(parse("\n"), Err(InputError::Parse));
        assert_eq!(parse("\r\n"), Err(InputError::Parse));
    }

    #[test]
    fn test_cr_lf_line_ending() {
        let mut text = line('P', "LD");
        text.insert(text.len() - 1, '\r');
        assert_eq!(
            parse(&text),
            Ok(ParsedMessage::Input(InputEvent::ButtonPressed(Button::Land)))
        );
    }

    #[test]
    fn test_malformed_framing_rejected() {
        let checksum = calculate_checksum(b"TO");
        assert_eq!(parse(&format!("PTO*{:02X}Z\n", checksum)), Err(InputError::Parse));
        assert_eq!(parse("PTO\n"), Err(InputError::Parse));
        assert_eq!(parse("PTO*+F\n"), Err(InputError::Parse));
        assert_eq!(parse(&line('U', "LX:-")), Err(InputError::Parse));
        assert_eq!(parse(&line('U', "LX1000")), Err(InputError::Parse));
    }
}
