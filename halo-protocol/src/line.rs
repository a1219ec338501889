//! Legacy line-oriented text protocol
//!
//! Newline- or carriage-return-terminated ASCII lines, three shapes:
//!
//! - `"<digit>{1,2}"` — bare screen select, 0-10
//! - `"X:<int>,Y:<int>"` — absolute tracking coordinate in panel pixels
//! - loose key/value messages like `{"screen": 2}`, scanned for the keys
//!   `screen`, `data` and `temp`
//!
//! Dispatch tries the shapes in that order. Unmatched non-empty lines are
//! echoed as a diagnostic and otherwise ignored.

use heapless::{String, Vec};

/// Panel width in pixels (round 466x466 AMOLED)
pub const DISPLAY_WIDTH: i16 = 466;

/// Panel height in pixels
pub const DISPLAY_HEIGHT: i16 = 466;

/// Maximum buffered line length
pub const MAX_LINE_LEN: usize = 512;

/// Maximum captured key/value length
pub const MAX_VALUE_LEN: usize = 64;

/// Highest valid zero-based screen id
const MAX_SCREEN: u8 = 10;

/// Errors reported by the line decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the maximum buffered length; buffer was cleared
    Overflow,
}

/// Commands decoded from text lines
///
/// Screen ids here are already validated and zero-based; the `screen` key
/// uses the controller's 1-based numbering and is mapped during decode.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineCommand {
    /// Switch to a screen, id in 0..=10
    SelectScreen(u8),
    /// Tracking target in absolute panel pixels
    Target { x: i16, y: i16 },
    /// Free-form application data payload
    Data(String<MAX_VALUE_LEN>),
    /// Temperature report
    Temperature(f32),
}

/// Resumable line decoder
///
/// Accumulates bytes until a terminator, then dispatches the completed
/// line. Survives arbitrary fragmentation of the input.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl LineDecoder {
    /// Create a new decoder with an empty line buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Ok(Some(cmd))` when a terminator completes a recognized
    /// line, `Ok(None)` otherwise. A line growing past [`MAX_LINE_LEN`]
    /// clears the buffer and reports [`LineError::Overflow`].
    pub fn feed(&mut self, byte: u8) -> Result<Option<LineCommand>, LineError> {
        if byte == b'\n' || byte == b'\r' {
            if self.buffer.is_empty() {
                return Ok(None);
            }
            let cmd = match core::str::from_utf8(&self.buffer) {
                Ok(text) => decode_line(text),
                // Non-ASCII garbage gets the same treatment as an
                // unmatched line
                Err(_) => None,
            };
            self.buffer.clear();
            return Ok(cmd);
        }

        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            return Err(LineError::Overflow);
        }
        Ok(None)
    }
}

/// Dispatch one completed line
pub fn decode_line(line: &str) -> Option<LineCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // 1. Bare screen number shorthand: "0" through "10"
    if line.len() <= 2 && line.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(id) = line.parse::<u8>() {
            if id <= MAX_SCREEN {
                return Some(LineCommand::SelectScreen(id));
            }
        }
    }

    // 2. Tracker format: "X:<int>,Y:<int>"
    if line.contains("X:") && line.contains("Y:") {
        if let (Some(x), Some(y)) = (scan_int(line, "X:"), scan_int(line, "Y:")) {
            if in_extent(x, DISPLAY_WIDTH) && in_extent(y, DISPLAY_HEIGHT) {
                return Some(LineCommand::Target {
                    x: x as i16,
                    y: y as i16,
                });
            }
            // Out-of-extent pairs are dropped without any diagnostic;
            // tracking updates must never echo back over the link
            return None;
        }
        // Malformed pair: fall through to the key scan
    }

    // 3. Key scan: screen, then data, then temp
    if let Some(value) = scan_value(line, "screen") {
        match value.parse::<u8>() {
            // The screen key uses the controller's 1-based numbering
            Ok(id) if (1..=MAX_SCREEN).contains(&id) => {
                return Some(LineCommand::SelectScreen(id - 1));
            }
            _ => {
                #[cfg(feature = "defmt")]
                defmt::warn!("screen key out of range: {=str}", value);
            }
        }
    }

    if let Some(value) = scan_value(line, "data") {
        let mut owned: String<MAX_VALUE_LEN> = String::new();
        for ch in value.chars() {
            if owned.push(ch).is_err() {
                break;
            }
        }
        return Some(LineCommand::Data(owned));
    }

    if let Some(value) = scan_value(line, "temp") {
        if let Ok(celsius) = value.parse::<f32>() {
            return Some(LineCommand::Temperature(celsius));
        }
    }

    // 4. Diagnostic echo only
    #[cfg(feature = "defmt")]
    defmt::debug!("RX: {=str}", line);
    None
}

fn in_extent(value: i32, extent: i16) -> bool {
    value >= 0 && value < extent as i32
}

/// Capture the value following `key` in a loose key/value line
///
/// Skips the separating `:` and whitespace, then captures to the closing
/// quote for quoted values, or to the next `,`, `}` or whitespace
/// otherwise. Returns `None` for missing keys and empty captures.
fn scan_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let key_pos = line.find(key)?;
    let after_key = &line[key_pos + key.len()..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();

    if let Some(quoted) = rest.strip_prefix('"') {
        let end = quoted.find('"')?;
        let value = &quoted[..end];
        return (!value.is_empty()).then_some(value);
    }

    let end = rest
        .find(|c: char| c == ',' || c == '}' || c.is_whitespace())
        .unwrap_or(rest.len());
    let value = &rest[..end];
    (!value.is_empty()).then_some(value)
}

/// Parse the integer immediately following `key`
fn scan_int(line: &str, key: &str) -> Option<i32> {
    let pos = line.find(key)?;
    leading_int(&line[pos + key.len()..])
}

/// Parse a leading optional-sign integer, ignoring trailing text
fn leading_int(s: &str) -> Option<i32> {
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(&b'-')));
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}
