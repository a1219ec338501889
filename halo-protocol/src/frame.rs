//! Framed-packet encoding and decoding
//!
//! Frame format on the wire:
//! - START (1 byte): 0xAA synchronization byte
//! - LEN (1 byte): CMD + DATA length (so LEN-1 data bytes)
//! - CMD (1 byte): command identifier
//! - DATA (LEN-1 bytes): command-specific payload
//! - CHECKSUM (1 byte): XOR of LEN, CMD and all DATA bytes
//! - END (1 byte): 0x55 terminator

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Frame terminator byte
pub const FRAME_END: u8 = 0x55;

/// Maximum buffered frame body (LEN + CMD + DATA + CHECKSUM + END)
pub const MAX_FRAME_SIZE: usize = 32;

/// Maximum data bytes per frame
pub const MAX_DATA_SIZE: usize = MAX_FRAME_SIZE - 4;

/// Complete wire size including the START byte
pub const MAX_WIRE_SIZE: usize = MAX_FRAME_SIZE + 1;

/// Errors that can occur while decoding frames
///
/// None of these are fatal: the framer resynchronizes on the next START
/// byte and the sender is responsible for retransmitting dropped frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Terminator byte missing where the frame should end
    BadEnd,
    /// Checksum mismatch
    BadChecksum,
    /// Frame body exceeded the maximum size before completing
    Overflow,
    /// Data too large to encode
    DataTooLarge,
}

/// Calculate the XOR checksum over LEN, CMD and DATA
fn checksum(len: u8, cmd: u8, data: &[u8]) -> u8 {
    let mut sum = len ^ cmd;
    for &byte in data {
        sum ^= byte;
    }
    sum
}

/// A validated frame: command byte plus data payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command identifier
    pub cmd: u8,
    /// Data payload
    pub data: Vec<u8, MAX_DATA_SIZE>,
}

impl Frame {
    /// Create a frame with the given command and data
    pub fn new(cmd: u8, data: &[u8]) -> Result<Self, FrameError> {
        let mut payload = Vec::new();
        payload
            .extend_from_slice(data)
            .map_err(|_| FrameError::DataTooLarge)?;
        Ok(Self { cmd, data: payload })
    }

    /// Encode this frame into a byte buffer, returning the bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let wire_len = 5 + self.data.len();
        if buffer.len() < wire_len {
            return Err(FrameError::DataTooLarge);
        }

        // LEN counts CMD plus DATA
        let len = self.data.len() as u8 + 1;

        buffer[0] = FRAME_START;
        buffer[1] = len;
        buffer[2] = self.cmd;
        buffer[3..3 + self.data.len()].copy_from_slice(&self.data);
        buffer[3 + self.data.len()] = checksum(len, self.cmd, &self.data);
        buffer[4 + self.data.len()] = FRAME_END;

        Ok(wire_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_WIRE_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_WIRE_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::DataTooLarge)?;
        Ok(vec)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Discarding bytes until a START byte is seen
    WaitingForStart,
    /// START seen, collecting the frame body
    Accumulating,
}

/// Resumable framed-packet decoder
///
/// Byte-wise and stateful: input may arrive in arbitrarily small fragments
/// and the decoder picks up where it left off. Any decode failure resets it
/// to hunting for the next START byte.
#[derive(Debug, Clone)]
pub struct Framer {
    state: ParseState,
    buffer: Vec<u8, MAX_FRAME_SIZE>,
}

impl Default for Framer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framer {
    /// Create a new framer waiting for a START byte
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            buffer: Vec::new(),
        }
    }

    /// Reset the framer, discarding any partial frame
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.buffer.clear();
    }

    /// Feed a single byte to the framer
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is decoded,
    /// `Ok(None)` when more bytes are needed, or `Err` on a decode failure.
    /// Errors leave the framer resynchronized on the next START byte.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::WaitingForStart => {
                if byte == FRAME_START {
                    self.buffer.clear();
                    self.state = ParseState::Accumulating;
                }
                // Silently ignore noise between frames
                Ok(None)
            }
            ParseState::Accumulating => {
                // Capacity equals MAX_FRAME_SIZE, so push only fails at the
                // overflow boundary handled below
                let _ = self.buffer.push(byte);

                // Need LEN + CMD + CHECKSUM + END before sizing the frame
                if self.buffer.len() >= 4 {
                    let len = self.buffer[0] as usize;
                    if len >= 1 {
                        let data_len = len - 1;
                        let body_len = 2 + data_len + 2;
                        if body_len <= MAX_FRAME_SIZE && self.buffer.len() >= body_len {
                            return self.finish(data_len);
                        }
                    }
                    // LEN of 0 (or an oversized LEN) can never complete and
                    // falls through to the overflow reset
                }

                if self.buffer.len() >= MAX_FRAME_SIZE {
                    self.reset();
                    return Err(FrameError::Overflow);
                }

                Ok(None)
            }
        }
    }

    /// Validate and extract the buffered frame
    fn finish(&mut self, data_len: usize) -> Result<Option<Frame>, FrameError> {
        self.state = ParseState::WaitingForStart;

        if self.buffer[3 + data_len] != FRAME_END {
            return Err(FrameError::BadEnd);
        }

        let len = self.buffer[0];
        let cmd = self.buffer[1];
        let data = &self.buffer[2..2 + data_len];
        let received = self.buffer[2 + data_len];
        if received != checksum(len, cmd, data) {
            return Err(FrameError::BadChecksum);
        }

        // Capacity check already done by the buffer itself
        let frame = Frame::new(cmd, data)?;
        Ok(Some(frame))
    }
}
