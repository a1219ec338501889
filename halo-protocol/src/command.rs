//! Typed commands carried by the framed protocol

use crate::frame::Frame;

/// Command identifier: select the active screen
pub const CMD_SET_STATE: u8 = 0x01;

/// Command identifier: tracked marker position
pub const CMD_NOSE_POSITION: u8 = 0x02;

/// Command identifier: progress report
pub const CMD_PROGRESS: u8 = 0x03;

/// Commands decoded from controller frames
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Select the screen mapped to this controller state id
    SetState { state_id: u8 },
    /// Tracked point, normalized 0.0-1.0 on both axes
    NosePosition { x: f32, y: f32 },
    /// Progress report in percent
    Progress { percent: u8 },
    /// Unrecognized command byte; logged upstream, otherwise inert
    Unknown { cmd: u8 },
}

impl Command {
    /// Decode a command from a validated frame
    ///
    /// Returns `None` when a known command carries too little data, which
    /// the controller treats as a dropped frame (no diagnostic beyond the
    /// caller's log).
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        Self::decode(frame.cmd, &frame.data)
    }

    /// Decode a command from its raw command byte and data
    pub fn decode(cmd: u8, data: &[u8]) -> Option<Self> {
        match cmd {
            CMD_SET_STATE => {
                if data.is_empty() {
                    return None;
                }
                Some(Command::SetState { state_id: data[0] })
            }
            CMD_NOSE_POSITION => {
                // Two little-endian IEEE754 floats: X then Y
                if data.len() < 8 {
                    return None;
                }
                let x = f32::from_le_bytes([data[0], data[1], data[2], data[3]]);
                let y = f32::from_le_bytes([data[4], data[5], data[6], data[7]]);
                Some(Command::NosePosition { x, y })
            }
            CMD_PROGRESS => {
                if data.is_empty() {
                    return None;
                }
                Some(Command::Progress { percent: data[0] })
            }
            other => Some(Command::Unknown { cmd: other }),
        }
    }

    /// Encode this command into a frame (for testing and controller-side use)
    pub fn to_frame(&self) -> Option<Frame> {
        match self {
            Command::SetState { state_id } => Frame::new(CMD_SET_STATE, &[*state_id]).ok(),
            Command::NosePosition { x, y } => {
                let mut data = [0u8; 8];
                data[..4].copy_from_slice(&x.to_le_bytes());
                data[4..].copy_from_slice(&y.to_le_bytes());
                Frame::new(CMD_NOSE_POSITION, &data).ok()
            }
            Command::Progress { percent } => Frame::new(CMD_PROGRESS, &[*percent]).ok(),
            Command::Unknown { cmd } => Frame::new(*cmd, &[]).ok(),
        }
    }
}
