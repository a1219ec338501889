//! Serial control protocol for the Halo display
//!
//! The display is a "dumb terminal": an external controller drives it over
//! UART, selecting screens, streaming a tracked marker position and
//! reporting progress. Two wire formats exist:
//!
//! # Framed (binary)
//!
//! ```text
//! ┌───────┬─────┬─────┬─────────────┬──────────┬─────┐
//! │ START │ LEN │ CMD │ DATA        │ CHECKSUM │ END │
//! │ 0xAA  │ 1B  │ 1B  │ LEN-1 bytes │ 1B       │0x55 │
//! └───────┴─────┴─────┴─────────────┴──────────┴─────┘
//! ```
//!
//! `LEN` counts CMD plus DATA; the checksum is the XOR of LEN, CMD and all
//! DATA bytes.
//!
//! # Text (legacy)
//!
//! Newline-terminated ASCII lines: a bare screen number (`"3"`), a tracking
//! pair (`"X:100,Y:200"`), or a loose key/value message (`{"screen": 2}`).
//!
//! Which decoder runs is chosen at startup wiring; they are never fed the
//! same byte stream concurrently.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;
pub mod line;

pub use command::Command;
pub use frame::{Frame, FrameError, Framer, FRAME_END, FRAME_START, MAX_FRAME_SIZE};
pub use line::{LineCommand, LineDecoder, LineError, DISPLAY_HEIGHT, DISPLAY_WIDTH};
