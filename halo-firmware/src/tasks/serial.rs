//! Serial RX task
//!
//! Reads raw UART bytes and feeds them through the decoder selected by
//! the link configuration, forwarding every decoded command to the UI
//! task. Decode errors resynchronize inside the decoders; this task only
//! logs them and keeps reading.

use defmt::{debug, info, warn};
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;
use halo_core::LinkMode;
use halo_protocol::{Command, Framer, LineDecoder};

use crate::channels::{ControlCommand, COMMAND_CHANNEL};

const READ_CHUNK: usize = 64;

#[embassy_executor::task]
pub async fn serial_rx_task(rx: BufferedUartRx, mode: LinkMode) {
    info!("serial RX task started, {} link", mode);
    match mode {
        LinkMode::Framed => run_framed(rx).await,
        LinkMode::Text => run_text(rx).await,
    }
}

async fn run_framed(mut rx: BufferedUartRx) {
    let mut framer = Framer::new();
    let mut buf = [0u8; READ_CHUNK];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(0) => continue,
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };

        for &byte in &buf[..n] {
            match framer.feed(byte) {
                Ok(Some(frame)) => {
                    let Some(cmd) = Command::from_frame(&frame) else {
                        warn!("undersized payload for cmd {=u8:#x}", frame.cmd);
                        continue;
                    };
                    if let Command::Unknown { cmd } = cmd {
                        debug!("unknown command byte {=u8:#x}", cmd);
                        continue;
                    }
                    COMMAND_CHANNEL.send(ControlCommand::Framed(cmd)).await;
                }
                Ok(None) => {}
                Err(e) => warn!("frame error: {:?}", e),
            }
        }
    }
}

async fn run_text(mut rx: BufferedUartRx) {
    let mut decoder = LineDecoder::new();
    let mut buf = [0u8; READ_CHUNK];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(0) => continue,
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };

        for &byte in &buf[..n] {
            match decoder.feed(byte) {
                Ok(Some(cmd)) => {
                    COMMAND_CHANNEL.send(ControlCommand::Line(cmd)).await;
                }
                Ok(None) => {}
                Err(e) => warn!("line error: {:?}", e),
            }
        }
    }
}
