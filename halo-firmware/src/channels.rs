//! Static inter-task channels
//!
//! All task communication flows through these; tasks never share mutable
//! state directly.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use halo_core::{ScreenChange, ScreenHandle};
use halo_protocol::{Command, LineCommand};

/// A decoded control command from either serial decoder
pub enum ControlCommand {
    Framed(Command),
    Line(LineCommand),
}

/// Compositor operations forwarded to the render task
pub enum RenderOp {
    ShowScreen(ScreenHandle),
    CreateOverlay(ScreenHandle),
    OverlayOpacity(u8),
    ReparentOverlay(ScreenHandle),
    DestroyOverlay,
}

/// Serial RX -> UI task
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, ControlCommand, 16> = Channel::new();

/// Screen-change notifications, UI task state store -> UI task sequencer
pub static SCREEN_CHANGES: Channel<CriticalSectionRawMutex, ScreenChange, 4> = Channel::new();

/// UI task -> render task
pub static RENDER_OPS: Channel<CriticalSectionRawMutex, RenderOp, 32> = Channel::new();

/// State-store change callback
///
/// Runs inside the mutation, so it must not block; it only queues the
/// notification for the sequencer to pick up on its next pass.
pub fn notify_screen_change(change: ScreenChange) {
    if SCREEN_CHANGES.try_send(change).is_err() {
        defmt::warn!(
            "screen change queue full, dropping notification for screen {}",
            change.current.raw()
        );
    }
}
