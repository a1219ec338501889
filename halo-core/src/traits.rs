//! Renderer boundary traits
//!
//! The core never draws. It looks up renderer-owned screen handles through
//! [`ScreenRegistry`] and manipulates the transition overlay and active
//! screen through [`Compositor`]; everything behind those calls (widget
//! trees, layout, the panel driver) belongs to the renderer.

use crate::state::ScreenId;

/// Opaque token for a renderer-owned screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenHandle(pub u16);

/// Maps screen ids to renderer-owned handles
pub trait ScreenRegistry {
    /// Look up the handle for a screen id
    ///
    /// `None` means the renderer never built this screen; callers skip
    /// the operation rather than failing.
    fn lookup(&self, id: ScreenId) -> Option<ScreenHandle>;
}

/// Overlay and active-screen primitive consumed by the transition
/// sequencer
///
/// At most one overlay exists at a time; the sequencer guarantees
/// `create_overlay` is never called while one is alive.
pub trait Compositor {
    /// Currently displayed screen, if any
    fn active_screen(&self) -> Option<ScreenHandle>;

    /// Swap the displayed screen
    fn set_active_screen(&mut self, screen: ScreenHandle);

    /// Create the full-panel black overlay above `screen`, transparent
    fn create_overlay(&mut self, screen: ScreenHandle);

    /// Drive overlay opacity, 0 transparent to 255 opaque
    fn set_overlay_opacity(&mut self, opacity: u8);

    /// Move the overlay above a different screen
    fn reparent_overlay(&mut self, screen: ScreenHandle);

    /// Release the overlay
    fn destroy_overlay(&mut self);
}
