//! Renderer boundary
//!
//! The widget trees behind each screen are owned by the render task;
//! these types only map screen ids to handles and sequence swap and
//! overlay operations onto the render queue.

use halo_core::{Compositor, ScreenHandle, ScreenId, ScreenRegistry};

use crate::channels::{RenderOp, RENDER_OPS};

/// Screens built by the renderer at boot
///
/// Every id maps straight to a handle because the renderer constructs
/// all screens up front rather than on demand.
pub struct PanelRegistry;

impl ScreenRegistry for PanelRegistry {
    fn lookup(&self, id: ScreenId) -> Option<ScreenHandle> {
        Some(ScreenHandle(u16::from(id.raw())))
    }
}

/// Compositor that forwards operations to the render task
pub struct PanelCompositor {
    active: Option<ScreenHandle>,
}

impl PanelCompositor {
    pub fn new(boot_screen: ScreenHandle) -> Self {
        push(RenderOp::ShowScreen(boot_screen));
        Self {
            active: Some(boot_screen),
        }
    }
}

impl Compositor for PanelCompositor {
    fn active_screen(&self) -> Option<ScreenHandle> {
        self.active
    }

    fn set_active_screen(&mut self, screen: ScreenHandle) {
        self.active = Some(screen);
        push(RenderOp::ShowScreen(screen));
    }

    fn create_overlay(&mut self, screen: ScreenHandle) {
        push(RenderOp::CreateOverlay(screen));
    }

    fn set_overlay_opacity(&mut self, opacity: u8) {
        push(RenderOp::OverlayOpacity(opacity));
    }

    fn reparent_overlay(&mut self, screen: ScreenHandle) {
        push(RenderOp::ReparentOverlay(screen));
    }

    fn destroy_overlay(&mut self) {
        push(RenderOp::DestroyOverlay);
    }
}

fn push(op: RenderOp) {
    // A full queue means the render task has stalled; dropping an
    // opacity step is recoverable, dropping a structural op is not, so
    // make it loud either way.
    if RENDER_OPS.try_send(op).is_err() {
        defmt::error!("render queue full, dropping operation");
    }
}
