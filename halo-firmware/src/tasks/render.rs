//! Render task
//!
//! Drains the render queue and applies each operation to the panel.
//! Widget construction and the display driver hook in here; the task
//! keeps the panel work off the UI task's timing path.

use defmt::{debug, info, trace};

use crate::channels::{RenderOp, RENDER_OPS};

#[embassy_executor::task]
pub async fn render_task() {
    info!("render task started");

    loop {
        match RENDER_OPS.receive().await {
            RenderOp::ShowScreen(screen) => {
                debug!("show screen handle {}", screen.0);
            }
            RenderOp::CreateOverlay(screen) => {
                debug!("create overlay above handle {}", screen.0);
            }
            RenderOp::OverlayOpacity(opacity) => {
                trace!("overlay opacity {}", opacity);
            }
            RenderOp::ReparentOverlay(screen) => {
                debug!("reparent overlay above handle {}", screen.0);
            }
            RenderOp::DestroyOverlay => {
                debug!("destroy overlay");
            }
        }
    }
}
