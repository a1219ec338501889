//! Embassy task implementations

pub mod render;
pub mod serial;
pub mod ui;

pub use render::render_task;
pub use serial::serial_rx_task;
pub use ui::ui_task;
