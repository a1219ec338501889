//! Board-agnostic application logic for the Halo display firmware
//!
//! Everything here is independent of the panel and MCU:
//!
//! - The authoritative application state store and its mutation contract
//! - Command dispatch from both wire protocols into state mutations
//! - The black-fade transition sequencer between screens
//! - Boundary traits for the renderer (screen registry, compositor)
//! - Configuration type definitions
//!
//! The renderer itself (widgets, layout, fonts, the panel driver) lives
//! behind the [`traits`] boundary and is not part of this crate.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod state;
pub mod traits;
pub mod transition;

pub use config::{DisplayConfig, LinkConfig, LinkMode, TransitionConfig};
pub use state::{AppState, ScreenChange, ScreenId};
pub use traits::{Compositor, ScreenHandle, ScreenRegistry};
pub use transition::{TransitionPhase, TransitionSequencer};
