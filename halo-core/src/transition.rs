//! Black-fade screen hand-off
//!
//! The panel shows color artifacts if a screen is swapped while visible,
//! so every change hides behind an opaque overlay:
//!
//! 1. `FadeIn`: a black overlay above the active screen ramps 0 -> 255
//! 2. the overlay holds opaque briefly so the panel finishes rendering it
//! 3. `Switching`: the active screen swaps while nothing is visible
//! 4. `FadeOut`: the overlay ramps 255 -> 0 above the new screen
//!
//! One explicit state machine advanced by elapsed time once per scheduler
//! tick; no timer callback chains. There is no cancellation path and no
//! timeout against a stalled scheduler.

use crate::config::TransitionConfig;
use crate::state::ScreenId;
use crate::traits::{Compositor, ScreenHandle, ScreenRegistry};

/// Fully transparent overlay opacity
pub const OPACITY_TRANSPARENT: u8 = 0;

/// Fully opaque overlay opacity
pub const OPACITY_COVER: u8 = 255;

/// Phases of the hand-off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionPhase {
    /// No transition in progress
    Idle,
    /// Overlay ramping to opaque, then holding for the settle delay
    FadeIn,
    /// Overlay fully opaque; the swap happens on the next tick
    Switching,
    /// Overlay ramping back to transparent above the new screen
    FadeOut,
}

/// The transition state machine
///
/// Exactly one instance exists; it is never re-entered while a hand-off
/// is running (new requests are dropped, not queued).
#[derive(Debug)]
pub struct TransitionSequencer {
    phase: TransitionPhase,
    config: TransitionConfig,
    target: Option<ScreenHandle>,
    phase_start: u64,
}

impl TransitionSequencer {
    /// Create an idle sequencer
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            phase: TransitionPhase::Idle,
            config,
            target: None,
            phase_start: 0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Whether a hand-off is in progress
    pub fn is_idle(&self) -> bool {
        self.phase == TransitionPhase::Idle
    }

    /// Request a hand-off to `target`
    ///
    /// Returns `false` without touching anything when a hand-off is
    /// already running, when the target has no renderer handle, or when
    /// the target is already active.
    pub fn start(
        &mut self,
        target: ScreenId,
        registry: &impl ScreenRegistry,
        compositor: &mut impl Compositor,
        now_ms: u64,
    ) -> bool {
        if self.phase != TransitionPhase::Idle {
            #[cfg(feature = "defmt")]
            defmt::debug!("transition busy, dropping request for screen {}", target.raw());
            return false;
        }

        let Some(handle) = registry.lookup(target) else {
            // Screen was never built; skip without entering the machine
            return false;
        };
        let Some(active) = compositor.active_screen() else {
            return false;
        };
        if active == handle {
            return false;
        }

        compositor.create_overlay(active);
        compositor.set_overlay_opacity(OPACITY_TRANSPARENT);

        self.target = Some(handle);
        self.phase = TransitionPhase::FadeIn;
        self.phase_start = now_ms;
        true
    }

    /// Advance the hand-off by elapsed wall-clock time
    pub fn tick(&mut self, compositor: &mut impl Compositor, now_ms: u64) {
        match self.phase {
            TransitionPhase::Idle => {}
            TransitionPhase::FadeIn => {
                let elapsed = now_ms.saturating_sub(self.phase_start);
                let fade = u64::from(self.config.fade_in_ms);
                let hold = u64::from(self.config.hold_ms);

                if elapsed >= fade + hold {
                    compositor.set_overlay_opacity(OPACITY_COVER);
                    self.phase = TransitionPhase::Switching;
                } else if elapsed >= fade {
                    // Settle delay: hold opaque so the panel has fully
                    // rendered the overlay before the content swap
                    compositor.set_overlay_opacity(OPACITY_COVER);
                } else {
                    compositor.set_overlay_opacity(ramp(elapsed, fade));
                }
            }
            TransitionPhase::Switching => {
                if let Some(handle) = self.target.take() {
                    compositor.set_active_screen(handle);
                    compositor.reparent_overlay(handle);
                }
                self.phase = TransitionPhase::FadeOut;
                self.phase_start = now_ms;
            }
            TransitionPhase::FadeOut => {
                let elapsed = now_ms.saturating_sub(self.phase_start);
                let fade = u64::from(self.config.fade_out_ms);

                if elapsed >= fade {
                    compositor.set_overlay_opacity(OPACITY_TRANSPARENT);
                    compositor.destroy_overlay();
                    self.phase = TransitionPhase::Idle;
                } else {
                    compositor.set_overlay_opacity(OPACITY_COVER - ramp(elapsed, fade));
                }
            }
        }
    }
}

/// Linear opacity ramp over `duration` milliseconds
fn ramp(elapsed: u64, duration: u64) -> u8 {
    (elapsed * u64::from(OPACITY_COVER) / duration.max(1)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    struct FakeRegistry {
        missing: Option<ScreenId>,
    }

    impl FakeRegistry {
        fn full() -> Self {
            Self { missing: None }
        }

        fn without(screen: ScreenId) -> Self {
            Self {
                missing: Some(screen),
            }
        }
    }

    impl ScreenRegistry for FakeRegistry {
        fn lookup(&self, id: ScreenId) -> Option<ScreenHandle> {
            if self.missing == Some(id) {
                None
            } else {
                Some(ScreenHandle(id.raw() as u16))
            }
        }
    }

    #[derive(Default)]
    struct FakeCompositor {
        active: Option<ScreenHandle>,
        overlay_alive: bool,
        opacity: u8,
        swaps: Vec<ScreenHandle, 8>,
        reparented_to: Option<ScreenHandle>,
        destroys: u8,
    }

    impl FakeCompositor {
        fn showing(screen: ScreenId) -> Self {
            Self {
                active: Some(ScreenHandle(screen.raw() as u16)),
                ..Default::default()
            }
        }
    }

    impl Compositor for FakeCompositor {
        fn active_screen(&self) -> Option<ScreenHandle> {
            self.active
        }

        fn set_active_screen(&mut self, screen: ScreenHandle) {
            self.active = Some(screen);
            self.swaps.push(screen).unwrap();
        }

        fn create_overlay(&mut self, _screen: ScreenHandle) {
            assert!(!self.overlay_alive, "overlay created twice");
            self.overlay_alive = true;
        }

        fn set_overlay_opacity(&mut self, opacity: u8) {
            assert!(self.overlay_alive, "opacity set without overlay");
            self.opacity = opacity;
        }

        fn reparent_overlay(&mut self, screen: ScreenHandle) {
            assert!(self.overlay_alive);
            self.reparented_to = Some(screen);
        }

        fn destroy_overlay(&mut self) {
            assert!(self.overlay_alive);
            self.overlay_alive = false;
        }
    }

    fn screen(id: u8) -> ScreenId {
        ScreenId::new(id).unwrap()
    }

    #[test]
    fn test_full_walk() {
        let registry = FakeRegistry::full();
        let mut compositor = FakeCompositor::showing(screen(0));
        let mut seq = TransitionSequencer::new(TransitionConfig::default());

        assert!(seq.start(screen(2), &registry, &mut compositor, 0));
        assert_eq!(seq.phase(), TransitionPhase::FadeIn);
        assert!(compositor.overlay_alive);

        // Linear ramp up
        seq.tick(&mut compositor, 100);
        assert_eq!(seq.phase(), TransitionPhase::FadeIn);
        assert_eq!(compositor.opacity, 127);

        // Fade done but inside the settle hold: pinned opaque
        seq.tick(&mut compositor, 220);
        assert_eq!(seq.phase(), TransitionPhase::FadeIn);
        assert_eq!(compositor.opacity, OPACITY_COVER);
        assert!(compositor.swaps.is_empty());

        // Hold elapsed
        seq.tick(&mut compositor, 250);
        assert_eq!(seq.phase(), TransitionPhase::Switching);
        assert!(compositor.swaps.is_empty());

        // Swap happens exactly once, behind full opacity
        seq.tick(&mut compositor, 255);
        assert_eq!(seq.phase(), TransitionPhase::FadeOut);
        assert_eq!(&compositor.swaps[..], &[ScreenHandle(2)]);
        assert_eq!(compositor.reparented_to, Some(ScreenHandle(2)));

        // Ramp back down
        seq.tick(&mut compositor, 355);
        assert_eq!(compositor.opacity, 128);

        seq.tick(&mut compositor, 455);
        assert_eq!(seq.phase(), TransitionPhase::Idle);
        assert!(!compositor.overlay_alive);
        assert_eq!(compositor.active, Some(ScreenHandle(2)));
        assert_eq!(compositor.swaps.len(), 1);
    }

    #[test]
    fn test_request_during_fade_is_dropped() {
        let registry = FakeRegistry::full();
        let mut compositor = FakeCompositor::showing(screen(0));
        let mut seq = TransitionSequencer::new(TransitionConfig::default());

        assert!(seq.start(screen(2), &registry, &mut compositor, 0));
        seq.tick(&mut compositor, 100);

        // Mid-fade request for a third screen: dropped, no queue
        assert!(!seq.start(screen(5), &registry, &mut compositor, 100));

        for now in [250, 260, 460, 470] {
            seq.tick(&mut compositor, now);
        }
        assert_eq!(seq.phase(), TransitionPhase::Idle);
        assert_eq!(compositor.active, Some(ScreenHandle(2)));
        assert_eq!(compositor.swaps.len(), 1);
    }

    #[test]
    fn test_missing_handle_skips_silently() {
        let registry = FakeRegistry::without(screen(4));
        let mut compositor = FakeCompositor::showing(screen(0));
        let mut seq = TransitionSequencer::new(TransitionConfig::default());

        assert!(!seq.start(screen(4), &registry, &mut compositor, 0));
        assert_eq!(seq.phase(), TransitionPhase::Idle);
        assert!(!compositor.overlay_alive);
    }

    #[test]
    fn test_same_screen_skipped() {
        let registry = FakeRegistry::full();
        let mut compositor = FakeCompositor::showing(screen(3));
        let mut seq = TransitionSequencer::new(TransitionConfig::default());

        assert!(!seq.start(screen(3), &registry, &mut compositor, 0));
        assert!(!compositor.overlay_alive);
    }

    #[test]
    fn test_sequencer_restartable_after_walk() {
        let registry = FakeRegistry::full();
        let mut compositor = FakeCompositor::showing(screen(0));
        let mut seq = TransitionSequencer::new(TransitionConfig::default());

        assert!(seq.start(screen(1), &registry, &mut compositor, 0));
        for now in [250, 260, 470] {
            seq.tick(&mut compositor, now);
        }
        assert!(seq.is_idle());

        assert!(seq.start(screen(2), &registry, &mut compositor, 1000));
        for now in [1250, 1260, 1470] {
            seq.tick(&mut compositor, now);
        }
        assert_eq!(compositor.active, Some(ScreenHandle(2)));
        assert_eq!(compositor.swaps.len(), 2);
    }

    #[test]
    fn test_custom_timing() {
        let config = TransitionConfig {
            fade_in_ms: 100,
            hold_ms: 10,
            fade_out_ms: 100,
        };
        let registry = FakeRegistry::full();
        let mut compositor = FakeCompositor::showing(screen(0));
        let mut seq = TransitionSequencer::new(config);

        assert!(seq.start(screen(1), &registry, &mut compositor, 0));
        seq.tick(&mut compositor, 50);
        assert_eq!(compositor.opacity, 127);
        seq.tick(&mut compositor, 110);
        assert_eq!(seq.phase(), TransitionPhase::Switching);
    }
}
