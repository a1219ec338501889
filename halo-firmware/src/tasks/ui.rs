//! UI task
//!
//! Owns the application state and the transition sequencer. Commands
//! from the serial task mutate the state; screen-change notifications
//! from the state store start hand-offs; a fixed-rate ticker advances
//! the sequencer.

use defmt::info;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};
use halo_core::dispatch::{apply_command, apply_line_command};
use halo_core::{AppState, ScreenRegistry, TransitionConfig, TransitionSequencer};

use crate::channels::{notify_screen_change, ControlCommand, COMMAND_CHANNEL, SCREEN_CHANGES};
use crate::display::{PanelCompositor, PanelRegistry};

/// Sequencer tick period; fast enough for a smooth 200ms fade
const TICK_MS: u64 = 16;

#[embassy_executor::task]
pub async fn ui_task(transition: TransitionConfig) {
    info!("UI task started");

    let mut state = AppState::new();
    state.set_change_callback(notify_screen_change);

    let registry = PanelRegistry;
    let boot = registry
        .lookup(state.current_screen())
        .expect("boot screen always registered");
    let mut compositor = PanelCompositor::new(boot);
    let mut sequencer = TransitionSequencer::new(transition);

    let epoch = Instant::now();
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));

    loop {
        match select(COMMAND_CHANNEL.receive(), ticker.next()).await {
            Either::First(cmd) => {
                let now = epoch.elapsed().as_millis();
                match cmd {
                    ControlCommand::Framed(cmd) => apply_command(&mut state, &cmd, now),
                    ControlCommand::Line(cmd) => apply_line_command(&mut state, &cmd, now),
                }
                service_changes(&mut sequencer, &registry, &mut compositor, now);
            }
            Either::Second(()) => {
                let now = epoch.elapsed().as_millis();
                service_changes(&mut sequencer, &registry, &mut compositor, now);
                sequencer.tick(&mut compositor, now);
            }
        }
    }
}

fn service_changes(
    sequencer: &mut TransitionSequencer,
    registry: &PanelRegistry,
    compositor: &mut PanelCompositor,
    now: u64,
) {
    while let Ok(change) = SCREEN_CHANGES.try_receive() {
        sequencer.start(change.current, registry, compositor, now);
    }
}
