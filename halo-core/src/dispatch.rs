//! Command dispatch
//!
//! Translates both wire command spaces into [`AppState`] mutations. This
//! is the only place that knows how a decoded command maps onto state, so
//! the two protocols cannot drift apart in semantics.

use halo_protocol::{Command, LineCommand};

use crate::state::{AppState, ScreenId};

/// Horizontal scale for normalized tracking coordinates
///
/// The framed protocol reports normalized floats which the controller
/// historically scaled to a 600x450 plane, not the physical 466x466
/// panel. Downstream marker placement depends on this plane, so it stays.
pub const TRACK_SCALE_X: f32 = 600.0;

/// Vertical scale for normalized tracking coordinates
pub const TRACK_SCALE_Y: f32 = 450.0;

/// Apply a framed-protocol command
pub fn apply_command(state: &mut AppState, cmd: &Command, now_ms: u64) {
    state.mark_serial_activity(now_ms);

    match cmd {
        Command::SetState { state_id } => {
            state.change_screen(ScreenId::from_state_id(*state_id));
        }
        Command::NosePosition { x, y } => {
            let px = (x * TRACK_SCALE_X) as i16;
            let py = (y * TRACK_SCALE_Y) as i16;
            state.update_target_position(px, py, now_ms);
        }
        Command::Progress { percent } => {
            state.set_progress(*percent);
        }
        // Already reported at the wire layer; nothing to apply
        Command::Unknown { .. } => {}
    }
}

/// Apply a text-protocol command
pub fn apply_line_command(state: &mut AppState, cmd: &LineCommand, now_ms: u64) {
    state.mark_serial_activity(now_ms);

    match cmd {
        LineCommand::SelectScreen(id) => {
            // The decoder validated the range; a failed lookup here means
            // the protocol and screen table disagree, so drop it
            if let Some(screen) = ScreenId::new(*id) {
                state.change_screen(screen);
            }
        }
        LineCommand::Target { x, y } => {
            state.update_target_position(*x, *y, now_ms);
        }
        LineCommand::Data(value) => {
            state.set_custom_data(value);
        }
        LineCommand::Temperature(celsius) => {
            state.set_temperature(*celsius);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_state_maps_through_screen_table() {
        let mut state = AppState::new();
        apply_command(&mut state, &Command::SetState { state_id: 7 }, 0);
        assert_eq!(state.current_screen().raw(), 7);

        // Out-of-range state ids fall back to the idle screen
        apply_command(&mut state, &Command::SetState { state_id: 42 }, 0);
        assert_eq!(state.current_screen(), ScreenId::IDLE);
    }

    #[test]
    fn test_nose_position_scaling() {
        let mut state = AppState::new();
        apply_command(&mut state, &Command::NosePosition { x: 0.5, y: 0.5 }, 10);
        assert_eq!((state.target_x(), state.target_y()), (300, 225));
        assert!(state.is_tracking_active(10));
    }

    #[test]
    fn test_progress_applies() {
        let mut state = AppState::new();
        apply_command(&mut state, &Command::Progress { percent: 80 }, 0);
        assert_eq!(state.progress_percent(), 80);
    }

    #[test]
    fn test_unknown_command_mutates_nothing_but_activity() {
        let mut state = AppState::new();
        apply_command(&mut state, &Command::Unknown { cmd: 0x99 }, 123);
        assert_eq!(state.current_screen(), ScreenId::IDLE);
        assert_eq!(state.last_serial_activity(), 123);
        assert!(state.serial_connected());
    }

    #[test]
    fn test_line_target_is_absolute() {
        let mut state = AppState::new();
        apply_line_command(&mut state, &LineCommand::Target { x: 100, y: 200 }, 5);
        assert_eq!((state.target_x(), state.target_y()), (100, 200));
    }

    #[test]
    fn test_line_select_screen_is_direct() {
        let mut state = AppState::new();
        apply_line_command(&mut state, &LineCommand::SelectScreen(10), 0);
        assert_eq!(state.current_screen().raw(), 10);
    }

    #[test]
    fn test_line_temperature() {
        let mut state = AppState::new();
        apply_line_command(&mut state, &LineCommand::Temperature(25.5), 0);
        assert_eq!(state.temperature(), 25.5);
    }
}
