//! Authoritative application state
//!
//! One [`AppState`] is constructed at startup and passed by reference into
//! every handler; there is no global. All mutation goes through the
//! operations here, and the single registered change callback is the only
//! notification path out.

pub mod screen;

pub use screen::{ScreenChange, ScreenId};

use heapless::String;

/// Tracking reports older than this are considered stale
pub const TRACKING_TIMEOUT_MS: u64 = 2000;

/// Maximum stored free-form data payload
pub const MAX_CUSTOM_DATA: usize = 64;

/// Screen-change notification callback
///
/// Fired synchronously inside [`AppState::change_screen`], before it
/// returns. Must not re-enter `change_screen`.
pub type ScreenChangeCallback = fn(ScreenChange);

/// The single authoritative state store
///
/// Owned by the cooperative main loop; no locking because there is no
/// preemption. Timestamps are monotonic milliseconds supplied by the
/// caller, which keeps this crate clock-free and the tests deterministic.
#[derive(Debug)]
pub struct AppState {
    current_screen: ScreenId,
    previous_screen: ScreenId,

    serial_connected: bool,
    last_serial_activity: u64,

    battery_level: f32,
    is_charging: bool,

    // Tracking marker target in panel pixels
    target_x: i16,
    target_y: i16,
    tracking_active: bool,
    last_tracking_update: u64,

    progress_percent: u8,
    temperature: f32,
    custom_data: String<MAX_CUSTOM_DATA>,

    change_callback: Option<ScreenChangeCallback>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create the state store with boot defaults
    pub fn new() -> Self {
        Self {
            current_screen: ScreenId::IDLE,
            previous_screen: ScreenId::IDLE,
            serial_connected: false,
            last_serial_activity: 0,
            battery_level: 0.0,
            is_charging: false,
            // Panel center
            target_x: 233,
            target_y: 233,
            tracking_active: false,
            last_tracking_update: 0,
            progress_percent: 0,
            temperature: 0.0,
            custom_data: String::new(),
            change_callback: None,
        }
    }

    /// Register the change-notification callback
    ///
    /// One slot: registering again replaces the previous callback.
    pub fn set_change_callback(&mut self, callback: ScreenChangeCallback) {
        self.change_callback = Some(callback);
    }

    /// Switch the current screen
    ///
    /// Records the previous screen and fires the registered callback
    /// before returning. The visual hand-off runs asynchronously in the
    /// transition sequencer, driven by whoever services the notification.
    pub fn change_screen(&mut self, target: ScreenId) {
        self.previous_screen = self.current_screen;
        self.current_screen = target;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "screen changed: {} -> {}",
            self.previous_screen.raw(),
            self.current_screen.raw()
        );

        if let Some(callback) = self.change_callback {
            callback(ScreenChange {
                previous: self.previous_screen,
                current: self.current_screen,
            });
        }
    }

    /// Advance to the next screen in the cycle (touch-release handler)
    pub fn advance_screen(&mut self) {
        self.change_screen(self.current_screen.cycled());
    }

    /// Update the tracking marker target
    pub fn update_target_position(&mut self, x: i16, y: i16, now_ms: u64) {
        self.target_x = x;
        self.target_y = y;
        self.tracking_active = true;
        self.last_tracking_update = now_ms;
    }

    /// Whether a tracking report arrived within the staleness window
    ///
    /// Evaluated lazily: the stored flag is never cleared by timeout, only
    /// superseded by the age check here. A fresh update is the only way
    /// back to `true`.
    pub fn is_tracking_active(&self, now_ms: u64) -> bool {
        self.tracking_active
            && now_ms.saturating_sub(self.last_tracking_update) < TRACKING_TIMEOUT_MS
    }

    /// Note link activity (called for every applied command)
    pub fn mark_serial_activity(&mut self, now_ms: u64) {
        self.serial_connected = true;
        self.last_serial_activity = now_ms;
    }

    /// Store a progress report, clamped to 100
    pub fn set_progress(&mut self, percent: u8) {
        self.progress_percent = percent.min(100);
    }

    /// Store a battery report
    pub fn set_battery(&mut self, level: f32, charging: bool) {
        self.battery_level = level;
        self.is_charging = charging;
    }

    /// Store a temperature report
    pub fn set_temperature(&mut self, celsius: f32) {
        self.temperature = celsius;
    }

    /// Store a free-form data payload, truncating to capacity
    pub fn set_custom_data(&mut self, value: &str) {
        self.custom_data.clear();
        for ch in value.chars() {
            if self.custom_data.push(ch).is_err() {
                break;
            }
        }
    }

    pub fn current_screen(&self) -> ScreenId {
        self.current_screen
    }

    pub fn previous_screen(&self) -> ScreenId {
        self.previous_screen
    }

    pub fn target_x(&self) -> i16 {
        self.target_x
    }

    pub fn target_y(&self) -> i16 {
        self.target_y
    }

    pub fn serial_connected(&self) -> bool {
        self.serial_connected
    }

    pub fn last_serial_activity(&self) -> u64 {
        self.last_serial_activity
    }

    pub fn battery_level(&self) -> f32 {
        self.battery_level
    }

    pub fn is_charging(&self) -> bool {
        self.is_charging
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn custom_data(&self) -> &str {
        &self.custom_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU16, Ordering};

    #[test]
    fn test_boot_defaults() {
        let state = AppState::new();
        assert_eq!(state.current_screen(), ScreenId::IDLE);
        assert_eq!((state.target_x(), state.target_y()), (233, 233));
        assert!(!state.serial_connected());
        assert!(!state.is_tracking_active(0));
    }

    #[test]
    fn test_change_screen_records_previous() {
        let mut state = AppState::new();
        state.change_screen(ScreenId::new(3).unwrap());
        state.change_screen(ScreenId::new(7).unwrap());
        assert_eq!(state.current_screen().raw(), 7);
        assert_eq!(state.previous_screen().raw(), 3);
    }

    #[test]
    fn test_change_callback_fires_synchronously() {
        // Encodes previous in the high byte, current in the low byte
        static LAST_CHANGE: AtomicU16 = AtomicU16::new(u16::MAX);

        fn record(change: ScreenChange) {
            let packed = (change.previous.raw() as u16) << 8 | change.current.raw() as u16;
            LAST_CHANGE.store(packed, Ordering::Relaxed);
        }

        let mut state = AppState::new();
        state.set_change_callback(record);
        state.change_screen(ScreenId::new(5).unwrap());
        assert_eq!(LAST_CHANGE.load(Ordering::Relaxed), 0x0005);

        state.change_screen(ScreenId::new(2).unwrap());
        assert_eq!(LAST_CHANGE.load(Ordering::Relaxed), 0x0502);
    }

    #[test]
    fn test_tracking_staleness_window() {
        let mut state = AppState::new();
        state.update_target_position(100, 200, 1000);

        assert!(state.is_tracking_active(1000 + 1999));
        assert!(!state.is_tracking_active(1000 + 2001));

        // The query leaves the flag untouched: a query inside the window
        // still succeeds after a stale one
        assert!(state.is_tracking_active(1000 + 1500));
    }

    #[test]
    fn test_fresh_update_revives_tracking() {
        let mut state = AppState::new();
        state.update_target_position(10, 10, 0);
        assert!(!state.is_tracking_active(5000));

        state.update_target_position(20, 20, 5000);
        assert!(state.is_tracking_active(5001));
        assert_eq!((state.target_x(), state.target_y()), (20, 20));
    }

    #[test]
    fn test_advance_screen_cycles() {
        let mut state = AppState::new();
        for expected in 1..=10u8 {
            state.advance_screen();
            assert_eq!(state.current_screen().raw(), expected);
        }
        state.advance_screen();
        assert_eq!(state.current_screen(), ScreenId::IDLE);
    }

    #[test]
    fn test_progress_clamped() {
        let mut state = AppState::new();
        state.set_progress(150);
        assert_eq!(state.progress_percent(), 100);
        state.set_progress(42);
        assert_eq!(state.progress_percent(), 42);
    }

    #[test]
    fn test_battery_report() {
        let mut state = AppState::new();
        state.set_battery(87.5, true);
        assert_eq!(state.battery_level(), 87.5);
        assert!(state.is_charging());
    }

    #[test]
    fn test_custom_data_truncates() {
        let mut state = AppState::new();
        let long = core::str::from_utf8(&[b'x'; 100]).unwrap();
        state.set_custom_data(long);
        assert_eq!(state.custom_data().len(), MAX_CUSTOM_DATA);
    }
}
