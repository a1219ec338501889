//! Screen identifiers and change notifications

/// Identifier of one of the eleven built screens
///
/// Always within `0..=10`; constructors enforce the range so downstream
/// code never validates again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenId(u8);

impl ScreenId {
    /// Boot/idle screen, also the fallback for unmapped state ids
    pub const IDLE: ScreenId = ScreenId(0);

    /// Highest valid screen id
    pub const MAX: u8 = 10;

    /// Validate a raw id
    pub const fn new(raw: u8) -> Option<Self> {
        if raw <= Self::MAX {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Map a controller state id to its screen
    ///
    /// States 1-9 map directly to screens 1-9; everything else falls back
    /// to the idle screen.
    pub const fn from_state_id(state_id: u8) -> Self {
        if state_id >= 1 && state_id <= 9 {
            Self(state_id)
        } else {
            Self::IDLE
        }
    }

    /// Raw id value
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Next screen in the touch-advance cycle, wrapping back to idle
    pub const fn cycled(self) -> Self {
        if self.0 < Self::MAX {
            Self(self.0 + 1)
        } else {
            Self::IDLE
        }
    }
}

/// Payload of a screen-change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenChange {
    /// Screen that was active before the change
    pub previous: ScreenId,
    /// Screen that is now current
    pub current: ScreenId,
}
