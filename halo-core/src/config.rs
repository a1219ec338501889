//! Configuration type definitions
//!
//! All values have sensible defaults for the shipped hardware; serde
//! derives are available behind the `serde` feature for host-side tooling.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which serial decoder is wired to the link at startup
///
/// The two protocols overlap in capability but are never fed the same
/// byte stream; exactly one runs per boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LinkMode {
    /// Binary framed-packet protocol
    Framed,
    /// Legacy newline-terminated text protocol
    #[default]
    Text,
}

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// Active decoder
    pub mode: LinkMode,
    /// Baud rate (8N1)
    pub baud: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            mode: LinkMode::default(),
            baud: 115_200,
        }
    }
}

/// Timing for the black-fade screen hand-off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransitionConfig {
    /// Overlay fade to opaque, in milliseconds
    pub fade_in_ms: u32,
    /// Hold at full opacity before the content swap, letting the panel
    /// finish rendering the opaque overlay
    pub hold_ms: u32,
    /// Overlay fade back to transparent, in milliseconds
    pub fade_out_ms: u32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: 200,
            hold_ms: 50,
            fade_out_ms: 200,
        }
    }
}

impl TransitionConfig {
    /// Total hand-off latency in milliseconds
    pub const fn total_ms(&self) -> u32 {
        self.fade_in_ms + self.hold_ms + self.fade_out_ms
    }
}

/// Physical panel extent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 466,
            height: 466,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let link = LinkConfig::default();
        assert_eq!(link.mode, LinkMode::Text);
        assert_eq!(link.baud, 115_200);

        let transition = TransitionConfig::default();
        assert_eq!(transition.total_ms(), 450);

        let display = DisplayConfig::default();
        assert_eq!((display.width, display.height), (466, 466));
    }
}
