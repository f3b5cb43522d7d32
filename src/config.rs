//! Compile-time configuration for the sign.
//!
//! Everything has a sensible default in [`DisplayConfig::DEFAULT`]. The luminance can also be
//! overridden at build time with `NTELLER_LUMINANCE` (read by `build.rs` from the environment,
//! `.env`, or `~/.pico.env`).

use embassy_time::Duration;

/// Message topics the sign listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topics {
    /// Numeric occupancy count.
    pub count: &'static str,
    /// Open/closed state.
    pub state: &'static str,
    /// Free text, shown verbatim.
    pub text: &'static str,
}

/// Settings shared by the event handler and the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Global strip brightness (0-255).
    pub luminance: u8,
    /// Longer payloads are dropped unparsed.
    pub max_payload_len: usize,
    /// State payload meaning "open"; compared case-sensitively.
    pub open_token: &'static str,
    /// How long each color of the power-up self-test is held.
    pub self_test_step: Duration,
    pub topics: Topics,
}

impl DisplayConfig {
    /// Settings for the revspace feed.
    pub const DEFAULT: Self = Self {
        // Must not be too bright: the strip shares a 0.5 A supply.
        luminance: 75,
        max_payload_len: 32,
        open_token: "open",
        self_test_step: Duration::from_millis(2500),
        topics: Topics {
            count: "revspace/doorduino/checked-in",
            state: "revspace/state",
            text: "revspace/nteller/text",
        },
    };

    /// [`DisplayConfig::DEFAULT`] with the build-time luminance override applied.
    #[must_use]
    pub const fn from_build_env() -> Self {
        match luminance_override(option_env!("NTELLER_LUMINANCE")) {
            Some(luminance) => Self::DEFAULT.with_luminance(luminance),
            None => Self::DEFAULT,
        }
    }

    #[must_use]
    pub const fn with_luminance(mut self, luminance: u8) -> Self {
        self.luminance = luminance;
        self
    }

    #[must_use]
    pub const fn with_topics(mut self, topics: Topics) -> Self {
        self.topics = topics;
        self
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parses a luminance override. Empty, non-numeric, or out-of-range values give `None`.
#[must_use]
#[expect(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "const fn; index is bounded by the loop and value by the 255 check"
)]
pub const fn luminance_override(value: Option<&str>) -> Option<u8> {
    let Some(text) = value else {
        return None;
    };
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut level: u16 = 0;
    let mut index = 0;
    while index < bytes.len() {
        let byte = bytes[index];
        if !byte.is_ascii_digit() {
            return None;
        }
        level = level * 10 + (byte - b'0') as u16;
        if level > u8::MAX as u16 {
            return None;
        }
        index += 1;
    }
    Some(level as u8)
}
