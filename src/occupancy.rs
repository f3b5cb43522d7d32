//! What the sign currently believes about the space, and how each event changes the picture.
//!
//! [`Occupancy`] is plain state: no tasks, no timers. The embedded device loop and the host
//! tests drive it the same way.

use crate::Result;
use crate::config::DisplayConfig;
use crate::digit_layout::PIXEL_COUNT;
use crate::display_policy::WARNING;
use crate::inbound::InboundEvent;
use crate::led_strip::PixelSink;
use crate::status_display::StatusDisplay;

/// The last known count and open/closed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OccupancyState {
    pub count: i16,
    pub is_open: bool,
}

/// Applies feed messages to an [`OccupancyState`] and redraws after each one.
///
/// A count or state message redraws the number using both the new and the remembered value.
/// A text message shows the text but leaves the state alone, so the next count or state
/// message brings the number back.
///
/// ```rust
/// use occupancy_display::config::DisplayConfig;
/// use occupancy_display::occupancy::Occupancy;
/// use occupancy_display::status_display::StatusDisplay;
/// use occupancy_display::{Frame, PixelSink};
/// use occupancy_display::digit_layout::PIXEL_COUNT;
///
/// struct Dark;
/// impl PixelSink<PIXEL_COUNT> for Dark {
///     fn set_luminance(&mut self, _level: u8) {}
///     fn commit(&mut self, _frame: &Frame<PIXEL_COUNT>) {}
/// }
///
/// let mut display = StatusDisplay::new(Dark, 75);
/// let mut occupancy = Occupancy::new(DisplayConfig::DEFAULT);
/// occupancy.on_message("revspace/state", b"open", &mut display).ok();
/// occupancy.on_message("revspace/doorduino/checked-in", b"3", &mut display).ok();
/// assert_eq!(occupancy.state().count, 3);
/// assert!(occupancy.state().is_open);
/// ```
#[derive(Debug, Clone)]
pub struct Occupancy {
    config: DisplayConfig,
    state: OccupancyState,
}

impl Occupancy {
    /// Starts at count 0, closed.
    #[must_use]
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            state: OccupancyState::default(),
        }
    }

    /// The count and open flag the sign last drew.
    #[must_use]
    pub const fn state(&self) -> OccupancyState {
        self.state
    }

    /// Updates the state and redraws.
    pub fn apply<S: PixelSink<PIXEL_COUNT>>(
        &mut self,
        event: &InboundEvent,
        display: &mut StatusDisplay<S>,
    ) {
        match event {
            InboundEvent::Count(count) => {
                self.state.count = *count;
                self.show_state(display);
            }
            InboundEvent::State(is_open) => {
                self.state.is_open = *is_open;
                self.show_state(display);
            }
            InboundEvent::Text(text) => display.show_chars(text.iter().copied(), WARNING),
        }
    }

    /// Parses one feed message and applies it.
    ///
    /// # Errors
    ///
    /// Returns the parse error for oversized payloads and unknown topics. Neither the state nor
    /// the display changes in that case.
    pub fn on_message<S: PixelSink<PIXEL_COUNT>>(
        &mut self,
        topic: &str,
        payload: &[u8],
        display: &mut StatusDisplay<S>,
    ) -> Result<()> {
        let event = InboundEvent::parse(&self.config, topic, payload)?;
        self.apply(&event, display);
        Ok(())
    }

    fn show_state<S: PixelSink<PIXEL_COUNT>>(&self, display: &mut StatusDisplay<S>) {
        #[cfg(feature = "display-trace")]
        defmt::info!("showing {}", self.state);
        display.show_number(self.state.count, self.state.is_open);
    }
}
