//! The sign as a whole: one pixel buffer, one sink, and the operations that draw on it.
//!
//! Every `show_*` call draws all four digits into the buffer and then commits exactly once.

use crate::digit_layout::{PIXEL_COUNT, StripFrame, render_digit};
use crate::display_policy::{
    BOOT, CLOSED, Cells, OPEN, WARNING, chars_cells, number_cells, text_cells,
};
use crate::led_strip::{PixelSink, Rgb};

/// Colors of the power-up self-test, in order.
pub const SELF_TEST_COLORS: [Rgb; 4] = [BOOT, OPEN, CLOSED, WARNING];

/// Owns the strip's pixel buffer and pushes finished frames to a [`PixelSink`].
///
/// ```rust
/// use occupancy_display::{Frame, PixelSink};
/// use occupancy_display::digit_layout::PIXEL_COUNT;
/// use occupancy_display::status_display::StatusDisplay;
///
/// #[derive(Default)]
/// struct CountingSink(usize);
///
/// impl PixelSink<PIXEL_COUNT> for CountingSink {
///     fn set_luminance(&mut self, _level: u8) {}
///     fn commit(&mut self, _frame: &Frame<PIXEL_COUNT>) {
///         self.0 += 1;
///     }
/// }
///
/// let mut display = StatusDisplay::new(CountingSink::default(), 75);
/// display.show_number(42, true);
/// assert_eq!(display.sink().0, 2); // power-up fill, then the number
/// ```
pub struct StatusDisplay<S: PixelSink<PIXEL_COUNT>> {
    frame: StripFrame,
    sink: S,
}

impl<S: PixelSink<PIXEL_COUNT>> StatusDisplay<S> {
    /// Sets the sink's luminance (once, here) and shows the power-up color on every pixel.
    pub fn new(mut sink: S, luminance: u8) -> Self {
        sink.set_luminance(luminance);
        let mut display = Self {
            frame: StripFrame::new(),
            sink,
        };
        display.fill(BOOT);
        display
    }

    /// Shows an occupancy count. See [`number_cells`] for the formatting rules.
    pub fn show_number(&mut self, count: i16, is_open: bool) {
        self.show_cells(&number_cells(count, is_open));
    }

    /// Shows up to four characters in `color`. See [`text_cells`].
    pub fn show_text(&mut self, text: &str, color: Rgb) {
        self.show_cells(&text_cells(text, color));
    }

    /// Like [`show_text`](Self::show_text), for already-decoded characters.
    pub fn show_chars(&mut self, text: impl IntoIterator<Item = char>, color: Rgb) {
        self.show_cells(&chars_cells(text, color));
    }

    /// Draws all four cells, then commits once.
    pub fn show_cells(&mut self, cells: &Cells) {
        for (digit, cell) in cells.iter() {
            render_digit(&mut self.frame, digit, cell.segments, cell.color);
        }
        self.commit();
    }

    /// Sets every pixel, segment or not, to `color` and commits.
    pub fn fill(&mut self, color: Rgb) {
        self.frame.fill(color);
        self.commit();
    }

    /// The last frame drawn.
    #[must_use]
    pub const fn frame(&self) -> &StripFrame {
        &self.frame
    }

    /// The sink frames are committed to.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    fn commit(&mut self) {
        self.sink.commit(&self.frame);
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;
    use crate::digit_layout::{Digit, PIXELS_PER_DIGIT};
    use crate::led_strip::{BLACK, Frame};

    #[derive(Default)]
    struct LastFrame {
        luminance: Option<u8>,
        frame: Option<Frame<PIXEL_COUNT>>,
        commits: usize,
    }

    impl PixelSink<PIXEL_COUNT> for LastFrame {
        fn set_luminance(&mut self, level: u8) {
            self.luminance = Some(level);
        }

        fn commit(&mut self, frame: &Frame<PIXEL_COUNT>) {
            self.frame = Some(*frame);
            self.commits += 1;
        }
    }

    #[test]
    fn test_new_sets_luminance_and_fills_boot_color() {
        let display = StatusDisplay::new(LastFrame::default(), 75);
        assert_eq!(display.sink().luminance, Some(75));
        assert_eq!(display.sink().commits, 1);
        assert_eq!(display.sink().frame, Some(Frame::filled(BOOT)));
    }

    #[test]
    fn test_show_number_commits_once_per_update() {
        let mut display = StatusDisplay::new(LastFrame::default(), 75);
        display.show_number(1234, true);
        display.show_number(-5, true);
        assert_eq!(display.sink().commits, 3);
    }

    #[test]
    fn test_show_number_clears_boot_fill() {
        let mut display = StatusDisplay::new(LastFrame::default(), 75);
        display.show_number(0, true);

        // only the units digit has lit pixels: '0' is six segments of two pixels
        let frame = display.frame();
        let lit = frame.iter().filter(|&&pixel| pixel != BLACK).count();
        assert_eq!(lit, 12);
        assert!(
            frame[PIXELS_PER_DIGIT..]
                .iter()
                .all(|&pixel| pixel == BLACK)
        );
        assert_eq!(display.sink().frame.as_ref(), Some(frame));
    }

    #[test]
    fn test_show_text_colors_every_lit_pixel() {
        let mut display = StatusDisplay::new(LastFrame::default(), 75);
        display.show_text("8888", OPEN);
        for digit in Digit::ALL {
            let lit = display.frame()[digit.pixels()]
                .iter()
                .filter(|&&pixel| pixel == OPEN)
                .count();
            assert_eq!(lit, 14);
        }
    }
}
