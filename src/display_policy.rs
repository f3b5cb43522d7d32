//! Turns a count, an open/closed flag, or a short text into four colored cells.
//!
//! Nothing here touches pixels. [`number_cells`] and [`text_cells`] return a [`Cells`] value
//! that [`StatusDisplay`](crate::status_display::StatusDisplay) draws and commits.

use crate::digit_layout::{CELL_COUNT, Digit};
use crate::led_strip::Rgb;
use crate::seven_segment::Segments;

/// Status text and out-of-range warnings.
pub const WARNING: Rgb = Rgb::new(128, 255, 0);
/// Numerals while the space is open.
pub const OPEN: Rgb = Rgb::new(30, 255, 0);
/// Numerals while the space is closed.
pub const CLOSED: Rgb = Rgb::new(255, 0, 0);
/// Whole-strip fill at power-up.
pub const BOOT: Rgb = Rgb::new(20, 20, 255);

/// Largest count that fits on four digits.
pub const MAX_COUNT: i16 = 9999;

/// Shown for negative counts.
pub const NEGATIVE_TEXT: &str = " -- ";
/// Shown for counts above [`MAX_COUNT`].
pub const OVERFLOW_TEXT: &str = " HH ";

/// One digit's glyph and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub segments: Segments,
    pub color: Rgb,
}

impl Cell {
    #[must_use]
    pub const fn new(segments: Segments, color: Rgb) -> Self {
        Self { segments, color }
    }

    /// Nothing lit, but remembers `color`.
    #[must_use]
    pub const fn blank(color: Rgb) -> Self {
        Self::new(Segments::BLANK, color)
    }
}

/// The four cells of one display update, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cells(pub [Cell; CELL_COUNT]);

impl Cells {
    /// The cell at `digit`.
    #[must_use]
    pub const fn get(&self, digit: Digit) -> Cell {
        let [thousands, hundreds, tens, units] = self.0;
        match digit {
            Digit::Thousands => thousands,
            Digit::Hundreds => hundreds,
            Digit::Tens => tens,
            Digit::Units => units,
        }
    }

    /// Each digit paired with its cell, left to right.
    pub fn iter(&self) -> impl Iterator<Item = (Digit, Cell)> + '_ {
        Digit::ALL.into_iter().zip(self.0.iter().copied())
    }
}

/// The color numerals use for the given state.
#[must_use]
pub const fn state_color(is_open: bool) -> Rgb {
    if is_open { OPEN } else { CLOSED }
}

/// Formats an occupancy count.
///
/// - negative counts show [`NEGATIVE_TEXT`] in [`WARNING`];
/// - counts above [`MAX_COUNT`] show [`OVERFLOW_TEXT`] in [`WARNING`];
/// - otherwise leading digits the number does not need are blank (in [`WARNING`]), the rest
///   are numerals in [`state_color`]. The units digit is always a numeral.
///
/// While closed, the units digit also lights its decimal point, so the state is readable
/// even without color.
///
/// ```rust
/// use occupancy_display::display_policy::{CLOSED, WARNING, number_cells};
/// use occupancy_display::digit_layout::Digit;
/// use occupancy_display::Segments;
///
/// let cells = number_cells(7, false);
/// assert_eq!(cells.get(Digit::Thousands).segments, Segments::BLANK);
/// assert_eq!(cells.get(Digit::Thousands).color, WARNING);
/// assert_eq!(cells.get(Digit::Units).segments, Segments::from_char('7').with_decimal_point());
/// assert_eq!(cells.get(Digit::Units).color, CLOSED);
/// ```
#[must_use]
pub fn number_cells(count: i16, is_open: bool) -> Cells {
    let Ok(value) = u16::try_from(count) else {
        return text_cells(NEGATIVE_TEXT, WARNING);
    };
    if count > MAX_COUNT {
        return text_cells(OVERFLOW_TEXT, WARNING);
    }

    let color = state_color(is_open);
    // (place value, smallest count that needs this digit)
    let places: [(u16, u16); CELL_COUNT] = [(1000, 1000), (100, 100), (10, 10), (1, 0)];
    let cells = places.map(|(place, threshold)| {
        if value >= threshold {
            Cell::new(Segments::from_digit(decimal_digit(value, place)), color)
        } else {
            Cell::blank(WARNING)
        }
    });

    let mut cells = Cells(cells);
    if !is_open {
        let [.., units] = &mut cells.0;
        units.segments = units.segments.with_decimal_point();
    }
    cells
}

#[expect(
    clippy::integer_division_remainder_used,
    clippy::arithmetic_side_effects,
    reason = "place is never zero"
)]
fn decimal_digit(value: u16, place: u16) -> u8 {
    u8::try_from((value / place) % 10).unwrap_or(0)
}

/// Formats up to four characters.
///
/// Characters past the fourth are dropped; positions past the end of `text` are blank.
/// Every cell, blank or not, carries `color`.
///
/// ```rust
/// use occupancy_display::display_policy::text_cells;
/// use occupancy_display::digit_layout::Digit;
/// use occupancy_display::led_strip::colors;
/// use occupancy_display::Segments;
///
/// let cells = text_cells("AB", colors::BLUE);
/// assert_eq!(cells.get(Digit::Thousands).segments, Segments::from_char('A'));
/// assert_eq!(cells.get(Digit::Tens).segments, Segments::BLANK);
/// assert_eq!(cells.get(Digit::Units).color, colors::BLUE);
/// ```
#[must_use]
pub fn text_cells(text: &str, color: Rgb) -> Cells {
    chars_cells(text.chars(), color)
}

/// Like [`text_cells`], for text that is already a sequence of characters.
#[must_use]
pub fn chars_cells(text: impl IntoIterator<Item = char>, color: Rgb) -> Cells {
    let mut cells = Cells([Cell::blank(color); CELL_COUNT]);
    for (cell, character) in cells.0.iter_mut().zip(text) {
        cell.segments = Segments::from_char(character);
    }
    cells
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    fn glyphs(cells: &Cells) -> [Segments; CELL_COUNT] {
        cells.0.map(|cell| cell.segments)
    }

    fn colors(cells: &Cells) -> [Rgb; CELL_COUNT] {
        cells.0.map(|cell| cell.color)
    }

    #[test]
    fn test_negative_shows_dashes() {
        for count in [-1, -42, i16::MIN] {
            for is_open in [true, false] {
                let cells = number_cells(count, is_open);
                assert_eq!(cells, text_cells(" -- ", WARNING));
                assert_eq!(colors(&cells), [WARNING; CELL_COUNT]);
            }
        }
    }

    #[test]
    fn test_overflow_shows_hh() {
        for count in [10_000, 10_001, i16::MAX] {
            for is_open in [true, false] {
                assert_eq!(number_cells(count, is_open), text_cells(" HH ", WARNING));
            }
        }
    }

    #[test]
    fn test_leading_blank_suppression_thresholds() {
        let blank = Segments::BLANK;
        let digit = Segments::from_digit;
        assert_eq!(glyphs(&number_cells(0, true)), [blank, blank, blank, digit(0)]);
        assert_eq!(glyphs(&number_cells(9, true)), [blank, blank, blank, digit(9)]);
        assert_eq!(glyphs(&number_cells(10, true)), [blank, blank, digit(1), digit(0)]);
        assert_eq!(glyphs(&number_cells(99, true)), [blank, blank, digit(9), digit(9)]);
        assert_eq!(glyphs(&number_cells(100, true)), [blank, digit(1), digit(0), digit(0)]);
        assert_eq!(glyphs(&number_cells(999, true)), [blank, digit(9), digit(9), digit(9)]);
        assert_eq!(
            glyphs(&number_cells(1000, true)),
            [digit(1), digit(0), digit(0), digit(0)]
        );
        assert_eq!(
            glyphs(&number_cells(9999, true)),
            [digit(9), digit(9), digit(9), digit(9)]
        );
    }

    #[test]
    fn test_every_count_reads_back() {
        use crate::seven_segment::DIGITS;

        for count in 0..=MAX_COUNT {
            for is_open in [true, false] {
                let cells = number_cells(count, is_open);
                let mut value = 0_i16;
                let mut blanks = 0;
                for (digit, cell) in cells.iter() {
                    let mut segments = cell.segments;
                    if digit == Digit::Units && !is_open {
                        assert!(segments.contains(crate::seven_segment::Segment::DecimalPoint));
                        segments = Segments::from_bits(segments.bits() & 0x7F);
                    }
                    if segments == Segments::BLANK {
                        // blanks only lead
                        assert_eq!(value, 0, "count {count}");
                        assert_eq!(cell.color, WARNING);
                        blanks += 1;
                        continue;
                    }
                    let numeral = DIGITS
                        .iter()
                        .position(|&glyph| glyph == segments)
                        .expect("numeral glyph");
                    value = value * 10 + i16::try_from(numeral).expect("single digit");
                    assert_eq!(cell.color, state_color(is_open));
                }
                assert_eq!(value, count);
                let width = match count {
                    0..=9 => 1,
                    10..=99 => 2,
                    100..=999 => 3,
                    _ => 4,
                };
                assert_eq!(blanks, CELL_COUNT - width, "count {count}");
            }
        }
    }

    #[test]
    fn test_blank_positions_use_warning_color() {
        assert_eq!(colors(&number_cells(42, true)), [WARNING, WARNING, OPEN, OPEN]);
        assert_eq!(colors(&number_cells(305, false)), [WARNING, CLOSED, CLOSED, CLOSED]);
    }

    #[test]
    fn test_closed_forces_decimal_point_on_units_only() {
        let cells = number_cells(1234, false);
        assert_eq!(
            glyphs(&cells),
            [
                Segments::from_digit(1),
                Segments::from_digit(2),
                Segments::from_digit(3),
                Segments::from_digit(4).with_decimal_point(),
            ]
        );
        assert_eq!(colors(&cells), [CLOSED; CELL_COUNT]);

        let open = number_cells(1234, true);
        assert_eq!(open.get(Digit::Units).segments, Segments::from_digit(4));
    }

    #[test]
    fn test_seven_closed() {
        let cells = number_cells(7, false);
        for digit in [Digit::Thousands, Digit::Hundreds, Digit::Tens] {
            assert_eq!(cells.get(digit), Cell::blank(WARNING));
        }
        assert_eq!(
            cells.get(Digit::Units),
            Cell::new(Segments::from_digit(7).with_decimal_point(), CLOSED)
        );
    }

    #[test]
    fn test_text_pads_and_truncates() {
        let cells = text_cells("AB", BOOT);
        assert_eq!(
            glyphs(&cells),
            [
                Segments::from_char('A'),
                Segments::from_char('B'),
                Segments::BLANK,
                Segments::BLANK,
            ]
        );
        assert_eq!(colors(&cells), [BOOT; CELL_COUNT]);

        assert_eq!(text_cells("MQtt!!", WARNING), text_cells("MQtt", WARNING));
        assert_eq!(glyphs(&text_cells("", WARNING)), [Segments::BLANK; CELL_COUNT]);
    }

    #[test]
    fn test_text_unknown_character_is_undefined() {
        let cells = text_cells("a%", WARNING);
        assert_eq!(cells.get(Digit::Hundreds).segments, Segments::UNDEFINED);
    }
}
