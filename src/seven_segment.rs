//! Seven-segment glyphs: the [`Segments`] bit pattern and the character table behind it.
//!
//! A pattern stores the decimal point in its high bit and segments a..g below it:
//!
//! ```text
//!  bit:  7   6   5   4   3   2   1   0
//!        dp  a   b   c   d   e   f   g
//! ```
//!
//! Characters without a glyph map to [`Segments::UNDEFINED`], a deliberately odd shape
//! (a, d, g and the decimal point) that makes a bad character visible on the sign.

use core::ops::{BitOr, BitOrAssign};

/// One stroke of a seven-segment digit, numbered the way the glyph table stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Segment {
    DecimalPoint = 0,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    /// Every segment, in index order.
    pub const ALL: [Self; 8] = [
        Self::DecimalPoint,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    /// Position of this segment in [`Segment::ALL`] and in the pixel geometry table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The bit this segment occupies in a [`Segments`] pattern.
    #[must_use]
    pub const fn mask(self) -> u8 {
        0b_1000_0000 >> (self as u8)
    }
}

/// Which strokes of one digit are lit.
///
/// ```rust
/// use occupancy_display::seven_segment::{Segment, Segments};
///
/// let seven = Segments::from_char('7');
/// assert!(seven.contains(Segment::A));
/// assert!(!seven.contains(Segment::G));
/// assert!(seven.with_decimal_point().contains(Segment::DecimalPoint));
/// assert_eq!(Segments::from_char('%'), Segments::UNDEFINED);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segments(u8);

/// Code of the first character in [`CHARACTER_MAP`] (space).
pub const FIRST_CHAR_CODE: u32 = 0x20;

impl Segments {
    /// Nothing lit.
    pub const BLANK: Self = Self(0);

    /// Only the decimal point.
    pub const DECIMAL_POINT: Self = Self(Segment::DecimalPoint.mask());

    /// Glyph for characters that have no seven-segment shape.
    pub const UNDEFINED: Self = Self(0b_1100_1001);

    /// Wraps a raw pattern. Any bit combination is accepted.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw pattern.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if `segment` is lit in this pattern.
    #[must_use]
    pub const fn contains(self, segment: Segment) -> bool {
        self.0 & segment.mask() != 0
    }

    /// The same glyph with the decimal point forced on.
    #[must_use]
    pub const fn with_decimal_point(self) -> Self {
        Self(self.0 | Segment::DecimalPoint.mask())
    }

    /// Looks up the glyph for `character`.
    ///
    /// Characters outside space..=DEL, or inside it without a glyph, give
    /// [`Segments::UNDEFINED`]. This never fails.
    #[must_use]
    pub fn from_char(character: char) -> Self {
        u32::from(character)
            .checked_sub(FIRST_CHAR_CODE)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|index| CHARACTER_MAP.get(index))
            .copied()
            .unwrap_or(Self::UNDEFINED)
    }

    /// Glyph for a decimal digit. Values above 9 give [`Segments::UNDEFINED`].
    #[must_use]
    pub fn from_digit(digit: u8) -> Self {
        DIGITS
            .get(usize::from(digit))
            .copied()
            .unwrap_or(Self::UNDEFINED)
    }

    /// The lit segments, in index order.
    pub fn lit(self) -> impl Iterator<Item = Segment> {
        Segment::ALL
            .into_iter()
            .filter(move |&segment| self.contains(segment))
    }
}

impl BitOr for Segments {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Segments {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<Segments> for u8 {
    fn from(segments: Segments) -> Self {
        segments.0
    }
}

/// Glyphs for the decimal digits 0-9.
pub const DIGITS: [Segments; 10] = [
    Segments(0b_0111_1110), // 0
    Segments(0b_0011_0000), // 1
    Segments(0b_0110_1101), // 2
    Segments(0b_0111_1001), // 3
    Segments(0b_0011_0011), // 4
    Segments(0b_0101_1011), // 5
    Segments(0b_0101_1111), // 6
    Segments(0b_0111_0000), // 7
    Segments(0b_0111_1111), // 8
    Segments(0b_0111_1011), // 9
];

const UNDEF: Segments = Segments::UNDEFINED;

/// Glyph for every character from space (0x20) through DEL (0x7F).
pub const CHARACTER_MAP: [Segments; 96] = [
    Segments::BLANK,           // space
    UNDEF,                     // !
    UNDEF,                     // "
    UNDEF,                     // #
    UNDEF,                     // $
    UNDEF,                     // %
    UNDEF,                     // &
    UNDEF,                     // '
    UNDEF,                     // (
    UNDEF,                     // )
    UNDEF,                     // *
    UNDEF,                     // +
    UNDEF,                     // ,
    Segments(0b_0000_0001),    // -
    UNDEF,                     // .
    UNDEF,                     // /
    DIGITS[0],                 // 0
    DIGITS[1],                 // 1
    DIGITS[2],                 // 2
    DIGITS[3],                 // 3
    DIGITS[4],                 // 4
    DIGITS[5],                 // 5
    DIGITS[6],                 // 6
    DIGITS[7],                 // 7
    DIGITS[8],                 // 8
    DIGITS[9],                 // 9
    UNDEF,                     // :
    UNDEF,                     // ;
    UNDEF,                     // <
    Segments(0b_0000_1001),    // =
    UNDEF,                     // >
    UNDEF,                     // ?
    UNDEF,                     // @
    Segments(0b_0111_0111),    // A
    UNDEF,                     // B
    Segments(0b_0100_1110),    // C
    UNDEF,                     // D
    UNDEF,                     // E
    Segments(0b_0100_0111),    // F
    UNDEF,                     // G
    Segments(0b_0011_0111),    // H
    Segments(0b_0001_0000),    // I
    UNDEF,                     // J
    UNDEF,                     // K
    Segments(0b_0000_1110),    // L
    Segments(0b_0111_0110),    // M
    Segments(0b_0111_0110),    // N
    Segments(0b_0111_1110),    // O
    Segments(0b_0110_0111),    // P
    Segments(0b_0111_0011),    // Q
    UNDEF,                     // R
    Segments(0b_0101_1011),    // S
    Segments(0b_0000_1111),    // T
    UNDEF,                     // U
    Segments(0b_0001_1100),    // V
    Segments(0b_0011_1111),    // W
    UNDEF,                     // X
    UNDEF,                     // Y
    UNDEF,                     // Z
    Segments(0b_0100_1110),    // [
    UNDEF,                     // backslash
    Segments(0b_0111_1000),    // ]
    UNDEF,                     // ^
    Segments(0b_0000_1000),    // _
    Segments(0b_0000_0010),    // `
    Segments(0b_0111_0111),    // a
    UNDEF,                     // b
    Segments(0b_0000_1101),    // c
    UNDEF,                     // d
    UNDEF,                     // e
    UNDEF,                     // f
    UNDEF,                     // g
    UNDEF,                     // h
    Segments(0b_0001_0000),    // i
    UNDEF,                     // j
    UNDEF,                     // k
    Segments(0b_0000_1100),    // l
    UNDEF,                     // m
    Segments(0b_0001_0101),    // n
    Segments(0b_0001_1101),    // o
    UNDEF,                     // p
    UNDEF,                     // q
    UNDEF,                     // r
    UNDEF,                     // s
    Segments(0b_0000_1111),    // t
    UNDEF,                     // u
    Segments(0b_0001_1100),    // v
    Segments(0b_0011_1111),    // w
    UNDEF,                     // x
    UNDEF,                     // y
    UNDEF,                     // z
    UNDEF,                     // {
    Segments(0b_0000_0110),    // |
    UNDEF,                     // }
    Segments(0b_0100_0000),    // ~
    Segments::BLANK,           // delete
];

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn test_segment_masks() {
        assert_eq!(Segment::DecimalPoint.mask(), 0b_1000_0000);
        assert_eq!(Segment::A.mask(), 0b_0100_0000);
        assert_eq!(Segment::G.mask(), 0b_0000_0001);
    }

    #[test]
    fn test_digits_match_character_map() {
        for (digit, character) in (0_u8..10).zip('0'..='9') {
            assert_eq!(Segments::from_digit(digit), Segments::from_char(character));
        }
        assert_eq!(Segments::from_digit(10), Segments::UNDEFINED);
    }

    #[test]
    fn test_from_char_outside_span_is_undefined() {
        for character in ['\0', '\n', '\u{1f}', '\u{80}', 'é', '€', '😀'] {
            assert_eq!(Segments::from_char(character), Segments::UNDEFINED);
        }
    }

    #[test]
    fn test_from_char_unassigned_is_undefined() {
        for character in ['!', '%', '?', 'B', 'R', 'Z', 'b', 'z', '{'] {
            assert_eq!(Segments::from_char(character), Segments::UNDEFINED);
        }
    }

    #[test]
    fn test_from_char_special_chars() {
        assert_eq!(Segments::from_char(' '), Segments::BLANK);
        assert_eq!(Segments::from_char('-').bits(), 0b_0000_0001); // g
        assert_eq!(Segments::from_char('=').bits(), 0b_0000_1001); // d, g
        assert_eq!(Segments::from_char('_').bits(), 0b_0000_1000); // d
        assert_eq!(Segments::from_char('H').bits(), 0b_0011_0111);
        assert_eq!(Segments::from_char('\u{7f}'), Segments::BLANK);
    }

    #[test]
    fn test_status_words_have_glyphs() {
        for word in ["Conn", "viFi", "MQtt", "_AP_", " -- ", " HH "] {
            for character in word.chars() {
                assert_ne!(
                    Segments::from_char(character),
                    Segments::UNDEFINED,
                    "missing glyph"
                );
            }
        }
    }

    #[test]
    fn test_with_decimal_point_keeps_other_segments() {
        let seven = Segments::from_digit(7).with_decimal_point();
        assert_eq!(seven.bits(), 0b_1111_0000);
        assert!(seven.contains(Segment::DecimalPoint));
        assert_eq!(seven, Segments::from_digit(7) | Segments::DECIMAL_POINT);
    }

    #[test]
    fn test_lit_lists_segments_in_order() {
        let mut lit = Segments::from_char('1').lit();
        assert_eq!(lit.next(), Some(Segment::B));
        assert_eq!(lit.next(), Some(Segment::C));
        assert_eq!(lit.next(), None);
    }
}
