//! Where each segment of each digit lives on the 60-pixel strip.
//!
//! The sign is one WS2812 chain folded into four digit blocks of 15 pixels. The chain starts
//! at the right-most (units) digit, so [`Digit::Units`] owns pixels 0-14 and
//! [`Digit::Thousands`] owns pixels 45-59. Inside a block every segment is two pixels, except
//! the decimal point which is one.
//!
//! The tables are checked at compile time: blocks cannot overlap, every segment has at least
//! one real pixel, and no pixel belongs to two segments.

use crate::led_strip::{BLACK, Frame, Rgb};
use crate::seven_segment::{Segment, Segments};

/// The number of cells (digits) in the display.
pub const CELL_COUNT: usize = 4;

/// The number of segments per digit, counting the decimal point.
pub const SEGMENT_COUNT: usize = 8;

/// Pixels in one digit block.
pub const PIXELS_PER_DIGIT: usize = 15;

/// Pixels on the whole strip.
pub const PIXEL_COUNT: usize = CELL_COUNT * PIXELS_PER_DIGIT;

/// Marks the unused second slot of a one-pixel segment.
pub const NO_PIXEL: u8 = u8::MAX;

/// The strip-sized frame the renderer draws into.
pub type StripFrame = Frame<PIXEL_COUNT>;

/// A digit position, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Digit {
    Thousands = 0,
    Hundreds,
    Tens,
    Units,
}

impl Digit {
    /// Every position, left to right.
    pub const ALL: [Self; CELL_COUNT] = [Self::Thousands, Self::Hundreds, Self::Tens, Self::Units];

    /// Position 0 is the left-most digit.
    #[must_use]
    pub const fn from_position(position: u8) -> Option<Self> {
        match position {
            0 => Some(Self::Thousands),
            1 => Some(Self::Hundreds),
            2 => Some(Self::Tens),
            3 => Some(Self::Units),
            _ => None,
        }
    }

    /// Left-to-right position, 0 to 3.
    #[must_use]
    pub const fn position(self) -> usize {
        self as usize
    }

    /// First strip pixel of this digit's block.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "at most 3 * PIXELS_PER_DIGIT"
    )]
    pub const fn base_pixel(self) -> usize {
        (Self::Units as usize - self as usize) * PIXELS_PER_DIGIT
    }

    /// The strip pixels belonging to this digit.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "ends at PIXEL_COUNT"
    )]
    pub const fn pixels(self) -> core::ops::Range<usize> {
        let base = self.base_pixel();
        base..base + PIXELS_PER_DIGIT
    }
}

/// The one or two block offsets lit by a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPixels([u8; 2]);

impl SegmentPixels {
    const fn pair(first: u8, second: u8) -> Self {
        Self([first, second])
    }

    const fn single(only: u8) -> Self {
        Self([only, NO_PIXEL])
    }

    /// The block offsets, without the [`NO_PIXEL`] sentinel.
    pub fn offsets(self) -> impl Iterator<Item = usize> {
        self.0
            .into_iter()
            .filter(|&offset| offset != NO_PIXEL)
            .map(usize::from)
    }
}

/// Block offsets for each segment, indexed by [`Segment::index`].
pub const SEGMENT_PIXELS: [SegmentPixels; SEGMENT_COUNT] = [
    SegmentPixels::single(2),     // dp
    SegmentPixels::pair(11, 12),  // a
    SegmentPixels::pair(9, 10),   // b
    SegmentPixels::pair(0, 1),    // c
    SegmentPixels::pair(3, 4),    // d
    SegmentPixels::pair(5, 6),    // e
    SegmentPixels::pair(13, 14),  // f
    SegmentPixels::pair(7, 8),    // g
];

const _: () = assert!(geometry_is_valid(&SEGMENT_PIXELS));
const _: () = assert!(PIXELS_PER_DIGIT <= u16::BITS as usize);

/// Every segment has a real first pixel, every offset is inside the block, and no offset is
/// used twice.
#[expect(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "const fn; loops are bounded by the array lengths"
)]
const fn geometry_is_valid(table: &[SegmentPixels; SEGMENT_COUNT]) -> bool {
    let mut claimed: u16 = 0;
    let mut segment = 0;
    while segment < SEGMENT_COUNT {
        let slots = table[segment].0;
        if slots[0] == NO_PIXEL {
            return false;
        }
        let mut slot = 0;
        while slot < slots.len() {
            let offset = slots[slot];
            if offset != NO_PIXEL {
                if offset as usize >= PIXELS_PER_DIGIT {
                    return false;
                }
                let bit = 1_u16 << offset;
                if claimed & bit != 0 {
                    return false;
                }
                claimed |= bit;
            }
            slot += 1;
        }
        segment += 1;
    }
    true
}

/// Pixel offsets (within a block) for one segment.
#[must_use]
pub fn segment_pixels(segment: Segment) -> SegmentPixels {
    SEGMENT_PIXELS
        .get(segment.index())
        .copied()
        .unwrap_or(SegmentPixels::single(NO_PIXEL))
}

/// Draws one digit into `frame`.
///
/// The digit's whole block is cleared first, so no stroke from the previous glyph survives.
/// Every lit segment then gets `color`. Any bit pattern is accepted. Nothing is sent to the
/// LEDs; callers draw all four digits and commit once.
pub fn render_digit(frame: &mut StripFrame, digit: Digit, segments: Segments, color: Rgb) {
    for index in digit.pixels() {
        frame.set_pixel(index, BLACK);
    }

    let base = digit.base_pixel();
    for segment in segments.lit() {
        for offset in segment_pixels(segment).offsets() {
            if let Some(index) = base.checked_add(offset) {
                frame.set_pixel(index, color);
            }
        }
    }
}
