#![cfg(feature = "host")]
//! Host-level tests for turning glyphs into strip pixels.

use occupancy_display::digit_layout::{Digit, PIXEL_COUNT, PIXELS_PER_DIGIT, StripFrame};
use occupancy_display::display_policy::{CLOSED, OPEN, WARNING};
use occupancy_display::led_strip::{BLACK, Frame, PixelSink, Rgb};
use occupancy_display::status_display::StatusDisplay;

#[derive(Default)]
struct RecordingSink {
    luminance: Option<u8>,
    frames: Vec<StripFrame>,
}

impl PixelSink<PIXEL_COUNT> for RecordingSink {
    fn set_luminance(&mut self, level: u8) {
        self.luminance = Some(level);
    }

    fn commit(&mut self, frame: &Frame<PIXEL_COUNT>) {
        self.frames.push(*frame);
    }
}

fn display() -> StatusDisplay<RecordingSink> {
    StatusDisplay::new(RecordingSink::default(), 75)
}

/// Strip pixels lit in `color`, as (digit, offset within the block) pairs.
fn lit(frame: &StripFrame, color: Rgb) -> Vec<(Digit, usize)> {
    let mut pixels = Vec::new();
    for digit in Digit::ALL {
        for (offset, pixel) in frame[digit.pixels()].iter().enumerate() {
            if *pixel == color {
                pixels.push((digit, offset));
            }
        }
    }
    pixels
}

fn count_not_black(frame: &StripFrame) -> usize {
    frame.iter().filter(|&&pixel| pixel != BLACK).count()
}

#[test]
fn seven_while_closed_lights_abc_and_decimal_point() {
    let mut display = display();
    display.show_number(7, false);

    let frame = display.frame();
    let units: Vec<_> = lit(frame, CLOSED)
        .into_iter()
        .map(|(digit, offset)| {
            assert_eq!(digit, Digit::Units);
            offset
        })
        .collect();
    // c = 0,1; dp = 2; b = 9,10; a = 11,12
    assert_eq!(units, [0, 1, 2, 9, 10, 11, 12]);
    assert_eq!(count_not_black(frame), 7);
}

#[test]
fn four_digits_while_open() {
    let mut display = display();
    display.show_number(1234, true);

    let frame = display.frame();
    assert_eq!(count_not_black(frame), lit(frame, OPEN).len());
    let per_digit = |digit: Digit| {
        frame[digit.pixels()]
            .iter()
            .filter(|&&pixel| pixel == OPEN)
            .count()
    };
    assert_eq!(per_digit(Digit::Thousands), 4); // '1'
    assert_eq!(per_digit(Digit::Hundreds), 10); // '2'
    assert_eq!(per_digit(Digit::Tens), 10); // '3'
    assert_eq!(per_digit(Digit::Units), 8); // '4'

    // '1' is b and c in the block that ends the strip
    assert_eq!(frame[45], OPEN);
    assert_eq!(frame[46], OPEN);
    assert_eq!(frame[54], OPEN);
    assert_eq!(frame[55], OPEN);
}

#[test]
fn negative_count_shows_dashes_in_middle_digits() {
    let mut display = display();
    display.show_number(-1, true);

    // g is offsets 7 and 8
    assert_eq!(
        lit(display.frame(), WARNING),
        [
            (Digit::Hundreds, 7),
            (Digit::Hundreds, 8),
            (Digit::Tens, 7),
            (Digit::Tens, 8),
        ]
    );
    assert_eq!(count_not_black(display.frame()), 4);
}

#[test]
fn overflow_shows_hh_in_middle_digits() {
    let mut display = display();
    display.show_number(10_000, false);

    let frame = display.frame();
    for digit in [Digit::Thousands, Digit::Units] {
        assert!(frame[digit.pixels()].iter().all(|&pixel| pixel == BLACK));
    }
    // H is b, c, e, f, g: ten pixels, never the decimal point
    for digit in [Digit::Hundreds, Digit::Tens] {
        let block = &frame[digit.pixels()];
        assert_eq!(block.iter().filter(|&&pixel| pixel == WARNING).count(), 10);
        assert_eq!(block[2], BLACK);
    }
}

#[test]
fn every_update_is_one_full_commit() {
    let mut display = display();
    display.show_number(88, true);
    display.show_text("Conn", WARNING);
    display.show_number(5, false);

    let frames = &display.sink().frames;
    assert_eq!(frames.len(), 4);
    assert_eq!(display.sink().luminance, Some(75));
    // each commit is the whole strip as drawn, not a partial update
    assert_eq!(frames.last(), Some(display.frame()));
    assert_eq!(count_not_black(&frames[3]), lit(&frames[3], CLOSED).len());
}

#[test]
fn decimal_point_is_a_single_pixel_per_digit() {
    let mut display = display();
    display.show_text("....", OPEN);
    // '.' has no glyph, so every cell shows the undefined shape: a, d, g and dp
    for digit in Digit::ALL {
        let block = &display.frame()[digit.pixels()];
        assert_eq!(block.iter().filter(|&&pixel| pixel == OPEN).count(), 7);
        assert_eq!(block[2], OPEN);
    }
    assert_eq!(PIXELS_PER_DIGIT * Digit::ALL.len(), PIXEL_COUNT);
}
