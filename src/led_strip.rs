//! Pixel buffer and the hand-off from the renderer to the LED hardware.
//!
//! The renderer draws into a [`Frame`] and hands finished frames to a [`PixelSink`]. On the
//! Pico the sink is a [`SignalSink`] feeding the WS2812 task in [`ws2812`]; in tests it is
//! anything that records what it was given.

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod ws2812;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::signal::Signal;
use smart_leds::RGB8;
/// RGB color constants.
pub use smart_leds::colors;

/// RGB color representation re-exported from `smart_leds`.
pub type Rgb = RGB8;

/// All channels off.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Frame of `Rgb` values for a 1D LED strip.
///
/// Use [`Frame::new`] for a blank frame or [`Frame::filled`] for a solid color. Frames deref to
/// `[Rgb; N]`, so slices and iterators work directly.
///
/// ```rust
/// use occupancy_display::led_strip::{Frame, colors};
///
/// let mut frame = Frame::<8>::new();
/// frame.set_pixel(0, colors::RED);
/// frame.set_pixel(99, colors::RED); // out of range, ignored
/// assert_eq!(frame[0], colors::RED);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<const N: usize>(pub [Rgb; N]);

impl<const N: usize> Frame<N> {
    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([BLACK; N])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: Rgb) -> Self {
        Self([color; N])
    }

    /// Sets one pixel. Indexes past the end of the strip are ignored.
    pub fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.0.get_mut(index) {
            *pixel = color;
        }
    }

    /// Sets every pixel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.0 = [color; N];
    }

    /// A copy of this frame with every channel scaled by `luminance / 255`.
    #[must_use]
    pub fn with_luminance(&self, luminance: u8) -> Self {
        let mut frame = *self;
        for color in &mut frame.0 {
            *color = Rgb::new(
                scale_brightness(color.r, luminance),
                scale_brightness(color.g, luminance),
                scale_brightness(color.b, luminance),
            );
        }
        frame
    }
}

impl<const N: usize> core::ops::Deref for Frame<N> {
    type Target = [Rgb; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> core::ops::DerefMut for Frame<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[Rgb; N]> for Frame<N> {
    fn from(array: [Rgb; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "255 * 255 fits in u16 and the quotient fits in u8"
)]
fn scale_brightness(value: u8, brightness: u8) -> u8 {
    let scaled = (u16::from(value) * u16::from(brightness)) / 255;
    u8::try_from(scaled).unwrap_or(u8::MAX)
}

/// Where finished frames go.
///
/// The renderer batches all four digits into one frame and commits it once.
pub trait PixelSink<const N: usize> {
    /// Sets the global brightness (0-255). Called once, when the display is created.
    fn set_luminance(&mut self, level: u8);

    /// Pushes `frame` to the LEDs.
    fn commit(&mut self, frame: &Frame<N>);
}

/// Latest-frame-wins hand-off to the task that owns the strip hardware.
pub type FrameSignal<const N: usize, M = CriticalSectionRawMutex> = Signal<M, Frame<N>>;

/// A [`PixelSink`] that applies luminance and signals the frame to the strip task.
///
/// If the strip task is still busy with an older frame, the newer one replaces it, so
/// the LEDs always end up showing the most recent commit.
pub struct SignalSink<'a, const N: usize, M: RawMutex = CriticalSectionRawMutex> {
    signal: &'a FrameSignal<N, M>,
    luminance: u8,
}

impl<'a, const N: usize, M: RawMutex> SignalSink<'a, N, M> {
    /// Creates a sink at full brightness; [`PixelSink::set_luminance`] lowers it.
    #[must_use]
    pub const fn new(signal: &'a FrameSignal<N, M>) -> Self {
        Self {
            signal,
            luminance: u8::MAX,
        }
    }

    /// The luminance applied to every committed frame.
    #[must_use]
    pub const fn luminance(&self) -> u8 {
        self.luminance
    }
}

impl<const N: usize, M: RawMutex> PixelSink<N> for SignalSink<'_, N, M> {
    fn set_luminance(&mut self, level: u8) {
        self.luminance = level;
    }

    fn commit(&mut self, frame: &Frame<N>) {
        #[cfg(all(feature = "display-trace", feature = "defmt"))]
        defmt::info!("commit frame at luminance {}", self.luminance);
        self.signal.signal(frame.with_luminance(self.luminance));
    }
}
