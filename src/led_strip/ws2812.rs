//! The WS2812 chain on PIO1, fed by DMA from its own task.
//!
//! See [`LedStrip`].

use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::bind_interrupts;
use embassy_rp::dma::Channel;
use embassy_rp::peripherals::PIO1;
use embassy_rp::pio::{Common, InterruptHandler, Pio, PioPin};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_sync::signal::Signal;

use super::{FrameSignal, SignalSink};
use crate::Result;
use crate::digit_layout::PIXEL_COUNT;

bind_interrupts!(struct Pio1Irqs {
    PIO1_IRQ_0 => InterruptHandler<PIO1>;
});

type Ws2812Driver = PioWs2812<'static, PIO1, 0, PIXEL_COUNT>;

/// Notifier for the [`LedStrip`] task: the most recent frame not yet written.
pub type LedStripNotifier = FrameSignal<PIXEL_COUNT>;

/// Owns the strip hardware through a background task and hands out sinks that feed it.
///
/// ```no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// use occupancy_display::led_strip::ws2812::{LedStrip, LedStripNotifier};
/// use occupancy_display::status_display::StatusDisplay;
///
/// async fn example(p: embassy_rp::Peripherals, spawner: embassy_executor::Spawner) -> occupancy_display::Result<()> {
///     static NOTIFIER: LedStripNotifier = LedStrip::notifier();
///     let strip = LedStrip::new(p.PIO1, p.DMA_CH1, p.PIN_4, &NOTIFIER, spawner)?;
///     let mut display = StatusDisplay::new(strip.sink(), 75);
///     display.show_text("8888", occupancy_display::led_strip::colors::WHITE);
///     Ok(())
/// }
/// ```
pub struct LedStrip(&'static LedStripNotifier);

impl LedStrip {
    /// Creates the notifier the strip task listens on.
    #[must_use]
    pub const fn notifier() -> LedStripNotifier {
        Signal::new()
    }

    /// Loads the WS2812 program on PIO1 state machine 0 and spawns the writer task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be spawned.
    pub fn new(
        pio: Peri<'static, PIO1>,
        dma: Peri<'static, impl Channel>,
        pin: Peri<'static, impl PioPin>,
        notifier: &'static LedStripNotifier,
        spawner: Spawner,
    ) -> Result<Self> {
        let Pio {
            mut common, sm0, ..
        } = Pio::new(pio, Pio1Irqs);
        let program = PioWs2812Program::new(&mut common);
        let driver = PioWs2812::new(&mut common, sm0, dma, pin, &program);
        let token = strip_loop(driver, common, notifier)?;
        spawner.spawn(token);
        Ok(Self(notifier))
    }

    /// A sink for [`StatusDisplay`](crate::status_display::StatusDisplay).
    #[must_use]
    pub const fn sink(&self) -> SignalSink<'static, PIXEL_COUNT> {
        SignalSink::new(self.0)
    }
}

#[embassy_executor::task]
async fn strip_loop(
    mut driver: Ws2812Driver,
    // keeps the PIO block (and the loaded program) alive
    _common: Common<'static, PIO1>,
    notifier: &'static LedStripNotifier,
) -> ! {
    loop {
        let frame = notifier.wait().await;
        driver.write(&frame.0).await;
    }
}
