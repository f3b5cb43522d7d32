//! A device abstraction for the occupancy sign: strip, renderer, and state, all behind one
//! background task.
//!
//! See [`OccupancyDisplay`] for the main usage example.

use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::dma::Channel as DmaChannel;
use embassy_rp::peripherals::PIO1;
use embassy_rp::pio::PioPin;
use embassy_time::Timer;

#[cfg(feature = "defmt")]
use defmt::info;

use crate::config::DisplayConfig;
use crate::digit_layout::PIXEL_COUNT;
use crate::inbound::{InboundEvent, LinkStatus};
use crate::inbox::Inbox;
use crate::led_strip::SignalSink;
use crate::led_strip::ws2812::{LedStrip, LedStripNotifier};
use crate::occupancy::Occupancy;
use crate::status_display::{SELF_TEST_COLORS, StatusDisplay};
use crate::Result;

/// Notifier for the [`OccupancyDisplay`] device.
pub type OccupancyDisplayNotifier = (Inbox, LedStripNotifier);

/// The occupancy sign on a 60-pixel WS2812 strip.
///
/// On creation the device loop runs the power-up self-test (every pixel blue, green, red,
/// then yellow, one [`DisplayConfig::self_test_step`] each), shows `Conn`, and then applies
/// events. Updates that arrive while the loop is busy are coalesced by the [`Inbox`]: the
/// newest count and the newest state always reach the sign.
///
/// # Example
///
/// ```no_run
/// #![no_std]
/// #![no_main]
///
/// use occupancy_display::config::DisplayConfig;
/// use occupancy_display::inbound::LinkStatus;
/// use occupancy_display::occupancy_display::{OccupancyDisplay, OccupancyDisplayNotifier};
/// # use embassy_executor::Spawner;
/// # use core::panic::PanicInfo;
/// # #[panic_handler]
/// # fn panic(_: &PanicInfo) -> ! { loop {} }
///
/// async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> occupancy_display::Result<()> {
///     static NOTIFIER: OccupancyDisplayNotifier = OccupancyDisplay::notifier();
///     let display = OccupancyDisplay::new(
///         p.PIO1,
///         p.DMA_CH1,
///         p.PIN_4,
///         DisplayConfig::from_build_env(),
///         &NOTIFIER,
///         spawner,
///     )?;
///
///     display.show_link_status(LinkStatus::BrokerConnected);
///     display.deliver("revspace/state", b"open")?;
///     display.deliver("revspace/doorduino/checked-in", b"7")?;
///     Ok(())
/// }
/// ```
pub struct OccupancyDisplay<'a> {
    inbox: &'a Inbox,
    config: DisplayConfig,
}

impl OccupancyDisplay<'_> {
    /// Creates the display device and spawns its background tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if either task cannot be spawned.
    #[must_use = "Must be used to manage the spawned task"]
    pub fn new(
        pio: Peri<'static, PIO1>,
        dma: Peri<'static, impl DmaChannel>,
        pin: Peri<'static, impl PioPin>,
        config: DisplayConfig,
        notifier: &'static OccupancyDisplayNotifier,
        spawner: Spawner,
    ) -> Result<Self> {
        let (inbox, frames) = notifier;
        let strip = LedStrip::new(pio, dma, pin, frames, spawner)?;
        let token = device_loop(config, inbox, strip.sink())?;
        spawner.spawn(token);
        Ok(Self { inbox, config })
    }

    /// Creates a notifier for the display.
    #[must_use]
    pub const fn notifier() -> OccupancyDisplayNotifier {
        (Inbox::new(), LedStrip::notifier())
    }

    /// Hands an event to the device loop. Never blocks; an unread event of the same kind is
    /// replaced.
    pub fn send(&self, event: InboundEvent) {
        self.inbox.post(event);
    }

    /// Parses a message from the feed and hands the result to the device loop.
    ///
    /// # Errors
    ///
    /// Returns the parse error for oversized payloads and unknown topics. Nothing is sent in
    /// that case.
    pub fn deliver(&self, topic: &str, payload: &[u8]) -> Result<()> {
        self.send(InboundEvent::parse(&self.config, topic, payload)?);
        Ok(())
    }

    /// Shows the transport's connection progress until the next event.
    pub fn show_link_status(&self, status: LinkStatus) {
        self.send(status.into());
    }
}

#[embassy_executor::task]
async fn device_loop(
    config: DisplayConfig,
    inbox: &'static Inbox,
    sink: SignalSink<'static, PIXEL_COUNT>,
) -> ! {
    let mut display = StatusDisplay::new(sink, config.luminance);
    #[cfg(feature = "defmt")]
    info!("self-test at luminance {}", config.luminance);
    for color in SELF_TEST_COLORS {
        #[cfg(feature = "defmt")]
        defmt::debug!("self-test fill ({}, {}, {})", color.r, color.g, color.b);
        display.fill(color);
        Timer::after(config.self_test_step).await;
    }

    let mut occupancy = Occupancy::new(config);
    occupancy.apply(&LinkStatus::Connecting.into(), &mut display);

    loop {
        for event in inbox.take().await {
            #[cfg(feature = "defmt")]
            info!("event: {}", event);
            occupancy.apply(&event, &mut display);
        }
    }
}
