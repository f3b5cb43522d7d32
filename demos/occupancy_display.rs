//! Runs the occupancy sign against a scripted feed.
//!
//! Wiring: strip data on GPIO 4 (PIO1, DMA channel 1), strip power from VSYS.

#![no_std]
#![no_main]

use core::convert::Infallible;

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::Timer;
use occupancy_display::Result;
use occupancy_display::config::DisplayConfig;
use occupancy_display::inbound::LinkStatus;
use occupancy_display::occupancy_display::{OccupancyDisplay, OccupancyDisplayNotifier};
use panic_probe as _;

const COUNT: &str = "revspace/doorduino/checked-in";
const STATE: &str = "revspace/state";
const TEXT: &str = "revspace/nteller/text";

/// Messages replayed in a loop, with the pause (in seconds) before each one.
const FEED: &[(u64, &str, &[u8])] = &[
    (3, STATE, b"open"),
    (3, COUNT, b"1"),
    (3, COUNT, b"12"),
    (3, COUNT, b"123"),
    (3, COUNT, b"1234"),
    (3, STATE, b"closed"),
    (3, COUNT, b"7"),
    (3, COUNT, b"-1"),
    (3, COUNT, b"10000"),
    (3, TEXT, b"HALL"),
    (3, COUNT, b"not a number"),
    (3, STATE, b"open"),
    (3, COUNT, b"0123456789012345678901234567890123"), // too long, ignored
    (3, "revspace/elsewhere", b"42"),                   // unknown topic, ignored
];

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    core::panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    let config = DisplayConfig::from_build_env();

    static NOTIFIER: OccupancyDisplayNotifier = OccupancyDisplay::notifier();
    let display = OccupancyDisplay::new(p.PIO1, p.DMA_CH1, p.PIN_4, config, &NOTIFIER, spawner)?;

    info!("occupancy display demo (GPIO4 data, luminance {})", config.luminance);

    // Stand-in for the transport: let the self-test finish, then report progress.
    Timer::after(config.self_test_step * 4).await;
    for status in [
        LinkStatus::AccessPoint,
        LinkStatus::WifiConnected,
        LinkStatus::BrokerConnected,
    ] {
        Timer::after_secs(2).await;
        display.show_link_status(status);
    }

    loop {
        for &(pause, topic, payload) in FEED {
            Timer::after_secs(pause).await;
            if let Err(err) = display.deliver(topic, payload) {
                info!("not shown: {}", defmt::Display2Format(&err));
            }
        }
    }
}
