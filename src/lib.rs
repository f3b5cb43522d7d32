//! Occupancy display for a 4-digit, 7-segment sign built from a 60-pixel WS2812 strip.
//!
//! The sign shows how many people are checked in and whether the space is open. Counts,
//! open/closed state and short status texts arrive as [`inbound::InboundEvent`]s; the
//! [`occupancy::Occupancy`] handler turns them into four colored cells
//! ([`display_policy`]), and [`status_display::StatusDisplay`] draws the cells into a pixel
//! frame ([`digit_layout`]) and commits it to a [`led_strip::PixelSink`].
//!
//! Everything except [`occupancy_display`] is plain `no_std` code that runs (and is tested) on
//! the host. [`occupancy_display`] wires it to embassy tasks and the Pico's PIO.
#![no_std]

pub mod config;
pub mod digit_layout;
pub mod display_policy;
mod error;
pub mod inbound;
pub mod inbox;
pub mod led_strip;
pub mod occupancy;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod occupancy_display;
pub mod seven_segment;
pub mod status_display;

// Re-export commonly used items
pub use error::{Error, Result};
pub use led_strip::{Frame, PixelSink, Rgb};
pub use seven_segment::Segments;
