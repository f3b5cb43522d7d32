//! Messages from the network feed, parsed into [`InboundEvent`]s.
//!
//! The transport (whatever receives the feed) hands over a topic and a raw payload. This
//! module decides what the message means; it never fails on a malformed number, only on
//! messages that must not reach the display at all.

use heapless::Vec;

use crate::config::DisplayConfig;
use crate::digit_layout::CELL_COUNT;
use crate::{Error, Result};

/// Up to four characters to show verbatim.
pub type Text = Vec<char, CELL_COUNT>;

/// A single update for the sign.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InboundEvent {
    /// New occupancy count.
    Count(i16),
    /// New open (`true`) / closed (`false`) state.
    State(bool),
    /// Text to show instead of the count until the next update.
    Text(Text),
}

impl InboundEvent {
    /// Interprets a message from the feed.
    ///
    /// # Errors
    ///
    /// - [`Error::PayloadTooLong`] if `payload` exceeds `config.max_payload_len`; checked
    ///   before anything else.
    /// - [`Error::UnknownTopic`] if `topic` is none of `config.topics`.
    ///
    /// ```rust
    /// use occupancy_display::config::DisplayConfig;
    /// use occupancy_display::inbound::InboundEvent;
    ///
    /// let config = DisplayConfig::DEFAULT;
    /// let event = InboundEvent::parse(&config, "revspace/doorduino/checked-in", b"12");
    /// assert_eq!(event.ok(), Some(InboundEvent::Count(12)));
    /// ```
    pub fn parse(config: &DisplayConfig, topic: &str, payload: &[u8]) -> Result<Self> {
        Self::route(config, topic, payload).inspect_err(|err| log_rejected(topic, err))
    }

    fn route(config: &DisplayConfig, topic: &str, payload: &[u8]) -> Result<Self> {
        if payload.len() > config.max_payload_len {
            return Err(Error::PayloadTooLong {
                len: payload.len(),
                max: config.max_payload_len,
            });
        }

        let topics = &config.topics;
        if topic == topics.count {
            Ok(Self::Count(parse_count(payload)))
        } else if topic == topics.state {
            Ok(Self::State(payload == config.open_token.as_bytes()))
        } else if topic == topics.text {
            Ok(Self::Text(text_from_bytes(payload)))
        } else {
            Err(Error::UnknownTopic)
        }
    }

    /// A text event for `text`, keeping its first four characters.
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::Text(text.chars().take(CELL_COUNT).collect())
    }
}

/// Connection progress the transport reports on the sign while it has no data yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Joining the network.
    Connecting,
    /// Waiting for credentials in access-point mode.
    AccessPoint,
    /// Network is up; contacting the broker.
    WifiConnected,
    /// Subscribed to the feed.
    BrokerConnected,
}

impl LinkStatus {
    /// The four characters shown for this status.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Connecting => "Conn",
            Self::AccessPoint => "_AP_",
            Self::WifiConnected => "viFi",
            Self::BrokerConnected => "MQtt",
        }
    }
}

impl From<LinkStatus> for InboundEvent {
    fn from(status: LinkStatus) -> Self {
        Self::text(status.text())
    }
}

/// Reads a count the forgiving way: leading whitespace, an optional sign, then digits up to
/// the first non-digit. No digits means 0. Values past `i16` saturate.
#[must_use]
pub fn parse_count(payload: &[u8]) -> i16 {
    let mut bytes = payload
        .iter()
        .copied()
        .skip_while(u8::is_ascii_whitespace)
        .peekable();

    let negative = match bytes.peek().copied() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let magnitude = bytes
        .map_while(|byte| char::from(byte).to_digit(10))
        .fold(0_u32, |total, digit| total.saturating_mul(10).saturating_add(digit));
    let magnitude = i32::try_from(magnitude).unwrap_or(i32::MAX);
    let value = if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    };
    i16::try_from(value).unwrap_or(if negative { i16::MIN } else { i16::MAX })
}

#[cfg(feature = "defmt")]
fn log_rejected(topic: &str, err: &Error) {
    defmt::warn!(
        "ignoring message on {=str}: {}",
        topic,
        defmt::Display2Format(err)
    );
}

#[cfg(not(feature = "defmt"))]
const fn log_rejected(_topic: &str, _err: &Error) {}

fn text_from_bytes(payload: &[u8]) -> Text {
    payload
        .iter()
        .take(CELL_COUNT)
        .map(|&byte| char::from(byte))
        .collect()
}
