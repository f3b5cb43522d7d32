//! Latest-wins hand-off of [`InboundEvent`]s from the transport to the device loop.
//!
//! The feed publishes the open/closed state only when it changes, so no count or state update
//! may be lost while the device loop is busy (for example during the power-up self-test).
//! [`Inbox`] keeps at most one pending count, one pending state and one pending text. A newer
//! value replaces an unread older one, and posting never fails or blocks.
//!
//! Taking the pending events yields them in an order whose final picture and final
//! [`OccupancyState`](crate::occupancy::OccupancyState) match applying every posted event one
//! by one.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::signal::Signal;
use heapless::Vec;

use crate::inbound::{InboundEvent, Text};

/// At most one event per kind: count, state, text.
pub const MAX_PENDING: usize = 3;

/// Pending events, in the order they should be applied.
pub type Batch = Vec<InboundEvent, MAX_PENDING>;

#[derive(Default)]
struct Pending {
    count: Option<i16>,
    state: Option<bool>,
    text: Option<Text>,
}

impl Pending {
    const fn new() -> Self {
        Self {
            count: None,
            state: None,
            text: None,
        }
    }

    fn post(&mut self, event: InboundEvent) {
        match event {
            // a newer number replaces whatever text was waiting, as it would on the sign
            InboundEvent::Count(count) => {
                self.count = Some(count);
                self.text = None;
            }
            InboundEvent::State(is_open) => {
                self.state = Some(is_open);
                self.text = None;
            }
            InboundEvent::Text(text) => self.text = Some(text),
        }
    }

    /// Number updates first, so that a text posted after them is what stays visible.
    fn take(&mut self) -> Batch {
        let Self { count, state, text } = core::mem::take(self);
        count
            .map(InboundEvent::Count)
            .into_iter()
            .chain(state.map(InboundEvent::State))
            .chain(text.map(InboundEvent::Text))
            .collect()
    }
}

/// Coalescing mailbox between [`OccupancyDisplay`](crate::occupancy_display::OccupancyDisplay)
/// and its device loop.
///
/// ```rust
/// use embassy_sync::blocking_mutex::raw::NoopRawMutex;
/// use occupancy_display::inbound::InboundEvent;
/// use occupancy_display::inbox::Inbox;
///
/// let inbox: Inbox<NoopRawMutex> = Inbox::new();
/// inbox.post(InboundEvent::Count(3));
/// inbox.post(InboundEvent::Count(4));
/// assert_eq!(inbox.try_take().as_slice(), &[InboundEvent::Count(4)]);
/// assert!(inbox.try_take().is_empty());
/// ```
pub struct Inbox<M: RawMutex = CriticalSectionRawMutex> {
    pending: Mutex<M, RefCell<Pending>>,
    ready: Signal<M, ()>,
}

impl<M: RawMutex> Inbox<M> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(RefCell::new(Pending::new())),
            ready: Signal::new(),
        }
    }

    /// Stores `event`, replacing an unread event of the same kind, and wakes the receiver.
    pub fn post(&self, event: InboundEvent) {
        self.pending.lock(|pending| pending.borrow_mut().post(event));
        self.ready.signal(());
    }

    /// Everything pending right now, possibly nothing.
    pub fn try_take(&self) -> Batch {
        self.pending.lock(|pending| pending.borrow_mut().take())
    }

    /// Waits until at least one event is pending and takes all of them.
    pub async fn take(&self) -> Batch {
        loop {
            self.ready.wait().await;
            let batch = self.try_take();
            if !batch.is_empty() {
                return batch;
            }
        }
    }
}

impl<M: RawMutex> Default for Inbox<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn inbox() -> Inbox<NoopRawMutex> {
        Inbox::new()
    }

    #[test]
    fn test_newer_value_replaces_unread_one() {
        let inbox = inbox();
        inbox.post(InboundEvent::State(false));
        inbox.post(InboundEvent::Count(3));
        inbox.post(InboundEvent::State(true));
        assert_eq!(
            inbox.try_take().as_slice(),
            &[InboundEvent::Count(3), InboundEvent::State(true)]
        );
    }

    #[test]
    fn test_posting_never_runs_out_of_room() {
        let inbox = inbox();
        for count in 0..100 {
            inbox.post(InboundEvent::Count(count));
            inbox.post(InboundEvent::text("MQtt"));
        }
        inbox.post(InboundEvent::State(true));
        assert_eq!(
            inbox.try_take().as_slice(),
            &[InboundEvent::Count(99), InboundEvent::State(true)]
        );
    }

    #[test]
    fn test_text_after_number_is_taken_last() {
        let inbox = inbox();
        inbox.post(InboundEvent::Count(7));
        inbox.post(InboundEvent::text("viFi"));
        inbox.post(InboundEvent::text("MQtt"));
        assert_eq!(
            inbox.try_take().as_slice(),
            &[InboundEvent::Count(7), InboundEvent::text("MQtt")]
        );
    }

    #[test]
    fn test_take_empties_the_inbox() {
        let inbox = inbox();
        assert!(inbox.try_take().is_empty());
        inbox.post(InboundEvent::Count(1));
        assert_eq!(inbox.try_take().len(), 1);
        assert!(inbox.try_take().is_empty());
    }
}
