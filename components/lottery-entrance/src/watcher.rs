use cosmwasm_std::Addr;
use log::{debug, info};
use raffle_entrance_common::{RaffleEvent, RaffleEventKind};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::error::EntranceError;
use crate::interface::RaffleProvider;

/// A live listener for one contract event. Dropping it closes the listener.
#[derive(Debug)]
pub struct Subscription {
    kind: RaffleEventKind,
    events: mpsc::UnboundedReceiver<RaffleEvent>,
}

impl Subscription {
    pub fn new(kind: RaffleEventKind, events: mpsc::UnboundedReceiver<RaffleEvent>) -> Self {
        Subscription { kind, events }
    }

    /// A subscription together with the sender a provider delivers into.
    pub fn channel(kind: RaffleEventKind) -> (mpsc::UnboundedSender<RaffleEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Subscription::new(kind, rx))
    }

    pub fn kind(&self) -> RaffleEventKind {
        self.kind
    }

    /// Next event, or `None` once the provider side has gone away.
    pub async fn recv(&mut self) -> Option<RaffleEvent> {
        self.events.recv().await
    }

    /// An already delivered event. `Disconnected` once the provider side has
    /// gone away and the queue is empty.
    pub fn try_recv(&mut self) -> Result<RaffleEvent, TryRecvError> {
        self.events.try_recv()
    }
}

/// Holds at most one subscription. Arming replaces the previous one, so
/// listeners never accumulate across entry cycles.
#[derive(Debug, Default)]
pub struct SubscriptionSlot {
    current: Option<Subscription>,
    generation: u64,
}

impl SubscriptionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `subscription`, closing the previous one. Returns the new
    /// generation number.
    pub fn arm(&mut self, subscription: Subscription) -> u64 {
        self.current = Some(subscription);
        self.generation += 1;
        self.generation
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn is_armed(&self) -> bool {
        self.current.is_some()
    }

    /// How many times the slot has been armed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the next event. Resolves to `None` at once when nothing is
    /// armed, and closes the slot when the provider drops the listener.
    pub async fn next(&mut self) -> Option<RaffleEvent> {
        let subscription = self.current.as_mut()?;
        let event = subscription.recv().await;
        if event.is_none() {
            self.current = None;
        }
        event
    }

    /// An already delivered event, without waiting. Closes the slot when the
    /// provider dropped the listener.
    pub fn try_next(&mut self) -> Option<RaffleEvent> {
        match self.current.as_mut()?.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.current = None;
                None
            }
        }
    }

    /// Drop every event delivered so far. Returns how many were dropped.
    pub fn discard_pending(&mut self) -> usize {
        let mut discarded = 0;
        while self.try_next().is_some() {
            discarded += 1;
        }
        discarded
    }
}

/// Make sure `slot` listens for `WinnerPicked` on `contract`.
///
/// A live subscription is kept as is, with its queued events; only an empty
/// slot subscribes. Returns the slot generation.
pub fn watch_winner_picked<P: RaffleProvider>(
    provider: &P,
    contract: &Addr,
    slot: &mut SubscriptionSlot,
) -> Result<u64, EntranceError> {
    let kind = RaffleEventKind::WinnerPicked;
    if slot.is_armed() {
        debug!("action=keep_watcher event={} generation={}", kind.event_name(), slot.generation());
        return Ok(slot.generation());
    }
    let subscription =
        provider
            .subscribe(contract, kind)
            .map_err(|e| EntranceError::SubscribeFailure {
                event: kind.event_name().to_string(),
                reason: e.to_string(),
            })?;
    let generation = slot.arm(subscription);
    info!("action=watch event={} contract={contract} generation={generation}", kind.event_name());
    Ok(generation)
}
