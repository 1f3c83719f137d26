//! # Event bus for broadcasting reports.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]. It is also the
//! runtime's [`StateSink`]: every report call from a philosopher or the cook
//! turns into one [`Event`] on the bus.
//!
//! ## Architecture
//! ```text
//! Reporters (many):                       Listener (one):
//!   Philosopher 0 ──┐
//!   Philosopher N ──┼──► Bus ──► subscriber_listener ──► TableView + SubscriberSet
//!   Cook          ──┤  (broadcast)    (in Dinner)
//!   Dinner        ──┘
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: a report never waits for a subscriber.
//! - **Single order**: the broadcast channel serializes concurrent reports,
//!   so every receiver sees the same sequence.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are lost if there are no active receivers at send time.

use tokio::sync::broadcast;

use super::event::{Event, EventKind};
use crate::{
    core::COOK,
    error::TableError,
    sink::StateSink,
    state::{CookState, PhilosopherState, Spaghetti},
};

/// Broadcast channel for dinner events.
///
/// ### Properties
/// - **Non-blocking**: `publish()` returns immediately.
/// - **Fire-and-forget**: no delivery or durability guarantees.
/// - **Cloneable**: cheap to clone (internally holds an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (min 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

fn philosopher_name(id: usize) -> String {
    format!("philosopher-{id}")
}

impl StateSink for Bus {
    fn philosopher_state(&self, id: usize, state: PhilosopherState) {
        self.publish(
            Event::new(EventKind::PhilosopherState)
                .with_actor(philosopher_name(id))
                .with_philosopher(id)
                .with_state(state),
        );
    }

    fn portions(&self, id: usize, count: u64) {
        self.publish(
            Event::new(EventKind::Portions)
                .with_actor(philosopher_name(id))
                .with_philosopher(id)
                .with_portions(count),
        );
    }

    fn cook_state(&self, state: CookState, spaghetti: Spaghetti) {
        self.publish(
            Event::new(EventKind::CookState)
                .with_actor(COOK)
                .with_cook(state, spaghetti),
        );
    }

    fn queue_occupancy(&self, count: usize) {
        self.publish(Event::new(EventKind::QueueOccupancy).with_occupancy(count));
    }

    fn wait_timed_out(&self, actor: &str, err: &TableError) {
        let mut ev = Event::new(EventKind::WaitTimedOut)
            .with_actor(actor)
            .with_resource(err.resource())
            .with_reason(err.to_string());
        if let TableError::WaitTimeout { waited, .. } = err {
            ev = ev.with_delay(*waited);
        }
        self.publish(ev);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::table::Resource;

    #[tokio::test]
    async fn reports_become_events_in_call_order() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();

        bus.philosopher_state(3, PhilosopherState::WaitTable);
        bus.portions(3, 7);
        bus.cook_state(CookState::Napping, Spaghetti::Pomodoro);
        bus.queue_occupancy(4);

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::PhilosopherState);
        assert_eq!(ev.actor.as_deref(), Some("philosopher-3"));
        assert_eq!(ev.state, Some(PhilosopherState::WaitTable));

        let ev = rx.recv().await.unwrap();
        assert_eq!((ev.kind, ev.portions), (EventKind::Portions, Some(7)));

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.actor.as_deref(), Some(COOK));
        assert_eq!(ev.cook, Some(CookState::Napping));
        assert_eq!(ev.spaghetti, Some(Spaghetti::Pomodoro));

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.occupancy, Some(4));
    }

    #[tokio::test]
    async fn timeout_report_carries_the_limit() {
        let bus = Bus::new(4);
        let mut rx = bus.subscribe();
        bus.wait_timed_out(
            "cook",
            &TableError::WaitTimeout {
                resource: Resource::Spaghetti,
                waited: Duration::from_millis(300),
            },
        );

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::WaitTimedOut);
        assert_eq!(ev.resource, Some(Resource::Spaghetti));
        assert_eq!(ev.delay_ms, Some(300));
    }

    #[test]
    fn publish_without_receivers_is_fine() {
        let bus = Bus::new(0);
        bus.queue_occupancy(1);
    }
}
