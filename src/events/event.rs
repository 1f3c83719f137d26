//! # Events published while the dinner runs.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Report events**: one per [`StateSink`](crate::StateSink) call (states, portions, queue)
//! - **Actor events**: an actor task started or stopped
//! - **Runtime events**: shutdown progress and subscriber trouble
//!
//! The [`Event`] struct carries the payload of the report as optional fields.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use symposium::{Event, EventKind, PhilosopherState, Spaghetti};
//!
//! let ev = Event::new(EventKind::PhilosopherState)
//!     .with_actor("philosopher-2")
//!     .with_philosopher(2)
//!     .with_state(PhilosopherState::Eating(Spaghetti::Pesto));
//!
//! assert_eq!(ev.kind, EventKind::PhilosopherState);
//! assert_eq!(ev.philosopher, Some(2));
//! assert_eq!(ev.actor.as_deref(), Some("philosopher-2"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::Duration;

use crate::state::{CookState, PhilosopherState, Spaghetti};
use crate::table::Resource;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `actor`: subscriber name
    /// - `reason`: panic info
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `actor`: subscriber name
    /// - `reason`: "full" or "closed"
    SubscriberOverflow,

    // === Shutdown events ===
    /// Shutdown requested (OS signal or explicit call).
    ShutdownRequested,

    /// All actors stopped within the configured grace period.
    AllStoppedWithin,

    /// Grace period exceeded; some actors did not stop in time.
    GraceExceeded,

    // === Actor events ===
    /// An actor task started.
    ///
    /// Sets:
    /// - `actor`: actor name (`philosopher-<id>` or `cook`)
    ActorStarting,

    /// An actor task returned (cancelled or closed table).
    ///
    /// Sets:
    /// - `actor`: actor name
    ActorStopped,

    // === Report events ===
    /// A philosopher changed state.
    ///
    /// Sets:
    /// - `actor`, `philosopher`: who
    /// - `state`: the new state
    PhilosopherState,

    /// A philosopher finished a portion.
    ///
    /// Sets:
    /// - `actor`, `philosopher`: who
    /// - `portions`: lifetime total
    Portions,

    /// The cook changed state.
    ///
    /// Sets:
    /// - `actor`: `cook`
    /// - `cook`: the new state
    /// - `spaghetti`: the dish of the current cycle
    CookState,

    /// The queue occupancy was read after a push or pop.
    ///
    /// Sets:
    /// - `occupancy`: portions queued
    QueueOccupancy,

    /// A bounded wait expired.
    ///
    /// Sets:
    /// - `actor`: who was waiting
    /// - `resource`: what for
    /// - `delay_ms`: the wait limit (ms)
    /// - `reason`: error message
    WaitTimedOut,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the actor or subscriber, if applicable.
    pub actor: Option<Arc<str>>,
    /// Philosopher id.
    pub philosopher: Option<usize>,
    /// New philosopher state.
    pub state: Option<PhilosopherState>,
    /// Lifetime portion count.
    pub portions: Option<u64>,
    /// New cook state.
    pub cook: Option<CookState>,
    /// Dish of the cook's current cycle.
    pub spaghetti: Option<Spaghetti>,
    /// Queue occupancy.
    pub occupancy: Option<usize>,
    /// Resource of an expired wait.
    pub resource: Option<Resource>,
    /// Wait limit in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind and the next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            kind,
            actor: None,
            philosopher: None,
            state: None,
            portions: None,
            cook: None,
            spaghetti: None,
            occupancy: None,
            resource: None,
            delay_ms: None,
            reason: None,
        }
    }

    /// Attaches an actor (or subscriber) name.
    #[inline]
    pub fn with_actor(mut self, actor: impl Into<Arc<str>>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Attaches a philosopher id.
    #[inline]
    pub fn with_philosopher(mut self, id: usize) -> Self {
        self.philosopher = Some(id);
        self
    }

    /// Attaches a philosopher state.
    #[inline]
    pub fn with_state(mut self, state: PhilosopherState) -> Self {
        self.state = Some(state);
        self
    }

    /// Attaches a portion count.
    #[inline]
    pub fn with_portions(mut self, count: u64) -> Self {
        self.portions = Some(count);
        self
    }

    /// Attaches the cook state and the current dish.
    #[inline]
    pub fn with_cook(mut self, state: CookState, spaghetti: Spaghetti) -> Self {
        self.cook = Some(state);
        self.spaghetti = Some(spaghetti);
        self
    }

    /// Attaches a queue occupancy.
    #[inline]
    pub fn with_occupancy(mut self, count: usize) -> Self {
        self.occupancy = Some(count);
        self
    }

    /// Attaches the resource of an expired wait.
    #[inline]
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Attaches a delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_actor(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_actor(subscriber)
            .with_reason(info)
    }

    /// True for events about subscribers themselves.
    ///
    /// A failed delivery of one of these is logged but never published again.
    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_increase() {
        let a = Event::new(EventKind::QueueOccupancy);
        let b = Event::new(EventKind::QueueOccupancy);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn delay_is_stored_in_millis_and_saturates() {
        let ev = Event::new(EventKind::WaitTimedOut).with_delay(Duration::from_millis(250));
        assert_eq!(ev.delay_ms, Some(250));

        let ev = Event::new(EventKind::WaitTimedOut).with_delay(Duration::from_secs(u64::MAX));
        assert_eq!(ev.delay_ms, Some(u32::MAX));
    }

    #[test]
    fn subscriber_events_are_flagged() {
        assert!(Event::subscriber_overflow("view", "full").is_subscriber_event());
        assert!(!Event::new(EventKind::Portions).is_subscriber_event());
    }
}
