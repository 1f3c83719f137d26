//! # LogWriter: events as `tracing` records
//!
//! A subscriber that turns every [`Event`] into a structured `tracing` event.
//! Install any `tracing` subscriber (the binary uses `tracing_subscriber::fmt`)
//! to see them.
//!
//! ## Levels
//! - `DEBUG`: queue occupancy, actor start/stop
//! - `INFO`: philosopher/cook state changes, portions, shutdown progress
//! - `WARN`: expired waits, dropped events, grace exceeded
//! - `ERROR`: subscriber panics
//!
//! ## Example output
//! ```text
//! INFO  symposium: philosopher=2 state=wait right fork state changed
//! INFO  symposium: philosopher=2 portions=3 portion eaten
//! INFO  symposium: cook=cooking spaghetti=pesto cook state changed
//! WARN  symposium: actor="philosopher-4" resource=fork 0 waited_ms=200 wait timed out
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let actor = e.actor.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::PhilosopherState => {
                if let (Some(id), Some(state)) = (e.philosopher, e.state) {
                    tracing::info!(philosopher = id, state = %state, "state changed");
                }
            }
            EventKind::Portions => {
                tracing::info!(
                    philosopher = e.philosopher,
                    portions = e.portions,
                    "portion eaten"
                );
            }
            EventKind::CookState => {
                if let (Some(cook), Some(dish)) = (e.cook, e.spaghetti) {
                    tracing::info!(cook = %cook, spaghetti = %dish, "cook state changed");
                }
            }
            EventKind::QueueOccupancy => {
                tracing::debug!(occupancy = e.occupancy, "spaghetti in queue");
            }
            EventKind::WaitTimedOut => {
                let resource = e.resource.map(|r| r.to_string()).unwrap_or_default();
                tracing::warn!(actor, resource = %resource, waited_ms = e.delay_ms, "wait timed out");
            }
            EventKind::ActorStarting => {
                tracing::debug!(actor, "actor starting");
            }
            EventKind::ActorStopped => {
                tracing::debug!(actor, "actor stopped");
            }
            EventKind::ShutdownRequested => {
                tracing::info!("shutdown requested");
            }
            EventKind::AllStoppedWithin => {
                tracing::info!("all actors stopped within grace");
            }
            EventKind::GraceExceeded => {
                tracing::warn!("grace exceeded");
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(
                    subscriber = actor,
                    reason = e.reason.as_deref().unwrap_or("unknown"),
                    "subscriber overflow"
                );
            }
            EventKind::SubscriberPanicked => {
                tracing::error!(
                    subscriber = actor,
                    info = e.reason.as_deref().unwrap_or("unknown"),
                    "subscriber panicked"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
