//! Dinner events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to the reports of the philosophers and the cook, plus
//! runtime notifications from the dinner and the subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`, and the runtime [`StateSink`](crate::StateSink)
//!
//! ## Quick reference
//! - **Publishers**: `Philosopher`, `Cook` (through `StateSink`), `Dinner`.
//! - **Consumers**: `Dinner::subscriber_listener()` (updates `TableView`, fans out to `SubscriberSet`).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
