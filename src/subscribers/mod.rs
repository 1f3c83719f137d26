//! # Event subscribers for the dinner runtime.
//!
//! This module provides the [`Subscribe`] trait, the non-blocking fan-out
//! [`SubscriberSet`] and the built-in subscribers.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Philosopher/Cook ── StateSink ──► Bus ──► Dinner listener
//!                                                 │
//!                                                 ├──► TableView::update(&Event)   (status screen)
//!                                                 │
//!                                                 └──► SubscriberSet::emit(&Event)
//!                                                           │
//!                                                      ┌────┴────┬─────────┐
//!                                                      ▼         ▼         ▼
//!                                                  LogWriter   Custom     ...
//! ```
//!
//! Subscribers observe and react to events (logging, counters). The
//! [`TableView`] is not one of them: the listener updates it directly, ahead
//! of the fan-out, so the screen never depends on a subscriber queue.

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;
mod table_view;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
pub use table_view::{PhilosopherRow, TableSnapshot, TableView};
