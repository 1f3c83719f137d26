//! # symposium
//!
//! **Symposium** runs the dining philosophers with a spaghetti cook on tokio.
//!
//! N philosophers sit around a round table with one fork between each pair of
//! neighbours. To eat, a philosopher needs a seat, both adjacent forks and a
//! portion of spaghetti from a bounded queue that a single cook keeps filled.
//! A counting gate admits at most N−2 philosophers at once, so a cyclic
//! left-then-right fork order can never close a wait-for cycle.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌──────────────┐ ┌──────────────┐       ┌──────────────┐   ┌──────────┐
//!   │Philosopher 0 │ │Philosopher 1 │  ...  │Philosopher N-1│  │   Cook   │
//!   └──────┬───────┘ └──────┬───────┘       └──────┬────────┘  └────┬─────┘
//!          │  seat, forks, pop                     │          push  │
//!          ▼                                       ▼                ▼
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Table                                                                  │
//! │  - SeatPermit (capacity N-2)                                            │
//! │  - Fork[0..N]  (philosopher i takes fork i, then fork (i+1) mod N)      │
//! │  - SpaghettiChannel (bounded FIFO, capacity M)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//!          │ StateSink reports (states, portions, cook, occupancy)
//!          ▼
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                          │
//! └──────────────────────────────────┬──────────────────────────────────────┘
//!                                    ▼
//!                        ┌────────────────────────┐
//!                        │  subscriber_listener   │
//!                        │      (in Dinner)       │
//!                        └───┬────────────────┬───┘
//!                            ▼                ▼
//!                       TableView       SubscriberSet
//!                    (status screen)   (per-sub queues)
//!                                   ┌─────────┼─────────┐
//!                                   ▼         ▼         ▼
//!                               LogWriter   custom     ...
//! ```
//!
//! ### Philosopher cycle
//! ```text
//! Thinking ─► WaitTable ─► WaitLeftFork ─► WaitRightFork ─► WaitSpaghetti ─► Eating(dish)
//!    ▲                                                                            │
//!    └───────────────────── release right fork, left fork, seat ◄─────────────────┘
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                          |
//! |-------------------|-----------------------------------------------------------|---------------------------------------------|
//! | **Primitives**    | Forks, seat gate and spaghetti queue with RAII release.   | [`Fork`], [`SeatPermit`], [`SpaghettiChannel`] |
//! | **Actors**        | Philosopher state machine and the pacing cook.            | [`Philosopher`], [`Cook`]                   |
//! | **Reporting**     | Every transition goes through a sink.                     | [`StateSink`], [`Bus`], [`Event`]           |
//! | **Subscriber API**| Hook into the reports (logging, screens, counters).       | [`Subscribe`], [`TableView`]                |
//! | **Runtime**       | Spawn, observe and gracefully stop a dinner.              | [`Dinner`], [`Running`]                     |
//! | **Waiting**       | Wait forever (default) or give up after a limit.          | [`WaitMode`]                                |
//! | **Errors**        | Typed errors for waits, configuration and shutdown.       | [`TableError`], [`ConfigError`], [`RuntimeError`] |
//!
//! ## Optional features
//! - `logging`: exports the `tracing`-backed [`LogWriter`] subscriber and the binary.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use symposium::{Config, Dinner};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config {
//!         think_base: Duration::from_millis(20),
//!         eat: Duration::from_millis(20),
//!         cook_time: Duration::from_millis(5),
//!         nap_time: Duration::from_millis(5),
//!         ..Config::default()
//!     };
//!
//!     let running = Dinner::builder(cfg).build()?.start();
//!     tokio::time::sleep(Duration::from_millis(500)).await;
//!     println!("{}", running.snapshot().await);
//!
//!     running.shutdown().await?;
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod policies;
mod sink;
mod state;
mod subscribers;
mod table;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{Cook, Dinner, DinnerBuilder, Philosopher, Running, wait_for_shutdown_signal};
pub use error::{ConfigError, RuntimeError, TableError};
pub use events::{Bus, Event, EventKind};
pub use policies::WaitMode;
pub use sink::StateSink;
pub use state::{CookState, PhilosopherState, Spaghetti};
pub use subscribers::{PhilosopherRow, Subscribe, SubscriberSet, TableSnapshot, TableView};
pub use table::{Fork, ForkGuard, Resource, Seat, SeatPermit, SpaghettiChannel, Table};

// Optional: expose the tracing-backed logger subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
