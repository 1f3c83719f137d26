//! Runtime core: the actors and their orchestration.
//!
//! Internal modules:
//! - [`philosopher`]: one diner's state machine;
//! - [`cook`]: the spaghetti producer and its pacing;
//! - [`dinner`]: spawns actors, wires events, graceful shutdown;
//! - [`builder`]: validates the configuration and assembles a dinner;
//! - [`cancel`]: cancellable waits shared by the actors;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod builder;
mod cancel;
mod cook;
mod dinner;
mod philosopher;
mod shutdown;

pub(crate) use cook::COOK;

pub use builder::DinnerBuilder;
pub use cook::Cook;
pub use dinner::{Dinner, Running};
pub use philosopher::Philosopher;
pub use shutdown::wait_for_shutdown_signal;
