//! Wait policies.
//!
//! ## Contents
//! - [`WaitMode`] how long a table primitive may block (forever / bounded)
//!
//! ## Quick wiring
//! ```text
//! Config { wait: WaitMode }
//!      └─► Table::new(&cfg) hands the mode to every Fork, the SeatPermit
//!          and the SpaghettiChannel; each wait goes through WaitMode::wait
//! ```
//!
//! ## Defaults
//! - `WaitMode::Forever`: every wait blocks until the resource frees up.

mod wait;

pub use wait::WaitMode;
