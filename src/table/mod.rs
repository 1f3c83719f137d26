//! The shared table: forks, the seat gate and the spaghetti queue.
//!
//! This is the only shared mutable state of a dinner. Everything an actor
//! owns (its state, its portion counter) lives in the actor itself.
//!
//! ## Layout
//! ```text
//!   F0 ─ P0 ─ F1 ─ P1 ─ F2 ─ P2 ─ F3 ─ P3 ─ F4 ─ P4 ─┐
//!   └────────────────────────────────────────────────┘
//!   philosopher i: left = Fork i, right = Fork (i + 1) mod N
//!
//!   SeatPermit (C seats) ─► at most C philosophers past the gate
//!   Cook ─► SpaghettiChannel (M portions) ─► philosophers
//! ```

mod channel;
mod fork;
mod seat;

use std::fmt;

pub use channel::SpaghettiChannel;
pub use fork::{Fork, ForkGuard};
pub use seat::{Seat, SeatPermit};

use crate::{config::Config, policies::WaitMode};

/// A resource a table wait can be for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// A seat permit.
    Seat,
    /// The fork with the given id.
    Fork(usize),
    /// The spaghetti queue.
    Spaghetti,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Seat => f.write_str("a seat"),
            Resource::Fork(id) => write!(f, "fork {id}"),
            Resource::Spaghetti => f.write_str("the spaghetti queue"),
        }
    }
}

/// Forks, seats and the queue, shared by all actors through `Arc<Table>`.
#[derive(Debug)]
pub struct Table {
    forks: Vec<Fork>,
    seats: SeatPermit,
    spaghetti: SpaghettiChannel,
}

impl Table {
    /// Lays the table described by `cfg`.
    pub fn new(cfg: &Config) -> Self {
        Self::with_layout(
            cfg.philosophers,
            cfg.seat_capacity(),
            cfg.queue_capacity,
            cfg.wait,
        )
    }

    /// Lays a table with explicit sizes.
    pub fn with_layout(forks: usize, seats: usize, queue_capacity: usize, wait: WaitMode) -> Self {
        Self {
            forks: (0..forks).map(|id| Fork::new(id, wait)).collect(),
            seats: SeatPermit::new(seats, wait),
            spaghetti: SpaghettiChannel::new(queue_capacity, wait),
        }
    }

    /// Number of places (forks) at the table.
    #[inline]
    pub fn places(&self) -> usize {
        self.forks.len()
    }

    /// All forks, indexed by id.
    #[inline]
    pub fn forks(&self) -> &[Fork] {
        &self.forks
    }

    /// Fork with id `philosopher`.
    pub fn left_fork(&self, philosopher: usize) -> &Fork {
        &self.forks[philosopher % self.forks.len()]
    }

    /// Fork with id `(philosopher + 1) mod N`.
    pub fn right_fork(&self, philosopher: usize) -> &Fork {
        &self.forks[(philosopher + 1) % self.forks.len()]
    }

    /// The seat gate.
    #[inline]
    pub fn seats(&self) -> &SeatPermit {
        &self.seats
    }

    /// The spaghetti queue.
    #[inline]
    pub fn spaghetti(&self) -> &SpaghettiChannel {
        &self.spaghetti
    }

    /// Current holder of every fork, indexed by fork id.
    pub fn fork_owners(&self) -> Vec<Option<usize>> {
        self.forks.iter().map(Fork::owner).collect()
    }
}
