//! # SeatPermit: counting admission gate in front of the forks.
//!
//! With `C = N - 2` seats it is impossible for all `N` philosophers to hold
//! exactly one fork each, which is the circular-wait precondition for the
//! left-then-right acquisition order. The gate is what prevents deadlock;
//! fork ordering is deliberately left cyclic.
//!
//! ## Rules
//! - `acquire()` blocks until a seat is free, then takes it
//! - a seat is returned when its [`Seat`] guard is released or dropped
//! - `available()` is always in `[0, capacity]`; a guard cannot be returned twice

use tokio::sync::{Semaphore, SemaphorePermit};

use crate::{error::TableError, policies::WaitMode, table::Resource};

/// Counting gate with a fixed number of seats.
#[derive(Debug)]
pub struct SeatPermit {
    seats: Semaphore,
    capacity: usize,
    wait: WaitMode,
}

impl SeatPermit {
    /// Creates a gate with `capacity` free seats.
    pub fn new(capacity: usize, wait: WaitMode) -> Self {
        Self {
            seats: Semaphore::new(capacity),
            capacity,
            wait,
        }
    }

    /// Waits for a free seat and takes it.
    pub async fn acquire(&self) -> Result<Seat<'_>, TableError> {
        let permit = self
            .wait
            .wait(Resource::Seat, async { self.seats.acquire().await.ok() })
            .await?;
        Ok(Seat { _permit: permit })
    }

    /// Total number of seats.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Seats currently free.
    #[inline]
    pub fn available(&self) -> usize {
        self.seats.available_permits()
    }

    /// Seats currently taken.
    #[inline]
    pub fn in_use(&self) -> usize {
        self.capacity - self.available()
    }
}

/// A taken seat. Dropping it frees the seat and wakes at most one waiter.
#[must_use = "the seat is freed as soon as the guard is dropped"]
pub struct Seat<'a> {
    _permit: SemaphorePermit<'a>,
}

impl Seat<'_> {
    /// Leaves the table.
    pub fn release(self) {}
}
