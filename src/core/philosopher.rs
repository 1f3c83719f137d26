//! # Philosopher: one diner cycling through the table protocol.
//!
//! ## State machine
//! ```text
//! start delay (start_stagger × id)
//!   │
//!   ▼
//! Thinking ──► WaitTable ──► WaitLeftFork ──► [deadlock delay] ──► WaitRightFork
//!    ▲          seat            fork[id]                            fork[(id+1) % N]
//!    │                                                                    │
//!    │                                                                    ▼
//!    └── release right, left, seat ◄── Eating(dish) ◄── WaitSpaghetti (pop)
//! ```
//!
//! ## Rules
//! - Every transition is reported to the [`StateSink`] before the wait it names.
//! - The portion counter only grows and is reported after each meal.
//! - A bounded wait that expires unwinds the cycle: whatever was taken is
//!   released in reverse order, `wait_timed_out` is reported and the
//!   philosopher goes back to thinking.
//! - Cancellation is honored at every wait and every delay; held resources are
//!   released by drop.

use std::{sync::Arc, time::Duration};

use tokio_util::sync::CancellationToken;

use super::cancel::{Stop, guarded, pause};
use crate::{config::Config, sink::StateSink, state::PhilosopherState, table::Table};

/// One philosopher actor.
pub struct Philosopher {
    id: usize,
    name: String,
    table: Arc<Table>,
    sink: Arc<dyn StateSink>,
    start_delay: Duration,
    think: Duration,
    eat: Duration,
    deadlock_delay: Option<Duration>,
    portions: u64,
}

impl Philosopher {
    /// Creates philosopher `id` sitting at `table`.
    pub fn new(id: usize, table: Arc<Table>, sink: Arc<dyn StateSink>, cfg: &Config) -> Self {
        Self {
            id,
            name: format!("philosopher-{id}"),
            table,
            sink,
            start_delay: cfg.start_delay(id),
            think: cfg.think_time(id),
            eat: cfg.eat,
            deadlock_delay: cfg.deadlock_delay(),
            portions: 0,
        }
    }

    /// Philosopher id (position at the table).
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Actor name used in events (`philosopher-<id>`).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Portions eaten so far.
    #[inline]
    pub fn portions(&self) -> u64 {
        self.portions
    }

    /// Runs the philosopher until `token` is cancelled.
    ///
    /// Returns the number of portions eaten.
    pub async fn run(mut self, token: CancellationToken) -> u64 {
        if pause(&token, self.start_delay).await.is_err() {
            return self.portions;
        }

        loop {
            match self.dine(&token).await {
                Ok(()) => {}
                Err(Stop::Cancelled) => break,
                Err(Stop::Table(err)) if err.is_timeout() => {
                    self.sink.wait_timed_out(&self.name, &err);
                }
                Err(Stop::Table(err)) => {
                    tracing::warn!(philosopher = self.id, error = %err, "leaving the table");
                    break;
                }
            }
        }
        self.portions
    }

    /// One full cycle, from thinking to putting the forks back.
    async fn dine(&mut self, token: &CancellationToken) -> Result<(), Stop> {
        let table = Arc::clone(&self.table);

        self.report(PhilosopherState::Thinking);
        pause(token, self.think).await?;

        self.report(PhilosopherState::WaitTable);
        let seat = guarded(token, table.seats().acquire()).await?;

        self.report(PhilosopherState::WaitLeftFork);
        let left = guarded(token, table.left_fork(self.id).acquire(self.id)).await?;
        if let Some(delay) = self.deadlock_delay {
            pause(token, delay).await?;
        }

        self.report(PhilosopherState::WaitRightFork);
        let right = guarded(token, table.right_fork(self.id).acquire(self.id)).await?;

        self.report(PhilosopherState::WaitSpaghetti);
        let (dish, left_over) = guarded(token, table.spaghetti().pop_counted()).await?;
        self.sink.queue_occupancy(left_over);

        self.report(PhilosopherState::Eating(dish));
        pause(token, self.eat).await?;
        self.portions += 1;
        self.sink.portions(self.id, self.portions);

        right.release();
        left.release();
        seat.release();
        Ok(())
    }

    #[inline]
    fn report(&self, state: PhilosopherState) {
        self.sink.philosopher_state(self.id, state);
    }
}
