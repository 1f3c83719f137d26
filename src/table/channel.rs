//! # SpaghettiChannel: bounded FIFO between the cook and the philosophers.
//!
//! A bounded [`mpsc`] channel. The table keeps the sending half for the cook
//! and puts the receiving half behind a [`Mutex`] so that any philosopher can
//! take the next portion.
//!
//! ## Rules
//! - `push` blocks while `capacity` portions are queued
//! - `pop` blocks while the queue is empty and returns the oldest portion
//! - nothing is duplicated or dropped; pop order equals push order
//! - `occupancy()` never blocks and is always in `[0, capacity]`
//! - [`SpaghettiChannel::pop_counted`] reports the exact length left behind
//!   by the pop, read while the receiver is still locked

use tokio::sync::{Mutex, mpsc};

use crate::{error::TableError, policies::WaitMode, state::Spaghetti, table::Resource};

/// Bounded queue of cooked portions.
#[derive(Debug)]
pub struct SpaghettiChannel {
    tx: mpsc::Sender<Spaghetti>,
    rx: Mutex<mpsc::Receiver<Spaghetti>>,
    wait: WaitMode,
}

impl SpaghettiChannel {
    /// Creates an empty queue holding at most `capacity` portions (min 1).
    pub fn new(capacity: usize, wait: WaitMode) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self {
            tx,
            rx: Mutex::new(rx),
            wait,
        }
    }

    /// Appends a portion, waiting while the queue is full.
    ///
    /// On a bounded-wait timeout the portion is not queued; the caller may
    /// push it again.
    pub async fn push(&self, item: Spaghetti) -> Result<(), TableError> {
        self.wait
            .wait(Resource::Spaghetti, async {
                self.tx.send(item).await.ok()
            })
            .await
    }

    /// Removes and returns the oldest portion, waiting while the queue is empty.
    pub async fn pop(&self) -> Result<Spaghetti, TableError> {
        self.pop_counted().await.map(|(item, _)| item)
    }

    /// Like [`pop`](Self::pop), and also returns how many portions are left.
    ///
    /// The count is taken under the receiver lock right after the portion is
    /// removed, so a push that was blocked on the full queue is not counted
    /// until its portion actually lands.
    pub async fn pop_counted(&self) -> Result<(Spaghetti, usize), TableError> {
        self.wait
            .wait(Resource::Spaghetti, async {
                let mut rx = self.rx.lock().await;
                let item = rx.recv().await?;
                Some((item, rx.len()))
            })
            .await
    }

    /// Portions currently queued, without blocking.
    ///
    /// Reads the receiver length when the receiver is free. While a consumer
    /// holds it, falls back to the slots taken on the sending side, which
    /// also counts a slot just handed to a blocked push. With a single
    /// producer that has finished its push the two agree.
    pub fn occupancy(&self) -> usize {
        match self.rx.try_lock() {
            Ok(rx) => rx.len(),
            Err(_) => self.tx.max_capacity() - self.tx.capacity(),
        }
    }

    /// Maximum number of queued portions.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::sleep;

    use super::*;
    use crate::state::Spaghetti::*;

    #[tokio::test]
    async fn portions_come_out_in_push_order() {
        let queue = SpaghettiChannel::new(10, WaitMode::Forever);
        let dishes = [Carbonara, Pesto, Pomodoro, Vesuvio, Carbonara];
        for dish in dishes {
            queue.push(dish).await.unwrap();
        }
        assert_eq!(queue.occupancy(), 5);

        let mut served = Vec::new();
        for _ in 0..dishes.len() {
            served.push(queue.pop().await.unwrap());
        }
        assert_eq!(served, dishes);
        assert_eq!(queue.occupancy(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn third_push_waits_for_a_pop() {
        let queue = Arc::new(SpaghettiChannel::new(2, WaitMode::Forever));
        queue.push(Pesto).await.unwrap();
        queue.push(Pomodoro).await.unwrap();

        let third = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.push(Vesuvio).await })
        };
        sleep(Duration::from_millis(10)).await;
        assert!(!third.is_finished());
        assert_eq!(queue.occupancy(), 2);

        assert_eq!(queue.pop().await.unwrap(), Pesto);
        third.await.unwrap().unwrap();
        assert_eq!(queue.occupancy(), 2);
        assert_eq!(queue.pop().await.unwrap(), Pomodoro);
        assert_eq!(queue.pop().await.unwrap(), Vesuvio);
    }

    #[tokio::test(start_paused = true)]
    async fn pop_from_a_full_queue_reports_what_is_left() {
        let queue = Arc::new(SpaghettiChannel::new(2, WaitMode::Forever));
        queue.push(Pesto).await.unwrap();
        queue.push(Pomodoro).await.unwrap();

        let blocked = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.push(Vesuvio).await })
        };
        sleep(Duration::from_millis(10)).await;
        assert!(!blocked.is_finished());

        // the freed slot goes to the blocked push, but its portion is not queued yet
        assert_eq!(queue.pop_counted().await.unwrap(), (Pesto, 1));
        assert_eq!(queue.occupancy(), 1);

        blocked.await.unwrap().unwrap();
        assert_eq!(queue.occupancy(), 2);
        assert_eq!(queue.pop_counted().await.unwrap(), (Pomodoro, 1));
        assert_eq!(queue.pop_counted().await.unwrap(), (Vesuvio, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_queue_blocks_consumer_until_push() {
        let queue = Arc::new(SpaghettiChannel::new(3, WaitMode::Forever));
        let diner = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.pop().await })
        };
        sleep(Duration::from_millis(10)).await;
        assert!(!diner.is_finished());

        queue.push(Carbonara).await.unwrap();
        assert_eq!(diner.await.unwrap(), Ok(Carbonara));
        assert_eq!(queue.occupancy(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_pop_on_empty_queue_times_out() {
        let queue = SpaghettiChannel::new(1, WaitMode::Bounded(Duration::from_millis(20)));
        let err = queue.pop().await.unwrap_err();
        assert_eq!(err.resource(), Resource::Spaghetti);
        assert!(err.is_timeout());

        queue.push(Pesto).await.unwrap();
        let err = queue.push(Pomodoro).await.unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(queue.occupancy(), 1);
    }
}
