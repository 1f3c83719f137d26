//! # Cook: the single producer of spaghetti.
//!
//! ## Cycle
//! ```text
//! loop {
//!   ├─► advance dish selector (mod 4), report Cooking(dish)
//!   ├─► sleep cook_time
//!   ├─► push dish (waits while the queue is full)
//!   ├─► report queue occupancy
//!   └─► occupancy <= nap_threshold ? Napping(nap_time) : OnHoliday(holiday_time)
//! }
//! ```
//!
//! The selector starts at Carbonara and advances before the first dish, so the
//! first portion served is Pesto.

use std::{sync::Arc, time::Duration};

use tokio_util::sync::CancellationToken;

use super::cancel::{Stop, guarded, pause};
use crate::{
    config::Config,
    sink::StateSink,
    state::{CookState, Spaghetti},
    table::Table,
};

/// Actor name of the cook in events.
pub(crate) const COOK: &str = "cook";

/// The spaghetti cook.
pub struct Cook {
    table: Arc<Table>,
    sink: Arc<dyn StateSink>,
    cook_time: Duration,
    nap_time: Duration,
    holiday_time: Duration,
    nap_threshold: usize,
    selector: Spaghetti,
    served: u64,
}

impl Cook {
    /// Creates the cook for `table`.
    pub fn new(table: Arc<Table>, sink: Arc<dyn StateSink>, cfg: &Config) -> Self {
        Self {
            table,
            sink,
            cook_time: cfg.cook_time,
            nap_time: cfg.nap_time,
            holiday_time: cfg.holiday_time,
            nap_threshold: cfg.nap_threshold,
            selector: Spaghetti::Carbonara,
            served: 0,
        }
    }

    /// Break taken after a push that left `occupancy` portions in the queue.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// use std::time::Duration;
    /// use symposium::{Config, Cook, CookState, StateSink, Table};
    /// # struct Mute;
    /// # impl StateSink for Mute {
    /// #     fn philosopher_state(&self, _: usize, _: symposium::PhilosopherState) {}
    /// #     fn portions(&self, _: usize, _: u64) {}
    /// #     fn cook_state(&self, _: CookState, _: symposium::Spaghetti) {}
    /// #     fn queue_occupancy(&self, _: usize) {}
    /// # }
    ///
    /// let cfg = Config::default();
    /// let cook = Cook::new(Arc::new(Table::new(&cfg)), Arc::new(Mute), &cfg);
    /// assert_eq!(cook.next_break(4), (CookState::Napping, Duration::from_secs(1)));
    /// assert_eq!(cook.next_break(5), (CookState::OnHoliday, Duration::from_secs(15)));
    /// ```
    pub fn next_break(&self, occupancy: usize) -> (CookState, Duration) {
        if occupancy <= self.nap_threshold {
            (CookState::Napping, self.nap_time)
        } else {
            (CookState::OnHoliday, self.holiday_time)
        }
    }

    /// Portions pushed so far.
    #[inline]
    pub fn served(&self) -> u64 {
        self.served
    }

    /// Runs the cook until `token` is cancelled.
    ///
    /// Returns the number of portions pushed.
    pub async fn run(mut self, token: CancellationToken) -> u64 {
        loop {
            match self.shift(&token).await {
                Ok(()) => {}
                Err(Stop::Cancelled) => break,
                Err(Stop::Table(err)) => {
                    tracing::warn!(actor = COOK, error = %err, "cook stopped");
                    break;
                }
            }
        }
        self.served
    }

    /// Cooks one dish, serves it and takes a break.
    async fn shift(&mut self, token: &CancellationToken) -> Result<(), Stop> {
        self.selector = self.selector.next();
        let dish = self.selector;
        self.sink.cook_state(CookState::Cooking, dish);
        pause(token, self.cook_time).await?;

        self.serve(token, dish).await?;
        self.served += 1;

        let occupancy = self.table.spaghetti().occupancy();
        self.sink.queue_occupancy(occupancy);

        let (state, rest) = self.next_break(occupancy);
        self.sink.cook_state(state, dish);
        pause(token, rest).await
    }

    /// Pushes `dish`, retrying the same portion after every expired wait.
    async fn serve(&self, token: &CancellationToken, dish: Spaghetti) -> Result<(), Stop> {
        loop {
            match guarded(token, self.table.spaghetti().push(dish)).await {
                Ok(()) => return Ok(()),
                Err(Stop::Table(err)) if err.is_timeout() => {
                    self.sink.wait_timed_out(COOK, &err);
                }
                Err(stop) => return Err(stop),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::WaitMode;
    use crate::sink::testing::{Recorder, Report};
    use crate::table::Resource;

    fn quick() -> Config {
        Config {
            cook_time: Duration::from_millis(10),
            nap_time: Duration::from_millis(10),
            holiday_time: Duration::from_millis(150),
            ..Config::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_dish_is_pesto_then_rotates() {
        let cfg = quick();
        let table = Arc::new(Table::new(&cfg));
        let token = CancellationToken::new();
        let cook = Cook::new(Arc::clone(&table), Arc::new(Recorder::default()), &cfg);
        let task = tokio::spawn(cook.run(token.clone()));

        // four rounds of cook 10ms + nap 10ms
        tokio::time::sleep(Duration::from_millis(75)).await;
        token.cancel();
        assert_eq!(task.await.unwrap(), 4);

        let mut served = Vec::new();
        for _ in 0..4 {
            served.push(table.spaghetti().pop().await.unwrap());
        }
        assert_eq!(
            served,
            vec![
                Spaghetti::Pesto,
                Spaghetti::Pomodoro,
                Spaghetti::Vesuvio,
                Spaghetti::Carbonara
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn naps_until_the_backlog_grows_then_goes_on_holiday() {
        let cfg = quick();
        let table = Arc::new(Table::new(&cfg));
        let rec = Arc::new(Recorder::default());
        let token = CancellationToken::new();
        let cook = Cook::new(Arc::clone(&table), rec.clone(), &cfg);
        let task = tokio::spawn(cook.run(token.clone()));

        // pushes every 20ms from 10ms; the fifth (90ms) leaves 5 queued
        tokio::time::sleep(Duration::from_millis(120)).await;
        token.cancel();
        task.await.unwrap();

        let breaks: Vec<CookState> = rec
            .reports()
            .into_iter()
            .filter_map(|r| match r {
                Report::Cook(state, _) if state != CookState::Cooking => Some(state),
                _ => None,
            })
            .collect();
        assert_eq!(
            breaks,
            vec![
                CookState::Napping,
                CookState::Napping,
                CookState::Napping,
                CookState::Napping,
                CookState::OnHoliday
            ]
        );

        let occupancy: Vec<usize> = rec
            .reports()
            .into_iter()
            .filter_map(|r| match r {
                Report::Occupancy(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(occupancy, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test(start_paused = true)]
    async fn full_queue_blocks_the_cook() {
        let cfg = Config {
            queue_capacity: 2,
            holiday_time: Duration::from_millis(10),
            ..quick()
        };
        let table = Arc::new(Table::new(&cfg));
        let token = CancellationToken::new();
        let cook = Cook::new(Arc::clone(&table), Arc::new(Recorder::default()), &cfg);
        let task = tokio::spawn(cook.run(token.clone()));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(table.spaghetti().occupancy(), 2);

        token.cancel();
        assert_eq!(task.await.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_push_is_reported_and_retried() {
        let cfg = Config {
            queue_capacity: 1,
            wait: WaitMode::Bounded(Duration::from_millis(50)),
            holiday_time: Duration::from_millis(10),
            ..quick()
        };
        let table = Arc::new(Table::new(&cfg));
        let rec = Arc::new(Recorder::default());
        let token = CancellationToken::new();
        let cook = Cook::new(Arc::clone(&table), rec.clone(), &cfg);
        let task = tokio::spawn(cook.run(token.clone()));

        // first push at 10ms, second dish ready at 30ms, push gives up at 80ms
        tokio::time::sleep(Duration::from_millis(90)).await;
        assert_eq!(table.spaghetti().pop().await.unwrap(), Spaghetti::Pesto);
        // the retried push now goes through
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(table.spaghetti().pop().await.unwrap(), Spaghetti::Pomodoro);

        token.cancel();
        task.await.unwrap();
        assert!(
            rec.reports()
                .contains(&Report::TimedOut(COOK.into(), Resource::Spaghetti))
        );
    }
}
