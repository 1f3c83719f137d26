//! # StateSink: where actors report what they are doing.
//!
//! Every state transition of a philosopher or the cook is reported through
//! this trait. The calls are synchronous and may take a bounded amount of
//! time; implementations serialize concurrent calls themselves.
//!
//! The runtime's sink is the [`Bus`](crate::Bus): each call becomes one
//! [`Event`](crate::Event) that subscribers (logging, the [`TableView`](crate::TableView))
//! consume. Tests usually plug in a recorder instead.

use crate::{
    error::TableError,
    state::{CookState, PhilosopherState, Spaghetti},
};

/// Receiver of state, portion and occupancy reports.
pub trait StateSink: Send + Sync + 'static {
    /// Philosopher `id` entered `state`.
    fn philosopher_state(&self, id: usize, state: PhilosopherState);

    /// Philosopher `id` has now eaten `count` portions in total.
    fn portions(&self, id: usize, count: u64);

    /// The cook entered `state` while working on `spaghetti`.
    fn cook_state(&self, state: CookState, spaghetti: Spaghetti);

    /// The queue now holds `count` portions.
    fn queue_occupancy(&self, count: usize);

    /// A bounded wait of `actor` expired. Ignored by default.
    fn wait_timed_out(&self, actor: &str, err: &TableError) {
        let _ = (actor, err);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;
    use crate::table::Resource;

    /// One recorded sink call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Report {
        State(usize, PhilosopherState),
        Portions(usize, u64),
        Cook(CookState, Spaghetti),
        Occupancy(usize),
        TimedOut(String, Resource),
    }

    /// Sink that keeps every call in order.
    #[derive(Default)]
    pub(crate) struct Recorder {
        reports: Mutex<Vec<Report>>,
    }

    impl Recorder {
        pub(crate) fn reports(&self) -> Vec<Report> {
            self.reports.lock().unwrap().clone()
        }

        fn push(&self, report: Report) {
            self.reports.lock().unwrap().push(report);
        }
    }

    impl StateSink for Recorder {
        fn philosopher_state(&self, id: usize, state: PhilosopherState) {
            self.push(Report::State(id, state));
        }

        fn portions(&self, id: usize, count: u64) {
            self.push(Report::Portions(id, count));
        }

        fn cook_state(&self, state: CookState, spaghetti: Spaghetti) {
            self.push(Report::Cook(state, spaghetti));
        }

        fn queue_occupancy(&self, count: usize) {
            self.push(Report::Occupancy(count));
        }

        fn wait_timed_out(&self, actor: &str, err: &TableError) {
            self.push(Report::TimedOut(actor.to_string(), err.resource()));
        }
    }
}
