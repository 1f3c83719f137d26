//! # TableView: the dinner's status screen.
//!
//! Keeps the latest observed state of every philosopher, the cook and the
//! spaghetti queue, plus which actors are currently running. The dinner's
//! listener feeds it every event; [`TableView::snapshot`] renders the screen.
//!
//! ## Architecture
//! ```text
//! Philosopher/Cook ──► Bus ──► subscriber_listener() ──► TableView::update()
//!                                                              │
//!                                                              ▼
//!                                         actors: HashMap<name, {seq, alive}>
//!                                         rows:   Vec<{state, portions}>
//!                                         cook, occupancy
//! ```
//!
//! ## Rules
//! - Events with `seq <= last_seq` of their actor are **rejected** (stale).
//! - `ActorStarting` / `ActorStopped` flip the alive flag.
//! - Portion counts only move forward.
//! - Reads (`snapshot`, `alive_actors`) are **eventually consistent**.
//!
//! ## Screen
//! ```text
//! The Dining Philosophers
//! Who  Action                       Portions
//! ------------------------------------------
//! P1:  thinking                            3
//! P2:  eating pesto                        4
//! P3:  wait right fork                     2
//! P4:  wait table access                   3
//! P5:  wait for spaghetti                  3
//! Cook cooking spaghetti vesuvio
//! Spaghetti in queue: [ooo.......] 3/10
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::events::{Event, EventKind};
use crate::state::{CookState, PhilosopherState, Spaghetti};

/// Per-actor state for ordering validation.
#[derive(Debug, Clone)]
struct ActorState {
    /// Last seen sequence number for this actor.
    last_seq: u64,
    /// Current status (true = running, false = stopped).
    alive: bool,
}

/// One line of the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhilosopherRow {
    /// Last reported state; `None` until the philosopher reports.
    pub state: Option<PhilosopherState>,
    /// Lifetime portions.
    pub portions: u64,
}

#[derive(Debug, Default)]
struct Screen {
    actors: HashMap<Arc<str>, ActorState>,
    rows: Vec<PhilosopherRow>,
    cook: Option<(CookState, Spaghetti)>,
    occupancy: usize,
    occupancy_seq: u64,
}

/// Point-in-time copy of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    /// One row per philosopher, by id.
    pub philosophers: Vec<PhilosopherRow>,
    /// Last cook state and the dish of that cycle.
    pub cook: Option<(CookState, Spaghetti)>,
    /// Portions waiting in the queue.
    pub occupancy: usize,
    /// Queue capacity.
    pub queue_capacity: usize,
}

impl TableSnapshot {
    /// Sum of all portion counters.
    pub fn total_portions(&self) -> u64 {
        self.philosophers.iter().map(|r| r.portions).sum()
    }

    /// Philosophers whose last state is past the seat gate.
    pub fn seated(&self) -> usize {
        self.philosophers
            .iter()
            .filter(|r| r.state.is_some_and(|s| s.is_seated()))
            .count()
    }
}

impl fmt::Display for TableSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The Dining Philosophers")?;
        writeln!(f, "{:<4} {:<28} {:>8}", "Who", "Action", "Portions")?;
        writeln!(f, "{}", "-".repeat(42))?;
        for (id, row) in self.philosophers.iter().enumerate() {
            let who = format!("P{}:", id + 1);
            let action = row.state.map(|s| s.to_string()).unwrap_or_default();
            writeln!(f, "{who:<4} {action:<28} {:>8}", row.portions)?;
        }
        match self.cook {
            Some((CookState::Cooking, dish)) => writeln!(f, "Cook cooking spaghetti {dish}")?,
            Some((state, _)) => writeln!(f, "Cook {state}")?,
            None => writeln!(f, "Cook")?,
        }
        let filled = self.occupancy.min(self.queue_capacity);
        write!(
            f,
            "Spaghetti in queue: [{}{}] {}/{}",
            "o".repeat(filled),
            ".".repeat(self.queue_capacity - filled),
            self.occupancy,
            self.queue_capacity
        )
    }
}

/// Thread-safe status screen of one dinner.
///
/// ### Responsibilities
/// - Renders the screen from the latest reports
/// - Provides the list of running actors for graceful shutdown (stuck actor detection)
/// - Rejects stale events using sequence numbers
pub struct TableView {
    queue_capacity: usize,
    screen: RwLock<Screen>,
}

impl TableView {
    /// Creates an empty view for `philosophers` rows and a queue of `queue_capacity`.
    pub fn new(philosophers: usize, queue_capacity: usize) -> Self {
        Self {
            queue_capacity,
            screen: RwLock::new(Screen {
                rows: vec![PhilosopherRow::default(); philosophers],
                ..Screen::default()
            }),
        }
    }

    /// Applies an event if it is newer than the last one seen for its actor.
    ///
    /// Returns `true` when the screen or an alive flag changed.
    ///
    /// ### Ordering guarantees
    /// ```text
    /// update(ActorStopped, seq=100)   → alive=false, last_seq=100
    /// update(ActorStarting, seq=99)   → rejected (stale)
    /// ```
    pub async fn update(&self, ev: &Event) -> bool {
        let mut guard = self.screen.write().await;
        let screen = &mut *guard;

        if ev.kind == EventKind::QueueOccupancy {
            let Some(count) = ev.occupancy else {
                return false;
            };
            if ev.seq <= screen.occupancy_seq {
                return false;
            }
            screen.occupancy_seq = ev.seq;
            screen.occupancy = count;
            return true;
        }

        let Some(name) = ev.actor.as_ref() else {
            return false;
        };
        if ev.is_subscriber_event() {
            return false;
        }
        let entry = screen
            .actors
            .entry(Arc::clone(name))
            .or_insert(ActorState {
                last_seq: 0,
                alive: false,
            });
        if ev.seq <= entry.last_seq {
            return false;
        }
        entry.last_seq = ev.seq;

        match ev.kind {
            EventKind::ActorStarting => {
                entry.alive = true;
                true
            }
            EventKind::ActorStopped => {
                entry.alive = false;
                true
            }
            EventKind::PhilosopherState => match (ev.philosopher, ev.state) {
                (Some(id), Some(state)) => match screen.rows.get_mut(id) {
                    Some(row) => {
                        row.state = Some(state);
                        true
                    }
                    None => false,
                },
                _ => false,
            },
            EventKind::Portions => match (ev.philosopher, ev.portions) {
                (Some(id), Some(count)) => match screen.rows.get_mut(id) {
                    Some(row) if count > row.portions => {
                        row.portions = count;
                        true
                    }
                    _ => false,
                },
                _ => false,
            },
            EventKind::CookState => match (ev.cook, ev.spaghetti) {
                (Some(state), Some(dish)) => {
                    screen.cook = Some((state, dish));
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Copies the current screen.
    pub async fn snapshot(&self) -> TableSnapshot {
        let screen = self.screen.read().await;
        TableSnapshot {
            philosophers: screen.rows.clone(),
            cook: screen.cook,
            occupancy: screen.occupancy,
            queue_capacity: self.queue_capacity,
        }
    }

    /// Returns the sorted names of actors that started and have not stopped.
    ///
    /// Used by [`Running::shutdown`](crate::Running::shutdown) to name stuck
    /// actors when the grace period runs out.
    pub async fn alive_actors(&self) -> Vec<String> {
        let screen = self.screen.read().await;
        let mut alive: Vec<String> = screen
            .actors
            .iter()
            .filter(|(_, st)| st.alive)
            .map(|(name, _)| name.to_string())
            .collect();
        alive.sort_unstable();
        alive
    }
}
