//! # Observable states of the diners and the cook.
//!
//! These are plain `Copy` values: actors own their current state and hand
//! copies to the [`StateSink`](crate::StateSink) on every transition.
//!
//! The display texts are the ones the status screen shows:
//! ```text
//! P1: thinking
//! P2: wait table access
//! P3: wait right fork
//! P4: eating pesto
//! Cook: cooking spaghetti vesuvio
//! ```

use std::fmt;

/// One of the four dishes the cook rotates through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Spaghetti {
    /// Spaghetti carbonara.
    Carbonara = 0,
    /// Spaghetti pesto.
    Pesto = 1,
    /// Spaghetti pomodoro.
    Pomodoro = 2,
    /// Spaghetti vesuvio.
    Vesuvio = 3,
}

impl Spaghetti {
    /// Number of distinct dishes.
    pub const COUNT: usize = 4;

    /// All dishes in rotation order.
    pub const ALL: [Spaghetti; Self::COUNT] = [
        Spaghetti::Carbonara,
        Spaghetti::Pesto,
        Spaghetti::Pomodoro,
        Spaghetti::Vesuvio,
    ];

    /// Position of the dish in the rotation (`0..COUNT`).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Dish at `index`, wrapping modulo [`Spaghetti::COUNT`].
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// The dish after this one in the rotation.
    #[inline]
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Lower-case sauce name.
    pub fn name(self) -> &'static str {
        match self {
            Spaghetti::Carbonara => "carbonara",
            Spaghetti::Pesto => "pesto",
            Spaghetti::Pomodoro => "pomodoro",
            Spaghetti::Vesuvio => "vesuvio",
        }
    }
}

impl fmt::Display for Spaghetti {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Philosopher state machine.
///
/// ```text
/// Thinking → WaitTable → WaitLeftFork → WaitRightFork → WaitSpaghetti → Eating → Thinking
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhilosopherState {
    /// Pure delay between meals.
    Thinking,
    /// Waiting for a seat permit.
    WaitTable,
    /// Seated, waiting for the fork with the philosopher's own id.
    WaitLeftFork,
    /// Holding the left fork, waiting for fork `(id + 1) mod N`.
    WaitRightFork,
    /// Holding both forks, waiting for a portion from the cook.
    WaitSpaghetti,
    /// Eating the given dish.
    Eating(Spaghetti),
}

impl PhilosopherState {
    /// True once the philosopher is past the seat gate (holds a seat permit).
    #[inline]
    pub fn is_seated(&self) -> bool {
        !matches!(self, PhilosopherState::Thinking | PhilosopherState::WaitTable)
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            PhilosopherState::Thinking => "thinking",
            PhilosopherState::WaitTable => "wait_table",
            PhilosopherState::WaitLeftFork => "wait_left_fork",
            PhilosopherState::WaitRightFork => "wait_right_fork",
            PhilosopherState::WaitSpaghetti => "wait_spaghetti",
            PhilosopherState::Eating(_) => "eating",
        }
    }
}

impl fmt::Display for PhilosopherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhilosopherState::Thinking => f.write_str("thinking"),
            PhilosopherState::WaitTable => f.write_str("wait table access"),
            PhilosopherState::WaitLeftFork => f.write_str("wait left fork"),
            PhilosopherState::WaitRightFork => f.write_str("wait right fork"),
            PhilosopherState::WaitSpaghetti => f.write_str("wait for spaghetti"),
            PhilosopherState::Eating(dish) => write!(f, "eating {dish}"),
        }
    }
}

/// What the cook is doing right now. Recomputed on every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CookState {
    /// Preparing the next portion.
    Cooking,
    /// Queue is short: a short nap before the next portion.
    Napping,
    /// Queue is well stocked: a long break.
    OnHoliday,
}

impl CookState {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            CookState::Cooking => "cooking",
            CookState::Napping => "napping",
            CookState::OnHoliday => "on_holiday",
        }
    }
}

impl fmt::Display for CookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookState::Cooking => f.write_str("cooking"),
            CookState::Napping => f.write_str("taking a short nap"),
            CookState::OnHoliday => f.write_str("on holiday"),
        }
    }
}
