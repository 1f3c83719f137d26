//! # Simulation configuration.
//!
//! Provides [`Config`], the centralized settings for one dinner: table size,
//! queue size, every delay of the philosophers and the cook, the dangerous
//! toggles and the runtime knobs.
//!
//! [`Config::default`] reproduces the classic exercise exactly: five
//! philosophers, three seats, ten queued portions, 5s thinking and eating.
//!
//! ## Sentinel values
//! - `limit_table_access = false` → seat capacity `N` (gate effectively off)
//! - `deadlock_delay = 0s` → no pause between taking the left and right fork
//!
//! ## Dangerous configuration
//! ```rust
//! use std::time::Duration;
//! use symposium::Config;
//!
//! let mut cfg = Config::default();
//! cfg.limit_table_access = false;
//! cfg.deadlock_delay = Duration::from_millis(50);
//! assert_eq!(cfg.seat_capacity(), cfg.philosophers);
//! assert_eq!(cfg.deadlock_delay(), Some(Duration::from_millis(50)));
//! ```

use std::time::Duration;

use crate::{error::ConfigError, policies::WaitMode};

/// Global configuration of a dinner.
///
/// ## Field semantics
/// - `philosophers`: number of diners and forks (`N`)
/// - `limit_table_access`: seat gate with `N - 2` seats (`false` = `N` seats)
/// - `queue_capacity`: spaghetti portions the queue can hold (`M`)
/// - `think_base` / `think_stagger`: thinking lasts `think_base + id × think_stagger`
/// - `start_stagger`: philosopher `id` starts after `id × start_stagger`
/// - `eat`: eating duration
/// - `deadlock_delay`: pause while holding only the left fork (`0s` = off)
/// - `cook_time` / `nap_time` / `holiday_time`: cook pacing
/// - `nap_threshold`: the cook naps while occupancy `<=` threshold, else goes on holiday
/// - `wait`: blocking mode of every primitive
/// - `bus_capacity`: event bus ring buffer size (min 1)
/// - `grace`: how long shutdown waits for actors to stop
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of philosophers, and therefore forks.
    pub philosophers: usize,

    /// Limit concurrent diners to `philosophers - 2`.
    ///
    /// Turning this off removes the structural deadlock guarantee.
    pub limit_table_access: bool,

    /// Capacity of the spaghetti queue.
    pub queue_capacity: usize,

    /// Base thinking time.
    pub think_base: Duration,

    /// Extra thinking time per philosopher id.
    pub think_stagger: Duration,

    /// Start-up delay per philosopher id.
    pub start_stagger: Duration,

    /// Eating time.
    pub eat: Duration,

    /// Pause between taking the left fork and reaching for the right one.
    ///
    /// - `Duration::ZERO` = no pause
    /// - `> 0` = widens the window in which every philosopher holds exactly one fork
    pub deadlock_delay: Duration,

    /// Time the cook needs for one portion.
    pub cook_time: Duration,

    /// Cook's break when the queue is short.
    pub nap_time: Duration,

    /// Cook's break when the queue is well stocked.
    pub holiday_time: Duration,

    /// Occupancy at or below which the cook only naps.
    pub nap_threshold: usize,

    /// Blocking mode for forks, seats and the queue.
    pub wait: WaitMode,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,

    /// Maximum time to wait for actors to stop on shutdown.
    pub grace: Duration,
}

impl Config {
    /// Number of seat permits: `N - 2` with limited access, `N` without.
    #[inline]
    pub fn seat_capacity(&self) -> usize {
        if self.limit_table_access {
            self.philosophers.saturating_sub(2)
        } else {
            self.philosophers
        }
    }

    /// Returns the deadlock delay as an `Option`.
    ///
    /// - `None` → no pause between the forks
    /// - `Some(d)` → pause `d` while holding the left fork
    #[inline]
    pub fn deadlock_delay(&self) -> Option<Duration> {
        if self.deadlock_delay == Duration::ZERO {
            None
        } else {
            Some(self.deadlock_delay)
        }
    }

    /// Thinking time of philosopher `id`.
    #[inline]
    pub fn think_time(&self, id: usize) -> Duration {
        self.think_base + stagger(self.think_stagger, id)
    }

    /// Start-up delay of philosopher `id`.
    #[inline]
    pub fn start_delay(&self, id: usize) -> Duration {
        stagger(self.start_stagger, id)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Checks that the configuration describes a table that can run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = if self.limit_table_access { 3 } else { 2 };
        if self.philosophers < min {
            return Err(ConfigError::TooFewPhilosophers {
                philosophers: self.philosophers,
                min,
            });
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        if self.wait.limit() == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroWaitLimit);
        }
        Ok(())
    }
}

fn stagger(step: Duration, id: usize) -> Duration {
    step.saturating_mul(u32::try_from(id).unwrap_or(u32::MAX))
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - 5 philosophers, limited table (3 seats), queue of 10
    /// - thinking `5s + id × 100ms`, start `id × 10ms`, eating `5s`
    /// - no deadlock delay
    /// - cook `1s`, nap `1s`, holiday `15s`, nap threshold `4`
    /// - `WaitMode::Forever`, bus capacity `1024`, grace `5s`
    fn default() -> Self {
        Self {
            philosophers: 5,
            limit_table_access: true,
            queue_capacity: 10,
            think_base: Duration::from_millis(5000),
            think_stagger: Duration::from_millis(100),
            start_stagger: Duration::from_millis(10),
            eat: Duration::from_millis(5000),
            deadlock_delay: Duration::ZERO,
            cook_time: Duration::from_millis(1000),
            nap_time: Duration::from_millis(1000),
            holiday_time: Duration::from_millis(15000),
            nap_threshold: 4,
            wait: WaitMode::Forever,
            bus_capacity: 1024,
            grace: Duration::from_secs(5),
        }
    }
}
