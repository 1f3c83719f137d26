//! Error types used by the table primitives, the configuration and the runtime.
//!
//! - [`TableError`]: a wait on a fork, the seat gate or the spaghetti queue did not succeed.
//! - [`ConfigError`]: a [`Config`](crate::Config) that cannot describe a working table.
//! - [`RuntimeError`]: failures of the dinner runtime itself (shutdown).
//!
//! All types provide `as_label` for logs.

use std::time::Duration;
use thiserror::Error;

use crate::table::Resource;

/// # Errors produced by a wait on a table resource.
///
/// Under the default [`WaitMode::Forever`](crate::WaitMode::Forever) the only
/// way to see one of these is a closed primitive; bounded waits add
/// [`TableError::WaitTimeout`].
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A bounded wait expired before the resource became available.
    #[error("gave up on {resource} after {waited:?}")]
    WaitTimeout {
        /// The resource that was being waited for.
        resource: Resource,
        /// The configured wait limit.
        waited: Duration,
    },

    /// The underlying primitive was closed while waiting.
    #[error("{resource} is closed")]
    Closed {
        /// The closed resource.
        resource: Resource,
    },
}

impl TableError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use symposium::{Resource, TableError};
    ///
    /// let err = TableError::WaitTimeout { resource: Resource::Seat, waited: Duration::from_millis(5) };
    /// assert_eq!(err.as_label(), "table_wait_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TableError::WaitTimeout { .. } => "table_wait_timeout",
            TableError::Closed { .. } => "table_closed",
        }
    }

    /// The resource the failed wait was for.
    pub fn resource(&self) -> Resource {
        match self {
            TableError::WaitTimeout { resource, .. } | TableError::Closed { resource } => {
                *resource
            }
        }
    }

    /// True for an expired bounded wait; the actor may back off and try again.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TableError::WaitTimeout { .. })
    }
}

/// # Errors produced by [`Config::validate`](crate::Config::validate).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Fewer philosophers than the table layout needs.
    ///
    /// Two are needed for a ring of distinct forks; a limited table needs three
    /// so that `N - 2` seats remain.
    #[error("{philosophers} philosophers is too few, need at least {min}")]
    TooFewPhilosophers {
        /// Configured number of philosophers.
        philosophers: usize,
        /// Minimum for the configured table access mode.
        min: usize,
    },

    /// The spaghetti queue must hold at least one portion.
    #[error("spaghetti queue capacity must be at least 1")]
    ZeroQueueCapacity,

    /// A bounded wait mode with a zero limit would fail every wait.
    #[error("bounded wait limit must be greater than zero")]
    ZeroWaitLimit,
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::TooFewPhilosophers { .. } => "config_too_few_philosophers",
            ConfigError::ZeroQueueCapacity => "config_zero_queue_capacity",
            ConfigError::ZeroWaitLimit => "config_zero_wait_limit",
        }
    }
}

/// # Errors produced by the dinner runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; some actors were still running.
    #[error("shutdown timeout {grace:?} exceeded; stuck: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of actors that did not stop in time.
        stuck: Vec<String>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck actors={stuck:?}")
            }
        }
    }
}
