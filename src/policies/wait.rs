//! # Wait policy for table primitives.
//!
//! [`WaitMode`] decides how long a fork, seat or queue wait may block.
//!
//! - [`WaitMode::Forever`]: unbounded blocking (default, the classic demo).
//! - [`WaitMode::Bounded`]: give up after a fixed limit with
//!   [`TableError::WaitTimeout`].
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use symposium::WaitMode;
//!
//! assert_eq!(WaitMode::default(), WaitMode::Forever);
//! assert_eq!(WaitMode::Forever.limit(), None);
//! assert_eq!(
//!     WaitMode::Bounded(Duration::from_millis(200)).limit(),
//!     Some(Duration::from_millis(200))
//! );
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time;

use crate::{error::TableError, table::Resource};

/// How long a primitive may block its caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WaitMode {
    /// Block until the resource is available, however long that takes.
    #[default]
    Forever,
    /// Block at most for the given duration.
    Bounded(Duration),
}

impl WaitMode {
    /// Returns the wait limit as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(d)` → every wait fails after `d`
    #[inline]
    pub fn limit(&self) -> Option<Duration> {
        match self {
            WaitMode::Forever => None,
            WaitMode::Bounded(limit) => Some(*limit),
        }
    }

    /// Drives one wait on `resource` under this mode.
    ///
    /// `fut` resolves to `None` when the primitive behind it has been closed.
    /// The future is dropped on timeout, so it must be cancel-safe.
    pub(crate) async fn wait<F, T>(self, resource: Resource, fut: F) -> Result<T, TableError>
    where
        F: Future<Output = Option<T>>,
    {
        let res = match self {
            WaitMode::Forever => fut.await,
            WaitMode::Bounded(limit) => match time::timeout(limit, fut).await {
                Ok(res) => res,
                Err(_elapsed) => {
                    return Err(TableError::WaitTimeout {
                        resource,
                        waited: limit,
                    });
                }
            },
        };
        res.ok_or(TableError::Closed { resource })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn bounded_wait_times_out_on_pending_future() {
        let mode = WaitMode::Bounded(Duration::from_millis(50));
        let err = mode
            .wait(Resource::Seat, std::future::pending::<Option<()>>())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TableError::WaitTimeout {
                resource: Resource::Seat,
                waited: Duration::from_millis(50)
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn ready_value_passes_through() {
        let got = WaitMode::Forever
            .wait(Resource::Fork(1), async { Some(7) })
            .await;
        assert_eq!(got, Ok(7));

        let got = WaitMode::Bounded(Duration::from_secs(1))
            .wait(Resource::Fork(1), async { Some(8) })
            .await;
        assert_eq!(got, Ok(8));
    }

    #[tokio::test]
    async fn closed_primitive_maps_to_closed() {
        let got = WaitMode::Forever
            .wait(Resource::Spaghetti, async { None::<u8> })
            .await;
        assert_eq!(
            got,
            Err(TableError::Closed {
                resource: Resource::Spaghetti
            })
        );
    }
}
