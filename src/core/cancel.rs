//! Cancellable waits shared by the actors.
//!
//! Every wait or delay of a philosopher or the cook races the actor's
//! [`CancellationToken`]; whichever finishes first decides the outcome.

use std::future::Future;
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::TableError;

/// Why an actor's cycle ended early.
#[derive(Debug)]
pub(crate) enum Stop {
    /// The runtime token fired.
    Cancelled,
    /// A table wait failed (timed out or closed).
    Table(TableError),
}

impl From<TableError> for Stop {
    fn from(err: TableError) -> Self {
        Stop::Table(err)
    }
}

/// Awaits a table operation unless `token` fires first.
pub(crate) async fn guarded<F, T>(token: &CancellationToken, fut: F) -> Result<T, Stop>
where
    F: Future<Output = Result<T, TableError>>,
{
    select! {
        biased;
        _ = token.cancelled() => Err(Stop::Cancelled),
        res = fut => res.map_err(Stop::from),
    }
}

/// Sleeps for `d` unless `token` fires first.
pub(crate) async fn pause(token: &CancellationToken, d: Duration) -> Result<(), Stop> {
    let sleep = time::sleep(d);
    tokio::pin!(sleep);
    select! {
        biased;
        _ = token.cancelled() => Err(Stop::Cancelled),
        _ = &mut sleep => Ok(()),
    }
}
