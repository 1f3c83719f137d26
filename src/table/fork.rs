//! # Fork: one exclusive resource per seating position.
//!
//! A fork is a single-permit [`Semaphore`] plus an owner slot. The owner is
//! written right after the permit is granted and cleared right before it is
//! returned, so `owner()` never names two philosophers for one fork.
//!
//! ## Rules
//! - `acquire(who)` blocks until the fork is free (subject to [`WaitMode`])
//! - releasing happens through [`ForkGuard`]: explicitly via `release()` or on drop
//! - waiters are granted the fork in arrival order (tokio's semaphore is fair)

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Semaphore, SemaphorePermit};

use crate::{error::TableError, policies::WaitMode, table::Resource};

const FREE: usize = usize::MAX;

/// Exclusive per-position resource.
pub struct Fork {
    id: usize,
    permit: Semaphore,
    owner: AtomicUsize,
    wait: WaitMode,
}

impl Fork {
    /// Creates a free fork.
    pub fn new(id: usize, wait: WaitMode) -> Self {
        Self {
            id,
            permit: Semaphore::new(1),
            owner: AtomicUsize::new(FREE),
            wait,
        }
    }

    /// Fork id.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Waits until the fork is free and marks it held by philosopher `who`.
    pub async fn acquire(&self, who: usize) -> Result<ForkGuard<'_>, TableError> {
        let permit = self
            .wait
            .wait(Resource::Fork(self.id), async {
                self.permit.acquire().await.ok()
            })
            .await?;

        let prev = self.owner.swap(who, Ordering::AcqRel);
        debug_assert_eq!(prev, FREE, "fork {} granted while held by {prev}", self.id);

        Ok(ForkGuard {
            fork: self,
            _permit: permit,
        })
    }

    /// Current holder, if any.
    pub fn owner(&self) -> Option<usize> {
        match self.owner.load(Ordering::Acquire) {
            FREE => None,
            who => Some(who),
        }
    }

    /// True if nobody holds the fork.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.owner().is_none()
    }
}

impl fmt::Debug for Fork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fork")
            .field("id", &self.id)
            .field("owner", &self.owner())
            .finish()
    }
}

/// Proof of holding a fork. Dropping it puts the fork back on the table.
#[must_use = "the fork is released as soon as the guard is dropped"]
pub struct ForkGuard<'a> {
    fork: &'a Fork,
    _permit: SemaphorePermit<'a>,
}

impl ForkGuard<'_> {
    /// Id of the held fork.
    #[inline]
    pub fn id(&self) -> usize {
        self.fork.id
    }

    /// Puts the fork back, waking at most one waiter.
    pub fn release(self) {}
}

impl Drop for ForkGuard<'_> {
    fn drop(&mut self) {
        // clear before the permit field is dropped
        self.fork.owner.store(FREE, Ordering::Release);
    }
}
