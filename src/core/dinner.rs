//! # Dinner: seats the actors, fans out their reports, shuts them down.
//!
//! The [`Dinner`] owns the [`Table`], the event [`Bus`], the [`TableView`] and
//! the [`SubscriberSet`]. [`Dinner::start`] spawns one task per philosopher
//! plus the cook and hands back a [`Running`] handle; [`Dinner::run`] does the
//! same and waits for an OS signal before shutting down.
//!
//! ## High-level architecture
//! ```text
//! DinnerBuilder::build(cfg)
//!   ├─ Table (forks, seat permit, spaghetti queue)
//!   ├─ Bus ──► subscriber_listener() ──► TableView::update(&Event)
//!   │                                └─► SubscriberSet::emit(&Event)
//!   └─ Dinner
//!
//! Dinner::start():
//!   Philosopher[0] ... Philosopher[N-1]  Cook
//!        │                  │              │
//!        └──► child CancellationToken = runtime_token.child_token()
//!             set.spawn(ActorStarting → actor.run(child) → ActorStopped)
//!
//! Running::shutdown():
//!   Bus.publish(ShutdownRequested)
//!   runtime_token.cancel()            → propagates to child tokens
//!   wait for all actors within cfg.grace:
//!     ├─ all joined        → Bus.publish(AllStoppedWithin)
//!     └─ grace exceeded    → Bus.publish(GraceExceeded)
//!                            (TableView::alive_actors() names the stuck ones)
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use symposium::{Config, Dinner, Subscribe};
//! #[cfg(feature = "logging")]
//! use symposium::LogWriter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut subs: Vec<Arc<dyn Subscribe>> = Vec::new();
//!     #[cfg(feature = "logging")]
//!     subs.push(Arc::new(LogWriter::new()));
//!
//!     let dinner = Dinner::builder(Config::default())
//!         .with_subscribers(subs)
//!         .build()?;
//!     dinner.run().await?;
//!     Ok(())
//! }
//! ```

use std::{future::Future, sync::Arc};

use tokio::{sync::broadcast::error::RecvError, task::JoinSet};
use tokio_util::sync::CancellationToken;

use super::{Cook, Philosopher, builder::DinnerBuilder, cook::COOK, shutdown};
use crate::{
    config::Config,
    error::RuntimeError,
    events::{Bus, Event, EventKind},
    sink::StateSink,
    subscribers::{SubscriberSet, TableSnapshot, TableView},
    table::Table,
};

/// A configured dinner, ready to be started.
pub struct Dinner {
    cfg: Config,
    bus: Bus,
    table: Arc<Table>,
    view: Arc<TableView>,
    subs: Arc<SubscriberSet>,
}

impl Dinner {
    /// Starts building a dinner from `cfg`.
    pub fn builder(cfg: Config) -> DinnerBuilder {
        DinnerBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        table: Arc<Table>,
        view: Arc<TableView>,
        subs: Arc<SubscriberSet>,
    ) -> Self {
        Self {
            cfg,
            bus,
            table,
            view,
            subs,
        }
    }

    /// The validated configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// The shared table.
    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// The status screen.
    pub fn view(&self) -> &Arc<TableView> {
        &self.view
    }

    /// The event bus.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Subscribes to the bus and feeds the view and the subscriber set.
    ///
    /// A lagging listener skips the lost events and carries on; the view
    /// catches up with the next report of each actor.
    pub(crate) fn subscriber_listener(&self) {
        let mut rx = self.bus.subscribe();
        let view = Arc::clone(&self.view);
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => {
                        view.update(&ev).await;
                        set.emit(&ev);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "event listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    /// Spawns the philosophers and the cook.
    pub fn start(self) -> Running {
        let token = CancellationToken::new();
        let sink: Arc<dyn StateSink> = Arc::new(self.bus.clone());
        let mut set = JoinSet::new();

        for id in 0..self.table.places() {
            let philosopher =
                Philosopher::new(id, Arc::clone(&self.table), Arc::clone(&sink), &self.cfg);
            let name = philosopher.name().to_string();
            self.spawn_actor(&mut set, name, philosopher.run(token.child_token()));
        }
        let cook = Cook::new(Arc::clone(&self.table), Arc::clone(&sink), &self.cfg);
        self.spawn_actor(&mut set, COOK.to_string(), cook.run(token.child_token()));

        Running {
            dinner: self,
            token,
            set,
        }
    }

    /// Starts the dinner and serves until a termination signal arrives.
    pub async fn run(self) -> Result<(), RuntimeError> {
        let running = self.start();
        if let Err(err) = shutdown::wait_for_shutdown_signal().await {
            tracing::warn!(error = %err, "cannot listen for signals; stopping");
        }
        running.shutdown().await
    }

    fn spawn_actor<F>(&self, set: &mut JoinSet<()>, name: String, actor: F)
    where
        F: Future<Output = u64> + Send + 'static,
    {
        let bus = self.bus.clone();
        set.spawn(async move {
            bus.publish(Event::new(EventKind::ActorStarting).with_actor(name.as_str()));
            let count = actor.await;
            tracing::debug!(actor = %name, count, "actor finished");
            bus.publish(Event::new(EventKind::ActorStopped).with_actor(name));
        });
    }
}

/// Handle to a dinner in progress.
pub struct Running {
    dinner: Dinner,
    token: CancellationToken,
    set: JoinSet<()>,
}

impl Running {
    /// Runtime cancellation token; every actor holds a child of it.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The shared table.
    pub fn table(&self) -> &Arc<Table> {
        &self.dinner.table
    }

    /// The status screen.
    pub fn view(&self) -> &Arc<TableView> {
        &self.dinner.view
    }

    /// The event bus.
    pub fn bus(&self) -> &Bus {
        &self.dinner.bus
    }

    /// Current screen contents.
    pub async fn snapshot(&self) -> TableSnapshot {
        self.dinner.view.snapshot().await
    }

    /// Cancels every actor and waits up to the configured grace period.
    ///
    /// Publishes [`EventKind::AllStoppedWithin`] on success, or
    /// [`EventKind::GraceExceeded`] on timeout and returns
    /// [`RuntimeError::GraceExceeded`] with the actors still running.
    pub async fn shutdown(mut self) -> Result<(), RuntimeError> {
        let bus = self.dinner.bus.clone();
        bus.publish(Event::new(EventKind::ShutdownRequested));
        self.token.cancel();

        let grace = self.dinner.cfg.grace;
        let done = async { while self.set.join_next().await.is_some() {} };
        let timed = tokio::time::timeout(grace, done).await;
        match timed {
            Ok(()) => {
                bus.publish(Event::new(EventKind::AllStoppedWithin));
                Ok(())
            }
            Err(_) => {
                bus.publish(Event::new(EventKind::GraceExceeded));
                let stuck = self.dinner.view.alive_actors().await;
                self.set.abort_all();
                Err(RuntimeError::GraceExceeded { grace, stuck })
            }
        }
    }
}
