use std::sync::Arc;

use super::dinner::Dinner;
use crate::{
    config::Config,
    error::ConfigError,
    events::Bus,
    subscribers::{Subscribe, SubscriberSet, TableView},
    table::Table,
};

/// Builder for constructing a [`Dinner`].
pub struct DinnerBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl DinnerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive every report (states, portions, cook, queue) and
    /// the runtime events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Validates the configuration and builds the dinner.
    ///
    /// Initializes the table, the event bus, the subscriber workers, the
    /// status screen and the listener that connects them. Must be called
    /// inside a tokio runtime.
    pub fn build(self) -> Result<Dinner, ConfigError> {
        self.cfg.validate()?;

        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers, bus.clone()));
        let table = Arc::new(Table::new(&self.cfg));
        let view = Arc::new(TableView::new(
            self.cfg.philosophers,
            table.spaghetti().capacity(),
        ));

        let dinner = Dinner::new_internal(self.cfg, bus, table, view, subs);
        dinner.subscriber_listener();
        Ok(dinner)
    }
}
