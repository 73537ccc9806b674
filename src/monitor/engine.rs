//! Poll loop: fetch, evaluate every subscriber, dispatch, commit

use super::{MonitorStatus, PassSummary, TickOutcome};
use crate::alert::{evaluate, Evaluation, NotificationEvent, TargetReport};
use crate::feed::{FeedError, PriceObservation, PriceSource};
use crate::history::PriceHistory;
use crate::notify::NotificationSink;
use crate::subscriber::{AlertConfig, ConfigCommand, ConfigError, SubscriberId, SubscriberStore};
use crate::telemetry::{self, PassOutcome};
use futures_util::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{interval, MissedTickBehavior};
use tracing::Instrument;
use uuid::Uuid;

/// Drives price polling and alert evaluation
///
/// Passes never overlap: a tick that arrives while a pass is running is
/// dropped. The new price is committed to history only after every
/// subscriber has been evaluated and every event dispatched.
pub struct PriceMonitor {
    source: Arc<dyn PriceSource>,
    store: Arc<SubscriberStore>,
    history: Arc<PriceHistory>,
    sink: Arc<dyn NotificationSink>,
    pass_lock: Mutex<()>,
}

impl PriceMonitor {
    /// Create a monitor over the given collaborators
    pub fn new(
        source: Arc<dyn PriceSource>,
        store: Arc<SubscriberStore>,
        history: Arc<PriceHistory>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            source,
            store,
            history,
            sink,
            pass_lock: Mutex::new(()),
        }
    }

    /// Subscriber store shared with the command layer
    pub fn store(&self) -> &Arc<SubscriberStore> {
        &self.store
    }

    /// Price history
    pub fn history(&self) -> &Arc<PriceHistory> {
        &self.history
    }

    /// Register a subscriber, creating a default config on first contact
    pub async fn register_subscriber(&self, id: SubscriberId) -> AlertConfig {
        let config = self.store.get_or_create(id).await;
        telemetry::set_subscriber_count(self.store.len().await);
        config
    }

    /// Change a subscriber's settings with an arbitrary mutator
    ///
    /// The result is validated before it is stored.
    pub async fn update_subscriber<F>(
        &self,
        id: SubscriberId,
        mutator: F,
    ) -> Result<AlertConfig, ConfigError>
    where
        F: FnOnce(&mut AlertConfig) -> Result<(), ConfigError>,
    {
        self.store.try_update(id, mutator).await
    }

    /// Apply a canonical configuration command
    pub async fn apply_command(
        &self,
        id: SubscriberId,
        command: &ConfigCommand,
    ) -> Result<AlertConfig, ConfigError> {
        self.store.apply(id, command).await
    }

    /// Ad-hoc price query that leaves history untouched
    pub async fn current_price(&self) -> Result<PriceObservation, FeedError> {
        self.source.fetch().await
    }

    /// Fetch the current price and report a subscriber's distance to targets
    pub async fn target_report(&self, id: SubscriberId) -> Result<TargetReport, FeedError> {
        let config = self.store.get(id).await.unwrap_or_default();
        let observation = self.source.fetch().await?;
        Ok(TargetReport::new(&config, observation))
    }

    /// Subscriber count and last committed price
    pub async fn status(&self) -> MonitorStatus {
        let snapshot = self.history.snapshot().await;
        MonitorStatus {
            subscribers: self.store.len().await,
            last_price: snapshot.last_price,
            last_update: snapshot.last_update,
        }
    }

    /// Run one poll pass, unless one is already in flight
    pub async fn on_tick(&self) -> TickOutcome {
        let Ok(_guard) = self.pass_lock.try_lock() else {
            tracing::debug!("Previous pass still running, dropping tick");
            telemetry::record_pass(PassOutcome::Busy);
            return TickOutcome::Busy;
        };

        let pass_id = Uuid::new_v4();
        let outcome = self
            .run_pass()
            .instrument(tracing::info_span!("poll_pass", %pass_id))
            .await;

        match &outcome {
            TickOutcome::Completed(_) => telemetry::record_pass(PassOutcome::Completed),
            TickOutcome::SourceUnavailable => {
                telemetry::record_pass(PassOutcome::SourceUnavailable)
            }
            TickOutcome::Busy => telemetry::record_pass(PassOutcome::Busy),
        }
        outcome
    }

    async fn run_pass(&self) -> TickOutcome {
        let observation = match self.source.fetch().await {
            Ok(observation) => observation,
            Err(e) => {
                tracing::warn!(error = %e, "Price fetch failed, skipping cycle");
                return TickOutcome::SourceUnavailable;
            }
        };

        let previous_price = self.history.last_price().await;
        let ids = self.store.ids().await;

        let mut events = Vec::new();
        for id in &ids {
            let produced = self
                .store
                .update(*id, |config| {
                    let Evaluation {
                        events,
                        config: updated,
                    } = evaluate(*id, config, previous_price, &observation);
                    *config = updated;
                    events
                })
                .await;

            if !produced.is_empty() {
                tracing::debug!(subscriber = %id, events = produced.len(), "Subscriber alerts triggered");
            }
            events.extend(produced);
        }

        let delivery_failures = self.dispatch(&events).await;

        self.history.commit(&observation).await;
        telemetry::set_last_price(observation.price);
        telemetry::set_subscriber_count(ids.len());

        let summary = PassSummary {
            price: observation.price,
            previous_price,
            subscribers: ids.len(),
            events: events.len(),
            delivery_failures,
        };

        tracing::info!(
            price = %summary.price,
            previous = ?summary.previous_price,
            source = %observation.source,
            subscribers = summary.subscribers,
            events = summary.events,
            delivery_failures = summary.delivery_failures,
            "Poll pass complete"
        );

        TickOutcome::Completed(summary)
    }

    /// Deliver events concurrently; returns the number of failures
    async fn dispatch(&self, events: &[NotificationEvent]) -> usize {
        let deliveries = events.iter().map(|event| async move {
            telemetry::record_event(event.kind());
            match self.sink.deliver(event).await {
                Ok(()) => true,
                Err(e) => {
                    telemetry::record_delivery_failure();
                    tracing::warn!(
                        subscriber = %event.subscriber(),
                        kind = event.kind(),
                        error = %e,
                        "Notification delivery failed"
                    );
                    false
                }
            }
        });

        join_all(deliveries)
            .await
            .into_iter()
            .filter(|delivered| !delivered)
            .count()
    }

    /// Poll on a fixed interval until `shutdown` resolves
    ///
    /// The first pass runs immediately. Shutdown is only observed between
    /// passes.
    pub async fn run<S>(&self, poll_interval: Duration, shutdown: S)
    where
        S: Future<Output = ()>,
    {
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        tracing::info!(
            every_secs = poll_interval.as_secs(),
            subscribers = self.store.len().await,
            "Price monitor started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Price monitor stopping");
                    break;
                }
                _ = ticker.tick() => {
                    self.on_tick().await;
                }
            }
        }
    }
}
