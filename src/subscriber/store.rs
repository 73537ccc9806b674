//! In-memory subscriber store

use super::{AlertConfig, ConfigCommand, ConfigError, SubscriberId};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct StoreInner {
    configs: HashMap<SubscriberId, AlertConfig>,
    /// Insertion order for deterministic iteration
    order: Vec<SubscriberId>,
}

impl StoreInner {
    fn entry(&mut self, id: SubscriberId, default_threshold: u32) -> &mut AlertConfig {
        if !self.configs.contains_key(&id) {
            self.order.push(id);
        }
        self.configs
            .entry(id)
            .or_insert_with(|| AlertConfig::with_threshold(default_threshold))
    }
}

/// Maps subscribers to their alert configuration
///
/// Every mutation is a read-modify-write on a copy of the config,
/// performed under the store's write lock so two mutators of the same
/// subscriber never interleave.
pub struct SubscriberStore {
    inner: RwLock<StoreInner>,
    default_threshold: u32,
}

impl SubscriberStore {
    /// Create an empty store using the standard default threshold
    pub fn new() -> Self {
        Self::with_default_threshold(super::DEFAULT_THRESHOLD_PCT)
    }

    /// Create an empty store whose new subscribers start with `threshold`
    pub fn with_default_threshold(threshold: u32) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            default_threshold: threshold,
        }
    }

    /// Get a subscriber's config, creating it with defaults on first access
    pub async fn get_or_create(&self, id: SubscriberId) -> AlertConfig {
        if let Some(config) = self.get(id).await {
            return config;
        }
        let mut inner = self.inner.write().await;
        inner.entry(id, self.default_threshold).clone()
    }

    /// Get a subscriber's config without creating it
    pub async fn get(&self, id: SubscriberId) -> Option<AlertConfig> {
        self.inner.read().await.configs.get(&id).cloned()
    }

    /// Replace a subscriber's config
    pub async fn put(&self, id: SubscriberId, config: AlertConfig) {
        let mut inner = self.inner.write().await;
        *inner.entry(id, self.default_threshold) = config;
    }

    /// Atomically mutate a subscriber's config, creating it if needed
    ///
    /// The closure works on a copy that is written back once it returns.
    pub async fn update<F, T>(&self, id: SubscriberId, mutator: F) -> T
    where
        F: FnOnce(&mut AlertConfig) -> T,
    {
        let mut inner = self.inner.write().await;
        let current = inner.entry(id, self.default_threshold);
        let mut draft = current.clone();
        let out = mutator(&mut draft);
        *current = draft;
        out
    }

    /// Atomically mutate a subscriber's config, keeping the change only if
    /// the mutator succeeds and the result is still a valid config
    pub async fn try_update<F>(
        &self,
        id: SubscriberId,
        mutator: F,
    ) -> Result<AlertConfig, ConfigError>
    where
        F: FnOnce(&mut AlertConfig) -> Result<(), ConfigError>,
    {
        let mut inner = self.inner.write().await;
        let current = inner.entry(id, self.default_threshold);
        let mut draft = current.clone();
        mutator(&mut draft)?;
        draft.validate()?;
        *current = draft.clone();
        Ok(draft)
    }

    /// Apply a configuration command to a subscriber
    pub async fn apply(
        &self,
        id: SubscriberId,
        command: &ConfigCommand,
    ) -> Result<AlertConfig, ConfigError> {
        let result = self.try_update(id, |config| command.apply(config)).await;
        match &result {
            Ok(_) => tracing::debug!(subscriber = %id, ?command, "Subscriber config updated"),
            Err(e) => tracing::debug!(subscriber = %id, ?command, error = %e, "Rejected config change"),
        }
        result
    }

    /// All subscribers in insertion order
    pub async fn all(&self) -> Vec<(SubscriberId, AlertConfig)> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|id| inner.configs.get(id).map(|c| (*id, c.clone())))
            .collect()
    }

    /// Subscriber ids in insertion order
    pub async fn ids(&self) -> Vec<SubscriberId> {
        self.inner.read().await.order.clone()
    }

    /// Number of subscribers
    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    /// True if nobody has subscribed yet
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SubscriberStore {
    fn default() -> Self {
        Self::new()
    }
}
