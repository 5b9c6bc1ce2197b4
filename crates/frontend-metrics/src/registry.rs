//! Registry of per-topic facades for the whole process.

use crate::cached_topic::CachedTopic;
use crate::provider::MetricsProvider;
use common::types::{Topic, TopicName};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// One [`CachedTopic`] per topic name, created on first reference.
pub struct CachedTopics {
    provider: Arc<dyn MetricsProvider>,
    topics: DashMap<TopicName, Arc<CachedTopic>>,
}

impl CachedTopics {
    #[must_use]
    pub fn new(provider: Arc<dyn MetricsProvider>) -> Self {
        Self {
            provider,
            topics: DashMap::new(),
        }
    }

    /// Facade for `topic`, built the first time its name is seen.
    ///
    /// Concurrent first references build a single facade. A later call with
    /// a different ack mode for the same name still returns the existing
    /// facade; call [`CachedTopics::remove`] first to rebind.
    pub fn get_or_create(&self, topic: &Topic) -> Arc<CachedTopic> {
        if let Some(cached) = self.topics.get(topic.name()) {
            return Arc::clone(cached.value());
        }

        let cached = self
            .topics
            .entry(topic.name().clone())
            .or_insert_with(|| {
                info!(
                    target: "frontend.metrics",
                    topic = %topic.name(),
                    ack = topic.ack().as_str(),
                    "Caching topic metrics"
                );
                Arc::new(CachedTopic::new(topic.clone(), Arc::clone(&self.provider)))
            })
            .value()
            .clone();

        if cached.ack() != topic.ack() {
            warn!(
                target: "frontend.metrics",
                topic = %topic.name(),
                cached_ack = cached.ack().as_str(),
                requested_ack = topic.ack().as_str(),
                "Topic ack mode changed, keeping metrics bound at creation"
            );
        }

        cached
    }

    #[must_use]
    pub fn get(&self, name: &TopicName) -> Option<Arc<CachedTopic>> {
        self.topics.get(name).map(|cached| Arc::clone(cached.value()))
    }

    /// Drop the facade for a deleted topic. Handles already taken by callers
    /// stay usable.
    pub fn remove(&self, name: &TopicName) -> Option<Arc<CachedTopic>> {
        let removed = self.topics.remove(name).map(|(_, cached)| cached);
        if removed.is_some() {
            info!(target: "frontend.metrics", topic = %name, "Removed topic metrics");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
