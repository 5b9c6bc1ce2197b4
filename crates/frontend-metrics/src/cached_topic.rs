//! Per-topic metrics facade.
//!
//! A [`CachedTopic`] is built once per topic and shared by every request
//! handled for it. All fixed instruments are resolved up front, so the
//! request path only touches already bound handles. Status code meters are
//! the exception: they are built on first use of each code.

use crate::observability::metrics::{CounterName, HistogramName, MeterName, TimerName};
use crate::pairs::{HistogramsPair, MetersPair, StartedTimersPair, TimersPair};
use crate::provider::{Counter, MetricsProvider};
use crate::status_codes::StatusCodeMeters;
use common::types::{Ack, Topic, TopicName};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Producer and broker latency timers for one acknowledgment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyFamily {
    /// Topic waits for every in-sync replica.
    AckAll,
    /// Topic waits for the partition leader only (or not at all).
    AckLeader,
}

impl LatencyFamily {
    /// Only `Ack::All` selects the ack-all family.
    #[must_use]
    pub const fn for_ack(ack: Ack) -> Self {
        if ack.is_all() {
            LatencyFamily::AckAll
        } else {
            LatencyFamily::AckLeader
        }
    }

    #[must_use]
    pub const fn producer_timer(&self) -> TimerName {
        match self {
            LatencyFamily::AckAll => TimerName::AckAllLatency,
            LatencyFamily::AckLeader => TimerName::AckLeaderLatency,
        }
    }

    #[must_use]
    pub const fn broker_timer(&self) -> TimerName {
        match self {
            LatencyFamily::AckAll => TimerName::AckAllBrokerLatency,
            LatencyFamily::AckLeader => TimerName::AckLeaderBrokerLatency,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LatencyFamily::AckAll => "ack_all",
            LatencyFamily::AckLeader => "ack_leader",
        }
    }
}

/// Metrics facade for a single topic.
///
/// Every paired operation records into the per-topic and the global
/// instrument. The published counter is per-topic only.
pub struct CachedTopic {
    topic: Topic,
    latency_family: LatencyFamily,
    provider: Arc<dyn MetricsProvider>,

    request_read_latency: TimersPair,
    producer_latency: TimersPair,
    broker_latency: TimersPair,
    message_creation_latency: TimersPair,

    request_meter: MetersPair,
    message_content_size: HistogramsPair,
    published: Counter,

    status_code_meters: StatusCodeMeters,
}

impl CachedTopic {
    /// Bind every fixed instrument for `topic`.
    ///
    /// The producer and broker timers are chosen here from the topic's ack
    /// mode and never re-evaluated.
    #[must_use]
    pub fn new(topic: Topic, provider: Arc<dyn MetricsProvider>) -> Self {
        let name = topic.name();
        let latency_family = LatencyFamily::for_ack(topic.ack());

        let timers = |timer: TimerName| {
            TimersPair::new(provider.timer(timer, Some(name)), provider.timer(timer, None))
        };

        let request_read_latency = timers(TimerName::RequestRead);
        let producer_latency = timers(latency_family.producer_timer());
        let broker_latency = timers(latency_family.broker_timer());
        let message_creation_latency = timers(TimerName::MessageCreation);

        let request_meter = MetersPair::new(
            provider.meter(MeterName::Requests, Some(name)),
            provider.meter(MeterName::Requests, None),
        );

        let message_content_size = HistogramsPair::new(
            provider.histogram(HistogramName::MessageContentSize, Some(name)),
            provider.histogram(HistogramName::MessageContentSize, None),
        );

        let published = provider.counter(CounterName::Published, name);

        debug!(
            target: "frontend.metrics",
            topic = %name,
            ack = topic.ack().as_str(),
            latency_family = latency_family.as_str(),
            "Bound topic metrics"
        );

        Self {
            latency_family,
            provider,
            request_read_latency,
            producer_latency,
            broker_latency,
            message_creation_latency,
            request_meter,
            message_content_size,
            published,
            status_code_meters: StatusCodeMeters::new(),
            topic,
        }
    }

    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    #[must_use]
    pub fn topic_name(&self) -> &TopicName {
        self.topic.name()
    }

    #[must_use]
    pub fn ack(&self) -> Ack {
        self.topic.ack()
    }

    /// Timer family bound at construction.
    #[must_use]
    pub fn latency_family(&self) -> LatencyFamily {
        self.latency_family
    }

    /// Status code meters built so far.
    #[must_use]
    pub fn status_code_meters(&self) -> &StatusCodeMeters {
        &self.status_code_meters
    }

    #[must_use = "dropping the pair immediately records a near-zero sample"]
    pub fn start_request_read_timers(&self) -> StartedTimersPair {
        self.request_read_latency.start()
    }

    #[must_use = "dropping the pair immediately records a near-zero sample"]
    pub fn start_producer_latency_timers(&self) -> StartedTimersPair {
        self.producer_latency.start()
    }

    #[must_use = "dropping the pair immediately records a near-zero sample"]
    pub fn start_message_creation_timers(&self) -> StartedTimersPair {
        self.message_creation_latency.start()
    }

    #[must_use = "dropping the pair immediately records a near-zero sample"]
    pub fn start_broker_latency_timers(&self) -> StartedTimersPair {
        self.broker_latency.start()
    }

    pub fn mark_request_meter(&self) {
        self.request_meter.mark();
    }

    /// Mark the meters for `status_code`, building them on first use.
    ///
    /// Any code is accepted.
    pub fn mark_status_code_meter(&self, status_code: i32) {
        self.status_code_meters.mark(status_code, || {
            let name = self.topic.name();
            debug!(
                target: "frontend.metrics",
                topic = %name,
                status_code,
                "Creating status code meters"
            );
            MetersPair::new(
                self.provider.meter_for_status_code(status_code, Some(name)),
                self.provider.meter_for_status_code(status_code, None),
            )
        });
    }

    pub fn increment_published(&self) {
        self.published.increment();
    }

    /// Record the message body size in bytes. The value is not validated.
    pub fn report_message_content_size(&self, size: i64) {
        self.message_content_size.update(size);
    }
}

impl fmt::Debug for CachedTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedTopic")
            .field("topic", &self.topic)
            .field("latency_family", &self.latency_family)
            .field("status_codes", &self.status_code_meters.status_codes())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FrontendMetrics;

    fn topic(ack: Ack) -> Topic {
        Topic::new(TopicName::new("pl.allegro", "orders"), ack)
    }

    #[test]
    fn test_latency_family_for_ack() {
        assert_eq!(LatencyFamily::for_ack(Ack::All), LatencyFamily::AckAll);
        assert_eq!(LatencyFamily::for_ack(Ack::Leader), LatencyFamily::AckLeader);
        assert_eq!(LatencyFamily::for_ack(Ack::None), LatencyFamily::AckLeader);
    }

    #[test]
    fn test_latency_family_timer_names() {
        assert_eq!(LatencyFamily::AckAll.producer_timer(), TimerName::AckAllLatency);
        assert_eq!(LatencyFamily::AckAll.broker_timer(), TimerName::AckAllBrokerLatency);
        assert_eq!(LatencyFamily::AckLeader.producer_timer(), TimerName::AckLeaderLatency);
        assert_eq!(
            LatencyFamily::AckLeader.broker_timer(),
            TimerName::AckLeaderBrokerLatency
        );
    }

    #[test]
    fn test_accessors_pass_through_topic() {
        let cached = CachedTopic::new(topic(Ack::All), Arc::new(FrontendMetrics::new()));

        assert_eq!(cached.topic(), &topic(Ack::All));
        assert_eq!(cached.topic_name().qualified_name(), "pl.allegro.orders");
        assert_eq!(cached.ack(), Ack::All);
        assert_eq!(cached.latency_family(), LatencyFamily::AckAll);
        assert!(cached.status_code_meters().is_empty());
    }

    #[test]
    fn test_operations_without_recorder_are_noops() {
        // No recorder installed: every handle is a no-op, calls must still succeed.
        let cached = CachedTopic::new(topic(Ack::Leader), Arc::new(FrontendMetrics::new()));

        cached.mark_request_meter();
        cached.mark_status_code_meter(201);
        cached.increment_published();
        cached.report_message_content_size(1024);
        let _ = cached.start_request_read_timers().stop();
        let _ = cached.start_producer_latency_timers().stop();
        let _ = cached.start_message_creation_timers().stop();
        let _ = cached.start_broker_latency_timers().stop();

        assert_eq!(cached.status_code_meters().status_codes(), vec![201]);
    }

    #[test]
    fn test_cached_topic_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CachedTopic>();
    }
}
