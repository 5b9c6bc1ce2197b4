//! `MetricsProvider` that records every request before delegating.

use common::types::TopicName;
use frontend_metrics::observability::metrics::status_code_metric_name;
use frontend_metrics::observability::{CounterName, HistogramName, MeterName, TimerName};
use frontend_metrics::{Counter, FrontendMetrics, Histogram, Meter, MetricsProvider, Timer};
use std::sync::Mutex;

/// Kind of instrument requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentKind {
    Counter,
    Meter,
    Timer,
    Histogram,
    StatusCodeMeter,
}

/// One call made to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRequest {
    pub kind: InstrumentKind,
    /// Resolved series name.
    pub name: &'static str,
    pub topic: Option<TopicName>,
    pub status_code: Option<i32>,
}

/// Records every request, then delegates to [`FrontendMetrics`] so values
/// still reach whatever recorder is in effect.
#[derive(Debug, Default)]
pub struct RecordingProvider {
    inner: FrontendMetrics,
    requests: Mutex<Vec<MetricRequest>>,
}

impl RecordingProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(
        &self,
        kind: InstrumentKind,
        name: &'static str,
        topic: Option<&TopicName>,
        status_code: Option<i32>,
    ) {
        self.requests.lock().unwrap().push(MetricRequest {
            kind,
            name,
            topic: topic.cloned(),
            status_code,
        });
    }

    /// Every request so far, in call order.
    pub fn requests(&self) -> Vec<MetricRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn was_requested(&self, name: &str) -> bool {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .any(|request| request.name == name)
    }

    /// Number of status code meters requested for `status_code`, across
    /// both scopes.
    pub fn status_code_requests(&self, status_code: i32) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.status_code == Some(status_code))
            .count()
    }
}

impl MetricsProvider for RecordingProvider {
    fn counter(&self, name: CounterName, topic: &TopicName) -> Counter {
        self.record(InstrumentKind::Counter, name.metric_name(), Some(topic), None);
        self.inner.counter(name, topic)
    }

    fn meter(&self, name: MeterName, topic: Option<&TopicName>) -> Meter {
        self.record(
            InstrumentKind::Meter,
            name.metric_name(topic.is_some()),
            topic,
            None,
        );
        self.inner.meter(name, topic)
    }

    fn timer(&self, name: TimerName, topic: Option<&TopicName>) -> Timer {
        self.record(
            InstrumentKind::Timer,
            name.metric_name(topic.is_some()),
            topic,
            None,
        );
        self.inner.timer(name, topic)
    }

    fn histogram(&self, name: HistogramName, topic: Option<&TopicName>) -> Histogram {
        self.record(
            InstrumentKind::Histogram,
            name.metric_name(topic.is_some()),
            topic,
            None,
        );
        self.inner.histogram(name, topic)
    }

    fn meter_for_status_code(&self, status_code: i32, topic: Option<&TopicName>) -> Meter {
        self.record(
            InstrumentKind::StatusCodeMeter,
            status_code_metric_name(topic.is_some()),
            topic,
            Some(status_code),
        );
        self.inner.meter_for_status_code(status_code, topic)
    }
}
