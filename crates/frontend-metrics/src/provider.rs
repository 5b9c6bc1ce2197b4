//! Instrument handles and the provider that resolves them.
//!
//! Handles wrap the `metrics` crate handles, so cloning one is a reference
//! count bump and every clone feeds the same series.

use crate::observability::metrics::{
    status_code_metric_name, CounterName, HistogramName, MeterName, TimerName, GROUP_LABEL,
    STATUS_CODE_LABEL, TOPIC_LABEL,
};
use common::types::TopicName;
use metrics::Label;
use std::fmt;
use std::time::{Duration, Instant};

/// Increment-only counter.
#[derive(Clone)]
pub struct Counter(metrics::Counter);

impl Counter {
    #[must_use]
    pub fn new(inner: metrics::Counter) -> Self {
        Self(inner)
    }

    /// Add one.
    pub fn increment(&self) {
        self.0.increment(1);
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter").finish_non_exhaustive()
    }
}

/// Event meter. Rates are derived from the exported count.
#[derive(Clone)]
pub struct Meter(metrics::Counter);

impl Meter {
    #[must_use]
    pub fn new(inner: metrics::Counter) -> Self {
        Self(inner)
    }

    /// Record one event.
    pub fn mark(&self) {
        self.0.increment(1);
    }

    /// Record `events` events at once.
    pub fn mark_n(&self, events: u64) {
        self.0.increment(events);
    }
}

impl fmt::Debug for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Meter").finish_non_exhaustive()
    }
}

/// Latency timer, recorded in seconds.
#[derive(Clone)]
pub struct Timer(metrics::Histogram);

impl Timer {
    #[must_use]
    pub fn new(inner: metrics::Histogram) -> Self {
        Self(inner)
    }

    /// Record an already measured duration.
    pub fn record(&self, elapsed: Duration) {
        self.0.record(elapsed.as_secs_f64());
    }

    /// Start measuring. The sample is recorded on `stop` or when the
    /// returned guard is dropped.
    #[must_use = "dropping the guard immediately records a near-zero sample"]
    pub fn time(&self) -> StartedTimer {
        StartedTimer {
            timer: self.clone(),
            start: Instant::now(),
            stopped: false,
        }
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer").finish_non_exhaustive()
    }
}

/// A running measurement on a single [`Timer`].
#[derive(Debug)]
pub struct StartedTimer {
    timer: Timer,
    start: Instant,
    stopped: bool,
}

impl StartedTimer {
    /// Stop the clock and record the elapsed time.
    pub fn stop(mut self) -> Duration {
        self.finish()
    }

    fn finish(&mut self) -> Duration {
        let elapsed = self.start.elapsed();
        self.timer.record(elapsed);
        self.stopped = true;
        elapsed
    }
}

impl Drop for StartedTimer {
    fn drop(&mut self) {
        if !self.stopped {
            self.finish();
        }
    }
}

/// Value distribution.
#[derive(Clone)]
pub struct Histogram(metrics::Histogram);

impl Histogram {
    #[must_use]
    pub fn new(inner: metrics::Histogram) -> Self {
        Self(inner)
    }

    /// Record a value as-is. Negative values are not rejected.
    pub fn update(&self, value: i64) {
        // i64 to f64 conversion is exact for realistic message sizes (< 2^53)
        #[allow(clippy::cast_precision_loss)]
        self.0.record(value as f64);
    }
}

impl fmt::Debug for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Histogram").finish_non_exhaustive()
    }
}

/// Source of instrument handles.
///
/// A `topic` of `None` asks for the global series. Counters are per-topic
/// only. Asking twice for the same name and topic must return handles
/// feeding the same series.
pub trait MetricsProvider: Send + Sync {
    fn counter(&self, name: CounterName, topic: &TopicName) -> Counter;

    fn meter(&self, name: MeterName, topic: Option<&TopicName>) -> Meter;

    fn timer(&self, name: TimerName, topic: Option<&TopicName>) -> Timer;

    fn histogram(&self, name: HistogramName, topic: Option<&TopicName>) -> Histogram;

    fn meter_for_status_code(&self, status_code: i32, topic: Option<&TopicName>) -> Meter;
}

/// Provider backed by the `metrics` recorder in effect at resolution time:
/// the global one installed by `init_metrics_recorder`, or a local one set
/// with `metrics::with_local_recorder`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontendMetrics;

impl FrontendMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn topic_labels(topic: Option<&TopicName>) -> Vec<Label> {
    match topic {
        Some(topic) => vec![
            Label::new(GROUP_LABEL, topic.group_name().to_string()),
            Label::new(TOPIC_LABEL, topic.name().to_string()),
        ],
        None => Vec::new(),
    }
}

impl MetricsProvider for FrontendMetrics {
    fn counter(&self, name: CounterName, topic: &TopicName) -> Counter {
        Counter::new(metrics::counter!(name.metric_name(), topic_labels(Some(topic))))
    }

    fn meter(&self, name: MeterName, topic: Option<&TopicName>) -> Meter {
        let metric_name = name.metric_name(topic.is_some());
        Meter::new(metrics::counter!(metric_name, topic_labels(topic)))
    }

    fn timer(&self, name: TimerName, topic: Option<&TopicName>) -> Timer {
        let metric_name = name.metric_name(topic.is_some());
        Timer::new(metrics::histogram!(metric_name, topic_labels(topic)))
    }

    fn histogram(&self, name: HistogramName, topic: Option<&TopicName>) -> Histogram {
        let metric_name = name.metric_name(topic.is_some());
        Histogram::new(metrics::histogram!(metric_name, topic_labels(topic)))
    }

    fn meter_for_status_code(&self, status_code: i32, topic: Option<&TopicName>) -> Meter {
        let metric_name = status_code_metric_name(topic.is_some());
        let mut labels = topic_labels(topic);
        labels.push(Label::new(STATUS_CODE_LABEL, status_code.to_string()));
        Meter::new(metrics::counter!(metric_name, labels))
    }
}
