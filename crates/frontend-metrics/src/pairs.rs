//! Paired instruments: one call fans out to a per-topic and a global
//! instrument.

use crate::provider::{Histogram, Meter, Timer};
use std::time::{Duration, Instant};

/// Per-topic and global timers measuring the same stage.
#[derive(Debug, Clone)]
pub struct TimersPair {
    topic: Timer,
    global: Timer,
}

impl TimersPair {
    #[must_use]
    pub fn new(topic: Timer, global: Timer) -> Self {
        Self { topic, global }
    }

    /// Start both clocks from the same instant.
    #[must_use = "dropping the pair immediately records a near-zero sample"]
    pub fn start(&self) -> StartedTimersPair {
        StartedTimersPair {
            topic: self.topic.clone(),
            global: self.global.clone(),
            start: Instant::now(),
            stopped: false,
        }
    }
}

/// Running measurement on a [`TimersPair`].
///
/// Stopping consumes the pair. If it is dropped without being stopped,
/// e.g. on an early return or error path, the elapsed time is recorded
/// then, so every started pair yields exactly one sample per timer.
#[derive(Debug)]
pub struct StartedTimersPair {
    topic: Timer,
    global: Timer,
    start: Instant,
    stopped: bool,
}

impl StartedTimersPair {
    /// Stop both clocks and record the elapsed time into both timers.
    pub fn stop(mut self) -> Duration {
        self.finish()
    }

    fn finish(&mut self) -> Duration {
        let elapsed = self.start.elapsed();
        self.topic.record(elapsed);
        self.global.record(elapsed);
        self.stopped = true;
        elapsed
    }
}

impl Drop for StartedTimersPair {
    fn drop(&mut self) {
        if !self.stopped {
            self.finish();
        }
    }
}

/// Per-topic and global meters counting the same event.
#[derive(Debug, Clone)]
pub struct MetersPair {
    topic: Meter,
    global: Meter,
}

impl MetersPair {
    #[must_use]
    pub fn new(topic: Meter, global: Meter) -> Self {
        Self { topic, global }
    }

    /// Mark the per-topic meter, then the global one.
    pub fn mark(&self) {
        self.topic.mark();
        self.global.mark();
    }
}

/// Per-topic and global histograms observing the same value.
#[derive(Debug, Clone)]
pub struct HistogramsPair {
    topic: Histogram,
    global: Histogram,
}

impl HistogramsPair {
    #[must_use]
    pub fn new(topic: Histogram, global: Histogram) -> Self {
        Self { topic, global }
    }

    pub fn update(&self, value: i64) {
        self.topic.update(value);
        self.global.update(value);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::observability::metrics::{HistogramName, MeterName, TimerName};
    use crate::provider::{FrontendMetrics, MetricsProvider};
    use common::types::TopicName;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
    use std::collections::HashMap;

    fn topic() -> TopicName {
        TopicName::new("group", "topic")
    }

    fn values_by_name(snapshotter: &Snapshotter) -> HashMap<String, DebugValue> {
        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(key, _, _, value)| (key.key().name().to_string(), value))
            .collect()
    }

    fn sample_count(value: &DebugValue) -> usize {
        match value {
            DebugValue::Histogram(samples) => samples.len(),
            other => panic!("expected histogram, got {other:?}"),
        }
    }

    #[test]
    fn test_meters_pair_marks_both() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let provider = FrontendMetrics::new();

        let pair = metrics::with_local_recorder(&recorder, || {
            MetersPair::new(
                provider.meter(MeterName::Requests, Some(&topic())),
                provider.meter(MeterName::Requests, None),
            )
        });
        for _ in 0..5 {
            pair.mark();
        }

        let values = values_by_name(&snapshotter);
        assert_eq!(values["frontend_topic_requests_total"], DebugValue::Counter(5));
        assert_eq!(values["frontend_requests_total"], DebugValue::Counter(5));
    }

    #[test]
    fn test_histograms_pair_updates_both() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let provider = FrontendMetrics::new();

        let pair = metrics::with_local_recorder(&recorder, || {
            HistogramsPair::new(
                provider.histogram(HistogramName::MessageContentSize, Some(&topic())),
                provider.histogram(HistogramName::MessageContentSize, None),
            )
        });
        pair.update(10);
        pair.update(20);
        pair.update(30);

        let values = values_by_name(&snapshotter);
        assert_eq!(sample_count(&values["frontend_topic_message_content_size_bytes"]), 3);
        assert_eq!(sample_count(&values["frontend_message_content_size_bytes"]), 3);
    }

    #[test]
    fn test_timers_pair_records_same_elapsed_into_both() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let provider = FrontendMetrics::new();

        let pair = metrics::with_local_recorder(&recorder, || {
            TimersPair::new(
                provider.timer(TimerName::RequestRead, Some(&topic())),
                provider.timer(TimerName::RequestRead, None),
            )
        });
        let elapsed = pair.start().stop();

        let values = values_by_name(&snapshotter);
        for name in [
            "frontend_topic_request_read_latency_seconds",
            "frontend_request_read_latency_seconds",
        ] {
            match &values[name] {
                DebugValue::Histogram(samples) => {
                    assert_eq!(samples.len(), 1, "{name}");
                    assert!(
                        (samples[0].into_inner() - elapsed.as_secs_f64()).abs() < f64::EPSILON
                    );
                }
                other => panic!("expected histogram for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_timers_pair_records_once_when_dropped_on_error_path() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let provider = FrontendMetrics::new();

        let pair = metrics::with_local_recorder(&recorder, || {
            TimersPair::new(
                provider.timer(TimerName::MessageCreation, Some(&topic())),
                provider.timer(TimerName::MessageCreation, None),
            )
        });

        let failing_stage = |pair: &TimersPair| -> Result<(), &'static str> {
            let _timers = pair.start();
            Err("malformed body")
        };
        assert!(failing_stage(&pair).is_err());

        let values = values_by_name(&snapshotter);
        assert_eq!(
            sample_count(&values["frontend_topic_message_creation_latency_seconds"]),
            1
        );
        assert_eq!(sample_count(&values["frontend_message_creation_latency_seconds"]), 1);
    }
}
