//! Assertions over metrics captured by a `DebuggingRecorder`.

use metrics_util::debugging::{DebugValue, Snapshotter};
use metrics_util::CompositeKey;

/// Values captured from a [`Snapshotter`] at one point in time.
///
/// Histogram samples are drained by each snapshot, so capture once after
/// all recording is done.
#[derive(Debug)]
pub struct MetricsSnapshot {
    entries: Vec<(CompositeKey, DebugValue)>,
}

impl MetricsSnapshot {
    #[must_use]
    pub fn capture(snapshotter: &Snapshotter) -> Self {
        let entries = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(key, _, _, value)| (key, value))
            .collect();
        Self { entries }
    }

    /// Find the series with exactly `labels` (in any order).
    fn find(&self, name: &str, labels: &[(&str, &str)]) -> Option<&DebugValue> {
        self.entries
            .iter()
            .find(|(key, _)| {
                let key = key.key();
                key.name() == name
                    && key.labels().count() == labels.len()
                    && labels.iter().all(|(k, v)| {
                        key.labels()
                            .any(|label| label.key() == *k && label.value() == *v)
                    })
            })
            .map(|(_, value)| value)
    }

    /// Counter value of the series, if it exists.
    ///
    /// # Panics
    ///
    /// Panics if the series exists but is not a counter.
    #[must_use]
    pub fn counter(&self, name: &str, labels: &[(&str, &str)]) -> Option<u64> {
        self.find(name, labels).map(|value| match value {
            DebugValue::Counter(count) => *count,
            other => panic!("{name} is not a counter: {other:?}"),
        })
    }

    /// Histogram samples of the series, in recording order.
    ///
    /// # Panics
    ///
    /// Panics if the series exists but is not a histogram.
    #[must_use]
    pub fn histogram(&self, name: &str, labels: &[(&str, &str)]) -> Option<Vec<f64>> {
        self.find(name, labels).map(|value| match value {
            DebugValue::Histogram(samples) => {
                samples.iter().map(|sample| sample.into_inner()).collect()
            }
            other => panic!("{name} is not a histogram: {other:?}"),
        })
    }

    /// Whether any series with this name exists, whatever its labels.
    #[must_use]
    pub fn has_series(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key.key().name() == name)
    }
}
