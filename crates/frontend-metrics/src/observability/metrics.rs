//! Metric names for the ingestion frontend and Prometheus recorder setup.
//!
//! All metrics follow Prometheus naming conventions:
//! - `frontend_` prefix for global series
//! - `frontend_topic_` prefix for per-topic series
//! - `_total` suffix for counters and meters
//! - `_seconds` suffix for latency histograms
//! - `_bytes` suffix for size histograms
//!
//! # Cardinality
//!
//! Per-topic series carry `group` and `topic` labels, bounded by the number
//! of topics served by the instance. Status code meters add a `status_code`
//! label, bounded by the handful of codes the frontend actually returns.

use crate::config::MetricsConfig;
use crate::errors::FrontendMetricsError;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

/// Label carrying the topic's group.
pub const GROUP_LABEL: &str = "group";

/// Label carrying the topic name (without group).
pub const TOPIC_LABEL: &str = "topic";

/// Label carrying the response status code.
pub const STATUS_CODE_LABEL: &str = "status_code";

/// Suffix shared by every latency histogram.
pub const LATENCY_SUFFIX: &str = "_latency_seconds";

/// Suffix shared by the global and per-topic content size histograms.
pub const CONTENT_SIZE_SUFFIX: &str = "message_content_size_bytes";

/// Global status code meter.
pub const HTTP_STATUS_CODES: &str = "frontend_http_status_codes_total";

/// Per-topic status code meter.
pub const TOPIC_HTTP_STATUS_CODES: &str = "frontend_topic_http_status_codes_total";

/// Latency timers, recorded as histograms in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerName {
    /// Reading and parsing the incoming request body.
    RequestRead,
    /// Publish to ack, for topics acknowledged by all replicas.
    AckAllLatency,
    /// Broker round trip, for topics acknowledged by all replicas.
    AckAllBrokerLatency,
    /// Publish to ack, for topics acknowledged by the leader only.
    AckLeaderLatency,
    /// Broker round trip, for topics acknowledged by the leader only.
    AckLeaderBrokerLatency,
    /// Building the message from the parsed request.
    MessageCreation,
}

impl TimerName {
    /// Global series name.
    #[must_use]
    pub const fn global(&self) -> &'static str {
        match self {
            TimerName::RequestRead => "frontend_request_read_latency_seconds",
            TimerName::AckAllLatency => "frontend_ack_all_latency_seconds",
            TimerName::AckAllBrokerLatency => "frontend_ack_all_broker_latency_seconds",
            TimerName::AckLeaderLatency => "frontend_ack_leader_latency_seconds",
            TimerName::AckLeaderBrokerLatency => "frontend_ack_leader_broker_latency_seconds",
            TimerName::MessageCreation => "frontend_message_creation_latency_seconds",
        }
    }

    /// Per-topic series name.
    #[must_use]
    pub const fn per_topic(&self) -> &'static str {
        match self {
            TimerName::RequestRead => "frontend_topic_request_read_latency_seconds",
            TimerName::AckAllLatency => "frontend_topic_ack_all_latency_seconds",
            TimerName::AckAllBrokerLatency => "frontend_topic_ack_all_broker_latency_seconds",
            TimerName::AckLeaderLatency => "frontend_topic_ack_leader_latency_seconds",
            TimerName::AckLeaderBrokerLatency => {
                "frontend_topic_ack_leader_broker_latency_seconds"
            }
            TimerName::MessageCreation => "frontend_topic_message_creation_latency_seconds",
        }
    }

    /// Series name for the given scope.
    #[must_use]
    pub const fn metric_name(&self, per_topic: bool) -> &'static str {
        if per_topic {
            self.per_topic()
        } else {
            self.global()
        }
    }
}

/// Rate meters, exported as counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeterName {
    /// Incoming publish requests.
    Requests,
}

impl MeterName {
    #[must_use]
    pub const fn metric_name(&self, per_topic: bool) -> &'static str {
        match (self, per_topic) {
            (MeterName::Requests, false) => "frontend_requests_total",
            (MeterName::Requests, true) => "frontend_topic_requests_total",
        }
    }
}

/// Plain counters. These only exist per topic; there is no global series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterName {
    /// Messages acknowledged by the broker.
    Published,
}

impl CounterName {
    /// Per-topic series name.
    #[must_use]
    pub const fn metric_name(&self) -> &'static str {
        match self {
            CounterName::Published => "frontend_topic_published_total",
        }
    }
}

/// Value distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistogramName {
    /// Size of the message body in bytes.
    MessageContentSize,
}

impl HistogramName {
    #[must_use]
    pub const fn metric_name(&self, per_topic: bool) -> &'static str {
        match (self, per_topic) {
            (HistogramName::MessageContentSize, false) => "frontend_message_content_size_bytes",
            (HistogramName::MessageContentSize, true) => {
                "frontend_topic_message_content_size_bytes"
            }
        }
    }
}

/// Series name of the status code meter for the given scope.
#[must_use]
pub const fn status_code_metric_name(per_topic: bool) -> &'static str {
    if per_topic {
        TOPIC_HTTP_STATUS_CODES
    } else {
        HTTP_STATUS_CODES
    }
}

/// Build the Prometheus exporter with the configured histogram buckets.
///
/// Histograms without configured buckets are exported as summaries.
///
/// # Errors
///
/// Returns error if a bucket list is rejected by the exporter.
pub fn prometheus_builder(
    config: &MetricsConfig,
) -> Result<PrometheusBuilder, FrontendMetricsError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix(LATENCY_SUFFIX.to_string()),
            &config.latency_buckets,
        )
        .map_err(|e| {
            FrontendMetricsError::RecorderInstall(format!("Failed to set latency buckets: {e}"))
        })?
        .set_buckets_for_metric(
            Matcher::Suffix(CONTENT_SIZE_SUFFIX.to_string()),
            &config.content_size_buckets,
        )
        .map_err(|e| {
            FrontendMetricsError::RecorderInstall(format!(
                "Failed to set content size buckets: {e}"
            ))
        })
}

/// Initialize Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// Must be called before any `CachedTopic` is built: handles resolved
/// before installation stay bound to the no-op recorder.
///
/// # Errors
///
/// Returns error if Prometheus recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder(
    config: &MetricsConfig,
) -> Result<PrometheusHandle, FrontendMetricsError> {
    prometheus_builder(config)?
        .install_recorder()
        .map_err(|e| FrontendMetricsError::RecorderInstall(e.to_string()))
}

/// Load `MetricsConfig` from the environment and install the recorder.
///
/// # Errors
///
/// Returns error if the bucket variables are malformed or the recorder
/// fails to install.
pub fn init_metrics_recorder_from_env() -> Result<PrometheusHandle, FrontendMetricsError> {
    let config = MetricsConfig::from_env()?;
    init_metrics_recorder(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TIMERS: [TimerName; 6] = [
        TimerName::RequestRead,
        TimerName::AckAllLatency,
        TimerName::AckAllBrokerLatency,
        TimerName::AckLeaderLatency,
        TimerName::AckLeaderBrokerLatency,
        TimerName::MessageCreation,
    ];

    #[test]
    fn test_timer_names_follow_conventions() {
        for timer in ALL_TIMERS {
            assert!(timer.global().starts_with("frontend_"));
            assert!(!timer.global().starts_with("frontend_topic_"));
            assert!(timer.per_topic().starts_with("frontend_topic_"));
            assert!(timer.global().ends_with(LATENCY_SUFFIX));
            assert!(timer.per_topic().ends_with(LATENCY_SUFFIX));
            assert_eq!(timer.metric_name(false), timer.global());
            assert_eq!(timer.metric_name(true), timer.per_topic());
        }
    }

    #[test]
    fn test_timer_names_are_unique() {
        let mut names: Vec<&str> = ALL_TIMERS
            .iter()
            .flat_map(|t| [t.global(), t.per_topic()])
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL_TIMERS.len() * 2);
    }

    #[test]
    fn test_counter_style_names_use_total_suffix() {
        for per_topic in [false, true] {
            assert!(MeterName::Requests.metric_name(per_topic).ends_with("_total"));
            assert!(status_code_metric_name(per_topic).ends_with("_total"));
            assert!(HistogramName::MessageContentSize
                .metric_name(per_topic)
                .ends_with(CONTENT_SIZE_SUFFIX));
        }
    }

    #[test]
    fn test_counters_are_per_topic_only() {
        let name = CounterName::Published.metric_name();
        assert!(name.starts_with("frontend_topic_"));
        assert!(name.ends_with("_total"));
    }

    #[test]
    fn test_prometheus_builder_accepts_default_config() {
        assert!(prometheus_builder(&MetricsConfig::default()).is_ok());
    }

    #[test]
    fn test_prometheus_builder_rejects_empty_buckets() {
        let config = MetricsConfig {
            latency_buckets: Vec::new(),
            ..MetricsConfig::default()
        };

        let err = prometheus_builder(&config).err();
        assert!(matches!(err, Some(FrontendMetricsError::RecorderInstall(_))));
    }

    #[test]
    fn test_config_errors_convert() {
        let vars = std::collections::HashMap::from([(
            crate::config::LATENCY_BUCKETS_VAR.to_string(),
            "slow".to_string(),
        )]);
        let err: FrontendMetricsError = MetricsConfig::from_vars(&vars).err().map_or_else(
            || FrontendMetricsError::RecorderInstall("unexpected success".to_string()),
            FrontendMetricsError::from,
        );

        assert!(matches!(err, FrontendMetricsError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
