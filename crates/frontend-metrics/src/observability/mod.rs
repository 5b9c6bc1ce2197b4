//! Observability module for the ingestion frontend.
//!
//! # Metrics
//!
//! | Metric | Type | Labels | Purpose |
//! |--------|------|--------|---------|
//! | `frontend_requests_total` | Counter | none | Incoming publish requests |
//! | `frontend_topic_requests_total` | Counter | `group`, `topic` | Publish requests per topic |
//! | `frontend_http_status_codes_total` | Counter | `status_code` | Responses by status code |
//! | `frontend_topic_http_status_codes_total` | Counter | `group`, `topic`, `status_code` | Responses by status code per topic |
//! | `frontend_topic_published_total` | Counter | `group`, `topic` | Messages acknowledged by the broker |
//! | `frontend_*_latency_seconds` | Histogram | none | Global request stage latencies |
//! | `frontend_topic_*_latency_seconds` | Histogram | `group`, `topic` | Request stage latencies per topic |
//! | `frontend_message_content_size_bytes` | Histogram | none | Message body size |
//! | `frontend_topic_message_content_size_bytes` | Histogram | `group`, `topic` | Message body size per topic |

pub mod metrics;

// Re-exports for convenience
pub use self::metrics::{
    init_metrics_recorder, init_metrics_recorder_from_env, prometheus_builder, CounterName,
    HistogramName, MeterName, TimerName,
};
