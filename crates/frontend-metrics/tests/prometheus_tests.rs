//! End-to-end check that facade observations render through the
//! Prometheus exporter with the configured layout.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use frontend_metrics::observability::prometheus_builder;
use frontend_metrics::{CachedTopics, FrontendMetrics, MetricsConfig};
use frontend_test_utils::ack_all_topic;
use std::collections::HashMap;
use std::sync::Arc;

#[test]
fn test_facade_renders_through_prometheus_recorder() {
    let config = MetricsConfig::from_vars(&HashMap::from([(
        "FRONTEND_CONTENT_SIZE_BUCKETS".to_string(),
        "100,200,300".to_string(),
    )]))
    .expect("Config should load successfully");

    let recorder = prometheus_builder(&config)
        .expect("Builder should accept config")
        .build_recorder();
    let handle = recorder.handle();

    let topics = CachedTopics::new(Arc::new(FrontendMetrics::new()));
    metrics::with_local_recorder(&recorder, || {
        let cached = topics.get_or_create(&ack_all_topic());
        cached.mark_request_meter();
        cached.mark_request_meter();
        cached.mark_status_code_meter(201);
        cached.increment_published();
        cached.report_message_content_size(150);
        cached.start_producer_latency_timers().stop();
    });

    let rendered = handle.render();

    assert!(rendered.contains("frontend_requests_total 2"), "{rendered}");
    assert!(
        rendered.contains(
            r#"frontend_topic_requests_total{group="pl.allegro.test",topic="orders"} 2"#
        ),
        "{rendered}"
    );
    assert!(
        rendered.contains(r#"frontend_http_status_codes_total{status_code="201"} 1"#),
        "{rendered}"
    );
    assert!(
        rendered.contains(
            r#"frontend_topic_published_total{group="pl.allegro.test",topic="orders"} 1"#
        ),
        "{rendered}"
    );
    assert!(!rendered.contains("frontend_published_total"), "{rendered}");

    // Configured buckets turn the content size histograms into Prometheus histograms.
    assert!(
        rendered.contains("frontend_message_content_size_bytes_bucket"),
        "{rendered}"
    );
    assert!(
        rendered.contains("frontend_message_content_size_bytes_count 1"),
        "{rendered}"
    );
    assert!(
        rendered.contains("frontend_ack_all_latency_seconds_bucket"),
        "{rendered}"
    );
    assert!(!rendered.contains("frontend_ack_leader"), "{rendered}");
}
