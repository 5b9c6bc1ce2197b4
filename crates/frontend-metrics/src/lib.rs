//! Per-topic metrics for the message ingestion frontend.
//!
//! [`CachedTopic`] binds, once per topic, every instrument the request path
//! records into. Each observation is mirrored into a per-topic series and a
//! global series through the paired handles in [`pairs`]. Status code meters
//! are built lazily, exactly once per code.
//!
//! Instruments are resolved through a [`MetricsProvider`]. The production
//! provider, [`FrontendMetrics`], resolves them from the `metrics` recorder
//! installed by [`observability::init_metrics_recorder`].

#![warn(clippy::pedantic)]

pub mod cached_topic;
pub mod config;
pub mod errors;
pub mod observability;
pub mod pairs;
pub mod provider;
pub mod registry;
pub mod status_codes;

pub use cached_topic::{CachedTopic, LatencyFamily};
pub use config::MetricsConfig;
pub use errors::FrontendMetricsError;
pub use pairs::{HistogramsPair, MetersPair, StartedTimersPair, TimersPair};
pub use provider::{Counter, FrontendMetrics, Histogram, Meter, MetricsProvider, Timer};
pub use registry::CachedTopics;
pub use status_codes::StatusCodeMeters;
