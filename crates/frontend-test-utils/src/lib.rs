//! # Frontend Test Utilities
//!
//! Shared test utilities for the frontend metrics facade.
//!
//! ## Modules
//!
//! - `recording_provider` - `MetricsProvider` that records every instrument request
//! - `snapshot` - Assertions over metrics captured by a `DebuggingRecorder`
//! - `fixtures` - Pre-configured topics
//!
//! ## Usage
//!
//! ```rust,ignore
//! use frontend_test_utils::*;
//! use metrics_util::debugging::DebuggingRecorder;
//!
//! let recorder = DebuggingRecorder::new();
//! let snapshotter = recorder.snapshotter();
//! let provider = Arc::new(RecordingProvider::new());
//!
//! let cached = metrics::with_local_recorder(&recorder, || {
//!     CachedTopic::new(ack_all_topic(), provider.clone())
//! });
//! cached.mark_request_meter();
//!
//! let snapshot = MetricsSnapshot::capture(&snapshotter);
//! assert_eq!(snapshot.counter("frontend_requests_total", &[]), Some(1));
//! ```

pub mod fixtures;
pub mod recording_provider;
pub mod snapshot;

// Re-export commonly used items
pub use fixtures::*;
pub use recording_provider::*;
pub use snapshot::*;
