//! Frontend metrics configuration.
//!
//! Configuration is loaded from environment variables. Only the Prometheus
//! histogram layout is configurable; metric names are fixed.

use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default latency buckets in seconds, shared by every `*_latency_seconds`
/// histogram.
pub const DEFAULT_LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000, 2.500, 5.000, 10.000,
];

/// Default message content size buckets in bytes (64 B up to 16 MiB).
pub const DEFAULT_CONTENT_SIZE_BUCKETS: &[f64] = &[
    64.0,
    256.0,
    1_024.0,
    4_096.0,
    16_384.0,
    65_536.0,
    262_144.0,
    1_048_576.0,
    4_194_304.0,
    16_777_216.0,
];

/// Environment variable holding comma-separated latency buckets.
pub const LATENCY_BUCKETS_VAR: &str = "FRONTEND_LATENCY_BUCKETS";

/// Environment variable holding comma-separated content size buckets.
pub const CONTENT_SIZE_BUCKETS_VAR: &str = "FRONTEND_CONTENT_SIZE_BUCKETS";

/// Histogram layout for the Prometheus recorder.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Bucket upper bounds for latency histograms, in seconds.
    pub latency_buckets: Vec<f64>,

    /// Bucket upper bounds for the message content size histograms, in bytes.
    pub content_size_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            latency_buckets: DEFAULT_LATENCY_BUCKETS.to_vec(),
            content_size_buckets: DEFAULT_CONTENT_SIZE_BUCKETS.to_vec(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid histogram buckets in {var}: {reason}")]
    InvalidBuckets { var: String, reason: String },
}

impl MetricsConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBuckets` if a bucket variable is set but
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBuckets` if a bucket variable is not a
    /// non-empty, strictly increasing list of finite positive numbers.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let latency_buckets = match vars.get(LATENCY_BUCKETS_VAR) {
            Some(value) => parse_buckets(LATENCY_BUCKETS_VAR, value)?,
            None => DEFAULT_LATENCY_BUCKETS.to_vec(),
        };

        let content_size_buckets = match vars.get(CONTENT_SIZE_BUCKETS_VAR) {
            Some(value) => parse_buckets(CONTENT_SIZE_BUCKETS_VAR, value)?,
            None => DEFAULT_CONTENT_SIZE_BUCKETS.to_vec(),
        };

        Ok(Self {
            latency_buckets,
            content_size_buckets,
        })
    }
}

/// Parse a comma-separated list of bucket bounds.
///
/// Bounds must be finite, positive and strictly increasing.
fn parse_buckets(var: &str, value: &str) -> Result<Vec<f64>, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBuckets {
        var: var.to_string(),
        reason,
    };

    let buckets = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .map_err(|e| invalid(format!("'{part}' is not a number: {e}")))
        })
        .collect::<Result<Vec<f64>, ConfigError>>()?;

    if buckets.is_empty() {
        return Err(invalid("at least one bucket is required".to_string()));
    }

    if let Some(bad) = buckets.iter().find(|b| !b.is_finite() || **b <= 0.0) {
        return Err(invalid(format!(
            "buckets must be finite and positive, got {bad}"
        )));
    }

    if buckets.windows(2).any(|pair| pair.first() >= pair.last()) {
        return Err(invalid("buckets must be strictly increasing".to_string()));
    }

    Ok(buckets)
}
