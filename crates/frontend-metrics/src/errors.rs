//! Frontend metrics error types.
//!
//! Recording never fails; these errors only come from configuration and
//! recorder installation at startup.

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontendMetricsError {
    /// Metrics configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Prometheus recorder could not be built or installed.
    #[error("Failed to install Prometheus metrics recorder: {0}")]
    RecorderInstall(String),
}
