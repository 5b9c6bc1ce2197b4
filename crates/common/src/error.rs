//! Common error types for the frontend metrics crates.

use thiserror::Error;

/// Common errors that can occur across the frontend metrics crates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// Qualified topic name could not be split into group and topic
    #[error("Invalid topic name: {0}")]
    InvalidTopicName(String),
}

/// Result type alias using `CommonError`
pub type Result<T> = std::result::Result<T, CommonError>;
