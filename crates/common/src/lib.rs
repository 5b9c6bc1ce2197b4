//! Common types shared across the frontend metrics crates.

#![warn(clippy::pedantic)]

/// Module for common error types
pub mod error;

/// Module for topic descriptor types
pub mod types;
