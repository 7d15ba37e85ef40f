//! Configuration management for the go-ratings tools
//!
//! Loading from environment variables and TOML files, validation, and
//! default values for both rating engines.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::{GorConfig, RatingConfig};
