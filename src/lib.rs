//! Go Ratings - rating engines for a Go server
//!
//! This crate provides the Glicko-2 and legacy GOR rating engines, rank
//! conversions, and aggregation of per-game rating history into chart series.

pub mod config;
pub mod error;
pub mod history;
pub mod ranks;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use history::{RatingEntry, RatingHistoryRow};
pub use ranks::{HandicapAwareClassifier, StrengthClassifier};
pub use rating::{glicko2_update, gor_update, Glicko2Config, Glicko2Entry, GorEntry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
