//! Player rating history
//!
//! Parses history exports and aggregates them into chart series.

pub mod entry;
pub mod series;
pub mod tsv;

pub use entry::{RatingEntry, RatingHistoryRow};
pub use series::{
    aggregate_index_range, aggregate_time_range, chronological, group_by_day, group_by_month,
    has_games, max_games_in_a_month, WinLossSummary,
};
pub use tsv::parse_history_tsv;
