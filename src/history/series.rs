//! Rating history series
//!
//! Turns a player's history rows into chart-ready series: chronological
//! per-game entries, daily and monthly buckets, and win/loss summaries over
//! a selected range.

use crate::history::entry::{RatingEntry, RatingHistoryRow};
use crate::ranks::StrengthClassifier;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Build entries from rows delivered newest first.
///
/// Entries come back oldest first with `index` set to their position.
pub fn chronological(
    rows_newest_first: &[RatingHistoryRow],
    classifier: &dyn StrengthClassifier,
) -> Vec<RatingEntry> {
    let entries: Vec<RatingEntry> = rows_newest_first
        .iter()
        .rev()
        .enumerate()
        .map(|(index, row)| {
            let mut entry = RatingEntry::from_row(row, classifier);
            entry.index = Some(index);
            entry
        })
        .collect();

    debug!(entries = entries.len(), "Built chronological rating series");
    entries
}

/// A history always starts with a seed entry; anything beyond it is a game
pub fn has_games(entries: &[RatingEntry]) -> bool {
    entries.len() > 1
}

fn day_key(ended: &DateTime<Utc>) -> NaiveDate {
    ended.date_naive()
}

fn month_key(ended: &DateTime<Utc>) -> (i32, u32) {
    (ended.year(), ended.month())
}

/// Group chronological entries into UTC days.
///
/// A day's starting rating is the rating after its first game, and its count
/// starts at one even when that first entry is the seed.
pub fn group_by_day(entries: &[RatingEntry]) -> Vec<RatingEntry> {
    let mut days: Vec<RatingEntry> = Vec::new();
    let mut last_key = None;

    for entry in entries {
        let key = day_key(&entry.ended);
        if last_key != Some(key) {
            last_key = Some(key);
            let mut day = entry.clone();
            day.starting_rating = day.rating;
            day.starting_deviation = day.deviation;
            day.count = 1;
            day.increase = false;
            days.push(day);
        } else if let Some(day) = days.last_mut() {
            day.merge(entry);
        }

        mark_increase(&mut days);
    }

    days
}

/// Group chronological entries into UTC calendar months
pub fn group_by_month(entries: &[RatingEntry]) -> Vec<RatingEntry> {
    let mut months: Vec<RatingEntry> = Vec::new();
    let mut last_key = None;

    for entry in entries {
        let key = month_key(&entry.ended);
        if last_key != Some(key) {
            last_key = Some(key);
            months.push(entry.clone());
        } else if let Some(month) = months.last_mut() {
            month.merge(entry);
        }

        mark_increase(&mut months);
    }

    months
}

/// Flag the newest bucket as rising when it ends above the previous one
fn mark_increase(buckets: &mut [RatingEntry]) {
    match buckets {
        [] => {}
        [only] => only.increase = false,
        [.., previous, current] => current.increase = previous.rating < current.rating,
    }
}

pub fn max_games_in_a_month(months: &[RatingEntry]) -> u32 {
    months.iter().map(|month| month.count).max().unwrap_or(0)
}

fn fold<'a>(entries: impl Iterator<Item = &'a RatingEntry>) -> Option<RatingEntry> {
    entries.fold(None, |acc: Option<RatingEntry>, entry| match acc {
        None => Some(entry.clone()),
        Some(mut agg) => {
            agg.merge(entry);
            Some(agg)
        }
    })
}

/// Fold entries whose `index` lies in `start..=end`
pub fn aggregate_index_range(
    entries: &[RatingEntry],
    start: usize,
    end: usize,
) -> Option<RatingEntry> {
    fold(
        entries
            .iter()
            .filter(|entry| matches!(entry.index, Some(i) if i >= start && i <= end)),
    )
}

/// Fold entries that ended within `start..=end`
pub fn aggregate_time_range(
    entries: &[RatingEntry],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Option<RatingEntry> {
    fold(
        entries
            .iter()
            .filter(|entry| entry.ended >= start && entry.ended <= end),
    )
}

/// Win/loss split shown next to the rating charts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLossSummary {
    pub strong_wins: u32,
    pub weak_wins: u32,
    pub strong_losses: u32,
    pub weak_losses: u32,
}

impl WinLossSummary {
    pub fn games(&self) -> u32 {
        self.strong_wins + self.weak_wins + self.strong_losses + self.weak_losses
    }

    pub fn wins(&self) -> u32 {
        self.strong_wins + self.weak_wins
    }

    pub fn losses(&self) -> u32 {
        self.strong_losses + self.weak_losses
    }
}

impl From<Option<&RatingEntry>> for WinLossSummary {
    fn from(aggregate: Option<&RatingEntry>) -> Self {
        aggregate
            .map(|agg| Self {
                strong_wins: agg.strong_wins,
                weak_wins: agg.weak_wins,
                strong_losses: agg.strong_losses,
                weak_losses: agg.weak_losses,
            })
            .unwrap_or_default()
    }
}
