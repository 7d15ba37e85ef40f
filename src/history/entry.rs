//! Per-game rating history entries
//!
//! One [`RatingEntry`] per rated game. Entries fold together with
//! [`RatingEntry::merge`] to produce daily, monthly or range summaries.

use crate::ranks::StrengthClassifier;
use crate::types::{Color, GameId, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row as delivered by the rating history source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingHistoryRow {
    pub ended: DateTime<Utc>,
    pub game_id: GameId,
    pub played_black: bool,
    pub handicap: i32,
    /// Player's rating after the game
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
    pub opponent_id: PlayerId,
    pub opponent_rating: f64,
    pub opponent_deviation: f64,
    /// Positive for a win
    pub outcome: f64,
    #[serde(default)]
    pub extra: serde_json::Value,
}

/// A game's rating snapshot plus the win/loss counters it contributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub ended: DateTime<Utc>,
    pub game_id: GameId,
    pub played_black: bool,
    pub handicap: i32,

    pub starting_rating: f64,
    pub starting_deviation: f64,
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,

    pub opponent_id: PlayerId,
    pub opponent_rating: f64,
    pub opponent_deviation: f64,
    pub outcome: f64,
    pub extra: serde_json::Value,

    /// Whether the opponent was effectively stronger once handicap is applied
    pub opponent_stronger: bool,
    /// Rating rose relative to the previous bucket (set by series grouping)
    pub increase: bool,

    pub count: u32,
    pub wins: u32,
    pub losses: u32,
    pub strong_wins: u32,
    pub strong_losses: u32,
    pub weak_wins: u32,
    pub weak_losses: u32,

    /// Chart position, assigned once the whole history is known
    pub index: Option<usize>,
}

impl RatingEntry {
    /// Build an entry from a history row.
    ///
    /// Rows with `opponent_id <= 0` are seed rows: they anchor the series but
    /// never count as games.
    pub fn from_row(row: &RatingHistoryRow, classifier: &dyn StrengthClassifier) -> Self {
        let is_game = row.opponent_id > 0;
        let won = row.outcome > 0.0;

        let count = u32::from(is_game);
        let wins = u32::from(is_game && won);
        let losses = u32::from(is_game && !won);

        let (black_rating, white_rating) = if row.played_black {
            (row.rating, row.opponent_rating)
        } else {
            (row.opponent_rating, row.rating)
        };
        let eff = classifier.effective_outcome(black_rating, white_rating, row.handicap);
        let opponent_stronger = if row.played_black {
            eff.white_effective_stronger
        } else {
            eff.black_effective_stronger
        };

        let (strong_wins, strong_losses, weak_wins, weak_losses) = if opponent_stronger {
            (wins, losses, 0, 0)
        } else {
            (0, 0, wins, losses)
        };

        Self {
            ended: row.ended,
            game_id: row.game_id,
            played_black: row.played_black,
            handicap: row.handicap,
            starting_rating: row.rating,
            starting_deviation: row.deviation,
            rating: row.rating,
            deviation: row.deviation,
            volatility: row.volatility,
            opponent_id: row.opponent_id,
            opponent_rating: row.opponent_rating,
            opponent_deviation: row.opponent_deviation,
            outcome: row.outcome,
            extra: row.extra.clone(),
            opponent_stronger,
            increase: false,
            count,
            wins,
            losses,
            strong_wins,
            strong_losses,
            weak_wins,
            weak_losses,
            index: None,
        }
    }

    pub fn color(&self) -> Color {
        if self.played_black {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn is_seed(&self) -> bool {
        self.opponent_id <= 0
    }

    /// Fold `other` into this entry.
    ///
    /// Rating state advances to `other`; counters are summed. Only meaningful
    /// when reducing a history left to right, and `index` is left untouched.
    pub fn merge(&mut self, other: &RatingEntry) {
        self.rating = other.rating;
        self.deviation = other.deviation;
        self.volatility = other.volatility;
        self.increase = other.increase;

        self.count += other.count;
        self.wins += other.wins;
        self.losses += other.losses;
        self.strong_wins += other.strong_wins;
        self.strong_losses += other.strong_losses;
        self.weak_wins += other.weak_wins;
        self.weak_losses += other.weak_losses;
    }
}
