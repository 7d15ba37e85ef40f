//! Legacy GOR rating system
//!
//! Single-game incremental rating in the style of the European Go Federation
//! formula. Kept for comparison with historical ratings.

use crate::types::Score;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default draw-correction constant
pub const DEFAULT_EPSILON: f64 = 0.016;

/// Lower bound for the `a` spread factor
const MIN_SPREAD: f64 = 70.0;

/// Sensitivity at and beyond the last table row
const CON_FLOOR: f64 = 10.0;

/// (rank, con) rows. Ranks are `rating / 100 + 9`, so rank 10 is rating 100
/// and rank 36 is rating 2700.
const CON_TABLE: [(f64, f64); 27] = [
    (10.0, 116.0),
    (11.0, 110.0),
    (12.0, 105.0),
    (13.0, 100.0),
    (14.0, 95.0),
    (15.0, 90.0),
    (16.0, 85.0),
    (17.0, 80.0),
    (18.0, 75.0),
    (19.0, 70.0),
    (20.0, 65.0),
    (21.0, 60.0),
    (22.0, 55.0),
    (23.0, 51.0),
    (24.0, 47.0),
    (25.0, 43.0),
    (26.0, 39.0),
    (27.0, 35.0),
    (28.0, 31.0),
    (29.0, 27.0),
    (30.0, 24.0),
    (31.0, 21.0),
    (32.0, 18.0),
    (33.0, 15.0),
    (34.0, 13.0),
    (35.0, 11.0),
    (36.0, 10.0),
];

/// GOR rank scale, distinct from the Glicko-2 display ranks
pub fn gor_rank(rating: f64) -> f64 {
    rating / 100.0 + 9.0
}

/// K-factor for a rating.
///
/// Blends the row before and the first row whose rank exceeds the player's:
/// `prev_con * (row_rank - r) + row_con * (r - prev_rank)`.
pub fn con(rating: f64) -> f64 {
    let r = gor_rank(rating);
    let (first_rank, first_con) = CON_TABLE[0];
    if r <= first_rank {
        return first_con;
    }

    for rows in CON_TABLE.windows(2) {
        let (prev_rank, prev_con) = rows[0];
        let (row_rank, row_con) = rows[1];
        if r < row_rank {
            return prev_con * (row_rank - r) + row_con * (r - prev_rank);
        }
    }

    CON_FLOOR
}

/// GOR rating state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GorEntry {
    pub rating: f64,
    /// Additive offset applied when computing expectations
    pub handicap: f64,
    /// Draw-correction constant
    pub epsilon: f64,
}

impl Default for GorEntry {
    fn default() -> Self {
        Self::new(1500.0)
    }
}

impl GorEntry {
    pub fn new(rating: f64) -> Self {
        Self {
            rating,
            handicap: 0.0,
            epsilon: DEFAULT_EPSILON,
        }
    }

    pub fn with_handicap(self, handicap: f64) -> Self {
        Self { handicap, ..self }
    }

    pub fn with_epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    fn effective_rating(&self) -> f64 {
        self.rating + self.handicap
    }

    /// Probability this player beats `opponent`
    pub fn expected_win_probability(&self, opponent: &GorEntry) -> f64 {
        let d = opponent.effective_rating() - self.effective_rating();
        let weaker = self.effective_rating().min(opponent.effective_rating());
        let a = (205.0 - (gor_rank(weaker) - 9.0) * 5.0).max(MIN_SPREAD);

        1.0 / (1.0 + (d / a).exp()) - self.epsilon / 2.0
    }

    pub fn con(&self) -> f64 {
        con(self.rating)
    }
}

/// Rate a single game. Returns the player's new state; inputs are untouched.
pub fn gor_update(player: &GorEntry, opponent: &GorEntry, outcome: Score) -> GorEntry {
    let expected = player.expected_win_probability(opponent);
    let k = player.con();
    let rating = player.rating + k * (outcome - expected);

    debug!(
        old_rating = player.rating,
        new_rating = rating,
        con = k,
        expected,
        "GOR game rated"
    );

    GorEntry { rating, ..*player }
}
