//! Manual rating calculator
//!
//! Previews what a single game would do to both players' ratings, for each
//! possible result, before the game is played.

use crate::ranks::get_handicap_adjustment;
use crate::rating::glicko2::{glicko2_update, Glicko2Entry};
use crate::rating::gor::{gor_update, GorEntry};
use serde::{Deserialize, Serialize};

/// Post-game Glicko-2 states for every result of one game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPreview {
    pub black_win: Glicko2Entry,
    pub black_loss: Glicko2Entry,
    pub white_win: Glicko2Entry,
    pub white_loss: Glicko2Entry,
}

impl MatchPreview {
    /// Rating change for black as (if black wins, if black loses)
    pub fn black_deltas(&self, black: &Glicko2Entry) -> (f64, f64) {
        (
            self.black_win.rating - black.rating,
            self.black_loss.rating - black.rating,
        )
    }

    /// Rating change for white as (if white wins, if white loses)
    pub fn white_deltas(&self, white: &Glicko2Entry) -> (f64, f64) {
        (
            self.white_win.rating - white.rating,
            self.white_loss.rating - white.rating,
        )
    }
}

/// Preview a Glicko-2 game between `black` and `white`.
///
/// With handicap stones, black is rated against a white weakened by the
/// handicap, and white against a black strengthened by it.
pub fn preview_match(black: &Glicko2Entry, white: &Glicko2Entry, handicap: i32) -> MatchPreview {
    let (black_opponent, white_opponent) = if handicap > 0 {
        let black_up = get_handicap_adjustment(black.rating, handicap);
        let white_down = get_handicap_adjustment(white.rating, handicap);
        (white.adjusted(-white_down, 0.0), black.adjusted(black_up, 0.0))
    } else {
        (*white, *black)
    };

    MatchPreview {
        black_win: glicko2_update(black, &[(black_opponent, 1.0)]),
        black_loss: glicko2_update(black, &[(black_opponent, 0.0)]),
        white_win: glicko2_update(white, &[(white_opponent, 1.0)]),
        white_loss: glicko2_update(white, &[(white_opponent, 0.0)]),
    }
}

/// Post-game GOR states for every result of one game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GorPreview {
    pub black_win: GorEntry,
    pub black_loss: GorEntry,
    pub white_win: GorEntry,
    pub white_loss: GorEntry,
}

pub fn preview_gor_match(black: &GorEntry, white: &GorEntry) -> GorPreview {
    GorPreview {
        black_win: gor_update(black, white, 1.0),
        black_loss: gor_update(black, white, 0.0),
        white_win: gor_update(white, black, 1.0),
        white_loss: gor_update(white, black, 0.0),
    }
}
