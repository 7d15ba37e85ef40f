//! Common types used throughout the rating crate

use crate::rating::glicko2::{Glicko2Config, Glicko2Entry};
use serde::{Deserialize, Serialize};
use skillratings::glicko2::Glicko2Rating;

/// Server-side player identifier. Values `<= 0` mark synthetic seed rows.
pub type PlayerId = i64;

/// Server-side game identifier
pub type GameId = i64;

/// Score of a single game from one player's point of view (1 = win, 0 = loss)
pub type Score = f64;

/// Stone colour a player held in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

impl From<Glicko2Entry> for Glicko2Rating {
    fn from(entry: Glicko2Entry) -> Self {
        Self {
            rating: entry.rating,
            deviation: entry.deviation,
            volatility: entry.volatility,
        }
    }
}

impl From<Glicko2Rating> for Glicko2Entry {
    fn from(rating: Glicko2Rating) -> Self {
        Glicko2Entry::with_config(
            rating.rating,
            rating.deviation,
            rating.volatility,
            Glicko2Config::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.to_string(), "black");
    }

    #[test]
    fn test_skillratings_conversion_round_trip() {
        let entry = Glicko2Entry::new(1620.0, 85.0, 0.061);
        let rating: Glicko2Rating = entry.into();
        assert_eq!(rating.rating, 1620.0);
        assert_eq!(rating.deviation, 85.0);

        let back: Glicko2Entry = rating.into();
        assert_eq!(back, entry);
    }
}
