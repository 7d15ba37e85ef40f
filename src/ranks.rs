//! Rank utilities
//!
//! Conversions between Glicko-2 ratings and Go ranks (30k = rank 0,
//! 1d = rank 30), plus the handicap-aware strength comparison used to
//! classify historical games.

use crate::rating::glicko2::{MAX_RATING, MIN_RATING};
use serde::{Deserialize, Serialize};

/// Lowest rank shown without a "bounded" marker (25k)
pub const MIN_RANK: f64 = 5.0;

/// Highest rank shown without a "bounded" marker (9d)
pub const MAX_RANK: f64 = 38.0;

/// Deviation at or above which a rating is considered provisional
pub const PROVISIONAL_DEVIATION_CUTOFF: f64 = 160.0;

/// Deviation assigned to unrated players
pub const UNRATED_DEVIATION: f64 = 350.0;

const RANK_BASE_RATING: f64 = 525.0;
const RANK_SCALE: f64 = 23.15;

pub fn rank_to_rating(rank: f64) -> f64 {
    RANK_BASE_RATING * (rank / RANK_SCALE).exp()
}

pub fn rating_to_rank(rating: f64) -> f64 {
    (rating.max(MIN_RATING).min(MAX_RATING) / RANK_BASE_RATING).ln() * RANK_SCALE
}

/// Width of one deviation expressed in ranks
pub fn rank_deviation(rating: f64, deviation: f64) -> f64 {
    rating_to_rank(rating + deviation) - rating_to_rank(rating)
}

/// Rating pulled down by up to one deviation while the rating is provisional
pub fn humble_rating(rating: f64, deviation: f64) -> f64 {
    let clamped = deviation
        .max(PROVISIONAL_DEVIATION_CUTOFF)
        .min(UNRATED_DEVIATION);
    rating
        - ((clamped - PROVISIONAL_DEVIATION_CUTOFF)
            / (UNRATED_DEVIATION - PROVISIONAL_DEVIATION_CUTOFF))
            * deviation
}

pub fn is_novice(rank: f64) -> bool {
    rank < MIN_RANK
}

pub fn is_rank_bounded(rank: f64) -> bool {
    rank < MIN_RANK || rank > MAX_RANK
}

pub fn bounded_rank(rank: f64) -> f64 {
    rank.max(MIN_RANK).min(MAX_RANK)
}

pub fn is_provisional(deviation: f64) -> bool {
    deviation >= PROVISIONAL_DEVIATION_CUTOFF
}

/// Rating points `handicap` stones are worth to a player of `rating`
pub fn get_handicap_adjustment(rating: f64, handicap: i32) -> f64 {
    rank_to_rating(rating_to_rank(rating) + handicap as f64) - rating
}

/// Short rank label: "7k", "3d", or with a decimal "6.3k", "3.5d"
pub fn rank_label(rank: f64, with_decimal: bool) -> String {
    if rank < 30.0 {
        if with_decimal {
            format!("{:.1}k", 30.0 - rank)
        } else {
            format!("{}k", 30 - rank.floor() as i64)
        }
    } else if with_decimal {
        format!("{:.1}d", rank - 29.0)
    } else {
        format!("{}d", rank.floor() as i64 - 29)
    }
}

/// Who is stronger in a game, before and after handicap compensation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveOutcome {
    pub black_real_stronger: bool,
    pub white_real_stronger: bool,
    pub black_effective_stronger: bool,
    pub white_effective_stronger: bool,
}

/// Compare two players once black's handicap stones are accounted for
pub fn effective_outcome(black_rating: f64, white_rating: f64, handicap: i32) -> EffectiveOutcome {
    let black_effective = black_rating + get_handicap_adjustment(black_rating, handicap);
    let black_real_stronger = black_rating > white_rating;
    let black_effective_stronger = black_effective > white_rating;

    EffectiveOutcome {
        black_real_stronger,
        white_real_stronger: !black_real_stronger,
        black_effective_stronger,
        white_effective_stronger: !black_effective_stronger,
    }
}

/// Decides which colour was effectively stronger in a game
#[cfg_attr(test, mockall::automock)]
pub trait StrengthClassifier {
    fn effective_outcome(
        &self,
        black_rating: f64,
        white_rating: f64,
        handicap: i32,
    ) -> EffectiveOutcome;
}

/// Default classifier using the rank-scale handicap adjustment
#[derive(Debug, Clone, Copy, Default)]
pub struct HandicapAwareClassifier;

impl StrengthClassifier for HandicapAwareClassifier {
    fn effective_outcome(
        &self,
        black_rating: f64,
        white_rating: f64,
        handicap: i32,
    ) -> EffectiveOutcome {
        effective_outcome(black_rating, white_rating, handicap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_to_rating() {
        assert!((rank_to_rating(0.0) - 525.0).abs() < 1e-9);
        assert!((rank_to_rating(23.15) - std::f64::consts::E * 525.0).abs() < 1e-9);
        assert!((rank_to_rating(30.0) - 1918.492).abs() < 0.001);
    }

    #[test]
    fn test_rating_to_rank() {
        assert!(rating_to_rank(525.0).abs() < 1e-9);
        assert!((rating_to_rank(std::f64::consts::E * 525.0) - 23.15).abs() < 1e-9);
        assert!((rating_to_rank(2000.0) - 30.963).abs() < 0.001);
        assert_eq!(rating_to_rank(50.0), rating_to_rank(MIN_RATING));
        assert_eq!(rating_to_rank(9000.0), rating_to_rank(MAX_RATING));
    }

    #[test]
    fn test_rank_deviation() {
        assert!((rank_deviation(1500.0, 350.0) - 4.855).abs() < 0.001);
    }

    #[test]
    fn test_rank_bounds() {
        assert!(is_novice(0.0));
        assert!(!is_novice(10.0));

        assert!(is_rank_bounded(0.0));
        assert!(!is_rank_bounded(30.0));
        assert!(is_rank_bounded(40.0));

        assert_eq!(bounded_rank(0.0), 5.0);
        assert_eq!(bounded_rank(30.0), 30.0);
        assert_eq!(bounded_rank(40.0), 38.0);
    }

    #[test]
    fn test_is_provisional() {
        assert!(is_provisional(350.0));
        assert!(!is_provisional(62.0));
    }

    #[test]
    fn test_humble_rating() {
        assert_eq!(humble_rating(1500.0, 350.0), 1150.0);
        assert_eq!(humble_rating(1500.0, 100.0), 1500.0);
    }

    #[test]
    fn test_rank_labels() {
        assert_eq!(rank_label(23.0, false), "7k");
        assert_eq!(rank_label(23.7, true), "6.3k");
        assert_eq!(rank_label(32.5, false), "3d");
        assert_eq!(rank_label(32.5, true), "3.5d");
        assert_eq!(rank_label(30.0, false), "1d");
        assert_eq!(rank_label(29.0, false), "1k");
    }

    #[test]
    fn test_handicap_adjustment_is_one_rank_per_stone() {
        let rating = rank_to_rating(20.0);
        let adjusted = rating + get_handicap_adjustment(rating, 3);
        assert!((rating_to_rank(adjusted) - 23.0).abs() < 1e-9);
        assert!(get_handicap_adjustment(rating, 0).abs() < 1e-9);
    }

    #[test]
    fn test_effective_outcome() {
        let rating_1d = rank_to_rating(30.0);
        let rating_3k = rank_to_rating(27.0);

        let one_stone = effective_outcome(rating_3k, rating_1d, 1);
        assert!(!one_stone.black_effective_stronger);
        assert!(!one_stone.black_real_stronger);
        assert!(one_stone.white_effective_stronger);
        assert!(one_stone.white_real_stronger);

        let eight_stones = effective_outcome(rating_3k, rating_1d, 8);
        assert!(eight_stones.black_effective_stronger);
        assert!(!eight_stones.black_real_stronger);
        assert!(!eight_stones.white_effective_stronger);
        assert!(eight_stones.white_real_stronger);
    }

    #[test]
    fn test_default_classifier_delegates() {
        let classifier = HandicapAwareClassifier;
        assert_eq!(
            classifier.effective_outcome(1200.0, 1500.0, 0),
            effective_outcome(1200.0, 1500.0, 0)
        );
    }
}
