//! Glicko-2 rating engine
//!
//! Rating-period batch form of Glickman's Glicko-2 system. Every update is a
//! pure function: it reads the player and opponent states and returns a new
//! state, saturated to the configured bounds instead of failing.

use crate::rating::volatility::{VolatilityProblem, VolatilitySolution};
use crate::types::Score;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Conversion factor between the display scale and the internal Glicko-2 scale
pub const GLICKO2_SCALE: f64 = 173.7178;

/// Centre of the display scale
pub const GLICKO2_CENTER: f64 = 1500.0;

/// Lowest rating an update can produce
pub const MIN_RATING: f64 = 100.0;

/// Highest rating an update can produce
pub const MAX_RATING: f64 = 6000.0;

pub const MIN_VOLATILITY: f64 = 0.01;
pub const MAX_VOLATILITY: f64 = 0.15;

/// Variance used when every outcome in a period was fully certain
pub const CERTAIN_OUTCOME_VARIANCE: f64 = 9999.0;

/// Tunable Glicko-2 parameters. Entries compared in one computation must share
/// the same configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glicko2Config {
    /// Constrains the change in volatility over time
    pub tao: f64,
    /// Lower bound for rating deviation
    pub min_rd: f64,
    /// Upper bound for rating deviation
    pub max_rd: f64,
}

impl Default for Glicko2Config {
    fn default() -> Self {
        Self {
            tao: 0.5,
            min_rd: 10.0,
            max_rd: 500.0,
        }
    }
}

impl Glicko2Config {
    pub fn new(tao: f64, min_rd: f64, max_rd: f64) -> Self {
        Self {
            tao,
            min_rd,
            max_rd,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.tao.is_nan() || self.tao <= 0.0 {
            return Err(crate::error::RatingError::ConfigurationError {
                message: "Glicko-2 tao must be positive".to_string(),
            }
            .into());
        }

        if self.min_rd.is_nan() || self.min_rd <= 0.0 {
            return Err(crate::error::RatingError::ConfigurationError {
                message: "Glicko-2 min_rd must be positive".to_string(),
            }
            .into());
        }

        if self.min_rd > self.max_rd {
            return Err(crate::error::RatingError::ConfigurationError {
                message: format!(
                    "Glicko-2 min_rd ({}) exceeds max_rd ({})",
                    self.min_rd, self.max_rd
                ),
            }
            .into());
        }

        Ok(())
    }
}

/// A player's Glicko-2 rating state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glicko2Entry {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
    #[serde(default)]
    pub config: Glicko2Config,
}

impl Default for Glicko2Entry {
    fn default() -> Self {
        Self::new(GLICKO2_CENTER, 350.0, 0.06)
    }
}

impl Glicko2Entry {
    /// Create an entry with the default configuration
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Self {
        Self::with_config(rating, deviation, volatility, Glicko2Config::default())
    }

    pub fn with_config(
        rating: f64,
        deviation: f64,
        volatility: f64,
        config: Glicko2Config,
    ) -> Self {
        Self {
            rating,
            deviation,
            volatility,
            config,
        }
    }

    /// Return this entry with different tunables
    pub fn configure(self, config: Glicko2Config) -> Self {
        Self { config, ..self }
    }

    /// Rating on the internal scale
    pub fn mu(&self) -> f64 {
        (self.rating - GLICKO2_CENTER) / GLICKO2_SCALE
    }

    /// Deviation on the internal scale
    pub fn phi(&self) -> f64 {
        self.deviation / GLICKO2_SCALE
    }

    /// Copy with the rating and deviation shifted, used for handicap previews
    pub fn adjusted(&self, rating_adjustment: f64, deviation_adjustment: f64) -> Self {
        Self {
            rating: self.rating + rating_adjustment,
            deviation: self.deviation + deviation_adjustment,
            ..*self
        }
    }

    /// Grow the deviation to account for `periods` rating periods without games
    pub fn expand_deviation_because_no_games_played(&self, periods: u32) -> Self {
        let min_phi = self.config.min_rd / GLICKO2_SCALE;
        let max_phi = self.config.max_rd / GLICKO2_SCALE;

        let mut phi = self.phi();
        for _ in 0..periods {
            phi = saturate(
                (phi * phi + self.volatility * self.volatility).sqrt(),
                min_phi,
                max_phi,
                phi,
            );
        }

        Self {
            deviation: phi * GLICKO2_SCALE,
            ..*self
        }
    }

    /// Probability that this player beats `opponent`.
    ///
    /// `handicap_adjustment` is added to this player's rating. With `ignore_g`
    /// the opponent's deviation does not flatten the curve.
    pub fn expected_win_probability(
        &self,
        opponent: &Glicko2Entry,
        handicap_adjustment: f64,
        ignore_g: bool,
    ) -> f64 {
        let g = if ignore_g { 1.0 } else { g(opponent.phi()) };
        let difference = (self.rating + handicap_adjustment - opponent.rating) / GLICKO2_SCALE;
        1.0 / (1.0 + (-g * difference).exp())
    }
}

/// Deviation attenuation factor
fn g(phi: f64) -> f64 {
    1.0 / (1.0 + (3.0 * phi * phi) / (PI * PI)).sqrt()
}

/// Clamp `value` to `[lo, hi]`, falling back to `fallback` for NaN
fn saturate(value: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    let value = if value.is_nan() { fallback } else { value };
    value.max(lo).min(hi)
}

/// Compute a player's state after one rating period.
///
/// `matches` holds every (opponent, score) pair the player took part in during
/// the period, with opponents as they were before the period started.
pub fn glicko2_update(player: &Glicko2Entry, matches: &[(Glicko2Entry, Score)]) -> Glicko2Entry {
    if matches.is_empty() {
        return *player;
    }

    let mu = player.mu();
    let phi = player.phi();

    let mut v_sum = 0.0;
    let mut delta_sum = 0.0;
    for (opponent, outcome) in matches {
        let g_phi = g(opponent.phi());
        let expected = 1.0 / (1.0 + (-g_phi * (mu - opponent.mu())).exp());
        v_sum += g_phi * g_phi * expected * (1.0 - expected);
        delta_sum += g_phi * (outcome - expected);
    }

    let v = if v_sum == 0.0 {
        CERTAIN_OUTCOME_VARIANCE
    } else {
        1.0 / v_sum
    };
    let delta = v * delta_sum;

    let VolatilitySolution {
        volatility: new_volatility,
        iterations,
        converged,
    } = VolatilityProblem {
        delta,
        phi,
        v,
        volatility: player.volatility,
        tao: player.config.tao,
    }
    .solve();

    let phi_star = (phi * phi + new_volatility * new_volatility).sqrt();
    let phi_prime = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / v).sqrt();
    let mu_prime = mu + phi_prime * phi_prime * delta_sum;

    let config = player.config;
    let result = Glicko2Entry {
        rating: saturate(
            GLICKO2_SCALE * mu_prime + GLICKO2_CENTER,
            MIN_RATING,
            MAX_RATING,
            player.rating,
        ),
        deviation: saturate(
            GLICKO2_SCALE * phi_prime,
            config.min_rd,
            config.max_rd,
            player.deviation,
        ),
        volatility: saturate(
            new_volatility,
            MIN_VOLATILITY,
            MAX_VOLATILITY,
            player.volatility,
        ),
        config,
    };

    debug!(
        games = matches.len(),
        iterations,
        converged,
        old_rating = player.rating,
        new_rating = result.rating,
        "Glicko-2 period resolved"
    );

    result
}
