//! Rating system configuration

use crate::rating::glicko2::Glicko2Config;
use crate::rating::gor::{GorEntry, DEFAULT_EPSILON};
use serde::{Deserialize, Serialize};

/// GOR tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GorConfig {
    /// Draw-correction constant subtracted from expectations
    pub epsilon: f64,
}

impl Default for GorConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl GorConfig {
    /// Fresh GOR state carrying these tunables
    pub fn entry(&self, rating: f64) -> GorEntry {
        GorEntry::new(rating).with_epsilon(self.epsilon)
    }
}

/// Configuration for both rating engines
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingConfig {
    #[serde(default)]
    pub glicko2: Glicko2Config,
    #[serde(default)]
    pub gor: GorConfig,
}

impl RatingConfig {
    /// Slow-moving volatility and a tighter deviation ceiling
    pub fn conservative() -> Self {
        Self {
            glicko2: Glicko2Config::new(0.3, 10.0, 350.0),
            gor: GorConfig::default(),
        }
    }

    /// Volatility reacts quickly to streaks
    pub fn responsive() -> Self {
        Self {
            glicko2: Glicko2Config::new(1.2, 10.0, 500.0),
            gor: GorConfig::default(),
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        self.glicko2.validate()?;

        if !(0.0..1.0).contains(&self.gor.epsilon) {
            return Err(crate::error::RatingError::ConfigurationError {
                message: format!("GOR epsilon must be in [0, 1), got {}", self.gor.epsilon),
            }
            .into());
        }

        Ok(())
    }
}
