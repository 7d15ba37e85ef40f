//! Rating engines
//!
//! Glicko-2 with a bounded volatility solver, the legacy GOR formula, a
//! batch rating period and the manual calculator built on top of them.

pub mod calculator;
pub mod glicko2;
pub mod gor;
pub mod period;
pub mod volatility;

// Re-export commonly used types
pub use calculator::{preview_gor_match, preview_match, GorPreview, MatchPreview};
pub use glicko2::{glicko2_update, Glicko2Config, Glicko2Entry};
pub use gor::{gor_update, GorEntry};
pub use period::{PeriodGame, RatingPeriod};
pub use volatility::{VolatilityProblem, VolatilitySolution};
