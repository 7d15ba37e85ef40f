//! Glicko-2 volatility solver
//!
//! Step 5 of Glickman's algorithm: find the root of the volatility objective
//! with an Illinois-style regula falsi search. Both loops are capped so a
//! rating period always resolves, even when the search cannot converge.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Maximum downward steps taken while looking for the lower bracket
pub const BRACKET_SEARCH_LIMIT: u32 = 100;

/// Maximum regula falsi iterations before settling for the current estimate
pub const CONVERGENCE_ITERATION_LIMIT: u32 = 100;

/// Bracket width at which the search is considered converged
pub const CONVERGENCE_TOLERANCE: f64 = 0.000_001;

/// Inputs to the volatility objective, all on the internal Glicko-2 scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityProblem {
    /// Estimated improvement in rating from this period's games
    pub delta: f64,
    /// Player deviation (phi)
    pub phi: f64,
    /// Estimated variance of the rating based on game outcomes
    pub v: f64,
    /// Player's current volatility (sigma)
    pub volatility: f64,
    /// System constant constraining volatility change
    pub tao: f64,
}

/// Outcome of a volatility search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySolution {
    pub volatility: f64,
    /// Regula falsi iterations consumed
    pub iterations: u32,
    /// False when the iteration cap was hit before the bracket closed
    pub converged: bool,
}

impl VolatilityProblem {
    fn a(&self) -> f64 {
        (self.volatility * self.volatility).ln()
    }

    /// The objective `f(x)` whose root gives `ln(sigma'^2)`
    pub fn objective(&self, x: f64) -> f64 {
        let ex = x.exp();
        let phi2 = self.phi * self.phi;
        let delta2 = self.delta * self.delta;
        let denom = phi2 + self.v + ex;

        (ex * (delta2 - phi2 - self.v - ex)) / (2.0 * denom * denom)
            - (x - self.a()) / (self.tao * self.tao)
    }

    /// Initial second bracket `B`
    fn lower_bracket(&self) -> f64 {
        let a = self.a();
        let phi2 = self.phi * self.phi;
        let delta2 = self.delta * self.delta;

        if delta2 > phi2 + self.v {
            return (delta2 - phi2 - self.v).ln();
        }

        let mut k = 1.0;
        let mut steps = 0;
        while self.objective(a - k * self.tao) < 0.0 && steps < BRACKET_SEARCH_LIMIT {
            k += 1.0;
            steps += 1;
        }
        if steps == BRACKET_SEARCH_LIMIT {
            warn!(
                "Volatility bracket search hit its step limit ({})",
                BRACKET_SEARCH_LIMIT
            );
        }
        a - k * self.tao
    }

    /// Run the search and return the new volatility
    pub fn solve(&self) -> VolatilitySolution {
        let mut a_bound = self.a();
        let mut b_bound = self.lower_bracket();
        let mut f_a = self.objective(a_bound);
        let mut f_b = self.objective(b_bound);
        let mut iterations = 0;

        while (b_bound - a_bound).abs() > CONVERGENCE_TOLERANCE
            && iterations < CONVERGENCE_ITERATION_LIMIT
        {
            let c = a_bound + (a_bound - b_bound) * f_a / (f_b - f_a);
            let f_c = self.objective(c);
            if !c.is_finite() || !f_c.is_finite() {
                warn!("Volatility search left the finite range after {} iterations", iterations);
                break;
            }

            if f_c * f_b < 0.0 {
                a_bound = b_bound;
                f_a = f_b;
            } else {
                f_a /= 2.0;
            }
            b_bound = c;
            f_b = f_c;
            iterations += 1;
            trace!(iterations, a_bound, b_bound, "volatility search step");
        }

        let converged = (b_bound - a_bound).abs() <= CONVERGENCE_TOLERANCE;
        if !converged {
            warn!(
                "Volatility search did not converge in {} iterations, using best estimate",
                iterations
            );
        }

        VolatilitySolution {
            volatility: (a_bound / 2.0).exp(),
            iterations,
            converged,
        }
    }
}
