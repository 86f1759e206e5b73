//! Risk analysis over a [`SimulationModel`](crate::simulation::SimulationModel).
//!
//! - `sensitivity` - one-at-a-time sensitivities and linear break-even points
//! - `stress` - fixed named stress presets
//! - [`prob_of_failure`] - tail probability from a normal fit to a Monte Carlo run
//!
//! ```ignore
//! use whatif_core::risk::{calculate_sensitivity, prob_of_failure};
//!
//! let sensitivity = calculate_sensitivity(&model, &baseline, CASH_FLOW)?;
//! let mc = model.run_monte_carlo(None, None, 1000)?;
//! let p_fail = prob_of_failure(&mc, 0.0);
//! ```

mod sensitivity;
mod stress;

pub use sensitivity::*;
pub use stress::*;

use crate::model::MonteCarloResult;
use crate::stats::norm_cdf;

/// Probability that the metric ends below `threshold`.
///
/// Evaluates the normal CDF at `(threshold - mean) / std_dev` using only the
/// Monte Carlo mean and standard deviation, not the empirical samples. A run
/// with zero spread is defined to have zero failure probability.
#[must_use]
pub fn prob_of_failure(monte_carlo: &MonteCarloResult, threshold: f64) -> f64 {
    if monte_carlo.std_dev == 0.0 {
        return 0.0;
    }
    let z = (threshold - monte_carlo.mean) / monte_carlo.std_dev;
    norm_cdf(z).clamp(0.0, 1.0)
}
