//! What-if decision analysis engine
//!
//! Given baseline business inputs (revenue, costs, marketing spend) this crate:
//! - Projects single-period cash flow, deterministically and by Monte Carlo
//! - Applies overrides and caps (constraints clamp, they never reject)
//! - Ranks inputs by one-at-a-time sensitivity and solves break-even points
//! - Runs fixed stress presets and estimates the probability of a shortfall
//! - Explains the results as ranked drivers, bridges, citations and a memo
//!
//! ```ignore
//! use whatif_core::{Inputs, SimulationModel};
//! use whatif_core::risk::{calculate_sensitivity, prob_of_failure};
//!
//! let baseline = Inputs::new(100_000.0, 20_000.0, 30_000.0, 10_000.0);
//! let model = SimulationModel::new(baseline.clone());
//!
//! let point = model.run_deterministic(None, None)?;
//! let mc = model.run_monte_carlo_seeded(None, None, 1000, 42)?;
//! let sensitivity = calculate_sensitivity(&model, &baseline, "cash_flow")?;
//! let p_fail = prob_of_failure(&mc, 0.0);
//! ```
//!
//! Every operation is a pure function of its arguments; the only shared
//! resource is the thread-local generator behind `run_monte_carlo`.

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod explain;
pub mod risk;
pub mod simulation;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::{AnalysisError, Result};
pub use model::{Constraints, EffectiveInputs, InputField, Inputs};
pub use simulation::{DEFAULT_ITERATIONS, SimulationModel};
