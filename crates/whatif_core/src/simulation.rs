//! Deterministic and stochastic cash-flow projection

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rand_distr::{Distribution, Normal};
#[cfg(feature = "parallel")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::model::{Constraints, DeterministicResult, EffectiveInputs, Inputs, MonteCarloResult};
use crate::stats;

/// Revenue draws use a standard deviation of 5% of the effective revenue
pub const REVENUE_VOLATILITY: f64 = 0.05;
/// Operational-cost draws use a standard deviation of 3% of the effective value
pub const OPERATIONAL_COST_VOLATILITY: f64 = 0.03;
pub const DEFAULT_ITERATIONS: usize = 1000;

const MAX_BATCH_SIZE: usize = 100;

/// Cash flow = revenue - (fixed + operational + marketing).
///
/// Every computation in the crate goes through this function.
#[must_use]
#[inline]
pub fn cash_flow(
    revenue: f64,
    fixed_costs: f64,
    operational_costs: f64,
    marketing_spend: f64,
) -> f64 {
    revenue - (fixed_costs + operational_costs + marketing_spend)
}

impl EffectiveInputs {
    #[must_use]
    pub fn cash_flow(&self) -> f64 {
        cash_flow(
            self.revenue,
            self.fixed_costs,
            self.operational_costs,
            self.marketing_spend,
        )
    }
}

/// Cash-flow model over a fixed baseline.
///
/// The model holds no mutable state; each call merges its own overrides and
/// constraints into a fresh copy of the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationModel {
    baseline: Inputs,
}

impl SimulationModel {
    #[must_use]
    pub fn new(baseline: Inputs) -> Self {
        Self { baseline }
    }

    #[must_use]
    pub fn baseline(&self) -> &Inputs {
        &self.baseline
    }

    /// Baseline with overrides laid on top, then clamped to constraints.
    ///
    /// Fails with `MissingField` if a formula field is present in neither the
    /// baseline nor the overrides.
    pub fn effective_inputs(
        &self,
        overrides: Option<&Inputs>,
        constraints: Option<&Constraints>,
    ) -> Result<EffectiveInputs> {
        let mut merged = match overrides {
            Some(overrides) => self.baseline.merged_with(overrides),
            None => self.baseline.clone(),
        };
        if let Some(constraints) = constraints {
            merged = merged.clamped(constraints);
        }
        EffectiveInputs::try_from(merged)
    }

    pub fn run_deterministic(
        &self,
        overrides: Option<&Inputs>,
        constraints: Option<&Constraints>,
    ) -> Result<DeterministicResult> {
        let inputs = self.effective_inputs(overrides, constraints)?;
        Ok(DeterministicResult {
            cash_flow: inputs.cash_flow(),
            inputs,
        })
    }

    /// Monte Carlo run seeded from the thread-local generator.
    ///
    /// Use [`Self::run_monte_carlo_seeded`] when results must be reproducible.
    pub fn run_monte_carlo(
        &self,
        overrides: Option<&Inputs>,
        constraints: Option<&Constraints>,
        iterations: usize,
    ) -> Result<MonteCarloResult> {
        let seed = rand::rng().next_u64();
        self.run_monte_carlo_seeded(overrides, constraints, iterations, seed)
    }

    /// Sample `iterations` outcomes around the deterministic point.
    ///
    /// Revenue and operational costs are drawn independently from normals
    /// centred on their effective values; fixed costs and marketing spend stay
    /// at their effective values. Constraints clamp the centre only, so single
    /// draws may land above a cap.
    pub fn run_monte_carlo_seeded(
        &self,
        overrides: Option<&Inputs>,
        constraints: Option<&Constraints>,
        iterations: usize,
        seed: u64,
    ) -> Result<MonteCarloResult> {
        if iterations == 0 {
            return Err(AnalysisError::InvalidParameter {
                name: "iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }

        let inputs = self.effective_inputs(overrides, constraints)?;
        let mut outcomes = sample_outcomes(&inputs, iterations, seed)?;
        outcomes.sort_by(f64::total_cmp);

        let mean = stats::mean(&outcomes);
        Ok(MonteCarloResult {
            p10: stats::percentile_sorted(&outcomes, 0.10),
            p50: stats::percentile_sorted(&outcomes, 0.50),
            p90: stats::percentile_sorted(&outcomes, 0.90),
            mean,
            std_dev: stats::std_dev(&outcomes, mean),
            iterations,
        })
    }
}

fn normal_around(name: &'static str, value: f64, volatility: f64) -> Result<Normal<f64>> {
    let invalid = AnalysisError::InvalidParameter {
        name,
        value,
        reason: "sampling centre must be finite",
    };
    if !value.is_finite() {
        return Err(invalid);
    }
    Normal::new(value, (value * volatility).abs()).map_err(|_| invalid)
}

/// Draw paired revenue / operational-cost samples in fixed-size batches.
///
/// Batch seeds are taken from a master generator before any sampling, so the
/// output is identical whether batches run serially or on the rayon pool.
fn sample_outcomes(inputs: &EffectiveInputs, iterations: usize, seed: u64) -> Result<Vec<f64>> {
    let revenue = normal_around("revenue", inputs.revenue, REVENUE_VOLATILITY)?;
    let operational_costs = normal_around(
        "operational_costs",
        inputs.operational_costs,
        OPERATIONAL_COST_VOLATILITY,
    )?;
    let fixed_costs = inputs.fixed_costs;
    let marketing_spend = inputs.marketing_spend;

    let num_batches = iterations.div_ceil(MAX_BATCH_SIZE);
    let mut master = SmallRng::seed_from_u64(seed);
    let batch_seeds: Vec<u64> = (0..num_batches).map(|_| master.next_u64()).collect();

    let sample_batch = |(i, batch_seed): (usize, u64)| -> Vec<f64> {
        let mut rng = SmallRng::seed_from_u64(batch_seed);
        let batch_size = if i == num_batches - 1 {
            iterations - i * MAX_BATCH_SIZE
        } else {
            MAX_BATCH_SIZE
        };

        (0..batch_size)
            .map(|_| {
                let r = revenue.sample(&mut rng);
                let o = operational_costs.sample(&mut rng);
                cash_flow(r, fixed_costs, o, marketing_spend)
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    let batches: Vec<Vec<f64>> = batch_seeds
        .into_par_iter()
        .enumerate()
        .map(sample_batch)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let batches: Vec<Vec<f64>> = batch_seeds
        .into_iter()
        .enumerate()
        .map(sample_batch)
        .collect();

    Ok(batches.concat())
}
