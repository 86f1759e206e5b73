//! Decision memo: the aggregate handed to the presentation layer

use serde::{Deserialize, Serialize};

use super::results::{Driver, MonteCarloResult, SegmentImpact};

/// Simulation figures quoted at the top of a memo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    pub iterations: usize,
    /// Probability the metric ends below the failure threshold
    pub prob_failure: f64,
}

impl SimulationSummary {
    #[must_use]
    pub fn new(monte_carlo: &MonteCarloResult, prob_failure: f64) -> Self {
        Self {
            mean: monte_carlo.mean,
            std_dev: monte_carlo.std_dev,
            p10: monte_carlo.p10,
            p50: monte_carlo.p50,
            p90: monte_carlo.p90,
            iterations: monte_carlo.iterations,
            prob_failure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub recommendation: String,
    pub risk_assessment: String,
    pub trade_offs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// At most three, highest impact first
    pub top_drivers: Vec<Driver>,
    /// Present only when sensitivity data was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_tracing: Option<Vec<String>>,
    /// Top three segments; empty without sensitivity data
    #[serde(default)]
    pub segment_impacts: Vec<SegmentImpact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memo {
    pub metrics: SimulationSummary,
    pub narrative: Narrative,
    pub evidence: Evidence,
}
