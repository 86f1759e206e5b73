//! Analysis outputs
//!
//! Every type here is created fresh per call and handed to the caller as plain
//! data; nothing holds a reference back into the model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::inputs::EffectiveInputs;

/// Name of the metric produced by the deterministic model
pub const CASH_FLOW: &str = "cash_flow";

/// Input field -> fractional change in the metric for a +10% bump of that field
pub type SensitivityMap = IndexMap<String, f64>;

/// Input field -> value it must take for the metric to hit the threshold
pub type BreakpointMap = IndexMap<String, f64>;

/// Scenario name -> deterministic outcome
pub type ScenarioResults = IndexMap<String, DeterministicResult>;

/// Single-point cash flow for one set of effective inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterministicResult {
    pub cash_flow: f64,
    pub inputs: EffectiveInputs,
}

impl DeterministicResult {
    /// Read a metric by name. Only `cash_flow` is produced by the model.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        (name == CASH_FLOW).then_some(self.cash_flow)
    }
}

/// Summary of a sampled cash-flow distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub iterations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    /// Zero counts as negative: it never improves the metric.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    /// Verb telling the reader which way to move the input
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Direction::Positive => "increase",
            Direction::Negative => "decrease",
        }
    }
}

/// One input ranked by how strongly it moves the metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    /// Absolute sensitivity
    pub impact_score: f64,
    pub direction: Direction,
    /// Signed sensitivity as a percentage string, e.g. `-12.5%`
    pub magnitude: String,
}

impl Driver {
    #[must_use]
    pub fn from_sensitivity(name: impl Into<String>, sensitivity: f64) -> Self {
        Self {
            name: name.into(),
            impact_score: sensitivity.abs(),
            direction: Direction::of(sensitivity),
            magnitude: format!("{:.1}%", sensitivity * 100.0),
        }
    }
}

/// Summed absolute impact of every driver sharing a segment prefix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentImpact {
    pub name: String,
    pub total_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeStep {
    pub category: String,
    pub value: f64,
    pub description: String,
}

/// Waterfall from a baseline value to a scenario value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeData {
    pub start: f64,
    pub end: f64,
    pub steps: Vec<BridgeStep>,
}

impl BridgeData {
    /// Start plus every step; equals `end` whenever steps are present
    #[must_use]
    pub fn reconciled_end(&self) -> f64 {
        self.start + self.steps.iter().map(|s| s.value).sum::<f64>()
    }
}
