//! Preset stress scenarios.
//!
//! Each preset scales a few inputs of the baseline by fixed multipliers. Presets
//! are applied independently against the same baseline, never stacked.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{InputField, Inputs, ScenarioResults};
use crate::simulation::SimulationModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressScenario {
    /// Revenue -20%
    Recession,
    /// Operational costs +15%
    Inflation,
    /// Marketing spend +50%, revenue +20%
    AggressiveGrowth,
}

impl StressScenario {
    pub const ALL: [StressScenario; 3] = [
        StressScenario::Recession,
        StressScenario::Inflation,
        StressScenario::AggressiveGrowth,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            StressScenario::Recession => "Recession",
            StressScenario::Inflation => "Inflation",
            StressScenario::AggressiveGrowth => "Aggressive Growth",
        }
    }

    #[must_use]
    pub fn multipliers(self) -> &'static [(InputField, f64)] {
        match self {
            StressScenario::Recession => &[(InputField::Revenue, 0.8)],
            StressScenario::Inflation => &[(InputField::OperationalCosts, 1.15)],
            StressScenario::AggressiveGrowth => &[
                (InputField::MarketingSpend, 1.5),
                (InputField::Revenue, 1.2),
            ],
        }
    }

    /// Scale `base_inputs` by this preset's multipliers.
    ///
    /// A field missing from `base_inputs` is read from `fallback` (normally the
    /// model baseline) before scaling.
    #[must_use]
    pub fn apply(self, base_inputs: &Inputs, fallback: &Inputs) -> Inputs {
        let mut stressed = base_inputs.clone();
        for &(field, multiplier) in self.multipliers() {
            if let Some(value) = base_inputs.field(field).or_else(|| fallback.field(field)) {
                stressed.set(field.as_str(), value * multiplier);
            }
        }
        stressed
    }
}

/// Run every preset against `base_inputs`, keyed by preset name in `ALL` order
pub fn run_stress_test(model: &SimulationModel, base_inputs: &Inputs) -> Result<ScenarioResults> {
    let mut results = ScenarioResults::new();
    for scenario in StressScenario::ALL {
        let stressed = scenario.apply(base_inputs, model.baseline());
        let outcome = model.run_deterministic(Some(&stressed), None)?;
        results.insert(scenario.name().to_string(), outcome);
    }
    Ok(results)
}
