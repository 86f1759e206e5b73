//! Scenario files: what to analyze and how
//!
//! A scenario file is YAML:
//! ```yaml
//! baseline:
//!   revenue: 50000
//!   fixed_costs: 15000
//!   operational_costs: 20000
//!   marketing_spend: 5000
//! params:
//!   hiring_freeze: true
//!   marketing_spend_delta: 2000
//! overrides:
//!   fixed_costs: 14000
//! constraints:
//!   marketing_spend: 6500
//! iterations: 1000
//! seed: 42
//! failure_threshold: 0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use whatif_core::explain::MemoOptions;
use whatif_core::{AnalysisError, Constraints, DEFAULT_ITERATIONS, InputField, Inputs};

/// Operational-cost multiplier applied by a hiring freeze
pub const HIRING_FREEZE_FACTOR: f64 = 0.9;

/// Error types for scenario file operations
#[derive(Debug)]
pub enum ScenarioError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::Io(msg) => write!(f, "IO error: {}", msg),
            ScenarioError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ScenarioError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ScenarioError {}

/// Business-level levers, translated into input overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParams {
    /// Added to the baseline marketing spend
    pub marketing_spend_delta: f64,
    /// Cuts operational costs by 10%
    pub hiring_freeze: bool,
}

impl ScenarioParams {
    /// Overrides implied by these levers against `baseline`.
    ///
    /// A lever that is off contributes nothing, so the default params yield an
    /// empty override set.
    pub fn to_overrides(&self, baseline: &Inputs) -> Result<Inputs, AnalysisError> {
        let mut overrides = Inputs::default();

        if self.hiring_freeze {
            let costs = require(baseline, InputField::OperationalCosts)?;
            overrides.operational_costs = Some(costs * HIRING_FREEZE_FACTOR);
        }

        if self.marketing_spend_delta != 0.0 {
            let spend = require(baseline, InputField::MarketingSpend)?;
            overrides.marketing_spend = Some(spend + self.marketing_spend_delta);
        }

        Ok(overrides)
    }
}

fn require(baseline: &Inputs, field: InputField) -> Result<f64, AnalysisError> {
    baseline.field(field).ok_or(AnalysisError::MissingField {
        field: field.as_str(),
    })
}

fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

/// Everything needed for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub baseline: Inputs,
    #[serde(default)]
    pub params: ScenarioParams,
    /// Applied on top of the parameter-derived overrides
    #[serde(default)]
    pub overrides: Inputs,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Cash flow below this counts as failure
    #[serde(default)]
    pub failure_threshold: f64,
    #[serde(default)]
    pub memo: MemoOptions,
}

impl ScenarioFile {
    /// A scenario with only a baseline; every other setting at its default
    pub fn new(baseline: Inputs) -> Self {
        Self {
            baseline,
            params: ScenarioParams::default(),
            overrides: Inputs::default(),
            constraints: Constraints::new(),
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            failure_threshold: 0.0,
            memo: MemoOptions::default(),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ScenarioError> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| ScenarioError::Parse(format!("Failed to parse scenario: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ScenarioError> {
        serde_saphyr::to_string(self)
            .map_err(|e| ScenarioError::Serialize(format!("Failed to serialize scenario: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ScenarioError::Io(format!("Failed to read scenario: {}", e)))?;
        Self::from_yaml(&content)
    }

    /// Parameter-derived overrides with the explicit ones merged on top
    pub fn effective_overrides(&self) -> Result<Inputs, AnalysisError> {
        let derived = self.params.to_overrides(&self.baseline)?;
        Ok(derived.merged_with(&self.overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SCENARIO: &str = include_str!("../scenarios/hiring_freeze.yaml");

    fn baseline() -> Inputs {
        Inputs::new(50_000.0, 15_000.0, 20_000.0, 5_000.0)
    }

    #[test]
    fn test_hiring_freeze_cuts_operational_costs() {
        let params = ScenarioParams {
            hiring_freeze: true,
            ..Default::default()
        };

        let overrides = params.to_overrides(&baseline()).unwrap();

        assert_eq!(overrides.operational_costs, Some(18_000.0));
        assert_eq!(overrides.marketing_spend, None);
    }

    #[test]
    fn test_marketing_delta_is_relative_to_baseline() {
        let params = ScenarioParams {
            marketing_spend_delta: -1_500.0,
            ..Default::default()
        };

        let overrides = params.to_overrides(&baseline()).unwrap();

        assert_eq!(overrides.marketing_spend, Some(3_500.0));
        assert_eq!(overrides.operational_costs, None);
    }

    #[test]
    fn test_default_params_yield_no_overrides() {
        let overrides = ScenarioParams::default().to_overrides(&baseline()).unwrap();
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_params_need_the_baseline_field() {
        let params = ScenarioParams {
            hiring_freeze: true,
            ..Default::default()
        };
        let partial = Inputs {
            revenue: Some(1.0),
            ..Default::default()
        };

        assert_eq!(
            params.to_overrides(&partial),
            Err(AnalysisError::MissingField {
                field: "operational_costs"
            })
        );
    }

    #[test]
    fn test_explicit_overrides_win() {
        let mut scenario = ScenarioFile::new(baseline());
        scenario.params.hiring_freeze = true;
        scenario.overrides = Inputs::default().with("operational_costs", 17_000.0);

        let overrides = scenario.effective_overrides().unwrap();

        assert_eq!(overrides.operational_costs, Some(17_000.0));
    }

    #[test]
    fn test_parse_bundled_scenario() {
        let scenario = ScenarioFile::from_yaml(SCENARIO).unwrap();

        assert_eq!(scenario.baseline, baseline());
        assert!(scenario.params.hiring_freeze);
        assert_eq!(scenario.params.marketing_spend_delta, 2_000.0);
        assert_eq!(scenario.constraints["marketing_spend"], 6_500.0);
        assert_eq!(scenario.seed, Some(42));
        assert_eq!(scenario.memo, MemoOptions::default());
    }

    #[test]
    fn test_parse_minimal_scenario_uses_defaults() {
        let yaml = "baseline:\n  revenue: 100\n  fixed_costs: 10\n  operational_costs: 10\n  marketing_spend: 10\n  headcount: 4\n";

        let scenario = ScenarioFile::from_yaml(yaml).unwrap();

        assert_eq!(scenario.iterations, DEFAULT_ITERATIONS);
        assert_eq!(scenario.seed, None);
        assert_eq!(scenario.failure_threshold, 0.0);
        assert!(scenario.overrides.is_empty());
        assert!(scenario.constraints.is_empty());
        // Unknown keys ride along as extras
        assert_eq!(scenario.baseline.get("headcount"), Some(4.0));
    }

    #[test]
    fn test_parse_rejects_missing_baseline() {
        let result = ScenarioFile::from_yaml("iterations: 10\n");
        assert!(matches!(result, Err(ScenarioError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scenario.yaml");
        fs::write(&path, SCENARIO).unwrap();

        let scenario = ScenarioFile::load(&path).unwrap();

        assert_eq!(scenario.iterations, 1000);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = ScenarioFile::load(&dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ScenarioError::Io(_))));
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut scenario = ScenarioFile::new(baseline());
        scenario.params.marketing_spend_delta = 250.0;
        scenario.seed = Some(7);

        let yaml = scenario.to_yaml().unwrap();
        let parsed = ScenarioFile::from_yaml(&yaml).unwrap();

        assert_eq!(parsed, scenario);
    }
}
