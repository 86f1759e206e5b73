//! Full analysis pipeline and its serialized report

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use whatif_core::explain::{
    analyze_drivers, create_memo, generate_bridge_data, trace_constraints,
};
use whatif_core::model::{
    BreakpointMap, BridgeData, DeterministicResult, Memo, MonteCarloResult, ScenarioResults,
    SensitivityMap, SimulationSummary,
};
use whatif_core::risk::{
    calculate_breakpoints, calculate_sensitivity, prob_of_failure, run_stress_test,
};
use whatif_core::{Inputs, Result, SimulationModel};

use crate::scenario::{ScenarioError, ScenarioFile};

/// Everything one run produces, ready for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: Timestamp,
    pub seed: u64,
    pub baseline: DeterministicResult,
    pub scenario: DeterministicResult,
    pub monte_carlo: MonteCarloResult,
    pub prob_failure: f64,
    /// Simulated mean cash flow minus baseline cash flow
    pub impact_vs_baseline: f64,
    pub sensitivity: SensitivityMap,
    pub breakpoints: BreakpointMap,
    pub stress: ScenarioResults,
    pub bridge: BridgeData,
    pub constraint_citations: Vec<String>,
    pub memo: Memo,
}

/// Run every analysis stage for `file` with a fixed Monte Carlo seed.
///
/// Sensitivity, breakpoints and stress presets are evaluated around the
/// scenario's effective inputs, not the baseline. The bridge runs from the
/// baseline cash flow to the scenario cash flow.
pub fn run_analysis(file: &ScenarioFile, seed: u64) -> Result<Report> {
    let model = SimulationModel::new(file.baseline.clone());
    let overrides = file.effective_overrides()?;
    let constraints = Some(&file.constraints);

    let baseline = model.run_deterministic(None, None)?;
    tracing::debug!(cash_flow = baseline.cash_flow, "Baseline evaluated");

    let scenario = model.run_deterministic(Some(&overrides), constraints)?;
    tracing::debug!(cash_flow = scenario.cash_flow, "Scenario evaluated");

    tracing::info!(iterations = file.iterations, seed, "Running Monte Carlo");
    let monte_carlo =
        model.run_monte_carlo_seeded(Some(&overrides), constraints, file.iterations, seed)?;
    let prob_failure = prob_of_failure(&monte_carlo, file.failure_threshold);
    tracing::info!(
        mean = monte_carlo.mean,
        std_dev = monte_carlo.std_dev,
        prob_failure,
        "Monte Carlo complete"
    );

    let scenario_inputs = Inputs::from(scenario.inputs.clone());
    let metric = file.memo.target_metric.as_str();
    let sensitivity = if scenario.cash_flow == 0.0 {
        tracing::warn!(metric, "Scenario cash flow is zero; skipping relative sensitivity");
        SensitivityMap::new()
    } else {
        calculate_sensitivity(&model, &scenario_inputs, metric)?
    };
    let breakpoints = calculate_breakpoints(&model, &scenario_inputs, file.failure_threshold)?;
    let stress = run_stress_test(&model, &scenario_inputs)?;
    tracing::debug!(
        inputs = sensitivity.len(),
        presets = stress.len(),
        "Risk analysis complete"
    );

    let drivers = analyze_drivers(&sensitivity);
    let bridge = generate_bridge_data(baseline.cash_flow, scenario.cash_flow, &drivers);
    let memo = create_memo(
        &SimulationSummary::new(&monte_carlo, prob_failure),
        &drivers,
        Some(&stress),
        Some(&sensitivity),
        &file.memo,
    );

    Ok(Report {
        generated_at: Timestamp::now(),
        seed,
        impact_vs_baseline: monte_carlo.mean - baseline.cash_flow,
        baseline,
        scenario,
        monte_carlo,
        prob_failure,
        sensitivity,
        breakpoints,
        stress,
        bridge,
        constraint_citations: trace_constraints(&file.constraints),
        memo,
    })
}

/// Serialization format for a report on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn render(self, report: &Report) -> std::result::Result<String, ScenarioError> {
        match self {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .map_err(|e| ScenarioError::Serialize(format!("Failed to write JSON: {}", e))),
            OutputFormat::Yaml => serde_saphyr::to_string(report)
                .map_err(|e| ScenarioError::Serialize(format!("Failed to write YAML: {}", e))),
        }
    }
}
