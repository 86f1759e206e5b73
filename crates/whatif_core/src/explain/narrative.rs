//! Plain-language narrative built from drivers, risk and scenario outcomes

use serde::{Deserialize, Serialize};

use super::format::{format_amount, format_currency_short, humanize};
use crate::model::{Driver, ScenarioResults};

pub const NO_DRIVERS: &str = "No significant drivers were identified; the outcome is not \
                              sensitive to any analyzed input.";
pub const INSUFFICIENT_SCENARIOS: &str =
    "Insufficient scenarios to evaluate trade-offs; at least two are required.";

/// Four-level risk label derived from a failure probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    #[must_use]
    pub fn from_probability(prob_failure: f64) -> Self {
        if prob_failure > 0.5 {
            RiskLevel::Critical
        } else if prob_failure > 0.2 {
            RiskLevel::High
        } else if prob_failure > 0.1 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

/// Recommend acting on the first (strongest) driver
#[must_use]
pub fn generate_recommendation(drivers: &[Driver], metric: &str) -> String {
    let Some(top) = drivers.first() else {
        return NO_DRIVERS.to_string();
    };
    format!(
        "To improve {metric}, focus on {name}: it is the strongest driver with a {magnitude} \
         sensitivity. Recommended action: {verb} {name} where feasible.",
        metric = humanize(metric),
        name = top.name,
        magnitude = top.magnitude,
        verb = top.direction.verb(),
    )
}

#[must_use]
pub fn generate_risk_assessment(prob_failure: f64, sensitive_params: &[String]) -> String {
    let level = RiskLevel::from_probability(prob_failure);
    let drivers = if sensitive_params.is_empty() {
        "None".to_string()
    } else {
        sensitive_params.join(", ")
    };
    format!(
        "Risk Level: {}. Probability of falling below the threshold: {:.1}%. Key risk drivers: {}.",
        level.label(),
        prob_failure * 100.0,
        drivers
    )
}

/// Compare the two best scenarios by `metric`.
///
/// A scenario that does not produce `metric` is ranked by its cash flow. The
/// first sentence states the gap between the top two; each following sentence
/// names one input the two scenarios set differently.
#[must_use]
pub fn generate_tradeoffs(scenarios: &ScenarioResults, metric: &str) -> Vec<String> {
    if scenarios.len() < 2 {
        return vec![INSUFFICIENT_SCENARIOS.to_string()];
    }

    let mut ranked: Vec<_> = scenarios
        .iter()
        .map(|(name, result)| {
            let value = result.metric(metric).unwrap_or(result.cash_flow);
            (name, result, value)
        })
        .collect();
    ranked.sort_by(|a, b| b.2.total_cmp(&a.2));

    let (best_name, best, best_value) = ranked[0];
    let (runner_name, runner, runner_value) = ranked[1];

    let mut tradeoffs = vec![format!(
        "{best_name} yields {} more {} than {runner_name}.",
        format_currency_short(best_value - runner_value),
        humanize(metric),
    )];

    for (field, value) in best.inputs.iter() {
        if let Some(other) = runner.inputs.get(field)
            && other != value
        {
            tradeoffs.push(format!(
                "Choosing {best_name} requires {field} to be {} instead of {}.",
                format_amount(value),
                format_amount(other),
            ));
        }
    }
    tradeoffs
}
