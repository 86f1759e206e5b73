//! Decision memo assembly

use serde::{Deserialize, Serialize};

use super::drivers::{DEFAULT_SEGMENT_SEPARATOR, analyze_segment_drivers};
use super::evidence::{DEFAULT_TRACING_THRESHOLD, trace_impact};
use super::narrative::{generate_recommendation, generate_risk_assessment, generate_tradeoffs};
use crate::model::{
    CASH_FLOW, Driver, Evidence, Memo, Narrative, ScenarioResults, SensitivityMap,
    SimulationSummary,
};

/// Number of drivers and segments quoted as evidence
pub const MEMO_TOP_N: usize = 3;

/// Knobs for [`create_memo`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoOptions {
    pub target_metric: String,
    /// Minimum absolute sensitivity for an input to be cited
    pub tracing_threshold: f64,
    pub segment_separator: String,
}

impl Default for MemoOptions {
    fn default() -> Self {
        Self {
            target_metric: CASH_FLOW.to_string(),
            tracing_threshold: DEFAULT_TRACING_THRESHOLD,
            segment_separator: DEFAULT_SEGMENT_SEPARATOR.to_string(),
        }
    }
}

/// Combine simulation figures, ranked drivers and optional scenario and
/// sensitivity data into a memo.
///
/// `drivers` is expected in ranked order (see `analyze_drivers`). The risk
/// assessment names the top drivers whose impact reaches the tracing
/// threshold. Without scenarios the trade-off list is empty; without
/// sensitivity data there is no impact tracing and no segment breakdown.
#[must_use]
pub fn create_memo(
    simulation: &SimulationSummary,
    drivers: &[Driver],
    scenarios: Option<&ScenarioResults>,
    sensitivity: Option<&SensitivityMap>,
    options: &MemoOptions,
) -> Memo {
    let top_drivers: Vec<Driver> = drivers.iter().take(MEMO_TOP_N).cloned().collect();

    let risk_drivers: Vec<String> = top_drivers
        .iter()
        .filter(|d| d.impact_score >= options.tracing_threshold)
        .map(|d| d.name.clone())
        .collect();

    let trade_offs = scenarios
        .map(|s| generate_tradeoffs(s, &options.target_metric))
        .unwrap_or_default();

    let impact_tracing = sensitivity.map(|s| trace_impact(s, options.tracing_threshold));
    let segment_impacts = sensitivity
        .map(|s| {
            let mut segments = analyze_segment_drivers(s, &options.segment_separator);
            segments.truncate(MEMO_TOP_N);
            segments
        })
        .unwrap_or_default();

    Memo {
        metrics: *simulation,
        narrative: Narrative {
            recommendation: generate_recommendation(drivers, &options.target_metric),
            risk_assessment: generate_risk_assessment(simulation.prob_failure, &risk_drivers),
            trade_offs,
        },
        evidence: Evidence {
            top_drivers,
            impact_tracing,
            segment_impacts,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explain::analyze_drivers;
    use crate::model::MonteCarloResult;

    fn summary(prob_failure: f64) -> SimulationSummary {
        let mc = MonteCarloResult {
            p10: 800.0,
            p50: 1000.0,
            p90: 1200.0,
            mean: 1000.0,
            std_dev: 150.0,
            iterations: 1000,
        };
        SimulationSummary::new(&mc, prob_failure)
    }

    #[test]
    fn test_memo_structure_with_sensitivity() {
        let sensitivity: SensitivityMap = [
            ("North::Revenue".to_string(), 0.5),
            ("North::Costs".to_string(), -0.25),
            ("South::Revenue".to_string(), 0.125),
            ("East::Costs".to_string(), -0.0625),
            ("West::Costs".to_string(), -0.03125),
        ]
        .into_iter()
        .collect();
        let drivers = analyze_drivers(&sensitivity);

        let memo = create_memo(
            &summary(0.1),
            &drivers,
            None,
            Some(&sensitivity),
            &MemoOptions::default(),
        );

        assert_eq!(memo.metrics.mean, 1000.0);
        assert_eq!(memo.evidence.top_drivers.len(), 3);
        assert_eq!(memo.evidence.top_drivers[0].name, "North::Revenue");
        let tracing = memo.evidence.impact_tracing.as_ref().unwrap();
        assert_eq!(tracing.len(), 3);
        assert_eq!(memo.evidence.segment_impacts.len(), 3);
        assert_eq!(memo.evidence.segment_impacts[0].name, "North");
        assert!(memo.narrative.trade_offs.is_empty());
        assert!(memo.narrative.recommendation.contains("North::Revenue"));
        assert!(memo.narrative.risk_assessment.contains("Risk Level: Low"));
        // 0.125 clears the 0.1 tracing threshold
        assert!(memo.narrative.risk_assessment.contains("South::Revenue"));
    }

    #[test]
    fn test_memo_without_optional_inputs() {
        let drivers = vec![Driver::from_sensitivity("revenue", 0.05)];

        let memo = create_memo(&summary(0.3), &drivers, None, None, &MemoOptions::default());

        assert!(memo.evidence.impact_tracing.is_none());
        assert!(memo.evidence.segment_impacts.is_empty());
        assert_eq!(memo.evidence.top_drivers.len(), 1);
        assert!(memo.narrative.risk_assessment.contains("Risk Level: High"));
        // Below the tracing threshold, so not named as a risk driver
        assert!(memo.narrative.risk_assessment.contains("Key risk drivers: None"));
    }
}
