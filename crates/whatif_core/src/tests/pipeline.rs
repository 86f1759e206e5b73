//! End-to-end runs through simulation, risk and explainability

use approx::assert_relative_eq;

use crate::explain::{MemoOptions, analyze_drivers, create_memo, generate_bridge_data};
use crate::model::{CASH_FLOW, Constraints, Inputs, SimulationSummary};
use crate::risk::{calculate_breakpoints, calculate_sensitivity, prob_of_failure, run_stress_test};
use crate::simulation::SimulationModel;

fn company() -> Inputs {
    Inputs::new(100_000.0, 20_000.0, 30_000.0, 10_000.0)
}

#[test]
fn test_full_analysis_memo() {
    let baseline = company();
    let model = SimulationModel::new(baseline.clone());

    let point = model.run_deterministic(None, None).unwrap();
    assert_eq!(point.cash_flow, 40_000.0);

    let mc = model.run_monte_carlo_seeded(None, None, 2000, 7).unwrap();
    let p_fail = prob_of_failure(&mc, 0.0);
    assert!(p_fail < 0.01);

    let sensitivity = calculate_sensitivity(&model, &baseline, CASH_FLOW).unwrap();
    let drivers = analyze_drivers(&sensitivity);
    let stress = run_stress_test(&model, &baseline).unwrap();

    assert_relative_eq!(stress["Recession"].cash_flow, 20_000.0, epsilon = 1e-6);
    assert_relative_eq!(stress["Inflation"].cash_flow, 35_500.0, epsilon = 1e-6);
    assert_relative_eq!(stress["Aggressive Growth"].cash_flow, 55_000.0, epsilon = 1e-6);

    let memo = create_memo(
        &SimulationSummary::new(&mc, p_fail),
        &drivers,
        Some(&stress),
        Some(&sensitivity),
        &MemoOptions::default(),
    );

    assert_eq!(memo.metrics.iterations, 2000);
    assert_eq!(memo.evidence.top_drivers[0].name, "revenue");
    assert!(memo.narrative.recommendation.contains("focus on revenue"));
    assert!(memo.narrative.recommendation.contains("increase revenue"));
    assert!(memo.narrative.risk_assessment.starts_with("Risk Level: Low"));
    assert!(memo.narrative.risk_assessment.contains("Key risk drivers: revenue."));

    let trade_offs = &memo.narrative.trade_offs;
    assert_eq!(trade_offs.len(), 4);
    assert_eq!(
        trade_offs[0],
        "Aggressive Growth yields $19,500 more cash flow than Inflation."
    );
    assert!(trade_offs[1].starts_with("Choosing Aggressive Growth requires revenue to be"));
    assert!(trade_offs[2].contains("requires operational_costs to be 30,000 instead of"));
    assert!(trade_offs[3].contains("requires marketing_spend to be"));

    // Flat keys: every input is its own segment
    let segments: Vec<&str> = memo
        .evidence
        .segment_impacts
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(segments, vec!["revenue", "operational_costs", "marketing_spend"]);
}

#[test]
fn test_bridge_from_baseline_to_stress_case() {
    let baseline = company();
    let model = SimulationModel::new(baseline.clone());
    let sensitivity = calculate_sensitivity(&model, &baseline, CASH_FLOW).unwrap();
    let drivers = analyze_drivers(&sensitivity);
    let stress = run_stress_test(&model, &baseline).unwrap();

    let recession = stress["Recession"].cash_flow;
    let bridge = generate_bridge_data(40_000.0, recession, &drivers);

    assert_eq!(bridge.steps.len(), 3);
    assert_relative_eq!(bridge.reconciled_end(), recession, epsilon = 1e-6);
    // Revenue carries 0.25 of the 0.35 total impact
    assert_relative_eq!(bridge.steps[0].value, -20_000.0 * 0.25 / 0.35, epsilon = 1e-6);
}

#[test]
fn test_break_even_and_constraints_together() {
    let baseline = company();
    let model = SimulationModel::new(baseline.clone());

    let breakpoints = calculate_breakpoints(&model, &baseline, 0.0).unwrap();
    assert_relative_eq!(breakpoints["revenue"], 60_000.0, epsilon = 1e-3);
    assert_relative_eq!(breakpoints["operational_costs"], 70_000.0, epsilon = 1e-3);
    assert_relative_eq!(breakpoints["marketing_spend"], 50_000.0, epsilon = 1e-3);

    // A cap below the override wins
    let constraints = Constraints::from([("marketing_spend".to_string(), 20_000.0)]);
    let capped = model
        .run_deterministic(
            Some(&Inputs::default().with("marketing_spend", 60_000.0)),
            Some(&constraints),
        )
        .unwrap();
    assert_eq!(capped.inputs.marketing_spend, 20_000.0);
    assert_eq!(capped.cash_flow, 30_000.0);
}
