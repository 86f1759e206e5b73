//! Driver ranking, segment rollups and bridge attribution

use indexmap::IndexMap;

use crate::model::{BridgeData, BridgeStep, Driver, SegmentImpact, SensitivityMap};

pub const DEFAULT_SEGMENT_SEPARATOR: &str = "::";
/// Number of drivers a bridge attributes variance to
pub const BRIDGE_TOP_DRIVERS: usize = 3;
pub const OTHER_FACTORS: &str = "Other Factors";
/// Residual variance at or below this magnitude is dropped from the bridge
const RESIDUAL_TOLERANCE: f64 = 0.01;

/// Rank inputs by absolute sensitivity, highest first.
///
/// The sort is stable, so equal impacts keep the map's iteration order.
#[must_use]
pub fn analyze_drivers(sensitivity: &SensitivityMap) -> Vec<Driver> {
    let mut drivers: Vec<Driver> = sensitivity
        .iter()
        .map(|(name, &value)| Driver::from_sensitivity(name.as_str(), value))
        .collect();
    drivers.sort_by(|a, b| b.impact_score.total_cmp(&a.impact_score));
    drivers
}

/// Sum absolute impacts per segment prefix, highest total first.
///
/// `North::Revenue` belongs to segment `North`; a name without the separator
/// is its own segment.
#[must_use]
pub fn analyze_segment_drivers(
    sensitivity: &SensitivityMap,
    separator: &str,
) -> Vec<SegmentImpact> {
    let mut totals: IndexMap<&str, f64> = IndexMap::new();
    for (name, value) in sensitivity {
        let segment = name
            .split_once(separator)
            .map_or(name.as_str(), |(prefix, _)| prefix);
        *totals.entry(segment).or_insert(0.0) += value.abs();
    }

    let mut segments: Vec<SegmentImpact> = totals
        .into_iter()
        .map(|(name, total_impact)| SegmentImpact {
            name: name.to_string(),
            total_impact,
        })
        .collect();
    segments.sort_by(|a, b| b.total_impact.total_cmp(&a.total_impact));
    segments
}

/// Split `scenario_value - baseline_value` across the top three drivers in
/// proportion to their impact scores.
///
/// Any unattributed remainder above 0.01 becomes an "Other Factors" step. If the
/// top drivers carry no impact at all the step list is empty.
#[must_use]
pub fn generate_bridge_data(
    baseline_value: f64,
    scenario_value: f64,
    drivers: &[Driver],
) -> BridgeData {
    let mut ranked: Vec<&Driver> = drivers.iter().collect();
    ranked.sort_by(|a, b| b.impact_score.total_cmp(&a.impact_score));
    ranked.truncate(BRIDGE_TOP_DRIVERS);

    let total_variance = scenario_value - baseline_value;
    let total_impact: f64 = ranked.iter().map(|d| d.impact_score).sum();

    let mut bridge = BridgeData {
        start: baseline_value,
        end: scenario_value,
        steps: Vec::with_capacity(ranked.len() + 1),
    };
    if total_impact == 0.0 {
        return bridge;
    }

    let mut remaining = total_variance;
    for driver in ranked {
        let value = total_variance * (driver.impact_score / total_impact);
        bridge.steps.push(BridgeStep {
            category: driver.name.clone(),
            value,
            description: format!("Impact from {}", driver.name),
        });
        remaining -= value;
    }

    if remaining.abs() > RESIDUAL_TOLERANCE {
        bridge.steps.push(BridgeStep {
            category: OTHER_FACTORS.to_string(),
            value: remaining,
            description: "Cumulative impact of minor drivers".to_string(),
        });
    }
    bridge
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sensitivity(entries: &[(&str, f64)]) -> SensitivityMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_driver_ranking_by_absolute_impact() {
        let drivers = analyze_drivers(&sensitivity(&[
            ("revenue", 0.20),
            ("operational_costs", -0.50),
            ("marketing_spend", -0.10),
        ]));

        let names: Vec<&str> = drivers.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["operational_costs", "revenue", "marketing_spend"]);
        assert_eq!(drivers[0].impact_score, 0.50);
        assert_eq!(drivers[0].magnitude, "-50.0%");
    }

    #[test]
    fn test_driver_ties_keep_input_order() {
        let drivers = analyze_drivers(&sensitivity(&[("b", -0.3), ("a", 0.3), ("c", 0.1)]));
        let names: Vec<&str> = drivers.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_segment_rollup() {
        let segments = analyze_segment_drivers(
            &sensitivity(&[
                ("North::Revenue", 0.5),
                ("South::Revenue", 0.2),
                ("North::Costs", -0.125),
                ("marketing_spend", 0.0625),
            ]),
            DEFAULT_SEGMENT_SEPARATOR,
        );

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].name, "North");
        assert_eq!(segments[0].total_impact, 0.625);
        assert_eq!(segments[1].name, "South");
        assert_eq!(segments[2].name, "marketing_spend");
    }

    #[test]
    fn test_segment_custom_separator() {
        let segments =
            analyze_segment_drivers(&sensitivity(&[("EU/a", 0.25), ("EU/b", 0.25)]), "/");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].name, "EU");
        assert_eq!(segments[0].total_impact, 0.5);
    }

    #[test]
    fn test_bridge_proportional_split() {
        let drivers = vec![
            Driver::from_sensitivity("input_A", 0.8),
            Driver::from_sensitivity("input_B", 0.2),
        ];

        let bridge = generate_bridge_data(1000.0, 1200.0, &drivers);

        assert_eq!(bridge.start, 1000.0);
        assert_eq!(bridge.end, 1200.0);
        assert_eq!(bridge.steps.len(), 2);
        assert_eq!(bridge.steps[0].category, "input_A");
        assert_relative_eq!(bridge.steps[0].value, 160.0, epsilon = 1e-9);
        assert_relative_eq!(bridge.steps[1].value, 40.0, epsilon = 1e-9);
        assert_relative_eq!(bridge.reconciled_end(), bridge.end, epsilon = 1e-9);
    }

    #[test]
    fn test_bridge_uses_only_top_three() {
        let drivers = analyze_drivers(&sensitivity(&[
            ("a", 0.4),
            ("b", -0.3),
            ("c", 0.2),
            ("d", 0.1),
        ]));

        let bridge = generate_bridge_data(0.0, -90.0, &drivers);

        let categories: Vec<&str> = bridge.steps.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["a", "b", "c"]);
        assert_relative_eq!(bridge.steps[0].value, -40.0, epsilon = 1e-9);
        assert_relative_eq!(bridge.reconciled_end(), -90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bridge_zero_impact_has_no_steps() {
        let drivers = vec![Driver::from_sensitivity("flat", 0.0)];
        let bridge = generate_bridge_data(10.0, 20.0, &drivers);
        assert!(bridge.steps.is_empty());
        assert_eq!(bridge.start, 10.0);
        assert_eq!(bridge.end, 20.0);

        assert!(generate_bridge_data(10.0, 20.0, &[]).steps.is_empty());
    }
}
