//! Numbered citations linking narrative claims back to their inputs

use crate::model::{Constraints, SensitivityMap};

pub const DEFAULT_TRACING_THRESHOLD: f64 = 0.1;

/// `[<source_type>:<source_id>] <content>`
#[must_use]
pub fn format_citation(source_type: &str, source_id: usize, content: &str) -> String {
    format!("[{source_type}:{source_id}] {content}")
}

/// Cite every input whose absolute sensitivity reaches `threshold`.
///
/// Citations are numbered from 1 over the included inputs only, in map order.
#[must_use]
pub fn trace_impact(sensitivity: &SensitivityMap, threshold: f64) -> Vec<String> {
    sensitivity
        .iter()
        .filter(|(_, value)| value.abs() >= threshold)
        .enumerate()
        .map(|(i, (name, value))| {
            format_citation(
                "Driver",
                i + 1,
                &format!("{name} (Sensitivity: {:.1}%)", value * 100.0),
            )
        })
        .collect()
}

/// One citation per active constraint, numbered in map order
#[must_use]
pub fn trace_constraints(constraints: &Constraints) -> Vec<String> {
    constraints
        .iter()
        .enumerate()
        .map(|(i, (name, cap))| format_citation("Constraint", i + 1, &format!("{name} <= {cap}")))
        .collect()
}
