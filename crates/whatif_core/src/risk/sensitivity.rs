//! One-at-a-time sensitivity and break-even probing

use crate::error::{AnalysisError, Result};
use crate::model::{BreakpointMap, CASH_FLOW, InputField, Inputs, SensitivityMap};
use crate::simulation::SimulationModel;

/// Relative bump applied to each input for sensitivity
pub const SENSITIVITY_BUMP: f64 = 0.10;
/// Relative probe used to estimate the local slope for breakpoints
pub const BREAKPOINT_PROBE: f64 = 0.01;
/// Probe size used when the input's base value is exactly zero
pub const ZERO_BASE_PROBE: f64 = 1.0;
/// Smallest probe, as a fraction of the summed magnitude of the core inputs.
/// A smaller step would be lost in the rounding of the cash-flow sum.
pub const PROBE_RESOLUTION: f64 = 1e-7;
/// A measured slope (metric units per input unit) at or below this magnitude
/// counts as no effect
pub const ZERO_SLOPE_TOLERANCE: f64 = 1e-6;

fn evaluate_metric(model: &SimulationModel, inputs: &Inputs, metric: &str) -> Result<f64> {
    model
        .run_deterministic(Some(inputs), None)?
        .metric(metric)
        .ok_or_else(|| AnalysisError::UnknownMetric(metric.to_string()))
}

/// Fractional change in `metric` when each perturbable field present in
/// `base_inputs` is raised by 10% on its own.
///
/// `base_inputs` is laid over the model baseline, so it may be partial.
/// Fails with `DivisionByZero` when the baseline metric is exactly zero.
pub fn calculate_sensitivity(
    model: &SimulationModel,
    base_inputs: &Inputs,
    metric: &str,
) -> Result<SensitivityMap> {
    let base_value = evaluate_metric(model, base_inputs, metric)?;
    if base_value == 0.0 {
        return Err(AnalysisError::DivisionByZero {
            metric: metric.to_string(),
        });
    }

    let mut sensitivity = SensitivityMap::new();
    for field in InputField::PERTURBABLE {
        let Some(value) = base_inputs.field(field) else {
            continue;
        };
        let bumped = base_inputs.with(field.as_str(), value * (1.0 + SENSITIVITY_BUMP));
        let new_value = evaluate_metric(model, &bumped, metric)?;
        sensitivity.insert(
            field.as_str().to_string(),
            (new_value - base_value) / base_value,
        );
    }
    Ok(sensitivity)
}

/// Value each perturbable field would need, all else fixed, for cash flow to
/// reach `threshold`.
///
/// The slope comes from a +1% probe (+1 unit when the field is zero) and the
/// crossing is solved linearly. A probe too small to register against the
/// other inputs is widened to `PROBE_RESOLUTION` of their summed magnitude. A
/// field with no measurable slope maps to positive infinity.
pub fn calculate_breakpoints(
    model: &SimulationModel,
    base_inputs: &Inputs,
    threshold: f64,
) -> Result<BreakpointMap> {
    let base = model.run_deterministic(Some(base_inputs), None)?;
    let base_metric = base.cash_flow;
    let scale: f64 = InputField::ALL
        .iter()
        .map(|&field| base.inputs.field(field).abs())
        .sum();
    let min_step = PROBE_RESOLUTION * scale.max(1.0);

    let mut breakpoints = BreakpointMap::new();
    for field in InputField::PERTURBABLE {
        let Some(value) = base_inputs.field(field) else {
            continue;
        };
        let mut step = if value == 0.0 {
            ZERO_BASE_PROBE
        } else {
            value * BREAKPOINT_PROBE
        };
        if step.abs() < min_step {
            step = min_step.copysign(step);
        }
        let probed = evaluate_metric(
            model,
            &base_inputs.with(field.as_str(), value + step),
            CASH_FLOW,
        )?;
        breakpoints.insert(
            field.as_str().to_string(),
            solve_breakpoint(value, step, base_metric, probed, threshold),
        );
    }
    Ok(breakpoints)
}

/// Linear crossing of `threshold` from one probe of size `step` at `value`
fn solve_breakpoint(
    value: f64,
    step: f64,
    base_metric: f64,
    probed: f64,
    threshold: f64,
) -> f64 {
    let slope = (probed - base_metric) / step;
    if slope.abs() <= ZERO_SLOPE_TOLERANCE {
        return f64::INFINITY;
    }
    value + (threshold - base_metric) / slope
}
