//! Summary statistics over sampled outcomes

use std::f64::consts::SQRT_2;

/// Percentile of an ascending-sorted slice, `p` in [0, 1].
///
/// Interpolates linearly between the two closest ranks (`rank = p * (n - 1)`).
/// Returns NaN for an empty slice.
#[must_use]
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n)
#[must_use]
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Complementary error function, Abramowitz & Stegun 7.1.26.
///
/// Absolute error below 1.5e-7 over the real line.
fn erfc(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let z = x.abs();
    let t = 1.0 / (1.0 + P * z);
    let poly = A1 + t * (A2 + t * (A3 + t * (A4 + t * A5)));
    let tail = t * poly * (-z * z).exp();

    if x < 0.0 { 2.0 - tail } else { tail }
}

/// Standard normal cumulative distribution function
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    0.5 * erfc(-x / SQRT_2)
}
