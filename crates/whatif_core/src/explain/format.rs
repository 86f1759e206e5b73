//! Number formatting for narrative text

/// Magnitudes from here on are written in scientific notation instead of
/// grouped digits
const MAX_GROUPED: f64 = 1e18;

/// Non-finite and out-of-range values, written without grouping
fn unformattable(value: f64) -> Option<String> {
    if !value.is_finite() {
        Some(value.to_string())
    } else if value.abs() >= MAX_GROUPED {
        Some(format!("{value:.3e}"))
    } else {
        None
    }
}

fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Whole-dollar currency with thousands separators, e.g. `-$1,250`
#[must_use]
pub fn format_currency_short(value: f64) -> String {
    if let Some(text) = unformattable(value) {
        return format!("${text}");
    }
    let dollars = group_thousands(value.abs().round() as u64);
    if value < 0.0 && dollars != "0" {
        format!("-${dollars}")
    } else {
        format!("${dollars}")
    }
}

/// Plain amount: whole numbers without decimals, otherwise two places
#[must_use]
pub fn format_amount(value: f64) -> String {
    if let Some(text) = unformattable(value) {
        return text;
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs_value = value.abs();
    if abs_value.fract() == 0.0 {
        return format!("{sign}{}", group_thousands(abs_value as u64));
    }
    let cents = (abs_value * 100.0).round() as u64;
    format!("{sign}{}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// `operational_costs` -> `operational costs`
#[must_use]
pub fn humanize(name: &str) -> String {
    name.replace('_', " ")
}
