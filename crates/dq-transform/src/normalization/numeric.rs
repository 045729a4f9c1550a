//! Numeric coercion of textual values.

/// Largest magnitude an `f64` represents without losing integer precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Parses a loosely formatted number.
///
/// Currency symbols, spaces and other decorations are dropped, then a decimal
/// comma is read as a decimal point. Returns `None` when nothing numeric is
/// left or the result is not finite.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.' | ','))
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Converts a float to an integer when it is integral and exactly representable.
pub fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Some(value as i64)
    } else {
        None
    }
}
