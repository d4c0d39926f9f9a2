//! Coercion of loosely-typed inputs to documented defaults.

pub const DEFAULT_WINDOW: usize = 5;

/// Keep finite values only.
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}

/// Parse a count; empty, negative, or non-numeric input becomes 0.
pub fn sanitize_count(raw: Option<&str>) -> usize {
    raw.map(str::trim)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value.floor() as usize)
        .unwrap_or(0)
}

/// Parse a window size; anything that is not a positive number becomes 5.
pub fn sanitize_window(raw: Option<&str>) -> usize {
    match sanitize_count(raw) {
        0 => DEFAULT_WINDOW,
        value => value,
    }
}

pub fn window_or_default(value: usize) -> usize {
    if value == 0 {
        DEFAULT_WINDOW
    } else {
        value
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
