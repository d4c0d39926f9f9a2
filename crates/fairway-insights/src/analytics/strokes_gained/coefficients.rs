//! Fixed coefficients of the strokes-gained model.

pub const NEUTRAL_RATING: f64 = 72.0;
pub const NEUTRAL_SLOPE: f64 = 113.0;
pub const MIN_HOLES: u8 = 9;

/// Strokes per fairway hit above expectation.
pub const FIR_COEFFICIENT: f64 = 0.20;
/// Strokes per green in regulation above expectation, before handicap decay.
pub const GIR_BASE_COEFFICIENT: f64 = 0.33;
pub const GIR_DECAY_PER_HANDICAP: f64 = 0.015;
pub const GIR_MIN_FACTOR: f64 = 0.70;
pub const PENALTY_COEFFICIENT: f64 = 1.0;

/// Share of the course difficulty adjustment that lands on putts and penalties.
pub const PUTTS_DIFFICULTY_COEFFICIENT: f64 = 0.15;
pub const PENALTY_DIFFICULTY_COEFFICIENT: f64 = 0.05;

/// FIR/GIR percentage points lost per stroke of rating or slope difficulty.
pub const FIR_RATING_SENSITIVITY: f64 = 1.0;
pub const FIR_SLOPE_SENSITIVITY: f64 = 0.5;
pub const GIR_RATING_SENSITIVITY: f64 = 2.0;
pub const GIR_SLOPE_SENSITIVITY: f64 = 1.0;

/// Largest putting attribution per 18 holes before compression.
pub const PUTTING_CAP_PER_18: f64 = 4.0;
pub const PUTTING_EXCESS_WEIGHT: f64 = 0.5;

/// Value of a green in regulation for a player of `handicap`.
///
/// Greens matter less to higher handicaps, down to a floor of 70% of the base.
pub fn gir_coefficient(handicap: f64) -> f64 {
    let factor = (1.0 - GIR_DECAY_PER_HANDICAP * handicap.max(0.0)).max(GIR_MIN_FACTOR);
    GIR_BASE_COEFFICIENT * factor.min(1.0)
}

/// Compress a putting value beyond `cap` by keeping half of the excess.
pub fn compress_putting(value: f64, cap: f64) -> f64 {
    if value.abs() <= cap {
        return value;
    }
    let excess = value.abs() - cap;
    (cap + excess * PUTTING_EXCESS_WEIGHT).copysign(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gir_coefficient_decays_to_floor() {
        assert!((gir_coefficient(0.0) - 0.33).abs() < 1e-12);
        assert!((gir_coefficient(10.0) - 0.2805).abs() < 1e-12);
        assert!((gir_coefficient(20.0) - 0.231).abs() < 1e-12);
        assert!((gir_coefficient(40.0) - 0.231).abs() < 1e-12);
        assert!((gir_coefficient(-4.0) - 0.33).abs() < 1e-12);
    }

    #[test]
    fn putting_excess_is_halved_not_clipped() {
        assert_eq!(compress_putting(3.0, 4.0), 3.0);
        assert!((compress_putting(6.0, 4.0) - 5.0).abs() < 1e-12);
        assert!((compress_putting(-8.0, 4.0) + 6.0).abs() < 1e-12);
    }
}
