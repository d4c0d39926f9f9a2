use super::policy::ModeThresholds;
use super::sanitize::mean;
use super::views::{ConsistencyLabel, ConsistencyView, ProjectedValue, Trajectory};
use crate::analytics::handicap::MAX_HANDICAP_INDEX;

/// Minimum points before a regression slope is reported.
const MIN_REGRESSION_POINTS: usize = 3;
/// Minimum points before the slope may override a stable delta.
const MIN_SLOPE_OVERRIDE_POINTS: usize = 5;
const MIN_PROJECTION_BAND: f64 = 1.0;

/// Sample standard deviation.
pub(crate) fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let variance = values
        .iter()
        .map(|value| (value - avg).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Least-squares slope of `values` against their index.
pub(crate) fn regression_slope(values: &[f64]) -> Option<f64> {
    if values.len() < MIN_REGRESSION_POINTS {
        return None;
    }
    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = mean(values)?;

    let (numerator, denominator) = values.iter().enumerate().fold(
        (0.0, 0.0),
        |(num, den), (idx, value)| {
            let dx = idx as f64 - mean_x;
            (num + dx * (value - mean_y), den + dx * dx)
        },
    );

    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Label the trend from the recent-vs-baseline delta, letting a clear
/// regression slope break a stable reading.
pub(crate) fn classify_trajectory(
    delta: Option<f64>,
    slope: Option<f64>,
    slope_points: usize,
    thresholds: &ModeThresholds,
) -> Option<Trajectory> {
    let delta = delta?;
    let by_delta = if delta <= -thresholds.trend_epsilon {
        Trajectory::Improving
    } else if delta >= thresholds.trend_epsilon {
        Trajectory::Worsening
    } else {
        Trajectory::Stable
    };

    if by_delta != Trajectory::Stable || slope_points < MIN_SLOPE_OVERRIDE_POINTS {
        return Some(by_delta);
    }

    match slope {
        Some(slope) if slope <= -thresholds.slope_epsilon => Some(Trajectory::Improving),
        Some(slope) if slope >= thresholds.slope_epsilon => Some(Trajectory::Worsening),
        _ => Some(Trajectory::Stable),
    }
}

pub(crate) fn consistency(
    to_par: &[f64],
    min_samples: usize,
    thresholds: &ModeThresholds,
) -> ConsistencyView {
    let samples = to_par.len();
    let range = to_par
        .iter()
        .copied()
        .fold(None, |acc: Option<(f64, f64)>, value| match acc {
            Some((low, high)) => Some((low.min(value), high.max(value))),
            None => Some((value, value)),
        })
        .map(|(low, high)| high - low);

    if samples < min_samples.max(2) {
        return ConsistencyView {
            label: ConsistencyLabel::Insufficient,
            spread: None,
            range,
            samples,
        };
    }

    let spread = std_dev(to_par);
    let label = match spread {
        Some(value) if value <= thresholds.stable_spread => ConsistencyLabel::Stable,
        Some(value) if value <= thresholds.moderate_spread => ConsistencyLabel::Moderate,
        Some(_) => ConsistencyLabel::Volatile,
        None => ConsistencyLabel::Insufficient,
    };

    ConsistencyView {
        label,
        spread: spread.map(round1),
        range,
        samples,
    }
}

/// Project scores `horizon` rounds past the end of `scores`.
///
/// The slope is clamped before extrapolating so a short hot or cold streak
/// cannot produce runaway projections.
pub(crate) fn project_score(
    scores: &[f64],
    horizon: usize,
    thresholds: &ModeThresholds,
) -> Option<(ProjectedValue, f64)> {
    let slope = regression_slope(scores)?;
    let clamped = slope.clamp(
        -thresholds.max_projection_slope,
        thresholds.max_projection_slope,
    );
    let n = scores.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = mean(scores)?;
    let target_x = n - 1.0 + horizon as f64;

    let point = (mean_y + clamped * (target_x - mean_x)).max(thresholds.min_projected_score);
    let band = std_dev(scores)
        .unwrap_or(MIN_PROJECTION_BAND)
        .max(MIN_PROJECTION_BAND);

    Some((
        ProjectedValue {
            point: round1(point),
            low: round1((point - band).max(thresholds.min_projected_score)),
            high: round1(point + band),
        },
        clamped,
    ))
}

/// Carry the clamped score slope into handicap terms using the average slope
/// rating of the rounds played.
pub(crate) fn project_handicap(
    current: f64,
    clamped_slope: f64,
    horizon: usize,
    average_slope_rating: f64,
    score_band: f64,
) -> ProjectedValue {
    let slope_factor = 113.0 / average_slope_rating.max(1.0);
    let point = (current + clamped_slope * horizon as f64 * slope_factor).min(MAX_HANDICAP_INDEX);
    let band = (score_band * slope_factor / 2.0).max(0.5);

    ProjectedValue {
        point: round1(point),
        low: round1(point - band),
        high: round1((point + band).min(MAX_HANDICAP_INDEX)),
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
