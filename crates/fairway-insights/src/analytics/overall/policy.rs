use super::sanitize::window_or_default;
use crate::analytics::domain::ScoringMode;
use serde::{Deserialize, Serialize};

/// Product policy dials for the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsPolicy {
    pub recent_window: usize,
    pub free_baseline_window: usize,
    /// `None` means premium baselines span the whole history.
    pub premium_baseline_window: Option<usize>,
    pub min_recent_rounds: usize,
    pub projection_min_rounds: usize,
    pub projection_horizon: usize,
    pub consistency_window: usize,
    pub consistency_min_samples: usize,
    pub combined_min_nine_rounds: usize,
}

impl Default for InsightsPolicy {
    fn default() -> Self {
        Self {
            recent_window: 5,
            free_baseline_window: 20,
            premium_baseline_window: None,
            min_recent_rounds: 3,
            projection_min_rounds: 10,
            projection_horizon: 10,
            consistency_window: 10,
            consistency_min_samples: 5,
            combined_min_nine_rounds: 3,
        }
    }
}

impl InsightsPolicy {
    /// Replace zero-sized windows with the default window.
    pub fn sanitized(mut self) -> Self {
        self.recent_window = window_or_default(self.recent_window);
        self.free_baseline_window = window_or_default(self.free_baseline_window);
        self.premium_baseline_window = self.premium_baseline_window.map(window_or_default);
        self.projection_horizon = window_or_default(self.projection_horizon);
        self.consistency_window = window_or_default(self.consistency_window);
        self
    }

    pub fn baseline_window(&self, premium: bool) -> Option<usize> {
        if premium {
            self.premium_baseline_window
        } else {
            Some(self.free_baseline_window)
        }
    }
}

/// Mode-dependent numeric thresholds. Eighteen-hole-equivalent scores move
/// twice as far as nine-hole scores, so their bands are twice as wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeThresholds {
    pub trend_epsilon: f64,
    pub slope_epsilon: f64,
    pub max_projection_slope: f64,
    pub stable_spread: f64,
    pub moderate_spread: f64,
    pub volatile_range: f64,
    pub min_projected_score: f64,
}

impl ModeThresholds {
    pub const fn for_mode(mode: ScoringMode) -> Self {
        match mode {
            ScoringMode::Nine => Self {
                trend_epsilon: 0.5,
                slope_epsilon: 0.15,
                max_projection_slope: 0.25,
                stable_spread: 1.5,
                moderate_spread: 2.5,
                volatile_range: 8.0,
                min_projected_score: 27.0,
            },
            ScoringMode::Eighteen | ScoringMode::Combined => Self {
                trend_epsilon: 1.0,
                slope_epsilon: 0.3,
                max_projection_slope: 0.5,
                stable_spread: 3.0,
                moderate_spread: 5.0,
                volatile_range: 15.0,
                min_projected_score: 54.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_policy_restores_default_windows() {
        let policy = InsightsPolicy {
            recent_window: 0,
            consistency_window: 0,
            premium_baseline_window: Some(0),
            ..InsightsPolicy::default()
        }
        .sanitized();
        assert_eq!(policy.recent_window, 5);
        assert_eq!(policy.consistency_window, 5);
        assert_eq!(policy.premium_baseline_window, Some(5));
    }

    #[test]
    fn free_users_get_bounded_baseline() {
        let policy = InsightsPolicy::default();
        assert_eq!(policy.baseline_window(false), Some(20));
        assert_eq!(policy.baseline_window(true), None);
    }
}
