//! Player-level aggregation of round history into the fact layer the
//! narrative engine and presentation layer consume.

mod components;
mod policy;
pub mod sanitize;
mod trend;
mod views;

pub use components::{
    leak_among, strongest_among, COMPONENT_SMALL, LEAK_THRESHOLD, LEAK_TIE_EPSILON,
    RESIDUAL_DOMINANT_MIN,
};
pub use policy::{InsightsPolicy, ModeThresholds};
pub use views::{
    ComponentDelta, ConsistencyLabel, ConsistencyView, DataQualityFlags, OverallInsightsSummary,
    ProjectedValue, ProjectionView, RecentStatAverages, ScoreTrendView, Trajectory,
};

use super::domain::{
    chronological, ConfidenceTier, RoundRecord, ScoringMode, StatPresence,
};
use super::handicap::{handicap_for_records, NEUTRAL_SLOPE};
use super::mode::normalize_rounds;
use super::refresh::content_hash;
use chrono::{DateTime, Utc};
use sanitize::{finite, mean};
use tracing::debug;
use trend::round1;

pub const UPGRADE_PROMPT: &str =
    "Upgrade to premium to see where your scores and handicap are heading";

/// Stateless aggregator applying one [`InsightsPolicy`] to round histories.
#[derive(Debug, Clone, Default)]
pub struct OverallInsightsEngine {
    policy: InsightsPolicy,
}

impl OverallInsightsEngine {
    pub fn new(policy: InsightsPolicy) -> Self {
        Self {
            policy: policy.sanitized(),
        }
    }

    pub fn policy(&self) -> &InsightsPolicy {
        &self.policy
    }

    /// One summary per scoring mode, in [`ScoringMode::ordered`] order.
    pub fn summarize_all(
        &self,
        rounds: &[RoundRecord],
        premium: bool,
        generated_at: DateTime<Utc>,
    ) -> Vec<OverallInsightsSummary> {
        ScoringMode::ordered()
            .into_iter()
            .map(|mode| self.summarize(rounds, mode, premium, generated_at))
            .collect()
    }

    pub fn summarize(
        &self,
        rounds: &[RoundRecord],
        mode: ScoringMode,
        premium: bool,
        generated_at: DateTime<Utc>,
    ) -> OverallInsightsSummary {
        let policy = &self.policy;
        let thresholds = ModeThresholds::for_mode(mode);
        let normalized = normalize_rounds(rounds, mode);
        let ordered = chronological(&normalized);
        let total_rounds = ordered.len();

        let recent = tail(&ordered, Some(policy.recent_window));
        let baseline = tail(&ordered, policy.baseline_window(premium));
        let trend_rounds = tail(&ordered, Some(policy.consistency_window));

        let recent_scores = scores(recent);
        let baseline_scores = scores(baseline);
        let trend_scores = scores(trend_rounds);

        let recent_average = mean(&recent_scores);
        let baseline_average = mean(&baseline_scores);
        // Recent and baseline must be distinct sets of rounds before any
        // recent-vs-baseline comparison means something.
        let comparable =
            recent.len() >= policy.min_recent_rounds && baseline.len() > recent.len();
        let delta = match (recent_average, baseline_average) {
            (Some(recent_avg), Some(baseline_avg)) if comparable => {
                Some(round1(recent_avg - baseline_avg))
            }
            _ => None,
        };
        let regression_slope = trend::regression_slope(&recent_scores);
        let trajectory =
            trend::classify_trajectory(delta, regression_slope, recent_scores.len(), &thresholds);

        let to_par: Vec<f64> = trend_rounds
            .iter()
            .filter_map(|round| round.resolved_to_par())
            .map(f64::from)
            .collect();
        let consistency =
            trend::consistency(&to_par, policy.consistency_min_samples, &thresholds);

        let handicap_index = handicap_for_records(&normalized);
        let projection = self.projection(
            &ordered,
            &trend_scores,
            handicap_index,
            premium,
            &thresholds,
        );

        let components = components::component_deltas(recent, baseline, comparable);
        let biggest_leak = components::biggest_leak(&components);
        let strongest_component = components::strongest_component(&components);
        let residual_dominant = components::residual_dominant(&components);

        let stat_presence = recent
            .iter()
            .map(|round| StatPresence::of_round(round))
            .fold(StatPresence::default(), StatPresence::union);

        let nine_hole_rounds = rounds.iter().filter(|round| round.is_nine_hole()).count();
        let flags = DataQualityFlags {
            insufficient_rounds: recent.len() < policy.min_recent_rounds,
            missing_score_trend: delta.is_none(),
            combined_mode_gated: mode == ScoringMode::Combined
                && nine_hole_rounds < policy.combined_min_nine_rounds,
            missing_component_data: components
                .iter()
                .filter(|entry| entry.component.stat().is_some())
                .any(|entry| entry.delta.is_none()),
            volatile_scoring: consistency.label == ConsistencyLabel::Volatile
                || consistency
                    .range
                    .is_some_and(|range| range > thresholds.volatile_range),
            residual_dominant,
            projection_unavailable: !projection.is_available(),
        };

        let sg_covered = recent
            .iter()
            .filter(|round| round.strokes_gained.has_any_component())
            .count();
        let confidence = if recent.len() < policy.min_recent_rounds || delta.is_none() {
            ConfidenceTier::Low
        } else if total_rounds < policy.projection_min_rounds || sg_covered * 2 < recent.len() {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::High
        };

        debug!(
            mode = mode.label(),
            premium,
            total_rounds,
            recent = recent.len(),
            baseline = baseline.len(),
            delta = ?delta,
            confidence = confidence.label(),
            "overall insights computed"
        );

        OverallInsightsSummary {
            mode,
            premium,
            last_updated: generated_at,
            content_hash: content_hash(rounds, premium),
            total_rounds,
            recent_rounds: recent.len(),
            baseline_rounds: baseline.len(),
            handicap_index,
            score: ScoreTrendView {
                recent_average: recent_average.map(round1),
                baseline_average: baseline_average.map(round1),
                delta,
                trajectory,
                regression_slope: regression_slope.map(|slope| (slope * 100.0).round() / 100.0),
            },
            consistency,
            projection,
            components,
            biggest_leak,
            strongest_component,
            confidence,
            stat_presence,
            recent_stats: recent_stats(recent),
            flags,
        }
    }

    fn projection(
        &self,
        ordered: &[&RoundRecord],
        trend_scores: &[f64],
        handicap_index: Option<f64>,
        premium: bool,
        thresholds: &ModeThresholds,
    ) -> ProjectionView {
        if !premium {
            return ProjectionView::Locked {
                upgrade_prompt: UPGRADE_PROMPT,
            };
        }
        let needed = self.policy.projection_min_rounds;
        if ordered.len() < needed {
            return ProjectionView::Gated {
                rounds_needed: needed - ordered.len(),
            };
        }

        let horizon = self.policy.projection_horizon;
        let Some((score, clamped_slope)) = trend::project_score(trend_scores, horizon, thresholds)
        else {
            return ProjectionView::Gated { rounds_needed: 0 };
        };

        let slopes: Vec<f64> = ordered
            .iter()
            .filter_map(|round| finite(round.slope_rating))
            .collect();
        let average_slope = mean(&slopes).unwrap_or(NEUTRAL_SLOPE);
        let handicap = handicap_index.map(|current| {
            trend::project_handicap(
                current,
                clamped_slope,
                horizon,
                average_slope,
                score.high - score.point,
            )
        });

        ProjectionView::Available {
            horizon_rounds: horizon,
            score,
            handicap,
        }
    }
}

fn tail<'r, 'a>(rounds: &'r [&'a RoundRecord], window: Option<usize>) -> &'r [&'a RoundRecord] {
    match window {
        Some(window) => &rounds[rounds.len().saturating_sub(window)..],
        None => rounds,
    }
}

fn scores(rounds: &[&RoundRecord]) -> Vec<f64> {
    rounds.iter().map(|round| f64::from(round.score)).collect()
}

fn recent_stats(recent: &[&RoundRecord]) -> RecentStatAverages {
    let average = |pick: fn(&RoundRecord) -> Option<u32>| {
        let values: Vec<f64> = recent
            .iter()
            .filter_map(|round| pick(round))
            .map(f64::from)
            .collect();
        mean(&values).map(round1)
    };

    RecentStatAverages {
        fairways_hit: average(|round| round.fairways_hit),
        greens_hit: average(|round| round.greens_hit),
        putts: average(|round| round.putts),
        penalties: average(|round| round.penalties),
    }
}
