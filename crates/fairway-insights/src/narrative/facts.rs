use super::plan::MessageSlot;
use crate::analytics::domain::{RoundRecord, SgComponent, StatPresence, TrackedStat};
use crate::analytics::overall::{
    leak_among, OverallInsightsSummary, RecentStatAverages, Trajectory,
};
use serde::Serialize;

/// A single round's residual must lose at least this many strokes, and be
/// twice the size of every measured component, to count as dominant.
pub const ROUND_RESIDUAL_DOMINANT_MIN: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeScope {
    /// Player-level insight cards built from an aggregated summary.
    Overall,
    /// Post-round recap built from one round's attribution.
    Round,
}

impl NarrativeScope {
    pub const fn slots(self) -> &'static [MessageSlot] {
        match self {
            Self::Overall => &[
                MessageSlot::ScoreTrend,
                MessageSlot::Strength,
                MessageSlot::Opportunity,
                MessageSlot::NextStep,
            ],
            Self::Round => &[
                MessageSlot::RoundResult,
                MessageSlot::Opportunity,
                MessageSlot::NextStep,
            ],
        }
    }

    /// Residual size above which a weakness card mentions the untracked remainder.
    pub(crate) const fn residual_context_min(self) -> f64 {
        match self {
            Self::Overall => 0.5,
            Self::Round => 2.0,
        }
    }
}

/// Numeric facts a set of narrative cards is rendered from.
///
/// Components only include skill areas whose backing stat is present, so
/// nothing downstream can talk about a stat that was never recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeFacts {
    pub scope: NarrativeScope,
    pub presence: StatPresence,
    pub trajectory: Option<Trajectory>,
    pub score_delta: Option<f64>,
    /// Strokes per round across the recent window.
    pub score_slope: Option<f64>,
    pub recent_average: Option<f64>,
    pub strokes_gained_total: Option<f64>,
    /// Measured components in tie-break order.
    pub components: Vec<(SgComponent, f64)>,
    pub residual: Option<f64>,
    pub biggest_leak: Option<SgComponent>,
    pub residual_dominant: bool,
    pub stats: RecentStatAverages,
}

impl NarrativeFacts {
    pub fn from_summary(summary: &OverallInsightsSummary) -> Self {
        let presence = summary.stat_presence;
        let components = measured_components(presence, |component| {
            summary.component_delta(component)
        });
        let residual = summary.component_delta(SgComponent::Residual);

        Self {
            scope: NarrativeScope::Overall,
            presence,
            trajectory: summary.score.trajectory,
            score_delta: summary.score.delta,
            score_slope: summary.score.regression_slope,
            recent_average: summary.score.recent_average,
            strokes_gained_total: None,
            components,
            residual,
            biggest_leak: summary
                .biggest_leak
                .filter(|component| presence.covers(*component)),
            residual_dominant: summary.flags.residual_dominant
                && residual.is_some_and(|value| value < 0.0),
            stats: summary.recent_stats,
        }
    }

    pub fn from_round(round: &RoundRecord) -> Self {
        let presence = StatPresence::of_round(round);
        let sg = &round.strokes_gained;
        let components = measured_components(presence, |component| sg.component(component));
        let residual = sg.residual.filter(|value| value.is_finite());
        let residual_dominant = residual.is_some_and(|value| {
            value <= -ROUND_RESIDUAL_DOMINANT_MIN
                && components
                    .iter()
                    .all(|(_, component)| component.abs() < value.abs() / 2.0)
        });

        Self {
            scope: NarrativeScope::Round,
            presence,
            trajectory: None,
            score_delta: None,
            score_slope: None,
            recent_average: None,
            strokes_gained_total: sg.total.filter(|value| value.is_finite()),
            biggest_leak: leak_among(&components),
            components,
            residual,
            residual_dominant,
            stats: RecentStatAverages {
                fairways_hit: round.fairways_hit.map(f64::from),
                greens_hit: round.greens_hit.map(f64::from),
                putts: round.putts.map(f64::from),
                penalties: round.penalties.map(f64::from),
            },
        }
    }

    pub fn is_score_only(&self) -> bool {
        self.presence.is_score_only()
    }

    /// Whether any component, residual included, has a value to talk about.
    pub fn has_attribution(&self) -> bool {
        !self.components.is_empty() || self.residual.is_some()
    }

    pub fn component_value(&self, component: SgComponent) -> Option<f64> {
        if component == SgComponent::Residual {
            return self.residual;
        }
        self.components
            .iter()
            .find(|(candidate, _)| *candidate == component)
            .map(|(_, value)| *value)
    }

    pub fn stat_value(&self, stat: TrackedStat) -> Option<f64> {
        if !self.presence.has(stat) {
            return None;
        }
        match stat {
            TrackedStat::Fairways => self.stats.fairways_hit,
            TrackedStat::Greens => self.stats.greens_hit,
            TrackedStat::Putts => self.stats.putts,
            TrackedStat::Penalties => self.stats.penalties,
        }
    }
}

fn measured_components(
    presence: StatPresence,
    value_of: impl Fn(SgComponent) -> Option<f64>,
) -> Vec<(SgComponent, f64)> {
    SgComponent::measured()
        .into_iter()
        .filter(|component| presence.covers(*component))
        .filter_map(|component| {
            value_of(component)
                .filter(|value| value.is_finite())
                .map(|value| (component, value))
        })
        .collect()
}
