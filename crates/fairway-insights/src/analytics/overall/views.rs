use crate::analytics::domain::{ConfidenceTier, ScoringMode, SgComponent, StatPresence};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trajectory {
    Improving,
    Stable,
    Worsening,
}

impl Trajectory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Worsening => "worsening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyLabel {
    Stable,
    Moderate,
    Volatile,
    Insufficient,
}

impl ConsistencyLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Moderate => "moderate",
            Self::Volatile => "volatile",
            Self::Insufficient => "insufficient",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTrendView {
    pub recent_average: Option<f64>,
    pub baseline_average: Option<f64>,
    /// Recent minus baseline; negative means lower scores lately.
    pub delta: Option<f64>,
    pub trajectory: Option<Trajectory>,
    /// Strokes per round across the recent window; negative means falling.
    pub regression_slope: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyView {
    pub label: ConsistencyLabel,
    pub spread: Option<f64>,
    pub range: Option<f64>,
    pub samples: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedValue {
    pub point: f64,
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProjectionView {
    Available {
        horizon_rounds: usize,
        score: ProjectedValue,
        #[serde(skip_serializing_if = "Option::is_none")]
        handicap: Option<ProjectedValue>,
    },
    Gated {
        rounds_needed: usize,
    },
    Locked {
        upgrade_prompt: &'static str,
    },
}

impl ProjectionView {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDelta {
    pub component: SgComponent,
    pub recent_average: Option<f64>,
    pub baseline_average: Option<f64>,
    pub delta: Option<f64>,
    pub recent_samples: usize,
}

/// Per-round averages of tracked stats over the recent window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RecentStatAverages {
    pub fairways_hit: Option<f64>,
    pub greens_hit: Option<f64>,
    pub putts: Option<f64>,
    pub penalties: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DataQualityFlags {
    pub insufficient_rounds: bool,
    pub missing_score_trend: bool,
    pub combined_mode_gated: bool,
    pub missing_component_data: bool,
    pub volatile_scoring: bool,
    pub residual_dominant: bool,
    pub projection_unavailable: bool,
}

/// Derived snapshot for one player and one scoring mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallInsightsSummary {
    pub mode: ScoringMode,
    pub premium: bool,
    pub last_updated: DateTime<Utc>,
    pub content_hash: String,
    pub total_rounds: usize,
    pub recent_rounds: usize,
    pub baseline_rounds: usize,
    pub handicap_index: Option<f64>,
    pub score: ScoreTrendView,
    pub consistency: ConsistencyView,
    pub projection: ProjectionView,
    pub components: Vec<ComponentDelta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biggest_leak: Option<SgComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_component: Option<SgComponent>,
    pub confidence: ConfidenceTier,
    pub stat_presence: StatPresence,
    pub recent_stats: RecentStatAverages,
    pub flags: DataQualityFlags,
}

impl OverallInsightsSummary {
    pub fn component(&self, component: SgComponent) -> Option<&ComponentDelta> {
        self.components
            .iter()
            .find(|entry| entry.component == component)
    }

    pub fn component_delta(&self, component: SgComponent) -> Option<f64> {
        self.component(component).and_then(|entry| entry.delta)
    }
}
