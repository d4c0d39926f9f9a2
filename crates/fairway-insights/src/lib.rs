//! Golf round analytics: handicap index, strokes-gained attribution,
//! player-level insights, and deterministic coaching copy.

pub mod analytics;
pub mod config;
pub mod error;
pub mod narrative;
pub mod telemetry;

pub use analytics::{
    BaselineTable, InsightsPolicy, OverallInsightsEngine, OverallInsightsSummary, RoundRecord,
    ScoringMode, StrokesGainedCalculator,
};
pub use narrative::{NarrativeCard, NarrativeEngine, NarrativeFacts};
