pub mod domain;
pub mod handicap;
pub mod import;
pub mod mode;
pub mod overall;
pub mod refresh;
pub mod strokes_gained;
pub mod tee;

pub use domain::{
    ConfidenceTier, RoundId, RoundRecord, ScoringMode, SgComponent, StatPresence,
    StrokesGainedBreakdown, TrackedStat,
};
pub use handicap::{calculate_handicap, handicap_for_records, HandicapRound};
pub use import::{BaselineImporter, ImportError, RoundHistoryImporter};
pub use mode::normalize_rounds;
pub use overall::{InsightsPolicy, OverallInsightsEngine, OverallInsightsSummary};
pub use refresh::{content_hash, should_refresh};
pub use strokes_gained::{BaselineTable, StrokesGainedCalculator, StrokesGainedError};
pub use tee::{RoundSegment, TeeContext, TeeContextError, TeeSet};
