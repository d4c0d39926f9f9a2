use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored rounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoundId(pub String);

/// Scoring population an insights request is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    Nine,
    Eighteen,
    Combined,
}

impl ScoringMode {
    pub const fn ordered() -> [ScoringMode; 3] {
        [Self::Nine, Self::Eighteen, Self::Combined]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Nine => "nine",
            Self::Eighteen => "eighteen",
            Self::Combined => "combined",
        }
    }

    /// Hole count a single round in this mode represents once normalized.
    pub const fn holes(self) -> u8 {
        match self {
            Self::Nine => 9,
            Self::Eighteen | Self::Combined => 18,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nine" | "9" => Some(Self::Nine),
            "eighteen" | "18" => Some(Self::Eighteen),
            "combined" | "all" => Some(Self::Combined),
            _ => None,
        }
    }
}

/// Trust level attached to a strokes-gained attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Skill areas a round's strokes gained is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SgComponent {
    OffTee,
    Approach,
    Putting,
    Penalties,
    Residual,
}

impl SgComponent {
    /// Components backed by a directly tracked stat, in leak tie-break order.
    pub const fn measured() -> [SgComponent; 4] {
        [Self::Approach, Self::OffTee, Self::Putting, Self::Penalties]
    }

    pub const fn ordered() -> [SgComponent; 5] {
        [
            Self::OffTee,
            Self::Approach,
            Self::Putting,
            Self::Penalties,
            Self::Residual,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::OffTee => "off_tee",
            Self::Approach => "approach",
            Self::Putting => "putting",
            Self::Penalties => "penalties",
            Self::Residual => "residual",
        }
    }

    /// Reader-facing name used inside narrative copy.
    pub const fn label(self) -> &'static str {
        match self {
            Self::OffTee => "play off the tee",
            Self::Approach => "approach play",
            Self::Putting => "putting",
            Self::Penalties => "penalty avoidance",
            Self::Residual => "short game",
        }
    }

    /// Tracked stat the component depends on, if any.
    pub const fn stat(self) -> Option<TrackedStat> {
        match self {
            Self::OffTee => Some(TrackedStat::Fairways),
            Self::Approach => Some(TrackedStat::Greens),
            Self::Putting => Some(TrackedStat::Putts),
            Self::Penalties => Some(TrackedStat::Penalties),
            Self::Residual => None,
        }
    }
}

/// Counting stats a player may record per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedStat {
    Fairways,
    Greens,
    Putts,
    Penalties,
}

impl TrackedStat {
    /// Order in which missing stats are suggested for tracking.
    pub const fn tracking_priority() -> [TrackedStat; 4] {
        [Self::Putts, Self::Greens, Self::Fairways, Self::Penalties]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fairways => "fairways hit",
            Self::Greens => "greens in regulation",
            Self::Putts => "putts",
            Self::Penalties => "penalty strokes",
        }
    }
}

/// Which tracked stats are available for the facts a message is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatPresence {
    pub fairways: bool,
    pub greens: bool,
    pub putts: bool,
    pub penalties: bool,
}

impl StatPresence {
    pub fn of_round(round: &RoundRecord) -> Self {
        Self {
            fairways: round.fairways_hit.is_some(),
            greens: round.greens_hit.is_some(),
            putts: round.putts.is_some(),
            penalties: round.penalties.is_some(),
        }
    }

    pub fn has(&self, stat: TrackedStat) -> bool {
        match stat {
            TrackedStat::Fairways => self.fairways,
            TrackedStat::Greens => self.greens,
            TrackedStat::Putts => self.putts,
            TrackedStat::Penalties => self.penalties,
        }
    }

    /// Component is reportable when its backing stat was recorded.
    pub fn covers(&self, component: SgComponent) -> bool {
        component.stat().map(|stat| self.has(stat)).unwrap_or(true)
    }

    pub fn is_score_only(&self) -> bool {
        !(self.fairways || self.greens || self.putts || self.penalties)
    }

    pub fn is_complete(&self) -> bool {
        self.fairways && self.greens && self.putts && self.penalties
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            fairways: self.fairways || other.fairways,
            greens: self.greens || other.greens,
            putts: self.putts || other.putts,
            penalties: self.penalties || other.penalties,
        }
    }

    pub fn first_missing(&self) -> Option<TrackedStat> {
        TrackedStat::tracking_priority()
            .into_iter()
            .find(|stat| !self.has(*stat))
    }
}

/// Stored five-part attribution for one round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokesGainedBreakdown {
    pub total: Option<f64>,
    pub off_tee: Option<f64>,
    pub approach: Option<f64>,
    pub putting: Option<f64>,
    pub penalties: Option<f64>,
    pub residual: Option<f64>,
    pub confidence: Option<ConfidenceTier>,
    #[serde(default)]
    pub partial_analysis: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

impl StrokesGainedBreakdown {
    /// Empty attribution for rounds without a handicap at the time of play.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            partial_analysis: true,
            messages: vec![message.into()],
            ..Self::default()
        }
    }

    pub fn component(&self, component: SgComponent) -> Option<f64> {
        match component {
            SgComponent::OffTee => self.off_tee,
            SgComponent::Approach => self.approach,
            SgComponent::Putting => self.putting,
            SgComponent::Penalties => self.penalties,
            SgComponent::Residual => self.residual,
        }
    }

    pub(crate) fn component_mut(&mut self, component: SgComponent) -> &mut Option<f64> {
        match component {
            SgComponent::OffTee => &mut self.off_tee,
            SgComponent::Approach => &mut self.approach,
            SgComponent::Putting => &mut self.putting,
            SgComponent::Penalties => &mut self.penalties,
            SgComponent::Residual => &mut self.residual,
        }
    }

    pub fn has_any_component(&self) -> bool {
        SgComponent::ordered()
            .into_iter()
            .any(|component| self.component(component).is_some())
    }
}

/// One recorded round as delivered by the persistence collaborator.
///
/// Course fields describe the holes actually played: a nine-hole round carries a
/// nine-hole rating and par.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub id: RoundId,
    pub played_on: NaiveDate,
    pub hole_count: u8,
    #[serde(default)]
    pub non_par3_holes: Option<u8>,
    pub score: u32,
    #[serde(default)]
    pub to_par: Option<i32>,
    #[serde(default)]
    pub fairways_hit: Option<u32>,
    #[serde(default)]
    pub fairways_possible: Option<u32>,
    #[serde(default)]
    pub greens_hit: Option<u32>,
    #[serde(default)]
    pub putts: Option<u32>,
    #[serde(default)]
    pub penalties: Option<u32>,
    #[serde(default)]
    pub course_rating: Option<f64>,
    #[serde(default)]
    pub slope_rating: Option<f64>,
    #[serde(default)]
    pub par: Option<u32>,
    #[serde(default)]
    pub handicap_at_round: Option<f64>,
    #[serde(default)]
    pub strokes_gained: StrokesGainedBreakdown,
}

impl RoundRecord {
    /// Score relative to par, derived from par when the stored value is absent.
    pub fn resolved_to_par(&self) -> Option<i32> {
        self.to_par
            .or_else(|| self.par.map(|par| self.score as i32 - par as i32))
    }

    pub fn is_nine_hole(&self) -> bool {
        self.hole_count == 9
    }
}

/// Sort rounds oldest first without assuming the caller's ordering.
///
/// Rounds on the same day keep their relative input order.
pub fn chronological(rounds: &[RoundRecord]) -> Vec<&RoundRecord> {
    let mut ordered: Vec<&RoundRecord> = rounds.iter().collect();
    ordered.sort_by_key(|round| round.played_on);
    ordered
}
