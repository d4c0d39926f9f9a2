use super::drills::{drills_for, Drill};
use super::facts::{NarrativeFacts, NarrativeScope};
use super::variants;
use crate::analytics::domain::{SgComponent, StatPresence, TrackedStat};
use crate::analytics::overall::{strongest_among, Trajectory};
use serde::Serialize;

/// Strokes gained beyond this band reads as better or worse than expected.
pub const ROUND_RESULT_BAND: f64 = 1.0;
/// Best component above this is a clear strength; below its negative, even
/// the best area is losing ground.
pub const STRENGTH_BAND: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSlot {
    ScoreTrend,
    RoundResult,
    Strength,
    Opportunity,
    NextStep,
}

impl MessageSlot {
    pub const fn key(self) -> &'static str {
        match self {
            Self::ScoreTrend => "score_trend",
            Self::RoundResult => "round_result",
            Self::Strength => "strength",
            Self::Opportunity => "opportunity",
            Self::NextStep => "next_step",
        }
    }

    pub const fn prefix(self) -> &'static str {
        match self {
            Self::ScoreTrend => "Scoring trend:",
            Self::RoundResult => "Round result:",
            Self::Strength => "Strength:",
            Self::Opportunity => "Opportunity:",
            Self::NextStep => "Next step:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
    Success,
    Info,
    Warning,
}

/// Semantic outcome of one slot. Emoji and level depend on the outcome only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    TrendImproving,
    TrendStable,
    TrendWorsening,
    /// Recent scores are falling round over round while the average has not
    /// yet moved below baseline.
    TrendImprovingLately,
    TrendWorseningLately,
    TrendInsufficient,
    RoundBetter,
    RoundAsExpected,
    RoundWorse,
    RoundUnavailable,
    BestPositive,
    BestNeutral,
    BestNegative,
    StrengthUnavailable,
    Weakness,
    ResidualDominant,
    OpportunityNeutral,
    /// Stats exist but there is nothing to compare them against yet.
    OpportunityPending,
    ScoreOnly,
    Drill,
    Tracking,
    AddHandicap,
    KeepPosting,
}

impl Outcome {
    pub const ALL: [Outcome; 23] = [
        Self::TrendImproving,
        Self::TrendStable,
        Self::TrendWorsening,
        Self::TrendImprovingLately,
        Self::TrendWorseningLately,
        Self::TrendInsufficient,
        Self::RoundBetter,
        Self::RoundAsExpected,
        Self::RoundWorse,
        Self::RoundUnavailable,
        Self::BestPositive,
        Self::BestNeutral,
        Self::BestNegative,
        Self::StrengthUnavailable,
        Self::Weakness,
        Self::ResidualDominant,
        Self::OpportunityNeutral,
        Self::OpportunityPending,
        Self::ScoreOnly,
        Self::Drill,
        Self::Tracking,
        Self::AddHandicap,
        Self::KeepPosting,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::TrendImproving => "improving",
            Self::TrendStable => "stable",
            Self::TrendWorsening => "worsening",
            Self::TrendImprovingLately => "improving_lately",
            Self::TrendWorseningLately => "worsening_lately",
            Self::TrendInsufficient => "insufficient",
            Self::RoundBetter => "better",
            Self::RoundAsExpected => "as_expected",
            Self::RoundWorse => "worse",
            Self::RoundUnavailable => "unavailable",
            Self::BestPositive => "best_positive",
            Self::BestNeutral => "best_neutral",
            Self::BestNegative => "best_negative",
            Self::StrengthUnavailable => "strength_unavailable",
            Self::Weakness => "weakness",
            Self::ResidualDominant => "residual_dominant",
            Self::OpportunityNeutral => "neutral",
            Self::OpportunityPending => "pending",
            Self::ScoreOnly => "score_only",
            Self::Drill => "drill",
            Self::Tracking => "tracking",
            Self::AddHandicap => "add_handicap",
            Self::KeepPosting => "keep_posting",
        }
    }

    pub const fn slot(self) -> MessageSlot {
        match self {
            Self::TrendImproving
            | Self::TrendStable
            | Self::TrendWorsening
            | Self::TrendImprovingLately
            | Self::TrendWorseningLately
            | Self::TrendInsufficient => MessageSlot::ScoreTrend,
            Self::RoundBetter
            | Self::RoundAsExpected
            | Self::RoundWorse
            | Self::RoundUnavailable => MessageSlot::RoundResult,
            Self::BestPositive
            | Self::BestNeutral
            | Self::BestNegative
            | Self::StrengthUnavailable => MessageSlot::Strength,
            Self::Weakness
            | Self::ResidualDominant
            | Self::OpportunityNeutral
            | Self::OpportunityPending
            | Self::ScoreOnly => MessageSlot::Opportunity,
            Self::Drill | Self::Tracking | Self::AddHandicap | Self::KeepPosting => {
                MessageSlot::NextStep
            }
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::TrendImproving | Self::TrendImprovingLately => "📈",
            Self::TrendStable | Self::RoundAsExpected => "➖",
            Self::TrendWorsening | Self::TrendWorseningLately | Self::RoundWorse => "📉",
            Self::TrendInsufficient
            | Self::RoundUnavailable
            | Self::BestNegative
            | Self::StrengthUnavailable => "🔎",
            Self::RoundBetter | Self::BestPositive | Self::BestNeutral => "✅",
            Self::Weakness | Self::ResidualDominant => "⚠️",
            Self::OpportunityNeutral | Self::OpportunityPending => "💡",
            Self::ScoreOnly | Self::Tracking | Self::AddHandicap | Self::KeepPosting => "📝",
            Self::Drill => "🎯",
        }
    }

    pub const fn level(self) -> MessageLevel {
        match self {
            Self::TrendImproving
            | Self::TrendImprovingLately
            | Self::RoundBetter
            | Self::BestPositive => MessageLevel::Success,
            Self::TrendWorsening
            | Self::TrendWorseningLately
            | Self::RoundWorse
            | Self::Weakness
            | Self::ResidualDominant => MessageLevel::Warning,
            _ => MessageLevel::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallToAction {
    Track(TrackedStat),
    Drill(&'static Drill),
}

/// Everything the renderer and the guard need to know about one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPlan {
    pub slot: MessageSlot,
    pub outcome: Outcome,
    pub presence: StatPresence,
    pub score_only: bool,
    pub opportunity_is_weak: bool,
    pub component: Option<SgComponent>,
    /// Component derived from the residual rather than a tracked stat.
    pub component_inferred: bool,
    pub cta: Option<CallToAction>,
    values: Vec<(&'static str, String)>,
}

impl CardPlan {
    /// Bare plan for `outcome`; used by the planner and by guard tests.
    pub fn new(outcome: Outcome, presence: StatPresence) -> Self {
        Self {
            slot: outcome.slot(),
            outcome,
            presence,
            score_only: presence.is_score_only(),
            opportunity_is_weak: matches!(outcome, Outcome::Weakness | Outcome::ResidualDominant),
            component: None,
            component_inferred: outcome == Outcome::ResidualDominant,
            cta: None,
            values: Vec::new(),
        }
    }

    pub fn emoji(&self) -> &'static str {
        self.outcome.emoji()
    }

    pub fn prefix(&self) -> &'static str {
        self.slot.prefix()
    }

    pub fn level(&self) -> MessageLevel {
        self.outcome.level()
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn values(&self) -> &[(&'static str, String)] {
        &self.values
    }

    fn with_value(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.push((name, value.into()));
        self
    }

    fn with_component(mut self, component: SgComponent) -> Self {
        self.component = Some(component);
        self
    }

    pub fn with_cta(mut self, cta: CallToAction) -> Self {
        self.values.retain(|(key, _)| !CTA_KEYS.contains(key));
        match cta {
            CallToAction::Track(stat) => {
                self.values.push(("stat", stat.label().to_string()));
            }
            CallToAction::Drill(drill) => {
                self.values.push(("drill", drill.name.to_string()));
                self.values.push(("instruction", drill.instruction.to_string()));
                self.values.push(("benefit", drill.benefit.to_string()));
                self.values.push(("goal", drill.goal.to_string()));
            }
        }
        self.cta = Some(cta);
        self
    }
}

const CTA_KEYS: [&str; 5] = ["stat", "drill", "instruction", "benefit", "goal"];

/// Plan one slot. The seed and offset only influence which drill is offered.
pub fn plan_slot(slot: MessageSlot, facts: &NarrativeFacts, seed: &str, offset: u64) -> CardPlan {
    match slot {
        MessageSlot::ScoreTrend => plan_trend(facts),
        MessageSlot::RoundResult => plan_round_result(facts),
        MessageSlot::Strength => plan_strength(facts),
        MessageSlot::Opportunity => plan_opportunity(facts),
        MessageSlot::NextStep => plan_next_step(facts, seed, offset),
    }
}

/// The delta is only quoted under a direction it agrees with. A trajectory
/// carried by the recent slope against a flat or opposing delta is worded
/// from the slope instead.
fn plan_trend(facts: &NarrativeFacts) -> CardPlan {
    let delta = facts.score_delta;
    let outcome = match facts.trajectory {
        Some(Trajectory::Improving) if delta.is_some_and(|delta| delta >= 0.0) => {
            Outcome::TrendImprovingLately
        }
        Some(Trajectory::Worsening) if delta.is_some_and(|delta| delta <= 0.0) => {
            Outcome::TrendWorseningLately
        }
        Some(Trajectory::Improving) => Outcome::TrendImproving,
        Some(Trajectory::Stable) => Outcome::TrendStable,
        Some(Trajectory::Worsening) => Outcome::TrendWorsening,
        None => Outcome::TrendInsufficient,
    };
    let mut plan = CardPlan::new(outcome, facts.presence);
    if outcome == Outcome::TrendInsufficient {
        return plan;
    }
    if let Some(recent) = facts.recent_average {
        plan = plan.with_value("recent", format!("{recent:.1}"));
    }
    match outcome {
        Outcome::TrendImprovingLately | Outcome::TrendWorseningLately => {
            if let Some(slope) = facts.score_slope {
                plan = plan.with_value("per_round", unsigned_one(slope));
            }
        }
        _ => {
            if let Some(delta) = delta {
                plan = plan.with_value("delta", unsigned_one(delta));
            }
        }
    }
    plan
}

fn plan_round_result(facts: &NarrativeFacts) -> CardPlan {
    let Some(total) = facts.strokes_gained_total else {
        return CardPlan::new(Outcome::RoundUnavailable, facts.presence);
    };
    let outcome = if total >= ROUND_RESULT_BAND {
        Outcome::RoundBetter
    } else if total <= -ROUND_RESULT_BAND {
        Outcome::RoundWorse
    } else {
        Outcome::RoundAsExpected
    };
    CardPlan::new(outcome, facts.presence).with_value("value", unsigned_one(total))
}

fn plan_strength(facts: &NarrativeFacts) -> CardPlan {
    let best = if facts.is_score_only() {
        None
    } else {
        strongest_among(&facts.components)
    };
    let Some((component, value)) = best else {
        return CardPlan::new(Outcome::StrengthUnavailable, facts.presence);
    };

    let outcome = if value > STRENGTH_BAND {
        Outcome::BestPositive
    } else if value >= -STRENGTH_BAND {
        Outcome::BestNeutral
    } else {
        Outcome::BestNegative
    };
    component_plan(outcome, facts, component, value)
}

fn plan_opportunity(facts: &NarrativeFacts) -> CardPlan {
    if facts.is_score_only() {
        return CardPlan::new(Outcome::ScoreOnly, facts.presence);
    }
    if !facts.has_attribution() {
        return CardPlan::new(Outcome::OpportunityPending, facts.presence);
    }

    if facts.residual_dominant {
        if let Some(residual) = facts.residual {
            return CardPlan::new(Outcome::ResidualDominant, facts.presence)
                .with_component(SgComponent::Residual)
                .with_value("signed", signed_one(residual));
        }
    }

    if let Some(leak) = facts.biggest_leak {
        if let Some(value) = facts.component_value(leak) {
            let context = match facts.residual {
                Some(residual) if residual.abs() >= facts.scope.residual_context_min() => {
                    RESIDUAL_CONTEXT.to_string()
                }
                _ => String::new(),
            };
            return component_plan(Outcome::Weakness, facts, leak, value)
                .with_value("residual_context", context);
        }
    }

    CardPlan::new(Outcome::OpportunityNeutral, facts.presence)
}

fn plan_next_step(facts: &NarrativeFacts, seed: &str, offset: u64) -> CardPlan {
    let drill = |component: SgComponent| {
        let library = drills_for(component);
        let outcome = format!("drill:{}", component.key());
        variants::select(library, seed, MessageSlot::NextStep.key(), &outcome, offset)
            .map(CallToAction::Drill)
    };
    let track = |stat: TrackedStat| Some(CallToAction::Track(stat));

    if !facts.is_score_only() && !facts.has_attribution() {
        return match (facts.scope, facts.presence.first_missing()) {
            (NarrativeScope::Round, _) => CardPlan::new(Outcome::AddHandicap, facts.presence),
            (NarrativeScope::Overall, Some(missing)) => {
                CardPlan::new(Outcome::Tracking, facts.presence)
                    .with_cta(CallToAction::Track(missing))
            }
            (NarrativeScope::Overall, None) => CardPlan::new(Outcome::KeepPosting, facts.presence),
        };
    }

    let cta = if facts.is_score_only() {
        facts.presence.first_missing().and_then(track)
    } else if facts.residual_dominant {
        drill(SgComponent::Residual)
    } else if let Some(leak) = facts.biggest_leak {
        drill(leak)
    } else if let Some(missing) = facts.presence.first_missing() {
        track(missing)
    } else {
        let lowest = facts
            .components
            .iter()
            .copied()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(component, _)| component)
            .unwrap_or(SgComponent::Residual);
        drill(lowest)
    };

    match cta {
        Some(cta @ CallToAction::Track(_)) => {
            CardPlan::new(Outcome::Tracking, facts.presence).with_cta(cta)
        }
        Some(cta @ CallToAction::Drill(_)) => {
            CardPlan::new(Outcome::Drill, facts.presence).with_cta(cta)
        }
        None => CardPlan::new(Outcome::Tracking, facts.presence)
            .with_cta(CallToAction::Track(TrackedStat::Putts)),
    }
}

fn component_plan(
    outcome: Outcome,
    facts: &NarrativeFacts,
    component: SgComponent,
    value: f64,
) -> CardPlan {
    let evidence = component
        .stat()
        .and_then(|stat| {
            facts
                .stat_value(stat)
                .map(|count| format!(" ({} {})", format_count(count), stat.label()))
        })
        .unwrap_or_default();

    CardPlan::new(outcome, facts.presence)
        .with_component(component)
        .with_value("label", component.label())
        .with_value("signed", signed_one(value))
        .with_value("evidence", evidence)
}

/// Trailing clause for weakness cards when the residual is large too.
pub const RESIDUAL_CONTEXT: &str = ", though part of the difference sits outside the stats you track";

pub(crate) fn signed_one(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        "0.0".to_string()
    } else {
        format!("{rounded:+.1}")
    }
}

pub(crate) fn unsigned_one(value: f64) -> String {
    let rounded = (value.abs() * 10.0).round() / 10.0;
    format!("{rounded:.1}")
}

fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_values_keep_one_decimal_and_drop_negative_zero() {
        assert_eq!(signed_one(0.73), "+0.7");
        assert_eq!(signed_one(-7.27), "-7.3");
        assert_eq!(signed_one(-0.04), "0.0");
        assert_eq!(unsigned_one(-5.44), "5.4");
    }

    #[test]
    fn every_outcome_belongs_to_its_slot_prefix() {
        for outcome in Outcome::ALL {
            let plan = CardPlan::new(outcome, StatPresence::default());
            assert_eq!(plan.prefix(), outcome.slot().prefix());
            assert!(!plan.emoji().is_empty());
        }
    }

    #[test]
    fn replacing_cta_drops_stale_values() {
        let drill = &drills_for(SgComponent::Putting)[0];
        let plan = CardPlan::new(Outcome::Drill, StatPresence::default())
            .with_cta(CallToAction::Track(TrackedStat::Greens))
            .with_cta(CallToAction::Drill(drill));
        assert_eq!(plan.value("stat"), None);
        assert_eq!(plan.value("drill"), Some(drill.name));
    }
}
