use chrono::NaiveDate;

use crate::analytics::domain::{
    ConfidenceTier, RoundId, RoundRecord, SgComponent, StatPresence, StrokesGainedBreakdown,
};
use crate::analytics::overall::{RecentStatAverages, Trajectory};
use crate::narrative::facts::{NarrativeFacts, NarrativeScope};
use crate::narrative::plan::{plan_slot, CardPlan, Outcome};

pub(super) const SEED: &str = "player-7f3a";

pub(super) fn full_presence() -> StatPresence {
    StatPresence {
        fairways: true,
        greens: true,
        putts: true,
        penalties: true,
    }
}

pub(super) fn score_only_presence() -> StatPresence {
    StatPresence::default()
}

/// Fairways and penalties recorded; greens and putts never entered.
pub(super) fn partial_presence() -> StatPresence {
    StatPresence {
        fairways: true,
        greens: false,
        putts: false,
        penalties: true,
    }
}

fn stats_for(presence: StatPresence) -> RecentStatAverages {
    RecentStatAverages {
        fairways_hit: presence.fairways.then_some(6.8),
        greens_hit: presence.greens.then_some(7.0),
        putts: presence.putts.then_some(33.4),
        penalties: presence.penalties.then_some(1.0),
    }
}

fn components_for(
    presence: StatPresence,
    values: [(SgComponent, f64); 4],
) -> Vec<(SgComponent, f64)> {
    values
        .into_iter()
        .filter(|(component, _)| presence.covers(*component))
        .collect()
}

/// Steady overall facts: stable scoring, no leak, small residual.
pub(super) fn overall_facts(presence: StatPresence) -> NarrativeFacts {
    NarrativeFacts {
        scope: NarrativeScope::Overall,
        presence,
        trajectory: Some(Trajectory::Stable),
        score_delta: Some(0.4),
        score_slope: Some(-0.1),
        recent_average: Some(84.2),
        strokes_gained_total: None,
        components: components_for(
            presence,
            [
                (SgComponent::Approach, 0.3),
                (SgComponent::OffTee, 0.05),
                (SgComponent::Putting, -0.05),
                (SgComponent::Penalties, 0.0),
            ],
        ),
        residual: Some(-0.2),
        biggest_leak: None,
        residual_dominant: false,
        stats: stats_for(presence),
    }
}

pub(super) fn round_facts(presence: StatPresence, total: Option<f64>) -> NarrativeFacts {
    NarrativeFacts {
        scope: NarrativeScope::Round,
        strokes_gained_total: total,
        trajectory: None,
        score_delta: None,
        score_slope: None,
        recent_average: None,
        ..overall_facts(presence)
    }
}

pub(super) fn with_leak(mut facts: NarrativeFacts, leak: SgComponent, value: f64) -> NarrativeFacts {
    if let Some(entry) = facts
        .components
        .iter_mut()
        .find(|(component, _)| *component == leak)
    {
        entry.1 = value;
    }
    facts.biggest_leak = Some(leak);
    facts
}

/// Stats were recorded but nothing is attributed: too few rounds for an
/// overall comparison, or a round posted without a handicap.
pub(super) fn without_attribution(mut facts: NarrativeFacts) -> NarrativeFacts {
    facts.components.clear();
    facts.residual = None;
    facts.biggest_leak = None;
    facts.residual_dominant = false;
    facts
}

pub(super) fn residual_dominant(mut facts: NarrativeFacts, residual: f64) -> NarrativeFacts {
    facts.residual = Some(residual);
    facts.residual_dominant = true;
    facts
}

/// Facts that drive each outcome, several per outcome where presence or
/// residual context changes the copy.
pub(super) fn scenarios() -> Vec<(Outcome, NarrativeFacts)> {
    let mut improving = overall_facts(full_presence());
    improving.trajectory = Some(Trajectory::Improving);
    improving.score_delta = Some(-2.6);
    improving.recent_average = Some(82.4);

    let mut worsening = overall_facts(partial_presence());
    worsening.trajectory = Some(Trajectory::Worsening);
    worsening.score_delta = Some(3.1);

    let mut improving_lately = overall_facts(full_presence());
    improving_lately.trajectory = Some(Trajectory::Improving);
    improving_lately.score_delta = Some(0.5);
    improving_lately.score_slope = Some(-1.0);

    let mut worsening_lately = overall_facts(partial_presence());
    worsening_lately.trajectory = Some(Trajectory::Worsening);
    worsening_lately.score_delta = Some(-0.3);
    worsening_lately.score_slope = Some(0.62);

    let mut insufficient = overall_facts(score_only_presence());
    insufficient.trajectory = None;
    insufficient.score_delta = None;
    insufficient.recent_average = None;

    let mut best_neutral = overall_facts(full_presence());
    best_neutral.components = vec![
        (SgComponent::Approach, 0.05),
        (SgComponent::OffTee, -0.02),
        (SgComponent::Putting, -0.08),
        (SgComponent::Penalties, 0.0),
    ];

    let mut best_negative = overall_facts(partial_presence());
    best_negative.components = vec![
        (SgComponent::OffTee, -0.4),
        (SgComponent::Penalties, -0.9),
    ];

    let mut partial_strength = overall_facts(partial_presence());
    partial_strength.components = vec![
        (SgComponent::OffTee, 0.6),
        (SgComponent::Penalties, 0.2),
    ];

    let mut weakness_with_context =
        with_leak(overall_facts(full_presence()), SgComponent::Putting, -1.2);
    weakness_with_context.residual = Some(-0.8);

    vec![
        (Outcome::TrendImproving, improving),
        (Outcome::TrendStable, overall_facts(full_presence())),
        (Outcome::TrendWorsening, worsening),
        (Outcome::TrendImprovingLately, improving_lately),
        (Outcome::TrendWorseningLately, worsening_lately),
        (Outcome::TrendInsufficient, insufficient),
        (Outcome::RoundBetter, round_facts(full_presence(), Some(2.3))),
        (
            Outcome::RoundAsExpected,
            round_facts(partial_presence(), Some(-0.4)),
        ),
        (Outcome::RoundWorse, round_facts(full_presence(), Some(-5.4))),
        (
            Outcome::RoundUnavailable,
            round_facts(score_only_presence(), None),
        ),
        (Outcome::BestPositive, overall_facts(full_presence())),
        (Outcome::BestPositive, partial_strength),
        (Outcome::BestNeutral, best_neutral),
        (Outcome::BestNegative, best_negative),
        (
            Outcome::StrengthUnavailable,
            overall_facts(score_only_presence()),
        ),
        (Outcome::Weakness, weakness_with_context),
        (
            Outcome::Weakness,
            with_leak(overall_facts(partial_presence()), SgComponent::OffTee, -0.7),
        ),
        (
            Outcome::Weakness,
            with_leak(
                round_facts(full_presence(), Some(-2.0)),
                SgComponent::Approach,
                -1.6,
            ),
        ),
        (
            Outcome::ResidualDominant,
            residual_dominant(overall_facts(full_presence()), -3.4),
        ),
        (
            Outcome::ResidualDominant,
            residual_dominant(round_facts(partial_presence(), Some(-4.0)), -4.1),
        ),
        (Outcome::OpportunityNeutral, overall_facts(full_presence())),
        (Outcome::OpportunityNeutral, overall_facts(partial_presence())),
        (
            Outcome::OpportunityPending,
            without_attribution(overall_facts(full_presence())),
        ),
        (
            Outcome::OpportunityPending,
            without_attribution(round_facts(partial_presence(), None)),
        ),
        (Outcome::ScoreOnly, overall_facts(score_only_presence())),
        (
            Outcome::Drill,
            with_leak(overall_facts(full_presence()), SgComponent::Penalties, -0.6),
        ),
        (
            Outcome::Drill,
            with_leak(overall_facts(partial_presence()), SgComponent::OffTee, -0.9),
        ),
        (
            Outcome::Drill,
            residual_dominant(overall_facts(partial_presence()), -2.2),
        ),
        (Outcome::Drill, overall_facts(full_presence())),
        (Outcome::Tracking, overall_facts(partial_presence())),
        (Outcome::Tracking, overall_facts(score_only_presence())),
        (
            Outcome::Tracking,
            without_attribution(overall_facts(partial_presence())),
        ),
        (
            Outcome::AddHandicap,
            without_attribution(round_facts(full_presence(), None)),
        ),
        (
            Outcome::AddHandicap,
            without_attribution(round_facts(partial_presence(), None)),
        ),
        (
            Outcome::KeepPosting,
            without_attribution(overall_facts(full_presence())),
        ),
    ]
}

/// Plan of the slot in `facts` whose outcome is `outcome`.
pub(super) fn plan_for(outcome: Outcome, facts: &NarrativeFacts, offset: u64) -> Option<CardPlan> {
    facts
        .scope
        .slots()
        .iter()
        .map(|slot| plan_slot(*slot, facts, SEED, offset))
        .find(|plan| plan.outcome == outcome)
}

pub(super) fn scenario_round() -> RoundRecord {
    RoundRecord {
        id: RoundId("r-2025-06-14".to_string()),
        played_on: NaiveDate::from_ymd_opt(2025, 6, 14).expect("valid date"),
        hole_count: 18,
        non_par3_holes: Some(14),
        score: 90,
        to_par: Some(18),
        fairways_hit: Some(7),
        fairways_possible: Some(14),
        greens_hit: Some(8),
        putts: Some(34),
        penalties: Some(2),
        course_rating: Some(72.0),
        slope_rating: Some(113.0),
        par: Some(72),
        handicap_at_round: Some(10.0),
        strokes_gained: StrokesGainedBreakdown {
            total: Some(-5.4),
            off_tee: Some(0.14),
            approach: Some(0.73),
            putting: Some(1.0),
            penalties: Some(0.0),
            residual: Some(-7.27),
            confidence: Some(ConfidenceTier::Low),
            partial_analysis: false,
            messages: Vec::new(),
        },
    }
}

pub(super) fn compose(plan: &CardPlan, body: &str) -> String {
    format!("{} {} {}", plan.emoji(), plan.prefix(), body)
}
