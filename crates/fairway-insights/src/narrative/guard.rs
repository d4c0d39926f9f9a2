//! Copy validation for rendered cards.
//!
//! The guard sees only the plan and the final string. It never needs to know
//! which template produced the text, so hand-written fallback copy is checked
//! the same way as generated copy.

use super::drills::Drill;
use super::plan::{CallToAction, CardPlan, MessageSlot};
use crate::analytics::domain::TrackedStat;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

pub const MAX_SENTENCES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CopyViolation {
    #[error("expected {expected_count} cards, found {found}")]
    CardCount { expected_count: usize, found: usize },
    #[error("card must start with emoji {expected}")]
    EmojiMismatch { expected: &'static str },
    #[error("card must carry prefix {expected}")]
    PrefixMismatch { expected: &'static str },
    #[error("emoji found inside body text")]
    EmojiInBody,
    #[error("body must address the reader as you/your")]
    MissingSecondPerson,
    #[error("third-person phrasing '{0}'")]
    ThirdPerson(String),
    #[error("raw decimal '{0}'")]
    RawDecimal(String),
    #[error("mentions {stat:?} which was not recorded ('{term}')")]
    AbsentStat { stat: TrackedStat, term: String },
    #[error("skill-area language '{0}' in a score-only card")]
    SkillLanguage(String),
    #[error("weakness language '{0}' when the opportunity is not a weakness")]
    WeaknessLanguage(String),
    #[error("inferred component needs uncertainty language")]
    MissingUncertainty,
    #[error("uncertainty language '{0}' on a measured component")]
    UnwarrantedUncertainty(String),
    #[error("tracking call to action needs a tracking verb")]
    MissingTrackingVerb,
    #[error("tracking call to action must name {0:?}")]
    MissingTrackedStat(TrackedStat),
    #[error("drill call to action needs a focus phrase")]
    MissingFocus,
    #[error("drill call to action needs an action verb")]
    MissingActionVerb,
    #[error("drill call to action does not reference the planned drill")]
    DrillMismatch,
    #[error("drill call to action needs a benefit sentence")]
    MissingBenefit,
    #[error("drill call to action needs a Goal: criterion")]
    MissingGoal,
    #[error("{0} sentences exceeds the limit")]
    TooManySentences(usize),
}

macro_rules! pattern {
    ($name:ident, $regex:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($regex).expect("guard pattern is a valid regex"));
    };
}

pattern!(
    EMOJI,
    r"[\x{1F300}-\x{1FAFF}\x{2600}-\x{27BF}\x{2B00}-\x{2BFF}\x{FE0F}]"
);
pattern!(SECOND_PERSON, r"(?i)\byou(r|rs|rself)?\b");
pattern!(
    THIRD_PERSON,
    r"(?i)\b(he|she|his|her|hers|him|they|their|them|the player|the golfer|this player|this golfer)\b"
);
pattern!(RAW_DECIMAL, r"\d+\.\d{2,}");
pattern!(
    FAIRWAY_TERMS,
    r"(?i)\b(fairways?|off the tee|tee shots?|tee balls?|driv(e|es|er|ers|ing))\b"
);
pattern!(
    GREEN_TERMS,
    r"(?i)\b(greens?|gir|approach(es)?|in regulation)\b"
);
pattern!(PUTT_TERMS, r"(?i)\b(putt(s|ing|er|ers|ed)?)\b");
pattern!(
    PENALTY_TERMS,
    r"(?i)\b(penalt(y|ies)|hazards?|out of bounds|water)\b"
);
pattern!(
    SKILL_TERMS,
    r"(?i)\b(short game|chip(s|ping|ped)?|pitch(es|ing)?|bunkers?|sand|ball[- ]striking|strokes gained|irons?|wedges?)\b"
);
pattern!(
    WEAKNESS_TERMS,
    r"(?i)\b(leak\w*|cost(s|ing)?|los(e|es|ing|t)|weak\w*|struggl\w*|hurt\w*|slipping|dropping|bleed\w*|problem\w*|trouble\w*|gave back|giving up)\b"
);
pattern!(
    UNCERTAINTY_TERMS,
    r"(?i)\b(likely|may|might|probably|perhaps|possibly|maybe|seems?|appears?)\b"
);
pattern!(
    TRACKING_VERBS,
    r"(?i)\b(track(ing)?|log(ging)?|record(ing)?|not(e|ing)|enter(ing)?|add(ing)?|count)\b"
);
pattern!(
    FOCUS_PHRASES,
    r"(?i)\b(focus|work on|spend time on|prioritize|make room for)\b"
);
pattern!(
    ACTION_VERBS,
    r"(?i)\b(hit|roll|chip|pitch|place|set|drop|play|putt|pick|choose|make|land|aim|swing|repeat)\b"
);
pattern!(
    BENEFIT_CUES,
    r"(?i)\b(helps?|builds?|sharpens?|saves?|keeps?|trains?|lets you|so you)\b"
);

fn stat_terms(stat: TrackedStat) -> &'static Regex {
    match stat {
        TrackedStat::Fairways => &FAIRWAY_TERMS,
        TrackedStat::Greens => &GREEN_TERMS,
        TrackedStat::Putts => &PUTT_TERMS,
        TrackedStat::Penalties => &PENALTY_TERMS,
    }
}

const STAT_ORDER: [TrackedStat; 4] = [
    TrackedStat::Fairways,
    TrackedStat::Greens,
    TrackedStat::Putts,
    TrackedStat::Penalties,
];

const STOPWORDS: [&str; 12] = [
    "each", "from", "into", "that", "than", "then", "this", "with", "your", "over", "after",
    "every",
];

/// Validate a full card set against its plans.
pub fn validate(plans: &[CardPlan], texts: &[&str]) -> Result<(), CopyViolation> {
    if plans.len() != texts.len() {
        return Err(CopyViolation::CardCount {
            expected_count: plans.len(),
            found: texts.len(),
        });
    }
    plans
        .iter()
        .zip(texts)
        .try_for_each(|(plan, text)| validate_card(plan, text))
}

/// Validate one rendered card of the form `"{emoji} {prefix} {body}"`.
pub fn validate_card(plan: &CardPlan, text: &str) -> Result<(), CopyViolation> {
    let body = text
        .strip_prefix(plan.emoji())
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or(CopyViolation::EmojiMismatch {
            expected: plan.emoji(),
        })?;
    let body = body
        .strip_prefix(plan.prefix())
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or(CopyViolation::PrefixMismatch {
            expected: plan.prefix(),
        })?;

    if EMOJI.is_match(body) {
        return Err(CopyViolation::EmojiInBody);
    }
    if !SECOND_PERSON.is_match(body) {
        return Err(CopyViolation::MissingSecondPerson);
    }
    if let Some(found) = THIRD_PERSON.find(body) {
        return Err(CopyViolation::ThirdPerson(found.as_str().to_string()));
    }
    if let Some(found) = RAW_DECIMAL.find(body) {
        return Err(CopyViolation::RawDecimal(found.as_str().to_string()));
    }

    let tracked = match plan.cta {
        Some(CallToAction::Track(stat)) if plan.slot == MessageSlot::NextStep => Some(stat),
        _ => None,
    };

    for stat in STAT_ORDER {
        if plan.presence.has(stat) || tracked == Some(stat) {
            continue;
        }
        if let Some(found) = stat_terms(stat).find(body) {
            return Err(CopyViolation::AbsentStat {
                stat,
                term: found.as_str().to_string(),
            });
        }
    }

    if plan.score_only {
        if let Some(found) = SKILL_TERMS.find(body) {
            return Err(CopyViolation::SkillLanguage(found.as_str().to_string()));
        }
    }

    if plan.slot == MessageSlot::Opportunity {
        check_opportunity(plan, body)?;
    }

    match plan.cta {
        Some(CallToAction::Track(stat)) => check_tracking(stat, body)?,
        Some(CallToAction::Drill(drill)) => check_drill(drill, body)?,
        None => {}
    }

    let count = sentences(body).len();
    if count > MAX_SENTENCES {
        return Err(CopyViolation::TooManySentences(count));
    }

    Ok(())
}

fn check_opportunity(plan: &CardPlan, body: &str) -> Result<(), CopyViolation> {
    if !plan.opportunity_is_weak {
        if let Some(found) = WEAKNESS_TERMS.find(body) {
            return Err(CopyViolation::WeaknessLanguage(found.as_str().to_string()));
        }
    }

    match (plan.component_inferred, UNCERTAINTY_TERMS.find(body)) {
        (true, None) => Err(CopyViolation::MissingUncertainty),
        (false, Some(found)) => Err(CopyViolation::UnwarrantedUncertainty(
            found.as_str().to_string(),
        )),
        _ => Ok(()),
    }
}

fn check_tracking(stat: TrackedStat, body: &str) -> Result<(), CopyViolation> {
    if !TRACKING_VERBS.is_match(body) {
        return Err(CopyViolation::MissingTrackingVerb);
    }
    if !body.to_lowercase().contains(stat.label()) {
        return Err(CopyViolation::MissingTrackedStat(stat));
    }
    Ok(())
}

fn check_drill(drill: &Drill, body: &str) -> Result<(), CopyViolation> {
    if !FOCUS_PHRASES.is_match(body) {
        return Err(CopyViolation::MissingFocus);
    }
    if !ACTION_VERBS.is_match(body) {
        return Err(CopyViolation::MissingActionVerb);
    }

    let drill_words = significant_words(&format!("{} {}", drill.name, drill.instruction));
    let body_words = significant_words(body);
    let shared = drill_words.intersection(&body_words).count();
    if shared < drill_words.len().min(3) {
        return Err(CopyViolation::DrillMismatch);
    }

    let parts = sentences(body);
    match parts.get(1) {
        Some(second) if BENEFIT_CUES.is_match(second) => {}
        _ => return Err(CopyViolation::MissingBenefit),
    }

    if !body.contains("Goal:") {
        return Err(CopyViolation::MissingGoal);
    }
    Ok(())
}

fn significant_words(text: &str) -> BTreeSet<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| word.len() >= 4)
        .map(str::to_lowercase)
        .filter(|word| !STOPWORDS.contains(&word.as_str()))
        .collect()
}

/// Split on `.`, `!` or `?` followed by whitespace or end of text, so
/// decimals such as `7.5` stay inside their sentence.
pub(crate) fn sentences(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = body.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let at_boundary = match chars.peek() {
            Some((_, next)) => next.is_whitespace(),
            None => true,
        };
        if at_boundary {
            let end = idx + ch.len_utf8();
            let sentence = body[start..end].trim();
            if !sentence.is_empty() {
                parts.push(sentence);
            }
            start = end;
        }
    }

    let tail = body[start..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}
