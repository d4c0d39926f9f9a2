//! Deterministic insight cards.
//!
//! Facts are planned into one card per slot, a paraphrase is picked by hashing
//! `seed|slot|outcome` plus the caller's offset, and placeholders are filled
//! from the plan. The same facts, seed, and offset always produce the same
//! cards. `render_validated` runs every card through the copy guard and falls
//! back to plain copy when no paraphrase passes.

pub mod drills;
pub mod facts;
pub mod guard;
pub mod plan;
pub mod templates;
pub mod variants;

#[cfg(test)]
mod tests;

pub use drills::{drills_for, Drill};
pub use facts::{NarrativeFacts, NarrativeScope};
pub use guard::{validate, validate_card, CopyViolation};
pub use plan::{plan_slot, CallToAction, CardPlan, MessageLevel, MessageSlot, Outcome};

use crate::analytics::domain::RoundRecord;
use crate::analytics::overall::OverallInsightsSummary;
use serde::Serialize;
use templates::{template_set, TemplateSet};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarrativeError {
    #[error("no templates registered for outcome {0}")]
    MissingTemplates(&'static str),
    #[error("template for {outcome} needs placeholder {{{placeholder}}}")]
    MissingPlaceholder {
        outcome: &'static str,
        placeholder: String,
    },
    #[error("fallback copy for {slot} failed validation: {reason}")]
    FallbackRejected {
        slot: &'static str,
        #[source]
        reason: CopyViolation,
    },
}

/// One rendered card. `text` is `"{emoji} {prefix} {body}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeCard {
    pub key: &'static str,
    pub prefix: &'static str,
    pub emoji: &'static str,
    pub level: MessageLevel,
    pub outcome: Outcome,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NarrativeEngine;

impl NarrativeEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn plan(&self, facts: &NarrativeFacts, seed: &str, offset: u64) -> Vec<CardPlan> {
        facts
            .scope
            .slots()
            .iter()
            .map(|slot| plan_slot(*slot, facts, seed, offset))
            .collect()
    }

    /// Render without validation. Mostly useful to inspect raw paraphrases.
    pub fn render(
        &self,
        facts: &NarrativeFacts,
        seed: &str,
        offset: u64,
    ) -> Result<Vec<NarrativeCard>, NarrativeError> {
        self.plan(facts, seed, offset)
            .iter()
            .map(|plan| {
                let set = templates_for(plan)?;
                let template = pick(set, plan, seed, offset);
                card(plan, template)
            })
            .collect()
    }

    /// Render with the copy guard. Each slot tries successive offsets across
    /// its paraphrase list before settling on the hand-written fallback.
    pub fn render_validated(
        &self,
        facts: &NarrativeFacts,
        seed: &str,
        offset: u64,
    ) -> Result<Vec<NarrativeCard>, NarrativeError> {
        facts
            .scope
            .slots()
            .iter()
            .map(|slot| self.render_slot(*slot, facts, seed, offset))
            .collect()
    }

    pub fn summary_cards(
        &self,
        summary: &OverallInsightsSummary,
        seed: &str,
        offset: u64,
    ) -> Result<Vec<NarrativeCard>, NarrativeError> {
        self.render_validated(&NarrativeFacts::from_summary(summary), seed, offset)
    }

    pub fn round_recap(
        &self,
        round: &RoundRecord,
        seed: &str,
        offset: u64,
    ) -> Result<Vec<NarrativeCard>, NarrativeError> {
        self.render_validated(&NarrativeFacts::from_round(round), seed, offset)
    }

    fn render_slot(
        &self,
        slot: MessageSlot,
        facts: &NarrativeFacts,
        seed: &str,
        offset: u64,
    ) -> Result<NarrativeCard, NarrativeError> {
        let first = plan_slot(slot, facts, seed, offset);
        let set = templates_for(&first)?;

        for attempt in 0..set.variants.len() as u64 {
            let attempt_offset = offset.wrapping_add(attempt);
            let plan = plan_slot(slot, facts, seed, attempt_offset);
            let set = templates_for(&plan)?;
            let rendered = card(&plan, pick(set, &plan, seed, attempt_offset))
                .map_err(CopyFailure::Fill)
                .and_then(|card| {
                    validate_card(&plan, &card.text)
                        .map(|_| card)
                        .map_err(CopyFailure::Guard)
                });

            match rendered {
                Ok(card) => return Ok(card),
                Err(failure) => warn!(
                    slot = slot.key(),
                    outcome = plan.outcome.key(),
                    offset = attempt_offset,
                    reason = %failure,
                    "insight copy rejected; trying next paraphrase"
                ),
            }
        }

        let fallback = card(&first, set.fallback)?;
        validate_card(&first, &fallback.text).map_err(|reason| {
            NarrativeError::FallbackRejected {
                slot: slot.key(),
                reason,
            }
        })?;
        warn!(
            slot = slot.key(),
            outcome = first.outcome.key(),
            "using fallback insight copy"
        );
        Ok(fallback)
    }
}

enum CopyFailure {
    Fill(NarrativeError),
    Guard(CopyViolation),
}

impl std::fmt::Display for CopyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fill(err) => write!(f, "{err}"),
            Self::Guard(err) => write!(f, "{err}"),
        }
    }
}

fn templates_for(plan: &CardPlan) -> Result<&'static TemplateSet, NarrativeError> {
    template_set(plan.outcome).ok_or(NarrativeError::MissingTemplates(plan.outcome.key()))
}

fn pick(set: &'static TemplateSet, plan: &CardPlan, seed: &str, offset: u64) -> &'static str {
    variants::select(
        set.variants,
        seed,
        plan.slot.key(),
        plan.outcome.key(),
        offset,
    )
    .copied()
    .unwrap_or(set.fallback)
}

fn card(plan: &CardPlan, template: &str) -> Result<NarrativeCard, NarrativeError> {
    let body = fill(template, plan)?;
    Ok(NarrativeCard {
        key: plan.slot.key(),
        prefix: plan.prefix(),
        emoji: plan.emoji(),
        level: plan.level(),
        outcome: plan.outcome,
        text: format!("{} {} {}", plan.emoji(), plan.prefix(), body),
    })
}

/// Substitute `{name}` placeholders from the plan's values.
pub(crate) fn fill(template: &str, plan: &CardPlan) -> Result<String, NarrativeError> {
    let mut text = template.to_string();
    for (name, value) in plan.values() {
        text = text.replace(&format!("{{{name}}}"), value);
    }

    if let Some(start) = text.find('{') {
        let placeholder = text[start + 1..]
            .split('}')
            .next()
            .unwrap_or_default()
            .to_string();
        return Err(NarrativeError::MissingPlaceholder {
            outcome: plan.outcome.key(),
            placeholder,
        });
    }
    Ok(text)
}
