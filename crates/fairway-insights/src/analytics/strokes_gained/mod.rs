//! Five-part strokes-gained attribution for a single round.
//!
//! The model expects a round to score at the interpolated baseline for the
//! player's handicap, adjusted for course difficulty and scaled to the holes
//! actually played. The gap between expectation and the actual score is then
//! split into off-the-tee, approach, putting, and penalty components wherever
//! the matching stat was recorded; whatever remains is the residual. The five
//! parts always sum to the total.

mod baseline;
pub mod coefficients;
mod confidence;

pub use baseline::{BaselineTable, HandicapTierBaseline};

use super::domain::{ConfidenceTier, RoundRecord, StrokesGainedBreakdown};
use super::tee::TeeContext;
use coefficients::*;
use confidence::ConfidenceSignals;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrokesGainedError {
    #[error("handicap baseline table is empty; strokes gained cannot be computed")]
    EmptyBaselineTable,
}

/// Expected line for one round on one tee, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundExpectation {
    pub handicap: f64,
    pub played_holes: f64,
    pub rating_delta: f64,
    pub slope_delta: f64,
    pub course_difficulty: f64,
    pub score: f64,
    pub putts: f64,
    pub penalties: f64,
    pub fir_pct: f64,
    pub gir_pct: f64,
    pub fairways: f64,
    pub greens: f64,
}

/// Calculator bound to one baseline table.
#[derive(Debug, Clone, Copy)]
pub struct StrokesGainedCalculator<'a> {
    baselines: &'a BaselineTable,
}

impl<'a> StrokesGainedCalculator<'a> {
    pub fn new(baselines: &'a BaselineTable) -> Self {
        Self { baselines }
    }

    /// Expected score and stats for `handicap` on `tee`.
    pub fn expectation(
        &self,
        handicap: f64,
        tee: &TeeContext,
    ) -> Result<RoundExpectation, StrokesGainedError> {
        let baseline = self.baselines.interpolate(handicap)?;
        let played_holes = f64::from(tee.played_holes);
        let scale = played_holes / 18.0;

        let rating_delta = tee.normalized_rating() - NEUTRAL_RATING;
        let slope_delta = handicap * (tee.slope_rating / NEUTRAL_SLOPE - 1.0);
        let course_difficulty = slope_delta + rating_delta;

        let score = (baseline.score + course_difficulty) * scale;
        let putts =
            (baseline.putts + course_difficulty * PUTTS_DIFFICULTY_COEFFICIENT).max(0.0) * scale;
        let penalties = (baseline.penalties + course_difficulty * PENALTY_DIFFICULTY_COEFFICIENT)
            .max(0.0)
            * scale;
        let fir_pct = (baseline.fir_pct
            - rating_delta * FIR_RATING_SENSITIVITY
            - slope_delta * FIR_SLOPE_SENSITIVITY)
            .clamp(0.0, 100.0);
        let gir_pct = (baseline.gir_pct
            - rating_delta * GIR_RATING_SENSITIVITY
            - slope_delta * GIR_SLOPE_SENSITIVITY)
            .clamp(0.0, 100.0);

        Ok(RoundExpectation {
            handicap,
            played_holes,
            rating_delta,
            slope_delta,
            course_difficulty,
            score,
            putts,
            penalties,
            fir_pct,
            gir_pct,
            fairways: fir_pct / 100.0 * f64::from(tee.non_par3_holes),
            greens: gir_pct / 100.0 * played_holes,
        })
    }

    /// Attribute the round using its stored handicap.
    pub fn compute(
        &self,
        round: &RoundRecord,
        tee: &TeeContext,
    ) -> Result<StrokesGainedBreakdown, StrokesGainedError> {
        self.compute_with_handicap(round, tee, round.handicap_at_round)
    }

    pub fn compute_with_handicap(
        &self,
        round: &RoundRecord,
        tee: &TeeContext,
        handicap: Option<f64>,
    ) -> Result<StrokesGainedBreakdown, StrokesGainedError> {
        let handicap = match handicap.filter(|value| value.is_finite()) {
            Some(handicap) => handicap,
            None => {
                return Ok(StrokesGainedBreakdown::unavailable(
                    "Strokes gained needs a handicap index at the time of the round",
                ))
            }
        };

        if tee.played_holes < MIN_HOLES {
            return Ok(StrokesGainedBreakdown {
                confidence: Some(ConfidenceTier::Low),
                ..StrokesGainedBreakdown::unavailable(format!(
                    "Strokes gained needs at least {MIN_HOLES} holes; {} were played",
                    tee.played_holes
                ))
            });
        }

        let expected = self.expectation(handicap, tee)?;
        let scale = expected.played_holes / 18.0;
        let mut messages = Vec::new();

        let total = expected.score - f64::from(round.score);

        let off_tee = round.fairways_hit.map(|hit| {
            let possible = round
                .fairways_possible
                .map(f64::from)
                .unwrap_or_else(|| f64::from(tee.non_par3_holes));
            let expected_fairways = expected.fir_pct / 100.0 * possible;
            (f64::from(hit) - expected_fairways) * FIR_COEFFICIENT
        });

        let approach = round
            .greens_hit
            .map(|hit| (f64::from(hit) - expected.greens) * gir_coefficient(handicap));

        let putting_cap = PUTTING_CAP_PER_18 * scale;
        let putting = round.putts.map(|putts| {
            let raw = expected.putts - f64::from(putts);
            let value = compress_putting(raw, putting_cap);
            if value != raw {
                debug!(raw, value, cap = putting_cap, "putting attribution compressed");
                messages.push(format!(
                    "Putting gain of {raw:+.2} exceeded the {putting_cap:.2} stroke cap and was compressed to {value:+.2}"
                ));
            }
            value
        });

        let penalties = round
            .penalties
            .map(|count| (expected.penalties - f64::from(count)) * PENALTY_COEFFICIENT);

        let known: f64 = [off_tee, approach, putting, penalties]
            .iter()
            .flatten()
            .sum();
        let residual = total - known;

        let partial_analysis =
            off_tee.is_none() || approach.is_none() || putting.is_none() || penalties.is_none();

        let confidence = match (round.greens_hit, putting, penalties) {
            (Some(greens), Some(putting), Some(_)) => {
                let (tier, notes) = confidence::assess(&ConfidenceSignals {
                    played_holes: expected.played_holes,
                    residual,
                    putting,
                    putting_cap,
                    greens_hit: f64::from(greens),
                });
                messages.extend(notes);
                tier
            }
            _ => {
                messages.push(
                    "Greens, putts, and penalties are all needed for a confident breakdown"
                        .to_string(),
                );
                ConfidenceTier::Low
            }
        };

        Ok(finalize(
            total,
            [off_tee, approach, putting, penalties],
            confidence,
            partial_analysis,
            messages,
        ))
    }

    /// Recompute and store the attribution on `round`.
    pub fn apply(&self, round: &mut RoundRecord, tee: &TeeContext) -> Result<(), StrokesGainedError> {
        round.strokes_gained = self.compute(round, tee)?;
        Ok(())
    }
}

/// Round at the output boundary and re-derive the residual from the rounded
/// parts so the five components still sum to the rounded total.
fn finalize(
    total: f64,
    components: [Option<f64>; 4],
    confidence: ConfidenceTier,
    partial_analysis: bool,
    messages: Vec<String>,
) -> StrokesGainedBreakdown {
    let total = round2(total);
    let [off_tee, approach, putting, penalties] = components.map(|value| value.map(round2));
    let known: f64 = [off_tee, approach, putting, penalties]
        .iter()
        .flatten()
        .sum();

    StrokesGainedBreakdown {
        total: Some(total),
        off_tee,
        approach,
        putting,
        penalties,
        residual: Some(round2(total - known)),
        confidence: Some(confidence),
        partial_analysis,
        messages,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
