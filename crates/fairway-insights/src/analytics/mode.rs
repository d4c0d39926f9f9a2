//! Scoring-mode normalization.
//!
//! `Nine` and `Eighteen` filter the history down to rounds of that length.
//! `Combined` keeps eighteen-hole rounds as-is and doubles every additive
//! counting field of nine-hole rounds so both populate one 18-hole scale.

use super::domain::{RoundRecord, ScoringMode, SgComponent};

/// Return the rounds that belong to `mode`, preserving input order.
pub fn normalize_rounds(rounds: &[RoundRecord], mode: ScoringMode) -> Vec<RoundRecord> {
    match mode {
        ScoringMode::Nine => filter_holes(rounds, 9),
        ScoringMode::Eighteen => filter_holes(rounds, 18),
        ScoringMode::Combined => rounds
            .iter()
            .filter(|round| round.hole_count == 9 || round.hole_count == 18)
            .map(|round| {
                if round.is_nine_hole() {
                    double_nine_hole(round)
                } else {
                    round.clone()
                }
            })
            .collect(),
    }
}

fn filter_holes(rounds: &[RoundRecord], holes: u8) -> Vec<RoundRecord> {
    rounds
        .iter()
        .filter(|round| round.hole_count == holes)
        .cloned()
        .collect()
}

/// Scale a nine-hole round to its 18-hole equivalent.
///
/// Slope and handicap are per-course and per-player values, not per-hole
/// counts, so they are left untouched along with identity and date.
pub fn double_nine_hole(round: &RoundRecord) -> RoundRecord {
    let mut doubled = round.clone();
    doubled.hole_count = round.hole_count.saturating_mul(2);
    doubled.non_par3_holes = round.non_par3_holes.map(|holes| holes.saturating_mul(2));
    doubled.score = round.score.saturating_mul(2);
    doubled.to_par = round.to_par.map(|value| value.saturating_mul(2));
    doubled.fairways_hit = double(round.fairways_hit);
    doubled.fairways_possible = double(round.fairways_possible);
    doubled.greens_hit = double(round.greens_hit);
    doubled.putts = double(round.putts);
    doubled.penalties = double(round.penalties);
    doubled.course_rating = round.course_rating.map(|rating| rating * 2.0);
    doubled.par = double(round.par);

    doubled.strokes_gained.total = round.strokes_gained.total.map(|value| value * 2.0);
    for component in SgComponent::ordered() {
        *doubled.strokes_gained.component_mut(component) =
            round.strokes_gained.component(component).map(|value| value * 2.0);
    }

    doubled
}

fn double(value: Option<u32>) -> Option<u32> {
    value.map(|count| count.saturating_mul(2))
}
