//! Differential-based handicap index.

use super::domain::{chronological, RoundRecord};
use serde::{Deserialize, Serialize};

pub const NEUTRAL_SLOPE: f64 = 113.0;
pub const DEFAULT_PAR: f64 = 72.0;
pub const MAX_HANDICAP_INDEX: f64 = 54.0;
pub const MIN_ROUNDS: usize = 3;
pub const RECENT_WINDOW: usize = 20;
pub const BEST_OF_RECENT: usize = 8;

/// Scoring inputs for one differential.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandicapRound {
    pub score: f64,
    #[serde(default)]
    pub course_rating: Option<f64>,
    #[serde(default)]
    pub slope_rating: Option<f64>,
    #[serde(default)]
    pub par: Option<f64>,
}

impl HandicapRound {
    pub fn differential(&self) -> f64 {
        let slope = self
            .slope_rating
            .filter(|slope| slope.is_finite() && *slope > 0.0)
            .unwrap_or(NEUTRAL_SLOPE);
        let rating = self
            .course_rating
            .filter(|rating| rating.is_finite())
            .or_else(|| self.par.filter(|par| par.is_finite()))
            .unwrap_or(DEFAULT_PAR);

        ((self.score - rating) * NEUTRAL_SLOPE) / slope
    }
}

impl From<&RoundRecord> for HandicapRound {
    fn from(round: &RoundRecord) -> Self {
        Self {
            score: round.score as f64,
            course_rating: round.course_rating,
            slope_rating: round.slope_rating,
            par: round.par.map(f64::from),
        }
    }
}

/// Number of lowest differentials counted and the adjustment applied, for
/// histories shorter than the full window.
pub const fn lowest_count_and_adjustment(rounds: usize) -> Option<(usize, f64)> {
    match rounds {
        0..=2 => None,
        3 => Some((1, -2.0)),
        4 => Some((1, -1.0)),
        5 => Some((1, 0.0)),
        6 => Some((2, -1.0)),
        7..=8 => Some((2, 0.0)),
        9..=11 => Some((3, 0.0)),
        12..=14 => Some((4, 0.0)),
        15..=16 => Some((5, 0.0)),
        17..=18 => Some((6, 0.0)),
        19 => Some((7, 0.0)),
        _ => Some((BEST_OF_RECENT, 0.0)),
    }
}

/// Compute the index from rounds ordered oldest first.
///
/// Returns `None` below three rounds. Histories of twenty or more rounds only
/// consider the last twenty entries of the slice.
pub fn calculate_handicap(rounds: &[HandicapRound]) -> Option<f64> {
    let window = if rounds.len() > RECENT_WINDOW {
        &rounds[rounds.len() - RECENT_WINDOW..]
    } else {
        rounds
    };

    let (count, adjustment) = lowest_count_and_adjustment(window.len())?;

    let mut differentials: Vec<f64> = window
        .iter()
        .map(HandicapRound::differential)
        .filter(|value| value.is_finite())
        .collect();
    if differentials.len() < MIN_ROUNDS {
        return None;
    }
    differentials.sort_by(f64::total_cmp);

    let lowest = &differentials[..count.min(differentials.len())];
    let average = lowest.iter().sum::<f64>() / lowest.len() as f64;
    let index = round_one_decimal(average + adjustment);

    Some(index.min(MAX_HANDICAP_INDEX))
}

/// Compute the index for stored rounds in any order.
pub fn handicap_for_records(rounds: &[RoundRecord]) -> Option<f64> {
    let inputs: Vec<HandicapRound> = chronological(rounds)
        .into_iter()
        .map(HandicapRound::from)
        .collect();
    calculate_handicap(&inputs)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral(score: f64) -> HandicapRound {
        HandicapRound {
            score,
            course_rating: Some(72.0),
            slope_rating: Some(113.0),
            par: Some(72.0),
        }
    }

    #[test]
    fn differential_uses_slope_and_rating() {
        let round = HandicapRound {
            score: 95.0,
            course_rating: Some(71.2),
            slope_rating: Some(131.0),
            par: Some(72.0),
        };
        let expected = (95.0 - 71.2) * 113.0 / 131.0;
        assert!((round.differential() - expected).abs() < 1e-9);
    }

    #[test]
    fn missing_rating_falls_back_to_par_then_default() {
        let by_par = HandicapRound {
            score: 40.0,
            course_rating: None,
            slope_rating: None,
            par: Some(36.0),
        };
        assert!((by_par.differential() - 4.0).abs() < 1e-9);

        let by_default = HandicapRound {
            score: 80.0,
            course_rating: None,
            slope_rating: None,
            par: None,
        };
        assert!((by_default.differential() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn fewer_than_three_rounds_has_no_index() {
        assert_eq!(calculate_handicap(&[]), None);
        assert_eq!(calculate_handicap(&[neutral(80.0), neutral(82.0)]), None);
    }

    #[test]
    fn three_rounds_take_lowest_minus_two() {
        let rounds = [neutral(85.0), neutral(80.0), neutral(90.0)];
        assert_eq!(calculate_handicap(&rounds), Some(6.0));
    }

    #[test]
    fn index_is_capped_but_not_floored() {
        let high: Vec<HandicapRound> = (0..5).map(|_| neutral(160.0)).collect();
        assert_eq!(calculate_handicap(&high), Some(MAX_HANDICAP_INDEX));

        let low: Vec<HandicapRound> = (0..5).map(|_| neutral(66.0)).collect();
        assert_eq!(calculate_handicap(&low), Some(-6.0));
    }
}
