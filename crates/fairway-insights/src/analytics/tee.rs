//! Resolution of the playing context a round was scored against.

use super::domain::RoundRecord;
use serde::{Deserialize, Serialize};

/// Single hole on a tee set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleInfo {
    pub number: u8,
    pub par: u8,
}

impl HoleInfo {
    pub fn is_par_three(&self) -> bool {
        self.par == 3
    }
}

/// Published tee data. `course_rating` applies to all holes in `holes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeeSet {
    pub course_rating: f64,
    pub slope_rating: f64,
    #[serde(default)]
    pub front_nine_rating: Option<f64>,
    #[serde(default)]
    pub back_nine_rating: Option<f64>,
    pub holes: Vec<HoleInfo>,
}

/// Which part of the tee set was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundSegment {
    Full,
    FrontNine,
    BackNine,
    NineTwice,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TeeContextError {
    #[error("tee set has no holes")]
    NoHoles,
    #[error("{segment:?} requires an 18-hole tee set, found {holes} holes")]
    RequiresEighteen { segment: RoundSegment, holes: usize },
    #[error("nine played twice requires a 9-hole tee set, found {holes} holes")]
    RequiresNine { holes: usize },
}

/// Resolved context the strokes-gained model runs against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeeContext {
    pub played_holes: u8,
    pub course_rating: f64,
    /// Holes the rating covers; used to scale it to an 18-hole equivalent.
    pub rating_holes: u8,
    pub slope_rating: f64,
    pub par_total: u32,
    pub non_par3_holes: u8,
    pub holes: Vec<HoleInfo>,
}

impl TeeContext {
    pub fn resolve(tee: &TeeSet, segment: RoundSegment) -> Result<Self, TeeContextError> {
        if tee.holes.is_empty() {
            return Err(TeeContextError::NoHoles);
        }

        let (holes, rating): (Vec<HoleInfo>, f64) = match segment {
            RoundSegment::Full => (tee.holes.clone(), tee.course_rating),
            RoundSegment::FrontNine => {
                require_eighteen(tee, segment)?;
                let rating = tee
                    .front_nine_rating
                    .unwrap_or(tee.course_rating / 2.0);
                (tee.holes[..9].to_vec(), rating)
            }
            RoundSegment::BackNine => {
                require_eighteen(tee, segment)?;
                let rating = tee.back_nine_rating.unwrap_or(tee.course_rating / 2.0);
                (tee.holes[9..18].to_vec(), rating)
            }
            RoundSegment::NineTwice => {
                if tee.holes.len() != 9 {
                    return Err(TeeContextError::RequiresNine {
                        holes: tee.holes.len(),
                    });
                }
                let mut holes = tee.holes.clone();
                holes.extend(tee.holes.iter().copied());
                (holes, tee.course_rating * 2.0)
            }
        };

        let played_holes = holes.len().min(u8::MAX as usize) as u8;
        let non_par3_holes = holes.iter().filter(|hole| !hole.is_par_three()).count() as u8;
        let par_total = holes.iter().map(|hole| u32::from(hole.par)).sum();

        Ok(Self {
            played_holes,
            course_rating: rating,
            rating_holes: played_holes,
            slope_rating: tee.slope_rating,
            par_total,
            non_par3_holes,
            holes,
        })
    }

    /// Build a context from the totals carried on a stored round.
    ///
    /// Missing rating falls back to par, then to a neutral 72 per 18 holes;
    /// missing slope is neutral; missing non-par-3 count assumes four par 3s
    /// per 18 holes.
    pub fn from_round(round: &RoundRecord) -> Self {
        let played_holes = round.hole_count;
        let scale = f64::from(played_holes) / 18.0;
        let par_total = round
            .par
            .unwrap_or_else(|| (72.0 * scale).round() as u32);
        let course_rating = round
            .course_rating
            .filter(|rating| rating.is_finite() && *rating > 0.0)
            .unwrap_or(par_total as f64);
        let slope_rating = round
            .slope_rating
            .filter(|slope| slope.is_finite() && *slope > 0.0)
            .unwrap_or(113.0);
        let non_par3_holes = round
            .non_par3_holes
            .unwrap_or_else(|| played_holes.saturating_sub((4.0 * scale).round() as u8));

        Self {
            played_holes,
            course_rating,
            rating_holes: played_holes,
            slope_rating,
            par_total,
            non_par3_holes,
            holes: Vec::new(),
        }
    }

    /// Course rating expressed over 18 holes.
    pub fn normalized_rating(&self) -> f64 {
        if self.rating_holes == 0 {
            return self.course_rating;
        }
        self.course_rating * 18.0 / f64::from(self.rating_holes)
    }
}

fn require_eighteen(tee: &TeeSet, segment: RoundSegment) -> Result<(), TeeContextError> {
    if tee.holes.len() < 18 {
        return Err(TeeContextError::RequiresEighteen {
            segment,
            holes: tee.holes.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eighteen_hole_tee() -> TeeSet {
        let pars = [4, 5, 3, 4, 4, 3, 4, 5, 4, 4, 3, 5, 4, 4, 3, 4, 5, 4];
        TeeSet {
            course_rating: 71.4,
            slope_rating: 128.0,
            front_nine_rating: Some(35.9),
            back_nine_rating: None,
            holes: pars
                .iter()
                .enumerate()
                .map(|(idx, par)| HoleInfo {
                    number: idx as u8 + 1,
                    par: *par,
                })
                .collect(),
        }
    }

    #[test]
    fn full_round_counts_non_par_threes() {
        let context = TeeContext::resolve(&eighteen_hole_tee(), RoundSegment::Full)
            .expect("full round resolves");
        assert_eq!(context.played_holes, 18);
        assert_eq!(context.non_par3_holes, 14);
        assert_eq!(context.par_total, 72);
        assert!((context.normalized_rating() - 71.4).abs() < 1e-9);
    }

    #[test]
    fn front_nine_uses_published_rating_and_back_nine_halves() {
        let tee = eighteen_hole_tee();
        let front = TeeContext::resolve(&tee, RoundSegment::FrontNine).expect("front nine");
        assert_eq!(front.played_holes, 9);
        assert_eq!(front.holes.first().map(|hole| hole.number), Some(1));
        assert!((front.normalized_rating() - 71.8).abs() < 1e-9);

        let back = TeeContext::resolve(&tee, RoundSegment::BackNine).expect("back nine");
        assert_eq!(back.holes.first().map(|hole| hole.number), Some(10));
        assert!((back.course_rating - 35.7).abs() < 1e-9);
    }

    #[test]
    fn nine_played_twice_repeats_holes() {
        let mut tee = eighteen_hole_tee();
        tee.holes.truncate(9);
        tee.course_rating = 35.5;

        let context = TeeContext::resolve(&tee, RoundSegment::NineTwice).expect("twice");
        assert_eq!(context.played_holes, 18);
        assert_eq!(context.holes[9].number, 1);
        assert!((context.normalized_rating() - 71.0).abs() < 1e-9);

        let err = TeeContext::resolve(&tee, RoundSegment::BackNine).unwrap_err();
        assert_eq!(
            err,
            TeeContextError::RequiresEighteen {
                segment: RoundSegment::BackNine,
                holes: 9
            }
        );
    }
}
