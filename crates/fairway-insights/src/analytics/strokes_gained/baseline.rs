//! Handicap-tier baselines and linear interpolation between them.
//!
//! Each row is the expected 18-hole line for a player of that handicap on a
//! neutral course (rating 72, slope 113). Targets between two anchors are
//! linearly interpolated per quantity; targets outside the table clamp to the
//! nearest anchor.

use super::StrokesGainedError;
use serde::{Deserialize, Serialize};

/// Reference row anchored at one handicap value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandicapTierBaseline {
    pub handicap: f64,
    pub score: f64,
    pub fir_pct: f64,
    pub gir_pct: f64,
    pub putts: f64,
    pub penalties: f64,
}

impl HandicapTierBaseline {
    fn is_finite(&self) -> bool {
        [
            self.handicap,
            self.score,
            self.fir_pct,
            self.gir_pct,
            self.putts,
            self.penalties,
        ]
        .iter()
        .all(|value| value.is_finite())
    }

    fn lerp(&self, upper: &Self, handicap: f64) -> Self {
        let span = upper.handicap - self.handicap;
        let frac = if span > 0.0 {
            (handicap - self.handicap) / span
        } else {
            0.0
        };
        let mix = |low: f64, high: f64| low + frac * (high - low);

        Self {
            handicap,
            score: mix(self.score, upper.score),
            fir_pct: mix(self.fir_pct, upper.fir_pct),
            gir_pct: mix(self.gir_pct, upper.gir_pct),
            putts: mix(self.putts, upper.putts),
            penalties: mix(self.penalties, upper.penalties),
        }
    }
}

/// Ascending table of baselines, passed explicitly to every computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineTable {
    rows: Vec<HandicapTierBaseline>,
}

impl BaselineTable {
    /// Build a table from rows in any order; rows with non-finite values are dropped.
    pub fn from_rows(rows: impl IntoIterator<Item = HandicapTierBaseline>) -> Self {
        let mut rows: Vec<HandicapTierBaseline> =
            rows.into_iter().filter(HandicapTierBaseline::is_finite).collect();
        rows.sort_by(|a, b| a.handicap.total_cmp(&b.handicap));
        rows.dedup_by(|a, b| a.handicap == b.handicap);
        Self { rows }
    }

    /// Default anchors covering the legal handicap range.
    pub fn standard() -> Self {
        const ROWS: [(f64, f64, f64, f64, f64, f64); 7] = [
            (-8.0, 64.0, 70.0, 78.0, 28.5, 0.2),
            (0.0, 73.0, 60.0, 60.0, 31.0, 0.6),
            (6.0, 80.0, 50.0, 40.0, 33.5, 1.4),
            (10.0, 84.6, 45.0, 30.0, 35.0, 2.0),
            (18.0, 93.5, 36.0, 18.0, 37.0, 3.2),
            (30.0, 106.0, 26.0, 8.0, 39.5, 5.0),
            (54.0, 130.0, 15.0, 2.0, 43.0, 8.5),
        ];

        Self::from_rows(ROWS.iter().map(
            |&(handicap, score, fir_pct, gir_pct, putts, penalties)| HandicapTierBaseline {
                handicap,
                score,
                fir_pct,
                gir_pct,
                putts,
                penalties,
            },
        ))
    }

    pub fn rows(&self) -> &[HandicapTierBaseline] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Expected 18-hole line at `handicap`.
    pub fn interpolate(&self, handicap: f64) -> Result<HandicapTierBaseline, StrokesGainedError> {
        let (first, last) = match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(StrokesGainedError::EmptyBaselineTable),
        };

        if !handicap.is_finite() || handicap <= first.handicap {
            return Ok(HandicapTierBaseline { handicap, ..*first });
        }
        if handicap >= last.handicap {
            return Ok(HandicapTierBaseline { handicap, ..*last });
        }

        for pair in self.rows.windows(2) {
            if handicap <= pair[1].handicap {
                return Ok(pair[0].lerp(&pair[1], handicap));
            }
        }

        Ok(HandicapTierBaseline { handicap, ..*last })
    }
}
