use super::ImportError;
use crate::analytics::domain::{RoundId, RoundRecord, StrokesGainedBreakdown};
use crate::analytics::strokes_gained::HandicapTierBaseline;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;

pub(crate) fn parse_rounds<R: Read>(reader: R) -> Result<Vec<RoundRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rounds = Vec::new();

    for (index, record) in csv_reader.deserialize::<RoundRow>().enumerate() {
        let row = record?;
        // header is line 1
        rounds.push(row.into_record(index + 2)?);
    }

    Ok(rounds)
}

pub(crate) fn parse_baselines<R: Read>(reader: R) -> Result<Vec<HandicapTierBaseline>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<HandicapTierBaseline>() {
        rows.push(record?);
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RoundRow {
    id: String,
    played_on: String,
    hole_count: u8,
    score: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    to_par: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    fairways_hit: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    fairways_possible: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    greens_hit: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    putts: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    penalties: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    course_rating: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    slope_rating: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    par: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    non_par3_holes: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    handicap: Option<String>,
}

impl RoundRow {
    fn into_record(self, line: usize) -> Result<RoundRecord, ImportError> {
        let played_on = parse_date(&self.played_on).ok_or_else(|| ImportError::InvalidRow {
            line,
            message: format!("played_on '{}' is not a date", self.played_on),
        })?;
        if self.hole_count == 0 || self.hole_count > 18 {
            return Err(ImportError::InvalidRow {
                line,
                message: format!("hole_count {} is outside 1..=18", self.hole_count),
            });
        }

        Ok(RoundRecord {
            id: RoundId(self.id),
            played_on,
            hole_count: self.hole_count,
            non_par3_holes: field(line, "non_par3_holes", self.non_par3_holes)?,
            score: self.score,
            to_par: field(line, "to_par", self.to_par)?,
            fairways_hit: field(line, "fairways_hit", self.fairways_hit)?,
            fairways_possible: field(line, "fairways_possible", self.fairways_possible)?,
            greens_hit: field(line, "greens_hit", self.greens_hit)?,
            putts: field(line, "putts", self.putts)?,
            penalties: field(line, "penalties", self.penalties)?,
            course_rating: finite_field(line, "course_rating", self.course_rating)?,
            slope_rating: finite_field(line, "slope_rating", self.slope_rating)?,
            par: field(line, "par", self.par)?,
            handicap_at_round: finite_field(line, "handicap", self.handicap)?,
            strokes_gained: StrokesGainedBreakdown::default(),
        })
    }
}

fn field<T: FromStr>(line: usize, name: &str, raw: Option<String>) -> Result<Option<T>, ImportError> {
    raw.map(|value| {
        value.parse::<T>().map_err(|_| ImportError::InvalidRow {
            line,
            message: format!("{name} '{value}' is not a valid number"),
        })
    })
    .transpose()
}

fn finite_field(line: usize, name: &str, raw: Option<String>) -> Result<Option<f64>, ImportError> {
    match field::<f64>(line, name, raw)? {
        Some(value) if !value.is_finite() => Err(ImportError::InvalidRow {
            line,
            message: format!("{name} must be a finite number"),
        }),
        other => Ok(other),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}
