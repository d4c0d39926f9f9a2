//! CSV importers for round history exports and baseline tables.

mod parser;

use super::domain::RoundRecord;
use super::strokes_gained::BaselineTable;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read import file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {message}")]
    InvalidRow { line: usize, message: String },
}

/// Reads `id,played_on,hole_count,score,...` round exports. Empty cells are
/// treated as untracked stats.
pub struct RoundHistoryImporter;

impl RoundHistoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RoundRecord>, ImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RoundRecord>, ImportError> {
        parser::parse_rounds(reader)
    }
}

/// Reads `handicap,score,fir_pct,gir_pct,putts,penalties` baseline tables.
pub struct BaselineImporter;

impl BaselineImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<BaselineTable, ImportError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = table.rows().len(),
            "loaded handicap baseline table"
        );
        Ok(table)
    }

    /// An empty file yields an empty table; the error surfaces only once
    /// strokes gained is requested against it.
    pub fn from_reader<R: Read>(reader: R) -> Result<BaselineTable, ImportError> {
        Ok(BaselineTable::from_rows(parser::parse_baselines(reader)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
id,played_on,hole_count,score,to_par,fairways_hit,fairways_possible,greens_hit,putts,penalties,course_rating,slope_rating,par,non_par3_holes,handicap
r-1,2025-04-12,18,90,18,7,14,8,34,2,72.0,113,72,14,10.0
r-2,2025-04-19,9,44,,4,7,4,17,1,36.0,120,36,7,
r-3,2025-04-26T15:30:00Z,18,95,,,,,,,,,,,
";

    #[test]
    fn parses_rounds_with_empty_cells_as_missing() {
        let rounds = RoundHistoryImporter::from_reader(EXPORT.as_bytes())
            .expect("export parses");
        assert_eq!(rounds.len(), 3);

        assert_eq!(rounds[0].putts, Some(34));
        assert_eq!(rounds[0].handicap_at_round, Some(10.0));
        assert_eq!(rounds[1].to_par, None);
        assert_eq!(rounds[1].resolved_to_par(), Some(8));
        assert_eq!(rounds[1].handicap_at_round, None);
        assert_eq!(
            rounds[2].played_on,
            chrono::NaiveDate::from_ymd_opt(2025, 4, 26).expect("valid date")
        );
        assert_eq!(rounds[2].greens_hit, None);
        assert_eq!(rounds[2].slope_rating, None);
    }

    #[test]
    fn reports_line_of_bad_value() {
        let export = "\
id,played_on,hole_count,score,putts
r-1,2025-04-12,18,90,32
r-2,2025-04-13,18,91,lots
";
        let err = RoundHistoryImporter::from_reader(export.as_bytes())
            .expect_err("bad putts rejected");
        match err {
            ImportError::InvalidRow { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("putts"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn baseline_csv_builds_sorted_table() {
        let csv = "\
handicap,score,fir_pct,gir_pct,putts,penalties
18,93.5,36,18,37,3.2
0,73,60,60,31,0.6
";
        let table = BaselineImporter::from_reader(csv.as_bytes())
            .expect("baseline parses");
        let handicaps: Vec<f64> = table.rows().iter().map(|row| row.handicap).collect();
        assert_eq!(handicaps, vec![0.0, 18.0]);
    }
}
