use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use thiserror::Error;

use super::model::{Dataset, SchoolRecord};

// ---------------------------------------------------------------------------
// Candidate source locations
// ---------------------------------------------------------------------------

/// Dataset locations tried in priority order; the first path that exists and
/// parses wins. A path that exists but fails to parse is skipped with a
/// warning.
const CANDIDATE_PATHS: &[&str] = &[
    "data/UC_Schools_Admission_Rankings.csv",
    "UC_Schools_Admission_Rankings.csv",
    "../data/UC_Schools_Admission_Rankings.csv",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataError {
    #[error("no admissions dataset found (tried {tried} candidate locations)")]
    Unavailable { tried: usize },

    #[error("failed to load {path}: {source:#}")]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset from the first usable candidate path.
pub fn load_default() -> Result<Arc<Dataset>, DataError> {
    load_first(CANDIDATE_PATHS)
}

fn load_first(candidates: &[&str]) -> Result<Arc<Dataset>, DataError> {
    for candidate in candidates {
        let path = Path::new(candidate);
        if !path.is_file() {
            continue;
        }
        match load_csv(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {} ({} campuses, {} schools)",
                    dataset.len(),
                    path.display(),
                    dataset.campuses.len(),
                    dataset.school_names.len()
                );
                return Ok(dataset);
            }
            Err(e) => log::warn!("Skipping {}: {e}", path.display()),
        }
    }
    Err(DataError::Unavailable {
        tried: candidates.len(),
    })
}

/// Load a specific CSV file (used by File -> Open).
pub fn load_csv(path: &Path) -> Result<Arc<Dataset>, DataError> {
    let result = File::open(path)
        .context("opening CSV")
        .and_then(parse_records);
    match result {
        Ok(records) => {
            let dataset = Dataset::from_records(records);
            if dataset.is_empty() {
                log::warn!("{} parsed but contained no records", path.display());
            }
            Ok(Arc::new(dataset))
        }
        Err(source) => Err(DataError::Load {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse records from any reader. Header whitespace is trimmed; numeric
/// columns are coerced via the lenient deserializers on [`SchoolRecord`],
/// so only structural problems (missing identity columns, malformed CSV)
/// fail the load.
pub(crate) fn parse_records<R: Read>(input: R) -> Result<Vec<SchoolRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<SchoolRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "School,City,County,College,Private_Public,\
Applied,Admitted,Enrolled,Admit_Rate_%";

    fn parse(csv_text: &str) -> Vec<SchoolRecord> {
        parse_records(csv_text.as_bytes()).expect("parse")
    }

    #[test]
    fn parses_core_columns() {
        let rows = parse(&format!(
            "{HEADER}\nAcme High,Irvine,Orange,UC Berkeley,Public,120,90,45,75.0\n"
        ));
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.school, "Acme High");
        assert_eq!(r.college, "UC Berkeley");
        assert_eq!((r.applied, r.admitted, r.enrolled), (120, 90, 45));
        assert_eq!(r.admit_rate, 75.0);
    }

    #[test]
    fn coerces_malformed_numbers_to_zero() {
        let rows = parse(&format!(
            "{HEADER}\nAcme High,Irvine,Orange,UCLA,Public,N/A,,-5,not-a-rate\n"
        ));
        let r = &rows[0];
        assert_eq!(r.applied, 0); // "N/A"
        assert_eq!(r.admitted, 0); // blank
        assert_eq!(r.enrolled, 0); // negative clamps
        assert_eq!(r.admit_rate, 0.0);
    }

    #[test]
    fn coercion_is_idempotent_on_numeric_input() {
        let row = format!("{HEADER}\nAcme High,Irvine,Orange,UCLA,Public,120,90,45,62.5\n");
        let first = parse(&row);
        // Re-render the parsed values and parse again; nothing changes.
        let again = parse(&format!(
            "{HEADER}\nAcme High,Irvine,Orange,UCLA,Public,{},{},{},{}\n",
            first[0].applied, first[0].admitted, first[0].enrolled, first[0].admit_rate
        ));
        assert_eq!(again[0].applied, first[0].applied);
        assert_eq!(again[0].admit_rate, first[0].admit_rate);
    }

    #[test]
    fn header_whitespace_is_trimmed() {
        let rows = parse(
            " School , City ,County,College,Private_Public, Applied ,Admitted,Enrolled, Admit_Rate_% \n\
             Acme High,Irvine,Orange,UCSD,Private,10,5,2,50.0\n",
        );
        assert_eq!(rows[0].school, "Acme High");
        assert_eq!(rows[0].applied, 10);
        assert_eq!(rows[0].admit_rate, 50.0);
    }

    #[test]
    fn missing_demographic_columns_read_as_zero() {
        let rows = parse(&format!(
            "{HEADER}\nAcme High,Irvine,Orange,UCSD,Public,10,5,2,50.0\n"
        ));
        for (_, stats) in rows[0].demographics() {
            assert_eq!(stats.applied, 0);
            assert_eq!(stats.admit_rate, 0.0);
        }
    }

    #[test]
    fn demographic_columns_parse_when_present() {
        let rows = parse(
            "School,City,County,College,Private_Public,Admit_Rate_%,\
Asian_Applied,Asian_Admitted,Asian_Admit_Rate_%\n\
Acme High,Irvine,Orange,UCSD,Public,50.0,40,30,75.0\n",
        );
        let stats = rows[0].demographic(crate::data::model::Demographic::Asian);
        assert_eq!((stats.applied, stats.admitted), (40, 30));
        assert_eq!(stats.admit_rate, 75.0);
    }

    #[test]
    fn non_public_type_reads_as_private() {
        let rows = parse(&format!(
            "{HEADER}\nA,Irvine,Orange,UCSD,Public,1,1,1,1\nB,Irvine,Orange,UCSD,Charter,1,1,1,1\n"
        ));
        use crate::data::model::SchoolType;
        assert_eq!(rows[0].school_type, SchoolType::Public);
        assert_eq!(rows[1].school_type, SchoolType::Private);
    }

    #[test]
    fn no_candidate_paths_is_unavailable() {
        let err = load_first(&["/nonexistent/one.csv", "/nonexistent/two.csv"])
            .err()
            .expect("should fail");
        assert!(matches!(err, DataError::Unavailable { tried: 2 }));
    }

    #[test]
    fn load_csv_reports_missing_file() {
        let err = load_csv(Path::new("/nonexistent/data.csv"))
            .err()
            .expect("should fail");
        assert!(matches!(err, DataError::Load { .. }));
    }
}
