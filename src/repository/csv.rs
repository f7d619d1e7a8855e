//! CSV spreadsheet repository.
//!
//! Reads the university sheet export. Each data row becomes one candidate;
//! the row index (starting at 0, header excluded) is the candidate id, so ids
//! stay stable as long as the sheet order does.

use crate::domain::error::{Result, UnimatchError};
use crate::domain::Candidate;
use crate::repository::backend::CandidateRepository;
use crate::repository::models::SheetRow;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Repository backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    path: PathBuf,
}

impl CsvRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CandidateRepository for CsvRepository {
    fn fetch_candidates(&self) -> Result<Vec<Candidate>> {
        let file = File::open(&self.path).map_err(|e| {
            UnimatchError::Repository(format!("cannot open {}: {e}", self.path.display()))
        })?;
        parse_candidates(file)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// Parses sheet rows from any reader.
///
/// Fields are trimmed and rows may have fewer columns than the header.
///
/// # Errors
///
/// Returns [`UnimatchError::Csv`] on malformed CSV.
pub fn parse_candidates<R: Read>(reader: R) -> Result<Vec<Candidate>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut candidates = Vec::new();

    for (index, record) in csv_reader.deserialize::<SheetRow>().enumerate() {
        let row = record?;
        candidates.push(row.into_candidate(index));
    }

    Ok(candidates)
}
