//! Candidate repository abstraction.
//!
//! This module defines the [`CandidateRepository`] trait that abstracts over
//! where candidate records come from. The deck engine only ever sees a
//! `Vec<Candidate>`; it does not know whether the records were read from a CSV
//! sheet, a JSON export or built in memory.
//!
//! A failing repository never stops a session. [`fetch_or_empty`] logs the
//! failure and hands back an empty list, which the deck reports as "no
//! matches".

use crate::domain::error::Result;
use crate::domain::Candidate;

/// Source of candidate records.
///
/// # Implementations
///
/// - [`CsvRepository`](crate::repository::CsvRepository): spreadsheet export with Portuguese/Italian headers
/// - [`JsonRepository`](crate::repository::JsonRepository): array of candidate objects
/// - [`StaticRepository`]: fixed in-memory list
///
/// # Examples
///
/// ```no_run
/// use unimatch::repository::{CandidateRepository, CsvRepository};
///
/// let repository = CsvRepository::new("data/universities.csv");
/// let candidates = repository.fetch_candidates()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait CandidateRepository {
    /// Loads every candidate the source holds, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or parsed.
    fn fetch_candidates(&self) -> Result<Vec<Candidate>>;

    /// Short description of the source, used in log messages.
    fn describe(&self) -> String;
}

/// Loads candidates, degrading any failure to an empty list.
pub fn fetch_or_empty(repository: &dyn CandidateRepository) -> Vec<Candidate> {
    let _span = tracing::debug_span!("fetch_candidates", source = %repository.describe()).entered();
    match repository.fetch_candidates() {
        Ok(candidates) => {
            tracing::info!(count = candidates.len(), "candidates loaded");
            candidates
        }
        Err(e) => {
            tracing::warn!(error = %e, "candidate source unavailable, continuing with empty deck");
            Vec::new()
        }
    }
}

/// Repository over a fixed list of candidates.
#[derive(Debug, Clone, Default)]
pub struct StaticRepository {
    candidates: Vec<Candidate>,
}

impl StaticRepository {
    #[must_use]
    pub const fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

impl CandidateRepository for StaticRepository {
    fn fetch_candidates(&self) -> Result<Vec<Candidate>> {
        Ok(self.candidates.clone())
    }

    fn describe(&self) -> String {
        format!("static list ({} candidates)", self.candidates.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::UnimatchError;
    use crate::domain::Region;

    struct Broken;

    impl CandidateRepository for Broken {
        fn fetch_candidates(&self) -> Result<Vec<Candidate>> {
            Err(UnimatchError::Repository("connection refused".to_string()))
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    #[test]
    fn failing_source_degrades_to_empty_list() {
        assert!(fetch_or_empty(&Broken).is_empty());
    }

    #[test]
    fn static_source_returns_its_candidates() {
        let repository = StaticRepository::new(vec![Candidate::new("1", "Uni", "Roma", Region::Center)]);
        assert_eq!(fetch_or_empty(&repository).len(), 1);
    }
}
