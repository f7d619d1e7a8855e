//! JSON repository.
//!
//! # File Format
//!
//! ```json
//! [
//!   {
//!     "id": "12",
//!     "name": "Università di Padova",
//!     "city": "Padova",
//!     "region": "north",
//!     "is_big_city": false,
//!     "humanities": true,
//!     "social": true,
//!     "health": true,
//!     "stem": true,
//!     "description": "Fundada em 1222."
//!   }
//! ]
//! ```

use crate::domain::error::{Result, UnimatchError};
use crate::domain::Candidate;
use crate::repository::backend::CandidateRepository;
use crate::repository::models::JsonRecord;
use std::fs;
use std::path::PathBuf;

/// Repository backed by a JSON array file.
#[derive(Debug, Clone)]
pub struct JsonRepository {
    path: PathBuf,
}

impl JsonRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CandidateRepository for JsonRepository {
    fn fetch_candidates(&self) -> Result<Vec<Candidate>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            UnimatchError::Repository(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let records: Vec<JsonRecord> = serde_json::from_str(&contents)?;
        Ok(records.into_iter().map(JsonRecord::into_candidate).collect())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Region;
    use std::io::Write;

    #[test]
    fn loads_array_of_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "12", "name": "Università di Padova", "city": "Padova", "region": "north", "stem": true}},
                {{"id": "13", "name": "Federico II", "location": "Napoli", "region": "sul"}}]"#
        )
        .unwrap();

        let candidates = JsonRepository::new(file.path()).fetch_candidates().unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].region, Region::North);
        assert_eq!(candidates[1].location, "Napoli");
        assert_eq!(candidates[1].region, Region::South);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            JsonRepository::new(file.path()).fetch_candidates(),
            Err(UnimatchError::Json(_))
        ));
    }
}
