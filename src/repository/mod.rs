//! Candidate sources.
//!
//! This module provides the [`CandidateRepository`] trait and its
//! implementations:
//!
//! - [`backend`]: Trait definition, [`StaticRepository`] and [`fetch_or_empty`]
//! - [`csv`]: Spreadsheet export reader
//! - [`json`]: JSON array reader
//! - [`models`]: On-disk record layouts and their conversion to candidates
//! - [`emphasis`]: Description highlighting applied at load time

pub mod backend;
pub mod csv;
pub mod emphasis;
pub mod json;
pub mod models;

pub use backend::{fetch_or_empty, CandidateRepository, StaticRepository};
pub use self::csv::CsvRepository;
pub use self::json::JsonRepository;

use std::path::Path;

/// Picks a repository for a data source path by its extension.
///
/// `.json` files use [`JsonRepository`]; anything else is read as CSV.
#[must_use]
pub fn for_path(path: &Path) -> Box<dyn CandidateRepository> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Box::new(JsonRepository::new(path))
    } else {
        Box::new(CsvRepository::new(path))
    }
}
