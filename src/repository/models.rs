//! Raw record layouts for candidate sources.
//!
//! These types mirror what is on disk. They are converted into domain
//! [`Candidate`]s at the repository boundary, where defaults for missing
//! fields are applied and descriptions get their emphasis markers.

use crate::domain::{Candidate, CandidateId, Region, Topic};
use crate::repository::emphasis::emphasize;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

/// Name used when a row carries neither the full nor the short name.
pub const DEFAULT_NAME: &str = "Universidade";

/// City used when a row has no city.
pub const DEFAULT_LOCATION: &str = "Itália";

/// Description used when a row has none.
pub const DEFAULT_DESCRIPTION: &str = "Uma excelente universidade italiana.";

/// One row of the university spreadsheet export.
///
/// Column names are the sheet's own headers. Boolean columns hold `TRUE` or
/// `FALSE`; anything other than a case-insensitive `TRUE` counts as false.
#[derive(Debug, Default, Deserialize)]
pub struct SheetRow {
    #[serde(rename = "NomeEsteso", default, deserialize_with = "blank_as_none")]
    pub full_name: Option<String>,
    #[serde(rename = "NomeOperativo", default, deserialize_with = "blank_as_none")]
    pub short_name: Option<String>,
    #[serde(rename = "Cidade", default, deserialize_with = "blank_as_none")]
    pub city: Option<String>,
    #[serde(rename = "Área", default)]
    pub area: String,
    #[serde(rename = "Grandes Centros (150k)", default)]
    pub big_city: String,
    #[serde(rename = "Artística, Literária e Educação", default)]
    pub humanities: String,
    #[serde(rename = "Econômica, Jurídica e Social", default)]
    pub social: String,
    #[serde(
        rename = "Ciências da Saúde, Agrárias e Veterinária",
        alias = "iências da Saúde, Agrárias e Veterinária",
        default
    )]
    pub health: String,
    #[serde(rename = "STEM", default)]
    pub stem: String,
    #[serde(rename = "Descrizione", default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,
}

impl SheetRow {
    /// Converts the row at `index` into a candidate whose id is the index.
    #[must_use]
    pub fn into_candidate(self, index: usize) -> Candidate {
        let topics = [
            (Topic::Humanities, &self.humanities),
            (Topic::Social, &self.social),
            (Topic::Health, &self.health),
            (Topic::Stem, &self.stem),
        ]
        .into_iter()
        .filter(|(_, flag)| is_true(flag))
        .map(|(topic, _)| topic)
        .collect::<BTreeSet<_>>();

        let name = self
            .full_name
            .or(self.short_name)
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let description = self
            .description
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

        Candidate {
            id: CandidateId::new(index.to_string()),
            name,
            location: self.city.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            region: Region::from_label(&self.area),
            is_big_city: is_true(&self.big_city),
            topics,
            description: emphasize(&description),
        }
    }
}

/// One object of a JSON candidate export.
///
/// Accepts the flat layout served by the original web API: topic flags as
/// booleans and `city` for the location. A missing id stays blank and the
/// filter engine drops the candidate.
#[derive(Debug, Default, Deserialize)]
pub struct JsonRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "location")]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub is_big_city: bool,
    #[serde(default)]
    pub humanities: bool,
    #[serde(default)]
    pub social: bool,
    #[serde(default)]
    pub health: bool,
    #[serde(default)]
    pub stem: bool,
    #[serde(default)]
    pub description: String,
}

impl JsonRecord {
    #[must_use]
    pub fn into_candidate(self) -> Candidate {
        let topics = [
            (Topic::Humanities, self.humanities),
            (Topic::Social, self.social),
            (Topic::Health, self.health),
            (Topic::Stem, self.stem),
        ]
        .into_iter()
        .filter_map(|(topic, set)| set.then_some(topic))
        .collect();

        Candidate {
            id: CandidateId::new(self.id),
            name: non_empty_or(self.name, DEFAULT_NAME),
            location: non_empty_or(self.city, DEFAULT_LOCATION),
            region: Region::from_label(&self.region),
            is_big_city: self.is_big_city,
            topics,
            description: emphasize(&non_empty_or(self.description, DEFAULT_DESCRIPTION)),
        }
    }
}

fn is_true(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_row_falls_back_to_short_name_and_defaults() {
        let row = SheetRow {
            short_name: Some("UniPi".to_string()),
            area: "Sul e Ilhas".to_string(),
            stem: "true".to_string(),
            health: "FALSE".to_string(),
            ..SheetRow::default()
        };
        let candidate = row.into_candidate(4);

        assert_eq!(candidate.id.as_str(), "4");
        assert_eq!(candidate.name, "UniPi");
        assert_eq!(candidate.location, DEFAULT_LOCATION);
        assert_eq!(candidate.region, Region::South);
        assert!(candidate.has_topic(Topic::Stem));
        assert!(!candidate.has_topic(Topic::Health));
        assert!(candidate.description.contains("**"));
    }

    #[test]
    fn json_record_without_id_stays_blank() {
        let record: JsonRecord = serde_json::from_str(r#"{"name": "Ca' Foscari", "region": "norte"}"#).unwrap();
        let candidate = record.into_candidate();
        assert!(candidate.id.is_blank());
        assert_eq!(candidate.region, Region::North);
    }
}
