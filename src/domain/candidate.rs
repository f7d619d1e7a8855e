//! Candidate domain model.
//!
//! A [`Candidate`] is one matchable university with the classification tags the
//! quiz filters on. Candidates are immutable once built; the deck, the history
//! stack and the shortlist all refer to them through their [`CandidateId`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Stable identifier of a candidate within one session.
///
/// The identifier is the join key between the remaining stack, the history
/// stack and the liked set, so it must never change after a deck is built.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    /// Wraps a raw identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the identifier carries no usable value.
    ///
    /// Blank identifiers come from records that lost their key column; the
    /// filter engine drops such candidates before they reach a deck.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Geographic macro-region of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    Center,
    South,
}

impl Region {
    /// Normalizes a free-form region label into one of the three regions.
    ///
    /// Accepts the canonical option ids (`north`, `center`, `south`) as well as
    /// the Portuguese labels used by the source sheet (`Norte`, `Centro`,
    /// `Sul`, `Sul e Ilhas`). Matching is case-insensitive and ignores
    /// surrounding whitespace. Unrecognized or missing labels fall back to
    /// [`Region::Center`].
    ///
    /// # Example
    ///
    /// ```
    /// use unimatch::domain::Region;
    ///
    /// assert_eq!(Region::from_label("Sul e Ilhas"), Region::South);
    /// assert_eq!(Region::from_label(" NORTE "), Region::North);
    /// assert_eq!(Region::from_label("Atlantis"), Region::Center);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::from_option_id(label).unwrap_or(Self::Center)
    }

    /// Parses a region label strictly, returning `None` for unknown labels.
    #[must_use]
    pub fn from_option_id(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "north" | "norte" => Some(Self::North),
            "center" | "centro" => Some(Self::Center),
            "south" | "sul" | "sul e ilhas" => Some(Self::South),
            _ => None,
        }
    }
}

/// Academic area a candidate is strong in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Humanities,
    Social,
    Health,
    Stem,
}

impl Topic {
    /// All topics in display order (humanities, social, health, stem).
    pub const ALL: [Self; 4] = [Self::Humanities, Self::Social, Self::Health, Self::Stem];

    /// Parses a quiz option id into a topic.
    #[must_use]
    pub fn from_option_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "humanities" => Some(Self::Humanities),
            "social" => Some(Self::Social),
            "health" => Some(Self::Health),
            "stem" => Some(Self::Stem),
            _ => None,
        }
    }
}

/// City size bucket derived from the candidate's large-city flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitySize {
    Big,
    Small,
}

impl CitySize {
    /// Parses a quiz option id into a city size.
    #[must_use]
    pub fn from_option_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "big" => Some(Self::Big),
            "small" => Some(Self::Small),
            _ => None,
        }
    }
}

/// Represents one matchable university.
///
/// # Fields
///
/// - `id`: Session-stable identifier (blank when the source lost it)
/// - `name`: Display name
/// - `location`: City label shown under the name
/// - `region`: Normalized macro-region
/// - `is_big_city`: Whether the city counts as a large centre (150k+)
/// - `topics`: Academic areas the university covers
/// - `description`: Free text, possibly containing `**emphasis**` markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub location: String,
    pub region: Region,
    pub is_big_city: bool,
    pub topics: BTreeSet<Topic>,
    pub description: String,
}

impl Candidate {
    /// Creates a candidate with no topics and an empty description.
    ///
    /// # Examples
    ///
    /// ```
    /// use unimatch::domain::{Candidate, Region, Topic};
    ///
    /// let uni = Candidate::new("7", "Politecnico di Milano", "Milano", Region::North)
    ///     .with_topic(Topic::Stem)
    ///     .with_big_city(true);
    /// assert!(uni.has_topic(Topic::Stem));
    /// assert!(uni.is_big_city);
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
        region: Region,
    ) -> Self {
        Self {
            id: CandidateId::new(id),
            name: name.into(),
            location: location.into(),
            region,
            is_big_city: false,
            topics: BTreeSet::new(),
            description: String::new(),
        }
    }

    /// Adds a topic flag.
    #[must_use]
    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topics.insert(topic);
        self
    }

    /// Sets the large-city flag.
    #[must_use]
    pub fn with_big_city(mut self, is_big_city: bool) -> Self {
        self.is_big_city = is_big_city;
        self
    }

    /// Returns whether the candidate covers the given topic.
    #[must_use]
    pub fn has_topic(&self, topic: Topic) -> bool {
        self.topics.contains(&topic)
    }

    /// Returns the city size bucket.
    #[must_use]
    pub const fn city_size(&self) -> CitySize {
        if self.is_big_city {
            CitySize::Big
        } else {
            CitySize::Small
        }
    }
}
