//! Filter criteria built from quiz answers.
//!
//! The quiz hands over a mapping from question id to one or more selected
//! option ids. This module normalizes that mapping into a typed
//! [`FilterCriteria`] (one [`Selection`] per dimension) and extracts the
//! [`UserProfile`] used when sharing the shortlist.
//!
//! # Matching semantics
//!
//! - A dimension whose answer is missing, empty, or contains `"any"` matches
//!   every candidate.
//! - Otherwise a candidate matches the dimension when it satisfies at least
//!   one selected value (OR within a dimension).
//! - A candidate passes the criteria when every dimension matches (AND across
//!   dimensions).
//!
//! Option ids that are not recognized for a dimension are kept out of the
//! typed set but still make the dimension restrictive, so an answer made only
//! of unknown ids matches nothing.

use super::candidate::{CitySize, Region, Topic};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Option id that disables a dimension.
const ANY: &str = "any";

/// Question id for the region dimension.
const REGION_KEY: &str = "region";

/// Question ids accepted for the topic dimension.
const TOPIC_KEYS: [&str; 2] = ["area", "topics"];

/// Question ids accepted for the city size dimension.
const CITY_SIZE_KEYS: [&str; 2] = ["citySize", "city_size"];

/// Multi-select answer for one filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection<T: Ord> {
    /// Dimension is unconstrained.
    Any,
    /// Candidate must satisfy at least one of these values.
    Only(BTreeSet<T>),
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Self::Any
    }
}

impl<T: Ord> Selection<T> {
    /// Builds a restrictive selection from typed values.
    ///
    /// An empty iterator yields [`Selection::Any`], matching the quiz contract
    /// that an empty answer means "no preference".
    pub fn of(values: impl IntoIterator<Item = T>) -> Self {
        let set: BTreeSet<T> = values.into_iter().collect();
        if set.is_empty() {
            Self::Any
        } else {
            Self::Only(set)
        }
    }

    /// Normalizes raw option ids into a selection.
    ///
    /// Blank ids are ignored. If nothing is left, or any id is `"any"`, the
    /// selection is [`Selection::Any`]. Ids that `parse` rejects are logged and
    /// dropped from the set without loosening the selection.
    fn from_option_ids<'a>(
        dimension: &str,
        ids: impl IntoIterator<Item = &'a str>,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Self {
        let ids: Vec<&str> = ids
            .into_iter()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .collect();

        if ids.is_empty() || ids.iter().any(|id| id.eq_ignore_ascii_case(ANY)) {
            return Self::Any;
        }

        let mut set = BTreeSet::new();
        for id in ids {
            match parse(id) {
                Some(value) => {
                    set.insert(value);
                }
                None => {
                    tracing::debug!(dimension = dimension, option_id = %id, "ignoring unknown option id");
                }
            }
        }
        Self::Only(set)
    }

    /// Returns `true` if the dimension accepts a candidate for which `pred`
    /// reports the selected values it satisfies.
    pub fn matches(&self, pred: impl Fn(&T) -> bool) -> bool {
        match self {
            Self::Any => true,
            Self::Only(set) => set.iter().any(pred),
        }
    }

    /// Returns `true` if the dimension is unconstrained.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

/// A single answer as produced by the quiz: one option id or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    One(String),
    Many(Vec<String>),
}

impl AnswerValue {
    /// Iterates the option ids carried by the answer.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values.as_slice(),
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(String::from).collect())
    }
}

/// Completed quiz: question id → selected option id(s).
///
/// # Example
///
/// ```
/// use unimatch::domain::{FilterCriteria, QuizAnswers};
///
/// let answers = QuizAnswers::default()
///     .with("region", "north")
///     .with("area", vec!["stem", "health"]);
/// let criteria = FilterCriteria::from_answers(&answers);
/// assert!(!criteria.region.is_any());
/// assert!(criteria.city_size.is_any());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizAnswers(BTreeMap<String, AnswerValue>);

impl QuizAnswers {
    /// Adds or replaces an answer.
    #[must_use]
    pub fn with(mut self, question: impl Into<String>, answer: impl Into<AnswerValue>) -> Self {
        self.insert(question, answer);
        self
    }

    /// Adds or replaces an answer in place.
    pub fn insert(&mut self, question: impl Into<String>, answer: impl Into<AnswerValue>) {
        self.0.insert(question.into(), answer.into());
    }

    /// Appends one option id to a question, promoting it to a multi-select answer.
    pub fn push(&mut self, question: impl Into<String>, option_id: impl Into<String>) {
        let option_id = option_id.into();
        let entry = self
            .0
            .entry(question.into())
            .or_insert_with(|| AnswerValue::Many(Vec::new()));
        let promoted = match entry {
            AnswerValue::Many(values) => {
                values.push(option_id);
                return;
            }
            AnswerValue::One(existing) => vec![std::mem::take(existing), option_id],
        };
        *entry = AnswerValue::Many(promoted);
    }

    /// Returns the answer for a question, if any.
    #[must_use]
    pub fn get(&self, question: &str) -> Option<&AnswerValue> {
        self.0.get(question)
    }

    /// Returns the first answer found among several accepted question ids.
    fn first_of(&self, questions: &[&str]) -> Option<&AnswerValue> {
        questions.iter().find_map(|q| self.0.get(*q))
    }

    /// Returns a single free-text answer, trimmed, if present and non-empty.
    fn text(&self, question: &str) -> Option<String> {
        self.0
            .get(question)
            .and_then(|answer| answer.ids().next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
    }
}

/// User-chosen constraints applied by the filter engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub region: Selection<Region>,
    pub city_size: Selection<CitySize>,
    pub topics: Selection<Topic>,
}

impl FilterCriteria {
    /// Criteria that accept every candidate.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Normalizes quiz answers into typed criteria.
    ///
    /// Reads `region`, `area` (or `topics`) and `citySize` (or `city_size`).
    /// Other questions are ignored. Absent questions default to "any".
    #[must_use]
    pub fn from_answers(answers: &QuizAnswers) -> Self {
        let region = answers.get(REGION_KEY).map_or_else(Selection::default, |answer| {
            Selection::from_option_ids(REGION_KEY, answer.ids(), Region::from_option_id)
        });

        let topics = answers.first_of(&TOPIC_KEYS).map_or_else(Selection::default, |answer| {
            Selection::from_option_ids("topics", answer.ids(), Topic::from_option_id)
        });

        let city_size = answers.first_of(&CITY_SIZE_KEYS).map_or_else(Selection::default, |answer| {
            Selection::from_option_ids("city_size", answer.ids(), CitySize::from_option_id)
        });

        let criteria = Self {
            region,
            city_size,
            topics,
        };
        tracing::debug!(criteria = ?criteria, "criteria normalized from quiz answers");
        criteria
    }
}

/// Name of the person who completed the quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserProfile {
    /// Fallback used whenever the user skipped the name question.
    pub const ANONYMOUS: &'static str = "Estudante";

    /// Creates a profile from explicit names.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let clean = |s: String| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            first_name: clean(first_name.into()),
            last_name: clean(last_name.into()),
        }
    }

    /// Extracts `userName` / `userSurname` from the quiz answers.
    #[must_use]
    pub fn from_answers(answers: &QuizAnswers) -> Self {
        Self {
            first_name: answers.text("userName"),
            last_name: answers.text("userSurname"),
        }
    }

    /// First name, or the anonymous fallback.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or(Self::ANONYMOUS)
    }

    /// "First Last" when both are known, otherwise the greeting name.
    ///
    /// # Example
    ///
    /// ```
    /// use unimatch::domain::UserProfile;
    ///
    /// assert_eq!(UserProfile::new("Ana", "Souza").full_name(), "Ana Souza");
    /// assert_eq!(UserProfile::new("Ana", "").full_name(), "Ana");
    /// assert_eq!(UserProfile::default().full_name(), "Estudante");
    /// ```
    #[must_use]
    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            _ => self.greeting_name().to_string(),
        }
    }
}
