//! Unimatch: a swipeable card-deck engine for matching students with
//! Italian universities.
//!
//! A short quiz narrows the candidate list; the student then swipes through
//! a deck of cards, liking or rejecting each one, and ends with a shortlist
//! that can be shared by WhatsApp or e-mail. The crate provides:
//! - A filter engine turning quiz answers into a shuffled, themed deck
//! - A deck state machine with decide, undo (with cool-down) and restart
//! - Gesture controllers that drive drag, snap-back and exit animations
//! - Candidate repositories for spreadsheet CSV exports and JSON files
//! - Export adapters that build share links for the shortlist
//! - A text renderer and a line-driven binary

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Line-driven shim (main.rs)                         │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Session
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Engine        │   │ Gesture       │   │ UI Layer      │
//! │ (engine/)     │   │ (gesture/)    │   │ (ui/)         │
//! │ - Filtering   │   │ - Springs     │   │ - Rendering   │
//! │ - Deck state  │   │ - Controllers │   │ - Palettes    │
//! │ - Themes      │   │ - Feedback    │   │ - Components  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                                         │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Repository    │   │ Export        │   │ Infrastructure│
//! │ - CSV / JSON  │   │ - WhatsApp    │   │ - Paths       │
//! │ - Emphasis    │   │ - E-mail      │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Observability (observability/)│
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Session state with event/action model
//! - [`domain`]: Core domain types (candidates, criteria, verdicts, errors)
//! - [`engine`]: Filtering, presentation and the deck state machine
//! - [`gesture`]: Drag and animation controllers, visual feedback
//! - [`repository`]: Candidate sources
//! - [`export`]: Share links for the shortlist
//! - [`ui`]: Terminal rendering with card palettes
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Rotating file logging
//!
//! # Configuration
//!
//! ```toml
//! # unimatch.toml
//! data_source = "~/unimatch/universidades.csv"
//! palette_name = "sunset"
//! trace_level = "debug"
//! swipe_threshold = 120.0
//! undo_cooldown_ms = 50
//! ```
//!
//! # Example
//!
//! ```rust
//! use unimatch::domain::{Candidate, QuizAnswers, Region};
//! use unimatch::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let answers = QuizAnswers::default().with("region", "north");
//! let (_, actions) = handle_event(&mut state, &Event::QuizSubmitted { answers })?;
//! assert!(matches!(actions[0], Action::FetchCandidates { .. }));
//!
//! let candidates = vec![Candidate::new("0", "Politecnico di Milano", "Milano", Region::North)];
//! handle_event(&mut state, &Event::CandidatesLoaded { candidates })?;
//! assert_eq!(state.deck.as_ref().map(|deck| deck.total()), Some(1));
//! # Ok::<(), unimatch::UnimatchError>(())
//! ```

pub mod app;
pub mod domain;
pub mod engine;
pub mod export;
pub mod gesture;
pub mod infrastructure;
pub mod repository;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, SessionPhase, SessionSettings};
pub use domain::{Result, UnimatchError};
pub use ui::Palette;

use crate::export::{
    EmailAdapter, WhatsAppAdapter, DEFAULT_EMAIL_RECIPIENT, DEFAULT_SITE_URL, DEFAULT_WHATSAPP_PHONE,
};
use crate::gesture::GestureConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Default release threshold in offset units.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 100.0;

/// Default undo cool-down in milliseconds.
pub const DEFAULT_UNDO_COOLDOWN_MS: u64 = 50;

/// Application configuration.
///
/// Loaded from a TOML file or from string key/values (command-line flags).
/// Every field is optional; missing values fall back to defaults.
///
/// # Example
///
/// ```toml
/// data_source = "universidades.csv"
/// palette_file = "~/.config/unimatch/palette.toml"
/// whatsapp_phone = "393516274752"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the candidate file. `.json` selects the JSON repository, any
    /// other extension the CSV one. Without a source the deck starts empty.
    pub data_source: Option<String>,

    /// Built-in palette name (`unimatch`, `sunset`). Ignored if
    /// `palette_file` is set.
    pub palette_name: Option<String>,

    /// Path to a custom TOML palette. See [`ui::theme`] for the format.
    pub palette_file: Option<String>,

    /// Tracing level: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory for the log file. Default: [`infrastructure::default_data_dir`]
    pub data_dir: Option<String>,

    /// Release offset a drag must exceed to decide the card.
    pub swipe_threshold: f64,

    /// Minimum time between two undos.
    pub undo_cooldown_ms: u64,

    pub whatsapp_phone: String,
    pub email_recipient: String,

    /// Site appended to share messages.
    pub site_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: None,
            palette_name: None,
            palette_file: None,
            trace_level: None,
            data_dir: None,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            undo_cooldown_ms: DEFAULT_UNDO_COOLDOWN_MS,
            whatsapp_phone: DEFAULT_WHATSAPP_PHONE.to_string(),
            email_recipient: DEFAULT_EMAIL_RECIPIENT.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from string key/values.
    ///
    /// # Parsing Rules
    ///
    /// - `data_source`, `palette`/`palette_name`, `palette_file`,
    ///   `trace_level`, `data_dir`: taken as-is (blank values ignored)
    /// - `swipe_threshold`: `f64`, must be positive (falls back to 100)
    /// - `undo_cooldown_ms`: `u64` (falls back to 50)
    /// - `whatsapp_phone`, `email_recipient`, `site_url`: replace defaults
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use unimatch::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_source".to_string(), "unis.csv".to_string());
    /// map.insert("swipe_threshold".to_string(), "abc".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.data_source.as_deref(), Some("unis.csv"));
    /// assert_eq!(config.swipe_threshold, 100.0);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let swipe_threshold = text("swipe_threshold")
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(defaults.swipe_threshold);

        let undo_cooldown_ms = text("undo_cooldown_ms")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.undo_cooldown_ms);

        Self {
            data_source: text("data_source"),
            palette_name: text("palette_name").or_else(|| text("palette")),
            palette_file: text("palette_file"),
            trace_level: text("trace_level"),
            data_dir: text("data_dir"),
            swipe_threshold,
            undo_cooldown_ms,
            whatsapp_phone: text("whatsapp_phone").unwrap_or(defaults.whatsapp_phone),
            email_recipient: text("email_recipient").unwrap_or(defaults.email_recipient),
            site_url: text("site_url").unwrap_or(defaults.site_url),
        }
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`UnimatchError::Config`] when the TOML is malformed or a value
    /// has the wrong type, or when `swipe_threshold` is not positive.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| UnimatchError::Config(format!("Invalid config TOML: {e}")))?;
        if !(config.swipe_threshold.is_finite() && config.swipe_threshold > 0.0) {
            return Err(UnimatchError::Config(format!(
                "swipe_threshold must be positive, got {}",
                config.swipe_threshold
            )));
        }
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`UnimatchError::Io`] if the file cannot be read, or the errors
    /// of [`Config::from_toml_str`].
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Overlays string key/values on top of this configuration.
    ///
    /// Only keys present in `map` replace existing values.
    #[must_use]
    pub fn merged_with(mut self, map: &BTreeMap<String, String>) -> Self {
        let parsed = Self::from_map(map);
        let has = |key: &str| map.get(key).is_some_and(|v| !v.trim().is_empty());

        if parsed.data_source.is_some() {
            self.data_source = parsed.data_source;
        }
        if parsed.palette_name.is_some() {
            self.palette_name = parsed.palette_name;
        }
        if parsed.palette_file.is_some() {
            self.palette_file = parsed.palette_file;
        }
        if parsed.trace_level.is_some() {
            self.trace_level = parsed.trace_level;
        }
        if parsed.data_dir.is_some() {
            self.data_dir = parsed.data_dir;
        }
        if has("swipe_threshold") {
            self.swipe_threshold = parsed.swipe_threshold;
        }
        if has("undo_cooldown_ms") {
            self.undo_cooldown_ms = parsed.undo_cooldown_ms;
        }
        if has("whatsapp_phone") {
            self.whatsapp_phone = parsed.whatsapp_phone;
        }
        if has("email_recipient") {
            self.email_recipient = parsed.email_recipient;
        }
        if has("site_url") {
            self.site_url = parsed.site_url;
        }
        self
    }

    /// Resolves the card palette: file, then name, then the default.
    ///
    /// Failures fall back to the default palette with a debug log.
    #[must_use]
    pub fn palette(&self) -> Palette {
        self.palette_file.as_ref().map_or_else(
            || {
                self.palette_name.as_ref().map_or_else(Palette::default, |palette_name| {
                    Palette::from_name(palette_name).unwrap_or_else(|| {
                        tracing::debug!(palette_name = %palette_name, "unknown palette, using default");
                        Palette::default()
                    })
                })
            },
            |palette_file| {
                Palette::from_file(infrastructure::expand_tilde(palette_file)).unwrap_or_else(|e| {
                    tracing::debug!(palette_file = %palette_file, error = %e, "failed to load palette from file, using default");
                    Palette::default()
                })
            },
        )
    }

    /// Builds the session tunables described by this configuration.
    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            palette: self.palette(),
            gesture: GestureConfig {
                threshold: self.swipe_threshold,
                ..GestureConfig::default()
            },
            undo_cooldown: Duration::from_millis(self.undo_cooldown_ms),
            whatsapp: WhatsAppAdapter::new(self.whatsapp_phone.clone(), self.site_url.clone()),
            email: EmailAdapter::new(self.email_recipient.clone(), self.site_url.clone()),
        }
    }
}

/// Creates a session waiting for quiz answers.
///
/// Resolves the palette (file → name → default) and the gesture and export
/// settings from `config`. Does not install logging; see
/// [`observability::init_tracing`].
///
/// # Example
///
/// ```rust
/// use unimatch::{initialize, Config, SessionPhase};
///
/// let config = Config {
///     palette_name: Some("sunset".to_string()),
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.phase(), SessionPhase::Quiz);
/// assert_eq!(state.settings.palette.name, "sunset");
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(data_source = ?config.data_source, "initializing unimatch session");
    AppState::new(config.session_settings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn map_values_are_typed_with_fallbacks() {
        let config = Config::from_map(&map(&[
            ("palette", "sunset"),
            ("swipe_threshold", "-4"),
            ("undo_cooldown_ms", "250"),
            ("trace_level", "  "),
        ]));
        assert_eq!(config.palette_name.as_deref(), Some("sunset"));
        assert!((config.swipe_threshold - DEFAULT_SWIPE_THRESHOLD).abs() < f64::EPSILON);
        assert_eq!(config.undo_cooldown_ms, 250);
        assert_eq!(config.trace_level, None);
        assert_eq!(config.site_url, DEFAULT_SITE_URL);
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let config = Config::from_toml_str("data_source = \"unis.json\"\nswipe_threshold = 120.0\n").unwrap();
        assert_eq!(config.data_source.as_deref(), Some("unis.json"));
        assert!((config.swipe_threshold - 120.0).abs() < f64::EPSILON);
        assert_eq!(config.undo_cooldown_ms, DEFAULT_UNDO_COOLDOWN_MS);
    }

    #[test]
    fn toml_rejects_bad_values() {
        assert!(matches!(
            Config::from_toml_str("swipe_threshold = 0.0"),
            Err(UnimatchError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("undo_cooldown_ms = \"soon\""),
            Err(UnimatchError::Config(_))
        ));
    }

    #[test]
    fn toml_file_is_read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "palette_name = \"sunset\"").unwrap();
        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.palette().name, "sunset");
    }

    #[test]
    fn flags_override_only_what_they_name() {
        let base = Config {
            data_source: Some("base.csv".to_string()),
            undo_cooldown_ms: 10,
            ..Config::default()
        };
        let merged = base.merged_with(&map(&[("site_url", "https://example.org")]));
        assert_eq!(merged.data_source.as_deref(), Some("base.csv"));
        assert_eq!(merged.undo_cooldown_ms, 10);
        assert_eq!(merged.site_url, "https://example.org");
    }

    #[test]
    fn palette_falls_back_to_default() {
        let config = Config {
            palette_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.palette(), Palette::default());

        let config = Config {
            palette_file: Some("/nonexistent/palette.toml".to_string()),
            palette_name: Some("sunset".to_string()),
            ..Config::default()
        };
        assert_eq!(config.palette(), Palette::default());
    }

    #[test]
    fn settings_carry_threshold_and_cooldown() {
        let config = Config {
            swipe_threshold: 150.0,
            undo_cooldown_ms: 0,
            ..Config::default()
        };
        let settings = config.session_settings();
        assert!((settings.gesture.threshold - 150.0).abs() < f64::EPSILON);
        assert_eq!(settings.undo_cooldown, Duration::ZERO);
    }
}
