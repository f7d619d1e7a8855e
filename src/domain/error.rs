//! Error types for the Unimatch deck engine.
//!
//! This module defines the centralized error type [`UnimatchError`], a type alias
//! [`Result`], and the two narrower error enums used at the edges of the core:
//! [`DeckRejection`] for transitions the deck refuses to apply, and
//! [`ExportError`] for share links that cannot be built. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! None of these errors are fatal. Repository failures degrade to an empty
//! deck, rejected transitions are silent no-ops, and export failures disable
//! the triggering action.

use thiserror::Error;

use super::candidate::CandidateId;

/// The main error type for Unimatch operations.
///
/// Consolidates failures from loading candidate data, reading configuration,
/// and building share links. Most variants wrap underlying errors from external
/// crates using `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use unimatch::UnimatchError;
///
/// fn validate_config() -> Result<(), UnimatchError> {
///     Err(UnimatchError::Config("Missing data source".to_string()))
/// }
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum UnimatchError {
    /// Candidate repository could not produce records.
    ///
    /// The string describes the data source and what went wrong.
    #[error("Repository error: {0}")]
    Repository(String),

    /// CSV source could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON source could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Palette parsing failed.
    #[error("Palette error: {0}")]
    Palette(String),

    /// A share link could not be built.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Reasons the deck refuses a transition.
///
/// Every variant describes a request that raced or outlived the state it was
/// aimed at. The deck is left untouched; the application layer logs the
/// rejection at debug level and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckRejection {
    /// The decided card is not the current top of the deck.
    #[error("candidate {requested} is not the active card (active: {active:?})")]
    NotTop {
        /// Identifier carried by the stale request.
        requested: CandidateId,
        /// Identifier of the card that is actually on top, if any.
        active: Option<CandidateId>,
    },

    /// There are no remaining cards to decide on.
    #[error("deck is empty")]
    EmptyDeck,

    /// History is empty, so there is nothing to bring back.
    #[error("nothing to undo")]
    NothingToUndo,

    /// A previous undo happened too recently.
    #[error("undo suppressed during cool-down")]
    UndoCoolingDown,
}

/// Reasons a share link cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The shortlist has no entries; sharing is disabled.
    #[error("shortlist is empty")]
    EmptyShortlist,

    /// The adapter has no destination configured.
    #[error("no recipient configured for {0}")]
    MissingRecipient(&'static str),
}

/// A specialized `Result` type for Unimatch operations.
///
/// This is a type alias for `std::result::Result<T, UnimatchError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, UnimatchError>;
