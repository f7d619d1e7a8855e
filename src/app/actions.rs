//! Actions representing side effects to be executed by the driver.
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically. The driver in
//! `main.rs` executes them in sequence and feeds any results back as events.
//!
//! # Example
//!
//! ```rust
//! use unimatch::app::Action;
//! use unimatch::domain::FilterCriteria;
//!
//! let actions = vec![Action::FetchCandidates {
//!     criteria: FilterCriteria::any(),
//! }];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::domain::FilterCriteria;

/// Commands representing side effects to be executed by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Load candidates from the configured repository.
    ///
    /// The driver answers with [`Event::CandidatesLoaded`](crate::app::Event::CandidatesLoaded)
    /// or [`Event::CandidatesUnavailable`](crate::app::Event::CandidatesUnavailable).
    /// Criteria are carried along so a remote source could filter server-side;
    /// the engine filters again regardless.
    FetchCandidates { criteria: FilterCriteria },

    /// Hand a share link to the platform (browser, messaging app, mail client).
    OpenLink { uri: String },

    /// End the session.
    Quit,
}
