//! Session phase of the application.
//!
//! ```text
//!   Quiz ──submit──► Loading ──candidates──► Swiping ──last card──► Shortlist
//!    ▲                                          │  ▲                   │
//!    │                                          │  └──────undo─────────┤
//!    │                                          └──last card──► NoMatches
//!    └───────────────────────── restart ───────────────────────────────┘
//! ```

use crate::engine::DeckStatus;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No criteria submitted yet.
    Quiz,
    /// Criteria submitted, candidates not yet delivered.
    Loading,
    /// Cards remain to be decided.
    Swiping,
    /// Deck finished with at least one like.
    Shortlist,
    /// Deck finished (or was empty) without likes.
    NoMatches,
}

impl From<DeckStatus> for SessionPhase {
    fn from(status: DeckStatus) -> Self {
        match status {
            DeckStatus::Active { .. } => Self::Swiping,
            DeckStatus::Shortlist { .. } => Self::Shortlist,
            DeckStatus::NoMatches => Self::NoMatches,
        }
    }
}
