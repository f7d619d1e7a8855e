//! Decision outcomes and swipe directions.

use serde::{Deserialize, Serialize};

/// Binary outcome of a decision on a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Like,
    Reject,
}

impl Verdict {
    /// Maps a signed offset to the verdict it points at.
    ///
    /// Positive offsets mean like, everything else means reject. Callers are
    /// expected to have applied the threshold already.
    #[must_use]
    pub fn from_offset(offset: f64) -> Self {
        if offset > 0.0 {
            Self::Like
        } else {
            Self::Reject
        }
    }

    /// Direction a card leaves the screen in for this verdict.
    #[must_use]
    pub const fn direction(self) -> SwipeDirection {
        match self {
            Self::Like => SwipeDirection::Right,
            Self::Reject => SwipeDirection::Left,
        }
    }

    /// Short label shown on the card while the verdict is being previewed.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Like => "match",
            Self::Reject => "nope",
        }
    }
}

/// Horizontal side a card exits toward (or re-enters from).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Sign of the offset axis: `-1.0` for left, `1.0` for right.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}
