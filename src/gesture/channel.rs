//! Offset channel shared between the active card and the control buttons.
//!
//! The buttons never read a card directly; they read the last offset written
//! here. Only the card that currently owns the channel may write, and handing
//! ownership to a new card resets the offset to zero. A card that is still
//! flying off-screen after its verdict therefore cannot drive the buttons of
//! the card that replaced it.

use crate::domain::CandidateId;
use crate::gesture::feedback::ControlFeedback;

/// Single-writer offset slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackChannel {
    owner: Option<CandidateId>,
    offset: f64,
}

impl FeedbackChannel {
    /// Hands the channel to `owner` (or to nobody) and resets the offset.
    pub fn activate(&mut self, owner: Option<CandidateId>) {
        self.owner = owner;
        self.offset = 0.0;
    }

    /// Stores `offset` if `writer` owns the channel.
    pub fn write(&mut self, writer: &CandidateId, offset: f64) -> bool {
        if self.owner.as_ref() != Some(writer) {
            tracing::trace!(writer = %writer, owner = ?self.owner, "dropping offset from non-owner");
            return false;
        }
        self.offset = offset;
        true
    }

    #[must_use]
    pub const fn owner(&self) -> Option<&CandidateId> {
        self.owner.as_ref()
    }

    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Control button styling for the stored offset.
    #[must_use]
    pub fn feedback(&self) -> ControlFeedback {
        ControlFeedback::at(self.offset)
    }
}
