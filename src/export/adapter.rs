//! Export adapter abstraction and the request it consumes.

use crate::domain::{ExportError, UserProfile};
use crate::engine::PresentedCandidate;

/// One shortlisted candidate as it appears in an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortlistEntry {
    pub name: String,
    pub location: String,
}

/// Everything an adapter needs to build a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    /// Shortlist in decision order.
    pub entries: Vec<ShortlistEntry>,
    pub user: UserProfile,
}

impl ShareRequest {
    /// Builds a request from the liked cards of a deck.
    #[must_use]
    pub fn from_liked(liked: &[PresentedCandidate], user: &UserProfile) -> Self {
        Self {
            entries: liked
                .iter()
                .map(|card| ShortlistEntry {
                    name: card.candidate.name.clone(),
                    location: card.candidate.location.clone(),
                })
                .collect(),
            user: user.clone(),
        }
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<(), ExportError> {
        if self.entries.is_empty() {
            Err(ExportError::EmptyShortlist)
        } else {
            Ok(())
        }
    }
}

/// Turns a shortlist into a link an external app can open.
///
/// # Implementations
///
/// - [`WhatsAppAdapter`](crate::export::WhatsAppAdapter): `api.whatsapp.com/send` link
/// - [`EmailAdapter`](crate::export::EmailAdapter): `mailto:` link
pub trait ExportAdapter {
    /// Short channel name for logs.
    fn channel(&self) -> &'static str;

    /// Builds the share URI.
    ///
    /// # Errors
    ///
    /// - [`ExportError::EmptyShortlist`] when there is nothing to share
    /// - [`ExportError::MissingRecipient`] when the adapter has no destination
    fn share_link(&self, request: &ShareRequest) -> Result<String, ExportError>;
}
