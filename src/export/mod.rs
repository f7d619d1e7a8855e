//! Shortlist export.
//!
//! Adapters turn the liked cards into a link another app can open. Building
//! a link never has side effects; opening it is left to the caller.
//!
//! - [`adapter`]: [`ExportAdapter`] trait and [`ShareRequest`]
//! - [`whatsapp`]: WhatsApp `send` link
//! - [`email`]: `mailto:` link

pub mod adapter;
pub mod email;
pub mod whatsapp;

pub use adapter::{ExportAdapter, ShareRequest, ShortlistEntry};
pub use email::EmailAdapter;
pub use whatsapp::WhatsAppAdapter;

/// Default WhatsApp destination.
pub const DEFAULT_WHATSAPP_PHONE: &str = "393516274752";

/// Default e-mail destination.
pub const DEFAULT_EMAIL_RECIPIENT: &str = "assessoria@vivendoafundo.com.br";

/// Default site linked at the end of every message.
pub const DEFAULT_SITE_URL: &str = "https://vivendoafundo.com.br";

/// Channel a shortlist is shared through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    WhatsApp,
    Email,
}

impl ShareTarget {
    /// Parses a channel name (`whatsapp`, `email`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "whatsapp" | "wa" => Some(Self::WhatsApp),
            "email" | "mail" => Some(Self::Email),
            _ => None,
        }
    }
}
