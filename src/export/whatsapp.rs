//! WhatsApp share link.

use crate::domain::ExportError;
use crate::export::adapter::{ExportAdapter, ShareRequest};

const SEND_URL: &str = "https://api.whatsapp.com/send";

/// Builds `api.whatsapp.com/send` links with a formatted shortlist message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppAdapter {
    /// Destination number in international format, digits only.
    pub phone: String,
    /// Site linked in the message footer.
    pub site_url: String,
}

impl WhatsAppAdapter {
    pub fn new(phone: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            site_url: site_url.into(),
        }
    }

    /// Message body with WhatsApp bold markers.
    #[must_use]
    pub fn message(&self, request: &ShareRequest) -> String {
        let items: Vec<String> = request
            .entries
            .iter()
            .map(|entry| format!("🏛️ *{}*\n   📍 {}\n", entry.name, entry.location))
            .collect();

        format!(
            "🇮🇹 *Match Universitário - {full}* 🇮🇹\n\n\
             Ciao! Me chamo {first}, explorei as opções e estas são as universidades que deram match comigo. \
             *Gostaria de receber mais informações sobre elas e como começar meu processo:*\n\n\
             {items}\n\
             💬 *Você pode me ajudar com mais detalhes sobre essas opções?*\n\
             🔗 Descubra seu match em: {site}",
            full = request.user.full_name(),
            first = request.user.greeting_name(),
            items = items.join("\n"),
            site = self.site_url,
        )
    }
}

impl ExportAdapter for WhatsAppAdapter {
    fn channel(&self) -> &'static str {
        "whatsapp"
    }

    fn share_link(&self, request: &ShareRequest) -> Result<String, ExportError> {
        request.ensure_not_empty()?;
        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(ExportError::MissingRecipient(self.channel()));
        }
        Ok(format!(
            "{SEND_URL}?phone={}&text={}",
            urlencoding::encode(phone),
            urlencoding::encode(&self.message(request))
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserProfile;
    use crate::export::adapter::ShortlistEntry;

    fn request() -> ShareRequest {
        ShareRequest {
            entries: vec![
                ShortlistEntry {
                    name: "Sapienza".to_string(),
                    location: "Roma".to_string(),
                },
                ShortlistEntry {
                    name: "UniBo".to_string(),
                    location: "Bologna".to_string(),
                },
            ],
            user: UserProfile::new("Ana", "Souza"),
        }
    }

    #[test]
    fn message_lists_entries_in_order() {
        let adapter = WhatsAppAdapter::new("393516274752", "https://example.org");
        let message = adapter.message(&request());

        assert!(message.starts_with("🇮🇹 *Match Universitário - Ana Souza* 🇮🇹\n\nCiao! Me chamo Ana,"));
        assert!(message.contains("🏛️ *Sapienza*\n   📍 Roma\n\n🏛️ *UniBo*\n   📍 Bologna\n\n💬"));
        assert!(message.ends_with("Descubra seu match em: https://example.org"));
    }

    #[test]
    fn link_encodes_message_and_phone() {
        let adapter = WhatsAppAdapter::new("393516274752", "https://example.org");
        let link = adapter.share_link(&request()).unwrap();

        assert!(link.starts_with("https://api.whatsapp.com/send?phone=393516274752&text="));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }

    #[test]
    fn empty_shortlist_disables_sharing() {
        let adapter = WhatsAppAdapter::new("1", "https://example.org");
        let empty = ShareRequest {
            entries: Vec::new(),
            user: UserProfile::default(),
        };
        assert_eq!(adapter.share_link(&empty), Err(ExportError::EmptyShortlist));
    }

    #[test]
    fn blank_phone_is_rejected() {
        let adapter = WhatsAppAdapter::new("  ", "https://example.org");
        assert_eq!(
            adapter.share_link(&request()),
            Err(ExportError::MissingRecipient("whatsapp"))
        );
    }
}
