//! E-mail share link.

use crate::domain::ExportError;
use crate::export::adapter::{ExportAdapter, ShareRequest};

/// Builds `mailto:` links with a subject and plain-text shortlist body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAdapter {
    pub recipient: String,
    pub site_url: String,
}

impl EmailAdapter {
    pub fn new(recipient: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            site_url: site_url.into(),
        }
    }

    #[must_use]
    pub fn subject(&self, request: &ShareRequest) -> String {
        format!("Meu Match Universitário - {}", request.user.full_name())
    }

    #[must_use]
    pub fn body(&self, request: &ShareRequest) -> String {
        let items: Vec<String> = request
            .entries
            .iter()
            .map(|entry| format!("🏛️ {}\n   📍 {}\n", entry.name, entry.location))
            .collect();

        format!(
            "Ciao! Me chamo {first}, explorei as opções e estas são as universidades que deram match comigo.\n\n\
             Gostaria de receber mais informações sobre elas e como começar meu processo:\n\n\
             {items}\n\n\
             Você pode me ajudar com mais detalhes sobre essas opções?\n\n\
             🔗 Descubra seu match em: {site}",
            first = request.user.greeting_name(),
            items = items.join("\n"),
            site = self.site_url,
        )
    }
}

impl ExportAdapter for EmailAdapter {
    fn channel(&self) -> &'static str {
        "email"
    }

    fn share_link(&self, request: &ShareRequest) -> Result<String, ExportError> {
        request.ensure_not_empty()?;
        let recipient = self.recipient.trim();
        if recipient.is_empty() {
            return Err(ExportError::MissingRecipient(self.channel()));
        }
        Ok(format!(
            "mailto:{recipient}?subject={}&body={}",
            urlencoding::encode(&self.subject(request)),
            urlencoding::encode(&self.body(request))
        ))
    }
}
