//! Contact form submissions forwarded to the site owner's chat.

use serde::Deserialize;

use crate::error::CoreError;
use crate::render::escape_html;
use crate::types::Timestamp;

/// Placeholder used when the visitor left the question blank.
pub const EMPTY_MESSAGE: &str = "—";

/// Body of `POST /api/send-form`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl ContactRequest {
    /// Name and phone are required.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() || self.phone.trim().is_empty() {
            return Err(CoreError::Validation(
                "Name and phone are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the chat message. Uses Telegram's HTML parse mode, so every
    /// visitor-supplied value is escaped.
    pub fn format_message(&self, received_at: Timestamp) -> String {
        let message = self.message.trim();
        let message = if message.is_empty() {
            EMPTY_MESSAGE
        } else {
            message
        };
        format!(
            "📩 <b>New request from the website</b>\n\n\
             👤 <b>Name:</b> {}\n\
             📞 <b>Phone:</b> <code>{}</code>\n\
             💬 <b>Message:</b> {}\n\n\
             <i>Received:</i> {}",
            escape_html(self.name.trim()),
            escape_html(self.phone.trim()),
            escape_html(message),
            received_at.format("%d.%m.%Y %H:%M"),
        )
    }
}
