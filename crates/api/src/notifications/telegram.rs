//! Telegram Bot API client used to forward contact form submissions.
//!
//! [`TelegramClient`] posts an HTML-formatted message to a single chat via
//! `sendMessage`. There is no retry: the visitor gets an error and can submit
//! the form again.

use std::time::Duration;

use serde::Deserialize;

use crate::config::TelegramConfig;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Bot API returned a non-2xx status code.
    #[error("Telegram returned HTTP {0}")]
    HttpStatus(u16),

    /// The Bot API answered `{"ok": false}`.
    #[error("Telegram rejected the message: {0}")]
    Rejected(String),
}

#[derive(Deserialize)]
struct BotReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

// ---------------------------------------------------------------------------
// TelegramClient
// ---------------------------------------------------------------------------

pub struct TelegramClient {
    client: reqwest::Client,
    send_url: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            send_url: format!("{}/bot{}/sendMessage", config.api_url, config.bot_token),
            chat_id: config.chat_id.clone(),
        }
    }

    /// Send `text` (Telegram HTML markup) to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let response = self
            .client
            .post(&self.send_url)
            .form(&[
                ("chat_id", self.chat_id.as_str()),
                ("text", text),
                ("parse_mode", "HTML"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TelegramError::HttpStatus(response.status().as_u16()));
        }

        let reply: BotReply = response.json().await?;
        if !reply.ok {
            return Err(TelegramError::Rejected(
                reply.description.unwrap_or_default(),
            ));
        }
        Ok(())
    }
}
