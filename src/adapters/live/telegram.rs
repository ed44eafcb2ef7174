//! Live adapter for the Telegram Bot API `sendPhoto` method.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::PostError;
use crate::ports::notifier::{Announcement, Notifier};
use crate::ports::PortFuture;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts the image URL to a Telegram chat.
pub struct TelegramBot {
    client: Client,
    token: String,
    chat_id: String,
}

impl TelegramBot {
    /// Create a bot for the given token and destination chat.
    #[must_use]
    pub fn new(client: Client, token: String, chat_id: String) -> Self {
        Self { client, token, chat_id }
    }
}

impl Notifier for TelegramBot {
    fn name(&self) -> &str {
        "telegram"
    }

    fn notify(&self, announcement: &Announcement) -> PortFuture<'_, ()> {
        let announcement = announcement.clone();
        Box::pin(async move {
            let url = format!("{TELEGRAM_API_BASE}/bot{}/sendPhoto", self.token);
            let body = serde_json::json!({
                "chat_id": self.chat_id,
                "photo": announcement.url,
                "caption": announcement.caption,
            });

            let response =
                self.client.post(&url).json(&body).timeout(SEND_TIMEOUT).send().await?;
            let status = response.status();
            let text = response.text().await?;
            check_reply(status.as_u16(), &text)
        })
    }
}

/// Telegram reports failures as `{"ok": false, "description": ...}`, sometimes with a 200.
fn check_reply(status: u16, body: &str) -> Result<(), PostError> {
    match serde_json::from_str::<TelegramReply>(body) {
        Ok(reply) if reply.ok => Ok(()),
        Ok(reply) => Err(PostError::Api {
            status,
            message: reply.description.unwrap_or_else(|| "request rejected".into()),
        }),
        Err(_) => Err(PostError::api(status, body)),
    }
}

// --- Telegram API response types ---

#[derive(Deserialize)]
struct TelegramReply {
    ok: bool,
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_reply() {
        assert!(check_reply(200, r#"{"ok":true,"result":{"message_id":7}}"#).is_ok());
    }

    #[test]
    fn rejected_reply_keeps_description() {
        let err =
            check_reply(400, r#"{"ok":false,"error_code":400,"description":"chat not found"}"#)
                .unwrap_err();
        assert_eq!(err.to_string(), "API error (400): chat not found");
    }

    #[test]
    fn non_json_reply() {
        assert!(matches!(check_reply(502, "Bad Gateway"), Err(PostError::Api { status: 502, .. })));
    }
}
