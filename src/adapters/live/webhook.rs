//! Live adapter for a generic JSON webhook (Discord-style `{content}` body).

use std::time::Duration;

use reqwest::Client;

use super::expect_success;
use crate::ports::notifier::{Announcement, Notifier};
use crate::ports::PortFuture;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Posts caption and URL to a webhook.
pub struct Webhook {
    client: Client,
    url: String,
}

impl Webhook {
    /// Create a webhook sink for the given URL.
    #[must_use]
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

/// Message body: caption, newline, URL.
#[must_use]
pub fn content(announcement: &Announcement) -> String {
    format!("{}\n{}", announcement.caption, announcement.url)
}

impl Notifier for Webhook {
    fn name(&self) -> &str {
        "webhook"
    }

    fn notify(&self, announcement: &Announcement) -> PortFuture<'_, ()> {
        let body = serde_json::json!({ "content": content(announcement) });
        Box::pin(async move {
            let response =
                self.client.post(&self.url).json(&body).timeout(SEND_TIMEOUT).send().await?;
            expect_success(response).await?;
            Ok(())
        })
    }
}
