//! Notifier port for sinks that announce a published post.

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// The message every sink receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Public URL of the uploaded image.
    pub url: String,
    /// Caption text.
    pub caption: String,
}

/// A notification destination (chat bot, webhook).
pub trait Notifier: Send + Sync {
    /// Short name used in logs and cassettes.
    fn name(&self) -> &str;

    /// Deliver the announcement.
    fn notify(&self, announcement: &Announcement) -> PortFuture<'_, ()>;
}
