//! Replaying adapter for `Notifier` sinks.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::notifier::{Announcement, Notifier};
use crate::ports::PortFuture;

/// Serves recorded deliveries for one named sink.
pub struct ReplayingNotifier {
    name: String,
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingNotifier {
    /// Create a sink called `name` backed by the given replayer.
    #[must_use]
    pub fn new(name: impl Into<String>, replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { name: name.into(), replayer }
    }
}

impl Notifier for ReplayingNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, _announcement: &Announcement) -> PortFuture<'_, ()> {
        let output = next_output(&self.replayer, &self.name, "notify");
        Box::pin(async move { replay_result(output) })
    }
}
