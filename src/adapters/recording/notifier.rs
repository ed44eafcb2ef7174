//! Recording adapter for `Notifier` sinks. Each sink records under its own name.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::notifier::{Announcement, Notifier};
use crate::ports::PortFuture;

/// Records deliveries while delegating to an inner sink.
pub struct RecordingNotifier {
    inner: Box<dyn Notifier>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingNotifier {
    /// Wrap `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn Notifier>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn notify(&self, announcement: &Announcement) -> PortFuture<'_, ()> {
        let announcement = announcement.clone();
        let recorder = Arc::clone(&self.recorder);
        Box::pin(async move {
            let result = self.inner.notify(&announcement).await;
            record_result(&recorder, self.inner.name(), "notify", &announcement, &result);
            result
        })
    }
}
