//! Recording adapter for the `FontSource` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::adapters::port_names::FONT_SOURCE;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::font_source::{FontFile, FontRequest, FontSource};
use crate::ports::PortFuture;

/// Records font downloads while delegating to an inner source.
pub struct RecordingFontSource {
    inner: Box<dyn FontSource>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFontSource {
    /// Wrap `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn FontSource>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl FontSource for RecordingFontSource {
    fn fetch(&self, request: &FontRequest) -> PortFuture<'_, FontFile> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);
        Box::pin(async move {
            let result = self.inner.fetch(&request).await;
            record_result(&recorder, FONT_SOURCE, "fetch", &request, &result);
            result
        })
    }
}
