//! Recording adapter for the `FileHost` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::adapters::port_names::FILE_HOST;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::file_host::{FileHost, UploadReceipt, UploadRequest};
use crate::ports::PortFuture;

/// Records uploads (metadata only, not the file) while delegating to an inner host.
pub struct RecordingFileHost {
    inner: Box<dyn FileHost>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileHost {
    /// Wrap `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn FileHost>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl FileHost for RecordingFileHost {
    fn upload(&self, request: &UploadRequest) -> PortFuture<'_, UploadReceipt> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);
        Box::pin(async move {
            let result = self.inner.upload(&request).await;
            record_result(&recorder, FILE_HOST, "upload", &request, &result);
            result
        })
    }
}
