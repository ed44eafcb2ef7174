//! Recording adapter for the `PhotoLibrary` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::adapters::port_names::PHOTO_LIBRARY;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::photo_library::{
    DownloadRequest, DownloadedPhoto, PhotoHit, PhotoLibrary, PhotoQuery,
};
use crate::ports::PortFuture;

/// Records searches and downloads while delegating to an inner library.
pub struct RecordingPhotoLibrary {
    inner: Box<dyn PhotoLibrary>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingPhotoLibrary {
    /// Wrap `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn PhotoLibrary>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl PhotoLibrary for RecordingPhotoLibrary {
    fn search(&self, query: &PhotoQuery) -> PortFuture<'_, Vec<PhotoHit>> {
        let query = query.clone();
        let recorder = Arc::clone(&self.recorder);
        Box::pin(async move {
            let result = self.inner.search(&query).await;
            record_result(&recorder, PHOTO_LIBRARY, "search", &query, &result);
            result
        })
    }

    fn download(&self, request: &DownloadRequest) -> PortFuture<'_, DownloadedPhoto> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);
        Box::pin(async move {
            let result = self.inner.download(&request).await;
            record_result(&recorder, PHOTO_LIBRARY, "download", &request, &result);
            result
        })
    }
}
