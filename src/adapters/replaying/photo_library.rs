//! Replaying adapter for the `PhotoLibrary` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::adapters::port_names::PHOTO_LIBRARY;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::photo_library::{
    DownloadRequest, DownloadedPhoto, PhotoHit, PhotoLibrary, PhotoQuery,
};
use crate::ports::PortFuture;

/// Serves recorded search results and downloads from a cassette.
pub struct ReplayingPhotoLibrary {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingPhotoLibrary {
    /// Create a library backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl PhotoLibrary for ReplayingPhotoLibrary {
    fn search(&self, _query: &PhotoQuery) -> PortFuture<'_, Vec<PhotoHit>> {
        let output = next_output(&self.replayer, PHOTO_LIBRARY, "search");
        Box::pin(async move { replay_result(output) })
    }

    fn download(&self, _request: &DownloadRequest) -> PortFuture<'_, DownloadedPhoto> {
        let output = next_output(&self.replayer, PHOTO_LIBRARY, "download");
        Box::pin(async move { replay_result(output) })
    }
}
