//! Replaying adapter for the `FileHost` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::adapters::port_names::FILE_HOST;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::file_host::{FileHost, UploadReceipt, UploadRequest};
use crate::ports::PortFuture;

/// Serves recorded upload responses from a cassette.
pub struct ReplayingFileHost {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingFileHost {
    /// Create a host backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl FileHost for ReplayingFileHost {
    fn upload(&self, _request: &UploadRequest) -> PortFuture<'_, UploadReceipt> {
        let output = next_output(&self.replayer, FILE_HOST, "upload");
        Box::pin(async move { replay_result(output) })
    }
}
