//! Replaying adapter for the `FontSource` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::adapters::port_names::FONT_SOURCE;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::font_source::{FontFile, FontRequest, FontSource};
use crate::ports::PortFuture;

/// Serves a recorded font download from a cassette.
pub struct ReplayingFontSource {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingFontSource {
    /// Create a source backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl FontSource for ReplayingFontSource {
    fn fetch(&self, _request: &FontRequest) -> PortFuture<'_, FontFile> {
        let output = next_output(&self.replayer, FONT_SOURCE, "fetch");
        Box::pin(async move { replay_result(output) })
    }
}
