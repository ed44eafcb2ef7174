//! Font source port for downloading the post typeface.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{base64_bytes, PortFuture};

/// A request for the font file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontRequest {
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Raw font file bytes (TTF/OTF).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontFile {
    /// File contents.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Supplies the scalable font used for text.
pub trait FontSource: Send + Sync {
    /// Fetch the font file.
    fn fetch(&self, request: &FontRequest) -> PortFuture<'_, FontFile>;
}
