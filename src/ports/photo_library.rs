//! Photo library port: search for candidate backgrounds and download them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{base64_bytes, PortFuture};

/// A photo search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoQuery {
    /// Free-text search terms.
    pub query: String,
    /// Page size.
    pub per_page: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoHit {
    /// Where to download the image from.
    pub url: String,
}

/// A request to download one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Image URL.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Raw bytes of a downloaded candidate. Not yet known to be a valid image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadedPhoto {
    /// Response body.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// `Content-Type` reported by the server.
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Searches a stock photo service.
pub trait PhotoLibrary: Send + Sync {
    /// Return candidate photos for a query, best first.
    fn search(&self, query: &PhotoQuery) -> PortFuture<'_, Vec<PhotoHit>>;

    /// Download one candidate.
    fn download(&self, request: &DownloadRequest) -> PortFuture<'_, DownloadedPhoto>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downloaded_photo_bytes_are_base64_in_json() {
        let photo = DownloadedPhoto { data: vec![0xFF, 0xD8, 0xFF], content_type: None };
        let json = serde_json::to_value(&photo).unwrap();
        assert_eq!(json["data"], "/9j/");
        let back: DownloadedPhoto = serde_json::from_value(json).unwrap();
        assert_eq!(back.data, vec![0xFF, 0xD8, 0xFF]);
    }
}
