//! File host port for publishing the composed image.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// A file to upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// File name reported to the host.
    pub file_name: String,
    /// MIME type of `data`.
    pub mime_type: String,
    /// File contents. Not recorded in cassettes.
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// What the host answered. Whether this is a success is decided by the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Response body as text.
    pub body: String,
}

/// Anonymous public file hosting.
pub trait FileHost: Send + Sync {
    /// Upload one file.
    fn upload(&self, request: &UploadRequest) -> PortFuture<'_, UploadReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_request_does_not_serialize_payload() {
        let request = UploadRequest {
            file_name: "post.jpg".into(),
            mime_type: "image/jpeg".into(),
            data: vec![1, 2, 3],
            timeout: Duration::from_secs(25),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["file_name"], "post.jpg");
    }
}
