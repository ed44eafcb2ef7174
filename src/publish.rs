//! Upload of the composed artifact and fan-out to notification sinks.

use std::path::Path;
use std::time::Duration;

use crate::error::{truncate, PostError};
use crate::ports::file_host::{FileHost, UploadRequest};
use crate::ports::notifier::{Announcement, Notifier};
use crate::retry::RetryPolicy;

/// Three tries at 25, 35, then 45 seconds.
pub const UPLOAD_POLICY: RetryPolicy =
    RetryPolicy::new(3, Duration::from_secs(25)).with_timeout_step(Duration::from_secs(10));

/// Pull the public URL out of an upload response body.
///
/// Only bodies containing an `http`-prefixed run of text count; the URL ends
/// at the first whitespace.
#[must_use]
pub fn extract_url(body: &str) -> Option<String> {
    let start = body.find("http")?;
    let url: String = body[start..].chars().take_while(|c| !c.is_whitespace()).collect();
    Some(url)
}

/// Upload the file at `path`, retrying per `policy`, and return its public URL.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or the last attempt's error
/// once every attempt failed or answered without a URL.
pub async fn upload(
    host: &dyn FileHost,
    path: &Path,
    policy: RetryPolicy,
) -> Result<String, PostError> {
    let data = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map_or_else(|| "post.jpg".to_string(), |n| n.to_string_lossy().into_owned());
    tracing::debug!(file = %path.display(), bytes = data.len(), "uploading");

    policy
        .run("upload", |attempt| {
            let request = UploadRequest {
                file_name: file_name.clone(),
                mime_type: "image/jpeg".to_string(),
                data: data.clone(),
                timeout: attempt.timeout,
            };
            async move {
                let receipt = host.upload(&request).await?;
                extract_url(&receipt.body).ok_or_else(|| {
                    PostError::UnexpectedResponse(format!(
                        "upload rejected: {}",
                        truncate(receipt.body.trim(), 200)
                    ))
                })
            }
        })
        .await
}

/// What happened at each sink.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NotifyReport {
    /// Sinks that accepted the announcement.
    pub delivered: Vec<String>,
    /// Sinks that failed, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Send `announcement` to every sink in order. A failing sink does not stop the rest.
pub async fn notify(sinks: &[Box<dyn Notifier>], announcement: &Announcement) -> NotifyReport {
    let mut report = NotifyReport::default();
    for sink in sinks {
        match sink.notify(announcement).await {
            Ok(()) => {
                tracing::info!(sink = sink.name(), "announcement delivered");
                report.delivered.push(sink.name().to_string());
            }
            Err(e) => {
                tracing::warn!(sink = sink.name(), "announcement failed: {e}");
                report.failed.push((sink.name().to_string(), e.to_string()));
            }
        }
    }
    report
}
