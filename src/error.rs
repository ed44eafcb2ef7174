//! Unified error type for quotecard.

use thiserror::Error;

/// Errors that can occur while building or publishing a post.
#[derive(Debug, Error)]
pub enum PostError {
    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// A response arrived but did not carry what we asked for.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A font file could not be loaded.
    #[error("Font error: {0}")]
    Font(String),

    /// Rendering the post image failed.
    #[error("Compose error: {0}")]
    Compose(String),

    /// The history log could not be read, locked, or appended.
    #[error("History error: {0}")]
    History(String),

    /// A recorded interaction replayed as an error.
    #[error("Replayed error: {0}")]
    Replay(String),
}

impl PostError {
    /// Build an [`PostError::Api`] from a status and a response body, truncating long bodies.
    #[must_use]
    pub fn api(status: u16, body: &str) -> Self {
        Self::Api { status, message: truncate(body, 500) }
    }
}

/// Truncate `text` to at most `max` bytes on a char boundary, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
