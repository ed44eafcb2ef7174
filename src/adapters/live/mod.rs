//! Live adapters that talk to the real services over HTTP.

pub mod catbox;
pub mod google_fonts;
pub mod pixabay;
pub mod telegram;
pub mod webhook;
pub mod zenquotes;

use reqwest::Client;

use crate::error::PostError;

/// Build the HTTP client shared by every live adapter.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn http_client() -> Result<Client, PostError> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(PostError::Network)
}

/// Read a response body, turning non-2xx statuses into [`PostError::Api`].
pub(crate) async fn expect_success(response: reqwest::Response) -> Result<String, PostError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        Ok(text)
    } else {
        Err(PostError::api(status.as_u16(), &text))
    }
}
