//! Live adapter that downloads Roboto Bold from the Google Fonts repository.

use reqwest::Client;

use crate::error::PostError;
use crate::ports::font_source::{FontFile, FontRequest, FontSource};
use crate::ports::PortFuture;

const ROBOTO_BOLD_URL: &str =
    "https://github.com/google/fonts/raw/main/apache/roboto/static/Roboto-Bold.ttf";

/// Downloads the post typeface.
pub struct GoogleFonts {
    client: Client,
}

impl GoogleFonts {
    /// Create an adapter using the given client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl FontSource for GoogleFonts {
    fn fetch(&self, request: &FontRequest) -> PortFuture<'_, FontFile> {
        let timeout = request.timeout;
        Box::pin(async move {
            let response = self.client.get(ROBOTO_BOLD_URL).timeout(timeout).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(PostError::Api {
                    status: status.as_u16(),
                    message: format!("font download from {ROBOTO_BOLD_URL} failed"),
                });
            }
            let data = response.bytes().await?.to_vec();
            Ok(FontFile { data })
        })
    }
}
