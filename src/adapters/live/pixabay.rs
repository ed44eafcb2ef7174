//! Live adapter for the Pixabay image search API.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;

use super::expect_success;
use crate::error::{truncate, PostError};
use crate::ports::photo_library::{
    DownloadRequest, DownloadedPhoto, PhotoHit, PhotoLibrary, PhotoQuery,
};
use crate::ports::PortFuture;

const PIXABAY_API_URL: &str = "https://pixabay.com/api/";

/// Pixabay rejects pages smaller than this.
const MIN_PER_PAGE: u32 = 3;

/// Searches Pixabay for portrait photos.
pub struct Pixabay {
    client: Client,
    api_key: String,
}

impl Pixabay {
    /// Create an adapter with the given client and API key.
    #[must_use]
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

impl PhotoLibrary for Pixabay {
    fn search(&self, query: &PhotoQuery) -> PortFuture<'_, Vec<PhotoHit>> {
        let query = query.clone();
        Box::pin(async move {
            let per_page = query.per_page.max(MIN_PER_PAGE).to_string();
            let response = self
                .client
                .get(PIXABAY_API_URL)
                .query(&[
                    ("key", self.api_key.as_str()),
                    ("q", query.query.as_str()),
                    ("image_type", "photo"),
                    ("orientation", "vertical"),
                    ("safesearch", "true"),
                    ("per_page", per_page.as_str()),
                ])
                .timeout(query.timeout)
                .send()
                .await?;
            let body = expect_success(response).await?;
            parse_hits(&body)
        })
    }

    fn download(&self, request: &DownloadRequest) -> PortFuture<'_, DownloadedPhoto> {
        let request = request.clone();
        Box::pin(async move {
            let response = self.client.get(&request.url).timeout(request.timeout).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(PostError::Api {
                    status: status.as_u16(),
                    message: format!("download of {} failed", request.url),
                });
            }
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let data = response.bytes().await?.to_vec();
            Ok(DownloadedPhoto { data, content_type })
        })
    }
}

fn parse_hits(body: &str) -> Result<Vec<PhotoHit>, PostError> {
    let parsed: PixabayResponse = serde_json::from_str(body).map_err(|e| {
        PostError::UnexpectedResponse(format!("search body {}: {e}", truncate(body, 200)))
    })?;
    Ok(parsed
        .hits
        .into_iter()
        .filter_map(|hit| hit.large_image_url.or(hit.webformat_url))
        .map(|url| PhotoHit { url })
        .collect())
}

// --- Pixabay API response types ---

#[derive(Deserialize)]
struct PixabayResponse {
    #[serde(default)]
    hits: Vec<PixabayHit>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PixabayHit {
    #[serde(rename = "largeImageURL")]
    large_image_url: Option<String>,
    #[serde(rename = "webformatURL")]
    webformat_url: Option<String>,
}
