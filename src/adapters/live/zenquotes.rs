//! Live adapter for the `ZenQuotes` random quote API.

use reqwest::Client;
use serde::Deserialize;

use super::expect_success;
use crate::error::{truncate, PostError};
use crate::ports::quote_source::{Quote, QuoteRequest, QuoteSource};
use crate::ports::PortFuture;

const ZENQUOTES_RANDOM_URL: &str = "https://zenquotes.io/api/random";

/// `ZenQuotes` answers rate-limited calls with a normal-looking quote attributed to itself.
const RATE_LIMIT_AUTHOR: &str = "zenquotes.io";

/// Fetches quotes from `zenquotes.io`.
pub struct ZenQuotes {
    client: Client,
    url: String,
}

impl ZenQuotes {
    /// Create an adapter using the given client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client, url: ZENQUOTES_RANDOM_URL.to_string() }
    }
}

impl QuoteSource for ZenQuotes {
    fn random_quote(&self, request: &QuoteRequest) -> PortFuture<'_, Quote> {
        let timeout = request.timeout;
        Box::pin(async move {
            let response = self.client.get(&self.url).timeout(timeout).send().await?;
            let body = expect_success(response).await?;
            parse_random(&body)
        })
    }
}

/// Parse the single-element array `ZenQuotes` returns.
fn parse_random(body: &str) -> Result<Quote, PostError> {
    let items: Vec<ZenQuote> = serde_json::from_str(body).map_err(|e| {
        PostError::UnexpectedResponse(format!("quote body {}: {e}", truncate(body, 200)))
    })?;
    let first = items
        .into_iter()
        .next()
        .ok_or_else(|| PostError::UnexpectedResponse("empty quote list".into()))?;

    if first.a.as_deref() == Some(RATE_LIMIT_AUTHOR) {
        return Err(PostError::Api { status: 429, message: first.q });
    }
    Ok(Quote { text: first.q, author: first.a })
}

// --- ZenQuotes API response types ---

#[derive(Deserialize)]
struct ZenQuote {
    q: String,
    a: Option<String>,
}
