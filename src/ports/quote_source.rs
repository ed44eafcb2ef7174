//! Quote source port for random-quote APIs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::PortFuture;

/// A request for one random quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Per-request timeout.
    pub timeout: Duration,
}

/// A quote as reported by the source. Only `text` is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote itself, without surrounding quotation marks.
    pub text: String,
    /// Attribution reported by the source, if any.
    #[serde(default)]
    pub author: Option<String>,
}

/// Produces random quotes.
pub trait QuoteSource: Send + Sync {
    /// Fetch one random quote.
    fn random_quote(&self, request: &QuoteRequest) -> PortFuture<'_, Quote>;
}
