//! Quote selection against the history log.

use std::time::Duration;

use thiserror::Error;

use crate::error::PostError;
use crate::history::normalize;
use crate::ports::quote_source::{QuoteRequest, QuoteSource};
use crate::retry::RetryPolicy;

/// Five tries, five seconds each.
pub const QUOTE_POLICY: RetryPolicy = RetryPolicy::new(5, Duration::from_secs(5));

/// The quote chosen for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedQuote {
    /// Normalized quote text, as it will be recorded in history.
    pub text: String,
    /// Attribution reported by the source.
    pub author: Option<String>,
    /// Whether the configured default was used because no fresh quote arrived.
    pub is_default: bool,
}

/// Why a single attempt did not produce a usable quote.
#[derive(Debug, Error)]
enum Rejection {
    #[error("already posted: {0:?}")]
    Duplicate(String),
    #[error("source returned an empty quote")]
    Empty,
    #[error(transparent)]
    Source(#[from] PostError),
}

/// Pick a quote for which `is_used` is false, or fall back to `default_quote`.
///
/// Quotes are [`normalize`]d before the check, and the normalized text is what
/// gets returned and later recorded. Duplicates, empty quotes, and source
/// errors each consume one attempt.
pub async fn select_quote<F>(
    source: &dyn QuoteSource,
    is_used: F,
    default_quote: &str,
    policy: RetryPolicy,
) -> SelectedQuote
where
    F: Fn(&str) -> bool,
{
    let fallback =
        SelectedQuote { text: normalize(default_quote), author: None, is_default: true };

    let selected = policy
        .run_or("quote fetch", fallback, |attempt| {
            let request = QuoteRequest { timeout: attempt.timeout };
            let is_used = &is_used;
            async move {
                let quote = source.random_quote(&request).await?;
                let text = normalize(&quote.text);
                if text.is_empty() {
                    return Err(Rejection::Empty);
                }
                if is_used(&text) {
                    return Err(Rejection::Duplicate(text));
                }
                Ok(SelectedQuote { text, author: quote.author, is_default: false })
            }
        })
        .await;

    if selected.is_default {
        tracing::warn!(attempts = policy.attempts(), "no fresh quote available, using the default");
    } else {
        tracing::info!(quote = %selected.text, "selected quote");
    }
    selected
}
