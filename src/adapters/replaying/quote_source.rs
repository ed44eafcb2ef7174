//! Replaying adapter for the `QuoteSource` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::adapters::port_names::QUOTE_SOURCE;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::quote_source::{Quote, QuoteRequest, QuoteSource};
use crate::ports::PortFuture;

/// Serves recorded quotes from a cassette.
pub struct ReplayingQuoteSource {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingQuoteSource {
    /// Create a source backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl QuoteSource for ReplayingQuoteSource {
    fn random_quote(&self, _request: &QuoteRequest) -> PortFuture<'_, Quote> {
        let output = next_output(&self.replayer, QUOTE_SOURCE, "random_quote");
        Box::pin(async move { replay_result(output) })
    }
}
