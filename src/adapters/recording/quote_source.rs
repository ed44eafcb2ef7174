//! Recording adapter for the `QuoteSource` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::adapters::port_names::QUOTE_SOURCE;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::quote_source::{Quote, QuoteRequest, QuoteSource};
use crate::ports::PortFuture;

/// Records quote fetches while delegating to an inner source.
pub struct RecordingQuoteSource {
    inner: Box<dyn QuoteSource>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingQuoteSource {
    /// Wrap `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn QuoteSource>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl QuoteSource for RecordingQuoteSource {
    fn random_quote(&self, request: &QuoteRequest) -> PortFuture<'_, Quote> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);
        Box::pin(async move {
            let result = self.inner.random_quote(&request).await;
            record_result(&recorder, QUOTE_SOURCE, "random_quote", &request, &result);
            result
        })
    }
}
