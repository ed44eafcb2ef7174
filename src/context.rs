//! Service context that bundles all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::catbox::Catbox;
use crate::adapters::live::google_fonts::GoogleFonts;
use crate::adapters::live::http_client;
use crate::adapters::live::pixabay::Pixabay;
use crate::adapters::live::telegram::TelegramBot;
use crate::adapters::live::webhook::Webhook;
use crate::adapters::live::zenquotes::ZenQuotes;
use crate::adapters::recording::file_host::RecordingFileHost;
use crate::adapters::recording::font_source::RecordingFontSource;
use crate::adapters::recording::notifier::RecordingNotifier;
use crate::adapters::recording::photo_library::RecordingPhotoLibrary;
use crate::adapters::recording::quote_source::RecordingQuoteSource;
use crate::adapters::replaying::file_host::ReplayingFileHost;
use crate::adapters::replaying::font_source::ReplayingFontSource;
use crate::adapters::replaying::notifier::ReplayingNotifier;
use crate::adapters::replaying::photo_library::ReplayingPhotoLibrary;
use crate::adapters::replaying::quote_source::ReplayingQuoteSource;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Credentials;
use crate::error::PostError;
use crate::ports::{FileHost, FontSource, Notifier, PhotoLibrary, QuoteSource};

/// Sink names, shared by live adapters and cassettes.
const TELEGRAM_SINK: &str = "telegram";
const WEBHOOK_SINK: &str = "webhook";

/// Bundles all port trait objects into a single context.
///
/// Optional ports are `None` when their credentials are missing; sinks
/// without credentials are simply absent from `sinks`.
pub struct ServiceContext {
    /// Random quote source.
    pub quotes: Box<dyn QuoteSource>,
    /// Photo search, when a search key is configured.
    pub photos: Option<Box<dyn PhotoLibrary>>,
    /// Font download, when enabled.
    pub fonts: Option<Box<dyn FontSource>>,
    /// Public file host.
    pub host: Box<dyn FileHost>,
    /// Configured notification sinks, in delivery order.
    pub sinks: Vec<Box<dyn Notifier>>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// The context built alongside this session must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<std::path::PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context talking to the real services.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(credentials: &Credentials) -> Result<Self, PostError> {
        let client = http_client()?;

        let photos = credentials.pixabay_key.as_ref().map(|key| {
            Box::new(Pixabay::new(client.clone(), key.clone())) as Box<dyn PhotoLibrary>
        });

        let mut sinks: Vec<Box<dyn Notifier>> = Vec::new();
        if let Some((token, chat)) = credentials.telegram() {
            sinks.push(Box::new(TelegramBot::new(client.clone(), token.into(), chat.into())));
        }
        if let Some(url) = &credentials.webhook_url {
            sinks.push(Box::new(Webhook::new(client.clone(), url.clone())));
        }

        Ok(Self {
            quotes: Box::new(ZenQuotes::new(client.clone())),
            photos,
            fonts: Some(Box::new(GoogleFonts::new(client.clone()))),
            host: Box::new(Catbox::new(client)),
            sinks,
        })
    }

    /// Create a recording context that wraps every live adapter with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(credentials: &Credentials) -> Result<(Self, RecordingSession), PostError> {
        let live = Self::live(credentials)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = std::path::PathBuf::from(".quotecard/cassettes")
            .join(&timestamp)
            .join("run.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-run"),
            get_commit_hash(),
        )));
        let rec = || Arc::clone(&recorder);

        let ctx = Self {
            quotes: Box::new(RecordingQuoteSource::new(live.quotes, rec())),
            photos: live.photos.map(|inner| {
                Box::new(RecordingPhotoLibrary::new(inner, rec())) as Box<dyn PhotoLibrary>
            }),
            fonts: live.fonts.map(|inner| {
                Box::new(RecordingFontSource::new(inner, rec())) as Box<dyn FontSource>
            }),
            host: Box::new(RecordingFileHost::new(live.host, rec())),
            sinks: live
                .sinks
                .into_iter()
                .map(|inner| Box::new(RecordingNotifier::new(inner, rec())) as Box<dyn Notifier>)
                .collect(),
        };
        let session = RecordingSession { recorder };

        Ok((ctx, session))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// The same credentials decide which optional ports and sinks exist, so a
    /// cassette is replayed under the configuration it is meant to exercise.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path, credentials: &Credentials) -> Result<Self, PostError> {
        let replayer = load_cassette(path)
            .map_err(|e| PostError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        let rep = || Arc::clone(&replayer);

        let photos = credentials
            .pixabay_key
            .as_ref()
            .map(|_| Box::new(ReplayingPhotoLibrary::new(rep())) as Box<dyn PhotoLibrary>);

        let mut sinks: Vec<Box<dyn Notifier>> = Vec::new();
        if credentials.telegram().is_some() {
            sinks.push(Box::new(ReplayingNotifier::new(TELEGRAM_SINK, rep())));
        }
        if credentials.webhook_url.is_some() {
            sinks.push(Box::new(ReplayingNotifier::new(WEBHOOK_SINK, rep())));
        }

        Ok(Self {
            quotes: Box::new(ReplayingQuoteSource::new(rep())),
            photos,
            fonts: Some(Box::new(ReplayingFontSource::new(rep()))),
            host: Box::new(ReplayingFileHost::new(rep())),
            sinks,
        })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
