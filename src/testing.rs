//! In-memory port implementations for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::PostError;
use crate::ports::file_host::{FileHost, UploadReceipt, UploadRequest};
use crate::ports::font_source::{FontFile, FontRequest, FontSource};
use crate::ports::notifier::{Announcement, Notifier};
use crate::ports::photo_library::{
    DownloadRequest, DownloadedPhoto, PhotoHit, PhotoLibrary, PhotoQuery,
};
use crate::ports::quote_source::{Quote, QuoteRequest, QuoteSource};
use crate::ports::PortFuture;

fn scripted_error(message: &str) -> PostError {
    PostError::Replay(message.to_string())
}

/// Serves quotes (or errors) in order; errors once the script runs out.
pub struct ScriptedQuotes {
    script: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedQuotes {
    pub fn new<'a>(script: impl IntoIterator<Item = Result<&'a str, &'a str>>) -> Self {
        let script = script
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Self { script: Mutex::new(script), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QuoteSource for ScriptedQuotes {
    fn random_quote(&self, _request: &QuoteRequest) -> PortFuture<'_, Quote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        Box::pin(async move {
            match next {
                Some(Ok(text)) => Ok(Quote { text, author: None }),
                Some(Err(e)) => Err(scripted_error(&e)),
                None => Err(scripted_error("script exhausted")),
            }
        })
    }
}

/// A photo library with a fixed search result and per-URL download bodies.
pub struct ScriptedPhotos {
    pub search: Result<Vec<String>, String>,
    pub downloads: Vec<(String, Result<Vec<u8>, String>)>,
    pub downloaded: Mutex<Vec<String>>,
}

impl ScriptedPhotos {
    pub fn new(search: Result<Vec<&str>, &str>) -> Self {
        Self {
            search: search
                .map(|urls| urls.into_iter().map(str::to_string).collect())
                .map_err(str::to_string),
            downloads: Vec::new(),
            downloaded: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_download(mut self, url: &str, body: Result<Vec<u8>, &str>) -> Self {
        self.downloads.push((url.to_string(), body.map_err(str::to_string)));
        self
    }

    pub fn downloaded(&self) -> Vec<String> {
        self.downloaded.lock().unwrap().clone()
    }
}

impl PhotoLibrary for ScriptedPhotos {
    fn search(&self, _query: &PhotoQuery) -> PortFuture<'_, Vec<PhotoHit>> {
        let result = self
            .search
            .clone()
            .map(|urls| urls.into_iter().map(|url| PhotoHit { url }).collect())
            .map_err(|e| scripted_error(&e));
        Box::pin(async move { result })
    }

    fn download(&self, request: &DownloadRequest) -> PortFuture<'_, DownloadedPhoto> {
        self.downloaded.lock().unwrap().push(request.url.clone());
        let result = match self.downloads.iter().find(|(url, _)| *url == request.url) {
            Some((_, Ok(data))) => Ok(DownloadedPhoto { data: data.clone(), content_type: None }),
            Some((_, Err(e))) => Err(scripted_error(e)),
            None => Err(PostError::Api { status: 404, message: request.url.clone() }),
        };
        Box::pin(async move { result })
    }
}

/// A font source that returns fixed bytes or an error, counting calls.
pub struct StaticFont {
    pub result: Result<Vec<u8>, String>,
    pub calls: AtomicUsize,
}

impl StaticFont {
    pub fn new(result: Result<Vec<u8>, &str>) -> Self {
        Self { result: result.map_err(str::to_string), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FontSource for StaticFont {
    fn fetch(&self, _request: &FontRequest) -> PortFuture<'_, FontFile> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .result
            .clone()
            .map(|data| FontFile { data })
            .map_err(|e| scripted_error(&e));
        Box::pin(async move { result })
    }
}

/// A file host answering with scripted bodies (or errors) in order.
pub struct ScriptedHost {
    script: Mutex<VecDeque<Result<String, String>>>,
    pub uploads: Mutex<Vec<UploadRequest>>,
}

impl ScriptedHost {
    pub fn new<'a>(script: impl IntoIterator<Item = Result<&'a str, &'a str>>) -> Self {
        let script = script
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Self { script: Mutex::new(script), uploads: Mutex::new(Vec::new()) }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

impl FileHost for ScriptedHost {
    fn upload(&self, request: &UploadRequest) -> PortFuture<'_, UploadReceipt> {
        self.uploads.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front();
        Box::pin(async move {
            match next {
                Some(Ok(body)) => Ok(UploadReceipt { body }),
                Some(Err(e)) => Err(scripted_error(&e)),
                None => Err(scripted_error("script exhausted")),
            }
        })
    }
}

/// A sink that remembers what it was sent, optionally failing.
pub struct CollectingSink {
    name: String,
    fail: bool,
    received: Arc<Mutex<Vec<Announcement>>>,
}

impl CollectingSink {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), fail: false, received: Arc::default() }
    }

    pub fn failing(name: &str) -> Self {
        Self { fail: true, ..Self::new(name) }
    }

    /// Shared view of what was received, still readable after the sink is boxed away.
    pub fn inbox(&self) -> Arc<Mutex<Vec<Announcement>>> {
        Arc::clone(&self.received)
    }
}

impl Notifier for CollectingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, announcement: &Announcement) -> PortFuture<'_, ()> {
        self.received.lock().unwrap().push(announcement.clone());
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                Err(PostError::Api { status: 500, message: "sink down".into() })
            } else {
                Ok(())
            }
        })
    }
}

/// Encode a solid-colour image of the given size as PNG bytes.
pub fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}
