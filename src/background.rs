//! Background acquisition with a solid-colour fallback.
//!
//! Nothing here fails the run: a missing key, a failed search, and every
//! bad candidate all end in [`Background::solid`].

use std::time::Duration;

use image::{DynamicImage, Rgb, RgbImage};

use crate::compose::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::ports::photo_library::{DownloadRequest, PhotoLibrary, PhotoQuery};

/// Dark grey used when no photo could be obtained.
pub const FALLBACK_COLOR: Rgb<u8> = Rgb([30, 30, 30]);

/// Candidates requested per search.
pub const CANDIDATES_PER_PAGE: u32 = 5;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Where a background came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundSource {
    /// A downloaded photo.
    Photo {
        /// Download URL.
        url: String,
    },
    /// The plain fallback canvas.
    SolidFallback,
}

/// A decoded background image and its provenance.
#[derive(Debug, Clone)]
pub struct Background {
    /// The image, at whatever size it arrived.
    pub image: DynamicImage,
    /// Where it came from.
    pub source: BackgroundSource,
}

impl Background {
    /// The fallback canvas at post size.
    #[must_use]
    pub fn solid() -> Self {
        Self {
            image: DynamicImage::ImageRgb8(RgbImage::from_pixel(
                CANVAS_WIDTH,
                CANVAS_HEIGHT,
                FALLBACK_COLOR,
            )),
            source: BackgroundSource::SolidFallback,
        }
    }
}

/// Search `library` for `query` and adopt the first candidate that downloads and decodes.
///
/// `library` is `None` when no search key is configured.
pub async fn acquire(library: Option<&dyn PhotoLibrary>, query: &str) -> Background {
    let Some(library) = library else {
        tracing::info!("no photo search configured, using solid background");
        return Background::solid();
    };

    let search = PhotoQuery {
        query: query.to_string(),
        per_page: CANDIDATES_PER_PAGE,
        timeout: SEARCH_TIMEOUT,
    };
    let hits = match library.search(&search).await {
        Ok(hits) => hits,
        Err(e) => {
            tracing::warn!(query, "photo search failed: {e}");
            return Background::solid();
        }
    };
    if hits.is_empty() {
        tracing::warn!(query, "photo search returned no candidates");
        return Background::solid();
    }

    for (i, hit) in hits.iter().enumerate() {
        let request = DownloadRequest { url: hit.url.clone(), timeout: DOWNLOAD_TIMEOUT };
        let photo = match library.download(&request).await {
            Ok(photo) => photo,
            Err(e) => {
                tracing::warn!(candidate = i + 1, url = %hit.url, "download failed: {e}");
                continue;
            }
        };
        match image::load_from_memory(&photo.data) {
            Ok(image) if image.width() > 0 && image.height() > 0 => {
                tracing::info!(
                    url = %hit.url,
                    width = image.width(),
                    height = image.height(),
                    "background acquired"
                );
                return Background { image, source: BackgroundSource::Photo { url: hit.url.clone() } };
            }
            Ok(_) => tracing::warn!(candidate = i + 1, url = %hit.url, "empty image"),
            Err(e) => tracing::warn!(candidate = i + 1, url = %hit.url, "not a usable image: {e}"),
        }
    }

    tracing::warn!(candidates = hits.len(), "no candidate decoded, using solid background");
    Background::solid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{png_bytes, ScriptedPhotos};

    fn assert_solid(background: &Background) {
        assert_eq!(background.source, BackgroundSource::SolidFallback);
        let rgb = background.image.to_rgb8();
        assert_eq!(rgb.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert!(rgb.pixels().all(|p| *p == FALLBACK_COLOR));
    }

    #[tokio::test]
    async fn no_library_means_solid() {
        assert_solid(&acquire(None, "nature").await);
    }

    #[tokio::test]
    async fn zero_hits_means_solid() {
        let photos = ScriptedPhotos::new(Ok(vec![]));
        assert_solid(&acquire(Some(&photos), "nature").await);
        assert!(photos.downloaded().is_empty());
    }

    #[tokio::test]
    async fn search_error_means_solid() {
        let photos = ScriptedPhotos::new(Err("[ERROR 400] Invalid or missing API key"));
        assert_solid(&acquire(Some(&photos), "nature").await);
    }

    #[tokio::test]
    async fn first_decodable_candidate_wins() {
        let photos = ScriptedPhotos::new(Ok(vec!["https://a", "https://b", "https://c", "https://d"]))
            .with_download("https://a", Err("connection reset"))
            .with_download("https://b", Ok(b"<html>not an image</html>".to_vec()))
            .with_download("https://c", Ok(png_bytes(40, 30, [200, 10, 10])))
            .with_download("https://d", Ok(png_bytes(10, 10, [0, 0, 200])));

        let background = acquire(Some(&photos), "nature").await;
        assert_eq!(background.source, BackgroundSource::Photo { url: "https://c".into() });
        assert_eq!(background.image.width(), 40);
        assert_eq!(photos.downloaded(), ["https://a", "https://b", "https://c"]);
    }

    #[tokio::test]
    async fn all_candidates_bad_means_solid() {
        let photos = ScriptedPhotos::new(Ok(vec!["https://a", "https://b"]))
            .with_download("https://a", Ok(vec![0, 1, 2, 3]))
            .with_download("https://b", Err("timeout"));

        assert_solid(&acquire(Some(&photos), "nature").await);
        assert_eq!(photos.downloaded().len(), 2);
    }
}
