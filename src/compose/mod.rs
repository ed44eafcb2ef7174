//! Post image composition.
//!
//! The background is center-cropped to fill the frame, darkened, and the
//! quote block plus author line are drawn in white on top.

pub mod layout;
pub mod typeface;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};

use crate::error::PostError;

pub use typeface::Typeface;

/// Post width in pixels.
pub const CANVAS_WIDTH: u32 = 1080;
/// Post height in pixels.
pub const CANVAS_HEIGHT: u32 = 1350;
/// Opacity of the black layer laid over the background.
pub const OVERLAY_ALPHA: u8 = 140;
/// JPEG quality of the saved artifact.
pub const JPEG_QUALITY: u8 = 85;

const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Render the post: fitted and darkened background, wrapped quote, author line.
///
/// The quote text is wrapped in literal double quotes.
///
/// # Errors
///
/// Returns an error if the background has no pixels.
pub fn render(
    quote: &str,
    author: &str,
    background: &DynamicImage,
    typeface: &Typeface,
) -> Result<RgbImage, PostError> {
    let mut canvas = fit_background(background)?;
    darken(&mut canvas, OVERLAY_ALPHA);

    let quoted = format!("\"{quote}\"");
    let placed = layout::layout(typeface, &quoted, author, CANVAS_WIDTH, CANVAS_HEIGHT);
    tracing::debug!(
        lines = placed.lines.len(),
        quote_px = placed.quote_px,
        typeface = ?typeface,
        "quote laid out"
    );

    for line in &placed.lines {
        typeface.draw(&mut canvas, TEXT_COLOR, line.x, line.y, placed.quote_px, &line.text);
    }
    let author_line = &placed.author;
    typeface.draw(
        &mut canvas,
        TEXT_COLOR,
        author_line.x,
        author_line.y,
        layout::AUTHOR_PX,
        &author_line.text,
    );

    Ok(canvas)
}

/// Scale and center-crop `background` to exactly fill the canvas, keeping its aspect ratio.
///
/// # Errors
///
/// Returns an error if the background has zero width or height.
pub fn fit_background(background: &DynamicImage) -> Result<RgbImage, PostError> {
    if background.width() == 0 || background.height() == 0 {
        return Err(PostError::Compose("background has no pixels".into()));
    }
    Ok(background.resize_to_fill(CANVAS_WIDTH, CANVAS_HEIGHT, FilterType::Lanczos3).to_rgb8())
}

/// Composite black at `alpha` over every pixel.
pub fn darken(canvas: &mut RgbImage, alpha: u8) {
    let keep = u16::from(255 - alpha);
    for pixel in canvas.pixels_mut() {
        for channel in &mut pixel.0 {
            // (c * keep + 127) / 255 is at most 255
            #[allow(clippy::cast_possible_truncation)]
            let blended = ((u16::from(*channel) * keep + 127) / 255) as u8;
            *channel = blended;
        }
    }
}

/// Encode `canvas` as JPEG at `quality` and replace the file at `path`.
///
/// The image is written next to `path` first and renamed into place, so a
/// failed write never leaves a truncated artifact behind.
///
/// # Errors
///
/// Returns an error if encoding or any file operation fails.
pub fn save_jpeg(canvas: &RgbImage, path: &Path, quality: u8) -> Result<(), PostError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let staging = staging_path(path);
    {
        let mut writer = BufWriter::new(File::create(&staging)?);
        JpegEncoder::new_with_quality(&mut writer, quality).encode_image(canvas)?;
        writer.flush()?;
    }
    std::fs::rename(&staging, path)?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
    }

    #[test]
    fn output_is_always_post_sized() {
        for (w, h) in [(1, 1), (640, 427), (427, 640), (1080, 1350), (4000, 300), (300, 4000)] {
            let background = solid(w, h, [90, 120, 60]);
            let image =
                render("Stay hungry.", "- Lucas Hart", &background, &Typeface::Bitmap).unwrap();
            assert_eq!(image.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT), "input {w}x{h}");
        }
    }

    #[test]
    fn wide_background_is_cropped_not_stretched() {
        // quarter green | half red | quarter blue; the center crop keeps only red
        let image = RgbImage::from_fn(2160, 1350, |x, _| match x {
            0..=539 => Rgb([0, 255, 0]),
            540..=1619 => Rgb([255, 0, 0]),
            _ => Rgb([0, 0, 255]),
        });
        let fitted = fit_background(&DynamicImage::ImageRgb8(image)).unwrap();
        assert_eq!(fitted.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        for x in [10, 540, 1069] {
            let p = fitted.get_pixel(x, 675);
            assert!(p[0] > 200 && p[1] < 60 && p[2] < 60, "pixel at {x} was {p:?}");
        }
    }

    #[test]
    fn tall_background_is_cropped_not_stretched() {
        // top band | middle | bottom band, with the middle exactly one frame tall after scaling
        let image = RgbImage::from_fn(540, 1350, |_, y| match y {
            0..=336 => Rgb([0, 255, 0]),
            337..=1012 => Rgb([255, 0, 0]),
            _ => Rgb([0, 0, 255]),
        });
        let fitted = fit_background(&DynamicImage::ImageRgb8(image)).unwrap();
        assert_eq!(fitted.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        let p = fitted.get_pixel(540, 675);
        assert!(p[0] > 200 && p[1] < 60 && p[2] < 60, "center was {p:?}");
    }

    #[test]
    fn empty_background_is_a_compose_error() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(matches!(fit_background(&empty), Err(PostError::Compose(_))));
    }

    #[test]
    fn darken_applies_overlay_alpha() {
        let mut canvas = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        darken(&mut canvas, OVERLAY_ALPHA);
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([115, 115, 115]));

        let mut black = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
        darken(&mut black, OVERLAY_ALPHA);
        assert_eq!(*black.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn text_is_drawn_over_darkened_background() {
        let image =
            render("Keep going.", "- Lucas Hart", &solid(1080, 1350, [30, 30, 30]), &Typeface::Bitmap)
                .unwrap();
        // corners only carry the darkened background
        assert_eq!(*image.get_pixel(0, 0), Rgb([14, 14, 14]));
        assert_eq!(*image.get_pixel(1079, 1349), Rgb([14, 14, 14]));
        // text rows around the vertical center carry white glyph pixels
        let white_in_middle = (600..760)
            .flat_map(|y| (0..CANVAS_WIDTH).map(move |x| (x, y)))
            .any(|(x, y)| *image.get_pixel(x, y) == TEXT_COLOR);
        assert!(white_in_middle);
    }

    #[test]
    fn save_writes_a_jpeg_and_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.jpg");
        std::fs::write(&path, b"stale").unwrap();

        let canvas = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Rgb([30, 30, 30]));
        save_jpeg(&canvas, &path, JPEG_QUALITY).unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[..3], &[0xFF, 0xD8, 0xFF]);
        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert!(!dir.path().join("post.jpg.partial").exists());
    }
}
