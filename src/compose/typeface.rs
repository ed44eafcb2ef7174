//! Font acquisition and text metrics.
//!
//! A scalable TTF is preferred. It is cached on disk after the first
//! download; when no usable file can be had, text falls back to the 8×8
//! bitmap font from `font8x8`, scaled by an integer factor. Both variants
//! report real metrics, so layout never needs to know which one is active.

use std::path::Path;
use std::time::Duration;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::error::PostError;
use crate::ports::font_source::{FontRequest, FontSource};

const FONT_TIMEOUT: Duration = Duration::from_secs(10);

/// Line advance as a multiple of the font's natural height.
const LINE_SPACING: f32 = 1.2;

/// Native bitmap glyph size in pixels.
const BITMAP_CELL: u32 = 8;

/// The active font.
pub enum Typeface {
    /// A parsed TrueType/OpenType font.
    Scalable(FontVec),
    /// The built-in 8×8 bitmap font.
    Bitmap,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalable(_) => f.write_str("Typeface::Scalable"),
            Self::Bitmap => f.write_str("Typeface::Bitmap"),
        }
    }
}

impl Typeface {
    /// Parse font file bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a font `ab_glyph` can read.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, PostError> {
        FontVec::try_from_vec(data).map(Self::Scalable).map_err(|e| PostError::Font(e.to_string()))
    }

    /// Width in pixels of `text` set at `px`.
    #[must_use]
    pub fn text_width(&self, px: f32, text: &str) -> u32 {
        match self {
            Self::Scalable(font) => text_size(PxScale::from(px), font, text).0,
            Self::Bitmap => {
                let glyphs = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
                glyphs.saturating_mul(bitmap_cell(px))
            }
        }
    }

    /// Vertical advance between consecutive lines at `px`.
    #[must_use]
    pub fn line_height(&self, px: f32) -> u32 {
        let natural = match self {
            Self::Scalable(font) => {
                let scaled = font.as_scaled(PxScale::from(px));
                scaled.height() + scaled.line_gap()
            }
            #[allow(clippy::cast_precision_loss)]
            Self::Bitmap => bitmap_cell(px) as f32,
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let advance = (natural * LINE_SPACING).ceil().max(1.0) as u32;
        advance
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, px: f32, text: &str) {
        match self {
            Self::Scalable(font) => draw_text_mut(canvas, color, x, y, PxScale::from(px), font, text),
            Self::Bitmap => draw_bitmap_text(canvas, color, x, y, bitmap_cell(px), text),
        }
    }
}

/// Scale factor for the bitmap font: nearest whole multiple of 8 px, at least 1.
fn bitmap_scale(px: f32) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scale = (px / BITMAP_CELL as f32).round().max(1.0) as u32;
    scale
}

fn bitmap_cell(px: f32) -> u32 {
    BITMAP_CELL * bitmap_scale(px)
}

fn draw_bitmap_text(canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, cell: u32, text: &str) {
    let dot = cell / BITMAP_CELL;
    let step = i32::try_from(cell).unwrap_or(i32::MAX);
    let dot_step = i32::try_from(dot).unwrap_or(i32::MAX);

    let mut pen_x = x;
    for ch in text.chars() {
        let rows = bitmap_glyph(ch);
        let mut dot_y = y;
        for row in rows {
            let mut dot_x = pen_x;
            for bit in 0..8 {
                // bit 0 is the leftmost column
                if row & (1 << bit) != 0 {
                    draw_filled_rect_mut(canvas, Rect::at(dot_x, dot_y).of_size(dot, dot), color);
                }
                dot_x += dot_step;
            }
            dot_y += dot_step;
        }
        pen_x += step;
    }
}

fn bitmap_glyph(ch: char) -> [u8; 8] {
    let ch = match ch {
        '\u{2018}' | '\u{2019}' | '\u{2032}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{2033}' => '"',
        '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
        '\u{2026}' => '.',
        other => other,
    };
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Load the cached font, else download and cache it, else use the bitmap font.
///
/// `source` is `None` when downloads are disabled. Never fails.
pub async fn acquire(source: Option<&dyn FontSource>, cache: &Path) -> Typeface {
    match std::fs::read(cache) {
        Ok(data) => match Typeface::from_bytes(data) {
            Ok(face) => {
                tracing::debug!(path = %cache.display(), "using cached font");
                return face;
            }
            Err(e) => tracing::warn!(path = %cache.display(), "cached font unusable: {e}"),
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %cache.display(), "cannot read cached font: {e}"),
    }

    let Some(source) = source else {
        tracing::info!("no font source, using built-in bitmap font");
        return Typeface::Bitmap;
    };

    let fetched = source.fetch(&FontRequest { timeout: FONT_TIMEOUT }).await;
    let data = match fetched {
        Ok(file) => file.data,
        Err(e) => {
            tracing::warn!("font download failed, using built-in bitmap font: {e}");
            return Typeface::Bitmap;
        }
    };

    match FontVec::try_from_vec(data.clone()) {
        Ok(font) => {
            if let Err(e) = std::fs::write(cache, &data) {
                tracing::warn!(path = %cache.display(), "cannot cache font: {e}");
            }
            tracing::info!(path = %cache.display(), "font downloaded");
            Typeface::Scalable(font)
        }
        Err(e) => {
            tracing::warn!("downloaded font is invalid, using built-in bitmap font: {e}");
            Typeface::Bitmap
        }
    }
}
