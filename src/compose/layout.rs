//! Text wrapping and placement, driven by measured widths.

use super::typeface::Typeface;

/// Horizontal margin kept clear on each side of the text.
pub const SIDE_MARGIN: u32 = 90;
/// Vertical margin the quote block should stay inside.
pub const TOP_MARGIN: u32 = 120;
/// Gap between the last quote line and the author line.
pub const AUTHOR_GAP: u32 = 30;
/// Preferred quote size in pixels.
pub const QUOTE_PX: f32 = 55.0;
/// Smallest quote size tried before giving up on fitting vertically.
pub const MIN_QUOTE_PX: f32 = 35.0;
/// Author line size in pixels.
pub const AUTHOR_PX: f32 = 35.0;

const SHRINK_STEP: f32 = 5.0;

/// One line of text and where its top-left corner goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedText {
    /// Text to draw.
    pub text: String,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
}

/// Where everything goes on the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Size the quote is set at.
    pub quote_px: f32,
    /// Quote lines, top to bottom.
    pub lines: Vec<PlacedText>,
    /// Author line.
    pub author: PlacedText,
}

/// Greedily wrap `text` so no line measures wider than `max_width`.
///
/// Words wider than `max_width` on their own are broken between characters.
pub fn wrap<F>(text: &str, max_width: u32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> u32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate =
            if current.is_empty() { word.to_string() } else { format!("{current} {word}") };
        if measure(&candidate) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if measure(word) <= max_width {
            current = word.to_string();
            continue;
        }
        for ch in word.chars() {
            let mut next = current.clone();
            next.push(ch);
            if !current.is_empty() && measure(&next) > max_width {
                lines.push(std::mem::replace(&mut current, ch.to_string()));
            } else {
                current = next;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out the quote (already in quotation marks) and author on a `width`×`height` frame.
///
/// The quote block is centered vertically; when it would not fit between the
/// top and bottom margins the size shrinks in steps down to [`MIN_QUOTE_PX`].
#[must_use]
pub fn layout(typeface: &Typeface, quote: &str, author: &str, width: u32, height: u32) -> Layout {
    let max_width = width.saturating_sub(2 * SIDE_MARGIN).max(1);
    let max_block = height.saturating_sub(2 * TOP_MARGIN);

    let mut quote_px = QUOTE_PX;
    let (lines, line_height) = loop {
        let lines = wrap(quote, max_width, |s| typeface.text_width(quote_px, s));
        let line_height = typeface.line_height(quote_px);
        let block = line_height.saturating_mul(u32::try_from(lines.len()).unwrap_or(u32::MAX));
        if block <= max_block || quote_px - SHRINK_STEP < MIN_QUOTE_PX {
            break (lines, line_height);
        }
        quote_px -= SHRINK_STEP;
    };

    let block = i64::from(line_height) * i64::try_from(lines.len()).unwrap_or(i64::MAX);
    let mut y = (i64::from(height) - block) / 2;

    let mut placed = Vec::with_capacity(lines.len());
    for line in lines {
        let x = centered(width, typeface.text_width(quote_px, &line));
        placed.push(PlacedText { text: line, x, y: to_i32(y) });
        y += i64::from(line_height);
    }

    y += i64::from(AUTHOR_GAP);
    let author = PlacedText {
        text: author.to_string(),
        x: centered(width, typeface.text_width(AUTHOR_PX, author)),
        y: to_i32(y),
    };

    Layout { quote_px, lines: placed, author }
}

fn centered(frame: u32, text: u32) -> i32 {
    to_i32((i64::from(frame) - i64::from(text)) / 2)
}

fn to_i32(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}
