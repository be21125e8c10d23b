//! Glyph measurement, greedy line wrapping and text drawing.
//!
//! Wrapping is character-granular: the target script has no reliable
//! word-boundary spacing, so lines grow one character at a time against the
//! font's actual rendered widths.

use crate::foundation::error::{QuotewallError, QuotewallResult};
use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::path::Path;

/// Tall CJK glyph used to derive a uniform line height.
const REFERENCE_GLYPH: &str = "高";

/// System font locations tried when the configured font cannot be loaded.
const FALLBACK_FONT_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\simhei.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
];

/// The active font face at a fixed pixel size.
///
/// Font trouble is never fatal to generation: when no real font can be
/// loaded the `Boxes` variant stands in with fixed metrics (full em for
/// non-ASCII characters, half em for ASCII) and draws hollow "tofu" boxes in
/// place of glyphs. The fixed metrics also make it a convenient deterministic
/// face for layout tests.
pub enum Typeface {
    /// A proportional TrueType/OpenType face loaded from disk.
    TrueType {
        /// Parsed font data.
        font: FontVec,
        /// Render scale in pixels.
        scale: PxScale,
    },
    /// Built-in box-glyph stand-in.
    Boxes {
        /// Em size in pixels.
        px: f32,
    },
}

impl Typeface {
    /// Load a font file at `px` pixels. For font collections the first face
    /// is used.
    pub fn open(path: &Path, px: f32) -> QuotewallResult<Self> {
        let bytes = std::fs::read(path).map_err(|err| {
            QuotewallError::resource(format!("read font '{}': {err}", path.display()))
        })?;
        let font = FontVec::try_from_vec_and_index(bytes, 0).map_err(|_| {
            QuotewallError::resource(format!("parse font '{}'", path.display()))
        })?;
        Ok(Self::TrueType {
            font,
            scale: PxScale::from(px),
        })
    }

    /// The built-in box-glyph face.
    pub fn fallback(px: f32) -> Self {
        Self::Boxes { px }
    }

    /// Load `path`, falling back first to well-known system fonts and then
    /// to the built-in face. Never fails; downgrades are logged.
    pub fn open_or_fallback(path: &Path, px: f32) -> Self {
        match Self::open(path, px) {
            Ok(face) => face,
            Err(err) => {
                tracing::warn!(
                    font = %path.display(),
                    error = %err,
                    "configured font unavailable, trying system fonts"
                );
                for candidate in FALLBACK_FONT_PATHS {
                    if let Ok(face) = Self::open(Path::new(candidate), px) {
                        tracing::debug!(font = candidate, "using system fallback font");
                        return face;
                    }
                }
                tracing::warn!("no usable font found, drawing box glyphs");
                Self::fallback(px)
            }
        }
    }

    /// Rendered pixel width of `text`.
    pub fn measure(&self, text: &str) -> u32 {
        match self {
            Self::TrueType { font, scale } => text_size(*scale, font, text).0,
            Self::Boxes { px } => text
                .chars()
                .map(|c| box_advance(c, *px))
                .sum::<f32>()
                .round() as u32,
        }
    }

    /// Uniform vertical advance per line, measured once from
    /// [`REFERENCE_GLYPH`]. Never zero.
    pub fn line_height(&self) -> u32 {
        match self {
            Self::TrueType { font, scale } => text_size(*scale, font, REFERENCE_GLYPH).1.max(1),
            Self::Boxes { px } => (px.round() as u32).max(1),
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str) {
        match self {
            Self::TrueType { font, scale } => draw_text_mut(canvas, color, x, y, *scale, font, text),
            Self::Boxes { px } => draw_boxes(canvas, x, y, color, *px, text),
        }
    }
}

fn box_advance(c: char, px: f32) -> f32 {
    if c.is_ascii() {
        px * 0.5
    } else {
        px
    }
}

fn draw_boxes(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, px: f32, text: &str) {
    let height = ((px.round() as u32).max(3)).saturating_sub(2);
    let mut cursor = x as f32;
    for c in text.chars() {
        let advance = box_advance(c, px);
        if !c.is_whitespace() {
            let w = ((advance * 0.8).round() as u32).max(1);
            let rect = Rect::at(cursor.round() as i32 + 1, y + 1).of_size(w, height);
            draw_hollow_rect_mut(canvas, rect, color);
        }
        cursor += advance;
    }
}

/// Lines wrapped to a width budget plus the uniform vertical advance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineLayout {
    /// Substrings of the input, in order; concatenating them reproduces the
    /// input exactly.
    pub lines: Vec<String>,
    /// Vertical advance per line in pixels.
    pub line_height: u32,
}

/// Greedy character-granular wrap.
///
/// Each character is tentatively appended to the accumulator; if the
/// accumulated line still measures within `max_width` it is kept, otherwise
/// the accumulator is committed and a new line starts with that character. A
/// single character wider than `max_width` is emitted alone rather than
/// split or dropped. Empty input yields no lines.
pub fn wrap_text(face: &Typeface, text: &str, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for ch in text.chars() {
        let mut candidate = line.clone();
        candidate.push(ch);
        if face.measure(&candidate) <= max_width {
            line = candidate;
        } else {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            line.push(ch);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wrap `text` and pair it with the face's line height.
pub fn layout_quote(face: &Typeface, text: &str, max_width: u32) -> LineLayout {
    LineLayout {
        lines: wrap_text(face, text, max_width),
        line_height: face.line_height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // px = 10: ASCII chars advance 5, everything else 10.
    fn face() -> Typeface {
        Typeface::fallback(10.0)
    }

    #[test]
    fn fallback_metrics_are_fixed() {
        let face = face();
        assert_eq!(face.measure("abc"), 15);
        assert_eq!(face.measure("高高"), 20);
        assert_eq!(face.measure(""), 0);
        assert_eq!(face.line_height(), 10);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(wrap_text(&face(), "", 100).is_empty());
    }

    #[test]
    fn short_input_stays_on_one_line() {
        assert_eq!(wrap_text(&face(), "高高高", 100), vec!["高高高"]);
    }

    #[test]
    fn wrap_breaks_at_the_width_budget() {
        // Budget of 25 fits five ASCII chars per line.
        assert_eq!(
            wrap_text(&face(), "aaaaaaaaaaaa", 25),
            vec!["aaaaa", "aaaaa", "aa"]
        );
    }

    #[test]
    fn concatenation_reproduces_the_input() {
        let input = "为有牺牲多壮志，敢教日月换新天。abc def";
        let lines = wrap_text(&face(), input, 35);
        assert_eq!(lines.concat(), input);
        for line in &lines {
            assert!(face().measure(line) <= 35, "line \"{line}\" over budget");
        }
    }

    #[test]
    fn oversized_character_is_emitted_alone() {
        // Every CJK char measures 10, over the budget of 4.
        assert_eq!(wrap_text(&face(), "高山", 4), vec!["高", "山"]);
    }

    #[test]
    fn layout_carries_line_height() {
        let layout = layout_quote(&face(), "高高高高", 20);
        assert_eq!(layout.lines, vec!["高高", "高高"]);
        assert_eq!(layout.line_height, 10);
    }

    #[test]
    fn open_missing_font_errors_but_fallback_never_does() {
        let missing = Path::new("definitely/not/a/font.ttf");
        assert!(Typeface::open(missing, 80.0).is_err());
        let face = Typeface::open_or_fallback(missing, 80.0);
        assert!(face.line_height() >= 1);
    }

    #[test]
    fn boxes_draw_ink_inside_the_line_box() {
        let bg = Rgba([255u8, 255, 255, 255]);
        let mut canvas = RgbaImage::from_pixel(40, 20, bg);
        face().draw(&mut canvas, 0, 0, Rgba([0, 0, 0, 255]), "高");
        assert!(canvas.pixels().any(|px| *px != bg));
    }
}
