//! Font metrics and glyph outlines.

use std::fmt;

use kurbo::{BezPath, Shape};

use crate::geometry::{Point, Rect};
use crate::style::Font;

/// One positioned glyph of a laid-out string.
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Outline in glyph space: origin on the baseline at the glyph's left
    /// edge, y growing downward.
    pub outline: BezPath,
    /// Horizontal advance.
    pub advance: f64,
    /// Baseline origin relative to the start of the string.
    pub position: Point,
}

/// Font measurement and outline provider.
pub trait FontMetrics: fmt::Debug {
    /// Horizontal advance of `ch`.
    fn advance(&self, ch: char, font: &Font) -> f64;

    /// Distance from the baseline to the top of tall glyphs.
    fn ascent(&self, font: &Font) -> f64;

    /// Distance from the baseline to the bottom of descenders.
    fn descent(&self, font: &Font) -> f64;

    /// Outline of `ch` in glyph space (see [`Glyph::outline`]).
    fn glyph_outline(&self, ch: char, font: &Font) -> BezPath;

    /// Total advance of `text`.
    fn string_width(&self, text: &str, font: &Font) -> f64 {
        text.chars().map(|c| self.advance(c, font)).sum()
    }

    /// Logical bounds of `text` relative to its baseline origin.
    fn string_bounds(&self, text: &str, font: &Font) -> Rect {
        let ascent = self.ascent(font);
        Rect::new(
            0.0,
            -ascent,
            self.string_width(text, font),
            ascent + self.descent(font),
        )
    }

    /// Lay out `text` as a left-to-right run of glyphs.
    fn glyphs(&self, text: &str, font: &Font) -> Vec<Glyph> {
        let mut x = 0.0;
        text.chars()
            .map(|ch| {
                let advance = self.advance(ch, font);
                let glyph = Glyph {
                    outline: self.glyph_outline(ch, font),
                    advance,
                    position: Point::new(x, 0.0),
                };
                x += advance;
                glyph
            })
            .collect()
    }
}

/// Fixed-ratio metrics with box-shaped glyphs.
///
/// Used when no host font engine is attached. Every visible character is a
/// rectangle spanning the x-height band; whitespace has no outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxFontMetrics {
    /// Advance as a fraction of the font size.
    pub advance_ratio: f64,
    /// Ascent as a fraction of the font size.
    pub ascent_ratio: f64,
    /// Descent as a fraction of the font size.
    pub descent_ratio: f64,
}

impl Default for ApproxFontMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            ascent_ratio: 0.8,
            descent_ratio: 0.2,
        }
    }
}

impl FontMetrics for ApproxFontMetrics {
    fn advance(&self, ch: char, font: &Font) -> f64 {
        let ratio = if ch == ' ' {
            self.advance_ratio / 2.0
        } else {
            self.advance_ratio
        };
        let weight = if font.bold { 1.1 } else { 1.0 };
        font.size * ratio * weight
    }

    fn ascent(&self, font: &Font) -> f64 {
        font.size * self.ascent_ratio
    }

    fn descent(&self, font: &Font) -> f64 {
        font.size * self.descent_ratio
    }

    fn glyph_outline(&self, ch: char, font: &Font) -> BezPath {
        if ch.is_whitespace() || ch.is_control() {
            return BezPath::new();
        }
        let advance = self.advance(ch, font);
        let height = if ch.is_uppercase() || ch.is_ascii_digit() {
            self.ascent(font)
        } else {
            self.ascent(font) * 0.7
        };
        kurbo::Rect::new(advance * 0.1, -height, advance * 0.9, 0.0).to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_string_width_and_bounds() {
        let m = ApproxFontMetrics::default();
        let font = Font::new("sans-serif", 10.0);
        assert_abs_diff_eq!(m.string_width("abc", &font), 18.0);
        assert_abs_diff_eq!(m.string_width("a b", &font), 15.0);
        let b = m.string_bounds("ab", &font);
        assert_abs_diff_eq!(b.y, -8.0);
        assert_abs_diff_eq!(b.height, 10.0);
    }

    #[test]
    fn test_glyph_positions_accumulate() {
        let m = ApproxFontMetrics::default();
        let font = Font::new("sans-serif", 10.0);
        let glyphs = m.glyphs("ab c", &font);
        assert_eq!(glyphs.len(), 4);
        assert_abs_diff_eq!(glyphs[1].position.x, 6.0);
        assert_abs_diff_eq!(glyphs[3].position.x, 15.0);
        assert!(glyphs[2].outline.elements().is_empty());
        assert!(!glyphs[3].outline.elements().is_empty());
    }
}
