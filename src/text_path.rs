//! Text laid along an arbitrary path.
//!
//! [`TextStroke`] turns a string into a single outline whose glyphs follow a
//! path at their natural advances. Filling the result draws curved text, for
//! example a marker label that follows the arc of an interval band.
//!
//! # Example
//!
//! ```
//! use trueno_radar::canvas::ApproxFontMetrics;
//! use trueno_radar::style::Font;
//! use trueno_radar::text_path::TextStroke;
//!
//! let mut arc = kurbo::BezPath::new();
//! arc.move_to((0.0, 0.0));
//! arc.line_to((100.0, 0.0));
//!
//! let stroke = TextStroke::new("North", Font::default());
//! let shape = stroke.create_stroked_shape(&arc, &ApproxFontMetrics::default());
//! assert!(!shape.elements().is_empty());
//! ```

use kurbo::{Affine, BezPath, PathEl, Vec2};

use crate::canvas::{FontMetrics, FLATNESS};
use crate::style::Font;

/// Glyph layout along a path.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStroke {
    /// Text to lay out.
    pub text: String,
    /// Font used for advances and outlines.
    pub font: Font,
    /// Spread the glyphs so the text spans the whole path.
    pub stretch_to_fit: bool,
    /// Start over from the first glyph until the path runs out.
    pub repeat: bool,
}

impl TextStroke {
    /// Plain layout at natural advances.
    #[must_use]
    pub fn new(text: impl Into<String>, font: Font) -> Self {
        Self {
            text: text.into(),
            font,
            stretch_to_fit: false,
            repeat: false,
        }
    }

    /// Enable or disable stretching.
    #[must_use]
    pub fn stretch_to_fit(mut self, stretch: bool) -> Self {
        self.stretch_to_fit = stretch;
        self
    }

    /// Enable or disable repetition.
    #[must_use]
    pub fn repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Build the outline of the text placed along `path`.
    ///
    /// Each glyph is centered on its placement point and rotated to the
    /// direction of the segment it lands on. Placement stops once every
    /// glyph is used (unless repeating) or the path ends. An empty string
    /// gives an empty path. Text with no total advance is laid out once
    /// even when repeating.
    #[must_use]
    pub fn create_stroked_shape(&self, path: &BezPath, metrics: &dyn FontMetrics) -> BezPath {
        let mut result = BezPath::new();
        let glyphs = metrics.glyphs(&self.text, &self.font);
        let length = glyphs.len();
        if length == 0 {
            return result;
        }

        let factor = if self.stretch_to_fit {
            let text_width = metrics.string_width(&self.text, &self.font);
            if text_width > 0.0 {
                measure_path_length(path) / text_width
            } else {
                1.0
            }
        } else {
            1.0
        };
        // without forward progress a repeating run would never leave a segment
        let repeat = self.repeat && glyphs.iter().map(|g| g.advance).sum::<f64>() > 0.0;

        let mut current = 0usize;
        let mut next = 0.0;
        let mut next_advance = 0.0;
        let (mut move_pt, mut last) = (kurbo::Point::ZERO, kurbo::Point::ZERO);

        for el in flattened(path) {
            if current >= length {
                break;
            }
            let this = match el {
                PathEl::MoveTo(p) => {
                    move_pt = p;
                    last = p;
                    next_advance = glyphs[current].advance * 0.5;
                    next = next_advance;
                    continue;
                }
                PathEl::LineTo(p) => p,
                PathEl::ClosePath => move_pt,
                PathEl::QuadTo(..) | PathEl::CurveTo(..) => continue,
            };

            let delta = this - last;
            let distance = delta.hypot();
            if distance >= next && distance > 0.0 {
                let angle = delta.atan2();
                while current < length && distance >= next {
                    let glyph = &glyphs[current];
                    let at = last + delta * (next / distance);
                    let advance = next_advance;
                    next_advance = if current + 1 < length {
                        glyphs[current + 1].advance * 0.5
                    } else if repeat {
                        glyphs[0].advance * 0.5
                    } else {
                        0.0
                    };

                    let transform = Affine::translate(at.to_vec2())
                        * Affine::rotate(angle)
                        * Affine::translate(Vec2::new(-advance, 0.0));
                    let placed = transform * glyph.outline.clone();
                    result.extend(placed.elements().iter().copied());

                    next += (advance + next_advance) * factor;
                    current += 1;
                    if repeat {
                        current %= length;
                    }
                }
            }
            next -= distance;
            last = this;
        }

        result
    }
}

/// Total length of `path` after flattening, including closing segments.
#[must_use]
pub fn measure_path_length(path: &BezPath) -> f64 {
    let mut total = 0.0;
    let (mut move_pt, mut last) = (kurbo::Point::ZERO, kurbo::Point::ZERO);
    for el in flattened(path) {
        match el {
            PathEl::MoveTo(p) => {
                move_pt = p;
                last = p;
            }
            PathEl::LineTo(p) => {
                total += last.distance(p);
                last = p;
            }
            PathEl::ClosePath => {
                total += last.distance(move_pt);
                last = move_pt;
            }
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        }
    }
    total
}

fn flattened(path: &BezPath) -> Vec<PathEl> {
    let mut out = Vec::new();
    kurbo::flatten(path.iter(), FLATNESS, |el| out.push(el));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ApproxFontMetrics;
    use approx::assert_abs_diff_eq;
    use kurbo::Shape;

    fn horizontal(len: f64) -> BezPath {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((len, 0.0));
        p
    }

    fn font() -> Font {
        Font::new("sans-serif", 10.0)
    }

    fn subpaths(path: &BezPath) -> usize {
        path.elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count()
    }

    #[test]
    fn test_empty_text_gives_empty_path() {
        let shape = TextStroke::new("", font())
            .create_stroked_shape(&horizontal(100.0), &ApproxFontMetrics::default());
        assert!(shape.elements().is_empty());
    }

    #[test]
    fn test_straight_path_matches_plain_layout() {
        // advance 6 per glyph: glyphs sit at 0, 6, 12
        let shape = TextStroke::new("ABC", font())
            .create_stroked_shape(&horizontal(100.0), &ApproxFontMetrics::default());
        assert_eq!(subpaths(&shape), 3);
        let bounds = shape.bounding_box();
        assert_abs_diff_eq!(bounds.x0, 0.6, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.x1, 17.4, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.y0, -8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_path_shorter_than_text_truncates() {
        // second glyph center at 9 > 8
        let shape = TextStroke::new("ABC", font())
            .create_stroked_shape(&horizontal(8.0), &ApproxFontMetrics::default());
        assert_eq!(subpaths(&shape), 1);
    }

    #[test]
    fn test_vertical_path_rotates_glyphs() {
        let mut down = BezPath::new();
        down.move_to((0.0, 0.0));
        down.line_to((0.0, 50.0));
        let shape = TextStroke::new("A", font())
            .create_stroked_shape(&down, &ApproxFontMetrics::default());
        let bounds = shape.bounding_box();
        // glyph height now runs along +x
        assert_abs_diff_eq!(bounds.x1, 8.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.y0, 0.6, epsilon = 1e-9);
    }

    #[test]
    fn test_stretch_to_fit_spreads_glyphs() {
        let shape = TextStroke::new("AB", font())
            .stretch_to_fit(true)
            .create_stroked_shape(&horizontal(24.0), &ApproxFontMetrics::default());
        // factor 2: second glyph center at 3 + 12 = 15
        let bounds = shape.bounding_box();
        assert_abs_diff_eq!(bounds.x1, 15.0 + 2.4, epsilon = 1e-9);
    }

    #[test]
    fn test_repeat_cycles_until_path_ends() {
        let shape = TextStroke::new("AB", font())
            .repeat(true)
            .create_stroked_shape(&horizontal(30.0), &ApproxFontMetrics::default());
        // centers at 3, 9, 15, 21, 27
        assert_eq!(subpaths(&shape), 5);
    }

    #[test]
    fn test_repeat_with_zero_size_font_places_each_glyph_once() {
        let shape = TextStroke::new("AB", Font::new("x", 0.0))
            .repeat(true)
            .create_stroked_shape(&horizontal(10.0), &ApproxFontMetrics::default());
        assert_eq!(subpaths(&shape), 2);
    }

    #[test]
    fn test_measure_path_length_closed() {
        let rect = kurbo::Rect::new(0.0, 0.0, 10.0, 5.0).to_path(0.1);
        assert_abs_diff_eq!(measure_path_length(&rect), 30.0, epsilon = 1e-9);
        let circle = kurbo::Circle::new((0.0, 0.0), 10.0).to_path(0.01);
        assert_abs_diff_eq!(
            measure_path_length(&circle),
            std::f64::consts::TAU * 10.0,
            epsilon = 1.0
        );
    }
}
