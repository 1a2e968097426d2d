//! Canvas backed by a [`Framebuffer`].

use kurbo::{Affine, BezPath, Vec2};

use super::{
    dash_polyline, flatten, ApproxFontMetrics, Canvas, FillRule, FontMetrics, TextAnchor,
    TextStyle, FLATNESS,
};
use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::render::{fill_polygons, stroke_polyline};
use crate::style::Stroke;

/// Anti-aliased software canvas.
///
/// Text is rendered by filling glyph outlines from the attached metrics.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    fb: Framebuffer,
    clip: Option<Rect>,
    alpha: f32,
    metrics: ApproxFontMetrics,
}

impl RasterCanvas {
    /// Create a canvas over a new transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self::from_framebuffer(Framebuffer::new(width, height)?))
    }

    /// Wrap an existing framebuffer. Any clip it carries is cleared.
    #[must_use]
    pub fn from_framebuffer(mut fb: Framebuffer) -> Self {
        fb.set_clip(None);
        Self {
            fb,
            clip: None,
            alpha: 1.0,
            metrics: ApproxFontMetrics::default(),
        }
    }

    /// Replace the font metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: ApproxFontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The underlying framebuffer.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    /// Mutable access to the framebuffer, e.g. to clear it.
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.fb
    }

    /// Consume the canvas and return its framebuffer.
    #[must_use]
    pub fn into_framebuffer(mut self) -> Framebuffer {
        self.fb.set_clip(None);
        self.fb
    }

    fn composite(&self, paint: Rgba) -> Rgba {
        paint.scale_alpha(self.alpha)
    }
}

impl Canvas for RasterCanvas {
    fn fill(&mut self, path: &BezPath, rule: FillRule, paint: Rgba) {
        let color = self.composite(paint);
        let polys = flatten(path, FLATNESS);
        fill_polygons(&mut self.fb, &polys, rule, color);
    }

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, paint: Rgba) {
        let color = self.composite(paint);
        for line in flatten(path, FLATNESS) {
            for piece in dash_polyline(&line, &stroke.dash) {
                stroke_polyline(&mut self.fb, &piece, stroke, color);
            }
        }
    }

    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle<'_>) {
        let width = self.metrics.string_width(text, style.font);
        let offset = match style.anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => width / 2.0,
            TextAnchor::End => width,
        };
        // kurbo rotates clockwise on a y-down surface
        let place = Affine::translate(Vec2::new(at.x, at.y))
            * Affine::rotate(-style.rotation.to_radians());

        let mut outline = BezPath::new();
        for glyph in self.metrics.glyphs(text, style.font) {
            let shift = Affine::translate(Vec2::new(glyph.position.x - offset, glyph.position.y));
            let placed = (place * shift) * glyph.outline;
            outline.extend(placed.elements().iter().copied());
        }
        if outline.elements().is_empty() {
            return;
        }
        self.fill(&outline, FillRule::NonZero, style.paint);
    }

    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
        self.fb.set_clip(clip);
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn font_metrics(&self) -> &dyn FontMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{ellipse_path, line_path, rect_path, with_alpha};
    use crate::style::Font;

    fn canvas() -> RasterCanvas {
        let mut c = RasterCanvas::new(40, 40).unwrap();
        c.framebuffer_mut().clear(Rgba::WHITE);
        c
    }

    #[test]
    fn test_fill_rect_respects_clip() {
        let mut c = canvas();
        c.set_clip(Some(Rect::new(0.0, 0.0, 20.0, 40.0)));
        c.fill(&rect_path(Rect::new(10.0, 10.0, 20.0, 20.0)), FillRule::NonZero, Rgba::RED);
        let fb = c.framebuffer();
        assert_eq!(fb.get_pixel(15, 15), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(25, 15), Some(Rgba::WHITE));
    }

    #[test]
    fn test_alpha_composites() {
        let mut c = canvas();
        with_alpha(&mut c, 0.5, |c| {
            c.fill(&rect_path(Rect::new(0.0, 0.0, 40.0, 40.0)), FillRule::NonZero, Rgba::BLACK);
        });
        let px = c.framebuffer().get_pixel(20, 20).unwrap();
        assert!(px.r > 120 && px.r < 135);
        assert_eq!(c.alpha(), 1.0);
    }

    #[test]
    fn test_dashed_stroke_leaves_gaps() {
        let mut c = canvas();
        let path = line_path(Point::new(0.0, 20.5), Point::new(40.0, 20.5));
        c.stroke(&path, &Stroke::dashed(1.0, &[4.0, 4.0]), Rgba::BLACK);
        let fb = c.framebuffer();
        assert_ne!(fb.get_pixel(2, 20), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(6, 20), Some(Rgba::WHITE));
    }

    #[test]
    fn test_ellipse_fill_inside_only() {
        let mut c = canvas();
        c.fill(&ellipse_path(Rect::new(0.0, 0.0, 40.0, 40.0)), FillRule::NonZero, Rgba::BLUE);
        let fb = c.framebuffer();
        assert_eq!(fb.get_pixel(20, 20), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_text_inks_pixels_near_anchor() {
        let mut c = canvas();
        let font = Font::new("sans-serif", 12.0);
        c.draw_text(
            "AB",
            Point::new(20.0, 20.0),
            &TextStyle::new(&font, Rgba::BLACK).anchor(TextAnchor::Middle),
        );
        let fb = c.framebuffer();
        assert!(fb.ink_ratio(Rgba::WHITE) > 0.0);
        // nothing below the baseline for box glyphs
        assert_eq!(fb.get_pixel(20, 25), Some(Rgba::WHITE));
    }
}
