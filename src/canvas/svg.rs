//! Canvas that emits SVG elements.

use kurbo::BezPath;

use super::{ApproxFontMetrics, Canvas, FillRule, FontMetrics, TextStyle};
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::output::{SvgElement, SvgEncoder};
use crate::style::Stroke;
use std::path::Path;

/// Vector canvas over an [`SvgEncoder`].
///
/// Composite alpha is folded into each element's paint. A clip change closes
/// the current clip group and opens a new one.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    encoder: SvgEncoder,
    clip: Option<Rect>,
    clip_open: bool,
    next_clip_id: usize,
    alpha: f32,
    metrics: ApproxFontMetrics,
}

impl SvgCanvas {
    /// Create a canvas with a white background.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            encoder: SvgEncoder::new(width, height),
            clip: None,
            clip_open: false,
            next_clip_id: 0,
            alpha: 1.0,
            metrics: ApproxFontMetrics::default(),
        }
    }

    /// Set the document background (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.encoder = self.encoder.background(color);
        self
    }

    /// The encoder holding the elements emitted so far.
    #[must_use]
    pub fn encoder(&self) -> &SvgEncoder {
        &self.encoder
    }

    /// Close any open clip group and return the encoder.
    #[must_use]
    pub fn finish(mut self) -> SvgEncoder {
        self.close_clip();
        self.encoder
    }

    /// Render the document as it stands.
    #[must_use]
    pub fn render(&self) -> String {
        self.encoder.render()
    }

    /// Write the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.encoder.write_to_file(path)
    }

    fn close_clip(&mut self) {
        if self.clip_open {
            self.encoder.add_element(SvgElement::ClipEnd);
            self.clip_open = false;
        }
    }
}

impl Canvas for SvgCanvas {
    fn fill(&mut self, path: &BezPath, rule: FillRule, paint: Rgba) {
        if path.elements().is_empty() {
            return;
        }
        self.encoder.add_element(SvgElement::Path {
            d: path.to_svg(),
            fill: Some(paint.scale_alpha(self.alpha)),
            fill_rule: rule,
            stroke: None,
            stroke_width: 0.0,
            dash: Vec::new(),
        });
    }

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, paint: Rgba) {
        if path.elements().is_empty() {
            return;
        }
        self.encoder.add_element(SvgElement::Path {
            d: path.to_svg(),
            fill: None,
            fill_rule: FillRule::NonZero,
            stroke: Some(paint.scale_alpha(self.alpha)),
            stroke_width: stroke.width,
            dash: stroke.dash.clone(),
        });
    }

    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle<'_>) {
        if text.is_empty() {
            return;
        }
        self.encoder.add_element(SvgElement::Text {
            x: at.x,
            y: at.y,
            text: text.to_owned(),
            font_family: style.font.family.clone(),
            font_size: style.font.size,
            bold: style.font.bold,
            italic: style.font.italic,
            fill: style.paint.scale_alpha(self.alpha),
            anchor: style.anchor,
            rotation: style.rotation,
        });
    }

    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        if clip == self.clip {
            return;
        }
        self.close_clip();
        if let Some(rect) = clip {
            self.encoder.add_element(SvgElement::ClipBegin {
                id: self.next_clip_id,
                clip: rect,
            });
            self.next_clip_id += 1;
            self.clip_open = true;
        }
        self.clip = clip;
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
