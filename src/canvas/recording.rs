//! A canvas that records drawing operations.

use kurbo::BezPath;

use super::{ApproxFontMetrics, Canvas, FillRule, FontMetrics, TextAnchor, TextStyle};
use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::style::{Font, Stroke};

/// One recorded canvas call. Paint operations carry the composite alpha and
/// clip that were active when they were issued.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DrawOp {
    Fill {
        path: BezPath,
        rule: FillRule,
        paint: Rgba,
        alpha: f32,
        clip: Option<Rect>,
    },
    Stroke {
        path: BezPath,
        stroke: Stroke,
        paint: Rgba,
        alpha: f32,
        clip: Option<Rect>,
    },
    Text {
        text: String,
        at: Point,
        font: Font,
        paint: Rgba,
        anchor: TextAnchor,
        rotation: f64,
        alpha: f32,
        clip: Option<Rect>,
    },
    SetClip(Option<Rect>),
    SetAlpha(f32),
}

/// In-memory canvas that keeps every call, for tests and inspection.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    clip: Option<Rect>,
    alpha: f32,
    metrics: ApproxFontMetrics,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    /// Create an unclipped, fully opaque canvas.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            clip: None,
            alpha: 1.0,
            metrics: ApproxFontMetrics::default(),
        }
    }

    /// All recorded operations in call order.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Recorded fill operations.
    pub fn fills(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Fill { .. }))
    }

    /// Recorded stroke operations.
    pub fn strokes(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Stroke { .. }))
    }

    /// Text strings drawn, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of fills issued with exactly `paint`.
    #[must_use]
    pub fn fill_count(&self, paint: Rgba) -> usize {
        self.fills()
            .filter(|op| matches!(op, DrawOp::Fill { paint: p, .. } if *p == paint))
            .count()
    }

    /// Forget recorded operations; state is kept.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill(&mut self, path: &BezPath, rule: FillRule, paint: Rgba) {
        self.ops.push(DrawOp::Fill {
            path: path.clone(),
            rule,
            paint,
            alpha: self.alpha,
            clip: self.clip,
        });
    }

    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, paint: Rgba) {
        self.ops.push(DrawOp::Stroke {
            path: path.clone(),
            stroke: stroke.clone(),
            paint,
            alpha: self.alpha,
            clip: self.clip,
        });
    }

    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle<'_>) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            at,
            font: style.font.clone(),
            paint: style.paint,
            anchor: style.anchor,
            rotation: style.rotation,
            alpha: self.alpha,
            clip: self.clip,
        });
    }

    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
        self.ops.push(DrawOp::SetClip(clip));
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.ops.push(DrawOp::SetAlpha(alpha));
    }

    fn font_metrics(&self) -> &dyn FontMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::line_path;

    #[test]
    fn test_records_state_with_ops() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_alpha(0.5);
        canvas.set_clip(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let path = line_path(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        canvas.stroke(&path, &Stroke::solid(1.0), Rgba::RED);
        canvas.fill(&path, FillRule::NonZero, Rgba::BLUE);

        assert_eq!(canvas.ops().len(), 4);
        match canvas.strokes().next() {
            Some(DrawOp::Stroke { alpha, clip, .. }) => {
                assert_eq!(*alpha, 0.5);
                assert!(clip.is_some());
            }
            other => panic!("expected stroke, got {other:?}"),
        }
        assert_eq!(canvas.fill_count(Rgba::BLUE), 1);
        assert_eq!(canvas.fill_count(Rgba::RED), 0);
    }

    #[test]
    fn test_texts() {
        let mut canvas = RecordingCanvas::new();
        let font = Font::default();
        canvas.draw_text("hello", Point::ORIGIN, &TextStyle::new(&font, Rgba::BLACK));
        assert_eq!(canvas.texts(), vec!["hello"]);
        canvas.clear();
        assert!(canvas.ops().is_empty());
    }
}
