//! Drawing surface abstraction.
//!
//! [`Canvas`] is the seam between the plot engine and a 2D graphics host:
//! filled and stroked paths, anchored text, a rectangular clip and a
//! composite alpha. Paths are [`kurbo::BezPath`]; backends flatten curves
//! themselves.
//!
//! State changes that are temporary for one drawing step go through
//! [`with_clip`] and [`with_alpha`], which always restore the previous state.

mod metrics;
mod raster;
mod recording;
mod svg;

pub use metrics::{ApproxFontMetrics, FontMetrics, Glyph};
pub use raster::RasterCanvas;
pub use recording::{DrawOp, RecordingCanvas};
pub use svg::SvgCanvas;

use kurbo::{BezPath, Shape};

use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::style::{Font, Stroke};

/// Curve flattening tolerance in user units.
pub const FLATNESS: f64 = 0.25;

/// Interior test used when filling a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Non-zero winding.
    #[default]
    NonZero,
    /// Even-odd parity; nested subpaths punch holes.
    EvenOdd,
}

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Text starts at the anchor (left-aligned for LTR).
    #[default]
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor (right-aligned for LTR).
    End,
}

/// How a run of text is set.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    /// Font request.
    pub font: &'a Font,
    /// Fill color.
    pub paint: Rgba,
    /// Horizontal alignment at the anchor point.
    pub anchor: TextAnchor,
    /// Counter-clockwise rotation in degrees about the anchor point.
    pub rotation: f64,
}

impl<'a> TextStyle<'a> {
    /// Unrotated, start-anchored text.
    #[must_use]
    pub fn new(font: &'a Font, paint: Rgba) -> Self {
        Self {
            font,
            paint,
            anchor: TextAnchor::Start,
            rotation: 0.0,
        }
    }

    /// Set the anchor.
    #[must_use]
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

/// A 2D drawing surface.
///
/// Paint alpha is multiplied by the canvas' composite [`alpha`](Canvas::alpha)
/// at draw time. Drawing outside the clip has no visible effect.
pub trait Canvas {
    /// Fill the interior of `path`.
    fn fill(&mut self, path: &BezPath, rule: FillRule, paint: Rgba);

    /// Outline `path` with `stroke`.
    fn stroke(&mut self, path: &BezPath, stroke: &Stroke, paint: Rgba);

    /// Draw a single line of text whose baseline passes through `at`.
    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle<'_>);

    /// Current clip rectangle (`None` = unclipped).
    fn clip(&self) -> Option<Rect>;

    /// Replace the clip rectangle.
    fn set_clip(&mut self, clip: Option<Rect>);

    /// Current composite alpha in `[0, 1]`.
    fn alpha(&self) -> f32;

    /// Replace the composite alpha.
    fn set_alpha(&mut self, alpha: f32);

    /// Font metrics used for layout and glyph outlines.
    fn font_metrics(&self) -> &dyn FontMetrics;
}

/// Run `f` with the clip narrowed to `rect`, then restore the previous clip.
pub fn with_clip<C, R>(canvas: &mut C, rect: Rect, f: impl FnOnce(&mut C) -> R) -> R
where
    C: Canvas + ?Sized,
{
    let saved = canvas.clip();
    let narrowed = saved.map_or(rect, |current| current.intersect(&rect));
    canvas.set_clip(Some(narrowed));
    let out = f(canvas);
    canvas.set_clip(saved);
    out
}

/// Run `f` with the composite alpha replaced by `alpha`, then restore it.
pub fn with_alpha<C, R>(canvas: &mut C, alpha: f32, f: impl FnOnce(&mut C) -> R) -> R
where
    C: Canvas + ?Sized,
{
    let saved = canvas.alpha();
    canvas.set_alpha(alpha.clamp(0.0, 1.0));
    let out = f(canvas);
    canvas.set_alpha(saved);
    out
}

/// Straight segment from `a` to `b`.
#[must_use]
pub fn line_path(a: Point, b: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(kurbo::Point::from(a));
    path.line_to(kurbo::Point::from(b));
    path
}

/// Polygon through `points`; closed when `close` is set. Empty input gives
/// an empty path.
#[must_use]
pub fn polygon_path(points: &[Point], close: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(kurbo::Point::from(*first));
        for p in iter {
            path.line_to(kurbo::Point::from(*p));
        }
        if close {
            path.close_path();
        }
    }
    path
}

/// Ellipse inscribed in `bounds`.
#[must_use]
pub fn ellipse_path(bounds: Rect) -> BezPath {
    kurbo::Ellipse::from_rect(kurbo::Rect::from(bounds)).to_path(FLATNESS / 4.0)
}

/// Axis-aligned rectangle outline.
#[must_use]
pub fn rect_path(bounds: Rect) -> BezPath {
    kurbo::Rect::from(bounds).to_path(FLATNESS)
}

/// A flattened subpath.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Whether the last vertex connects back to the first.
    pub closed: bool,
}

/// Flatten `path` into polylines, one per subpath.
#[must_use]
pub fn flatten(path: &BezPath, tolerance: f64) -> Vec<Polyline> {
    let mut out: Vec<Polyline> = Vec::new();
    kurbo::flatten(path.iter(), tolerance, |el| match el {
        kurbo::PathEl::MoveTo(p) => out.push(Polyline {
            points: vec![p.into()],
            closed: false,
        }),
        kurbo::PathEl::LineTo(p) => match out.last_mut() {
            Some(current) if !current.closed => current.points.push(p.into()),
            _ => out.push(Polyline {
                points: vec![p.into()],
                closed: false,
            }),
        },
        kurbo::PathEl::ClosePath => {
            if let Some(current) = out.last_mut() {
                current.closed = true;
            }
        }
        // flatten only emits move/line/close
        kurbo::PathEl::QuadTo(..) | kurbo::PathEl::CurveTo(..) => {}
    });
    out.retain(|p| !p.points.is_empty());
    out
}

/// Split a polyline into the "on" pieces of a dash pattern.
///
/// An empty or all-zero pattern returns the input unchanged.
#[must_use]
pub fn dash_polyline(line: &Polyline, pattern: &[f64]) -> Vec<Polyline> {
    let total: f64 = pattern.iter().copied().filter(|d| *d > 0.0).sum();
    if pattern.is_empty() || total <= 0.0 {
        return vec![line.clone()];
    }

    let mut points = line.points.clone();
    if line.closed {
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
    }

    let mut pieces = Vec::new();
    let mut dash_index = 0;
    let mut remaining = pattern[0].max(0.0);
    let mut on = true;
    let mut current: Vec<Point> = points.first().copied().into_iter().collect();

    for pair in points.windows(2) {
        let (mut a, b) = (pair[0], pair[1]);
        let mut seg_len = a.distance(b);
        while seg_len > 0.0 {
            if remaining >= seg_len {
                remaining -= seg_len;
                if on {
                    current.push(b);
                }
                seg_len = 0.0;
            } else {
                let split = a.lerp(b, remaining / seg_len);
                if on {
                    current.push(split);
                    pieces.push(Polyline {
                        points: std::mem::take(&mut current),
                        closed: false,
                    });
                } else {
                    current = vec![split];
                }
                seg_len -= remaining;
                a = split;
                on = !on;
                dash_index = (dash_index + 1) % pattern.len();
                remaining = pattern[dash_index].max(0.0);
            }
        }
    }
    if on && current.len() > 1 {
        pieces.push(Polyline {
            points: current,
            closed: false,
        });
    }
    pieces
}
