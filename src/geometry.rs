//! Geometric primitives and polar mapping helpers.
//!
//! Angles are in degrees, measured from the positive x-axis (3 o'clock) and
//! increasing counter-clockwise, the same convention as an arc. Screen y grows
//! downward, so the y component of a polar mapping is inverted.

use serde::{Deserialize, Serialize};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        distance(self, other)
    }

    /// Linear interpolation between two points.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        kurbo::Point::new(p.x, p.y)
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Point::new(p.x, p.y)
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f64,
    /// Y coordinate of the top-left corner.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.max_x()
            && point.y >= self.y
            && point.y <= self.max_y()
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Right edge.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Intersection with another rectangle, or an empty rectangle at the
    /// overlap origin when they do not meet.
    #[must_use]
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());
        Rect::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
    }

    /// Whether the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        kurbo::Rect::new(r.x, r.y, r.max_x(), r.max_y())
    }
}

impl From<kurbo::Rect> for Rect {
    fn from(r: kurbo::Rect) -> Self {
        Rect::new(r.x0, r.y0, r.width(), r.height())
    }
}

/// Space reserved around a plot, in absolute units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    /// Top inset.
    pub top: f64,
    /// Left inset.
    pub left: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Right inset.
    pub right: f64,
}

impl Insets {
    /// Same inset on every side.
    #[must_use]
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            left: v,
            bottom: v,
            right: v,
        }
    }

    /// Shrink `area` by these insets. Width and height never go negative.
    #[must_use]
    pub fn trim(&self, area: Rect) -> Rect {
        Rect::new(
            area.x + self.left,
            area.y + self.top,
            (area.width - self.left - self.right).max(0.0),
            (area.height - self.top - self.bottom).max(0.0),
        )
    }
}

/// Rotation direction for successive category axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    /// Categories advance clockwise (angle decreases).
    #[default]
    Clockwise,
    /// Categories advance counter-clockwise (angle increases).
    CounterClockwise,
}

impl Rotation {
    /// Signed multiplier applied to angular steps: -1 clockwise, +1 otherwise.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Rotation::Clockwise => -1.0,
            Rotation::CounterClockwise => 1.0,
        }
    }
}

/// Map a polar coordinate onto the ellipse inscribed in `bounds`.
///
/// `relative_length` is a fraction of the half-width/half-height, so 0.0 is
/// the center of `bounds` and 1.0 lies on the inscribed ellipse.
#[must_use]
pub fn polar_to_point(bounds: Rect, angle_degrees: f64, relative_length: f64) -> Point {
    let radians = angle_degrees.to_radians();
    let x = radians.cos() * relative_length * bounds.width / 2.0;
    let y = -radians.sin() * relative_length * bounds.height / 2.0;
    let center = bounds.center();
    Point::new(center.x + x, center.y + y)
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p1: Point, p2: Point) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}

/// Angular offset of category `cat_index` from the start angle.
#[must_use]
pub fn angle_for_category(cat_count: usize, cat_index: usize, direction: Rotation) -> f64 {
    if cat_count == 0 {
        return 0.0;
    }
    direction.factor() * cat_index as f64 * 360.0 / cat_count as f64
}

/// Normalize an angle in degrees into `(-180, 180]`.
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}
