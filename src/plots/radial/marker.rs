//! Markers drawn on a radial plot.
//!
//! [`ValueMarker`]s become rings and [`IntervalMarker`]s become annuli, both
//! centered on the plot. [`CategoryMarker`]s highlight one category axis or
//! the sector around it.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::style::{Font, Stroke};

/// Appearance shared by all marker kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Line or fill color.
    pub paint: Rgba,
    /// Stroke for marker lines and rings.
    pub stroke: Stroke,
    /// Composite alpha while the marker is drawn.
    pub alpha: f32,
    /// Optional text label.
    pub label: Option<String>,
    /// Label font.
    pub label_font: Font,
    /// Label color.
    pub label_paint: Rgba,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            paint: Rgba::GRAY,
            stroke: Stroke::solid(0.5),
            alpha: 0.8,
            label: None,
            label_font: Font::new("sans-serif", 9.0),
            label_paint: Rgba::BLACK,
        }
    }
}

impl MarkerStyle {
    /// Default style with the given paint.
    #[must_use]
    pub fn with_paint(paint: Rgba) -> Self {
        Self {
            paint,
            ..Self::default()
        }
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the stroke.
    #[must_use]
    pub fn stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    /// Set the alpha, clamped to `[0, 1]`.
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}

/// Which part of a category's sector a [`CategoryMarker`] covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerRenderType {
    /// A line along the category axis itself.
    #[default]
    Center,
    /// A line to the angular midpoint shared with the previous category.
    LeftEdge,
    /// A line to the angular midpoint shared with the next category.
    RightEdge,
    /// The whole sector between both midpoints.
    BetweenEdges,
}

/// Marker bound to a category key.
///
/// The key is matched against column keys when series are extracted by row
/// and against row keys when extracted by column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMarker {
    key: String,
    #[serde(default)]
    style: MarkerStyle,
    #[serde(default)]
    render_type: MarkerRenderType,
    #[serde(default)]
    label_angle: f64,
    #[serde(default)]
    label_on_arc: bool,
}

impl CategoryMarker {
    /// Centered marker with the default style.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_style(key, MarkerStyle::default())
    }

    /// Centered marker with `style`.
    #[must_use]
    pub fn with_style(key: impl Into<String>, style: MarkerStyle) -> Self {
        Self {
            key: key.into(),
            style,
            render_type: MarkerRenderType::default(),
            label_angle: 0.0,
            label_on_arc: false,
        }
    }

    /// Category key this marker is bound to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Appearance.
    #[must_use]
    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    /// Mutable appearance.
    pub fn style_mut(&mut self) -> &mut MarkerStyle {
        &mut self.style
    }

    /// Sector coverage.
    #[must_use]
    pub fn render_type(&self) -> MarkerRenderType {
        self.render_type
    }

    /// Set the sector coverage.
    pub fn set_render_type(&mut self, render_type: MarkerRenderType) {
        self.render_type = render_type;
    }

    /// Builder form of [`set_render_type`](Self::set_render_type).
    #[must_use]
    pub fn render_as(mut self, render_type: MarkerRenderType) -> Self {
        self.render_type = render_type;
        self
    }

    /// Label rotation in degrees, counter-clockwise. Unused when the label
    /// follows the arc.
    #[must_use]
    pub fn label_angle(&self) -> f64 {
        self.label_angle
    }

    /// Set the label rotation.
    ///
    /// # Errors
    ///
    /// Rejects non-finite angles.
    pub fn set_label_angle(&mut self, degrees: f64) -> Result<()> {
        if !degrees.is_finite() {
            return Err(Error::invalid("label_angle", format!("{degrees} is not finite")));
        }
        self.label_angle = degrees;
        Ok(())
    }

    /// Whether the label is laid along the outer arc.
    #[must_use]
    pub fn is_label_on_arc(&self) -> bool {
        self.label_on_arc
    }

    /// Lay the label along the outer arc instead of rotating it.
    pub fn set_label_on_arc(&mut self, on_arc: bool) {
        self.label_on_arc = on_arc;
    }
}

/// Ring at a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMarker {
    /// Radial value of the ring.
    pub value: f64,
    /// Appearance.
    #[serde(default)]
    pub style: MarkerStyle,
}

impl ValueMarker {
    /// Ring at `value` with the default style.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            style: MarkerStyle::default(),
        }
    }

    /// Ring at `value` with `style`.
    #[must_use]
    pub fn with_style(value: f64, style: MarkerStyle) -> Self {
        Self { value, style }
    }
}

/// Band between two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalMarker {
    start: f64,
    end: f64,
    #[serde(default)]
    style: MarkerStyle,
}

impl IntervalMarker {
    /// Band from `start` to `end` with the default style.
    ///
    /// # Errors
    ///
    /// Rejects non-finite bounds and `start > end`.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        Self::with_style(start, end, MarkerStyle::default())
    }

    /// Band from `start` to `end` with `style`.
    ///
    /// # Errors
    ///
    /// Rejects non-finite bounds and `start > end`.
    pub fn with_style(start: f64, end: f64, style: MarkerStyle) -> Result<Self> {
        let marker = Self { start, end, style };
        marker.check_bounds()?;
        Ok(marker)
    }

    /// Re-check the constructor's bounds, for markers restored by serde.
    pub(crate) fn check_bounds(&self) -> Result<()> {
        let (start, end) = (self.start, self.end);
        if !start.is_finite() || !end.is_finite() {
            return Err(Error::invalid("interval", "bounds must be finite"));
        }
        if start > end {
            return Err(Error::invalid(
                "interval",
                format!("start {start} is greater than end {end}"),
            ));
        }
        Ok(())
    }

    /// Inner value.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Outer value.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Appearance.
    #[must_use]
    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }
}
