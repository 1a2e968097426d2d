//! Legend entries.

use kurbo::BezPath;
use serde::{Deserialize, Serialize};

use crate::canvas::{ellipse_path, rect_path};
use crate::color::Rgba;
use crate::geometry::Rect;
use crate::style::Stroke;

/// Swatch drawn next to a legend label, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendShape {
    /// Ellipse inscribed in the rectangle.
    Ellipse(Rect),
    /// The rectangle itself.
    Rect(Rect),
}

impl Default for LegendShape {
    fn default() -> Self {
        LegendShape::Ellipse(Rect::new(-4.0, -4.0, 8.0, 8.0))
    }
}

impl LegendShape {
    /// Bounding rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            LegendShape::Ellipse(r) | LegendShape::Rect(r) => *r,
        }
    }

    /// Outline as a path.
    #[must_use]
    pub fn to_path(&self) -> BezPath {
        match self {
            LegendShape::Ellipse(r) => ellipse_path(*r),
            LegendShape::Rect(r) => rect_path(*r),
        }
    }
}

/// One legend entry, describing how a series is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    /// Text shown in the legend.
    pub label: String,
    /// Longer description; the label unless a generator says otherwise.
    pub description: String,
    /// Tool-tip for the entry.
    pub tool_tip: Option<String>,
    /// Link for the entry.
    pub url: Option<String>,
    /// Swatch shape.
    pub shape: LegendShape,
    /// Swatch fill.
    pub fill_paint: Rgba,
    /// Swatch outline color.
    pub outline_paint: Rgba,
    /// Swatch outline stroke.
    pub outline_stroke: Stroke,
    /// Series key.
    pub series_key: String,
    /// Series index in extract order.
    pub series_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape_is_small_circle() {
        let shape = LegendShape::default();
        assert_eq!(shape.bounds(), Rect::new(-4.0, -4.0, 8.0, 8.0));
        assert!(matches!(shape, LegendShape::Ellipse(_)));
        assert!(!shape.to_path().elements().is_empty());
    }
}
