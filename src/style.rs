//! Stroke and font descriptors.
//!
//! These are plain values: they describe how a canvas should outline a path
//! or set text, and they serialize as part of persisted plot definitions.

use serde::{Deserialize, Serialize};

/// End decoration of an open stroked path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    /// Flat end at the path endpoint.
    Butt,
    /// Semicircular end.
    Round,
    /// Square end extending half the width past the endpoint.
    #[default]
    Square,
}

/// Decoration where two stroked segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    /// Sharp corner.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Cut-off corner.
    Bevel,
}

/// Outline style for stroked paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Line width in user units.
    pub width: f64,
    /// Dash pattern (on, off, on, ...); empty for a solid line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash: Vec<f64>,
    /// End caps.
    #[serde(default)]
    pub cap: LineCap,
    /// Segment joins.
    #[serde(default)]
    pub join: LineJoin,
}

impl Default for Stroke {
    fn default() -> Self {
        Self::solid(1.0)
    }
}

impl Stroke {
    /// A solid stroke of the given width.
    #[must_use]
    pub fn solid(width: f64) -> Self {
        Self {
            width,
            dash: Vec::new(),
            cap: LineCap::default(),
            join: LineJoin::default(),
        }
    }

    /// A dashed stroke.
    #[must_use]
    pub fn dashed(width: f64, dash: &[f64]) -> Self {
        Self {
            dash: dash.to_vec(),
            ..Self::solid(width)
        }
    }

    /// Set the end caps.
    #[must_use]
    pub fn cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set the joins.
    #[must_use]
    pub fn join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }
}

/// Font request handed to the canvas' font metrics provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Family name, e.g. `sans-serif`.
    pub family: String,
    /// Point size.
    pub size: f64,
    /// Bold weight.
    #[serde(default)]
    pub bold: bool,
    /// Italic style.
    #[serde(default)]
    pub italic: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self::new("sans-serif", 10.0)
    }
}

impl Font {
    /// A plain font.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// A bold variant of this font.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// An italic variant of this font.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}
