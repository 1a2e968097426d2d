//! # Trueno-Radar
//!
//! Radial ("spider web") charts for category data, with SVG and PNG output.
//!
//! A [`RadialPlot`](plots::RadialPlot) draws each category as an axis
//! radiating from a shared center and each series as a polygon through its
//! values. Interval bands, value rings and category markers can be layered
//! underneath. Drawing goes through the [`Canvas`](canvas::Canvas) trait, so
//! the same plot renders to a recording canvas in tests, to SVG, or to an
//! anti-aliased framebuffer.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use trueno_radar::prelude::*;
//!
//! let data = SimpleCategoryDataset::from_rows(
//!     &["2024", "2025"],
//!     &["Latency", "Throughput", "Cost", "Uptime"],
//!     &[
//!         &[Some(3.0), Some(4.0), Some(2.0), Some(5.0)],
//!         &[Some(4.0), Some(5.0), Some(3.0), Some(5.0)],
//!     ],
//! );
//! let mut plot = RadialPlot::with_dataset(Rc::new(data));
//! plot.add_interval_marker(IntervalMarker::new(4.0, 5.0)?);
//!
//! let fb = plot.to_framebuffer(320, 320)?;
//! assert_eq!(fb.width(), 320);
//! # Ok::<(), trueno_radar::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `tracing`: debug logging of the draw pipeline and rejected settings
//!
//! ## References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

mod log;

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and the default series palette.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives and polar mapping.
pub mod geometry;

/// Strokes and fonts.
pub mod style;

/// Category datasets.
pub mod dataset;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Radial plot and its collaborators.
pub mod plots;

/// Glyph outlines laid along a path.
pub mod text_path;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Drawing surfaces (recording, SVG, raster).
pub mod canvas;

/// Rasterization of flattened geometry.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-radar operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_radar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, RasterCanvas, RecordingCanvas, SvgCanvas};
    pub use crate::color::{Hsla, Rgba};
    pub use crate::dataset::{
        CategoryDataset, DatasetChangeEvent, DatasetChangeListener, ExtractOrder,
        SimpleCategoryDataset,
    };
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Insets, Point, Rect, Rotation};
    pub use crate::output::{PngEncoder, SvgEncoder};
    pub use crate::plots::{
        CategoryMarker, IntervalMarker, LegendItem, LegendShape, MarkerRenderType, MarkerStyle,
        PlotChangeEvent, PlotFrame, PlotRenderingInfo, RadialPlot, ValueMarker,
    };
    pub use crate::style::{Font, LineCap, LineJoin, Stroke};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
