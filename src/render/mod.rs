//! Rasterization of flattened geometry.
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: hairlines with sub-pixel accuracy
//! - **Scanline fill**: non-zero and even-odd polygon fill with 4x vertical
//!   supersampling and exact horizontal coverage
//! - **Stroke expansion**: wide strokes become oriented quads plus cap and
//!   join pieces, filled in one pass
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

mod primitives;

pub use primitives::{draw_line_aa, fill_polygons, stroke_outline, stroke_polyline};
