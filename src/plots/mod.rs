//! Plot types and the collaborators they draw with.
//!
//! [`RadialPlot`] is the plot itself. The other modules hold what it shares
//! with a host framework: the frame around the data area, change
//! notification, generators for labels and links, legend entries and
//! hit-testing info.

mod events;
mod frame;
mod generators;
mod info;
mod legend;
mod radial;

pub use events::{ChangeListeners, ListenerId, PlotChangeEvent};
pub use frame::PlotFrame;
pub use generators::{
    format_value, CategoryItemLabelGenerator, CategorySeriesLabelGenerator,
    CategoryToolTipGenerator, CategoryUrlGenerator, StandardCategoryItemLabelGenerator,
    StandardCategorySeriesLabelGenerator, StandardCategoryToolTipGenerator,
    StandardCategoryUrlGenerator, NULL_VALUE_STRING,
};
pub use info::{CategoryItemEntity, PlotRenderingInfo};
pub use legend::{LegendItem, LegendShape};
pub use radial::{
    arc_path, auto_compute_max_value, compute_plot_area, label_location, relative_length,
    scaled_area, wedge_path, CategoryMarker, IntervalMarker, MarkerRenderType, MarkerStyle,
    RadialPlot, ValueMarker, AUTO_MAX_VALUE, DEFAULT_AXIS_LABEL_GAP, DEFAULT_HEAD_PERCENT,
    DEFAULT_INTERIOR_GAP, DEFAULT_START_ANGLE, LABEL_EPSILON, MAX_INTERIOR_GAP, WEB_FILL_ALPHA,
};
