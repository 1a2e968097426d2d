//! Radial ("spider web") plot.
//!
//! Each category is an axis radiating from the center; each series is a
//! polygon whose vertices sit at `value / max` along those axes. The plot
//! owns its configuration (angles, gaps, per-axis and per-series styling,
//! markers) and reads values from a shared [`CategoryDataset`].
//!
//! Every per-axis and per-series lookup falls back to a default when
//! nothing was configured, because the number of axes and series is only
//! known when drawing.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use trueno_radar::prelude::*;
//!
//! let data = SimpleCategoryDataset::from_rows(
//!     &["Team A", "Team B"],
//!     &["Speed", "Power", "Range"],
//!     &[&[Some(4.0), Some(3.0), Some(5.0)], &[Some(2.0), Some(5.0), Some(1.0)]],
//! );
//! let mut plot = RadialPlot::with_dataset(Rc::new(data));
//! plot.set_interior_gap(0.2).unwrap();
//!
//! let svg = plot.to_svg(400, 400);
//! assert!(svg.contains("Speed"));
//! ```

mod draw;
mod layout;
mod marker;
mod persist;

pub use layout::{
    arc_path, auto_compute_max_value, compute_plot_area, label_location, relative_length,
    scaled_area, wedge_path, LABEL_EPSILON,
};
pub use marker::{CategoryMarker, IntervalMarker, MarkerRenderType, MarkerStyle, ValueMarker};

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::color::{series_palette, Rgba};
use crate::dataset::{CategoryDataset, DatasetChangeEvent, DatasetChangeListener, ExtractOrder};
use crate::error::{Error, Result};
use crate::geometry::{Insets, Rotation};
use crate::plots::events::{ChangeListeners, ListenerId, PlotChangeEvent};
use crate::plots::frame::PlotFrame;
use crate::plots::generators::{
    CategoryItemLabelGenerator, CategorySeriesLabelGenerator, CategoryToolTipGenerator,
    CategoryUrlGenerator,
};
use crate::plots::legend::{LegendItem, LegendShape};
use crate::style::{Font, Stroke};

/// Max-value sentinel: recompute from the data on every draw.
pub const AUTO_MAX_VALUE: f64 = -1.0;

/// Largest accepted interior gap.
pub const MAX_INTERIOR_GAP: f64 = 0.40;

/// Default interior gap on both axes.
pub const DEFAULT_INTERIOR_GAP: f64 = 0.25;

/// Default head marker size as a fraction of the plot area.
pub const DEFAULT_HEAD_PERCENT: f64 = 0.01;

/// Default category label gap as a fraction of the radius.
pub const DEFAULT_AXIS_LABEL_GAP: f64 = 0.10;

/// Default angle of the first category axis (12 o'clock).
pub const DEFAULT_START_ANGLE: f64 = 90.0;

/// Alpha used to fill series polygons when web filling is on.
pub const WEB_FILL_ALPHA: f32 = 0.1;

type Shared<T> = Option<Rc<T>>;

/// Radial plot of a category dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialPlot {
    #[serde(skip)]
    dataset: Shared<dyn CategoryDataset>,
    frame: PlotFrame,
    extract_order: ExtractOrder,
    start_angle: f64,
    direction: Rotation,
    interior_gap_horizontal: f64,
    interior_gap_vertical: f64,
    head_percent: f64,
    axis_label_gap: f64,
    max_value: f64,
    web_filled: bool,
    legend_item_shape: LegendShape,

    base_axis_line_paint: Rgba,
    base_axis_line_stroke: Stroke,
    axis_line_paints: BTreeMap<usize, Rgba>,
    axis_line_strokes: BTreeMap<usize, Stroke>,
    axis_line_visible: BTreeMap<usize, bool>,

    series_paint_override: Option<Rgba>,
    series_paints: BTreeMap<usize, Rgba>,
    base_series_paint: Option<Rgba>,
    series_outline_paint_override: Option<Rgba>,
    series_outline_paints: BTreeMap<usize, Rgba>,
    base_series_outline_paint: Rgba,
    series_outline_stroke_override: Option<Stroke>,
    series_outline_strokes: BTreeMap<usize, Stroke>,
    base_series_outline_stroke: Stroke,

    label_font: Font,
    label_paint: Rgba,

    category_markers: Vec<CategoryMarker>,
    value_markers: Vec<ValueMarker>,
    interval_markers: Vec<IntervalMarker>,

    #[serde(skip)]
    label_generator: Shared<dyn CategoryItemLabelGenerator>,
    #[serde(skip)]
    tool_tip_generator: Shared<dyn CategoryToolTipGenerator>,
    #[serde(skip)]
    url_generator: Shared<dyn CategoryUrlGenerator>,
    #[serde(skip)]
    legend_item_tool_tip_generator: Shared<dyn CategorySeriesLabelGenerator>,
    #[serde(skip)]
    legend_item_url_generator: Shared<dyn CategorySeriesLabelGenerator>,
    #[serde(skip)]
    listeners: ChangeListeners,
}

impl Default for RadialPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl RadialPlot {
    /// Plot with no dataset and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dataset: None,
            frame: PlotFrame::default(),
            extract_order: ExtractOrder::ByRow,
            start_angle: DEFAULT_START_ANGLE,
            direction: Rotation::Clockwise,
            interior_gap_horizontal: DEFAULT_INTERIOR_GAP,
            interior_gap_vertical: DEFAULT_INTERIOR_GAP,
            head_percent: DEFAULT_HEAD_PERCENT,
            axis_label_gap: DEFAULT_AXIS_LABEL_GAP,
            max_value: AUTO_MAX_VALUE,
            web_filled: true,
            legend_item_shape: LegendShape::default(),
            base_axis_line_paint: Rgba::BLACK,
            base_axis_line_stroke: Stroke::solid(1.0),
            axis_line_paints: BTreeMap::new(),
            axis_line_strokes: BTreeMap::new(),
            axis_line_visible: BTreeMap::new(),
            series_paint_override: None,
            series_paints: BTreeMap::new(),
            base_series_paint: None,
            series_outline_paint_override: None,
            series_outline_paints: BTreeMap::new(),
            base_series_outline_paint: Rgba::GRAY,
            series_outline_stroke_override: None,
            series_outline_strokes: BTreeMap::new(),
            base_series_outline_stroke: Stroke::solid(0.5),
            label_font: Font::new("sans-serif", 10.0),
            label_paint: Rgba::BLACK,
            category_markers: Vec::new(),
            value_markers: Vec::new(),
            interval_markers: Vec::new(),
            label_generator: None,
            tool_tip_generator: None,
            url_generator: None,
            legend_item_tool_tip_generator: None,
            legend_item_url_generator: None,
            listeners: ChangeListeners::default(),
        }
    }

    /// Plot of `dataset` with default settings.
    #[must_use]
    pub fn with_dataset(dataset: Rc<dyn CategoryDataset>) -> Self {
        Self {
            dataset: Some(dataset),
            ..Self::new()
        }
    }

    /// Short name of this plot kind.
    #[must_use]
    pub fn plot_type(&self) -> &'static str {
        "Spider Web Plot"
    }

    // ========================================================================
    // Change notification
    // ========================================================================

    /// Register a callback run after every successful mutation.
    pub fn add_change_listener(
        &mut self,
        listener: impl Fn(&PlotChangeEvent) + 'static,
    ) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Unregister a callback. Returns false if it was not registered.
    pub fn remove_change_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn change_listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn fire_change(&self, property: &'static str) {
        crate::log::trace!(property, "radial plot changed");
        self.listeners.notify(&PlotChangeEvent::new(property));
    }

    // ========================================================================
    // Dataset
    // ========================================================================

    /// The dataset, if any.
    #[must_use]
    pub fn dataset(&self) -> Option<&dyn CategoryDataset> {
        self.dataset.as_deref()
    }

    /// Replace the dataset and fire a `"dataset"` change.
    ///
    /// # Subscription
    ///
    /// [`CategoryDataset`] has no listener registry, so the plot does not
    /// subscribe to the new dataset or unsubscribe from the old one. The
    /// host that owns the dataset routes its change notifications to
    /// [`DatasetChangeListener::dataset_changed`] on this plot, and stops
    /// routing the old dataset's events when it swaps datasets here.
    pub fn set_dataset(&mut self, dataset: Option<Rc<dyn CategoryDataset>>) {
        self.dataset = dataset;
        self.fire_change("dataset");
    }

    /// Which table dimension holds the series.
    #[must_use]
    pub fn extract_order(&self) -> ExtractOrder {
        self.extract_order
    }

    /// Set the extract order.
    pub fn set_extract_order(&mut self, order: ExtractOrder) {
        self.extract_order = order;
        self.fire_change("extract_order");
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Angle of the first axis, in degrees counter-clockwise from 3 o'clock.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Set the start angle.
    ///
    /// # Errors
    ///
    /// Rejects non-finite angles.
    pub fn set_start_angle(&mut self, degrees: f64) -> Result<()> {
        check_finite("start_angle", degrees)?;
        self.start_angle = degrees;
        self.fire_change("start_angle");
        Ok(())
    }

    /// Direction in which successive axes are laid out.
    #[must_use]
    pub fn direction(&self) -> Rotation {
        self.direction
    }

    /// Set the layout direction.
    pub fn set_direction(&mut self, direction: Rotation) {
        self.direction = direction;
        self.fire_change("direction");
    }

    /// Horizontal interior gap, a fraction of the plot width.
    #[must_use]
    pub fn interior_gap_horizontal(&self) -> f64 {
        self.interior_gap_horizontal
    }

    /// Vertical interior gap, a fraction of the plot height.
    #[must_use]
    pub fn interior_gap_vertical(&self) -> f64 {
        self.interior_gap_vertical
    }

    /// Set both interior gaps.
    ///
    /// # Errors
    ///
    /// Rejects gaps outside `[0, MAX_INTERIOR_GAP]`; nothing changes.
    pub fn set_interior_gap(&mut self, gap: f64) -> Result<()> {
        self.set_interior_gaps(gap, gap)
    }

    /// Set the horizontal and vertical interior gaps.
    ///
    /// # Errors
    ///
    /// Rejects gaps outside `[0, MAX_INTERIOR_GAP]`; nothing changes.
    pub fn set_interior_gaps(&mut self, horizontal: f64, vertical: f64) -> Result<()> {
        check_gap(horizontal)?;
        check_gap(vertical)?;
        self.interior_gap_horizontal = horizontal;
        self.interior_gap_vertical = vertical;
        self.fire_change("interior_gap");
        Ok(())
    }

    /// Head marker size as a fraction of the plot area.
    #[must_use]
    pub fn head_percent(&self) -> f64 {
        self.head_percent
    }

    /// Set the head marker size.
    ///
    /// # Errors
    ///
    /// Rejects negative or non-finite values.
    pub fn set_head_percent(&mut self, percent: f64) -> Result<()> {
        check_non_negative("head_percent", percent)?;
        self.head_percent = percent;
        self.fire_change("head_percent");
        Ok(())
    }

    /// Gap between axis end and category label, a fraction of the radius.
    #[must_use]
    pub fn axis_label_gap(&self) -> f64 {
        self.axis_label_gap
    }

    /// Set the axis label gap.
    ///
    /// # Errors
    ///
    /// Rejects negative or non-finite values.
    pub fn set_axis_label_gap(&mut self, gap: f64) -> Result<()> {
        check_non_negative("axis_label_gap", gap)?;
        self.axis_label_gap = gap;
        self.fire_change("axis_label_gap");
        Ok(())
    }

    /// Configured maximum, or [`AUTO_MAX_VALUE`].
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// True while the maximum is recomputed on every draw.
    #[must_use]
    pub fn is_auto_max_value(&self) -> bool {
        self.max_value == AUTO_MAX_VALUE
    }

    /// Fix the value that maps to the outer ring.
    ///
    /// # Errors
    ///
    /// Rejects non-finite values.
    pub fn set_max_value(&mut self, max: f64) -> Result<()> {
        check_finite("max_value", max)?;
        self.max_value = max;
        self.fire_change("max_value");
        Ok(())
    }

    /// Go back to computing the maximum from the data.
    pub fn set_auto_max_value(&mut self) {
        self.max_value = AUTO_MAX_VALUE;
        self.fire_change("max_value");
    }

    /// Whether series polygons are filled.
    #[must_use]
    pub fn is_web_filled(&self) -> bool {
        self.web_filled
    }

    /// Enable or disable polygon fill.
    pub fn set_web_filled(&mut self, filled: bool) {
        self.web_filled = filled;
        self.fire_change("web_filled");
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Background, outline and no-data settings.
    #[must_use]
    pub fn frame(&self) -> &PlotFrame {
        &self.frame
    }

    /// Replace the frame settings.
    ///
    /// # Errors
    ///
    /// Rejects alphas outside `[0, 1]`.
    pub fn set_frame(&mut self, frame: PlotFrame) -> Result<()> {
        check_alpha("background_alpha", frame.background_alpha)?;
        check_alpha("foreground_alpha", frame.foreground_alpha)?;
        self.frame = frame;
        self.fire_change("frame");
        Ok(())
    }

    /// Set the insets.
    pub fn set_insets(&mut self, insets: Insets) {
        self.frame.insets = insets;
        self.fire_change("insets");
    }

    /// Set the background paint.
    pub fn set_background_paint(&mut self, paint: Option<Rgba>) {
        self.frame.background_paint = paint;
        self.fire_change("background_paint");
    }

    /// Set the outline paint.
    pub fn set_outline_paint(&mut self, paint: Option<Rgba>) {
        self.frame.outline_paint = paint;
        self.fire_change("outline_paint");
    }

    /// Set the foreground alpha.
    ///
    /// # Errors
    ///
    /// Rejects values outside `[0, 1]`.
    pub fn set_foreground_alpha(&mut self, alpha: f32) -> Result<()> {
        check_alpha("foreground_alpha", alpha)?;
        self.frame.foreground_alpha = alpha;
        self.fire_change("foreground_alpha");
        Ok(())
    }

    /// Set the message shown when there is no data.
    pub fn set_no_data_message(&mut self, message: Option<String>) {
        self.frame.no_data_message = message;
        self.fire_change("no_data_message");
    }

    // ========================================================================
    // Axis lines
    // ========================================================================

    /// Axis line paint for axis `index`.
    #[must_use]
    pub fn axis_line_paint(&self, index: usize) -> Rgba {
        self.axis_line_paints
            .get(&index)
            .copied()
            .unwrap_or(self.base_axis_line_paint)
    }

    /// Set (or with `None`, clear) the paint of one axis.
    pub fn set_axis_line_paint(&mut self, index: usize, paint: Option<Rgba>) {
        set_entry(&mut self.axis_line_paints, index, paint);
        self.fire_change("axis_line_paint");
    }

    /// Paint used by axes without their own.
    #[must_use]
    pub fn base_axis_line_paint(&self) -> Rgba {
        self.base_axis_line_paint
    }

    /// Set the fallback axis paint.
    pub fn set_base_axis_line_paint(&mut self, paint: Rgba) {
        self.base_axis_line_paint = paint;
        self.fire_change("axis_line_paint");
    }

    /// Axis line stroke for axis `index`.
    #[must_use]
    pub fn axis_line_stroke(&self, index: usize) -> &Stroke {
        self.axis_line_strokes
            .get(&index)
            .unwrap_or(&self.base_axis_line_stroke)
    }

    /// Set (or with `None`, clear) the stroke of one axis.
    pub fn set_axis_line_stroke(&mut self, index: usize, stroke: Option<Stroke>) {
        set_entry(&mut self.axis_line_strokes, index, stroke);
        self.fire_change("axis_line_stroke");
    }

    /// Stroke used by axes without their own.
    #[must_use]
    pub fn base_axis_line_stroke(&self) -> &Stroke {
        &self.base_axis_line_stroke
    }

    /// Set the fallback axis stroke.
    pub fn set_base_axis_line_stroke(&mut self, stroke: Stroke) {
        self.base_axis_line_stroke = stroke;
        self.fire_change("axis_line_stroke");
    }

    /// Whether the line for axis `index` is drawn. Hidden unless turned on.
    #[must_use]
    pub fn is_axis_line_visible(&self, index: usize) -> bool {
        self.axis_line_visible.get(&index).copied().unwrap_or(false)
    }

    /// Show or hide one axis line.
    pub fn set_axis_line_visible(&mut self, index: usize, visible: bool) {
        self.axis_line_visible.insert(index, visible);
        self.fire_change("axis_line_visible");
    }

    // ========================================================================
    // Series styling
    // ========================================================================

    /// Fill paint of `series`: the override, else the per-series entry, else
    /// the base paint, else the default palette.
    #[must_use]
    pub fn series_paint(&self, series: usize) -> Rgba {
        self.series_paint_override
            .or_else(|| self.series_paints.get(&series).copied())
            .or(self.base_series_paint)
            .unwrap_or_else(|| series_palette(series))
    }

    /// Set (or with `None`, clear) the paint of one series.
    pub fn set_series_paint(&mut self, series: usize, paint: Option<Rgba>) {
        set_entry(&mut self.series_paints, series, paint);
        self.fire_change("series_paint");
    }

    /// Paint applied to every series, ignoring per-series entries.
    #[must_use]
    pub fn series_paint_override(&self) -> Option<Rgba> {
        self.series_paint_override
    }

    /// Set or clear the all-series paint.
    pub fn set_series_paint_override(&mut self, paint: Option<Rgba>) {
        self.series_paint_override = paint;
        self.fire_change("series_paint");
    }

    /// Fallback paint; `None` means the default palette.
    #[must_use]
    pub fn base_series_paint(&self) -> Option<Rgba> {
        self.base_series_paint
    }

    /// Set the fallback paint.
    pub fn set_base_series_paint(&mut self, paint: Option<Rgba>) {
        self.base_series_paint = paint;
        self.fire_change("series_paint");
    }

    /// Outline paint of `series`.
    #[must_use]
    pub fn series_outline_paint(&self, series: usize) -> Rgba {
        self.series_outline_paint_override
            .or_else(|| self.series_outline_paints.get(&series).copied())
            .unwrap_or(self.base_series_outline_paint)
    }

    /// Set (or with `None`, clear) the outline paint of one series.
    pub fn set_series_outline_paint(&mut self, series: usize, paint: Option<Rgba>) {
        set_entry(&mut self.series_outline_paints, series, paint);
        self.fire_change("series_outline_paint");
    }

    /// Outline paint applied to every series.
    #[must_use]
    pub fn series_outline_paint_override(&self) -> Option<Rgba> {
        self.series_outline_paint_override
    }

    /// Set or clear the all-series outline paint.
    pub fn set_series_outline_paint_override(&mut self, paint: Option<Rgba>) {
        self.series_outline_paint_override = paint;
        self.fire_change("series_outline_paint");
    }

    /// Fallback outline paint.
    #[must_use]
    pub fn base_series_outline_paint(&self) -> Rgba {
        self.base_series_outline_paint
    }

    /// Set the fallback outline paint.
    pub fn set_base_series_outline_paint(&mut self, paint: Rgba) {
        self.base_series_outline_paint = paint;
        self.fire_change("series_outline_paint");
    }

    /// Outline stroke of `series`.
    #[must_use]
    pub fn series_outline_stroke(&self, series: usize) -> &Stroke {
        self.series_outline_stroke_override
            .as_ref()
            .or_else(|| self.series_outline_strokes.get(&series))
            .unwrap_or(&self.base_series_outline_stroke)
    }

    /// Set (or with `None`, clear) the outline stroke of one series.
    pub fn set_series_outline_stroke(&mut self, series: usize, stroke: Option<Stroke>) {
        set_entry(&mut self.series_outline_strokes, series, stroke);
        self.fire_change("series_outline_stroke");
    }

    /// Outline stroke applied to every series.
    #[must_use]
    pub fn series_outline_stroke_override(&self) -> Option<&Stroke> {
        self.series_outline_stroke_override.as_ref()
    }

    /// Set or clear the all-series outline stroke.
    pub fn set_series_outline_stroke_override(&mut self, stroke: Option<Stroke>) {
        self.series_outline_stroke_override = stroke;
        self.fire_change("series_outline_stroke");
    }

    /// Fallback outline stroke.
    #[must_use]
    pub fn base_series_outline_stroke(&self) -> &Stroke {
        &self.base_series_outline_stroke
    }

    /// Set the fallback outline stroke.
    pub fn set_base_series_outline_stroke(&mut self, stroke: Stroke) {
        self.base_series_outline_stroke = stroke;
        self.fire_change("series_outline_stroke");
    }

    // ========================================================================
    // Labels and generators
    // ========================================================================

    /// Category label font.
    #[must_use]
    pub fn label_font(&self) -> &Font {
        &self.label_font
    }

    /// Set the category label font.
    pub fn set_label_font(&mut self, font: Font) {
        self.label_font = font;
        self.fire_change("label_font");
    }

    /// Category label color.
    #[must_use]
    pub fn label_paint(&self) -> Rgba {
        self.label_paint
    }

    /// Set the category label color.
    pub fn set_label_paint(&mut self, paint: Rgba) {
        self.label_paint = paint;
        self.fire_change("label_paint");
    }

    /// Category label generator; `None` means key-based labels.
    #[must_use]
    pub fn label_generator(&self) -> Option<&Rc<dyn CategoryItemLabelGenerator>> {
        self.label_generator.as_ref()
    }

    /// Set the category label generator.
    pub fn set_label_generator(&mut self, generator: Option<Rc<dyn CategoryItemLabelGenerator>>) {
        self.label_generator = generator;
        self.fire_change("label_generator");
    }

    /// Tool-tip generator for plotted points.
    #[must_use]
    pub fn tool_tip_generator(&self) -> Option<&Rc<dyn CategoryToolTipGenerator>> {
        self.tool_tip_generator.as_ref()
    }

    /// Set the tool-tip generator.
    pub fn set_tool_tip_generator(&mut self, generator: Option<Rc<dyn CategoryToolTipGenerator>>) {
        self.tool_tip_generator = generator;
        self.fire_change("tool_tip_generator");
    }

    /// URL generator for plotted points.
    #[must_use]
    pub fn url_generator(&self) -> Option<&Rc<dyn CategoryUrlGenerator>> {
        self.url_generator.as_ref()
    }

    /// Set the URL generator.
    pub fn set_url_generator(&mut self, generator: Option<Rc<dyn CategoryUrlGenerator>>) {
        self.url_generator = generator;
        self.fire_change("url_generator");
    }

    /// Tool-tip generator for legend items.
    #[must_use]
    pub fn legend_item_tool_tip_generator(&self) -> Option<&Rc<dyn CategorySeriesLabelGenerator>> {
        self.legend_item_tool_tip_generator.as_ref()
    }

    /// Set the legend tool-tip generator.
    pub fn set_legend_item_tool_tip_generator(
        &mut self,
        generator: Option<Rc<dyn CategorySeriesLabelGenerator>>,
    ) {
        self.legend_item_tool_tip_generator = generator;
        self.fire_change("legend_item_tool_tip_generator");
    }

    /// URL generator for legend items.
    #[must_use]
    pub fn legend_item_url_generator(&self) -> Option<&Rc<dyn CategorySeriesLabelGenerator>> {
        self.legend_item_url_generator.as_ref()
    }

    /// Set the legend URL generator.
    pub fn set_legend_item_url_generator(
        &mut self,
        generator: Option<Rc<dyn CategorySeriesLabelGenerator>>,
    ) {
        self.legend_item_url_generator = generator;
        self.fire_change("legend_item_url_generator");
    }

    // ========================================================================
    // Legend
    // ========================================================================

    /// Swatch shape shared by all legend items.
    #[must_use]
    pub fn legend_item_shape(&self) -> LegendShape {
        self.legend_item_shape
    }

    /// Set the legend swatch shape.
    pub fn set_legend_item_shape(&mut self, shape: LegendShape) {
        self.legend_item_shape = shape;
        self.fire_change("legend_item_shape");
    }

    /// One legend item per series key, in extract order.
    #[must_use]
    pub fn legend_items(&self) -> Vec<LegendItem> {
        let Some(dataset) = self.dataset() else {
            return Vec::new();
        };
        let keys = match self.extract_order {
            ExtractOrder::ByRow => dataset.row_keys(),
            ExtractOrder::ByColumn => dataset.column_keys(),
        };
        keys.into_iter()
            .enumerate()
            .map(|(series, key)| LegendItem {
                label: key.clone(),
                description: key.clone(),
                tool_tip: self
                    .legend_item_tool_tip_generator
                    .as_ref()
                    .and_then(|g| g.generate_label(dataset, series)),
                url: self
                    .legend_item_url_generator
                    .as_ref()
                    .and_then(|g| g.generate_label(dataset, series)),
                shape: self.legend_item_shape,
                fill_paint: self.series_paint(series),
                outline_paint: self.series_outline_paint(series),
                outline_stroke: self.series_outline_stroke(series).clone(),
                series_key: key,
                series_index: series,
            })
            .collect()
    }

    // ========================================================================
    // Markers
    // ========================================================================

    /// Category markers, in drawing order.
    #[must_use]
    pub fn category_markers(&self) -> &[CategoryMarker] {
        &self.category_markers
    }

    /// Add a category marker.
    pub fn add_category_marker(&mut self, marker: CategoryMarker) {
        self.category_markers.push(marker);
        self.fire_change("category_markers");
    }

    /// Remove the first marker equal to `marker`. Returns whether one was
    /// removed.
    pub fn remove_category_marker(&mut self, marker: &CategoryMarker) -> bool {
        let removed = remove_first(&mut self.category_markers, marker);
        if removed {
            self.fire_change("category_markers");
        }
        removed
    }

    /// Value markers, in drawing order.
    #[must_use]
    pub fn value_markers(&self) -> &[ValueMarker] {
        &self.value_markers
    }

    /// Add a value marker.
    pub fn add_value_marker(&mut self, marker: ValueMarker) {
        self.value_markers.push(marker);
        self.fire_change("value_markers");
    }

    /// Remove the first marker equal to `marker`.
    pub fn remove_value_marker(&mut self, marker: &ValueMarker) -> bool {
        let removed = remove_first(&mut self.value_markers, marker);
        if removed {
            self.fire_change("value_markers");
        }
        removed
    }

    /// Interval markers, in drawing order.
    #[must_use]
    pub fn interval_markers(&self) -> &[IntervalMarker] {
        &self.interval_markers
    }

    /// Add an interval marker.
    pub fn add_interval_marker(&mut self, marker: IntervalMarker) {
        self.interval_markers.push(marker);
        self.fire_change("interval_markers");
    }

    /// Remove the first marker equal to `marker`.
    pub fn remove_interval_marker(&mut self, marker: &IntervalMarker) -> bool {
        let removed = remove_first(&mut self.interval_markers, marker);
        if removed {
            self.fire_change("interval_markers");
        }
        removed
    }

    /// Remove every marker of every kind.
    pub fn clear_markers(&mut self) {
        self.category_markers.clear();
        self.value_markers.clear();
        self.interval_markers.clear();
        self.fire_change("markers");
    }

    /// Check invariants that deserialization cannot enforce.
    fn validate(&self) -> Result<()> {
        check_gap(self.interior_gap_horizontal)?;
        check_gap(self.interior_gap_vertical)?;
        check_finite("start_angle", self.start_angle)?;
        check_finite("max_value", self.max_value)?;
        check_non_negative("head_percent", self.head_percent)?;
        check_non_negative("axis_label_gap", self.axis_label_gap)?;
        check_alpha("background_alpha", self.frame.background_alpha)?;
        check_alpha("foreground_alpha", self.frame.foreground_alpha)?;
        for marker in &self.value_markers {
            check_alpha("marker_alpha", marker.style.alpha)?;
        }
        for marker in &self.interval_markers {
            marker.check_bounds()?;
            check_alpha("marker_alpha", marker.style().alpha)?;
        }
        for marker in &self.category_markers {
            check_finite("label_angle", marker.label_angle())?;
            check_alpha("marker_alpha", marker.style().alpha)?;
        }
        Ok(())
    }
}

impl DatasetChangeListener for RadialPlot {
    fn dataset_changed(&mut self, _event: &DatasetChangeEvent) {
        crate::log::debug!("dataset changed");
        self.fire_change("dataset");
    }
}

/// Generators are compared by identity; the dataset and listeners are not
/// compared.
impl PartialEq for RadialPlot {
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame
            && self.extract_order == other.extract_order
            && self.start_angle == other.start_angle
            && self.direction == other.direction
            && self.interior_gap_horizontal == other.interior_gap_horizontal
            && self.interior_gap_vertical == other.interior_gap_vertical
            && self.head_percent == other.head_percent
            && self.axis_label_gap == other.axis_label_gap
            && self.max_value == other.max_value
            && self.web_filled == other.web_filled
            && self.legend_item_shape == other.legend_item_shape
            && self.base_axis_line_paint == other.base_axis_line_paint
            && self.base_axis_line_stroke == other.base_axis_line_stroke
            && self.axis_line_paints == other.axis_line_paints
            && self.axis_line_strokes == other.axis_line_strokes
            && self.axis_line_visible == other.axis_line_visible
            && self.series_paint_override == other.series_paint_override
            && self.series_paints == other.series_paints
            && self.base_series_paint == other.base_series_paint
            && self.series_outline_paint_override == other.series_outline_paint_override
            && self.series_outline_paints == other.series_outline_paints
            && self.base_series_outline_paint == other.base_series_outline_paint
            && self.series_outline_stroke_override == other.series_outline_stroke_override
            && self.series_outline_strokes == other.series_outline_strokes
            && self.base_series_outline_stroke == other.base_series_outline_stroke
            && self.label_font == other.label_font
            && self.label_paint == other.label_paint
            && self.category_markers == other.category_markers
            && self.value_markers == other.value_markers
            && self.interval_markers == other.interval_markers
            && same_generator(&self.label_generator, &other.label_generator)
            && same_generator(&self.tool_tip_generator, &other.tool_tip_generator)
            && same_generator(&self.url_generator, &other.url_generator)
            && same_generator(
                &self.legend_item_tool_tip_generator,
                &other.legend_item_tool_tip_generator,
            )
            && same_generator(
                &self.legend_item_url_generator,
                &other.legend_item_url_generator,
            )
    }
}

fn same_generator<T: ?Sized>(a: &Shared<T>, b: &Shared<T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

fn set_entry<T>(map: &mut BTreeMap<usize, T>, index: usize, value: Option<T>) {
    match value {
        Some(v) => {
            map.insert(index, v);
        }
        None => {
            map.remove(&index);
        }
    }
}

fn remove_first<T: PartialEq>(list: &mut Vec<T>, item: &T) -> bool {
    match list.iter().position(|m| m == item) {
        Some(i) => {
            list.remove(i);
            true
        }
        None => false,
    }
}

fn reject(name: &'static str, reason: String) -> Error {
    crate::log::warn!(name, reason = %reason, "rejected radial plot setting");
    Error::invalid(name, reason)
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(reject(name, format!("{value} is not finite")))
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(reject(name, format!("{value} is negative")));
    }
    Ok(())
}

fn check_gap(gap: f64) -> Result<()> {
    if (0.0..=MAX_INTERIOR_GAP).contains(&gap) {
        Ok(())
    } else {
        Err(reject(
            "interior_gap",
            format!("{gap} is outside [0, {MAX_INTERIOR_GAP}]"),
        ))
    }
}

fn check_alpha(name: &'static str, alpha: f32) -> Result<()> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(reject(name, format!("{alpha} is outside [0, 1]")))
    }
}
