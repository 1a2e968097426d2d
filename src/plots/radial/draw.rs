//! Drawing a radial plot onto a [`Canvas`].

use std::path::Path;

use super::layout::{
    arc_path, compute_plot_area, label_location, relative_length, scaled_area, wedge_path,
};
use super::{CategoryMarker, MarkerRenderType, MarkerStyle, RadialPlot, WEB_FILL_ALPHA};
use crate::canvas::{
    ellipse_path, line_path, polygon_path, with_alpha, with_clip, Canvas, FillRule, RasterCanvas,
    SvgCanvas, TextAnchor, TextStyle,
};
use crate::dataset::{CategoryDataset, ExtractOrder};
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{polar_to_point, Point, Rect};
use crate::output::{PngEncoder, SvgEncoder};
use crate::plots::info::{CategoryItemEntity, PlotRenderingInfo};
use crate::text_path::TextStroke;

/// Extra sweep, in degrees, given to on-arc labels so the last glyph fits.
const ARC_LABEL_SLACK: f64 = 5.0;

/// Horizontal offset of value and interval marker labels from their ring.
const MARKER_LABEL_OFFSET: f64 = 2.0;

impl RadialPlot {
    /// Draw the plot into `area`.
    ///
    /// Clip and composite alpha are restored before returning, on every
    /// path. When `info` is given it receives the plot area and one entity
    /// per plotted point.
    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        area: Rect,
        mut info: Option<&mut PlotRenderingInfo>,
    ) {
        let area = self.frame().insets.trim(area);
        if let Some(info) = info.as_deref_mut() {
            info.set_plot_area(area);
            info.set_data_area(area);
        }

        self.frame().draw_background(canvas, area);
        self.frame().draw_outline(canvas, area);

        with_clip(canvas, area, |canvas| {
            with_alpha(canvas, self.frame().foreground_alpha, |canvas| {
                match self.dataset().filter(|d| !d.is_empty()) {
                    Some(dataset) => self.draw_data(canvas, dataset, area, info),
                    None => {
                        crate::log::debug!("radial plot has no data");
                        self.frame().draw_no_data_message(canvas, area);
                    }
                }
            });
        });

        self.frame().draw_outline(canvas, area);
    }

    fn draw_data(
        &self,
        canvas: &mut dyn Canvas,
        dataset: &dyn CategoryDataset,
        area: Rect,
        mut info: Option<&mut PlotRenderingInfo>,
    ) {
        let (series_count, category_count) = self.extract_order().dimensions(dataset);
        let max = self.max_value_for(dataset);
        let plot_area = compute_plot_area(
            area,
            self.interior_gap_horizontal(),
            self.interior_gap_vertical(),
        );
        crate::log::debug!(
            series = series_count,
            categories = category_count,
            max = max,
            "drawing radial plot"
        );

        self.draw_interval_markers(canvas, plot_area, max);
        self.draw_value_markers(canvas, plot_area, max);

        let band = self.outer_band_length(max);
        for category in 0..category_count {
            let angle = self.category_angle(category_count, category);
            if self.is_axis_line_visible(category) {
                let end = polar_to_point(plot_area, angle, 1.0);
                canvas.stroke(
                    &line_path(plot_area.center(), end),
                    self.axis_line_stroke(category),
                    self.axis_line_paint(category),
                );
            }
            if let Some(key) = category_key(dataset, self.extract_order(), category) {
                for marker in self.category_markers().iter().filter(|m| m.key() == key) {
                    self.draw_category_marker(canvas, marker, plot_area, angle, category_count, band);
                }
            }
            self.draw_category_label(canvas, dataset, plot_area, category, angle);
        }

        for series in 0..series_count {
            self.draw_radar_poly(canvas, dataset, plot_area, series, max, info.as_deref_mut());
        }
    }

    fn draw_interval_markers(&self, canvas: &mut dyn Canvas, plot_area: Rect, max: f64) {
        for marker in self.interval_markers() {
            let outer = relative_length(marker.end(), max);
            if outer <= 0.0 {
                continue;
            }
            let inner = relative_length(marker.start(), max);
            let mut annulus = ellipse_path(scaled_area(plot_area, outer));
            if inner > 0.0 {
                let hole = ellipse_path(scaled_area(plot_area, inner));
                annulus.extend(hole.elements().iter().copied());
            }
            let style = marker.style();
            with_alpha(canvas, style.alpha, |c| {
                c.fill(&annulus, FillRule::EvenOdd, style.paint);
            });
            self.draw_ring_label(canvas, style, plot_area, outer);
        }
    }

    fn draw_value_markers(&self, canvas: &mut dyn Canvas, plot_area: Rect, max: f64) {
        for marker in self.value_markers() {
            let r = relative_length(marker.value, max);
            if r <= 0.0 {
                continue;
            }
            let ring = ellipse_path(scaled_area(plot_area, r));
            let style = &marker.style;
            with_alpha(canvas, style.alpha, |c| c.stroke(&ring, &style.stroke, style.paint));
            self.draw_ring_label(canvas, style, plot_area, r);
        }
    }

    /// Value and interval labels sit where their ring crosses the first axis.
    fn draw_ring_label(&self, canvas: &mut dyn Canvas, style: &MarkerStyle, plot_area: Rect, r: f64) {
        let Some(label) = style.label.as_deref() else {
            return;
        };
        let at = polar_to_point(plot_area, self.start_angle(), r);
        canvas.draw_text(
            label,
            Point::new(at.x + MARKER_LABEL_OFFSET, at.y),
            &TextStyle::new(&style.label_font, style.label_paint),
        );
    }

    fn draw_category_marker(
        &self,
        canvas: &mut dyn Canvas,
        marker: &CategoryMarker,
        plot_area: Rect,
        angle: f64,
        category_count: usize,
        band: f64,
    ) {
        let half = 180.0 / category_count as f64 * self.direction().factor();
        let left = angle - half;
        let right = angle + half;
        let center = plot_area.center();
        let style = marker.style();

        let label_angle = with_alpha(canvas, style.alpha, |c| {
            let edge = |a: f64| line_path(center, polar_to_point(plot_area, a, 1.0));
            match marker.render_type() {
                MarkerRenderType::Center => {
                    c.stroke(&edge(angle), &style.stroke, style.paint);
                    angle
                }
                MarkerRenderType::LeftEdge => {
                    c.stroke(&edge(left), &style.stroke, style.paint);
                    left
                }
                MarkerRenderType::RightEdge => {
                    c.stroke(&edge(right), &style.stroke, style.paint);
                    right
                }
                MarkerRenderType::BetweenEdges => {
                    c.fill(
                        &wedge_path(plot_area, left, right - left),
                        FillRule::NonZero,
                        style.paint,
                    );
                    c.stroke(&edge(left), &style.stroke, style.paint);
                    c.stroke(&edge(right), &style.stroke, style.paint);
                    angle
                }
            }
        });

        let Some(label) = style.label.as_deref() else {
            return;
        };
        if marker.is_label_on_arc() {
            let shape = {
                let metrics = canvas.font_metrics();
                let radius = band * plot_area.width / 2.0;
                let width = metrics.string_width(label, &style.label_font);
                if radius <= 0.0 {
                    return;
                }
                let span = (width / radius).to_degrees();
                let start = label_angle + span / 2.0;
                let path = arc_path(scaled_area(plot_area, band), start, -(span + ARC_LABEL_SLACK));
                TextStroke::new(label, style.label_font.clone()).create_stroked_shape(&path, metrics)
            };
            canvas.fill(&shape, FillRule::NonZero, style.label_paint);
        } else {
            let at = polar_to_point(plot_area, label_angle, band);
            canvas.draw_text(
                label,
                at,
                &TextStyle::new(&style.label_font, style.label_paint)
                    .anchor(TextAnchor::Middle)
                    .rotation(marker.label_angle()),
            );
        }
    }

    fn draw_category_label(
        &self,
        canvas: &mut dyn Canvas,
        dataset: &dyn CategoryDataset,
        plot_area: Rect,
        category: usize,
        angle: f64,
    ) {
        let Some(label) = self.find_label_in(dataset, category) else {
            return;
        };
        let ascent = canvas.font_metrics().ascent(self.label_font());
        let (at, anchor) = label_location(plot_area, angle, self.axis_label_gap(), ascent);
        canvas.draw_text(
            &label,
            at,
            &TextStyle::new(self.label_font(), self.label_paint()).anchor(anchor),
        );
    }

    /// One series: head markers, hot spots, outline and optional fill.
    fn draw_radar_poly(
        &self,
        canvas: &mut dyn Canvas,
        dataset: &dyn CategoryDataset,
        plot_area: Rect,
        series: usize,
        max: f64,
        mut info: Option<&mut PlotRenderingInfo>,
    ) {
        let points = self.web_points(dataset, series, plot_area, max);
        if points.is_empty() {
            return;
        }
        let paint = self.series_paint(series);
        let outline_paint = self.series_outline_paint(series);
        let outline_stroke = self.series_outline_stroke(series);
        let head_w = plot_area.width * self.head_percent() / 2.0;
        let head_h = plot_area.height * self.head_percent() / 2.0;

        for &(category, p) in &points {
            let head = Rect::new(p.x - head_w, p.y - head_h, head_w * 2.0, head_h * 2.0);
            let head_path = ellipse_path(head);
            canvas.fill(&head_path, FillRule::NonZero, paint);
            canvas.stroke(&head_path, outline_stroke, outline_paint);

            if let Some(info) = info.as_deref_mut() {
                let (row, column) = self.extract_order().cell(series, category);
                info.add_entity(CategoryItemEntity {
                    area: head,
                    tool_tip: self
                        .tool_tip_generator()
                        .and_then(|g| g.generate_tool_tip(dataset, row, column)),
                    url: self
                        .url_generator()
                        .and_then(|g| g.generate_url(dataset, row, column)),
                    row,
                    column,
                    row_key: dataset.row_key(row).unwrap_or_default().to_owned(),
                    column_key: dataset.column_key(column).unwrap_or_default().to_owned(),
                });
            }
        }

        let vertices: Vec<Point> = points.iter().map(|&(_, p)| p).collect();
        let polygon = polygon_path(&vertices, true);
        canvas.stroke(&polygon, outline_stroke, paint);
        if self.is_web_filled() {
            with_alpha(canvas, WEB_FILL_ALPHA, |c| {
                c.fill(&polygon, FillRule::NonZero, paint);
            });
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn svg_encoder(&self, width: u32, height: u32) -> SvgEncoder {
        let mut canvas = SvgCanvas::new(width, height).background(None);
        let area = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
        self.draw(&mut canvas, area, None);
        canvas.finish()
    }

    /// Render to an SVG document of the given size.
    #[must_use]
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        self.svg_encoder(width, height).render()
    }

    /// Render to an SVG file.
    pub fn write_svg<P: AsRef<Path>>(&self, path: P, width: u32, height: u32) -> Result<()> {
        self.svg_encoder(width, height).write_to_file(path)
    }

    /// Render into a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDimensions`] for a zero-sized surface.
    pub fn to_framebuffer(&self, width: u32, height: u32) -> Result<Framebuffer> {
        let mut canvas = RasterCanvas::new(width, height)?;
        let area = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
        self.draw(&mut canvas, area, None);
        Ok(canvas.into_framebuffer())
    }

    /// Render to a PNG file.
    pub fn write_png<P: AsRef<Path>>(&self, path: P, width: u32, height: u32) -> Result<()> {
        let fb = self.to_framebuffer(width, height)?;
        PngEncoder::write_to_file(&fb, path)
    }
}

/// Key that category markers are matched against.
fn category_key(
    dataset: &dyn CategoryDataset,
    order: ExtractOrder,
    category: usize,
) -> Option<&str> {
    match order {
        ExtractOrder::ByRow => dataset.column_key(category),
        ExtractOrder::ByColumn => dataset.row_key(category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::color::Rgba;
    use crate::dataset::SimpleCategoryDataset;
    use crate::geometry::Rotation;
    use crate::plots::frame::PlotFrame;
    use crate::plots::generators::{StandardCategoryToolTipGenerator, StandardCategoryUrlGenerator};
    use crate::plots::radial::{IntervalMarker, ValueMarker};
    use std::rc::Rc;

    const AREA: Rect = Rect::new(0.0, 0.0, 416.0, 408.0);

    fn plot_of(rows: &[&[Option<f64>]]) -> RadialPlot {
        let keys: Vec<String> = (0..rows.len()).map(|i| format!("s{i}")).collect();
        let row_keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        let dataset = SimpleCategoryDataset::from_rows(&row_keys, &["c0", "c1", "c2"], rows);
        let mut plot = RadialPlot::with_dataset(Rc::new(dataset));
        plot.set_series_paint(0, Some(Rgba::BLUE));
        plot.set_web_filled(false);
        plot
    }

    fn inner_area() -> Rect {
        PlotFrame::default().insets.trim(AREA)
    }

    fn draw(plot: &RadialPlot, info: Option<&mut PlotRenderingInfo>) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        plot.draw(&mut canvas, AREA, info);
        canvas
    }

    #[test]
    fn test_no_data_message_and_state_restored() {
        let mut plot = RadialPlot::new();
        plot.set_no_data_message(Some("No data".to_string()));
        let canvas = draw(&plot, None);
        assert_eq!(canvas.texts(), vec!["No data"]);
        assert_eq!(canvas.clip(), None);
        assert_eq!(canvas.alpha(), 1.0);

        let empty = RadialPlot::with_dataset(Rc::new(SimpleCategoryDataset::new()));
        let canvas = draw(&empty, None);
        assert!(canvas.texts().is_empty());
        // outline before and after the clipped body
        assert_eq!(canvas.strokes().count(), 2);
    }

    #[test]
    fn test_null_cell_skips_vertex_and_head() {
        let plot = plot_of(&[&[Some(2.0), None, Some(0.0)]]);
        let mut info = PlotRenderingInfo::new();
        let canvas = draw(&plot, Some(&mut info));

        assert_eq!(canvas.fill_count(Rgba::BLUE), 2);
        let columns: Vec<usize> = info.entities().iter().map(|e| e.column).collect();
        assert_eq!(columns, vec![0, 2]);
        // zero sits on the center
        let center = compute_plot_area(inner_area(), 0.25, 0.25).center();
        let zero = info.entities()[1].area.center();
        assert!((zero.x - center.x).abs() < 1e-9 && (zero.y - center.y).abs() < 1e-9);
    }

    #[test]
    fn test_data_is_clipped_to_plot_area() {
        let plot = plot_of(&[&[Some(1.0), Some(2.0), Some(3.0)]]);
        let canvas = draw(&plot, None);
        let clipped = Some(inner_area());
        assert!(canvas
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Fill { paint, clip, .. } if *paint == Rgba::BLUE && *clip == clipped)));
    }

    #[test]
    fn test_category_labels_follow_extract_order() {
        let mut plot = plot_of(&[&[Some(1.0), Some(2.0), Some(3.0)], &[Some(1.0), None, None]]);
        assert_eq!(draw(&plot, None).texts(), vec!["c0", "c1", "c2"]);
        plot.set_extract_order(ExtractOrder::ByColumn);
        assert_eq!(draw(&plot, None).texts(), vec!["s0", "s1"]);
    }

    #[test]
    fn test_axis_lines_only_when_visible() {
        let mut plot = plot_of(&[&[Some(1.0), Some(2.0), Some(3.0)]]);
        plot.set_base_axis_line_paint(Rgba::RED);
        let count_red = |c: &RecordingCanvas| {
            c.strokes()
                .filter(|op| matches!(op, DrawOp::Stroke { paint, .. } if *paint == Rgba::RED))
                .count()
        };
        assert_eq!(count_red(&draw(&plot, None)), 0);
        plot.set_axis_line_visible(0, true);
        plot.set_axis_line_visible(2, true);
        assert_eq!(count_red(&draw(&plot, None)), 2);
    }

    #[test]
    fn test_interval_marker_is_even_odd_annulus_with_marker_alpha() {
        let mut plot = plot_of(&[&[Some(1.0), Some(2.0), Some(4.0)]]);
        let style = MarkerStyle::with_paint(Rgba::GREEN).alpha(0.5).label("band");
        plot.add_interval_marker(IntervalMarker::with_style(1.0, 3.0, style).unwrap());
        let canvas = draw(&plot, None);

        let band = canvas
            .fills()
            .find(|op| matches!(op, DrawOp::Fill { paint, .. } if *paint == Rgba::GREEN));
        assert!(matches!(
            band,
            Some(DrawOp::Fill { rule: FillRule::EvenOdd, alpha, .. }) if (*alpha - 0.5).abs() < 1e-6
        ));
        assert!(canvas.texts().contains(&"band"));
    }

    #[test]
    fn test_value_marker_ring_is_stroked() {
        let mut plot = plot_of(&[&[Some(1.0), Some(2.0), Some(4.0)]]);
        plot.add_value_marker(ValueMarker::with_style(2.0, MarkerStyle::with_paint(Rgba::RED)));
        plot.add_value_marker(ValueMarker::with_style(-1.0, MarkerStyle::with_paint(Rgba::RED)));
        let canvas = draw(&plot, None);
        let rings = canvas
            .strokes()
            .filter(|op| matches!(op, DrawOp::Stroke { paint, .. } if *paint == Rgba::RED))
            .count();
        assert_eq!(rings, 1);
    }

    #[test]
    fn test_between_edges_marker_fills_wedge() {
        let mut plot = plot_of(&[&[Some(1.0), Some(2.0), Some(4.0)]]);
        let marker = CategoryMarker::with_style("c1", MarkerStyle::with_paint(Rgba::RED).label("here"))
            .render_as(MarkerRenderType::BetweenEdges);
        plot.add_category_marker(marker);
        plot.add_category_marker(CategoryMarker::new("missing"));
        let canvas = draw(&plot, None);

        assert_eq!(canvas.fill_count(Rgba::RED), 1);
        let edges = canvas
            .strokes()
            .filter(|op| matches!(op, DrawOp::Stroke { paint, .. } if *paint == Rgba::RED))
            .count();
        assert_eq!(edges, 2);
        assert!(canvas.texts().contains(&"here"));
    }

    fn stroke_end(op: &DrawOp) -> Option<Point> {
        match op {
            DrawOp::Stroke { path, .. } => match path.elements().last() {
                Some(kurbo::PathEl::LineTo(p)) => Some(Point::from(*p)),
                _ => None,
            },
            _ => None,
        }
    }

    #[test]
    fn test_edge_markers_sit_halfway_to_neighbours() {
        let paints = [
            (MarkerRenderType::Center, Rgba::RED, "center", 0.0),
            (MarkerRenderType::LeftEdge, Rgba::GREEN, "left", -1.0),
            (MarkerRenderType::RightEdge, Rgba::BLUE, "right", 1.0),
        ];
        for direction in [Rotation::Clockwise, Rotation::CounterClockwise] {
            let mut plot = plot_of(&[&[Some(1.0), Some(2.0), Some(4.0)]]);
            plot.set_series_paint(0, Some(Rgba::BLACK));
            plot.set_direction(direction);
            for (render, paint, label, _) in paints {
                let style = MarkerStyle::with_paint(paint).label(label);
                plot.add_category_marker(CategoryMarker::with_style("c1", style).render_as(render));
            }
            let canvas = draw(&plot, None);

            let plot_area = compute_plot_area(inner_area(), 0.25, 0.25);
            let angle = plot.category_angle(3, 1);
            let half = 60.0 * direction.factor();
            for (_, paint, label, side) in paints {
                let expected = polar_to_point(plot_area, angle + side * half, 1.0);
                let ends: Vec<Point> = canvas
                    .strokes()
                    .filter(|op| matches!(op, DrawOp::Stroke { paint: p, .. } if *p == paint))
                    .filter_map(stroke_end)
                    .collect();
                assert_eq!(ends.len(), 1, "{label} under {direction:?}");
                assert!((ends[0].x - expected.x).abs() < 1e-9, "{label} under {direction:?}");
                assert!((ends[0].y - expected.y).abs() < 1e-9, "{label} under {direction:?}");

                let at = canvas.ops().iter().find_map(|op| match op {
                    DrawOp::Text { text, at, .. } if text == label => Some(*at),
                    _ => None,
                });
                assert_eq!(at, Some(expected), "{label} under {direction:?}");
            }
        }
    }

    #[test]
    fn test_on_arc_label_is_filled_outline() {
        let mut plot = plot_of(&[&[Some(1.0), Some(2.0), Some(4.0)]]);
        let mut style = MarkerStyle::with_paint(Rgba::GRAY).label("Arc");
        style.label_paint = Rgba::RED;
        let mut marker = CategoryMarker::with_style("c0", style);
        marker.set_label_on_arc(true);
        plot.add_category_marker(marker);
        let canvas = draw(&plot, None);

        assert!(!canvas.texts().contains(&"Arc"));
        assert_eq!(canvas.fill_count(Rgba::RED), 1);
    }

    #[test]
    fn test_entities_carry_generated_text() {
        let mut plot = plot_of(&[&[Some(1.0), Some(2.0), Some(3.0)]]);
        plot.set_tool_tip_generator(Some(Rc::new(StandardCategoryToolTipGenerator::default())));
        plot.set_url_generator(Some(Rc::new(StandardCategoryUrlGenerator::default())));
        let mut info = PlotRenderingInfo::new();
        draw(&plot, Some(&mut info));

        let entity = &info.entities()[1];
        assert_eq!(entity.tool_tip.as_deref(), Some("(s0, c1) = 2"));
        assert_eq!(
            entity.url.as_deref(),
            Some("index.html?series=s0&category=c1")
        );
        assert_eq!(entity.row_key, "s0");
        assert_eq!(info.plot_area(), Some(inner_area()));
        assert!(info.entity_at(entity.area.center()).is_some());
    }

    #[test]
    fn test_web_fill_uses_low_alpha() {
        let mut plot = plot_of(&[&[Some(1.0), Some(2.0), Some(3.0)]]);
        plot.set_web_filled(true);
        let canvas = draw(&plot, None);
        let fill = canvas.fills().last();
        assert!(matches!(
            fill,
            Some(DrawOp::Fill { paint, alpha, .. }) if *paint == Rgba::BLUE && (*alpha - WEB_FILL_ALPHA).abs() < 1e-6
        ));
        assert_eq!(canvas.alpha(), 1.0);
    }

    #[test]
    fn test_raster_and_svg_output() {
        let plot = plot_of(&[&[Some(1.0), Some(2.0), Some(3.0)]]);
        let fb = plot.to_framebuffer(120, 100).unwrap();
        assert_eq!((fb.width(), fb.height()), (120, 100));
        assert!(fb.ink_ratio(Rgba::WHITE) > 0.0);
        assert!(plot.to_framebuffer(0, 10).is_err());

        let svg = plot.to_svg(120, 100);
        assert!(svg.starts_with("<svg") || svg.starts_with("<?xml"));
        assert!(svg.contains("c2"));
    }
}
