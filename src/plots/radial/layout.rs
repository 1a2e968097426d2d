//! Radial layout: plot area, axis angles, web points and label placement.

use kurbo::{BezPath, Vec2};

use super::{RadialPlot, AUTO_MAX_VALUE};
use crate::canvas::TextAnchor;
use crate::dataset::{CategoryDataset, ExtractOrder};
use crate::geometry::{angle_for_category, normalize_degrees, polar_to_point, Point, Rect};
use crate::plots::generators::{CategoryItemLabelGenerator, StandardCategoryItemLabelGenerator};

/// Tolerance for deciding that a label sits on the vertical center line.
pub const LABEL_EPSILON: f64 = 1e-9;

/// Tolerance used when turning arcs into curves.
const ARC_TOLERANCE: f64 = 0.1;

/// Shrink `total` by the gap fractions, then take the largest centered
/// square that fits.
///
/// Half of each gap is removed from either side, so the result stays
/// centered on `total`.
#[must_use]
pub fn compute_plot_area(total: Rect, gap_horizontal: f64, gap_vertical: f64) -> Rect {
    let gap_w = total.width * gap_horizontal;
    let gap_h = total.height * gap_vertical;
    let x = total.x + gap_w / 2.0;
    let y = total.y + gap_h / 2.0;
    let w = (total.width - gap_w).max(0.0);
    let h = (total.height - gap_h).max(0.0);

    let half = w.min(h) / 2.0;
    let cx = x + w / 2.0;
    let cy = y + h / 2.0;
    Rect::new(cx - half, cy - half, half * 2.0, half * 2.0)
}

/// Largest non-negative value in the dataset.
///
/// Absent and negative cells are skipped. Returns [`AUTO_MAX_VALUE`] when
/// there is nothing to scale by.
#[must_use]
pub fn auto_compute_max_value(dataset: &dyn CategoryDataset, order: ExtractOrder) -> f64 {
    let (series_count, category_count) = order.dimensions(dataset);
    let mut max = AUTO_MAX_VALUE;
    for series in 0..series_count {
        for category in 0..category_count {
            let (row, column) = order.cell(series, category);
            if let Some(v) = dataset.value(row, column) {
                if v >= 0.0 && v > max {
                    max = v;
                }
            }
        }
    }
    max
}

/// `value / max`, or 0 when `max` is not positive.
#[must_use]
pub fn relative_length(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}

/// `area` scaled about its center by `factor`.
#[must_use]
pub fn scaled_area(area: Rect, factor: f64) -> Rect {
    let c = area.center();
    let w = area.width * factor;
    let h = area.height * factor;
    Rect::new(c.x - w / 2.0, c.y - h / 2.0, w, h)
}

/// Where a category label goes and how it is anchored.
///
/// The label sits on the axis direction, `gap` (a fraction of the radius)
/// beyond the axis end. Labels left of center end at that point, labels
/// right of center start there, centered ones straddle it. Labels below the
/// center are pushed down by `ascent` so they hang from the point.
#[must_use]
pub fn label_location(plot_area: Rect, angle: f64, gap: f64, ascent: f64) -> (Point, TextAnchor) {
    let end = polar_to_point(plot_area, angle, 1.0);
    let center = plot_area.center();
    let x = end.x + (end.x - center.x) * gap;
    let mut y = end.y + (end.y - center.y) * gap;

    let anchor = if (x - center.x).abs() < LABEL_EPSILON {
        TextAnchor::Middle
    } else if x < center.x {
        TextAnchor::End
    } else {
        TextAnchor::Start
    };
    if y > center.y + LABEL_EPSILON {
        y += ascent;
    }
    (Point::new(x, y), anchor)
}

/// Open arc on the ellipse inscribed in `bounds`, from `start` sweeping
/// `extent` degrees (positive is counter-clockwise).
#[must_use]
pub fn arc_path(bounds: Rect, start: f64, extent: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(kurbo::Point::from(polar_to_point(bounds, start, 1.0)));
    path.extend(arc(bounds, start, extent).append_iter(ARC_TOLERANCE));
    path
}

/// Pie slice of the ellipse inscribed in `bounds`.
#[must_use]
pub fn wedge_path(bounds: Rect, start: f64, extent: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(kurbo::Point::from(bounds.center()));
    path.line_to(kurbo::Point::from(polar_to_point(bounds, start, 1.0)));
    path.extend(arc(bounds, start, extent).append_iter(ARC_TOLERANCE));
    path.close_path();
    path
}

fn arc(bounds: Rect, start: f64, extent: f64) -> kurbo::Arc {
    // kurbo measures angles clockwise on a y-down surface
    kurbo::Arc {
        center: kurbo::Point::from(bounds.center()),
        radii: Vec2::new(bounds.width / 2.0, bounds.height / 2.0),
        start_angle: -start.to_radians(),
        sweep_angle: -extent.to_radians(),
        x_rotation: 0.0,
    }
}

impl RadialPlot {
    /// Axis angle of category `index` out of `count`, normalized into
    /// `(-180, 180]`.
    #[must_use]
    pub fn category_angle(&self, count: usize, index: usize) -> f64 {
        normalize_degrees(self.start_angle() + angle_for_category(count, index, self.direction()))
    }

    /// Value plotted for `series` on `category`, honoring the extract order.
    ///
    /// `None` when there is no dataset or the cell is absent.
    #[must_use]
    pub fn plot_value(&self, series: usize, category: usize) -> Option<f64> {
        self.dataset()
            .and_then(|d| plot_value_in(d, self.extract_order(), series, category))
    }

    /// Scaling denominator for the next draw: the configured maximum, or
    /// the dataset maximum while the automatic sentinel is set.
    ///
    /// Never stored back into the plot.
    #[must_use]
    pub fn resolved_max_value(&self) -> f64 {
        match self.dataset() {
            Some(d) => self.max_value_for(d),
            None => self.max_value(),
        }
    }

    pub(crate) fn max_value_for(&self, dataset: &dyn CategoryDataset) -> f64 {
        if self.is_auto_max_value() {
            let max = auto_compute_max_value(dataset, self.extract_order());
            crate::log::debug!(max = max, "auto-computed radial maximum");
            max
        } else {
            self.max_value()
        }
    }

    /// Web points of `series` inside the square `plot_area`.
    ///
    /// Absent and negative values contribute no vertex.
    #[must_use]
    pub fn series_polygon(&self, series: usize, plot_area: Rect) -> Vec<Point> {
        let Some(dataset) = self.dataset() else {
            return Vec::new();
        };
        let max = self.max_value_for(dataset);
        self.web_points(dataset, series, plot_area, max)
            .into_iter()
            .map(|(_, point)| point)
            .collect()
    }

    /// `(category, point)` for every drawable vertex of `series`.
    pub(crate) fn web_points(
        &self,
        dataset: &dyn CategoryDataset,
        series: usize,
        plot_area: Rect,
        max: f64,
    ) -> Vec<(usize, Point)> {
        let (_, category_count) = self.extract_order().dimensions(dataset);
        (0..category_count)
            .filter_map(|category| {
                let value = plot_value_in(dataset, self.extract_order(), series, category)?;
                if value < 0.0 {
                    return None;
                }
                let angle = self.category_angle(category_count, category);
                let point = polar_to_point(plot_area, angle, relative_length(value, max));
                Some((category, point))
            })
            .collect()
    }

    /// Label text for `category`: a column label when series are rows, a
    /// row label when series are columns.
    #[must_use]
    pub fn find_label(&self, category: usize) -> Option<String> {
        self.dataset().and_then(|d| self.find_label_in(d, category))
    }

    pub(crate) fn find_label_in(
        &self,
        dataset: &dyn CategoryDataset,
        category: usize,
    ) -> Option<String> {
        let fallback;
        let generator: &dyn CategoryItemLabelGenerator = match self.label_generator() {
            Some(g) => &**g,
            None => {
                fallback = StandardCategoryItemLabelGenerator::default();
                &fallback
            }
        };
        match self.extract_order() {
            ExtractOrder::ByRow => generator.generate_column_label(dataset, category),
            ExtractOrder::ByColumn => generator.generate_row_label(dataset, category),
        }
    }

    /// Radius fraction of the outermost interval band, or 1 without bands.
    pub(crate) fn outer_band_length(&self, max: f64) -> f64 {
        self.interval_markers()
            .iter()
            .map(|m| relative_length(m.end(), max))
            .filter(|r| *r > 0.0)
            .fold(None, |acc: Option<f64>, r| Some(acc.map_or(r, |a| a.max(r))))
            .unwrap_or(1.0)
    }
}

/// Cell for (series, category) under `order`.
pub(crate) fn plot_value_in(
    dataset: &dyn CategoryDataset,
    order: ExtractOrder,
    series: usize,
    category: usize,
) -> Option<f64> {
    let (row, column) = order.cell(series, category);
    dataset.value(row, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use kurbo::Shape;
    use proptest::prelude::*;

    #[test]
    fn test_plot_area_is_centered_square() {
        let area = compute_plot_area(Rect::new(0.0, 0.0, 400.0, 200.0), 0.25, 0.25);
        // 300 x 150 after gaps, square of 150
        assert_abs_diff_eq!(area.width, 150.0);
        assert_abs_diff_eq!(area.height, 150.0);
        assert_abs_diff_eq!(area.center().x, 200.0);
        assert_abs_diff_eq!(area.center().y, 100.0);
    }

    #[test]
    fn test_plot_area_separate_gaps() {
        let area = compute_plot_area(Rect::new(10.0, 10.0, 100.0, 100.0), 0.0, 0.4);
        assert_abs_diff_eq!(area.width, 60.0);
        assert_abs_diff_eq!(area.x, 30.0);
        assert_abs_diff_eq!(area.y, 30.0);
    }

    #[test]
    fn test_relative_length_guards_non_positive_max() {
        assert_abs_diff_eq!(relative_length(5.0, 10.0), 0.5);
        assert_abs_diff_eq!(relative_length(5.0, 0.0), 0.0);
        assert_abs_diff_eq!(relative_length(5.0, AUTO_MAX_VALUE), 0.0);
    }

    #[test]
    fn test_label_location_anchors() {
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);

        let (top, anchor) = label_location(area, 90.0, 0.1, 8.0);
        assert_eq!(anchor, TextAnchor::Middle);
        assert_abs_diff_eq!(top.y, -5.0, epsilon = 1e-9);

        let (right, anchor) = label_location(area, 0.0, 0.1, 8.0);
        assert_eq!(anchor, TextAnchor::Start);
        assert_abs_diff_eq!(right.x, 105.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.y, 50.0, epsilon = 1e-9);

        let (left, anchor) = label_location(area, 180.0, 0.1, 8.0);
        assert_eq!(anchor, TextAnchor::End);
        assert_abs_diff_eq!(left.x, -5.0, epsilon = 1e-9);

        let (bottom, anchor) = label_location(area, -90.0, 0.1, 8.0);
        assert_eq!(anchor, TextAnchor::Middle);
        assert_abs_diff_eq!(bottom.y, 105.0 + 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_arc_path_endpoints() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        // quarter turn counter-clockwise from 3 o'clock to 12 o'clock
        let path = arc_path(bounds, 0.0, 90.0);
        let els = path.elements();
        assert!(matches!(els[0], kurbo::PathEl::MoveTo(p) if (p.x - 100.0).abs() < 1e-9));
        let end = match els.last() {
            Some(kurbo::PathEl::CurveTo(_, _, p)) => *p,
            other => panic!("unexpected {other:?}"),
        };
        assert_abs_diff_eq!(end.x, 50.0, epsilon = 1e-6);
        assert_abs_diff_eq!(end.y, 0.0, epsilon = 1e-6);
        // the arc bulges toward the upper right
        let bbox = path.bounding_box();
        assert!(bbox.y0 < 1e-6 && bbox.x1 > 99.0);
    }

    #[test]
    fn test_wedge_area() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let wedge = wedge_path(bounds, 45.0, -90.0);
        // quarter of a circle of radius 50
        assert_abs_diff_eq!(
            wedge.area().abs(),
            std::f64::consts::PI * 2500.0 / 4.0,
            epsilon = 1.0
        );
    }

    proptest! {
        #[test]
        fn prop_plot_area_square_and_inside(
            w in 1.0f64..2000.0,
            h in 1.0f64..2000.0,
            gh in 0.0f64..=0.4,
            gv in 0.0f64..=0.4,
        ) {
            let total = Rect::new(0.0, 0.0, w, h);
            let area = compute_plot_area(total, gh, gv);
            prop_assert!((area.width - area.height).abs() < 1e-9);
            prop_assert!(area.x >= -1e-9 && area.max_x() <= w + 1e-9);
            prop_assert!(area.y >= -1e-9 && area.max_y() <= h + 1e-9);
            prop_assert!((area.center().x - w / 2.0).abs() < 1e-9);
        }
    }
}
