//! Saving and restoring a radial plot definition as YAML.
//!
//! Only configuration is persisted. The dataset, change listeners and
//! generators are left out; a restored plot has none of them.

use std::fs;
use std::path::Path;

use super::RadialPlot;
use crate::error::{Error, Result};

fn persistence_error(err: &serde_yaml_ng::Error) -> Error {
    Error::Persistence {
        line: err.location().map_or(0, |l| l.line()),
        message: err.to_string(),
    }
}

impl RadialPlot {
    /// Serialize the configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| persistence_error(&e))
    }

    /// Restore a plot from YAML. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`Error::Persistence`] for malformed documents, and
    /// [`Error::InvalidArgument`] when a value is out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let plot: Self = serde_yaml_ng::from_str(yaml).map_err(|e| persistence_error(&e))?;
        plot.validate()?;
        Ok(plot)
    }

    /// Write the configuration to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)?;
        crate::log::debug!(path = %path.as_ref().display(), "saved radial plot");
        Ok(())
    }

    /// Read a configuration written by [`save`](Self::save).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = fs::read_to_string(path.as_ref())?;
        let plot = Self::from_yaml(&yaml)?;
        crate::log::debug!(path = %path.as_ref().display(), "loaded radial plot");
        Ok(plot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::dataset::ExtractOrder;
    use crate::geometry::Rotation;
    use crate::plots::radial::{CategoryMarker, IntervalMarker, MarkerRenderType, ValueMarker};
    use crate::style::{Font, LineCap, Stroke};

    fn configured() -> RadialPlot {
        let mut plot = RadialPlot::new();
        plot.set_axis_line_paint(0, Some(Rgba::RED));
        plot.set_axis_line_paint(2, Some(Rgba::rgb(10, 20, 30)));
        plot.set_axis_line_stroke(0, Some(Stroke::dashed(2.0, &[4.0, 2.0])));
        plot.set_axis_line_stroke(2, Some(Stroke::solid(1.5).cap(LineCap::Round)));
        plot.set_axis_line_visible(1, true);
        plot.set_series_outline_stroke(0, Some(Stroke::solid(3.0)));
        plot.set_series_outline_stroke(4, Some(Stroke::dashed(1.0, &[1.0, 1.0])));
        plot.set_series_paint(1, Some(Rgba::new(1, 2, 3, 128)));
        plot.set_head_percent(0.035).unwrap();
        plot.set_start_angle(45.0).unwrap();
        plot.set_interior_gaps(0.1, 0.3).unwrap();
        plot.set_max_value(12.5).unwrap();
        plot.set_direction(Rotation::CounterClockwise);
        plot.set_extract_order(ExtractOrder::ByColumn);
        plot.set_web_filled(false);
        plot.set_label_font(Font::new("serif", 14.0).bold());
        plot.add_category_marker(
            CategoryMarker::new("Speed").render_as(MarkerRenderType::BetweenEdges),
        );
        plot.add_value_marker(ValueMarker::new(5.0));
        plot.add_interval_marker(IntervalMarker::new(2.0, 4.0).unwrap());
        plot
    }

    #[test]
    fn test_yaml_round_trip_is_equal() {
        let plot = configured();
        let yaml = plot.to_yaml().unwrap();
        let restored = RadialPlot::from_yaml(&yaml).unwrap();
        assert_eq!(restored, plot);
        assert_eq!(restored.axis_line_paint(2), Rgba::rgb(10, 20, 30));
        assert_eq!(restored.series_outline_stroke(4).dash, vec![1.0, 1.0]);
        assert_eq!(restored.head_percent(), 0.035);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let plot = RadialPlot::from_yaml("start_angle: 30.0\nweb_filled: false\n").unwrap();
        assert_eq!(plot.start_angle(), 30.0);
        assert!(!plot.is_web_filled());
        assert_eq!(plot.interior_gap_horizontal(), 0.25);
        assert!(plot.is_auto_max_value());
    }

    #[test]
    fn test_out_of_range_gap_rejected_on_load() {
        let err = RadialPlot::from_yaml("interior_gap_horizontal: 0.9\n").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "interior_gap", .. }));
    }

    #[test]
    fn test_inverted_interval_rejected_on_load() {
        let yaml = configured().to_yaml().unwrap();
        assert!(yaml.contains("start: 2.0"));
        let edited = yaml.replacen("start: 2.0", "start: 9.0", 1);
        let err = RadialPlot::from_yaml(&edited).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "interval", .. }));
    }

    #[test]
    fn test_marker_alpha_out_of_range_rejected_on_load() {
        let yaml = "value_markers:\n  - value: 3.0\n    style:\n      alpha: 1.5\n";
        let err = RadialPlot::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "marker_alpha", .. }));
    }

    #[test]
    fn test_malformed_yaml_reports_line() {
        let err = RadialPlot::from_yaml("start_angle: 30.0\nhead_percent: [oops\n").unwrap_err();
        match err {
            Error::Persistence { line, .. } => assert!(line >= 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.yaml");
        let plot = configured();
        plot.save(&path).unwrap();
        assert_eq!(RadialPlot::load(&path).unwrap(), plot);
        assert!(matches!(
            RadialPlot::load(dir.path().join("missing.yaml")),
            Err(Error::Io(_))
        ));
    }
}
