//! Plot frame: the decorations every plot draws around its data.

use serde::{Deserialize, Serialize};

use crate::canvas::{rect_path, with_alpha, Canvas, FillRule, TextAnchor, TextStyle};
use crate::color::Rgba;
use crate::geometry::{Insets, Point, Rect};
use crate::style::{Font, Stroke};

/// Background, outline, insets and the "no data" placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotFrame {
    /// Space trimmed from the drawing area before anything is painted.
    pub insets: Insets,
    /// Background fill; `None` leaves the area untouched.
    pub background_paint: Option<Rgba>,
    /// Alpha applied to the background fill.
    pub background_alpha: f32,
    /// Outline color; `None` draws no outline.
    pub outline_paint: Option<Rgba>,
    /// Outline stroke.
    pub outline_stroke: Stroke,
    /// Alpha applied to everything drawn inside the plot area.
    pub foreground_alpha: f32,
    /// Message shown when there is nothing to plot.
    pub no_data_message: Option<String>,
    /// Font of the no-data message.
    pub no_data_message_font: Font,
    /// Color of the no-data message.
    pub no_data_message_paint: Rgba,
}

impl Default for PlotFrame {
    fn default() -> Self {
        Self {
            insets: Insets {
                top: 4.0,
                left: 8.0,
                bottom: 4.0,
                right: 8.0,
            },
            background_paint: Some(Rgba::WHITE),
            background_alpha: 1.0,
            outline_paint: Some(Rgba::GRAY),
            outline_stroke: Stroke::solid(0.5),
            foreground_alpha: 1.0,
            no_data_message: None,
            no_data_message_font: Font::new("sans-serif", 12.0),
            no_data_message_paint: Rgba::BLACK,
        }
    }
}

impl PlotFrame {
    /// Fill `area` with the background paint.
    pub fn draw_background(&self, canvas: &mut dyn Canvas, area: Rect) {
        if let Some(paint) = self.background_paint {
            with_alpha(canvas, self.background_alpha, |c| {
                c.fill(&rect_path(area), FillRule::NonZero, paint);
            });
        }
    }

    /// Stroke the border of `area`.
    pub fn draw_outline(&self, canvas: &mut dyn Canvas, area: Rect) {
        if let Some(paint) = self.outline_paint {
            canvas.stroke(&rect_path(area), &self.outline_stroke, paint);
        }
    }

    /// Draw the no-data message centered in `area`, if one is set.
    pub fn draw_no_data_message(&self, canvas: &mut dyn Canvas, area: Rect) {
        let Some(message) = self.no_data_message.as_deref() else {
            return;
        };
        let font = &self.no_data_message_font;
        let metrics = canvas.font_metrics();
        let baseline_shift = (metrics.ascent(font) - metrics.descent(font)) / 2.0;
        let center = area.center();
        canvas.draw_text(
            message,
            Point::new(center.x, center.y + baseline_shift),
            &TextStyle::new(font, self.no_data_message_paint).anchor(TextAnchor::Middle),
        );
    }
}
