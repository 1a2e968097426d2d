//! SVG output encoder.
//!
//! Collects vector elements and serializes them as a standalone SVG
//! document. Clip groups nest as `<g clip-path=..>` elements.

use crate::canvas::{FillRule, TextAnchor};
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::Rect;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG encoder for vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Path (SVG path data)
    Path {
        d: String,
        fill: Option<Rgba>,
        fill_rule: FillRule,
        stroke: Option<Rgba>,
        stroke_width: f64,
        dash: Vec<f64>,
    },
    /// Single line of text, optionally rotated about its anchor
    Text {
        x: f64,
        y: f64,
        text: String,
        font_family: String,
        font_size: f64,
        bold: bool,
        italic: bool,
        fill: Rgba,
        anchor: TextAnchor,
        rotation: f64,
    },
    /// Open a group clipped to a rectangle
    ClipBegin { id: usize, clip: Rect },
    /// Close the innermost clip group
    ClipEnd,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            elements: Vec::new(),
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Elements added so far.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render to SVG string.
    ///
    /// Clip groups left open are closed before the root element ends.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                bg.to_css()
            );
        }

        let mut depth = 0usize;
        for element in &self.elements {
            match element {
                SvgElement::ClipBegin { .. } => depth += 1,
                SvgElement::ClipEnd if depth == 0 => continue,
                SvgElement::ClipEnd => depth -= 1,
                _ => {}
            }
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }
        for _ in 0..depth {
            svg.push_str("  </g>\n");
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Path {
            d,
            fill,
            fill_rule,
            stroke,
            stroke_width,
            dash,
        } => {
            let fill_attr = fill.map_or_else(|| "none".to_string(), Rgba::to_css);
            let rule_attr = match (fill, fill_rule) {
                (Some(_), FillRule::EvenOdd) => r#" fill-rule="evenodd""#,
                _ => "",
            };
            let stroke_attr = stroke
                .map(|s| {
                    let mut attr = format!(
                        r#" stroke="{}" stroke-width="{stroke_width}""#,
                        s.to_css()
                    );
                    if !dash.is_empty() {
                        let pattern: Vec<String> = dash.iter().map(f64::to_string).collect();
                        let _ = write!(attr, r#" stroke-dasharray="{}""#, pattern.join(","));
                    }
                    attr
                })
                .unwrap_or_default();
            format!(r#"<path d="{d}" fill="{fill_attr}"{rule_attr}{stroke_attr}/>"#)
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_family,
            font_size,
            bold,
            italic,
            fill,
            anchor,
            rotation,
        } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let weight = if *bold { r#" font-weight="bold""# } else { "" };
            let style = if *italic { r#" font-style="italic""# } else { "" };
            // SVG rotates clockwise for positive angles
            let transform = if *rotation == 0.0 {
                String::new()
            } else {
                format!(r#" transform="rotate({} {x} {y})""#, -rotation)
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" font-family="{}"{weight}{style} fill="{}" text-anchor="{anchor_str}"{transform}>{}</text>"#,
                escape_xml(font_family),
                fill.to_css(),
                escape_xml(text)
            )
        }
        SvgElement::ClipBegin { id, clip } => format!(
            r#"<clipPath id="clip{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{id})">"#,
            clip.x, clip.y, clip.width, clip.height
        ),
        SvgElement::ClipEnd => "</g>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(anchor: TextAnchor, rotation: f64, content: &str) -> SvgElement {
        SvgElement::Text {
            x: 10.0,
            y: 20.0,
            text: content.to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            bold: false,
            italic: false,
            fill: Rgba::BLACK,
            anchor,
            rotation,
        }
    }

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 600).render();
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_svg_path_even_odd() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(SvgElement::Path {
            d: "M0 0L10 0L10 10Z".to_string(),
            fill: Some(Rgba::GREEN),
            fill_rule: FillRule::EvenOdd,
            stroke: None,
            stroke_width: 1.0,
            dash: Vec::new(),
        });
        let svg = encoder.render();
        assert!(svg.contains(r#"fill="rgb(0,255,0)""#));
        assert!(svg.contains(r#"fill-rule="evenodd""#));
        assert!(!svg.contains("stroke="));
    }

    #[test]
    fn test_svg_path_dashed_stroke() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(SvgElement::Path {
            d: "M0 0L10 10".to_string(),
            fill: None,
            fill_rule: FillRule::NonZero,
            stroke: Some(Rgba::BLACK),
            stroke_width: 2.0,
            dash: vec![4.0, 2.0],
        });
        let svg = encoder.render();
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(r#"stroke-width="2""#));
        assert!(svg.contains(r#"stroke-dasharray="4,2""#));
    }

    #[test]
    fn test_svg_text_anchor_rotation_and_escaping() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(text(TextAnchor::End, 30.0, "<a & b>"));
        let svg = encoder.render();
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.contains("rotate(-30 10 20)"));
        assert!(svg.contains("&lt;a &amp; b&gt;"));
    }

    #[test]
    fn test_svg_unrotated_text_has_no_transform() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(text(TextAnchor::Middle, 0.0, "x"));
        let svg = encoder.render();
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(!svg.contains("transform"));
    }

    #[test]
    fn test_svg_clip_groups_balanced() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(SvgElement::ClipBegin {
            id: 0,
            clip: Rect::new(0.0, 0.0, 50.0, 50.0),
        });
        encoder.add_element(SvgElement::ClipBegin {
            id: 1,
            clip: Rect::new(0.0, 0.0, 10.0, 10.0),
        });
        encoder.add_element(SvgElement::ClipEnd);
        encoder.add_element(SvgElement::ClipEnd);
        encoder.add_element(SvgElement::ClipEnd);
        let svg = encoder.render();
        assert_eq!(svg.matches("<g ").count(), 2);
        assert_eq!(svg.matches("</g>").count(), 2);
        assert!(svg.contains(r#"<clipPath id="clip1">"#));
    }

    #[test]
    fn test_svg_unclosed_clip_closed_at_end() {
        let mut encoder = SvgEncoder::new(100, 100).background(None);
        encoder.add_element(SvgElement::ClipBegin {
            id: 0,
            clip: Rect::new(0.0, 0.0, 50.0, 50.0),
        });
        let svg = encoder.render();
        assert_eq!(svg.matches("</g>").count(), 1);
        assert_eq!(svg.matches("<rect").count(), 1);
    }

    #[test]
    fn test_svg_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        SvgEncoder::new(10, 10).write_to_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
    }
}
