//! Primitive rasterization.
//!
//! Everything here works on flattened geometry ([`Polyline`]s) in pixel
//! coordinates and writes through [`Framebuffer::blend_pixel`], which handles
//! bounds and clipping.

use crate::canvas::{FillRule, Polyline};
use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::style::{LineCap, LineJoin, Stroke};

/// Vertical samples per pixel row when filling.
const SUBSAMPLES: usize = 4;

/// Miter length limit as a multiple of the half width.
const MITER_LIMIT: f64 = 10.0;

/// Pixels kept around the framebuffer when clipping hairlines.
const LINE_CLIP_MARGIN: f64 = 2.0;

/// Segments used to approximate round caps and joins.
const DISC_SEGMENTS: usize = 16;

// ============================================================================
// Hairlines
// ============================================================================

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Draws two pixels at each step along the major axis, weighting them by
/// the fractional distance from the ideal line position.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, from: Point, to: Point, color: Rgba) {
    draw_line_aa_weighted(fb, from, to, color, 1.0);
}

fn draw_line_aa_weighted(fb: &mut Framebuffer, from: Point, to: Point, color: Rgba, weight: f32) {
    // step only over the visible part; the margin keeps edge pixels' coverage intact
    let bounds = (
        -LINE_CLIP_MARGIN,
        -LINE_CLIP_MARGIN,
        f64::from(fb.width()) + LINE_CLIP_MARGIN,
        f64::from(fb.height()) + LINE_CLIP_MARGIN,
    );
    let Some((from, to)) = clip_segment(from, to, bounds) else {
        return;
    };
    let (mut x0, mut y0, mut x1, mut y1) = (from.x, from.y, to.x, to.y);
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f64::EPSILON { 1.0 } else { dy / dx };

    let mut plot = |major: i64, minor: i64, coverage: f64| {
        let coverage = coverage as f32 * weight;
        if steep {
            fb.blend_pixel(minor, major, color, coverage);
        } else {
            fb.blend_pixel(major, minor, color, coverage);
        }
    };

    // first endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i64;
    let ypxl1 = yend.floor() as i64;
    plot(xpxl1, ypxl1, rfpart(yend) * xgap);
    plot(xpxl1, ypxl1 + 1, fpart(yend) * xgap);
    let mut intery = yend + gradient;

    // second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i64;
    let ypxl2 = yend.floor() as i64;
    if xpxl2 != xpxl1 {
        plot(xpxl2, ypxl2, rfpart(yend) * xgap);
        plot(xpxl2, ypxl2 + 1, fpart(yend) * xgap);
    }

    for x in (xpxl1 + 1)..xpxl2 {
        let ipart = intery.floor() as i64;
        plot(x, ipart, rfpart(intery));
        plot(x, ipart + 1, fpart(intery));
        intery += gradient;
    }
}

/// Clip the segment `from`-`to` to `(x_min, y_min, x_max, y_max)`.
///
/// Liang-Barsky parametric clipping. Returns `None` when no part of the
/// segment lies inside.
pub(crate) fn clip_segment(
    from: Point,
    to: Point,
    (x_min, y_min, x_max, y_max): (f64, f64, f64, f64),
) -> Option<(Point, Point)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [
        (-dx, from.x - x_min),
        (dx, x_max - from.x),
        (-dy, from.y - y_min),
        (dy, y_max - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((
        Point::new(from.x + t0 * dx, from.y + t0 * dy),
        Point::new(from.x + t1 * dx, from.y + t1 * dy),
    ))
}

#[inline]
fn fpart(x: f64) -> f64 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}

// ============================================================================
// Scanline fill
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    winding: i32,
}

fn collect_edges(polygons: &[Polyline]) -> Vec<Edge> {
    let mut edges = Vec::new();
    for poly in polygons {
        let n = poly.points.len();
        if n < 2 {
            continue;
        }
        // fills always close the subpath
        for i in 0..n {
            let a = poly.points[i];
            let b = poly.points[(i + 1) % n];
            if (a.y - b.y).abs() < f64::EPSILON {
                continue;
            }
            let (top, bottom, winding) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
            edges.push(Edge {
                x0: top.x,
                y0: top.y,
                x1: bottom.x,
                y1: bottom.y,
                winding,
            });
        }
    }
    edges
}

/// Fill the union of `polygons` with `color` using `rule`.
///
/// Each polyline is treated as closed. Coverage is sampled at
/// [`SUBSAMPLES`] sub-scanlines per row with exact horizontal coverage, which
/// gives anti-aliased edges in both directions.
pub fn fill_polygons(fb: &mut Framebuffer, polygons: &[Polyline], rule: FillRule, color: Rgba) {
    let edges = collect_edges(polygons);
    if edges.is_empty() || color.a == 0 {
        return;
    }

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for e in &edges {
        min_x = min_x.min(e.x0.min(e.x1));
        max_x = max_x.max(e.x0.max(e.x1));
        min_y = min_y.min(e.y0);
        max_y = max_y.max(e.y1);
    }

    let width = i64::from(fb.width());
    let height = i64::from(fb.height());
    let row_start = (min_y.floor() as i64).max(0);
    let row_end = (max_y.ceil() as i64).min(height);
    let col_start = (min_x.floor() as i64).max(0);
    let col_end = (max_x.ceil() as i64 + 1).min(width);
    if row_start >= row_end || col_start >= col_end {
        return;
    }

    let span = (col_end - col_start) as usize;
    let mut coverage = vec![0.0f32; span];
    let mut crossings: Vec<(f64, i32)> = Vec::new();
    let sample_weight = 1.0 / SUBSAMPLES as f32;

    for row in row_start..row_end {
        coverage.iter_mut().for_each(|c| *c = 0.0);

        for s in 0..SUBSAMPLES {
            let sy = row as f64 + (s as f64 + 0.5) / SUBSAMPLES as f64;
            crossings.clear();
            for e in &edges {
                if sy >= e.y0 && sy < e.y1 {
                    let t = (sy - e.y0) / (e.y1 - e.y0);
                    crossings.push((e.x0 + t * (e.x1 - e.x0), e.winding));
                }
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                let inside = match rule {
                    FillRule::NonZero => winding != 0,
                    FillRule::EvenOdd => winding % 2 != 0,
                };
                if inside {
                    accumulate_span(&mut coverage, col_start, pair[0].0, pair[1].0, sample_weight);
                }
            }
        }

        for (i, c) in coverage.iter().enumerate() {
            if *c > 0.0 {
                fb.blend_pixel(col_start + i as i64, row, color, c.min(1.0));
            }
        }
    }
}

/// Add horizontal coverage of `[xa, xb)` to a row buffer starting at `origin`.
fn accumulate_span(coverage: &mut [f32], origin: i64, xa: f64, xb: f64, weight: f32) {
    if xb <= xa {
        return;
    }
    let first = (xa.floor() as i64).max(origin);
    let last = (xb.ceil() as i64).min(origin + coverage.len() as i64);
    for px in first..last {
        let overlap = (xb.min(px as f64 + 1.0) - xa.max(px as f64)).max(0.0);
        coverage[(px - origin) as usize] += overlap as f32 * weight;
    }
}

// ============================================================================
// Strokes
// ============================================================================

/// Stroke a polyline.
///
/// Strokes at most one pixel wide are drawn as Wu hairlines with coverage
/// scaled by the width. Wider strokes are expanded into segment quads plus
/// cap and join pieces, all filled in a single non-zero pass so overlaps are
/// painted once.
pub fn stroke_polyline(fb: &mut Framebuffer, line: &Polyline, stroke: &Stroke, color: Rgba) {
    if line.points.len() < 2 || stroke.width <= 0.0 {
        return;
    }

    if stroke.width <= 1.0 {
        let weight = stroke.width as f32;
        for pair in line.points.windows(2) {
            draw_line_aa_weighted(fb, pair[0], pair[1], color, weight);
        }
        if line.closed {
            if let (Some(last), Some(first)) = (line.points.last(), line.points.first()) {
                draw_line_aa_weighted(fb, *last, *first, color, weight);
            }
        }
        return;
    }

    let pieces = stroke_outline(line, stroke);
    fill_polygons(fb, &pieces, FillRule::NonZero, color);
}

/// Expand a polyline into consistently oriented polygons covering its stroke.
#[must_use]
pub fn stroke_outline(line: &Polyline, stroke: &Stroke) -> Vec<Polyline> {
    let hw = stroke.width / 2.0;
    let mut points: Vec<Point> = line.points.clone();
    points.dedup_by(|a, b| a.distance(*b) < f64::EPSILON);
    if line.closed && points.len() > 1 && points[0].distance(points[points.len() - 1]) > 0.0 {
        points.push(points[0]);
    }
    let mut pieces = Vec::new();
    if points.len() < 2 {
        if let (Some(p), LineCap::Round | LineCap::Square) = (points.first(), stroke.cap) {
            pieces.push(oriented(disc(*p, hw)));
        }
        return pieces;
    }

    let last = points.len() - 1;
    for i in 0..last {
        let (mut a, mut b) = (points[i], points[i + 1]);
        let dir = unit(a, b);
        if !line.closed && stroke.cap == LineCap::Square {
            if i == 0 {
                a = Point::new(a.x - dir.x * hw, a.y - dir.y * hw);
            }
            if i + 1 == last {
                b = Point::new(b.x + dir.x * hw, b.y + dir.y * hw);
            }
        }
        let n = Point::new(-dir.y * hw, dir.x * hw);
        pieces.push(oriented(vec![
            Point::new(a.x + n.x, a.y + n.y),
            Point::new(b.x + n.x, b.y + n.y),
            Point::new(b.x - n.x, b.y - n.y),
            Point::new(a.x - n.x, a.y - n.y),
        ]));
    }

    if !line.closed && stroke.cap == LineCap::Round {
        pieces.push(oriented(disc(points[0], hw)));
        pieces.push(oriented(disc(points[last], hw)));
    }

    let mut joints: Vec<(Point, Point, Point)> = (1..last)
        .map(|i| (points[i - 1], points[i], points[i + 1]))
        .collect();
    if line.closed && points.len() > 2 {
        joints.push((points[last - 1], points[0], points[1]));
    }
    for (prev, at, next) in joints {
        pieces.extend(join_pieces(prev, at, next, hw, stroke.join));
    }

    pieces
}

fn join_pieces(prev: Point, at: Point, next: Point, hw: f64, join: LineJoin) -> Vec<Polyline> {
    if join == LineJoin::Round {
        return vec![oriented(disc(at, hw))];
    }
    let d1 = unit(prev, at);
    let d2 = unit(at, next);
    let n1 = Point::new(-d1.y, d1.x);
    let n2 = Point::new(-d2.y, d2.x);
    let sum = Point::new(n1.x + n2.x, n1.y + n2.y);
    let sum_len = (sum.x * sum.x + sum.y * sum.y).sqrt();

    let mut out = Vec::with_capacity(2);
    for side in [1.0, -1.0] {
        let p1 = Point::new(at.x + side * n1.x * hw, at.y + side * n1.y * hw);
        let p2 = Point::new(at.x + side * n2.x * hw, at.y + side * n2.y * hw);
        let mut poly = vec![at, p1];
        if join == LineJoin::Miter && sum_len > f64::EPSILON {
            let m = Point::new(sum.x / sum_len, sum.y / sum_len);
            let cos_half = m.x * n1.x + m.y * n1.y;
            if cos_half > f64::EPSILON && 1.0 / cos_half <= MITER_LIMIT {
                let len = hw / cos_half;
                poly.push(Point::new(at.x + side * m.x * len, at.y + side * m.y * len));
            }
        }
        poly.push(p2);
        out.push(oriented(poly));
    }
    out
}

fn unit(a: Point, b: Point) -> Point {
    let len = a.distance(b);
    if len < f64::EPSILON {
        Point::new(1.0, 0.0)
    } else {
        Point::new((b.x - a.x) / len, (b.y - a.y) / len)
    }
}

fn disc(center: Point, radius: f64) -> Vec<Point> {
    (0..DISC_SEGMENTS)
        .map(|i| {
            let t = i as f64 / DISC_SEGMENTS as f64 * std::f64::consts::TAU;
            Point::new(center.x + radius * t.cos(), center.y + radius * t.sin())
        })
        .collect()
}

fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

fn oriented(mut points: Vec<Point>) -> Polyline {
    if signed_area(&points) < 0.0 {
        points.reverse();
    }
    Polyline {
        points,
        closed: true,
    }
}
