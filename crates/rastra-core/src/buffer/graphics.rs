//! Shape rasterization
//!
//! This module converts vector primitives into pixel writes:
//! - Lines (Bresenham, with stroke width)
//! - Rectangle outlines
//! - Circle outlines (midpoint algorithm, annulus scan for wide strokes)
//! - Filled disks
//! - Polylines, polygons and cubic Bezier curves (via [`Shape`])
//!
//! Wide strokes are an approximation: parallel offset lines plus stamped
//! disks for lines, and a brute-force annulus test for circles. Diagonal
//! strokes can show minor over- or under-coverage.
//!
//! All drawing clips silently at the buffer edges.

use super::{PixelBuffer, Rgba};

/// Number of straight segments a cubic Bezier curve is flattened into.
pub const BEZIER_SEGMENTS: u32 = 32;

// =============================================================================
// Point generation helpers
// =============================================================================

/// Generate the points of a one-pixel line using Bresenham's algorithm.
///
/// Integer-only. The line runs from `(x0, y0)` to `(x1, y1)` inclusive with
/// 8-connectivity; a degenerate line yields its single point.
pub fn line_points(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut pts = Vec::with_capacity(dx.max(dy) as usize + 1);
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        pts.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    pts
}

/// Generate the points of a one-pixel circle outline with integer radius
/// `r >= 2` using the midpoint algorithm (decision variable `d = 3 - 2r`).
///
/// Points are emitted 8 at a time (one per octant) and may repeat on the
/// octant boundaries.
pub fn circle_points(cx: i32, cy: i32, r: i32) -> Vec<(i32, i32)> {
    let mut pts = Vec::with_capacity(8 * r.max(1) as usize);
    let mut x = 0;
    let mut y = r;
    let mut d = 3 - 2 * r;

    while y >= x {
        push_octants(&mut pts, cx, cy, x, y);
        if d > 0 {
            d += 4 * (x - y) + 10;
            y -= 1;
        } else {
            d += 4 * x + 6;
        }
        x += 1;
    }

    pts
}

fn push_octants(pts: &mut Vec<(i32, i32)>, cx: i32, cy: i32, x: i32, y: i32) {
    pts.extend_from_slice(&[
        (cx + x, cy + y),
        (cx - x, cy + y),
        (cx + x, cy - y),
        (cx - x, cy - y),
        (cx + y, cy + x),
        (cx - y, cy + x),
        (cx + y, cy - x),
        (cx - y, cy - x),
    ]);
}

/// Generate the points of a filled disk: every pixel with `dx² + dy² <= r²`.
///
/// A zero radius yields the center pixel; a negative radius yields nothing.
pub fn disk_points(cx: i32, cy: i32, r: i32) -> Vec<(i32, i32)> {
    if r < 0 {
        return Vec::new();
    }
    let r2 = r * r;
    let side = (2 * r + 1) as usize;
    let mut pts = Vec::with_capacity(side * side);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                pts.push((cx + dx, cy + dy));
            }
        }
    }
    pts
}

/// Sample points of a cubic Bezier curve, rounded to pixels.
///
/// Returns `BEZIER_SEGMENTS + 1` points from `p[0]` to `p[3]`.
pub fn bezier_points(p: &[(f64, f64); 4]) -> Vec<(i32, i32)> {
    (0..=BEZIER_SEGMENTS)
        .map(|i| {
            let t = i as f64 / BEZIER_SEGMENTS as f64;
            let u = 1.0 - t;
            let b0 = u * u * u;
            let b1 = 3.0 * u * u * t;
            let b2 = 3.0 * u * t * t;
            let b3 = t * t * t;
            let x = b0 * p[0].0 + b1 * p[1].0 + b2 * p[2].0 + b3 * p[3].0;
            let y = b0 * p[0].1 + b1 * p[1].1 + b2 * p[2].1 + b3 * p[3].1;
            (x.round() as i32, y.round() as i32)
        })
        .collect()
}

// =============================================================================
// Shape: closed set of rasterizable primitives
// =============================================================================

/// A vector primitive with its stroke.
///
/// Stroke widths below 1 are drawn as 1.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Straight segment between two points
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: Rgba,
        width: u32,
    },
    /// Axis-aligned rectangle outline between two opposite corners
    Rectangle {
        from: (i32, i32),
        to: (i32, i32),
        color: Rgba,
        width: u32,
    },
    /// Circle outline
    Circle {
        center: (f64, f64),
        radius: f64,
        color: Rgba,
        width: u32,
    },
    /// Closed polygon outline through the given vertices
    Polygon {
        points: Vec<(i32, i32)>,
        color: Rgba,
        width: u32,
    },
    /// Cubic Bezier curve: start, two control points, end
    Bezier {
        points: [(f64, f64); 4],
        color: Rgba,
        width: u32,
    },
}

impl Shape {
    /// Draw this shape into `buf`.
    pub fn rasterize(&self, buf: &mut PixelBuffer) {
        match self {
            Shape::Line {
                from,
                to,
                color,
                width,
            } => buf.draw_line(from.0, from.1, to.0, to.1, *color, *width),
            Shape::Rectangle {
                from,
                to,
                color,
                width,
            } => buf.draw_rect_outline(from.0, from.1, to.0, to.1, *color, *width),
            Shape::Circle {
                center,
                radius,
                color,
                width,
            } => buf.draw_circle_outline(center.0, center.1, *radius, *color, *width),
            Shape::Polygon {
                points,
                color,
                width,
            } => buf.draw_polyline(points, true, *color, *width),
            Shape::Bezier {
                points,
                color,
                width,
            } => buf.draw_polyline(&bezier_points(points), false, *color, *width),
        }
    }
}

// =============================================================================
// PixelBuffer rendering implementations
// =============================================================================

impl PixelBuffer {
    /// Write `color` at every point. Points outside the buffer are clipped.
    pub fn render_points(&mut self, pts: &[(i32, i32)], color: Rgba) {
        for &(x, y) in pts {
            self.set_pixel(x, y, color);
        }
    }

    /// Draw a line from `(x0, y0)` to `(x1, y1)`.
    ///
    /// Width 1 is plain Bresenham. Wider strokes add `width / 2` parallel
    /// lines on each side, offset along the unit normal; above width 2,
    /// disks of radius `width / 2` are stamped along the segment to fill
    /// the gaps between the parallels. A zero-length wide line is a disk.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba, width: u32) {
        let width = width.max(1);
        if width == 1 {
            self.render_points(&line_points(x0, y0, x1, y1), color);
            return;
        }

        let half = (width / 2) as i32;
        let dx = (x1 - x0) as f64;
        let dy = (y1 - y0) as f64;
        let len = dx.hypot(dy);
        if len == 0.0 {
            self.fill_disk(x0, y0, half, color);
            return;
        }

        self.render_points(&line_points(x0, y0, x1, y1), color);

        let nx = -dy / len;
        let ny = dx / len;
        for i in 1..=half {
            for sign in [1.0, -1.0] {
                let ox = (nx * i as f64 * sign).round() as i32;
                let oy = (ny * i as f64 * sign).round() as i32;
                self.render_points(&line_points(x0 + ox, y0 + oy, x1 + ox, y1 + oy), color);
            }
        }

        if width > 2 {
            let steps = (x1 - x0).abs().max((y1 - y0).abs());
            for s in 0..=steps {
                let t = s as f64 / steps as f64;
                let px = (x0 as f64 + dx * t).round() as i32;
                let py = (y0 as f64 + dy * t).round() as i32;
                self.fill_disk(px, py, half, color);
            }
        }
    }

    /// Draw a rectangle outline with corners `(x0, y0)` and `(x1, y1)`.
    ///
    /// Four line calls along the edges; the interior is never filled.
    pub fn draw_rect_outline(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Rgba,
        width: u32,
    ) {
        self.draw_line(x0, y0, x1, y0, color, width);
        self.draw_line(x1, y0, x1, y1, color, width);
        self.draw_line(x1, y1, x0, y1, color, width);
        self.draw_line(x0, y1, x0, y0, color, width);
    }

    /// Draw a circle outline centered at `(cx, cy)`.
    ///
    /// The center is rounded to the nearest pixel. A non-positive radius
    /// draws nothing.
    ///
    /// Width 1:
    /// - `0 < radius < 1`: the single center pixel
    /// - rounded radius 1: the four axis neighbours of the center
    /// - otherwise the midpoint algorithm with the rounded radius
    ///
    /// Wider strokes:
    /// - `radius <= width / 2`: a filled disk of radius
    ///   `max(1, round(radius + width / 2))`
    /// - otherwise every pixel whose distance to the center lies in
    ///   `[max(0, radius - w/2 - 0.5), radius + w/2 + 0.5]`
    pub fn draw_circle_outline(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba, width: u32) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let width = width.max(1);
        let icx = cx.round() as i32;
        let icy = cy.round() as i32;

        if width == 1 {
            if radius < 1.0 {
                self.set_pixel(icx, icy, color);
                return;
            }
            let r = radius.round() as i32;
            if r == 1 {
                self.render_points(
                    &[(icx + 1, icy), (icx - 1, icy), (icx, icy + 1), (icx, icy - 1)],
                    color,
                );
                return;
            }
            self.render_points(&circle_points(icx, icy, r), color);
            return;
        }

        let half = (width / 2) as f64;
        if radius <= half {
            let r = ((radius + half).round() as i32).max(1);
            self.fill_disk(icx, icy, r, color);
            return;
        }

        let hw = width as f64 / 2.0;
        let inner = (radius - hw - 0.5).max(0.0);
        let outer = radius + hw + 0.5;
        let side = 2 * (radius + hw + 1.0).ceil() as i32 + 2;
        let extent = side / 2;
        for dy in -extent..=extent {
            for dx in -extent..=extent {
                let dist = ((dx * dx + dy * dy) as f64).sqrt();
                if dist >= inner && dist <= outer {
                    self.set_pixel(icx + dx, icy + dy, color);
                }
            }
        }
    }

    /// Fill a disk of integer radius `r` centered at `(cx, cy)`.
    pub fn fill_disk(&mut self, cx: i32, cy: i32, r: i32, color: Rgba) {
        self.render_points(&disk_points(cx, cy, r), color);
    }

    /// Draw line segments through `points`, closing the loop if `closed`.
    ///
    /// Fewer than two points draws a single dot (or nothing when empty).
    pub fn draw_polyline(&mut self, points: &[(i32, i32)], closed: bool, color: Rgba, width: u32) {
        match points {
            [] => {}
            [(x, y)] => self.draw_line(*x, *y, *x, *y, color, width),
            _ => {
                for seg in points.windows(2) {
                    self.draw_line(seg[0].0, seg[0].1, seg[1].0, seg[1].1, color, width);
                }
                if closed {
                    let (first, last) = (points[0], points[points.len() - 1]);
                    self.draw_line(last.0, last.1, first.0, first.1, color, width);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    fn set_pixels(buf: &PixelBuffer) -> Vec<(i32, i32)> {
        let mut v = Vec::new();
        for y in 0..buf.height() as i32 {
            for x in 0..buf.width() as i32 {
                if buf.get_pixel(x, y) != Some(Rgba::TRANSPARENT) {
                    v.push((x, y));
                }
            }
        }
        v
    }

    #[test]
    fn test_line_points_horizontal() {
        let pts = line_points(0, 0, 5, 0);
        assert_eq!(pts, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
    }

    #[test]
    fn test_line_points_vertical_reverse() {
        let pts = line_points(2, 4, 2, 0);
        assert_eq!(pts, vec![(2, 4), (2, 3), (2, 2), (2, 1), (2, 0)]);
    }

    #[test]
    fn test_line_points_diagonal() {
        let pts = line_points(0, 0, 3, 3);
        assert_eq!(pts, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_line_points_single_point() {
        assert_eq!(line_points(7, -2, 7, -2), vec![(7, -2)]);
    }

    #[test]
    fn test_line_points_shallow_slope_is_connected() {
        let pts = line_points(0, 0, 10, 3);
        assert_eq!(pts.first(), Some(&(0, 0)));
        assert_eq!(pts.last(), Some(&(10, 3)));
        assert_eq!(pts.len(), 11);
        for w in pts.windows(2) {
            assert!((w[1].0 - w[0].0).abs() <= 1 && (w[1].1 - w[0].1).abs() <= 1);
        }
    }

    #[test]
    fn test_draw_thin_line_exact_pixels() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        buf.draw_line(0, 0, 5, 0, RED, 1);
        let expected: Vec<_> = (0..=5).map(|x| (x, 0)).collect();
        assert_eq!(set_pixels(&buf), expected);
    }

    #[test]
    fn test_draw_line_clips_off_canvas() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        buf.draw_line(-10, 1, 10, 1, RED, 1);
        assert_eq!(set_pixels(&buf), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_draw_width_two_horizontal_line() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        buf.draw_line(2, 5, 7, 5, RED, 2);
        // centerline plus one parallel on each side
        for y in 4..=6 {
            for x in 2..=7 {
                assert_eq!(buf.get_pixel(x, y), Some(RED), "({x},{y})");
            }
        }
        assert_eq!(buf.get_pixel(2, 3), Some(Rgba::TRANSPARENT));
        assert_eq!(buf.get_pixel(2, 7), Some(Rgba::TRANSPARENT));
        assert_eq!(buf.get_pixel(1, 5), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_draw_thick_line_stamps_disks_at_ends() {
        let mut buf = PixelBuffer::new(20, 20).unwrap();
        buf.draw_line(5, 10, 14, 10, RED, 5);
        // disks of radius 2 extend past the endpoints along the axis
        assert_eq!(buf.get_pixel(3, 10), Some(RED));
        assert_eq!(buf.get_pixel(16, 10), Some(RED));
        assert_eq!(buf.get_pixel(17, 10), Some(Rgba::TRANSPARENT));
        assert_eq!(buf.get_pixel(10, 8), Some(RED));
        assert_eq!(buf.get_pixel(10, 12), Some(RED));
        assert_eq!(buf.get_pixel(10, 13), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_degenerate_thick_line_is_disk() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        buf.draw_line(5, 5, 5, 5, RED, 4);
        let mut expected = disk_points(5, 5, 2);
        expected.sort_by_key(|&(x, y)| (y, x));
        assert_eq!(set_pixels(&buf), expected);
    }

    #[test]
    fn test_circle_radius_zero_plots_nothing() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        buf.draw_circle_outline(5.0, 5.0, 0.0, RED, 1);
        assert!(set_pixels(&buf).is_empty());
        buf.draw_circle_outline(5.0, 5.0, -3.0, RED, 4);
        assert!(set_pixels(&buf).is_empty());
    }

    #[test]
    fn test_circle_sub_pixel_radius_plots_center() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        buf.draw_circle_outline(4.6, 5.2, 0.4, RED, 1);
        assert_eq!(set_pixels(&buf), vec![(5, 5)]);
    }

    #[test]
    fn test_circle_radius_one_axis_neighbours() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        buf.draw_circle_outline(5.0, 5.0, 1.0, RED, 1);
        assert_eq!(set_pixels(&buf), vec![(5, 4), (4, 5), (6, 5), (5, 6)]);
    }

    #[test]
    fn test_circle_outline_symmetric() {
        let mut buf = PixelBuffer::new(21, 21).unwrap();
        buf.draw_circle_outline(10.0, 10.0, 6.0, RED, 1);
        for (x, y) in set_pixels(&buf) {
            let (dx, dy) = (x - 10, y - 10);
            assert_eq!(buf.get_pixel(10 - dx, 10 + dy), Some(RED));
            assert_eq!(buf.get_pixel(10 + dx, 10 - dy), Some(RED));
            assert_eq!(buf.get_pixel(10 + dy, 10 + dx), Some(RED));
            let dist = ((dx * dx + dy * dy) as f64).sqrt();
            assert!((dist - 6.0).abs() < 1.0, "({x},{y}) at distance {dist}");
        }
        assert_eq!(buf.get_pixel(16, 10), Some(RED));
        assert_eq!(buf.get_pixel(10, 4), Some(RED));
        assert_eq!(buf.get_pixel(10, 10), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_thick_circle_annulus() {
        let mut buf = PixelBuffer::new(41, 41).unwrap();
        buf.draw_circle_outline(20.0, 20.0, 10.0, RED, 4);
        // annulus [7.5, 12.5]
        assert_eq!(buf.get_pixel(30, 20), Some(RED));
        assert_eq!(buf.get_pixel(32, 20), Some(RED));
        assert_eq!(buf.get_pixel(28, 20), Some(RED));
        assert_eq!(buf.get_pixel(33, 20), Some(Rgba::TRANSPARENT));
        assert_eq!(buf.get_pixel(27, 20), Some(Rgba::TRANSPARENT));
        assert_eq!(buf.get_pixel(20, 20), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_thick_circle_small_radius_falls_back_to_disk() {
        let mut buf = PixelBuffer::new(20, 20).unwrap();
        buf.draw_circle_outline(10.0, 10.0, 2.0, RED, 6);
        // radius 2 <= 3: disk of radius 5
        assert_eq!(buf.get_pixel(10, 10), Some(RED));
        assert_eq!(buf.get_pixel(15, 10), Some(RED));
        assert_eq!(buf.get_pixel(16, 10), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_rect_outline_not_filled() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        buf.draw_rect_outline(1, 1, 6, 4, RED, 1);
        assert_eq!(buf.get_pixel(1, 1), Some(RED));
        assert_eq!(buf.get_pixel(6, 4), Some(RED));
        assert_eq!(buf.get_pixel(3, 1), Some(RED));
        assert_eq!(buf.get_pixel(1, 3), Some(RED));
        assert_eq!(buf.get_pixel(3, 3), Some(Rgba::TRANSPARENT));
        // perimeter of a 6x4 box
        assert_eq!(set_pixels(&buf).len(), 16);
    }

    #[test]
    fn test_disk_points() {
        assert_eq!(disk_points(0, 0, 0), vec![(0, 0)]);
        assert!(disk_points(0, 0, -1).is_empty());
        assert_eq!(disk_points(0, 0, 1).len(), 5);
        assert_eq!(disk_points(0, 0, 2).len(), 13);
    }

    #[test]
    fn test_polygon_shape_closes() {
        let mut buf = PixelBuffer::new(12, 12).unwrap();
        let tri = Shape::Polygon {
            points: vec![(1, 1), (9, 1), (1, 9)],
            color: RED,
            width: 1,
        };
        tri.rasterize(&mut buf);
        assert_eq!(buf.get_pixel(5, 1), Some(RED));
        assert_eq!(buf.get_pixel(1, 5), Some(RED));
        assert_eq!(buf.get_pixel(5, 5), Some(RED));
        assert_eq!(buf.get_pixel(3, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_bezier_endpoints() {
        let pts = bezier_points(&[(0.0, 0.0), (3.0, 10.0), (7.0, 10.0), (10.0, 0.0)]);
        assert_eq!(pts.len(), BEZIER_SEGMENTS as usize + 1);
        assert_eq!(pts[0], (0, 0));
        assert_eq!(pts[BEZIER_SEGMENTS as usize], (10, 0));
        // symmetric control polygon peaks at t = 0.5 with y = 7.5
        assert_eq!(pts[BEZIER_SEGMENTS as usize / 2], (5, 8));
    }

    #[test]
    fn test_shape_line_matches_draw_line() {
        let mut a = PixelBuffer::new(16, 16).unwrap();
        let mut b = PixelBuffer::new(16, 16).unwrap();
        Shape::Line {
            from: (1, 2),
            to: (13, 9),
            color: RED,
            width: 3,
        }
        .rasterize(&mut a);
        b.draw_line(1, 2, 13, 9, RED, 3);
        assert_eq!(a, b);
    }
}
