//! Rasterizer
//!
//! Stateless scan-conversion routines writing straight into a
//! [`Framebuffer`]. Nothing here knows about flushing; the drawing surface
//! wraps each call in a flush-suppressed batch (see [`crate::Lcd`]).
//!
//! All coordinates are signed logical pixels. Shapes may extend past the
//! buffer edge; every write is clipped, so partial off-screen shapes are
//! routine and never an error. Non-positive sizes and negative radii draw
//! nothing.
//!
//! Offsets from an anchor are computed in i64 and narrowed back with
//! saturation, so shapes anchored anywhere in the i32 range clip instead of
//! overflowing. Filled shapes are built from row spans
//! ([`Framebuffer::fill_h_span`]) and only visit rows inside the buffer.

// Geometry is done in i64/i128 on widened i32 inputs; float results from libm
// are rounded and only used as clipped pixel coordinates.
#![allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::similar_names
)]

use core::f32::consts::PI;
use core::ops::RangeInclusive;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use heapless::Vec;

use crate::framebuffer::Framebuffer;

/// Upper bound on arc sample points (including the fill centre).
pub const MAX_ARC_POINTS: usize = 256;

/// Upper bound on edge crossings collected per scanline.
pub const MAX_SCANLINE_CROSSINGS: usize = 64;

/// Arc and ellipse outlines place one sample per this many pixels of
/// circumference.
const SAMPLE_SPACING: f32 = 5.0;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Integer square root, exact floor for every non-negative input.
pub fn isqrt(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    // f64 gets within one of the answer; settle the rest exactly.
    let mut root = libm::sqrt(n as f64) as i64;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Ellipse scanline half-width `floor(rx·sqrt(1 - dy²/ry²))`, exact.
///
/// Equal to `floor(isqrt(rx²·(ry² - dy²)) / ry)`; requires `ry > 0` and
/// `|dy| <= ry`. With `rx == ry` this is the circle's `isqrt(r² - dy²)`.
fn ellipse_half_width(rx: i64, ry: i64, dy: i64) -> i64 {
    let (rx, ry, dy) = (i128::from(rx), i128::from(ry), i128::from(dy));
    let n = rx * rx * (ry * ry - dy * dy);
    let t = 1.0 - (dy as f64 / ry as f64) * (dy as f64 / ry as f64);
    // f64 lands within a pixel; settle against n.
    let mut hw = (rx as f64 * libm::sqrt(t.max(0.0))) as i128;
    while hw > 0 && (hw * ry) * (hw * ry) > n {
        hw -= 1;
    }
    while ((hw + 1) * ry) * ((hw + 1) * ry) <= n {
        hw += 1;
    }
    hw as i64
}

/// Narrow a widened coordinate. Anything outside i32 is far outside the
/// buffer, and saturating keeps it there.
fn narrow(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn plot(fb: &mut Framebuffer<'_>, x: i64, y: i64, color: Rgb565) {
    fb.set(narrow(x), narrow(y), color);
}

fn h_span(fb: &mut Framebuffer<'_>, x1: i64, x2: i64, y: i64, color: Rgb565) {
    fb.fill_h_span(narrow(x1), narrow(x2), narrow(y), color);
}

fn v_span(fb: &mut Framebuffer<'_>, x: i64, y1: i64, y2: i64, color: Rgb565) {
    fb.fill_v_span(narrow(x), narrow(y1), narrow(y2), color);
}

fn block(fb: &mut Framebuffer<'_>, x: i64, y: i64, w: i64, h: i64, color: Rgb565) {
    fb.fill_rect(narrow(x), narrow(y), narrow(w), narrow(h), color);
}

/// Offsets `dy` in `-r..=r` whose row `yc + dy` lies inside the buffer.
fn visible_dy(fb: &Framebuffer<'_>, yc: i64, r: i64) -> RangeInclusive<i64> {
    let last = i64::from(fb.height()) - 1;
    (-r).max(-yc)..=r.min(last - yc)
}

/// Offsets `d` in `0..=r` whose row `c + s·d` lies inside the buffer.
fn visible_d(fb: &Framebuffer<'_>, c: i64, s: i64, r: i64) -> RangeInclusive<i64> {
    let last = i64::from(fb.height()) - 1;
    let (lo, hi) = if s > 0 { (-c, last - c) } else { (c - last, c) };
    lo.max(0)..=hi.min(r)
}

fn round_offset(v: f32) -> i64 {
    libm::roundf(v) as i64
}

/// Number of outline samples for a curve of radius `r`.
fn sample_steps(r: i32) -> usize {
    let steps = libm::roundf(2.0 * PI * r as f32 / SAMPLE_SPACING);
    if steps < 1.0 {
        1
    } else {
        steps as usize
    }
}

/// Emit the midpoint-circle point set for radius `r`.
///
/// `plot(x, y)` receives the first-octant offset pair once per step; callers
/// mirror it into the octants they need.
fn midpoint_octant(r: i64, mut plot: impl FnMut(i64, i64)) {
    let mut x = 0;
    let mut y = r;
    let mut d = 3 - 2 * r;
    while y >= x {
        plot(x, y);
        if d > 0 {
            y -= 1;
            d += 4 * (x - y) + 10;
        } else {
            d += 4 * x + 6;
        }
        x += 1;
    }
}

// ---------------------------------------------------------------------------
// Points and lines
// ---------------------------------------------------------------------------

/// Checked single-pixel write.
pub fn pixel(fb: &mut Framebuffer<'_>, x: i32, y: i32, color: Rgb565) {
    fb.set(x, y, color);
}

/// Bresenham line, both endpoints inclusive.
pub fn line(fb: &mut Framebuffer<'_>, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb565) {
    let dx = (i64::from(x2) - i64::from(x1)).abs();
    let dy = (i64::from(y2) - i64::from(y1)).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x1, y1);

    loop {
        fb.set(x, y, color);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        // Each axis only steps while short of its endpoint, so x and y stay
        // between the endpoints.
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

// ---------------------------------------------------------------------------
// Rectangles
// ---------------------------------------------------------------------------

/// Rectangle at `(x, y)` of `w × h`, optionally with rounded corners.
///
/// The corner radius is clamped to half the smaller side. With `radius == 0`
/// the outline is drawn as four spans and the fill as one block.
#[allow(clippy::too_many_arguments)]
pub fn rect(
    fb: &mut Framebuffer<'_>,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    radius: i32,
    filled: bool,
    color: Rgb565,
) {
    if w <= 0 || h <= 0 {
        return;
    }
    let (x, y, w, h) = (i64::from(x), i64::from(y), i64::from(w), i64::from(h));
    let r = i64::from(radius).max(0).min(w / 2).min(h / 2);
    let right = x + w - 1;
    let bottom = y + h - 1;

    if r == 0 {
        if filled {
            block(fb, x, y, w, h, color);
        } else {
            h_span(fb, x, right, y, color);
            h_span(fb, x, right, bottom, color);
            v_span(fb, x, y, bottom, color);
            v_span(fb, right, y, bottom, color);
        }
        return;
    }

    // Inset corner centres, each with the sign pair pointing into its quadrant.
    let corners = [
        (x + r, y + r, -1, -1),
        (right - r, y + r, 1, -1),
        (x + r, bottom - r, -1, 1),
        (right - r, bottom - r, 1, 1),
    ];

    if filled {
        block(fb, x + r, y, w - 2 * r, h, color);
        block(fb, x, y + r, w, h - 2 * r, color);
        for (cx, cy, sx, sy) in corners {
            quarter_disk(fb, cx, cy, r, sx, sy, color);
        }
    } else {
        h_span(fb, x + r, right - r, y, color);
        h_span(fb, x + r, right - r, bottom, color);
        v_span(fb, x, y + r, bottom - r, color);
        v_span(fb, right, y + r, bottom - r, color);
        for (cx, cy, sx, sy) in corners {
            quarter_arc(fb, cx, cy, r, sx, sy, color);
        }
    }
}

/// One quadrant of a filled disk: rows `cy + sy*dy` spanning `cx ..= cx + sx*hw`.
fn quarter_disk(fb: &mut Framebuffer<'_>, cx: i64, cy: i64, r: i64, sx: i64, sy: i64, color: Rgb565) {
    for dy in visible_d(fb, cy, sy, r) {
        let hw = isqrt(r * r - dy * dy);
        h_span(fb, cx, cx + sx * hw, cy + sy * dy, color);
    }
}

/// One quadrant of a midpoint circle outline.
fn quarter_arc(fb: &mut Framebuffer<'_>, cx: i64, cy: i64, r: i64, sx: i64, sy: i64, color: Rgb565) {
    midpoint_octant(r, |px, py| {
        plot(fb, cx + sx * px, cy + sy * py, color);
        plot(fb, cx + sx * py, cy + sy * px, color);
    });
}

// ---------------------------------------------------------------------------
// Circles and ellipses
// ---------------------------------------------------------------------------

/// Circle of radius `r` centred on `(xc, yc)`.
///
/// The outline is the midpoint point set. The fill is computed per scanline
/// as `floor(sqrt(r² - dy²))`, independently of the outline.
pub fn circle(fb: &mut Framebuffer<'_>, xc: i32, yc: i32, r: i32, filled: bool, color: Rgb565) {
    if r < 0 {
        return;
    }
    let (xc, yc, r) = (i64::from(xc), i64::from(yc), i64::from(r));
    if filled {
        for dy in visible_dy(fb, yc, r) {
            let hw = isqrt(r * r - dy * dy);
            h_span(fb, xc - hw, xc + hw, yc + dy, color);
        }
        return;
    }
    midpoint_octant(r, |x, y| {
        for (px, py) in [
            (x, y),
            (-x, y),
            (x, -y),
            (-x, -y),
            (y, x),
            (-y, x),
            (y, -x),
            (-y, -x),
        ] {
            plot(fb, xc + px, yc + py, color);
        }
    });
}

/// Axis-aligned ellipse with radii `rx`, `ry`.
///
/// The fill spans `floor(rx·sqrt(1 - dy²/ry²))` either side of the centre on
/// each row. The outline is a dotted approximation:
/// `max(1, round(2π·max(rx, ry)/5))` points sampled at equal angles, not
/// joined.
pub fn ellipse(
    fb: &mut Framebuffer<'_>,
    xc: i32,
    yc: i32,
    rx: i32,
    ry: i32,
    filled: bool,
    color: Rgb565,
) {
    if rx < 0 || ry < 0 {
        return;
    }
    let steps = sample_steps(rx.max(ry));
    let (xc, yc) = (i64::from(xc), i64::from(yc));
    let (rx, ry) = (i64::from(rx), i64::from(ry));
    if filled {
        if ry == 0 {
            h_span(fb, xc - rx, xc + rx, yc, color);
            return;
        }
        for dy in visible_dy(fb, yc, ry) {
            let hw = ellipse_half_width(rx, ry, dy);
            h_span(fb, xc - hw, xc + hw, yc + dy, color);
        }
        return;
    }

    for i in 0..steps {
        let theta = 2.0 * PI * i as f32 / steps as f32;
        let px = xc + round_offset(rx as f32 * libm::cosf(theta));
        let py = yc + round_offset(ry as f32 * libm::sinf(theta));
        plot(fb, px, py, color);
    }
}

// ---------------------------------------------------------------------------
// Arcs
// ---------------------------------------------------------------------------

/// Sample points of an arc from `start` to `end` radians, both inclusive.
///
/// Angles follow screen coordinates (y grows downward). The step count is
/// clamped so the points plus an optional centre fit [`MAX_ARC_POINTS`].
/// Points past the i32 range saturate to it.
pub fn arc_points(xc: i32, yc: i32, r: i32, start: f32, end: f32) -> Vec<Point, MAX_ARC_POINTS> {
    let steps = sample_steps(r).min(MAX_ARC_POINTS - 2);
    let span = end - start;
    let mut points = Vec::new();
    for i in 0..=steps {
        let theta = start + span * i as f32 / steps as f32;
        let p = Point::new(
            narrow(i64::from(xc) + round_offset(r as f32 * libm::cosf(theta))),
            narrow(i64::from(yc) + round_offset(r as f32 * libm::sinf(theta))),
        );
        // Capacity is MAX_ARC_POINTS and at most MAX_ARC_POINTS - 1 are pushed.
        let _ = points.push(p);
    }
    points
}

/// Arc outline, or a filled pie slice closed through the centre.
#[allow(clippy::too_many_arguments)]
pub fn arc(
    fb: &mut Framebuffer<'_>,
    xc: i32,
    yc: i32,
    r: i32,
    start: f32,
    end: f32,
    filled: bool,
    color: Rgb565,
) {
    if r < 0 {
        return;
    }
    let mut points = arc_points(xc, yc, r, start, end);
    for pair in points.windows(2) {
        if let [a, b] = pair {
            line(fb, a.x, a.y, b.x, b.y, color);
        }
    }
    if filled {
        let _ = points.push(Point::new(xc, yc));
        polygon(fb, &points, true, color);
    }
}

// ---------------------------------------------------------------------------
// Polygons
// ---------------------------------------------------------------------------

/// Closed polygon through `vertices`; fewer than three draws nothing.
///
/// The fill is an even-odd scanline fill plus the outline, so the bottom
/// edge (excluded by the half-open crossing rule) is still painted.
pub fn polygon(fb: &mut Framebuffer<'_>, vertices: &[Point], filled: bool, color: Rgb565) {
    if vertices.len() < 3 {
        return;
    }
    if filled {
        scanline_fill(fb, vertices, color);
    }
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices.get(i + 1).or(vertices.first()).unwrap_or(a);
        line(fb, a.x, a.y, b.x, b.y, color);
    }
}

/// Triangle, the three-vertex polygon.
pub fn triangle(fb: &mut Framebuffer<'_>, p1: Point, p2: Point, p3: Point, filled: bool, color: Rgb565) {
    polygon(fb, &[p1, p2, p3], filled, color);
}

/// Scanline interior fill.
///
/// An edge crosses row `y` when `y ∈ [min(y1, y2), max(y1, y2))`, so a
/// vertex shared by two edges is counted once and horizontal edges never.
/// Crossings are sorted and filled pairwise; an unmatched last crossing is
/// dropped.
pub fn scanline_fill(fb: &mut Framebuffer<'_>, vertices: &[Point], color: Rgb565) {
    let Some(min_y) = vertices.iter().map(|p| p.y).min() else {
        return;
    };
    let Some(max_y) = vertices.iter().map(|p| p.y).max() else {
        return;
    };
    let y_start = min_y.max(0);
    let y_end = max_y.min(i32::from(fb.height()) - 1);

    for y in y_start..=y_end {
        let crossings = row_crossings(vertices, y);
        for pair in crossings.chunks_exact(2) {
            if let [x1, x2] = pair {
                fb.fill_h_span(*x1, *x2, y, color);
            }
        }
    }
}

/// Sorted x crossings of row `y` with every polygon edge.
fn row_crossings(vertices: &[Point], y: i32) -> Vec<i32, MAX_SCANLINE_CROSSINGS> {
    let mut xs: Vec<i32, MAX_SCANLINE_CROSSINGS> = Vec::new();
    for (i, a) in vertices.iter().enumerate() {
        let b = vertices.get(i + 1).or(vertices.first()).unwrap_or(a);
        let (lo, hi) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        if y < lo || y >= hi {
            continue;
        }
        // hi > lo here, so the division is well defined.
        let num = (i64::from(y) - i64::from(a.y)) * (i64::from(b.x) - i64::from(a.x));
        let x = i64::from(a.x) + num / (i64::from(b.y) - i64::from(a.y));
        if xs.push(x as i32).is_err() {
            break;
        }
    }
    xs.sort_unstable();
    xs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::color;
    use platform::DisplayInfo;

    const W: u16 = 32;
    const H: u16 = 24;

    fn storage() -> std::vec::Vec<u8> {
        vec![0u8; usize::from(W) * usize::from(H) * 2]
    }

    fn fb(buf: &mut [u8]) -> Framebuffer<'_> {
        let mut fb = Framebuffer::new(
            buf,
            DisplayInfo {
                width: W,
                height: H,
            },
        )
        .unwrap();
        fb.mark_clean();
        fb
    }

    fn lit(fb: &Framebuffer<'_>) -> std::vec::Vec<(i32, i32)> {
        let mut out = std::vec::Vec::new();
        for y in 0..i32::from(H) {
            for x in 0..i32::from(W) {
                if fb.get(x, y) != Some(color::BLACK) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn isqrt_is_exact_floor() {
        for n in 0..2000i64 {
            let r = isqrt(n);
            assert!(r * r <= n && (r + 1) * (r + 1) > n, "n={n}");
        }
        assert_eq!(isqrt(-4), 0);
        assert_eq!(isqrt(i64::from(i32::MAX)), 46_340);
    }

    #[test]
    fn degenerate_line_is_one_pixel() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        line(&mut fb, 0, 0, 0, 0, color::WHITE);
        assert_eq!(lit(&fb), [(0, 0)]);
    }

    #[test]
    fn horizontal_line_is_inclusive() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        line(&mut fb, 0, 0, 4, 0, color::WHITE);
        assert_eq!(lit(&fb), [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn diagonal_line_hits_both_ends_in_either_direction() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        line(&mut fb, 10, 7, 2, 1, color::WHITE);
        let pts = lit(&fb);
        assert!(pts.contains(&(10, 7)) && pts.contains(&(2, 1)));
        // One pixel per step along the major axis.
        assert_eq!(pts.len(), 9);
    }

    #[test]
    fn line_off_buffer_is_clipped() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        line(&mut fb, -5, 3, 40, 3, color::WHITE);
        assert_eq!(lit(&fb).len(), usize::from(W));
    }

    #[test]
    fn square_rect_outline_is_four_edges() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        rect(&mut fb, 2, 3, 5, 4, 0, false, color::WHITE);
        let pts = lit(&fb);
        // Perimeter of a 5x4 box.
        assert_eq!(pts.len(), 2 * 5 + 2 * 2);
        assert!(pts.contains(&(2, 3)) && pts.contains(&(6, 6)));
        assert!(!pts.contains(&(4, 4)));
    }

    #[test]
    fn zero_area_rect_is_noop() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        rect(&mut fb, 2, 3, 0, 4, 0, true, color::WHITE);
        rect(&mut fb, 2, 3, 4, -1, 2, false, color::WHITE);
        assert!(!fb.is_dirty());
    }

    #[test]
    fn rounded_fill_trims_corners_only() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        rect(&mut fb, 0, 0, 12, 10, 3, true, color::WHITE);
        assert_eq!(fb.get(0, 0), Some(color::BLACK));
        assert_eq!(fb.get(11, 9), Some(color::BLACK));
        assert_eq!(fb.get(3, 0), Some(color::WHITE));
        assert_eq!(fb.get(0, 3), Some(color::WHITE));
        assert_eq!(fb.get(6, 5), Some(color::WHITE));
        assert_eq!(fb.get(12, 5), Some(color::BLACK));
    }

    #[test]
    fn oversized_radius_is_clamped_to_half_side() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        rect(&mut fb, 0, 0, 8, 8, 100, true, color::WHITE);
        // r = 4 makes the shape a disk of radius 4 around (4, 4) inset corners.
        assert_eq!(fb.get(4, 0), Some(color::WHITE));
        assert_eq!(fb.get(0, 0), Some(color::BLACK));
        assert_eq!(fb.get(8, 4), Some(color::BLACK));
    }

    #[test]
    fn rounded_outline_leaves_interior_empty() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        rect(&mut fb, 1, 1, 14, 10, 3, false, color::WHITE);
        assert_eq!(fb.get(7, 1), Some(color::WHITE));
        assert_eq!(fb.get(1, 6), Some(color::WHITE));
        assert_eq!(fb.get(7, 6), Some(color::BLACK));
        assert_eq!(fb.get(1, 1), Some(color::BLACK));
    }

    #[test]
    fn filled_circle_rows_match_floor_sqrt() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        let (xc, yc, r) = (15, 11, 7);
        circle(&mut fb, xc, yc, r, true, color::WHITE);
        for y in 0..i32::from(H) {
            for x in 0..i32::from(W) {
                let dy = y - yc;
                let inside = dy.abs() <= r
                    && (x - xc).abs() <= isqrt(i64::from(r * r - dy * dy)) as i32;
                let expected = if inside { color::WHITE } else { color::BLACK };
                assert_eq!(fb.get(x, y), Some(expected), "({x},{y})");
            }
        }
    }

    #[test]
    fn stroked_circle_is_eight_way_symmetric() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        circle(&mut fb, 15, 11, 6, false, color::WHITE);
        for (x, y) in lit(&fb) {
            let (dx, dy) = (x - 15, y - 11);
            for (mx, my) in [(-dx, dy), (dx, -dy), (dy, dx)] {
                assert_eq!(fb.get(15 + mx, 11 + my), Some(color::WHITE));
            }
        }
        assert_eq!(fb.get(15, 5), Some(color::WHITE));
        assert_eq!(fb.get(15, 11), Some(color::BLACK));
    }

    #[test]
    fn zero_radius_circle_is_centre_pixel() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        circle(&mut fb, 3, 3, 0, false, color::WHITE);
        assert_eq!(lit(&fb), [(3, 3)]);
    }

    #[test]
    fn ellipse_fill_is_bounded_by_radii() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        ellipse(&mut fb, 15, 11, 10, 5, true, color::WHITE);
        for (x, y) in lit(&fb) {
            assert!((x - 15).abs() <= 10 && (y - 11).abs() <= 5);
        }
        assert_eq!(fb.get(5, 11), Some(color::WHITE));
        assert_eq!(fb.get(25, 11), Some(color::WHITE));
        assert_eq!(fb.get(15, 6), Some(color::WHITE));
        assert_eq!(fb.get(15, 16), Some(color::WHITE));
    }

    #[test]
    fn flat_ellipse_fill_is_one_row() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        ellipse(&mut fb, 10, 4, 3, 0, true, color::WHITE);
        assert_eq!(lit(&fb), [(7, 4), (8, 4), (9, 4), (10, 4), (11, 4), (12, 4), (13, 4)]);
    }

    #[test]
    fn stroked_ellipse_is_dotted() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        ellipse(&mut fb, 15, 11, 10, 8, false, color::WHITE);
        let pts = lit(&fb);
        // round(2π·10/5) = 13 samples, all distinct at this size.
        assert_eq!(pts.len(), 13);
        assert!(pts.contains(&(25, 11)));
    }

    #[test]
    fn arc_points_include_both_endpoints() {
        let pts = arc_points(10, 10, 5, 0.0, PI / 2.0);
        assert_eq!(pts.first(), Some(&Point::new(15, 10)));
        assert_eq!(pts.last(), Some(&Point::new(10, 15)));
        // round(2·5·π/5) = 6 steps, 7 points.
        assert_eq!(pts.len(), 7);
    }

    #[test]
    fn huge_arc_is_clamped() {
        let pts = arc_points(0, 0, 10_000, 0.0, 2.0 * PI);
        assert_eq!(pts.len(), MAX_ARC_POINTS - 1);
    }

    #[test]
    fn filled_arc_covers_pie_slice() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        arc(&mut fb, 5, 5, 10, 0.0, PI / 2.0, true, color::WHITE);
        assert_eq!(fb.get(8, 8), Some(color::WHITE));
        assert_eq!(fb.get(5, 5), Some(color::WHITE));
        // Outside the quarter.
        assert_eq!(fb.get(3, 3), Some(color::BLACK));
    }

    #[test]
    fn square_polygon_fill_is_eleven_by_eleven() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        let square = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        polygon(&mut fb, &square, true, color::WHITE);
        let pts = lit(&fb);
        assert_eq!(pts.len(), 121);
        assert!(pts.iter().all(|&(x, y)| (0..=10).contains(&x) && (0..=10).contains(&y)));
    }

    #[test]
    fn two_vertices_draw_nothing() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        polygon(&mut fb, &[Point::new(0, 0), Point::new(5, 5)], true, color::WHITE);
        polygon(&mut fb, &[], false, color::WHITE);
        assert!(!fb.is_dirty());
    }

    #[test]
    fn shared_vertex_counted_once() {
        // Apex at (5, 0) is shared by two edges; half-open rule yields one
        // pair per row.
        let xs = row_crossings(&[Point::new(5, 0), Point::new(10, 10), Point::new(0, 10)], 0);
        assert_eq!(xs.as_slice(), &[5, 5]);
        let xs = row_crossings(&[Point::new(5, 0), Point::new(10, 10), Point::new(0, 10)], 10);
        assert!(xs.is_empty());
    }

    #[test]
    fn triangle_outline_matches_polygon() {
        let mut a = storage();
        let mut b = storage();
        let mut fa = fb(&mut a);
        let mut fb2 = fb(&mut b);
        let (p1, p2, p3) = (Point::new(1, 1), Point::new(20, 4), Point::new(8, 18));
        triangle(&mut fa, p1, p2, p3, false, color::RED);
        polygon(&mut fb2, &[p1, p2, p3], false, color::RED);
        assert_eq!(fa.as_bytes(), fb2.as_bytes());
    }

    #[test]
    fn ellipse_half_width_is_exact_floor() {
        assert_eq!(ellipse_half_width(41, 41, -40), 9);
        for ry in 1..=300i64 {
            for rx in [0i64, 1, 41, 142, 300] {
                for dy in -ry..=ry {
                    let exact = isqrt(rx * rx * (ry * ry - dy * dy)) / ry;
                    assert_eq!(ellipse_half_width(rx, ry, dy), exact, "rx={rx} ry={ry} dy={dy}");
                }
            }
        }
    }

    #[test]
    fn equal_radii_ellipse_fill_matches_circle_fill() {
        const SIDE: u16 = 100;
        let info = DisplayInfo {
            width: SIDE,
            height: SIDE,
        };
        let mut a = vec![0u8; usize::from(SIDE) * usize::from(SIDE) * 2];
        let mut b = a.clone();
        for r in 0..=48 {
            let mut oval = Framebuffer::new(&mut a, info).unwrap();
            oval.fill(color::BLACK);
            ellipse(&mut oval, 50, 50, r, r, true, color::WHITE);
            let mut disk = Framebuffer::new(&mut b, info).unwrap();
            disk.fill(color::BLACK);
            circle(&mut disk, 50, 50, r, true, color::WHITE);
            assert_eq!(oval.as_bytes(), disk.as_bytes(), "r={r}");
        }
    }

    #[test]
    fn shapes_anchored_at_i32_limits_are_clipped_away() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        let anchors = [
            (i32::MAX, 0),
            (i32::MIN, 0),
            (0, i32::MAX),
            (0, i32::MIN),
            (i32::MAX, i32::MAX),
            (i32::MIN, i32::MIN),
        ];
        for (x, y) in anchors {
            for filled in [false, true] {
                rect(&mut fb, x, y, 2, 2, 0, filled, color::WHITE);
                rect(&mut fb, x, y, 9, 7, 3, filled, color::WHITE);
                circle(&mut fb, x, y, 3, filled, color::WHITE);
                ellipse(&mut fb, x, y, 5, 3, filled, color::WHITE);
                arc(&mut fb, x, y, 6, 0.0, PI, filled, color::WHITE);
            }
        }
        assert!(!fb.is_dirty());
    }

    #[test]
    fn rect_reaching_past_i32_max_keeps_visible_edges() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        rect(&mut fb, 5, 2, i32::MAX, 3, 0, false, color::WHITE);
        assert_eq!(fb.get(5, 3), Some(color::WHITE));
        assert_eq!(fb.get(31, 2), Some(color::WHITE));
        assert_eq!(fb.get(31, 4), Some(color::WHITE));
        assert_eq!(fb.get(4, 2), Some(color::BLACK));
        assert_eq!(fb.get(10, 3), Some(color::BLACK));
    }

    #[test]
    fn max_radius_filled_circle_covers_buffer() {
        let mut buf = storage();
        let mut fb = fb(&mut buf);
        circle(&mut fb, 10, 10, i32::MAX, true, color::RED);
        assert_eq!(lit(&fb).len(), usize::from(W) * usize::from(H));
    }
}
