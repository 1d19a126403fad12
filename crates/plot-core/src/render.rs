// File: crates/plot-core/src/render.rs
// Summary: Render-context capability trait and core-side clipping helpers.

use crate::geometry::{Rect, ScreenPoint, Size};
use crate::types::{Color, Font, HorizontalAlign, LineJoin, VerticalAlign};

/// The capability surface every backend implements.
///
/// The core issues only these primitive calls and assumes nothing about the
/// backend beyond "Y grows downward, units are device-independent points".
/// An absent stroke or fill means "omit that pass"; a thickness <= 0 means
/// no stroke.
pub trait RenderContext {
    fn draw_line(
        &mut self,
        points: &[ScreenPoint],
        stroke: Color,
        thickness: f64,
        dash: Option<&[f64]>,
        join: LineJoin,
        aliased: bool,
    );

    fn draw_polygon(
        &mut self,
        points: &[ScreenPoint],
        fill: Option<Color>,
        stroke: Option<Color>,
        thickness: f64,
        dash: Option<&[f64]>,
        join: LineJoin,
        aliased: bool,
    );

    fn draw_ellipse(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Color>, thickness: f64);

    fn draw_rectangle(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<Color>, thickness: f64);

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        position: ScreenPoint,
        text: &str,
        color: Color,
        font: &Font,
        rotation: f64,
        halign: HorizontalAlign,
        valign: VerticalAlign,
    );

    fn measure_text(&self, text: &str, font: &Font) -> Size;
}

// Cohen-Sutherland outcodes.
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(rect: Rect, x: f64, y: f64) -> u8 {
    let mut code = INSIDE;
    if x < rect.left {
        code |= LEFT;
    } else if x > rect.right() {
        code |= RIGHT;
    }
    if y < rect.top {
        code |= TOP;
    } else if y > rect.bottom() {
        code |= BOTTOM;
    }
    code
}

/// Clips a single segment to a rectangle (Cohen-Sutherland).
/// Returns the clipped endpoints, or `None` when the segment lies outside.
pub fn clip_segment(rect: Rect, mut a: ScreenPoint, mut b: ScreenPoint) -> Option<(ScreenPoint, ScreenPoint)> {
    let mut code_a = outcode(rect, a.x, a.y);
    let mut code_b = outcode(rect, b.x, b.y);

    loop {
        if code_a | code_b == INSIDE {
            return Some((a, b));
        }
        if code_a & code_b != INSIDE {
            return None;
        }

        let code_out = if code_a != INSIDE { code_a } else { code_b };
        let (x, y);
        if code_out & TOP != 0 {
            x = a.x + (b.x - a.x) * (rect.top - a.y) / (b.y - a.y);
            y = rect.top;
        } else if code_out & BOTTOM != 0 {
            x = a.x + (b.x - a.x) * (rect.bottom() - a.y) / (b.y - a.y);
            y = rect.bottom();
        } else if code_out & RIGHT != 0 {
            y = a.y + (b.y - a.y) * (rect.right() - a.x) / (b.x - a.x);
            x = rect.right();
        } else {
            y = a.y + (b.y - a.y) * (rect.left - a.x) / (b.x - a.x);
            x = rect.left;
        }

        if code_out == code_a {
            a = ScreenPoint::new(x, y);
            code_a = outcode(rect, a.x, a.y);
        } else {
            b = ScreenPoint::new(x, y);
            code_b = outcode(rect, b.x, b.y);
        }
    }
}

/// Clips a polyline to a rectangle, producing zero or more contiguous runs.
pub fn clip_polyline(rect: Rect, points: &[ScreenPoint]) -> Vec<Vec<ScreenPoint>> {
    let mut runs: Vec<Vec<ScreenPoint>> = Vec::new();
    let mut current: Vec<ScreenPoint> = Vec::new();

    for w in points.windows(2) {
        match clip_segment(rect, w[0], w[1]) {
            Some((a, b)) => {
                if current.is_empty() {
                    current.push(a);
                } else {
                    let last = *current.last().unwrap();
                    if last.distance_to_squared(a) > 1e-12 {
                        // the segment re-entered the rect at a new point
                        runs.push(std::mem::take(&mut current));
                        current.push(a);
                    }
                }
                current.push(b);
            }
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }

    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Clips a polygon to a rectangle (Sutherland-Hodgman).
pub fn clip_polygon(rect: Rect, points: &[ScreenPoint]) -> Vec<ScreenPoint> {
    // Each edge is (inside predicate, intersection solver).
    type Edge = (fn(Rect, ScreenPoint) -> bool, fn(Rect, ScreenPoint, ScreenPoint) -> ScreenPoint);
    let edges: [Edge; 4] = [
        (
            |r, p| p.x >= r.left,
            |r, a, b| {
                let t = (r.left - a.x) / (b.x - a.x);
                ScreenPoint::new(r.left, a.y + t * (b.y - a.y))
            },
        ),
        (
            |r, p| p.x <= r.right(),
            |r, a, b| {
                let t = (r.right() - a.x) / (b.x - a.x);
                ScreenPoint::new(r.right(), a.y + t * (b.y - a.y))
            },
        ),
        (
            |r, p| p.y >= r.top,
            |r, a, b| {
                let t = (r.top - a.y) / (b.y - a.y);
                ScreenPoint::new(a.x + t * (b.x - a.x), r.top)
            },
        ),
        (
            |r, p| p.y <= r.bottom(),
            |r, a, b| {
                let t = (r.bottom() - a.y) / (b.y - a.y);
                ScreenPoint::new(a.x + t * (b.x - a.x), r.bottom())
            },
        ),
    ];

    let mut output: Vec<ScreenPoint> = points.to_vec();
    for (inside, intersect) in edges {
        if output.is_empty() {
            break;
        }
        let input = std::mem::take(&mut output);
        let mut prev = *input.last().unwrap();
        for p in input {
            let p_in = inside(rect, p);
            let prev_in = inside(rect, prev);
            if p_in {
                if !prev_in {
                    output.push(intersect(rect, prev, p));
                }
                output.push(p);
            } else if prev_in {
                output.push(intersect(rect, prev, p));
            }
            prev = p;
        }
    }
    output
}

/// Draws a polyline pre-clipped to `clip`, splitting it into visible runs.
#[allow(clippy::too_many_arguments)]
pub fn draw_clipped_line(
    rc: &mut dyn RenderContext,
    points: &[ScreenPoint],
    clip: Rect,
    stroke: Color,
    thickness: f64,
    dash: Option<&[f64]>,
    join: LineJoin,
    aliased: bool,
) {
    for run in clip_polyline(clip, points) {
        if run.len() >= 2 {
            rc.draw_line(&run, stroke, thickness, dash, join, aliased);
        }
    }
}

/// Draws a polygon pre-clipped to `clip`.
#[allow(clippy::too_many_arguments)]
pub fn draw_clipped_polygon(
    rc: &mut dyn RenderContext,
    points: &[ScreenPoint],
    clip: Rect,
    fill: Option<Color>,
    stroke: Option<Color>,
    thickness: f64,
) {
    let clipped = clip_polygon(clip, points);
    if clipped.len() >= 3 {
        rc.draw_polygon(&clipped, fill, stroke, thickness, None, LineJoin::Miter, false);
    }
}

/// Draws a rectangle through the polygon primitive so clipping stays uniform
/// across backends.
pub fn draw_clipped_rectangle(
    rc: &mut dyn RenderContext,
    rect: Rect,
    clip: Rect,
    fill: Option<Color>,
    stroke: Option<Color>,
    thickness: f64,
) {
    let corners = [
        ScreenPoint::new(rect.left, rect.top),
        ScreenPoint::new(rect.right(), rect.top),
        ScreenPoint::new(rect.right(), rect.bottom()),
        ScreenPoint::new(rect.left, rect.bottom()),
    ];
    draw_clipped_polygon(rc, &corners, clip, fill, stroke, thickness);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn polyline_inside_is_unchanged() {
        let pts = vec![
            ScreenPoint::new(10.0, 10.0),
            ScreenPoint::new(50.0, 40.0),
            ScreenPoint::new(90.0, 90.0),
        ];
        let runs = clip_polyline(rect(), &pts);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0], pts);
    }

    #[test]
    fn polyline_outside_is_dropped() {
        let pts = vec![ScreenPoint::new(-50.0, -50.0), ScreenPoint::new(-10.0, -10.0)];
        assert!(clip_polyline(rect(), &pts).is_empty());
    }

    #[test]
    fn crossing_segment_is_cut_at_boundary() {
        let (a, b) = clip_segment(
            rect(),
            ScreenPoint::new(-100.0, 50.0),
            ScreenPoint::new(200.0, 50.0),
        )
        .unwrap();
        assert_eq!(a, ScreenPoint::new(0.0, 50.0));
        assert_eq!(b, ScreenPoint::new(100.0, 50.0));
    }

    #[test]
    fn polygon_clip_keeps_vertices_inside() {
        let tri = vec![
            ScreenPoint::new(-50.0, 50.0),
            ScreenPoint::new(50.0, -50.0),
            ScreenPoint::new(150.0, 50.0),
        ];
        let out = clip_polygon(rect(), &tri);
        assert!(out.len() >= 3);
        for p in out {
            assert!(p.x >= -1e-9 && p.x <= 100.0 + 1e-9);
            assert!(p.y >= -1e-9 && p.y <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn polygon_fully_outside_clips_to_nothing() {
        let tri = vec![
            ScreenPoint::new(-50.0, -50.0),
            ScreenPoint::new(-10.0, -50.0),
            ScreenPoint::new(-30.0, -10.0),
        ];
        assert!(clip_polygon(rect(), &tri).is_empty());
    }
}
