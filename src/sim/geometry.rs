//! Geometry kernel for hitbox tests
//!
//! Pure functions over points, segments, rectangles and circles. Board
//! coordinates: x grows right, y grows down.
//!
//! Boundary conventions differ on purpose: `point_in_rect` is inclusive on all
//! four sides, while circle tests use strict `<` (touching is not a hit).

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner plus extent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The four boundary edges: top, right, bottom, left
    pub fn edges(&self) -> [Segment; 4] {
        let tl = DVec2::new(self.x, self.y);
        let tr = DVec2::new(self.right(), self.y);
        let bl = DVec2::new(self.x, self.bottom());
        let br = DVec2::new(self.right(), self.bottom());
        [
            Segment::new(tl, tr),
            Segment::new(tr, br),
            Segment::new(bl, br),
            Segment::new(tl, bl),
        ]
    }
}

/// Circle given by center and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// Line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
}

impl Segment {
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self { a, b }
    }
}

/// Inclusive point-in-rectangle test
#[inline]
pub fn point_in_rect(point: DVec2, rect: &Rect) -> bool {
    point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom()
}

/// Euclidean distance from a point to a circle's center
///
/// Callers compare the result against the radius.
#[inline]
pub fn distance(point: DVec2, circle: &Circle) -> f64 {
    point.distance(circle.center)
}

/// Parametric segment/segment intersection
///
/// Parallel segments (zero determinant) never intersect, even when collinear
/// and overlapping. Hit results at grazing angles depend on this.
pub fn segments_intersect(s1: &Segment, s2: &Segment) -> bool {
    let d1 = s1.b - s1.a;
    let d2 = s2.b - s2.a;
    let det = d1.x * d2.y - d1.y * d2.x;

    if det == 0.0 {
        return false;
    }

    let to_end = s2.b - s1.a;
    let lambda = (d2.y * to_end.x - d2.x * to_end.y) / det;
    let gamma = (-d1.y * to_end.x + d1.x * to_end.y) / det;

    (0.0..=1.0).contains(&lambda) && (0.0..=1.0).contains(&gamma)
}

/// True if the segment crosses any of the rectangle's four edges
///
/// A segment lying entirely inside the rectangle does not count; pair this
/// with `point_in_rect` on the endpoints.
pub fn segment_intersects_rect(segment: &Segment, rect: &Rect) -> bool {
    rect.edges()
        .iter()
        .any(|edge| segments_intersect(segment, edge))
}

/// True if the point on the segment closest to `center` is strictly within `radius`
pub fn segment_intersects_circle(segment: &Segment, center: DVec2, radius: f64) -> bool {
    closest_point_on_segment(segment, center).distance(center) < radius
}

/// Project `point` onto the segment, clamped to its endpoints
pub fn closest_point_on_segment(segment: &Segment, point: DVec2) -> DVec2 {
    let line = segment.b - segment.a;
    let len = line.length();
    if len == 0.0 {
        // Degenerate segment behaves as a single point
        return segment.a;
    }

    let dir = line / len;
    let projection = (point - segment.a).dot(dir);

    if projection < 0.0 {
        segment.a
    } else if projection > len {
        segment.b
    } else {
        segment.a + dir * projection
    }
}
