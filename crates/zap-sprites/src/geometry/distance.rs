//! Point, line and segment distance queries.

use glam::Vec2;

use super::EPSILON;

/// Distance from `point` to the infinite line through `a` and `b`.
/// A degenerate line (a == b) measures to `a`.
pub fn point_to_line_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len = ab.length();
    if len < EPSILON {
        return point.distance(a);
    }
    ab.perp_dot(point - a).abs() / len
}

/// Closest point to `point` on the segment `[a, b]`.
pub fn closest_point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

pub fn point_to_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    point.distance(closest_point_on_segment(point, a, b))
}

pub fn segment_intersects_circle(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    point_to_segment_distance(center, a, b) <= radius
}
