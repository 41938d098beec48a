//! 2D collision geometry: pure, allocation-free queries.
//!
//! Every function here is total. Degenerate input (zero-length segments,
//! collapsed triangles, polygons with fewer than three vertices) yields a
//! boundary answer instead of dividing by a near-zero value.

pub mod shapes;
pub mod overlap;
pub mod distance;
pub mod line;

use glam::Vec2;

pub use shapes::{Rect, OrientedBox, Ray};
pub use overlap::{
    circles_overlap, rects_overlap, rect_intersection, circle_in_rect,
    point_in_rect, point_in_circle, point_in_triangle, point_in_polygon,
    obbs_overlap, ray_intersects_rect,
};
pub use distance::{
    point_to_line_distance, point_to_segment_distance,
    closest_point_on_segment, segment_intersects_circle,
};
pub use line::{line_intersection, LineHit};

/// Magnitudes below this are treated as zero.
pub const EPSILON: f32 = 1e-10;

/// Normalize `v`, leaving a zero-length vector unchanged.
#[inline]
pub fn normalize_or_self(v: Vec2) -> Vec2 {
    let len = v.length();
    if len < EPSILON {
        v
    } else {
        v / len
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]` degrees.
#[inline]
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    let delta = wrap_degrees(to - from);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}
