//! Overlap and containment tests.
//!
//! All tests are boundary inclusive: shapes that merely touch overlap.

use glam::Vec2;

use super::shapes::{OrientedBox, Ray, Rect};
use super::EPSILON;

/// Inverse substituted for a ray direction component that is effectively zero.
const HUGE_INVERSE: f32 = 1e10;

/// Circle/circle overlap without a square root.
#[inline]
pub fn circles_overlap(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    let radii = r1 + r2;
    c1.distance_squared(c2) <= radii * radii
}

/// Axis-aligned rect overlap.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x <= b.right() && a.right() >= b.x && a.y <= b.bottom() && a.bottom() >= b.y
}

/// The clipped overlap of two rects, or `Rect::ZERO` when they do not overlap.
pub fn rect_intersection(a: &Rect, b: &Rect) -> Rect {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = a.right().min(b.right());
    let y2 = a.bottom().min(b.bottom());

    if x2 > x1 && y2 > y1 {
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    } else {
        Rect::ZERO
    }
}

/// Circle/rect overlap: clamp the center into the rect and compare distances.
pub fn circle_in_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = center.clamp(rect.min(), rect.max().max(rect.min()));
    center.distance_squared(closest) <= radius * radius
}

#[inline]
pub fn point_in_rect(point: Vec2, rect: &Rect) -> bool {
    rect.contains(point)
}

#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    circles_overlap(point, 0.0, center, radius)
}

/// Barycentric point-in-triangle test. Degenerate triangles contain nothing.
pub fn point_in_triangle(point: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom.abs() < EPSILON {
        return false;
    }

    let w1 = ((b.y - c.y) * (point.x - c.x) + (c.x - b.x) * (point.y - c.y)) / denom;
    let w2 = ((c.y - a.y) * (point.x - c.x) + (a.x - c.x) * (point.y - c.y)) / denom;
    let w3 = 1.0 - w1 - w2;

    w1 >= 0.0 && w2 >= 0.0 && w3 >= 0.0
}

/// Crossing-number test. Needs at least three vertices.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        // The straddle check guarantees vj.y != vi.y below.
        if (vi.y > point.y) != (vj.y > point.y) {
            let cross_x = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Separating axis test over the four local axes of both boxes.
pub fn obbs_overlap(a: &OrientedBox, b: &OrientedBox) -> bool {
    let (a_x, a_y) = a.axes();
    let (b_x, b_y) = b.axes();
    let between = b.center - a.center;

    for axis in [a_x, a_y, b_x, b_y] {
        let extent_a = a.half_width * a_x.dot(axis).abs() + a.half_height * a_y.dot(axis).abs();
        let extent_b = b.half_width * b_x.dot(axis).abs() + b.half_height * b_y.dot(axis).abs();
        if between.dot(axis).abs() > extent_a + extent_b {
            return false;
        }
    }
    true
}

/// Slab-method ray/rect test. Returns the distance along the ray to the
/// first boundary crossing, or the exit distance when the ray starts inside.
pub fn ray_intersects_rect(ray: &Ray, rect: &Rect) -> Option<f32> {
    let inverse = |d: f32| {
        if d.abs() < EPSILON {
            HUGE_INVERSE.copysign(d)
        } else {
            1.0 / d
        }
    };
    let inv_x = inverse(ray.direction.x);
    let inv_y = inverse(ray.direction.y);

    let mut tx1 = (rect.x - ray.origin.x) * inv_x;
    let mut tx2 = (rect.right() - ray.origin.x) * inv_x;
    if tx1 > tx2 {
        std::mem::swap(&mut tx1, &mut tx2);
    }

    let mut ty1 = (rect.y - ray.origin.y) * inv_y;
    let mut ty2 = (rect.bottom() - ray.origin.y) * inv_y;
    if ty1 > ty2 {
        std::mem::swap(&mut ty1, &mut ty2);
    }

    let t_min = tx1.max(ty1);
    let t_max = tx2.min(ty2);
    if t_max < 0.0 || t_min > t_max {
        return None;
    }

    let distance = if t_min < 0.0 { t_max } else { t_min };
    (distance >= 0.0).then_some(distance)
}
