use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, w: 0.0, h: 0.0 };

    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rect centered on `center` with the given full size.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x * 0.5,
            y: center.y - size.y * 0.5,
            w: size.x,
            h: size.y,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// True when the rect covers no area.
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Edge-inclusive point containment.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Same rect moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self { x: self.x + offset.x, y: self.y + offset.y, ..*self }
    }
}

/// Rotatable rectangle, compared with the separating axis theorem.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientedBox {
    pub center: Vec2,
    pub half_width: f32,
    pub half_height: f32,
    /// Rotation in degrees, clockwise in a Y-down world.
    pub rotation_degrees: f32,
}

impl OrientedBox {
    pub fn new(center: Vec2, half_width: f32, half_height: f32, rotation_degrees: f32) -> Self {
        Self { center, half_width, half_height, rotation_degrees }
    }

    /// Unrotated box covering the same area as `rect`.
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            center: rect.center(),
            half_width: rect.w * 0.5,
            half_height: rect.h * 0.5,
            rotation_degrees: 0.0,
        }
    }

    /// Local X and Y axes in world space (unit length).
    pub fn axes(&self) -> (Vec2, Vec2) {
        let (sin, cos) = self.rotation_degrees.to_radians().sin_cos();
        (Vec2::new(cos, sin), Vec2::new(-sin, cos))
    }

    /// The four corners, clockwise from the local top-left.
    pub fn corners(&self) -> [Vec2; 4] {
        let (ax, ay) = self.axes();
        let ex = ax * self.half_width;
        let ey = ay * self.half_height;
        [
            self.center - ex - ey,
            self.center + ex - ey,
            self.center + ex + ey,
            self.center - ex + ey,
        ]
    }
}

/// Half-line used for picking and line-of-sight queries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ray {
    pub origin: Vec2,
    /// Should be normalized for distances to be in world units.
    pub direction: Vec2,
}

impl Ray {
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self { origin, direction }
    }

    pub fn point_at(&self, distance: f32) -> Vec2 {
        self.origin + self.direction * distance
    }
}
