use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Smallest allowed collision scale.
pub const MIN_COLLISION_SCALE: f32 = 0.1;

/// Which geometry test a sprite collides with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMethod {
    /// AABB when both sprites are unrotated, OBB otherwise.
    #[default]
    Auto,
    Circle,
    Aabb,
    Obb,
    /// Approximated with OBB; no per-pixel masks.
    PixelPerfect,
}

/// Collision configuration for a sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub method: CollisionMethod,
    /// Replaces the frame-derived radius (unscaled).
    pub radius: Option<f32>,
    /// Replaces the frame-derived box. Local pixels relative to the sprite
    /// position, before scale.
    pub rect: Option<Rect>,
    scale: f32,
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            method: CollisionMethod::Auto,
            radius: None,
            rect: None,
            scale: 1.0,
        }
    }
}

impl Collider {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Clamped to at least [`MIN_COLLISION_SCALE`].
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = if scale.is_nan() { 1.0 } else { scale.max(MIN_COLLISION_SCALE) };
    }
}
