//! Collision strategy: picks a geometry test for a pair of sprites and runs it
//! on their current (last updated) geometry.

use crate::components::collider::CollisionMethod;
use crate::components::sprite::SpriteEntity;
use crate::geometry::{self, Rect, Ray};
use glam::Vec2;

/// Rotation, in degrees either side of 0, still treated as axis aligned.
pub const AUTO_ANGLE_TOLERANCE: f32 = 5.0;

fn near_axis_aligned(angle: f32) -> bool {
    let angle = geometry::wrap_degrees(angle);
    angle <= AUTO_ANGLE_TOLERANCE || angle >= 360.0 - AUTO_ANGLE_TOLERANCE
}

/// AABB when both sprites are (nearly) unrotated, OBB otherwise.
/// Never picks Circle or PixelPerfect.
pub fn select_auto(a: &SpriteEntity, b: &SpriteEntity) -> CollisionMethod {
    if near_axis_aligned(a.angle()) && near_axis_aligned(b.angle()) {
        CollisionMethod::Aabb
    } else {
        CollisionMethod::Obb
    }
}

/// Test two sprites with `method`.
pub fn collide(a: &SpriteEntity, b: &SpriteEntity, method: CollisionMethod) -> bool {
    match method {
        CollisionMethod::Auto => collide(a, b, select_auto(a, b)),
        CollisionMethod::Circle => geometry::circles_overlap(
            a.position,
            a.collision_radius(),
            b.position,
            b.collision_radius(),
        ),
        CollisionMethod::Aabb => geometry::rects_overlap(&a.collision_rect(), &b.collision_rect()),
        CollisionMethod::Obb | CollisionMethod::PixelPerfect => {
            geometry::obbs_overlap(&a.oriented_box(), &b.oriented_box())
        }
    }
}

/// Circle test against a point with radius, whatever the sprite's method.
pub fn collide_circle(sprite: &SpriteEntity, point: Vec2, radius: f32) -> bool {
    geometry::circles_overlap(sprite.position, sprite.collision_radius(), point, radius)
}

/// AABB test against a world rect, whatever the sprite's method.
pub fn collide_rect(sprite: &SpriteEntity, rect: &Rect) -> bool {
    geometry::rects_overlap(&sprite.collision_rect(), rect)
}

/// Distance along `ray` to the sprite's collision box, if it is hit.
pub fn collide_ray(sprite: &SpriteEntity, ray: &Ray) -> Option<f32> {
    geometry::ray_intersects_rect(ray, &sprite.collision_rect())
}

impl SpriteEntity {
    /// Collide with `other` using this sprite's configured method.
    pub fn collides_with(&self, other: &SpriteEntity) -> bool {
        collide(self, other, self.collision_method())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;

    /// Unbound sprite with a fixed 10x10 collision box around `pos`.
    fn boxed(id: u32, pos: Vec2, angle: f32) -> SpriteEntity {
        let mut s = SpriteEntity::new(EntityId(id)).with_pos(pos).with_angle(angle);
        s.set_collision_rect(Some(Rect::new(-5.0, -5.0, 10.0, 10.0)));
        s.set_collision_radius(Some(5.0));
        s
    }

    #[test]
    fn auto_picks_aabb_near_zero() {
        let a = boxed(1, Vec2::ZERO, 0.0);
        let b = boxed(2, Vec2::ZERO, 357.0);
        assert_eq!(select_auto(&a, &b), CollisionMethod::Aabb);

        let c = boxed(3, Vec2::ZERO, 30.0);
        assert_eq!(select_auto(&a, &c), CollisionMethod::Obb);
        assert_eq!(select_auto(&c, &a), CollisionMethod::Obb);
    }

    #[test]
    fn auto_matches_aabb_for_unrotated_pairs() {
        let a = boxed(1, Vec2::ZERO, 0.0);
        let near = boxed(2, Vec2::new(8.0, 3.0), 0.0);
        let far = boxed(3, Vec2::new(11.0, 0.0), 0.0);

        assert!(collide(&a, &near, CollisionMethod::Auto));
        assert_eq!(
            collide(&a, &near, CollisionMethod::Auto),
            collide(&a, &near, CollisionMethod::Aabb)
        );
        assert!(!collide(&a, &far, CollisionMethod::Auto));
    }

    #[test]
    fn rotated_boxes_use_obb() {
        // Corner-to-corner: AABBs touch, the rotated boxes do not.
        let a = boxed(1, Vec2::ZERO, 45.0);
        let b = boxed(2, Vec2::new(10.0, 10.0), 45.0);
        assert!(collide(&a, &b, CollisionMethod::Aabb));
        assert!(!collide(&a, &b, CollisionMethod::Auto));
        assert_eq!(
            collide(&a, &b, CollisionMethod::PixelPerfect),
            collide(&a, &b, CollisionMethod::Obb)
        );
    }

    #[test]
    fn circle_method_uses_scaled_radius() {
        let a = boxed(1, Vec2::ZERO, 0.0);
        let mut b = boxed(2, Vec2::new(9.0, 0.0), 0.0);
        assert!(collide(&a, &b, CollisionMethod::Circle));

        b.position = Vec2::new(11.0, 0.0);
        assert!(!collide(&a, &b, CollisionMethod::Circle));

        b.set_collision_scale(2.0);
        assert!(collide(&a, &b, CollisionMethod::Circle));
    }

    #[test]
    fn fixed_strategy_overloads_ignore_method() {
        let s = boxed(1, Vec2::ZERO, 0.0).with_collision(CollisionMethod::Obb);
        assert!(collide_circle(&s, Vec2::new(9.0, 0.0), 5.0));
        assert!(!collide_circle(&s, Vec2::new(11.0, 0.0), 5.0));
        assert!(collide_rect(&s, &Rect::new(4.0, 4.0, 2.0, 2.0)));
        assert!(!collide_rect(&s, &Rect::new(6.0, 6.0, 2.0, 2.0)));
    }

    #[test]
    fn ray_picks_sprite() {
        let s = boxed(1, Vec2::new(10.0, 0.0), 0.0);
        let ray = Ray::new(Vec2::ZERO, Vec2::new(1.0, 0.0));
        assert_eq!(collide_ray(&s, &ray), Some(5.0));
    }

    #[test]
    fn collides_with_uses_configured_method() {
        let a = boxed(1, Vec2::ZERO, 0.0).with_collision(CollisionMethod::Circle);
        // Boxes overlap at the corner, circles do not.
        let b = boxed(2, Vec2::new(9.0, 9.0), 0.0);
        assert!(!a.collides_with(&b));
        assert!(b.collides_with(&a));
    }
}
