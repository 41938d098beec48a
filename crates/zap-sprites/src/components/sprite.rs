use glam::Vec2;

use crate::api::context::SpriteContext;
use crate::api::types::EntityId;
use crate::assets::atlas::{FrameAtlas, GroupKey};
use crate::components::animation::{AnimationClock, TickEvents};
use crate::components::collider::{Collider, CollisionMethod};
use crate::geometry::{self, OrientedBox, Rect, EPSILON};
use crate::renderer::traits::{QuadDraw, QuadRenderer};

/// Identifies which frame atlas a sprite draws from.
/// Index into the `SpriteContext` atlas slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// Blend mode for sprite rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending (src-alpha, one-minus-src-alpha).
    #[default]
    Alpha,
    /// Additive blending for glow effects (src-alpha, one).
    Additive,
    /// Multiply blending for shadows and tinting (dst-color, zero).
    Multiply,
}

/// An animated, collidable sprite.
///
/// Angles are in degrees, 0 facing +X and increasing clockwise in the
/// Y-down world. Velocities are per tick.
#[derive(Debug, Clone)]
pub struct SpriteEntity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding sprites by name.
    pub tag: String,
    /// Inactive sprites are skipped by the scene systems.
    pub active: bool,

    /// Position of the sprite center in world space.
    pub position: Vec2,
    /// Added to `position` every update.
    pub velocity: Vec2,
    /// Degrees added to the angle every update.
    pub angular_velocity: f32,
    angle: f32,
    scale: Vec2,

    /// RGB tint.
    pub color: [f32; 3],
    alpha: f32,
    pub flip_h: bool,
    pub flip_v: bool,
    pub visible: bool,
    pub blend: BlendMode,

    animation: AnimationClock,
    collider: Collider,

    atlas: Option<AtlasId>,
    group: usize,

    // Cached by `update` from the current frame.
    width: f32,
    height: f32,
    radius: f32,
    bounds: Rect,
}

impl SpriteEntity {
    /// Create an unbound sprite at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            angle: 0.0,
            scale: Vec2::ONE,
            color: [1.0, 1.0, 1.0],
            alpha: 1.0,
            flip_h: false,
            flip_v: false,
            visible: true,
            blend: BlendMode::Alpha,
            animation: AnimationClock::new(),
            collider: Collider::default(),
            atlas: None,
            group: 0,
            width: 0.0,
            height: 0.0,
            radius: 0.0,
            bounds: Rect::ZERO,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.set_angle(angle);
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_collision(mut self, method: CollisionMethod) -> Self {
        self.collider.method = method;
        self
    }

    // -- Binding --

    /// Bind to `group` of atlas `atlas`, playing the whole group from frame 0.
    ///
    /// Fails if the atlas or group does not exist or the group has no frames.
    pub fn init<'a>(&mut self, ctx: &SpriteContext, atlas: AtlasId, group: impl Into<GroupKey<'a>>) -> bool {
        let Some(frames) = ctx.atlas(atlas) else {
            log::warn!("sprite {}: unknown atlas {}", self.id.0, atlas.0);
            return false;
        };
        let Ok(group) = frames.resolve_group(group.into()) else {
            return false;
        };
        let len = frames.group_len(group);
        if len == 0 {
            log::warn!("sprite {}: group {} has no frames", self.id.0, group);
            return false;
        }

        self.atlas = Some(atlas);
        self.group = group;
        self.animation.set_frame_range(0, len - 1);
        self.animation.set_frame_speed(self.animation.frame_speed(), ctx.ticks_per_second());
        self.animation.reset();
        self.refresh_bounds(ctx);
        true
    }

    pub fn atlas_id(&self) -> Option<AtlasId> {
        self.atlas
    }

    pub fn group(&self) -> usize {
        self.group
    }

    fn bound_atlas<'c>(&self, ctx: &'c SpriteContext) -> Option<&'c FrameAtlas> {
        self.atlas.and_then(|id| ctx.atlas(id))
    }

    // -- Per tick --

    /// Move, rotate, advance the animation and refresh cached bounds.
    /// Call once per tick, before rendering or collision queries.
    pub fn update(&mut self, ctx: &SpriteContext) -> TickEvents {
        self.position += self.velocity;
        self.set_angle(self.angle + self.angular_velocity);
        let events = self.animation.tick();
        self.refresh_bounds(ctx);
        events
    }

    /// Recompute width, height, radius and bounds from the current frame.
    pub fn refresh_bounds(&mut self, ctx: &SpriteContext) {
        let native = self
            .bound_atlas(ctx)
            .map(|atlas| atlas.image_size(self.animation.current_frame(), self.group))
            .unwrap_or(Vec2::ZERO);
        let size = native * self.scale.abs();
        self.width = size.x;
        self.height = size.y;
        self.radius = size.x.max(size.y) * 0.5;
        self.bounds = Rect::from_center(self.position, size);
    }

    /// Draw the current frame. Returns false when nothing was drawn.
    pub fn render(&self, ctx: &SpriteContext, renderer: &mut dyn QuadRenderer) -> bool {
        if !self.visible {
            return false;
        }
        let Some(atlas) = self.bound_atlas(ctx) else {
            return false;
        };
        let region = atlas.image_region(self.animation.current_frame(), self.group);
        if !region.is_valid() {
            return false;
        }
        let Some(texture) = atlas.texture_handle(region.texture_index as usize) else {
            return false;
        };

        let [r, g, b] = self.color;
        let a = self.alpha;
        renderer.set_blend_mode(self.blend);
        renderer.draw_textured_quad(&QuadDraw {
            texture,
            source: region.rect,
            position: self.position,
            tint: [r * a, g * a, b * a, a],
            origin: Vec2::splat(0.5),
            scale: self.scale,
            angle_degrees: self.angle,
            flip_h: self.flip_h,
            flip_v: self.flip_v,
        });
        renderer.restore_default_blend_mode();
        true
    }

    // -- Steering --

    /// Head toward `target` at `speed` per tick. Snaps onto the target and
    /// stops once it is within one step; returns true on arrival.
    pub fn move_toward(&mut self, target: Vec2, speed: f32) -> bool {
        let offset = target - self.position;
        let distance = offset.length();
        if distance <= speed.abs() {
            self.position = target;
            self.velocity = Vec2::ZERO;
            return true;
        }
        self.velocity = offset / distance * speed.abs();
        false
    }

    /// Turn toward `target` degrees the short way round at `speed` per tick.
    pub fn rotate_toward(&mut self, target: f32, speed: f32) -> bool {
        let target = geometry::wrap_degrees(target);
        let delta = geometry::shortest_angle_delta(self.angle, target);
        if delta.abs() <= speed.abs() {
            self.angle = target;
            self.angular_velocity = 0.0;
            return true;
        }
        self.angular_velocity = speed.abs().copysign(delta);
        false
    }

    /// Turn to face `point`.
    pub fn rotate_toward_point(&mut self, point: Vec2, speed: f32) -> bool {
        let offset = point - self.position;
        if offset.length_squared() < EPSILON {
            self.angular_velocity = 0.0;
            return true;
        }
        self.rotate_toward(offset.y.atan2(offset.x).to_degrees(), speed)
    }

    // -- Animation --

    /// Play a named sequence from the bound atlas. False (and no change) when
    /// the name is unknown or its range does not fit this sprite's group.
    pub fn play_animation(&mut self, ctx: &SpriteContext, name: &str) -> bool {
        let Some(atlas) = self.bound_atlas(ctx) else {
            return false;
        };
        let Some(sequence) = atlas.animation(name) else {
            return false;
        };
        let frames = atlas.group_len(self.group);
        if !self.animation.play(sequence, ctx.ticks_per_second(), frames) {
            log::warn!(
                "sprite {}: animation '{}' ({}..={}) does not fit group {} ({} frames)",
                self.id.0, name, sequence.start_frame, sequence.end_frame, self.group, frames
            );
            return false;
        }
        self.refresh_bounds(ctx);
        true
    }

    /// Play `name` unless it is already the current sequence.
    pub fn play_animation_if_different(&mut self, ctx: &SpriteContext, name: &str) -> bool {
        if self.animation.sequence() == Some(name) {
            return true;
        }
        self.play_animation(ctx, name)
    }

    pub fn reset_animation(&mut self) {
        self.animation.reset();
    }

    /// Frames per second for the current range.
    pub fn set_frame_speed(&mut self, ctx: &SpriteContext, frame_speed: f32) -> bool {
        self.animation.set_frame_speed(frame_speed, ctx.ticks_per_second())
    }

    pub fn current_frame(&self) -> usize {
        self.animation.current_frame()
    }

    pub fn is_finished(&self) -> bool {
        self.animation.is_finished()
    }

    pub fn animation(&self) -> &AnimationClock {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationClock {
        &mut self.animation
    }

    // -- Transform and visuals --

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Wrapped into [0, 360).
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = geometry::wrap_degrees(angle);
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Clamped into [0, 1].
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    }

    // -- Collision --

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn collision_method(&self) -> CollisionMethod {
        self.collider.method
    }

    pub fn set_collision_method(&mut self, method: CollisionMethod) {
        self.collider.method = method;
    }

    pub fn collision_scale(&self) -> f32 {
        self.collider.scale()
    }

    pub fn set_collision_scale(&mut self, scale: f32) {
        self.collider.set_scale(scale);
    }

    /// Override the frame-derived radius; `None` restores it.
    pub fn set_collision_radius(&mut self, radius: Option<f32>) {
        self.collider.radius = radius;
    }

    /// Override the frame-derived box with a rect relative to the position.
    pub fn set_collision_rect(&mut self, rect: Option<Rect>) {
        self.collider.rect = rect;
    }

    /// Scaled frame width from the last update.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Visual bounds from the last update, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// World-space collision radius.
    pub fn collision_radius(&self) -> f32 {
        let radius = match self.collider.radius {
            Some(r) => r * self.scale.abs().max_element(),
            None => self.radius,
        };
        radius * self.collider.scale()
    }

    /// World-space collision box, ignoring rotation.
    pub fn collision_rect(&self) -> Rect {
        let s = self.collider.scale();
        match self.collider.rect {
            Some(local) => {
                let k = self.scale.abs() * s;
                Rect::new(
                    self.position.x + local.x * k.x,
                    self.position.y + local.y * k.y,
                    local.w * k.x,
                    local.h * k.y,
                )
            }
            None => Rect::from_center(self.position, Vec2::new(self.width, self.height) * s),
        }
    }

    /// World-space collision box including rotation.
    pub fn oriented_box(&self) -> OrientedBox {
        let mut obb = OrientedBox::from_rect(&self.collision_rect());
        obb.rotation_degrees = self.angle;
        obb
    }
}
