pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod assets;
pub mod geometry;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience
pub use api::config::EngineConfig;
pub use api::context::SpriteContext;
pub use api::types::EntityId;
pub use assets::atlas::{FrameAtlas, GridSpec, Group, GroupKey, TexturePage, TextureRegion};
pub use assets::error::AtlasError;
pub use assets::manifest::{AnimationDescriptor, AtlasManifest, GroupDescriptor};
pub use components::animation::{AnimationClock, AnimationSequence, PlayMode, TickEvents};
pub use components::collider::{Collider, CollisionMethod};
pub use components::sprite::{AtlasId, BlendMode, SpriteEntity};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use geometry::{LineHit, OrientedBox, Ray, Rect};
pub use renderer::instance::{BlendBatch, QuadBuffer, QuadInstance};
pub use renderer::traits::{
    LoadError, QuadDraw, QuadRenderer, TextureHandle, TexturePageLoader, TextureSource,
};
pub use systems::animation::{step, tick_sprites, SpriteEvent, SpriteEventKind};
pub use systems::collision::{collide, collide_circle, collide_ray, collide_rect, select_auto};
pub use systems::render::render_scene;
