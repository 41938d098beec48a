use crate::api::config::EngineConfig;
use crate::api::types::EntityId;
use crate::assets::atlas::FrameAtlas;
use crate::assets::error::AtlasError;
use crate::assets::manifest::AtlasManifest;
use crate::components::sprite::{AtlasId, SpriteEntity};
use crate::core::time::FixedTimestep;
use crate::renderer::traits::{TexturePageLoader, TextureSource};

/// Everything sprite operations need from the outside world: the texture
/// loader, the atlases it has filled, and the tick rate.
///
/// Passed by reference into sprite calls instead of living in globals.
/// Atlases are stored in slots addressed by [`AtlasId`]; removing one leaves
/// an empty slot so ids held by sprites never point at a different atlas.
pub struct SpriteContext {
    loader: Box<dyn TexturePageLoader>,
    atlases: Vec<Option<FrameAtlas>>,
    config: EngineConfig,
    timestep: FixedTimestep,
    next_id: u32,
}

impl SpriteContext {
    pub fn new(loader: Box<dyn TexturePageLoader>) -> Self {
        Self::with_config(loader, EngineConfig::default())
    }

    pub fn with_config(loader: Box<dyn TexturePageLoader>, config: EngineConfig) -> Self {
        let timestep = FixedTimestep::with_cap(config.ticks_per_second, config.max_ticks_per_frame);
        Self {
            loader,
            atlases: Vec::new(),
            config,
            timestep,
            next_id: 1,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Logical ticks per second; animation speeds are measured against it.
    pub fn ticks_per_second(&self) -> f32 {
        self.timestep.ticks_per_second()
    }

    pub fn timestep_mut(&mut self) -> &mut FixedTimestep {
        &mut self.timestep
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// A fresh sprite with the configured defaults applied.
    pub fn create_sprite(&mut self) -> SpriteEntity {
        let id = self.next_id();
        let mut sprite = SpriteEntity::new(id);
        sprite.set_collision_scale(self.config.default_collision_scale);
        sprite.animation_mut().set_frame_speed(self.config.default_frame_speed, self.ticks_per_second());
        sprite
    }

    // -- Atlases --

    /// Add an empty atlas.
    pub fn create_atlas(&mut self) -> AtlasId {
        self.insert_atlas(FrameAtlas::new())
    }

    fn insert_atlas(&mut self, atlas: FrameAtlas) -> AtlasId {
        self.atlases.push(Some(atlas));
        AtlasId(self.atlases.len() as u32 - 1)
    }

    pub fn atlas(&self, id: AtlasId) -> Option<&FrameAtlas> {
        self.atlases.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn atlas_mut(&mut self, id: AtlasId) -> Option<&mut FrameAtlas> {
        self.atlases.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    /// Number of live atlases.
    pub fn atlas_count(&self) -> usize {
        self.atlases.iter().filter(|a| a.is_some()).count()
    }

    /// Load a texture page into atlas `id`. Returns the texture index.
    pub fn load_texture(&mut self, id: AtlasId, source: TextureSource<'_>) -> Result<usize, AtlasError> {
        let atlas = self
            .atlases
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(AtlasError::UnknownAtlas(id.0))?;
        atlas.add_texture(self.loader.as_mut(), source)
    }

    /// Build a new atlas from a manifest.
    pub fn load_manifest(&mut self, manifest: &AtlasManifest) -> Result<AtlasId, AtlasError> {
        let atlas = manifest.build(self.loader.as_mut())?;
        Ok(self.insert_atlas(atlas))
    }

    /// Release everything in atlas `id` but keep the slot usable.
    pub fn clear_atlas(&mut self, id: AtlasId) -> bool {
        match self.atlases.get_mut(id.0 as usize).and_then(Option::as_mut) {
            Some(atlas) => {
                atlas.clear(self.loader.as_mut());
                true
            }
            None => false,
        }
    }

    /// Release and remove atlas `id`. Sprites still bound to it stop drawing
    /// and colliding against frame geometry.
    pub fn remove_atlas(&mut self, id: AtlasId) -> bool {
        match self.atlases.get_mut(id.0 as usize).and_then(Option::take) {
            Some(mut atlas) => {
                atlas.clear(self.loader.as_mut());
                log::debug!("atlas {} removed", id.0);
                true
            }
            None => false,
        }
    }
}

impl Drop for SpriteContext {
    fn drop(&mut self) {
        for atlas in self.atlases.iter_mut().flatten() {
            atlas.clear(self.loader.as_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::traits::{LoadError, TextureHandle};
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    /// Loader that reports releases through a shared log.
    struct CountingLoader {
        next: u32,
        released: Rc<RefCell<Vec<TextureHandle>>>,
    }

    impl TexturePageLoader for CountingLoader {
        fn load(&mut self, _source: TextureSource<'_>) -> Result<TextureHandle, LoadError> {
            self.next += 1;
            Ok(TextureHandle(self.next))
        }

        fn size(&self, _handle: TextureHandle) -> (u32, u32) {
            (16, 16)
        }

        fn release(&mut self, handle: TextureHandle) {
            self.released.borrow_mut().push(handle);
        }
    }

    fn context() -> (SpriteContext, Rc<RefCell<Vec<TextureHandle>>>) {
        let released = Rc::new(RefCell::new(Vec::new()));
        let loader = CountingLoader { next: 0, released: Rc::clone(&released) };
        (SpriteContext::new(Box::new(loader)), released)
    }

    #[test]
    fn atlas_ids_stay_stable_after_removal() {
        let (mut ctx, released) = context();
        let a = ctx.create_atlas();
        let b = ctx.create_atlas();
        ctx.load_texture(a, TextureSource::Path(Path::new("a.png"))).unwrap();

        assert!(ctx.remove_atlas(a));
        assert!(ctx.atlas(a).is_none());
        assert!(ctx.atlas(b).is_some());
        assert_eq!(ctx.atlas_count(), 1);
        assert_eq!(released.borrow().len(), 1);
        assert!(!ctx.remove_atlas(a));
        assert_eq!(ctx.create_atlas(), AtlasId(2));
    }

    #[test]
    fn loading_into_unknown_atlas_fails() {
        let (mut ctx, _) = context();
        let err = ctx
            .load_texture(AtlasId(7), TextureSource::Bytes(&[0]))
            .unwrap_err();
        assert_eq!(err, AtlasError::UnknownAtlas(7));
    }

    #[test]
    fn drop_releases_all_pages() {
        let (mut ctx, released) = context();
        let a = ctx.create_atlas();
        let b = ctx.create_atlas();
        ctx.load_texture(a, TextureSource::Bytes(&[0])).unwrap();
        ctx.load_texture(b, TextureSource::Bytes(&[0])).unwrap();
        ctx.load_texture(b, TextureSource::Bytes(&[0])).unwrap();
        drop(ctx);
        assert_eq!(released.borrow().len(), 3);
    }

    #[test]
    fn created_sprites_use_config_defaults() {
        let config = EngineConfig {
            ticks_per_second: 30.0,
            default_frame_speed: 5.0,
            default_collision_scale: 0.5,
            ..Default::default()
        };
        let loader = CountingLoader { next: 0, released: Rc::default() };
        let mut ctx = SpriteContext::with_config(Box::new(loader), config);

        let first = ctx.create_sprite();
        let second = ctx.create_sprite();
        assert_ne!(first.id, second.id);
        assert_eq!(first.collision_scale(), 0.5);
        assert_eq!(first.animation().frames_per_tick(), 6.0);
    }
}
