use crate::api::types::EntityId;
use crate::components::sprite::SpriteEntity;

/// Simple sprite storage using a flat Vec.
/// Designed for small-to-medium sprite counts (hundreds, not millions).
pub struct Scene {
    sprites: Vec<SpriteEntity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            sprites: Vec::with_capacity(256),
        }
    }

    /// Create a scene with a specific sprite capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sprites: Vec::with_capacity(capacity),
        }
    }

    /// Add a sprite to the scene. Returns its id.
    pub fn spawn(&mut self, sprite: SpriteEntity) -> EntityId {
        let id = sprite.id;
        self.sprites.push(sprite);
        id
    }

    /// Remove a sprite by ID. Returns the removed sprite if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<SpriteEntity> {
        let idx = self.sprites.iter().position(|s| s.id == id)?;
        Some(self.sprites.swap_remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&SpriteEntity> {
        self.sprites.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SpriteEntity> {
        self.sprites.iter_mut().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpriteEntity> {
        self.sprites.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SpriteEntity> {
        self.sprites.iter_mut()
    }

    /// Find the first sprite with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&SpriteEntity> {
        self.sprites.iter().find(|s| s.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut SpriteEntity> {
        self.sprites.iter_mut().find(|s| s.tag == tag)
    }

    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&SpriteEntity> {
        self.sprites.iter().filter(|s| s.tag == tag).collect()
    }

    /// Active sprites that `id` collides with, using its configured method.
    pub fn collisions_with(&self, id: EntityId) -> Vec<EntityId> {
        let Some(sprite) = self.get(id) else {
            return Vec::new();
        };
        self.sprites
            .iter()
            .filter(|other| other.id != id && other.active && sprite.collides_with(other))
            .map(|other| other.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
