use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::atlas::{FrameAtlas, GridSpec};
use super::error::AtlasError;
use crate::components::animation::PlayMode;
use crate::geometry::Rect;
use crate::renderer::traits::{TexturePageLoader, TextureSource};

/// Atlas manifest describing texture pages, frame groups and animations.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasManifest {
    /// Texture page paths, in texture-index order.
    pub textures: Vec<String>,
    /// Frame groups, in group-index order.
    #[serde(default)]
    pub groups: Vec<GroupDescriptor>,
    /// Named animation sequences.
    #[serde(default)]
    pub animations: HashMap<String, AnimationDescriptor>,
}

/// Describes one frame group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDescriptor {
    /// Optional lookup name.
    #[serde(default)]
    pub name: Option<String>,
    /// Index into the textures array.
    pub texture: usize,
    /// Grid blocks imported in order.
    #[serde(default)]
    pub grids: Vec<GridSpec>,
    /// Explicit rects appended after the grids.
    #[serde(default)]
    pub rects: Vec<Rect>,
}

/// Describes a named animation sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationDescriptor {
    pub start: usize,
    pub end: usize,
    /// Frames per second.
    pub fps: f32,
    #[serde(default)]
    pub mode: PlayMode,
}

impl AtlasManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load every page and build the atlas.
    ///
    /// On failure, pages already loaded are released before the error is returned.
    pub fn build(&self, loader: &mut dyn TexturePageLoader) -> Result<FrameAtlas, AtlasError> {
        let mut atlas = FrameAtlas::new();
        match self.populate(&mut atlas, loader) {
            Ok(()) => {
                log::info!(
                    "atlas built: {} textures, {} groups, {} animations",
                    atlas.texture_count(),
                    atlas.group_count(),
                    atlas.animation_count()
                );
                Ok(atlas)
            }
            Err(err) => {
                atlas.clear(loader);
                Err(err)
            }
        }
    }

    fn populate(&self, atlas: &mut FrameAtlas, loader: &mut dyn TexturePageLoader) -> Result<(), AtlasError> {
        for path in &self.textures {
            atlas.add_texture(loader, TextureSource::Path(Path::new(path)))?;
        }

        for desc in &self.groups {
            let group = atlas.add_group(desc.name.as_deref());
            for grid in &desc.grids {
                if !atlas.add_images_from_grid(desc.texture, group, *grid) {
                    return Err(atlas.take_error().unwrap_or(AtlasError::TextureOutOfRange {
                        index: desc.texture,
                        count: atlas.texture_count(),
                    }));
                }
            }
            for rect in &desc.rects {
                atlas.add_image_from_rect(desc.texture, group, *rect)?;
            }
        }

        for (name, anim) in &self.animations {
            atlas.define_animation(name, anim.start, anim.end, anim.fps, anim.mode)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLoader;

    const HERO: &str = r#"{
        "textures": ["hero.png"],
        "groups": [
            {
                "name": "hero",
                "texture": 0,
                "grids": [{ "columns": 4, "rows": 1, "cell_w": 32, "cell_h": 32 }]
            },
            {
                "texture": 0,
                "rects": [{ "x": 0, "y": 32, "w": 64, "h": 32 }]
            }
        ],
        "animations": {
            "idle": { "start": 0, "end": 3, "fps": 4.0, "mode": "loop" },
            "die": { "start": 0, "end": 3, "fps": 4.0, "mode": "once" },
            "wave": { "start": 1, "end": 2, "fps": 8.0 }
        }
    }"#;

    #[test]
    fn parse_minimal_manifest() {
        let manifest = AtlasManifest::from_json(r#"{ "textures": ["a.png"] }"#).unwrap();
        assert_eq!(manifest.textures.len(), 1);
        assert!(manifest.groups.is_empty());
        assert!(manifest.animations.is_empty());
    }

    #[test]
    fn builds_groups_and_animations() {
        let mut loader = MockLoader::new().with_size("hero.png", 128, 64);
        let manifest = AtlasManifest::from_json(HERO).unwrap();
        let mut atlas = manifest.build(&mut loader).unwrap();

        assert_eq!(atlas.texture_count(), 1);
        assert_eq!(atlas.group_len("hero"), 4);
        assert_eq!(atlas.group_len(1usize), 1);
        assert_eq!(atlas.image_region(0, 1usize).rect, Rect::new(0.0, 32.0, 64.0, 32.0));
        assert_eq!(atlas.animation("die").unwrap().mode, PlayMode::Once);
        assert_eq!(atlas.animation("wave").unwrap().mode, PlayMode::Loop);
        atlas.clear(&mut loader);
    }

    #[test]
    fn failed_build_releases_loaded_pages() {
        let mut loader = MockLoader::new().with_size("small.png", 32, 32);
        let manifest = AtlasManifest::from_json(
            r#"{
                "textures": ["small.png"],
                "groups": [
                    { "texture": 0, "grids": [{ "columns": 2, "rows": 1, "cell_w": 32, "cell_h": 32 }] }
                ]
            }"#,
        )
        .unwrap();

        let err = manifest.build(&mut loader).unwrap_err();
        assert!(matches!(err, AtlasError::CellOutOfBounds { col: 1, .. }));
        assert_eq!(loader.released.len(), 1);
    }

    #[test]
    fn grid_start_past_u32_range_fails_build() {
        let mut loader = MockLoader::new();
        let manifest = AtlasManifest::from_json(
            r#"{
                "textures": ["sheet.png"],
                "groups": [
                    { "texture": 0, "grids": [{ "columns": 1, "rows": 1, "cell_w": 8, "cell_h": 8, "start_row": 4294967295 }] }
                ]
            }"#,
        )
        .unwrap();

        let err = manifest.build(&mut loader).unwrap_err();
        assert!(matches!(err, AtlasError::CellOutOfBounds { row: u32::MAX, .. }));
        assert_eq!(loader.released.len(), 1);
    }

    #[test]
    fn missing_texture_fails_build() {
        let mut loader = MockLoader::new();
        let manifest =
            AtlasManifest::from_json(r#"{ "textures": ["ok.png", "missing.png"] }"#).unwrap();
        assert!(matches!(manifest.build(&mut loader), Err(AtlasError::Load(_))));
        assert_eq!(loader.released.len(), 1);
    }
}
