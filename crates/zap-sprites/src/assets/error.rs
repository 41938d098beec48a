/// Non-fatal error recorded by a [`FrameAtlas`](super::atlas::FrameAtlas).
///
/// Lookups that fail return a sentinel and leave one of these behind in
/// the atlas; mutating calls also hand it back directly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AtlasError {
    #[error("unknown atlas id {0}")]
    UnknownAtlas(u32),

    #[error("texture index {index} out of range ({count} loaded)")]
    TextureOutOfRange { index: usize, count: usize },

    #[error("group index {index} out of range ({count} groups)")]
    GroupOutOfRange { index: usize, count: usize },

    #[error("image index {index} out of range in group {group} ({count} images)")]
    ImageOutOfRange { index: usize, group: usize, count: usize },

    #[error("no group named '{0}'")]
    UnknownGroup(String),

    #[error("no animation named '{0}'")]
    UnknownAnimation(String),

    #[error("grid cell ({col}, {row}) of {cell_w}x{cell_h} lies outside texture {texture}")]
    CellOutOfBounds { texture: usize, col: u32, row: u32, cell_w: u32, cell_h: u32 },

    #[error("animation '{name}' has invalid frame speed {speed}")]
    InvalidFrameSpeed { name: String, speed: f32 },

    #[error("texture load failed: {0}")]
    Load(String),
}
