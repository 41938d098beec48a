//! Collaborator traits for texture loading and quad drawing.
//!
//! The sprite core never talks to a GPU directly. Backends (WebGPU, Canvas2D,
//! a native renderer) implement these two traits; the core hands them opaque
//! texture handles and one fully described quad per sprite.

use std::path::Path;

use glam::Vec2;

use crate::components::sprite::BlendMode;
use crate::geometry::Rect;

/// Opaque handle to a texture page owned by the backend.
///
/// [`QuadBuffer`](super::instance::QuadBuffer) packs handles into 16 bits and
/// drops quads whose handle is above [`QuadInstance::MAX_TEXTURE`](super::instance::QuadInstance::MAX_TEXTURE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Where a texture page comes from.
#[derive(Debug, Clone, Copy)]
pub enum TextureSource<'a> {
    /// Encoded image bytes (PNG, etc.).
    Bytes(&'a [u8]),
    /// A path the backend resolves itself.
    Path(&'a Path),
}

/// Error reported by a [`TexturePageLoader`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("texture not found: {0}")]
    NotFound(String),

    #[error("could not decode texture: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads texture pages and reports their pixel size.
pub trait TexturePageLoader {
    fn load(&mut self, source: TextureSource<'_>) -> Result<TextureHandle, LoadError>;

    /// Pixel size of a loaded page.
    fn size(&self, handle: TextureHandle) -> (u32, u32);

    /// Free a page. Called once per handle when its atlas is cleared.
    fn release(&mut self, handle: TextureHandle);
}

/// One textured quad, fully resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadDraw {
    pub texture: TextureHandle,
    /// Source rectangle in texture pixels.
    pub source: Rect,
    /// World position of the pivot.
    pub position: Vec2,
    /// RGBA tint, rgb pre-multiplied by alpha.
    pub tint: [f32; 4],
    /// Pivot as a fraction of the quad size ((0.5, 0.5) = center).
    pub origin: Vec2,
    pub scale: Vec2,
    pub angle_degrees: f32,
    pub flip_h: bool,
    pub flip_v: bool,
}

/// Draws textured quads and manages blend state.
pub trait QuadRenderer {
    fn draw_textured_quad(&mut self, quad: &QuadDraw);

    fn set_blend_mode(&mut self, mode: BlendMode);

    fn restore_default_blend_mode(&mut self);
}
