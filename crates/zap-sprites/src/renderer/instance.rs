use bytemuck::{Pod, Zeroable};

use super::traits::{QuadDraw, QuadRenderer};
use crate::components::sprite::BlendMode;

/// Per-quad data recorded for upload to a GPU backend.
/// 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct QuadInstance {
    /// Pivot X in world space.
    pub x: f32,
    /// Pivot Y in world space.
    pub y: f32,
    /// Source rect in texture pixels.
    pub src_x: f32,
    pub src_y: f32,
    pub src_w: f32,
    pub src_h: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Tint, rgb pre-multiplied by `a`.
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    /// Bits 0-15: texture handle. Bit 16: h-flip. Bit 17: v-flip.
    pub packed: f32,
}

impl QuadInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Largest texture handle that fits the packed field.
    pub const MAX_TEXTURE: u32 = 0xFFFF;

    const FLIP_H: u32 = 1 << 16;
    const FLIP_V: u32 = 1 << 17;

    /// `None` when the texture handle does not fit in 16 bits.
    pub fn from_draw(quad: &QuadDraw) -> Option<Self> {
        if quad.texture.0 > Self::MAX_TEXTURE {
            return None;
        }
        let mut packed = quad.texture.0;
        if quad.flip_h {
            packed |= Self::FLIP_H;
        }
        if quad.flip_v {
            packed |= Self::FLIP_V;
        }
        Some(Self {
            x: quad.position.x,
            y: quad.position.y,
            src_x: quad.source.x,
            src_y: quad.source.y,
            src_w: quad.source.w,
            src_h: quad.source.h,
            scale_x: quad.scale.x,
            scale_y: quad.scale.y,
            rotation: quad.angle_degrees,
            r: quad.tint[0],
            g: quad.tint[1],
            b: quad.tint[2],
            a: quad.tint[3],
            origin_x: quad.origin.x,
            origin_y: quad.origin.y,
            packed: packed as f32,
        })
    }

    pub fn texture(&self) -> u32 {
        self.packed as u32 & 0xFFFF
    }

    pub fn flip_h(&self) -> bool {
        self.packed as u32 & Self::FLIP_H != 0
    }

    pub fn flip_v(&self) -> bool {
        self.packed as u32 & Self::FLIP_V != 0
    }
}

/// A run of consecutive instances drawn with one blend mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendBatch {
    pub blend: BlendMode,
    /// Start index in the instance array.
    pub start: u32,
    /// End index (exclusive).
    pub end: u32,
}

/// Recording renderer: collects quads and blend-mode runs for a backend to
/// upload in one go.
pub struct QuadBuffer {
    pub instances: Vec<QuadInstance>,
    pub batches: Vec<BlendBatch>,
    blend: BlendMode,
}

impl QuadBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(512),
            batches: Vec::new(),
            blend: BlendMode::default(),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.batches.clear();
        self.blend = BlendMode::default();
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Blend mode that the next quad will be drawn with.
    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// Raw float view of the instance data.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for QuadBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadRenderer for QuadBuffer {
    fn draw_textured_quad(&mut self, quad: &QuadDraw) {
        let index = self.instances.len() as u32;
        let Some(instance) = QuadInstance::from_draw(quad) else {
            log::warn!("quad dropped: texture handle {} exceeds {}", quad.texture.0, QuadInstance::MAX_TEXTURE);
            return;
        };
        self.instances.push(instance);

        match self.batches.last_mut() {
            Some(batch) if batch.blend == self.blend && batch.end == index => batch.end += 1,
            _ => self.batches.push(BlendBatch {
                blend: self.blend,
                start: index,
                end: index + 1,
            }),
        }
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn restore_default_blend_mode(&mut self) {
        self.blend = BlendMode::default();
    }
}
