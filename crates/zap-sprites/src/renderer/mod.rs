pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use instance::{BlendBatch, QuadBuffer, QuadInstance};
pub use traits::{
    LoadError, QuadDraw, QuadRenderer, TextureHandle, TexturePageLoader, TextureSource,
};
