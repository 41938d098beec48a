pub mod animation;
pub mod collider;
pub mod sprite;
