pub mod animation;
pub mod collision;
pub mod render;
