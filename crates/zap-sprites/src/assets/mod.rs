pub mod atlas;
pub mod error;
pub mod manifest;
