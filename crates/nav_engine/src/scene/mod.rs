//! Level content and the per-frame navigation update

pub mod entity;
pub mod level;
pub mod navigation;

pub use entity::{Entity, ModelId};
pub use level::{CameraPlacement, EntityDescription, LevelDescription};
pub use navigation::{DrawCall, FrameReport, Scene};

#[cfg(test)]
mod tests;
