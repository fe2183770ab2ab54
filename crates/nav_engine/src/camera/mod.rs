//! Camera system: first-person pose controller, camera rig and GPU block

pub mod pose_controller;
pub mod rig;
pub mod uniform;

pub use pose_controller::PoseController;
pub use rig::{CameraId, CameraRig, CycleDirection};
pub use uniform::CameraUniform;
