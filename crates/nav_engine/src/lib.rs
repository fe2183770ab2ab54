//! # Nav Engine
//!
//! Spatial collision and orientation math for a first-person walkthrough
//! controller.
//!
//! ## Features
//!
//! - **Vector Math**: nalgebra-backed vectors and column-major matrices with
//!   OpenGL-style projection helpers
//! - **Orientation**: pitch/yaw quaternions with short-path slerp
//! - **Ground Collision**: axis-aligned boxes on the X/Z plane
//! - **Movement Gate**: vetoes walking toward touching obstacles
//! - **Camera Rig**: first-person pose controller plus fixed overview cameras
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nav_engine::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let mut scene = Scene::new(NavigationConfig::default(), &LevelDescription::default())?;
//!
//!     let input = FrameInput {
//!         movement: MovementKeys::FORWARD,
//!         ..FrameInput::default()
//!     };
//!     let report = scene.update(&input, 1.0 / 60.0);
//!     println!("moved: {}, view: {}", report.moved, scene.active_camera().view());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod camera;
pub mod config;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        camera::{CameraId, CameraRig, CameraUniform, CycleDirection, PoseController},
        config::{Config, ConfigError, NavigationConfig},
        foundation::{
            math::{Mat4, Vec2, Vec3, Vec4},
            orientation::Orientation,
            time::{FpsCounter, FrameTimer},
        },
        input::{FrameInput, InputState, KeyCode, MovementKeys},
        physics::{BoxCollider, GateDecision, MovementGate},
        scene::{Entity, FrameReport, LevelDescription, ModelId, Scene},
    };
}
