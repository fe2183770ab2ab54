//! Camera rig with a switchable active camera
//!
//! One [`PoseController`] per [`CameraId`]. Switching cycles through the ids
//! with wraparound and is rate-limited by a cooldown so that a held key does
//! not spin through every camera in consecutive frames.

use serde::{Deserialize, Serialize};

use crate::camera::pose_controller::PoseController;

/// Identifies one camera of the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraId {
    /// The walking, mouse-driven camera
    FirstPerson,
    /// Fixed overview from the north-east corner
    NorthEast,
    /// Fixed overview from the south-east corner
    SouthEast,
    /// Fixed overview from the south-west corner
    SouthWest,
    /// Fixed overview from the north-west corner
    NorthWest,
}

/// Direction of a camera cycle request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleDirection {
    /// Advance to the following id
    Next,
    /// Step back to the preceding id
    Previous,
}

impl CameraId {
    /// Every id in cycle order
    pub const ALL: [Self; 5] = [
        Self::FirstPerson,
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
        Self::NorthWest,
    ];

    /// Number of cameras in a rig
    pub const COUNT: usize = Self::ALL.len();

    /// Position in [`CameraId::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Neighbouring id in `direction`, wrapping at either end
    pub fn cycle(self, direction: CycleDirection) -> Self {
        let index = match direction {
            CycleDirection::Next => (self.index() + 1) % Self::COUNT,
            CycleDirection::Previous => (self.index() + Self::COUNT - 1) % Self::COUNT,
        };
        Self::ALL[index]
    }
}

/// All cameras of a scene plus which one is active
#[derive(Debug, Clone)]
pub struct CameraRig {
    cameras: [PoseController; CameraId::COUNT],
    active: CameraId,
    switch_delay: f32,
    switch_cooldown: f32,
}

impl CameraRig {
    /// Create a rig with the first-person camera active
    pub fn new(cameras: [PoseController; CameraId::COUNT], switch_delay: f32) -> Self {
        Self {
            cameras,
            active: CameraId::FirstPerson,
            switch_delay,
            switch_cooldown: 0.0,
        }
    }

    /// Id of the active camera
    pub fn active_id(&self) -> CameraId {
        self.active
    }

    /// The active camera
    pub fn active(&self) -> &PoseController {
        self.camera(self.active)
    }

    /// The active camera, mutably
    pub fn active_mut(&mut self) -> &mut PoseController {
        self.camera_mut(self.active)
    }

    /// A specific camera
    pub fn camera(&self, id: CameraId) -> &PoseController {
        &self.cameras[id.index()]
    }

    /// A specific camera, mutably
    pub fn camera_mut(&mut self, id: CameraId) -> &mut PoseController {
        &mut self.cameras[id.index()]
    }

    /// Every camera with its id
    pub fn iter(&self) -> impl Iterator<Item = (CameraId, &PoseController)> {
        CameraId::ALL.into_iter().zip(self.cameras.iter())
    }

    /// Make `id` active immediately, bypassing the cooldown
    pub fn set_active(&mut self, id: CameraId) {
        if id != self.active {
            log::debug!("Active camera {:?} -> {:?}", self.active, id);
            self.active = id;
        }
    }

    /// Switch unconditionally and return the new active id
    pub fn cycle(&mut self, direction: CycleDirection) -> CameraId {
        self.set_active(self.active.cycle(direction));
        self.active
    }

    /// Seconds until the next switch request is honoured
    pub fn switch_cooldown(&self) -> f32 {
        self.switch_cooldown
    }

    /// Count the cooldown down by one frame
    pub fn tick_cooldown(&mut self, delta_time: f32) {
        if self.switch_cooldown > 0.0 && delta_time.is_finite() && delta_time > 0.0 {
            self.switch_cooldown -= delta_time;
        }
    }

    /// Honour a switch request if the cooldown has elapsed.
    ///
    /// Returns whether the active camera changed.
    pub fn request_cycle(&mut self, direction: CycleDirection) -> bool {
        if self.switch_cooldown > 0.0 {
            log::trace!("Camera switch ignored, {:.3}s cooldown left", self.switch_cooldown);
            return false;
        }
        self.switch_cooldown += self.switch_delay;
        self.cycle(direction);
        true
    }

    /// Apply a new viewport aspect ratio to every camera
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        for camera in &mut self.cameras {
            camera.set_aspect_ratio(aspect);
            camera.recompute();
        }
    }
}
