//! # First-Person Pose Controller
//!
//! Owns a viewer's position and view angles and derives, once per frame, the
//! orientation, basis vectors and view/projection matrices that the renderer
//! reads.
//!
//! ## Frame order
//! 1. Mutate `pitch`/`yaw` (mouse look) and optionally `position`
//! 2. [`PoseController::recompute`]
//! 3. Read `view`, `projection` and the basis vectors
//!
//! Anything derived is stale between a direct mutation and the next recompute.
//!
//! ## Coordinate System
//! Right-handed, Y-up. The viewer looks down its local -Z axis. Positive
//! pitch looks down, positive yaw turns right.

use crate::camera::uniform::CameraUniform;
use crate::config::ProjectionSettings;
use crate::foundation::math::{perspective, transpose, translate, try_normalize, Mat4, Vec2, Vec3};
use crate::foundation::orientation::{view_angles, Orientation};
use crate::foundation::time::is_usable_delta;

/// Camera-like entity with position, view angles and derived matrices
#[derive(Debug, Clone)]
pub struct PoseController {
    /// Eye position in world space
    pub position: Vec3,

    /// Rotation about the horizontal axis in radians; positive looks down
    pub pitch: f32,

    /// Rotation about world up in radians; positive turns right
    pub yaw: f32,

    /// Stored for completeness; the view ignores it
    pub roll: f32,

    /// Colour multiplier the renderer applies while this camera is active
    pub tint: Vec3,

    /// Projection parameters used on every recompute
    pub projection_settings: ProjectionSettings,

    orientation: Orientation,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    view: Mat4,
    projection: Mat4,
}

impl PoseController {
    /// Place a controller at `eye` looking toward `target`.
    ///
    /// When `eye == target` there is no view direction and the controller
    /// keeps level angles.
    pub fn looking_at(eye: Vec3, target: Vec3, projection_settings: ProjectionSettings) -> Self {
        let (pitch, yaw) = view_angles(&(target - eye)).unwrap_or_else(|| {
            log::warn!("Camera at {:?} cannot look at its own position", eye);
            (0.0, 0.0)
        });
        Self::with_pitch_yaw(eye, pitch, yaw, projection_settings)
    }

    /// Place a controller at `eye` with explicit view angles
    pub fn with_pitch_yaw(
        eye: Vec3,
        pitch: f32,
        yaw: f32,
        projection_settings: ProjectionSettings,
    ) -> Self {
        let mut controller = Self {
            position: eye,
            pitch,
            yaw,
            roll: 0.0,
            tint: Vec3::new(1.0, 1.0, 1.0),
            projection_settings,
            orientation: Orientation::IDENTITY,
            forward: -Vec3::z(),
            right: Vec3::x(),
            up: Vec3::y(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
        };
        controller.recompute();
        controller
    }

    /// Builder-style tint
    pub fn with_tint(mut self, tint: Vec3) -> Self {
        self.tint = tint;
        self
    }

    /// Re-aim at `point` and recompute immediately.
    ///
    /// Looking at the current position is ignored.
    pub fn look_at(&mut self, point: Vec3) {
        match view_angles(&(point - self.position)) {
            Some((pitch, yaw)) => {
                self.pitch = pitch;
                self.yaw = yaw;
                self.recompute();
                log::trace!("Camera look_at {:?} -> pitch {:.3}, yaw {:.3}", point, pitch, yaw);
            }
            None => log::warn!("Ignoring look_at of the camera's own position {:?}", point),
        }
    }

    /// Derive orientation, basis vectors and matrices from the current state
    pub fn recompute(&mut self) {
        self.orientation = Orientation::from_view_angles(self.pitch, self.yaw);
        self.view = transpose(&self.orientation.to_matrix()) * translate(&-self.position);

        let view = &self.view;
        self.right = Vec3::new(view[(0, 0)], view[(0, 1)], view[(0, 2)]);
        self.up = Vec3::new(view[(1, 0)], view[(1, 1)], view[(1, 2)]);
        self.forward = -Vec3::new(view[(2, 0)], view[(2, 1)], view[(2, 2)]);

        let settings = &self.projection_settings;
        self.projection =
            perspective(settings.fov_radians(), settings.aspect, settings.near, settings.far);
    }

    /// Turn by a mouse delta in pixels.
    ///
    /// Positive `delta.y` (cursor moved up) increases pitch, which looks down.
    /// Positive `delta.x` turns right. Unusable frame deltas leave the angles
    /// untouched.
    pub fn apply_mouse_look(&mut self, delta: &Vec2, sensitivity: f32, delta_time: f32) {
        if !is_usable_delta(delta_time) {
            return;
        }
        self.pitch += delta.y * sensitivity * delta_time;
        self.yaw += delta.x * sensitivity * delta_time;
    }

    /// Unit ground-plane heading `(x, z)` for a movement intent.
    ///
    /// `intent.y` walks along `forward` and `intent.x` strafes along `right`.
    /// Returns `None` when the flattened heading has no length, for example
    /// when looking straight down with only forward intent.
    pub fn move_direction(&self, intent: &Vec2) -> Option<Vec2> {
        let heading = self.forward * intent.y + self.right * intent.x;
        try_normalize(&Vec2::new(heading.x, heading.z))
    }

    /// Height-flattened displacement for one frame of walking.
    ///
    /// `None` when there is no heading or the frame delta is unusable.
    pub fn propose_displacement(&self, intent: &Vec2, speed: f32, delta_time: f32) -> Option<Vec3> {
        if !is_usable_delta(delta_time) {
            return None;
        }
        let direction = self.move_direction(intent)?;
        Some(Vec3::new(direction.x, 0.0, direction.y) * (speed * delta_time))
    }

    /// Move by `displacement`. Call [`PoseController::recompute`] before the
    /// view is read again.
    pub fn translate_by(&mut self, displacement: &Vec3) {
        self.position += displacement;
    }

    /// Update the viewport aspect ratio used by the next recompute
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.projection_settings.aspect - aspect).abs() > 0.01 {
            log::info!(
                "Camera aspect ratio changed: {:.3} -> {:.3}",
                self.projection_settings.aspect,
                aspect
            );
        }
        self.projection_settings.aspect = aspect;
    }

    /// Orientation from the last recompute
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit vector to the viewer's right
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit vector out of the top of the view
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// World-to-view matrix
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// View-to-clip matrix
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Combined `projection * view`
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Matrices packed for upload
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::new(&self.view, &self.projection, &self.position)
    }
}
