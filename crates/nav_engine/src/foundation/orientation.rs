//! Quaternion orientation
//!
//! [`Orientation`] stores a rotation as four raw components `(w, x, y, z)`.
//! It is a unit quaternion by convention only: nothing here renormalizes, so
//! callers building one by hand must supply unit length.

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::foundation::math::{try_normalize, Mat4, Vec3};

/// Cosine above which two orientations are treated as parallel by [`Orientation::slerp`]
pub const SLERP_PARALLEL_THRESHOLD: f32 = 0.9999;

/// A rotation stored as a quaternion `w + xi + yj + zk`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Scalar part
    pub w: f32,
    /// X component of the vector part
    pub x: f32,
    /// Y component of the vector part
    pub y: f32,
    /// Z component of the vector part
    pub z: f32,
}

impl Orientation {
    /// The identity rotation `(1, 0, 0, 0)`
    pub const IDENTITY: Self = Self::from_components(1.0, 0.0, 0.0, 0.0);

    /// The identity rotation
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build directly from raw components. The caller supplies a unit quaternion.
    pub const fn from_components(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// A zero-length axis has no direction and yields the identity.
    pub fn from_axis_angle(axis: &Vec3, angle: f32) -> Self {
        let Some(axis) = try_normalize(axis) else {
            return Self::IDENTITY;
        };
        let (s, c) = (0.5 * angle).sin_cos();
        Self::from_components(c, s * axis.x, s * axis.y, s * axis.z)
    }

    /// Compose a pitch rotation (about +X) and a yaw rotation (about +Y).
    ///
    /// The result is `q_yaw * q_pitch`: pitch is applied in the local frame and
    /// yaw in the world frame. Swapping the order tilts the horizon once the
    /// view is yawed.
    pub fn from_pitch_yaw(pitch: f32, yaw: f32) -> Self {
        let (sin_pitch, cos_pitch) = (0.5 * pitch).sin_cos();
        let (sin_yaw, cos_yaw) = (0.5 * yaw).sin_cos();

        let yaw_rotation = Self::from_components(cos_yaw, 0.0, sin_yaw, 0.0);
        let pitch_rotation = Self::from_components(cos_pitch, sin_pitch, 0.0, 0.0);

        yaw_rotation * pitch_rotation
    }

    /// Orientation of a viewer with the given view angles.
    ///
    /// Positive `pitch` looks down and positive `yaw` turns right. The viewer
    /// looks down its local -Z axis, so the angles are negated before being
    /// handed to [`Orientation::from_pitch_yaw`].
    pub fn from_view_angles(pitch: f32, yaw: f32) -> Self {
        Self::from_pitch_yaw(-pitch, -yaw)
    }

    /// Orientation whose -Z axis points along `forward`.
    ///
    /// A zero `forward` has no direction and yields the identity.
    pub fn look_direction(forward: &Vec3) -> Self {
        view_angles(forward).map_or(Self::IDENTITY, |(pitch, yaw)| {
            Self::from_view_angles(pitch, yaw)
        })
    }

    /// Four-component dot product
    pub fn dot(&self, other: &Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Quaternion norm
    pub fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// All four components negated. Represents the same rotation.
    pub fn negated(&self) -> Self {
        Self::from_components(-self.w, -self.x, -self.y, -self.z)
    }

    /// Homogeneous rotation matrix for this orientation
    #[rustfmt::skip]
    pub fn to_matrix(&self) -> Mat4 {
        let Self { w, x, y, z } = *self;

        let m00 = w * w + x * x - y * y - z * z;
        let m10 = 2.0 * x * y + 2.0 * w * z;
        let m20 = 2.0 * x * z - 2.0 * w * y;

        let m01 = 2.0 * x * y - 2.0 * w * z;
        let m11 = w * w - x * x + y * y - z * z;
        let m21 = 2.0 * y * z + 2.0 * w * x;

        let m02 = 2.0 * x * z + 2.0 * w * y;
        let m12 = 2.0 * y * z - 2.0 * w * x;
        let m22 = w * w - x * x - y * y + z * z;

        Mat4::new(
            m00, m01, m02, 0.0,
            m10, m11, m12, 0.0,
            m20, m21, m22, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Spherical interpolation from `from` to `to`.
    ///
    /// Takes the short path around the hypersphere. `t` outside `[0, 1]`
    /// extrapolates.
    pub fn slerp(from: Self, to: Self, t: f32) -> Self {
        let mut to = to;
        let mut cos_theta = from.dot(&to);

        if cos_theta > SLERP_PARALLEL_THRESHOLD {
            return to;
        }

        if cos_theta < 0.0 {
            to = to.negated();
            cos_theta = -cos_theta;

            // Antipodal inputs describe the same rotation
            if cos_theta > SLERP_PARALLEL_THRESHOLD {
                return to;
            }
        }

        let theta = cos_theta.acos();
        let sin_theta = theta.sin();
        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;

        Self::from_components(
            a * from.w + b * to.w,
            a * from.x + b * to.x,
            a * from.y + b * to.y,
            a * from.z + b * to.z,
        )
    }
}

/// Pitch and yaw (radians) that aim a viewer's -Z axis along `direction`.
///
/// Returns `None` for a zero-length direction.
pub fn view_angles(direction: &Vec3) -> Option<(f32, f32)> {
    let dir = try_normalize(direction)?;
    let pitch = (-dir.y).clamp(-1.0, 1.0).asin();
    let yaw = dir.x.atan2(-dir.z);
    Some((pitch, yaw))
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Orientation {
    type Output = Self;

    /// Hamilton product: `self * rhs` applies `rhs` first
    fn mul(self, rhs: Self) -> Self {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

impl From<Orientation> for nalgebra::Quaternion<f32> {
    fn from(orientation: Orientation) -> Self {
        Self::new(orientation.w, orientation.x, orientation.y, orientation.z)
    }
}

impl AbsDiffEq for Orientation {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Orientation {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.w.relative_eq(&other.w, epsilon, max_relative)
            && self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
