//! Math utilities and types
//!
//! Provides the vector and matrix helpers used by the collision, orientation
//! and camera code.
//!
//! # Conventions
//! Matrices follow the column-vector convention (`M * v`), so translation
//! lives in column 3 and object transforms compose as
//! `translate * rotate * scale`. View space is right-handed with the eye
//! looking down -Z and +Y up.

pub use nalgebra::{Matrix4, SVector, Vector2, Vector3, Vector4};

use crate::foundation::orientation::Orientation;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Magnitudes at or below this are treated as having no direction.
pub const NORMALIZE_EPSILON: f32 = 1.0e-6;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Convert degrees to radians
pub fn radians(degrees: f32) -> f32 {
    degrees * constants::DEG_TO_RAD
}

/// Euclidean length of a vector
pub fn magnitude<const D: usize>(vector: &SVector<f32, D>) -> f32 {
    vector.norm()
}

/// Squared length of a vector, avoiding the square root
pub fn sqr_magnitude<const D: usize>(vector: &SVector<f32, D>) -> f32 {
    vector.norm_squared()
}

/// Scale a vector to unit length.
///
/// The input must have non-zero magnitude: a zero vector divides by zero and
/// every component of the result is NaN. Use [`try_normalize`] when the input
/// can degenerate.
pub fn normalize<const D: usize>(vector: &SVector<f32, D>) -> SVector<f32, D> {
    vector / magnitude(vector)
}

/// Scale a vector to unit length, or `None` when it has no usable direction.
pub fn try_normalize<const D: usize>(vector: &SVector<f32, D>) -> Option<SVector<f32, D>> {
    vector.try_normalize(NORMALIZE_EPSILON)
}

/// Raw dot product `a.x*b.x + a.y*b.y + ...`.
///
/// This is not divided by the magnitudes; callers that want the cosine of the
/// angle must normalize the inputs themselves.
pub fn dot<const D: usize>(a: &SVector<f32, D>, b: &SVector<f32, D>) -> f32 {
    a.dot(b)
}

/// Right-handed cross product
pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

/// Whether `point` lies within `distance` of `centre` (inclusive)
pub fn in_range(centre: &Vec3, point: &Vec3, distance: f32) -> bool {
    sqr_magnitude(&(point - centre)) <= distance * distance
}

/// Project a world position onto the horizontal X/Z plane
pub fn ground_plane(vector: &Vec3) -> Vec2 {
    Vec2::new(vector.x, vector.z)
}

/// Transpose of a 4x4 matrix
pub fn transpose(matrix: &Mat4) -> Mat4 {
    matrix.transpose()
}

/// Translation matrix
pub fn translate(translation: &Vec3) -> Mat4 {
    Mat4::new_translation(translation)
}

/// Non-uniform scale matrix
pub fn scale(scale: &Vec3) -> Mat4 {
    Mat4::new_nonuniform_scaling(scale)
}

/// Rotation of `angle` radians about `axis`, built through [`Orientation`]
pub fn rotate(axis: &Vec3, angle: f32) -> Mat4 {
    Orientation::from_axis_angle(axis, angle).to_matrix()
}

/// Right-handed perspective projection
///
/// Maps view-space depth `-near` to clip depth -1 and `-far` to +1.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    debug_assert!(near > 0.0 && far > near, "invalid clip planes {near}..{far}");

    let top = near * (0.5 * fov_y).tan();
    let right = aspect * top;

    let mut result = Mat4::zeros();
    result[(0, 0)] = near / right;
    result[(1, 1)] = near / top;
    result[(2, 2)] = -(far + near) / (far - near);
    result[(2, 3)] = -(2.0 * far * near) / (far - near);
    result[(3, 2)] = -1.0;
    result
}

/// Orthographic projection mapping the given box onto the unit cube
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let mut result = Mat4::identity();
    result[(0, 0)] = 2.0 / (right - left);
    result[(1, 1)] = 2.0 / (top - bottom);
    result[(2, 2)] = -2.0 / (far - near);
    result[(0, 3)] = -(right + left) / (right - left);
    result[(1, 3)] = -(top + bottom) / (top - bottom);
    result[(2, 3)] = -(far + near) / (far - near);
    result
}

/// Right-handed look-at view matrix
///
/// `eye` must differ from `target` and the view direction must not be
/// parallel to `world_up`.
pub fn look_at(eye: &Vec3, target: &Vec3, world_up: &Vec3) -> Mat4 {
    let forward = normalize(&(target - eye));
    let right = normalize(&cross(&forward, world_up));
    let up = cross(&right, &forward);

    #[rustfmt::skip]
    let rotation = Mat4::new(
        right.x, right.y, right.z, 0.0,
        up.x, up.y, up.z, 0.0,
        -forward.x, -forward.y, -forward.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );

    rotation * translate(&-eye)
}
