//! Axis-aligned box collider in the horizontal plane
//!
//! A [`BoxCollider`] is a rectangle on the X/Z ground plane anchored at a 3D
//! position. The Y component of the position is carried along for drawing but
//! ignored by every geometric query. `size.x` spans world X and `size.y`
//! spans world Z.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{ground_plane, scale, translate, Mat4, Vec2, Vec3};

/// Edges of a collider on the ground plane
///
/// `left < right` along X and `back < front` along Z for any positive size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    /// Minimum X
    pub left: f32,
    /// Maximum X
    pub right: f32,
    /// Minimum Z
    pub back: f32,
    /// Maximum Z
    pub front: f32,
}

impl Extents {
    /// Closed-interval overlap on both axes. Shared edges count as overlapping.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.front >= other.back
            && self.back <= other.front
            && self.right >= other.left
            && self.left <= other.right
    }

    /// Whether a ground-plane point lies inside or on the boundary
    pub fn contains(&self, point: &Vec2) -> bool {
        (self.left..=self.right).contains(&point.x) && (self.back..=self.front).contains(&point.y)
    }
}

/// A box on the ground plane used for movement blocking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    position: Vec3,
    size: Vec2,
}

impl BoxCollider {
    /// Create a collider centred at `position` with full width/depth `size`.
    ///
    /// Both size components must be positive.
    pub fn new(position: Vec3, size: Vec2) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0, "collider size must be positive, got {size:?}");
        Self { position, size }
    }

    /// Centre of the box. Y is not used by collision queries.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Centre of the box on the ground plane
    pub fn ground_position(&self) -> Vec2 {
        ground_plane(&self.position)
    }

    /// Full width (X) and depth (Z)
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Move the box. The size never changes after construction.
    pub fn update_position(&mut self, new_position: Vec3) {
        self.position = new_position;
    }

    /// All four edges at once
    pub fn extents(&self) -> Extents {
        let half = self.size * 0.5;
        Extents {
            left: self.position.x - half.x,
            right: self.position.x + half.x,
            back: self.position.z - half.y,
            front: self.position.z + half.y,
        }
    }

    /// Minimum X edge
    pub fn left(&self) -> f32 {
        self.extents().left
    }

    /// Maximum X edge
    pub fn right(&self) -> f32 {
        self.extents().right
    }

    /// Minimum Z edge
    pub fn back(&self) -> f32 {
        self.extents().back
    }

    /// Maximum Z edge
    pub fn front(&self) -> f32 {
        self.extents().front
    }

    /// Whether two boxes overlap or share an edge
    pub fn is_touching(a: &Self, b: &Self) -> bool {
        a.extents().overlaps(&b.extents())
    }

    /// Whether a ground-plane point `(x, z)` is inside or on the box
    pub fn contains_point(&self, point: &Vec2) -> bool {
        self.extents().contains(point)
    }

    /// Nearest point of the box to a ground-plane point `(x, z)`.
    ///
    /// A point already inside the box is returned unchanged, so the vector
    /// from `point` to the result can be zero.
    pub fn closest_point(&self, point: &Vec2) -> Vec2 {
        let extents = self.extents();
        Vec2::new(
            point.x.max(extents.left).min(extents.right),
            point.y.max(extents.back).min(extents.front),
        )
    }

    /// Model matrix that stretches a unit cube over this box, `height` tall
    pub fn debug_transform(&self, height: f32) -> Mat4 {
        translate(&self.position) * scale(&Vec3::new(self.size.x, height, self.size.y))
    }
}
