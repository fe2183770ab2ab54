//! Direction-gated movement filter
//!
//! Each frame the gate decides whether the mover may advance at all. It scans
//! every collider linearly: a collider vetoes the move when it touches the
//! mover and lies within the heading cone set by the minimum dot product.
//! This is a go/no-go filter, not a collision response. A denied frame keeps
//! the mover exactly where it was, even if only one axis was blocked.

use crate::foundation::math::{dot, try_normalize, Vec2};
use crate::physics::box_collider::BoxCollider;

/// Default alignment threshold: obstacles within 60 degrees of the heading block
pub const MIN_DOT_PRODUCT: f32 = 0.5;

/// Outcome of one gate evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    /// No touching collider lies ahead
    Permitted,
    /// The first collider found blocking the heading
    Denied {
        /// Index of the blocking collider in the scanned slice
        collider: usize,
        /// Unit direction from the mover to the collider's closest point
        obstacle_dir: Vec2,
        /// Dot product between `obstacle_dir` and the move direction
        alignment: f32,
    },
}

impl GateDecision {
    /// Whether the mover may commit its displacement this frame
    pub fn is_permitted(&self) -> bool {
        matches!(self, Self::Permitted)
    }
}

/// Vetoes movement toward touching obstacles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementGate {
    min_dot_product: f32,
}

impl Default for MovementGate {
    fn default() -> Self {
        Self::new(MIN_DOT_PRODUCT)
    }
}

impl MovementGate {
    /// Create a gate that blocks when alignment exceeds `min_dot_product`
    pub fn new(min_dot_product: f32) -> Self {
        Self { min_dot_product }
    }

    /// Alignment threshold in use
    pub fn min_dot_product(&self) -> f32 {
        self.min_dot_product
    }

    /// Decide whether `player` may move along `move_dir`.
    ///
    /// `move_dir` is a unit ground-plane direction `(x, z)`. A collider whose
    /// closest point coincides with the player's centre gives no direction to
    /// compare against and is skipped. The first denying collider ends the scan.
    pub fn evaluate(
        &self,
        move_dir: &Vec2,
        player: &BoxCollider,
        colliders: &[BoxCollider],
    ) -> GateDecision {
        let player_pos = player.ground_position();

        for (index, collider) in colliders.iter().enumerate() {
            if !BoxCollider::is_touching(player, collider) {
                continue;
            }

            let offset = collider.closest_point(&player_pos) - player_pos;
            let Some(obstacle_dir) = try_normalize(&offset) else {
                log::trace!("Collider {} contains the player centre; no obstacle direction", index);
                continue;
            };

            let alignment = dot(&obstacle_dir, move_dir);
            if alignment > self.min_dot_product {
                log::debug!(
                    "Movement denied by collider {} at {:?} (alignment {:.3})",
                    index,
                    collider.ground_position(),
                    alignment
                );
                return GateDecision::Denied {
                    collider: index,
                    obstacle_dir,
                    alignment,
                };
            }
        }

        GateDecision::Permitted
    }
}
