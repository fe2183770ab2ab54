//! Ground-plane collision and movement gating
//!
//! Colliders are boxes on the horizontal X/Z plane; the movement gate uses
//! them to veto motion toward touching obstacles.

pub mod box_collider;
pub mod movement_gate;

pub use box_collider::{BoxCollider, Extents};
pub use movement_gate::{GateDecision, MovementGate, MIN_DOT_PRODUCT};
