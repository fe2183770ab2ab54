//! Input adapters
//!
//! Turns raw key and cursor state from the window layer into the per-frame
//! [`FrameInput`] consumed by the scene. Nothing here talks to a window
//! directly.

use serde::{Deserialize, Serialize};

use crate::camera::CycleDirection;
use crate::foundation::math::Vec2;

bitflags::bitflags! {
    /// Held movement keys
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MovementKeys: u8 {
        /// Walk along the view direction
        const FORWARD = 0b0001;
        /// Walk against the view direction
        const BACK    = 0b0010;
        /// Strafe left
        const LEFT    = 0b0100;
        /// Strafe right
        const RIGHT   = 0b1000;
    }
}

impl MovementKeys {
    /// Combine held keys into a movement intent.
    ///
    /// `y` is forward/back and `x` is right/left, each in `{-1, 0, 1}`.
    /// Opposing keys cancel.
    pub fn to_intent(self) -> Vec2 {
        let mut intent = Vec2::zeros();
        if self.contains(Self::FORWARD) {
            intent.y += 1.0;
        }
        if self.contains(Self::BACK) {
            intent.y -= 1.0;
        }
        if self.contains(Self::LEFT) {
            intent.x -= 1.0;
        }
        if self.contains(Self::RIGHT) {
            intent.x += 1.0;
        }
        intent
    }
}

/// Keys the navigation controller listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// Forward
    W,
    /// Strafe left
    A,
    /// Back
    S,
    /// Strafe right
    D,
    /// Next camera
    Q,
    /// Previous camera
    E,
}

impl KeyCode {
    /// Movement flag bound to this key, empty for camera keys
    pub fn movement(self) -> MovementKeys {
        match self {
            Self::W => MovementKeys::FORWARD,
            Self::S => MovementKeys::BACK,
            Self::A => MovementKeys::LEFT,
            Self::D => MovementKeys::RIGHT,
            Self::Q | Self::E => MovementKeys::empty(),
        }
    }
}

/// Mouse travel since the cursor was last recentred.
///
/// The window layer warps the cursor back to the centre every frame, so the
/// offset from the centre is the frame's delta. Screen Y grows downward; the
/// returned `y` is positive when the cursor moved up.
pub fn mouse_delta_from_cursor(cursor: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(cursor.x - window_size.x * 0.5, window_size.y * 0.5 - cursor.y)
}

/// Everything the scene needs from input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Held movement keys
    pub movement: MovementKeys,
    /// Mouse delta in pixels, positive `y` up
    pub mouse_delta: Vec2,
    /// Camera switch request, if a switch key is held
    pub camera_cycle: Option<CycleDirection>,
}

impl FrameInput {
    /// Movement intent for this frame
    pub fn intent(&self) -> Vec2 {
        self.movement.to_intent()
    }
}

/// Tracks held keys and the cursor between window events
#[derive(Debug, Clone)]
pub struct InputState {
    movement: MovementKeys,
    next_camera_held: bool,
    previous_camera_held: bool,
    cursor: Vec2,
    window_size: Vec2,
}

impl InputState {
    /// Start with nothing held and the cursor centred in `window_size`
    pub fn new(window_size: Vec2) -> Self {
        Self {
            movement: MovementKeys::empty(),
            next_camera_held: false,
            previous_camera_held: false,
            cursor: window_size * 0.5,
            window_size,
        }
    }

    /// Record a key press or release
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::Q => self.next_camera_held = pressed,
            KeyCode::E => self.previous_camera_held = pressed,
            movement_key => self.movement.set(movement_key.movement(), pressed),
        }
    }

    /// Record the cursor position in window pixels
    // Window coordinates are small enough to survive the narrowing to f32
    #[allow(clippy::cast_possible_truncation)]
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        self.cursor = Vec2::new(x as f32, y as f32);
    }

    /// Track a window resize; the cursor is recentred
    pub fn set_window_size(&mut self, window_size: Vec2) {
        self.window_size = window_size;
        self.cursor = window_size * 0.5;
    }

    /// Snapshot this frame's input and recentre the cursor.
    ///
    /// A held next-camera key wins over a held previous-camera key.
    pub fn take_frame(&mut self) -> FrameInput {
        let camera_cycle = if self.next_camera_held {
            Some(CycleDirection::Next)
        } else if self.previous_camera_held {
            Some(CycleDirection::Previous)
        } else {
            None
        };

        let frame = FrameInput {
            movement: self.movement,
            mouse_delta: mouse_delta_from_cursor(self.cursor, self.window_size),
            camera_cycle,
        };
        self.cursor = self.window_size * 0.5;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_combines_keys() {
        assert_eq!(MovementKeys::empty().to_intent(), Vec2::zeros());
        assert_eq!(MovementKeys::FORWARD.to_intent(), Vec2::new(0.0, 1.0));
        assert_eq!((MovementKeys::BACK | MovementKeys::LEFT).to_intent(), Vec2::new(-1.0, -1.0));
        assert_eq!((MovementKeys::FORWARD | MovementKeys::BACK).to_intent(), Vec2::zeros());
        assert_eq!(MovementKeys::all().to_intent(), Vec2::zeros());
    }

    #[test]
    fn test_mouse_delta_is_offset_from_centre() {
        let window = Vec2::new(1260.0, 720.0);

        assert_eq!(mouse_delta_from_cursor(Vec2::new(630.0, 360.0), window), Vec2::zeros());
        // Right and up on screen
        assert_eq!(mouse_delta_from_cursor(Vec2::new(640.0, 350.0), window), Vec2::new(10.0, 10.0));
        assert_eq!(
            mouse_delta_from_cursor(Vec2::new(600.0, 400.0), window),
            Vec2::new(-30.0, -40.0)
        );
    }

    #[test]
    fn test_input_state_tracks_held_keys() {
        let mut input = InputState::new(Vec2::new(100.0, 100.0));
        input.handle_key_input(KeyCode::W, true);
        input.handle_key_input(KeyCode::D, true);
        assert_eq!(input.take_frame().intent(), Vec2::new(1.0, 1.0));

        input.handle_key_input(KeyCode::W, false);
        assert_eq!(input.take_frame().intent(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_take_frame_recentres_cursor() {
        let mut input = InputState::new(Vec2::new(100.0, 100.0));
        input.handle_mouse_move(60.0, 45.0);

        assert_eq!(input.take_frame().mouse_delta, Vec2::new(10.0, 5.0));
        assert_eq!(input.take_frame().mouse_delta, Vec2::zeros());
    }

    #[test]
    fn test_next_camera_key_takes_priority() {
        let mut input = InputState::new(Vec2::new(100.0, 100.0));
        assert_eq!(input.take_frame().camera_cycle, None);

        input.handle_key_input(KeyCode::E, true);
        assert_eq!(input.take_frame().camera_cycle, Some(CycleDirection::Previous));

        input.handle_key_input(KeyCode::Q, true);
        assert_eq!(input.take_frame().camera_cycle, Some(CycleDirection::Next));
        assert!(input.take_frame().movement.is_empty());
    }
}
