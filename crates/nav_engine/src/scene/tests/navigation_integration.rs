//! Integration tests for whole-frame navigation
//!
//! Drives the bundled room through `Scene::update` the way the window loop does.

use crate::camera::{CameraId, CycleDirection};
use crate::config::NavigationConfig;
use crate::foundation::math::{Vec2, Vec3};
use crate::input::{FrameInput, MovementKeys};
use crate::scene::{LevelDescription, Scene};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 0.1;

    fn room() -> Scene {
        Scene::new(NavigationConfig::default(), &LevelDescription::default()).unwrap()
    }

    fn walk(keys: MovementKeys) -> FrameInput {
        FrameInput {
            movement: keys,
            ..FrameInput::default()
        }
    }

    fn player_z(scene: &Scene) -> f32 {
        scene.rig().camera(CameraId::FirstPerson).position.z
    }

    #[test]
    fn test_first_person_camera_faces_the_crate() {
        let scene = room();
        let camera = scene.active_camera();

        let toward_crate = Vec3::new(0.0, -1.0, -3.0).normalize();
        assert_relative_eq!(camera.forward(), toward_crate, epsilon = 1e-5);
        assert_relative_eq!(camera.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(camera.tint, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_walking_into_crate_stops_at_contact() {
        let mut scene = room();
        let mut blocked_frames = 0;

        for _ in 0..60 {
            let report = scene.update(&walk(MovementKeys::FORWARD), DT);
            assert!(report.movement_attempted());
            if report.was_blocked() {
                blocked_frames += 1;
                assert!(!report.moved);
            }
        }

        // Crate front edge is z = 0.5 and the player is 0.25 wide
        let z = player_z(&scene);
        assert!(z <= 0.625 + 1e-4, "player stopped at z = {z}");
        assert!(z > 0.5, "player entered the crate at z = {z}");
        assert!(blocked_frames > 30);
        assert_eq!(
            scene.player_collider().position(),
            scene.rig().camera(CameraId::FirstPerson).position
        );
    }

    #[test]
    fn test_strafing_along_blocking_face_is_permitted() {
        let mut scene = room();
        for _ in 0..60 {
            scene.update(&walk(MovementKeys::FORWARD), DT);
        }
        let blocked_at = scene.rig().camera(CameraId::FirstPerson).position;

        let report = scene.update(&walk(MovementKeys::RIGHT), DT);
        assert!(report.moved);
        let position = scene.rig().camera(CameraId::FirstPerson).position;
        assert_relative_eq!(position.x, blocked_at.x + DT, epsilon = 1e-5);
        assert_relative_eq!(position.z, blocked_at.z, epsilon = 1e-5);
        assert_eq!(position.y, blocked_at.y);

        let report = scene.update(&walk(MovementKeys::BACK), DT);
        assert!(report.moved);
        assert!(player_z(&scene) > blocked_at.z);
    }

    #[test]
    fn test_backing_into_south_wall_stops() {
        let mut scene = room();
        for _ in 0..40 {
            scene.update(&walk(MovementKeys::BACK), DT);
        }

        // South wall inner edge is z = 5.0
        let z = player_z(&scene);
        assert!(z >= 4.875 - 1e-4, "player stopped early at z = {z}");
        assert!(z < 5.0, "player crossed the wall at z = {z}");
        assert!(scene.update(&walk(MovementKeys::BACK), DT).was_blocked());
    }

    #[test]
    fn test_camera_cycle_wraps_and_respects_cooldown() {
        let mut scene = room();
        let previous = FrameInput {
            camera_cycle: Some(CycleDirection::Previous),
            ..FrameInput::default()
        };

        let report = scene.update(&previous, DT);
        assert!(report.camera_switched);
        assert_eq!(report.active_camera, CameraId::NorthWest);

        // 0.25 s delay swallows the next two frames of a held key
        assert!(!scene.update(&previous, DT).camera_switched);
        assert!(!scene.update(&previous, DT).camera_switched);

        let report = scene.update(&previous, DT);
        assert!(report.camera_switched);
        assert_eq!(report.active_camera, CameraId::SouthWest);
        assert_relative_eq!(scene.active_camera().tint, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_unusable_delta_never_produces_nan() {
        let mut scene = room();
        let input = FrameInput {
            movement: MovementKeys::FORWARD | MovementKeys::LEFT,
            mouse_delta: Vec2::new(300.0, -200.0),
            camera_cycle: None,
        };

        for delta_time in [0.0, f32::NAN, -1.0, f32::INFINITY] {
            let report = scene.update(&input, delta_time);
            assert!(!report.moved);
        }

        let camera = scene.active_camera();
        assert_eq!(camera.position, Vec3::new(0.0, 1.0, 3.0));
        assert!(camera.view().iter().all(|value| value.is_finite()));
        assert!(camera.forward().iter().all(|value| value.is_finite()));
    }

    #[test]
    fn test_mouse_right_turns_right() {
        let mut scene = room();
        let input = FrameInput {
            mouse_delta: Vec2::new(20.0, 0.0),
            ..FrameInput::default()
        };
        scene.update(&input, DT);

        assert!(scene.active_camera().forward().x > 0.0);
        assert!(scene.active_camera().yaw > 0.0);
    }

    #[test]
    fn test_view_reflects_committed_position() {
        let mut scene = room();
        scene.update(&walk(MovementKeys::BACK), DT);

        let camera = scene.active_camera();
        let eye = camera.view() * camera.position.push(1.0);
        assert_relative_eq!(eye.xyz(), Vec3::zeros(), epsilon = 1e-5);
    }
}
