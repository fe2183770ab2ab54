//! # Navigation Scene
//!
//! Owns the level geometry, the camera rig and the player collider, and
//! advances them one frame at a time.
//!
//! ## Tick order
//! 1. Count down the camera switch cooldown and honour a switch request
//! 2. Apply mouse look to the first-person camera
//! 3. Recompute every camera
//! 4. Run the movement gate for the first-person heading
//! 5. Commit the displacement if permitted and move the player collider
//! 6. Recompute the first-person camera so its view matches the new position
//!
//! Fixed overview cameras are recomputed but never move or turn.

use crate::camera::{CameraId, CameraRig, CycleDirection, PoseController};
use crate::config::{ConfigError, NavigationConfig};
use crate::foundation::math::{sqr_magnitude, Mat4, Vec2, Vec3};
use crate::input::FrameInput;
use crate::physics::{BoxCollider, GateDecision, MovementGate};
use crate::scene::entity::{Entity, ModelId};
use crate::scene::level::{EntityDescription, LevelDescription};

/// Height of the unit cube stretched over each collider for debug drawing
pub const COLLIDER_DEBUG_HEIGHT: f32 = 1.0;

/// What happened during one [`Scene::update`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Camera active after the tick
    pub active_camera: CameraId,
    /// Whether a switch request was honoured this tick
    pub camera_switched: bool,
    /// Gate outcome, present when movement was attempted
    pub gate: Option<GateDecision>,
    /// Whether the first-person camera changed position
    pub moved: bool,
}

impl FrameReport {
    /// Whether the input asked to move and the gate was consulted
    pub fn movement_attempted(&self) -> bool {
        self.gate.is_some()
    }

    /// Whether the gate denied the attempted movement
    pub fn was_blocked(&self) -> bool {
        self.gate.is_some_and(|decision| !decision.is_permitted())
    }
}

/// Matrices for drawing one object from the active camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    /// Model to draw; `None` for collider debug boxes
    pub model: Option<ModelId>,
    /// Object-to-world
    pub model_matrix: Mat4,
    /// Object-to-view
    pub model_view: Mat4,
    /// Object-to-clip
    pub model_view_projection: Mat4,
    /// Object tint
    pub tint: Vec3,
}

impl DrawCall {
    fn new(
        model: Option<ModelId>,
        model_matrix: Mat4,
        tint: Vec3,
        camera: &PoseController,
    ) -> Self {
        let model_view = camera.view() * model_matrix;
        Self {
            model,
            model_matrix,
            model_view,
            model_view_projection: camera.projection() * model_view,
            tint,
        }
    }
}

/// A walkable level with its cameras
#[derive(Debug, Clone)]
pub struct Scene {
    config: NavigationConfig,
    colliders: Vec<BoxCollider>,
    entities: Vec<Entity>,
    rig: CameraRig,
    player: BoxCollider,
    gate: MovementGate,
}

impl Scene {
    /// Build a scene from validated settings and a level layout
    pub fn new(config: NavigationConfig, level: &LevelDescription) -> Result<Self, ConfigError> {
        config.validate()?;
        level.validate()?;

        let cameras = CameraId::ALL
            .iter()
            .map(|&id| {
                level
                    .camera(id)
                    .map(|placement| placement.build(config.projection))
                    .ok_or_else(|| {
                        ConfigError::invalid("cameras", format!("no placement for {id:?}"))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let cameras: [PoseController; CameraId::COUNT] = cameras
            .try_into()
            .map_err(|_| ConfigError::invalid("cameras", "wrong number of placements"))?;

        let rig = CameraRig::new(cameras, config.camera_switch_delay);
        let player_size = config.movement.player_size;
        let player = BoxCollider::new(
            rig.camera(CameraId::FirstPerson).position,
            Vec2::new(player_size, player_size),
        );

        let entities: Vec<Entity> =
            level.entities.iter().map(EntityDescription::build).collect();

        log::info!(
            "Scene created: {} colliders, {} entities, player at {:?}",
            level.colliders.len(),
            entities.len(),
            player.position()
        );

        Ok(Self {
            gate: MovementGate::new(config.movement.min_dot_product),
            config,
            colliders: level.colliders.clone(),
            entities,
            rig,
            player,
        })
    }

    /// Settings in use
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Static colliders
    pub fn colliders(&self) -> &[BoxCollider] {
        &self.colliders
    }

    /// Add a static collider
    pub fn add_collider(&mut self, collider: BoxCollider) {
        self.colliders.push(collider);
    }

    /// Placed entities
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Placed entities, mutably
    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Add an entity and return its index
    pub fn add_entity(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// First entity called `name`
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    /// First entity called `name`, mutably
    pub fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.name == name)
    }

    /// Attach `model` to every entity whose model name is `model_name`.
    ///
    /// Returns how many entities were bound.
    pub fn bind_model(&mut self, model_name: &str, model: ModelId) -> usize {
        let mut bound = 0;
        for entity in &mut self.entities {
            if entity.model_name.as_deref() == Some(model_name) {
                entity.model = Some(model);
                bound += 1;
            }
        }
        log::debug!("Bound model '{}' to {} entities", model_name, bound);
        bound
    }

    /// The camera rig
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// The camera rig, mutably
    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    /// The camera the renderer should draw from
    pub fn active_camera(&self) -> &PoseController {
        self.rig.active()
    }

    /// Switch cameras immediately, ignoring the cooldown
    pub fn cycle(&mut self, direction: CycleDirection) -> CameraId {
        self.rig.cycle(direction)
    }

    /// The player's collider, kept under the first-person camera
    pub fn player_collider(&self) -> &BoxCollider {
        &self.player
    }

    /// Apply a new viewport aspect ratio to every camera
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.config.projection.aspect = aspect;
        self.rig.set_aspect_ratio(aspect);
    }

    /// Advance the scene by one frame
    pub fn update(&mut self, input: &FrameInput, delta_time: f32) -> FrameReport {
        let movement = self.config.movement;
        let look = self.config.look;

        self.rig.tick_cooldown(delta_time);
        let camera_switched = input
            .camera_cycle
            .is_some_and(|direction| self.rig.request_cycle(direction));

        let first_person = self.rig.active_id() == CameraId::FirstPerson;
        if first_person {
            self.rig
                .active_mut()
                .apply_mouse_look(&input.mouse_delta, look.sensitivity, delta_time);
        }
        for id in CameraId::ALL {
            self.rig.camera_mut(id).recompute();
        }

        let intent = input.intent();
        let mut gate = None;
        let mut moved = false;

        if first_person && sqr_magnitude(&intent) >= movement.min_intent_sqr {
            let camera = self.rig.camera(CameraId::FirstPerson);
            match camera.move_direction(&intent) {
                Some(direction) => {
                    let decision = self.gate.evaluate(&direction, &self.player, &self.colliders);
                    let displacement = if decision.is_permitted() {
                        camera.propose_displacement(&intent, movement.walk_speed, delta_time)
                    } else {
                        None
                    };

                    if let Some(displacement) = displacement {
                        let camera = self.rig.camera_mut(CameraId::FirstPerson);
                        camera.translate_by(&displacement);
                        camera.recompute();
                        self.player.update_position(camera.position);
                        moved = true;
                    }
                    gate = Some(decision);
                }
                None => log::trace!("Movement intent {:?} has no ground heading", intent),
            }
        }

        FrameReport {
            active_camera: self.rig.active_id(),
            camera_switched,
            gate,
            moved,
        }
    }

    /// Draw calls for every entity as seen from the active camera
    pub fn draw_calls(&self) -> Vec<DrawCall> {
        let camera = self.active_camera();
        self.entities
            .iter()
            .map(|entity| DrawCall::new(entity.model, entity.model_matrix(), entity.tint, camera))
            .collect()
    }

    /// Draw calls for the collider debug boxes as seen from the active camera
    pub fn collider_draw_calls(&self) -> Vec<DrawCall> {
        let camera = self.active_camera();
        let white = Vec3::new(1.0, 1.0, 1.0);
        self.colliders
            .iter()
            .map(|collider| {
                let model_matrix = collider.debug_transform(COLLIDER_DEBUG_HEIGHT);
                DrawCall::new(None, model_matrix, white, camera)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::orientation::Orientation;
    use crate::input::MovementKeys;
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn scene() -> Scene {
        Scene::new(NavigationConfig::default(), &LevelDescription::default()).unwrap()
    }

    #[test]
    fn test_player_starts_under_first_person_camera() {
        let scene = scene();
        assert_eq!(scene.player_collider().position(), Vec3::new(0.0, 1.0, 3.0));
        assert_eq!(scene.player_collider().size(), Vec2::new(0.25, 0.25));
        assert_eq!(scene.rig().active_id(), CameraId::FirstPerson);
        assert_eq!(scene.colliders().len(), 5);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = NavigationConfig::default();
        config.movement.walk_speed = -1.0;
        assert!(Scene::new(config, &LevelDescription::default()).is_err());
    }

    #[test]
    fn test_idle_input_skips_gate() {
        let mut scene = scene();
        let report = scene.update(&FrameInput::default(), 0.016);
        assert!(!report.movement_attempted());
        assert!(!report.moved);
        assert!(!report.was_blocked());
    }

    #[test]
    fn test_overview_camera_ignores_movement() {
        let mut scene = scene();
        scene.rig_mut().set_active(CameraId::SouthEast);
        let before = scene.active_camera().position;

        let input = FrameInput {
            movement: MovementKeys::FORWARD,
            mouse_delta: Vec2::new(50.0, 50.0),
            camera_cycle: None,
        };
        let report = scene.update(&input, 0.1);

        assert!(!report.movement_attempted());
        assert_eq!(scene.active_camera().position, before);
        assert_eq!(scene.rig().camera(CameraId::FirstPerson).position, Vec3::new(0.0, 1.0, 3.0));
    }

    #[test]
    fn test_bind_model_and_draw_calls() {
        let mut scene = scene();
        let mut models: SlotMap<ModelId, &str> = SlotMap::with_key();
        let wall = models.insert("wall");

        assert_eq!(scene.bind_model("wall", wall), 4);
        assert_eq!(scene.bind_model("missing", wall), 0);

        let calls = scene.draw_calls();
        assert_eq!(calls.len(), scene.entities().len());
        assert_eq!(calls.iter().filter(|call| call.model == Some(wall)).count(), 4);

        let camera = scene.active_camera();
        let first = &calls[0];
        assert_relative_eq!(
            first.model_view_projection,
            camera.view_projection() * first.model_matrix,
            epsilon = 1e-5
        );

        assert_eq!(scene.collider_draw_calls().len(), 5);
    }

    #[test]
    fn test_direct_cycle_ignores_cooldown() {
        let mut scene = scene();
        assert_eq!(scene.cycle(CycleDirection::Next), CameraId::NorthEast);
        assert_eq!(scene.cycle(CycleDirection::Next), CameraId::SouthEast);
        assert_eq!(scene.active_camera().tint, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_entity_lookup_by_name() {
        let mut scene = scene();
        if let Some(teapot) = scene.entity_mut("Teapot") {
            teapot.position.y = 1.0;
        }
        assert_eq!(scene.entity("Teapot").map(|e| e.position.y), Some(1.0));
        assert!(scene.entity("Chair").is_none());

        let chair = Entity::new(
            "Chair",
            Vec3::zeros(),
            Vec3::new(1.0, 1.0, 1.0),
            Orientation::IDENTITY,
        );
        let index = scene.add_entity(chair);
        assert_eq!(scene.entities()[index].name, "Chair");
    }
}
