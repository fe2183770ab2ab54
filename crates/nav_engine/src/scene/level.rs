//! Level descriptions
//!
//! A [`LevelDescription`] is the serializable layout of a walkthrough level:
//! static colliders, placed entities and where each camera sits. The default
//! is the bundled room, a walled 10x10 square with a crate in the middle.

use serde::{Deserialize, Serialize};

use crate::camera::{CameraId, PoseController};
use crate::config::{Config, ConfigError, ProjectionSettings};
use crate::foundation::math::constants::{HALF_PI, PI};
use crate::foundation::math::{Vec2, Vec3};
use crate::foundation::orientation::Orientation;
use crate::physics::BoxCollider;
use crate::scene::entity::Entity;

fn white() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

/// Where one camera of the rig starts and what it looks at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPlacement {
    /// Which camera this places
    pub id: CameraId,
    /// Eye position
    pub eye: Vec3,
    /// Point the camera initially looks at
    pub target: Vec3,
    /// Colour multiplier while this camera is active
    #[serde(default = "white")]
    pub tint: Vec3,
}

impl CameraPlacement {
    /// Untinted placement
    pub fn new(id: CameraId, eye: Vec3, target: Vec3) -> Self {
        Self {
            id,
            eye,
            target,
            tint: white(),
        }
    }

    /// Builder-style tint
    pub fn with_tint(mut self, tint: Vec3) -> Self {
        self.tint = tint;
        self
    }

    /// Build the pose controller for this placement
    pub fn build(&self, projection: ProjectionSettings) -> PoseController {
        PoseController::looking_at(self.eye, self.target, projection).with_tint(self.tint)
    }
}

/// Serializable form of an [`Entity`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescription {
    /// Display name
    pub name: String,
    /// World position
    pub position: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Rotation about +X in radians
    #[serde(default)]
    pub pitch: f32,
    /// Rotation about +Y in radians
    #[serde(default)]
    pub yaw: f32,
    /// Colour multiplier
    #[serde(default = "white")]
    pub tint: Vec3,
    /// Model drawn for this entity
    #[serde(default)]
    pub model: Option<String>,
}

impl EntityDescription {
    fn placed(name: &str, position: Vec3, scale: Vec3, pitch: f32, yaw: f32, model: &str) -> Self {
        Self {
            name: name.to_string(),
            position,
            scale,
            pitch,
            yaw,
            tint: white(),
            model: Some(model.to_string()),
        }
    }

    /// Instantiate the entity
    pub fn build(&self) -> Entity {
        let entity = Entity::new(
            self.name.clone(),
            self.position,
            self.scale,
            Orientation::from_pitch_yaw(self.pitch, self.yaw),
        )
        .with_tint(self.tint);

        match &self.model {
            Some(model) => entity.with_model_name(model.clone()),
            None => entity,
        }
    }
}

/// Complete level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDescription {
    /// Static movement blockers
    pub colliders: Vec<BoxCollider>,
    /// Drawn objects
    pub entities: Vec<EntityDescription>,
    /// One placement per camera id
    pub cameras: Vec<CameraPlacement>,
}

impl Default for LevelDescription {
    fn default() -> Self {
        let origin = Vec3::zeros();
        let wall_scale = Vec3::new(2.0, 2.0, 2.0);
        let teapot_scale = Vec3::new(0.25, 0.25, 0.25);
        let box_position = Vec3::new(0.0, 0.125, 0.0);
        let box_scale = Vec3::new(0.5, 0.25, 0.5);
        let east = Vec3::new(5.0, 2.5, 0.0);
        let west = Vec3::new(-5.0, 2.5, 0.0);
        let north = Vec3::new(0.0, 2.5, -5.0);
        let south = Vec3::new(0.0, 2.5, 5.0);
        let ceiling = Vec3::new(0.0, 6.0, 0.0);

        Self {
            colliders: vec![
                // Centre crate
                BoxCollider::new(Vec3::zeros(), Vec2::new(1.0, 1.0)),
                // South, north, east, west walls
                BoxCollider::new(Vec3::new(0.0, 0.0, 5.5), Vec2::new(12.0, 1.0)),
                BoxCollider::new(Vec3::new(0.0, 0.0, -5.5), Vec2::new(12.0, 1.0)),
                BoxCollider::new(Vec3::new(5.5, 0.0, 0.0), Vec2::new(1.0, 12.0)),
                BoxCollider::new(Vec3::new(-5.5, 0.0, 0.0), Vec2::new(1.0, 12.0)),
            ],
            entities: vec![
                EntityDescription::placed("Teapot", origin, teapot_scale, 0.0, 0.0, "teapot"),
                EntityDescription::placed("Box", box_position, box_scale, 0.0, 0.0, "box"),
                EntityDescription::placed("East", east, wall_scale, HALF_PI, -HALF_PI, "wall"),
                EntityDescription::placed("West", west, wall_scale, HALF_PI, HALF_PI, "wall"),
                EntityDescription::placed("North", north, wall_scale, HALF_PI, 0.0, "wall"),
                EntityDescription::placed("South", south, wall_scale, HALF_PI, PI, "wall"),
                EntityDescription::placed("Floor", origin, wall_scale, 0.0, 0.0, "floor"),
                EntityDescription::placed("Ceiling", ceiling, wall_scale, PI, 0.0, "ceiling"),
            ],
            cameras: vec![
                CameraPlacement::new(CameraId::FirstPerson, Vec3::new(0.0, 1.0, 3.0), origin),
                CameraPlacement::new(CameraId::NorthEast, Vec3::new(5.0, 4.0, 5.0), origin)
                    .with_tint(Vec3::new(1.0, 0.0, 0.0)),
                CameraPlacement::new(CameraId::SouthEast, Vec3::new(5.0, 4.0, -5.0), origin)
                    .with_tint(Vec3::new(0.0, 1.0, 0.0)),
                CameraPlacement::new(CameraId::SouthWest, Vec3::new(-5.0, 4.0, 5.0), origin)
                    .with_tint(Vec3::new(0.0, 0.0, 1.0)),
                CameraPlacement::new(CameraId::NorthWest, Vec3::new(-5.0, 4.0, -5.0), origin)
                    .with_tint(Vec3::new(1.0, 1.0, 0.0)),
            ],
        }
    }
}

impl Config for LevelDescription {}

impl LevelDescription {
    /// Placement for `id`, if the level has one
    pub fn camera(&self, id: CameraId) -> Option<&CameraPlacement> {
        self.cameras.iter().find(|placement| placement.id == id)
    }

    /// Check that every camera is placed exactly once and every collider has area
    pub fn validate(&self) -> Result<(), ConfigError> {
        for id in CameraId::ALL {
            match self.cameras.iter().filter(|placement| placement.id == id).count() {
                1 => {}
                0 => {
                    let reason = format!("no placement for {id:?}");
                    return Err(ConfigError::invalid("cameras", reason));
                }
                n => {
                    let reason = format!("{n} placements for {id:?}");
                    return Err(ConfigError::invalid("cameras", reason));
                }
            }
        }

        let mut placements = self.cameras.iter();
        if let Some(placement) = placements.find(|placement| placement.eye == placement.target) {
            return Err(ConfigError::invalid(
                "cameras",
                format!("{:?} looks at its own eye position", placement.id),
            ));
        }

        // Deserialized colliders bypass the constructor's size check
        if let Some(index) = self.colliders.iter().position(|collider| {
            let size = collider.size();
            !(size.x > 0.0 && size.y > 0.0)
        }) {
            return Err(ConfigError::invalid("colliders", format!("collider {index} has no area")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_room_is_valid() {
        let level = LevelDescription::default();
        assert!(level.validate().is_ok());
        assert_eq!(level.colliders.len(), 5);
        assert_eq!(level.entities.len(), 8);
        assert_eq!(level.cameras.len(), CameraId::COUNT);
        assert_eq!(
            level.camera(CameraId::FirstPerson).map(|p| p.eye),
            Some(Vec3::new(0.0, 1.0, 3.0))
        );
    }

    #[test]
    fn test_missing_camera_is_rejected() {
        let mut level = LevelDescription::default();
        level.cameras.retain(|placement| placement.id != CameraId::SouthWest);
        assert!(matches!(level.validate(), Err(ConfigError::Invalid { field: "cameras", .. })));

        let mut level = LevelDescription::default();
        let duplicate = level.cameras[0].clone();
        level.cameras.push(duplicate);
        assert!(level.validate().is_err());
    }

    #[test]
    fn test_degenerate_collider_from_file_is_rejected() {
        let level = LevelDescription::from_ron_str(
            "(colliders: [(position: (0.0, 0.0, 0.0), size: (0.0, 1.0))])",
        );
        // Cameras default to the bundled room, so only the collider is wrong
        assert!(matches!(
            level.and_then(|l| l.validate()),
            Err(ConfigError::Invalid { field: "colliders", .. })
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let level = LevelDescription::default();
        let text = toml::to_string(&level).unwrap();
        let parsed = LevelDescription::from_toml_str(&text).unwrap();
        assert_eq!(parsed, level);
    }

    #[test]
    fn test_entity_description_builds_rotation() {
        let level = LevelDescription::default();
        let north = level.entities.iter().find(|e| e.name == "North").unwrap().build();
        assert_eq!(north.rotation, Orientation::from_pitch_yaw(HALF_PI, 0.0));
        assert_eq!(north.model_name.as_deref(), Some("wall"));
        assert!(north.model.is_none());
    }
}
