//! Configuration system
//!
//! Tunables for movement, mouse look and projection. Any [`Config`] type can
//! be loaded from or saved to TOML or RON, chosen by file extension.

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::radians;
use crate::physics::MIN_DOT_PRODUCT;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            Self::from_toml_str(&contents)
        } else if path.ends_with(".ron") {
            Self::from_ron_str(&contents)
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Parse from TOML text
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse from RON text
    fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value that parsed but makes no sense
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Walking and collision tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Ground speed in units per second
    pub walk_speed: f32,
    /// Alignment above which a touching obstacle blocks movement
    pub min_dot_product: f32,
    /// Squared intent magnitude below which the input counts as idle
    pub min_intent_sqr: f32,
    /// Width and depth of the player's collider
    pub player_size: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: 1.0,
            min_dot_product: MIN_DOT_PRODUCT,
            min_intent_sqr: 0.01,
            player_size: 0.25,
        }
    }
}

/// Mouse look tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookSettings {
    /// Radians per pixel of mouse travel per second
    pub sensitivity: f32,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self { sensitivity: 0.075 }
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport width over height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl ProjectionSettings {
    /// Vertical field of view in radians
    pub fn fov_radians(&self) -> f32 {
        radians(self.fov_degrees)
    }
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            aspect: 1260.0 / 720.0,
            near: 0.2,
            far: 100.0,
        }
    }
}

/// Top-level navigation configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Seconds between honoured camera switch requests
    pub camera_switch_delay: f32,
    /// Walking and collision
    pub movement: MovementSettings,
    /// Mouse look
    pub look: LookSettings,
    /// Camera projection
    pub projection: ProjectionSettings,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            camera_switch_delay: 0.25,
            movement: MovementSettings::default(),
            look: LookSettings::default(),
            projection: ProjectionSettings::default(),
        }
    }
}

impl Config for NavigationConfig {}

impl NavigationConfig {
    /// Reject values that would break the numeric pipeline
    // Negated comparisons so that NaN fails every check
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let movement = &self.movement;
        if !(movement.walk_speed.is_finite() && movement.walk_speed > 0.0) {
            return Err(ConfigError::invalid("movement.walk_speed", "must be positive"));
        }
        if !(-1.0..=1.0).contains(&movement.min_dot_product) {
            return Err(ConfigError::invalid("movement.min_dot_product", "must lie in [-1, 1]"));
        }
        if !(movement.min_intent_sqr >= 0.0) {
            return Err(ConfigError::invalid("movement.min_intent_sqr", "must not be negative"));
        }
        if !(movement.player_size > 0.0) {
            return Err(ConfigError::invalid("movement.player_size", "must be positive"));
        }

        if !self.look.sensitivity.is_finite() {
            return Err(ConfigError::invalid("look.sensitivity", "must be finite"));
        }

        let projection = &self.projection;
        if !(projection.fov_degrees > 0.0 && projection.fov_degrees < 180.0) {
            return Err(ConfigError::invalid("projection.fov_degrees", "must lie in (0, 180)"));
        }
        if !(projection.aspect > 0.0) {
            return Err(ConfigError::invalid("projection.aspect", "must be positive"));
        }
        if !(projection.near > 0.0 && projection.far > projection.near) {
            return Err(ConfigError::invalid(
                "projection.near",
                format!("need 0 < near < far, got {} and {}", projection.near, projection.far),
            ));
        }

        if !(self.camera_switch_delay >= 0.0) {
            return Err(ConfigError::invalid("camera_switch_delay", "must not be negative"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = NavigationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.movement.min_dot_product, 0.5);
        assert_eq!(config.camera_switch_delay, 0.25);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = NavigationConfig::from_toml_str(
            r#"
            camera_switch_delay = 0.5

            [movement]
            walk_speed = 2.5
            "#,
        )
        .unwrap();

        assert_eq!(config.movement.walk_speed, 2.5);
        assert_eq!(config.movement.player_size, 0.25);
        assert_eq!(config.camera_switch_delay, 0.5);
        assert_eq!(config.projection, ProjectionSettings::default());
    }

    #[test]
    fn test_ron_parse() {
        let config = NavigationConfig::from_ron_str(
            "(look: (sensitivity: 0.1), projection: (fov_degrees: 60.0))",
        )
        .unwrap();
        assert_eq!(config.look.sensitivity, 0.1);
        assert_eq!(config.projection.fov_degrees, 60.0);
        assert_eq!(config.projection.near, 0.2);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = NavigationConfig::from_toml_str("movement = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = NavigationConfig::default();
        config.projection.near = 200.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "projection.near", .. })
        ));

        let mut config = NavigationConfig::default();
        config.movement.min_dot_product = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "movement.min_dot_product", .. })
        ));

        let mut config = NavigationConfig::default();
        config.movement.player_size = 0.0;
        assert!(config.validate().is_err());

        let mut config = NavigationConfig::default();
        config.movement.walk_speed = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_round_trip_and_unknown_extension() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("nav_engine_config_{}.toml", std::process::id()));
        let path = path.to_string_lossy().into_owned();

        let mut config = NavigationConfig::default();
        config.movement.walk_speed = 3.0;
        config.save_to_file(&path).unwrap();
        let loaded = NavigationConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);

        assert!(matches!(
            NavigationConfig::default().save_to_file("settings.json"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
