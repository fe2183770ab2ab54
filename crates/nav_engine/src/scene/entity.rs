//! Placed scene objects

use serde::{Deserialize, Serialize};

use crate::foundation::math::{scale, translate, Mat4, Vec3};
use crate::foundation::orientation::Orientation;

slotmap::new_key_type! {
    /// Handle into the model table owned by the asset layer
    pub struct ModelId;
}

/// A drawable object placed in the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Display name, unique within a level
    pub name: String,
    /// World position
    pub position: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// World rotation
    pub rotation: Orientation,
    /// Colour multiplier
    pub tint: Vec3,
    /// Name of the model this entity draws, resolved by the asset layer
    pub model_name: Option<String>,
    /// Resolved model handle
    #[serde(skip)]
    pub model: Option<ModelId>,
}

impl Entity {
    /// Untinted entity without a model
    pub fn new(
        name: impl Into<String>,
        position: Vec3,
        scale: Vec3,
        rotation: Orientation,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            scale,
            rotation,
            tint: Vec3::new(1.0, 1.0, 1.0),
            model_name: None,
            model: None,
        }
    }

    /// Builder-style model name
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// Builder-style model handle
    pub fn with_model(mut self, model: ModelId) -> Self {
        self.model = Some(model);
        self
    }

    /// Builder-style tint
    pub fn with_tint(mut self, tint: Vec3) -> Self {
        self.tint = tint;
        self
    }

    /// Object-to-world matrix: scale, then rotate, then translate
    pub fn model_matrix(&self) -> Mat4 {
        translate(&self.position) * self.rotation.to_matrix() * scale(&self.scale)
    }
}
