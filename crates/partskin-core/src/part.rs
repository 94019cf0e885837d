use crate::graphic::{Color, GraphicData, RenderedGraphic};
use crate::id::{BodyPartId, CategoryId, OperationId, PartId};
use serde::{Deserialize, Serialize};

/// A host part definition eligible for a visual override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDefinition {
    pub id: PartId,
    /// Current graphic descriptor. Parts without one are never resolved.
    pub graphic: Option<GraphicData>,
    /// Only overridable parts are considered when reached through an operation.
    pub overridable: bool,
    /// `None` means the part declares no categories; category filters pass.
    pub categories: Option<Vec<CategoryId>>,

    // Display fields, written by the applier.
    pub rendered: Option<RenderedGraphic>,
    pub ui_icon: Option<String>,
    pub ui_icon_color: Option<Color>,
}

impl PartDefinition {
    pub fn new(id: impl Into<PartId>, graphic: Option<GraphicData>) -> Self {
        Self {
            id: id.into(),
            graphic,
            overridable: false,
            categories: None,
            rendered: None,
            ui_icon: None,
            ui_icon_color: None,
        }
    }

    /// The texture path the part is currently drawn with, if any.
    pub fn texture_path(&self) -> Option<&str> {
        self.graphic
            .as_ref()
            .map(|g| g.texture_path.as_str())
            .filter(|path| !path.is_empty())
    }

    pub fn in_category(&self, category: &CategoryId) -> bool {
        match &self.categories {
            Some(categories) => categories.contains(category),
            None => true,
        }
    }
}

/// The effect an operation installs, reduced to what icon filtering needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddedEffect {
    /// Whether the installed part is solid. Effects without part properties
    /// count as soft.
    #[serde(default)]
    pub solid: bool,
}

/// A host operation: installs any of `ingredients` on any of `body_parts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDefinition {
    pub id: OperationId,
    pub body_parts: Vec<BodyPartId>,
    pub ingredients: Vec<PartId>,
    #[serde(default)]
    pub added_effect: Option<AddedEffect>,
}

impl OperationDefinition {
    /// Solidity of the added effect, or `None` if the operation adds nothing.
    pub fn effect_solidity(&self) -> Option<bool> {
        self.added_effect.map(|effect| effect.solid)
    }
}
