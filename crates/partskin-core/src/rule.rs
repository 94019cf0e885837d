//! Declarative override rules.
//!
//! A [`TextureRule`] recolors parts drawn with a given source texture. An
//! [`IconRule`] picks the icon texture used when a part is installed on one of
//! its body parts. Both carry optional filters; a rule with no filters
//! matches every candidate that reaches it.

use crate::graphic::Color;
use crate::id::{BodyPartId, CategoryId, PartId, RuleId};
use crate::part::PartDefinition;
use serde::{Deserialize, Serialize};

/// Recolor/replace rule for parts whose current texture is `source_texture`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureRule {
    pub id: RuleId,
    pub source_texture: String,
    /// Base texture drawn under the icon mask.
    pub replacement_texture: String,
    #[serde(default)]
    pub name_contains: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub color: Color,
    /// Secondary color applied through the icon mask.
    #[serde(default)]
    pub icon_color: Color,
}

impl TextureRule {
    /// True if the name and category filters both accept `part`.
    pub fn accepts(&self, part: &PartDefinition) -> bool {
        name_filter_passes(self.name_contains.as_deref(), &part.id)
            && self
                .category
                .as_ref()
                .is_none_or(|category| part.in_category(category))
    }
}

/// Icon selection rule keyed by the body parts it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconRule {
    pub id: RuleId,
    pub body_parts: Vec<BodyPartId>,
    /// Part that takes this icon directly, without an operation.
    #[serde(default)]
    pub target_part: Option<PartId>,
    #[serde(default)]
    pub name_contains: Option<String>,
    #[serde(default)]
    pub solid_only: bool,
    #[serde(default)]
    pub soft_only: bool,
    pub texture: String,
}

impl IconRule {
    /// True if this rule may be used for `part` installed by an operation
    /// whose added effect has the given solidity (`None`: no added effect).
    pub fn accepts(&self, part: &PartDefinition, effect_solidity: Option<bool>) -> bool {
        if !name_filter_passes(self.name_contains.as_deref(), &part.id) {
            return false;
        }
        match effect_solidity {
            Some(solid) => !(self.solid_only && !solid) && !(self.soft_only && solid),
            None => true,
        }
    }

    pub fn is_name_filtered(&self) -> bool {
        self.name_contains.is_some()
    }
}

fn name_filter_passes(name_contains: Option<&str>, id: &PartId) -> bool {
    name_contains.is_none_or(|needle| id.as_str().contains(needle))
}
