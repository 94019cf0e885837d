//! Serde data file structs for rule and host catalog definitions.
//!
//! These structs define the on-disk format for texture rules, icon rules,
//! parts, body parts, and operations. They are deserialized from RON, JSON,
//! or TOML data files and then resolved into core types by the loader.

use partskin_core::graphic::{Color, GraphicData};
use partskin_core::id::*;
use partskin_core::part::{AddedEffect, OperationDefinition, PartDefinition};
use partskin_core::rule::{IconRule, TextureRule};
use serde::Deserialize;

// ===========================================================================
// Colors
// ===========================================================================

/// A color written as `(r, g, b)` or `(r, g, b, a)`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum ColorData {
    Rgba(f32, f32, f32, f32),
    Rgb(f32, f32, f32),
}

impl Default for ColorData {
    fn default() -> Self {
        ColorData::Rgb(1.0, 1.0, 1.0)
    }
}

impl From<ColorData> for Color {
    fn from(data: ColorData) -> Self {
        match data {
            ColorData::Rgba(r, g, b, a) => Color::rgba(r, g, b, a),
            ColorData::Rgb(r, g, b) => Color::rgb(r, g, b),
        }
    }
}

// ===========================================================================
// Rules
// ===========================================================================

/// A texture rule in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct TextureRuleData {
    pub name: String,
    /// Source texture the rule applies to.
    pub texture: String,
    pub replacement: String,
    #[serde(default)]
    pub name_contains: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: ColorData,
    #[serde(default)]
    pub color_icon: ColorData,
}

impl From<TextureRuleData> for TextureRule {
    fn from(data: TextureRuleData) -> Self {
        TextureRule {
            id: RuleId(data.name),
            source_texture: data.texture,
            replacement_texture: data.replacement,
            name_contains: data.name_contains,
            category: data.category.map(CategoryId),
            color: data.color.into(),
            icon_color: data.color_icon.into(),
        }
    }
}

/// An icon rule in a data file. `body_part` and `body_parts` are merged.
#[derive(Debug, Clone, Deserialize)]
pub struct IconRuleData {
    pub name: String,
    #[serde(default)]
    pub body_part: Option<String>,
    #[serde(default)]
    pub body_parts: Vec<String>,
    /// Part that takes this icon directly.
    #[serde(default)]
    pub part: Option<String>,
    #[serde(default)]
    pub name_contains: Option<String>,
    #[serde(default)]
    pub solid_only: bool,
    #[serde(default)]
    pub soft_only: bool,
    pub texture: String,
}

impl IconRuleData {
    /// `body_part` followed by `body_parts`, without repeats.
    pub fn all_body_parts(&self) -> Vec<BodyPartId> {
        let mut merged: Vec<BodyPartId> = Vec::new();
        for name in self.body_part.iter().chain(self.body_parts.iter()) {
            let id = BodyPartId::new(name.as_str());
            if !merged.contains(&id) {
                merged.push(id);
            }
        }
        merged
    }
}

impl From<IconRuleData> for IconRule {
    fn from(data: IconRuleData) -> Self {
        IconRule {
            body_parts: data.all_body_parts(),
            id: RuleId(data.name),
            target_part: data.part.map(PartId),
            name_contains: data.name_contains,
            solid_only: data.solid_only,
            soft_only: data.soft_only,
            texture: data.texture,
        }
    }
}

// ===========================================================================
// Host definitions
// ===========================================================================

/// A part's current graphic in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphicDataSchema {
    pub texture: String,
    #[serde(default)]
    pub color: ColorData,
}

/// A part definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct PartData {
    pub name: String,
    #[serde(default)]
    pub graphic: Option<GraphicDataSchema>,
    #[serde(default)]
    pub overridable: bool,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl From<PartData> for PartDefinition {
    fn from(data: PartData) -> Self {
        let graphic = data.graphic.map(|g| GraphicData {
            color: g.color.into(),
            ..GraphicData::single(g.texture)
        });
        let mut part = PartDefinition::new(data.name, graphic);
        part.overridable = data.overridable;
        part.categories = data
            .categories
            .map(|names| names.into_iter().map(CategoryId).collect());
        part
    }
}

/// The effect an operation adds, as written in a data file.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AddedEffectData {
    #[serde(default)]
    pub solid: bool,
}

/// An operation in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationData {
    pub name: String,
    #[serde(default)]
    pub body_parts: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub added_effect: Option<AddedEffectData>,
}

impl From<OperationData> for OperationDefinition {
    fn from(data: OperationData) -> Self {
        OperationDefinition {
            id: OperationId(data.name),
            body_parts: data.body_parts.into_iter().map(BodyPartId).collect(),
            ingredients: data.ingredients.into_iter().map(PartId).collect(),
            added_effect: data
                .added_effect
                .map(|effect| AddedEffect { solid: effect.solid }),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
