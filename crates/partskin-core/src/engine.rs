//! Two-phase override resolution.
//!
//! [`ResolutionEngine::resolve_via_operation`] first picks an icon rule from
//! the body part's bucket, then a texture rule from the ingredient's source
//! texture bucket. Both phases take the first candidate whose filters pass.
//! The engine holds no state of its own; the same inputs always produce the
//! same [`Override`].

use crate::graphic::Color;
use crate::id::BodyPartId;
use crate::index::RuleIndex;
use crate::part::{OperationDefinition, PartDefinition};
use crate::rule::TextureRule;
use serde::Serialize;

/// A resolved appearance override for one part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Override {
    /// Icon texture. Becomes the mask when `color_rule` is set.
    pub texture_path: String,
    pub color: Color,
    /// Texture rule that supplied the base texture and colors, if any.
    pub color_rule: Option<TextureRule>,
}

/// Matches parts against a [`RuleIndex`].
#[derive(Debug, Clone, Copy)]
pub struct ResolutionEngine<'a> {
    index: &'a RuleIndex,
}

impl<'a> ResolutionEngine<'a> {
    pub fn new(index: &'a RuleIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &'a RuleIndex {
        self.index
    }

    /// Resolve a part that names its icon texture directly.
    ///
    /// Returns `None` when the part has no texture, its texture has no rules,
    /// or no rule's filters accept it.
    pub fn resolve_direct(&self, part: &PartDefinition, icon_texture: &str) -> Option<Override> {
        let texture = part.texture_path()?;
        let rule = self.select_texture_rule(texture, part)?;
        Some(Override {
            texture_path: icon_texture.to_string(),
            color: rule.color,
            color_rule: Some(rule.clone()),
        })
    }

    /// Resolve an ingredient installed on `body_part` through `operation`.
    pub fn resolve_via_operation(
        &self,
        operation: &OperationDefinition,
        body_part: &BodyPartId,
        ingredient: &PartDefinition,
    ) -> Option<Override> {
        if !ingredient.overridable {
            return None;
        }
        let texture = ingredient.texture_path()?;

        if self.index.texture_candidates(texture).is_empty() {
            return None;
        }

        let solidity = operation.effect_solidity();
        let icon = self
            .index
            .icon_candidates(body_part)
            .iter()
            .find(|rule| rule.accepts(ingredient, solidity))?;

        // An icon match alone is enough; without a color rule the icon is
        // drawn plain white.
        let color_rule = self.select_texture_rule(texture, ingredient);
        Some(Override {
            texture_path: icon.texture.clone(),
            color: color_rule.map_or(Color::WHITE, |rule| rule.color),
            color_rule: color_rule.cloned(),
        })
    }

    fn select_texture_rule(&self, texture: &str, part: &PartDefinition) -> Option<&'a TextureRule> {
        self.index
            .texture_candidates(texture)
            .iter()
            .find(|rule| rule.accepts(part))
    }
}
