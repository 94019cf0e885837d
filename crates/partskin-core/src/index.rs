//! Lookup tables built once from the rule catalogs.
//!
//! Texture rules are bucketed by source texture in declaration order. Icon
//! rules are first sorted (name-filtered rules before unfiltered ones, then by
//! id) and then bucketed by body part, so every bucket inherits the global
//! order.

use crate::catalog::BodyPartLookup;
use crate::id::BodyPartId;
use crate::rule::{IconRule, TextureRule};
use std::collections::HashMap;

/// Immutable rule index. Frozen after [`RuleIndex::build`].
#[derive(Debug, Default)]
pub struct RuleIndex {
    texture_index: HashMap<String, Vec<TextureRule>>,
    icon_index: HashMap<BodyPartId, Vec<IconRule>>,
    /// All icon rules in sort order, including ones with no known body part.
    icon_rules: Vec<IconRule>,
}

impl RuleIndex {
    /// Build both lookup tables. Body parts unknown to `body_parts` are
    /// dropped from the icon index; nothing here can fail.
    pub fn build(
        texture_rules: impl IntoIterator<Item = TextureRule>,
        icon_rules: impl IntoIterator<Item = IconRule>,
        body_parts: &impl BodyPartLookup,
    ) -> Self {
        let mut texture_index: HashMap<String, Vec<TextureRule>> = HashMap::new();
        for rule in texture_rules {
            texture_index
                .entry(rule.source_texture.clone())
                .or_default()
                .push(rule);
        }

        let mut icon_rules: Vec<IconRule> = icon_rules.into_iter().collect();
        // Stable sort: equal keys keep declaration order.
        icon_rules.sort_by(|a, b| {
            (!a.is_name_filtered(), &a.id).cmp(&(!b.is_name_filtered(), &b.id))
        });

        let mut icon_index: HashMap<BodyPartId, Vec<IconRule>> = HashMap::new();
        for rule in &icon_rules {
            for body_part in &rule.body_parts {
                if !body_parts.contains_body_part(body_part) {
                    tracing::debug!(
                        "icon rule {} names unknown body part {}, skipping",
                        rule.id,
                        body_part
                    );
                    continue;
                }
                icon_index
                    .entry(body_part.clone())
                    .or_default()
                    .push(rule.clone());
            }
        }

        tracing::debug!(
            "rule index built: {} source textures, {} body parts, {} icon rules",
            texture_index.len(),
            icon_index.len(),
            icon_rules.len()
        );

        Self {
            texture_index,
            icon_index,
            icon_rules,
        }
    }

    /// Texture rules for `source_texture`, in declaration order.
    pub fn texture_candidates(&self, source_texture: &str) -> &[TextureRule] {
        self.texture_index
            .get(source_texture)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Icon rules for `body_part`, in sort order.
    pub fn icon_candidates(&self, body_part: &BodyPartId) -> &[IconRule] {
        self.icon_index
            .get(body_part)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Icon rules that name a target part, in sort order.
    pub fn direct_rules(&self) -> impl Iterator<Item = &IconRule> {
        self.icon_rules.iter().filter(|rule| rule.target_part.is_some())
    }

    /// All icon rules in sort order.
    pub fn icon_rules(&self) -> &[IconRule] {
        &self.icon_rules
    }

    pub fn source_texture_count(&self) -> usize {
        self.texture_index.len()
    }

    pub fn body_part_count(&self) -> usize {
        self.icon_index.len()
    }

    pub fn texture_rule_count(&self) -> usize {
        self.texture_index.values().map(Vec::len).sum()
    }
}
