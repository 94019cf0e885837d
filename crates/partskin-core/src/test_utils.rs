//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::catalog::{HostCatalog, HostCatalogBuilder};
use crate::graphic::{Color, GraphicData};
use crate::id::*;
use crate::part::{AddedEffect, OperationDefinition, PartDefinition};
use crate::rule::{IconRule, TextureRule};

// ===========================================================================
// Colors
// ===========================================================================

pub fn red() -> Color {
    Color::rgb(1.0, 0.0, 0.0)
}
pub fn blue() -> Color {
    Color::rgb(0.0, 0.0, 1.0)
}
pub fn steel() -> Color {
    Color::rgb(0.6, 0.6, 0.65)
}

// ===========================================================================
// Rule constructors
// ===========================================================================

/// Unfiltered texture rule recoloring `source` to `color`.
pub fn texture_rule(id: &str, source: &str, color: Color) -> TextureRule {
    TextureRule {
        id: RuleId::new(id),
        source_texture: source.to_string(),
        replacement_texture: format!("{source}_base"),
        name_contains: None,
        category: None,
        color,
        icon_color: Color::WHITE,
    }
}

pub fn texture_rule_named(id: &str, source: &str, name_contains: &str, color: Color) -> TextureRule {
    TextureRule {
        name_contains: Some(name_contains.to_string()),
        ..texture_rule(id, source, color)
    }
}

/// Unfiltered icon rule for the given body parts.
pub fn icon_rule(id: &str, body_parts: &[&str], texture: &str) -> IconRule {
    IconRule {
        id: RuleId::new(id),
        body_parts: body_parts.iter().map(|b| BodyPartId::new(*b)).collect(),
        target_part: None,
        name_contains: None,
        solid_only: false,
        soft_only: false,
        texture: texture.to_string(),
    }
}

pub fn icon_rule_named(id: &str, body_parts: &[&str], name_contains: &str, texture: &str) -> IconRule {
    IconRule {
        name_contains: Some(name_contains.to_string()),
        ..icon_rule(id, body_parts, texture)
    }
}

pub fn direct_icon_rule(id: &str, target: &str, texture: &str) -> IconRule {
    IconRule {
        target_part: Some(PartId::new(target)),
        ..icon_rule(id, &[], texture)
    }
}

// ===========================================================================
// Host definitions
// ===========================================================================

/// Overridable part drawn with `texture`.
pub fn overridable_part(id: &str, texture: &str) -> PartDefinition {
    let mut part = PartDefinition::new(id, Some(GraphicData::single(texture)));
    part.overridable = true;
    part
}

pub fn operation(id: &str, body_parts: &[&str], ingredients: &[&str]) -> OperationDefinition {
    OperationDefinition {
        id: OperationId::new(id),
        body_parts: body_parts.iter().map(|b| BodyPartId::new(*b)).collect(),
        ingredients: ingredients.iter().map(|p| PartId::new(*p)).collect(),
        added_effect: None,
    }
}

pub fn operation_with_effect(
    id: &str,
    body_parts: &[&str],
    ingredients: &[&str],
    solid: bool,
) -> OperationDefinition {
    OperationDefinition {
        added_effect: Some(AddedEffect { solid }),
        ..operation(id, body_parts, ingredients)
    }
}

// ===========================================================================
// Prosthetics fixture
// ===========================================================================

/// A small host catalog: a bionic arm, a bionic leg, a peg leg, a hook hand,
/// and a non-overridable wooden foot, with one install operation each.
pub fn prosthetics_catalog() -> HostCatalog {
    let mut b = HostCatalogBuilder::new();
    for body_part in ["Shoulder", "Leg", "Hand", "Foot"] {
        b.register_body_part(body_part);
    }

    b.register_part(overridable_part("BionicArm", "Things/Item/Bionic"))
        .register_part(overridable_part("BionicLeg", "Things/Item/Bionic"))
        .register_part(overridable_part("PegLeg", "Things/Item/Prosthetic"))
        .register_part(PartDefinition::new(
            "HookHand",
            Some(GraphicData::single("Things/Item/Prosthetic")),
        ))
        .register_part(PartDefinition::new(
            "WoodenFoot",
            Some(GraphicData::single("Things/Item/Prosthetic")),
        ));

    b.register_operation(operation_with_effect(
        "InstallBionicArm",
        &["Shoulder"],
        &["BionicArm"],
        true,
    ))
    .register_operation(operation_with_effect(
        "InstallBionicLeg",
        &["Leg"],
        &["BionicLeg"],
        true,
    ))
    .register_operation(operation_with_effect(
        "InstallPegLeg",
        &["Leg"],
        &["PegLeg"],
        false,
    ))
    .register_operation(operation("InstallWoodenFoot", &["Foot"], &["WoodenFoot"]));

    b.build().expect("prosthetics fixture has unique ids")
}

/// Texture rules matching [`prosthetics_catalog`].
pub fn prosthetics_texture_rules() -> Vec<TextureRule> {
    vec![
        texture_rule_named("BionicLegTint", "Things/Item/Bionic", "Leg", blue()),
        texture_rule("BionicTint", "Things/Item/Bionic", steel()),
        texture_rule("ProstheticTint", "Things/Item/Prosthetic", red()),
    ]
}

/// Icon rules matching [`prosthetics_catalog`].
pub fn prosthetics_icon_rules() -> Vec<IconRule> {
    let mut solid_leg = icon_rule("LegSolid", &["Leg"], "Icons/LegSolid");
    solid_leg.solid_only = true;
    let mut soft_leg = icon_rule("LegSoft", &["Leg"], "Icons/LegSoft");
    soft_leg.soft_only = true;

    vec![
        icon_rule("Arm", &["Shoulder"], "Icons/Arm"),
        solid_leg,
        soft_leg,
        icon_rule("Foot", &["Foot"], "Icons/Foot"),
        direct_icon_rule("Hook", "HookHand", "Icons/Hook"),
    ]
}
