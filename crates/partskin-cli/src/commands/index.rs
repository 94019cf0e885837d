//! CLI command for inspecting rule buckets

use anyhow::Context;
use partskin_core::id::BodyPartId;
use partskin_core::index::RuleIndex;
use std::path::Path;

pub fn execute(dir: &Path) -> anyhow::Result<()> {
    let loaded = partskin_data::load_catalog(dir)
        .with_context(|| format!("failed to load catalog from {}", dir.display()))?;

    let mut sources: Vec<&str> = Vec::new();
    for rule in &loaded.texture_rules {
        if !sources.contains(&rule.source_texture.as_str()) {
            sources.push(&rule.source_texture);
        }
    }

    let index = RuleIndex::build(
        loaded.texture_rules.iter().cloned(),
        loaded.icon_rules.iter().cloned(),
        &loaded.host,
    );

    println!("Texture buckets ({}):", index.source_texture_count());
    for source in sources {
        let ids: Vec<String> = index
            .texture_candidates(source)
            .iter()
            .map(|r| r.id.to_string())
            .collect();
        println!("  {source}: {}", ids.join(", "));
    }

    let mut body_parts: Vec<&BodyPartId> = Vec::new();
    for rule in index.icon_rules() {
        for body_part in &rule.body_parts {
            if !body_parts.contains(&body_part) {
                body_parts.push(body_part);
            }
        }
    }

    println!("Icon buckets ({}):", index.body_part_count());
    for body_part in body_parts {
        let bucket = index.icon_candidates(body_part);
        if bucket.is_empty() {
            println!("  {body_part}: (unknown body part, dropped)");
            continue;
        }
        let ids: Vec<String> = bucket.iter().map(|r| r.id.to_string()).collect();
        println!("  {body_part}: {}", ids.join(", "));
    }

    let direct: Vec<String> = index
        .direct_rules()
        .filter_map(|r| r.target_part.as_ref().map(|p| format!("{} -> {}", r.id, p)))
        .collect();
    if !direct.is_empty() {
        println!("Direct rules:");
        for line in direct {
            println!("  {line}");
        }
    }

    Ok(())
}
