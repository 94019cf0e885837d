//! CLI command for a full resolution run

use anyhow::Context;
use partskin_core::apply::OverrideApplier;
use partskin_core::catalog::PartLookup;
use partskin_core::engine::ResolutionEngine;
use partskin_core::graphic::PassthroughInit;
use partskin_core::index::RuleIndex;
use partskin_core::part::PartDefinition;
use partskin_core::scan::{ProcessedSet, ResolutionSource, ScanReport, Scanner};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ResolveOutput<'a> {
    report: &'a ScanReport,
    parts: Vec<&'a PartDefinition>,
}

pub fn execute(dir: &Path, json: bool) -> anyhow::Result<()> {
    let mut loaded = partskin_data::load_catalog(dir)
        .with_context(|| format!("failed to load catalog from {}", dir.display()))?;

    let index = RuleIndex::build(
        loaded.texture_rules.drain(..),
        loaded.icon_rules.drain(..),
        &loaded.host,
    );
    let scanner = Scanner::new(ResolutionEngine::new(&index));
    let mut processed = ProcessedSet::new();
    let report = scanner.scan(&loaded.host, loaded.host.operations(), &mut processed);

    // PassthroughInit cannot fail.
    let applied = OverrideApplier::new(PassthroughInit)
        .apply_all(&mut loaded.host, &report.resolutions)
        .unwrap_or_else(|never| match never {});
    tracing::info!("applied {} overrides to {}", applied, dir.display());

    if json {
        let output = ResolveOutput {
            report: &report,
            parts: report
                .resolutions
                .iter()
                .filter_map(|r| loaded.host.part(&r.part))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for resolution in &report.resolutions {
        let via = match &resolution.source {
            ResolutionSource::Direct { rule } => format!("direct ({rule})"),
            ResolutionSource::Operation {
                operation,
                body_part,
            } => format!("{operation} on {body_part}"),
        };
        let color = &resolution.resolved.color;
        let rule = resolution
            .resolved
            .color_rule
            .as_ref()
            .map_or_else(|| "-".to_string(), |r| r.id.to_string());
        println!(
            "{:<24} {:<32} rgba({:.2}, {:.2}, {:.2}, {:.2})  rule {:<20} via {}",
            resolution.part,
            resolution.resolved.texture_path,
            color.r,
            color.g,
            color.b,
            color.a,
            rule,
            via
        );
    }

    println!();
    println!(
        "{} overrides applied ({} already processed, {} unknown, {} unmatched)",
        applied, report.already_processed, report.unknown_parts, report.unmatched
    );

    Ok(())
}
