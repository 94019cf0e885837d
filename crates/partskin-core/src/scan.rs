//! One resolution pass over the host catalogs.
//!
//! The direct pass runs first and walks icon rules that name a target part.
//! The operation pass then walks every (operation, body part, ingredient)
//! triple in declaration order. A part that resolves in either pass is added
//! to the [`ProcessedSet`] and never considered again.

use crate::catalog::PartLookup;
use crate::engine::{Override, ResolutionEngine};
use crate::id::{BodyPartId, OperationId, PartId, RuleId};
use crate::part::OperationDefinition;
use serde::Serialize;
use std::collections::HashSet;

/// Parts that already received an override this run.
#[derive(Debug, Clone, Default)]
pub struct ProcessedSet {
    parts: HashSet<PartId>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, part: &PartId) -> bool {
        self.parts.contains(part)
    }

    /// Returns false if the part was already marked.
    pub fn mark(&mut self, part: PartId) -> bool {
        self.parts.insert(part)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Where a resolution came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionSource {
    Direct { rule: RuleId },
    Operation { operation: OperationId, body_part: BodyPartId },
}

/// A part paired with the override it resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub part: PartId,
    pub resolved: Override,
    pub source: ResolutionSource,
}

/// Outcome of [`Scanner::scan`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Resolutions in the order they were found.
    pub resolutions: Vec<Resolution>,
    /// Candidates skipped because the part was already processed.
    pub already_processed: usize,
    /// Candidates skipped because the part id is not in the catalog.
    pub unknown_parts: usize,
    /// Candidates that were looked up and did not match.
    pub unmatched: usize,
}

/// Drives a [`ResolutionEngine`] over direct rules and operations.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    engine: ResolutionEngine<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(engine: ResolutionEngine<'a>) -> Self {
        Self { engine }
    }

    /// Run both passes. `processed` is read and extended; parts already in it
    /// are skipped.
    pub fn scan<'o>(
        &self,
        parts: &impl PartLookup,
        operations: impl IntoIterator<Item = &'o OperationDefinition>,
        processed: &mut ProcessedSet,
    ) -> ScanReport {
        let mut report = ScanReport::default();
        self.scan_direct(parts, processed, &mut report);
        let direct = report.resolutions.len();
        self.scan_operations(parts, operations, processed, &mut report);

        tracing::info!(
            "override scan finished: {} direct, {} via operations, {} unmatched",
            direct,
            report.resolutions.len() - direct,
            report.unmatched
        );
        report
    }

    fn scan_direct(
        &self,
        parts: &impl PartLookup,
        processed: &mut ProcessedSet,
        report: &mut ScanReport,
    ) {
        for rule in self.engine.index().direct_rules() {
            let Some(target) = &rule.target_part else {
                continue;
            };
            let Some(part) = parts.part(target) else {
                tracing::debug!("icon rule {} targets unknown part {}", rule.id, target);
                report.unknown_parts += 1;
                continue;
            };
            if processed.contains(&part.id) {
                report.already_processed += 1;
                continue;
            }

            match self.engine.resolve_direct(part, &rule.texture) {
                Some(resolved) => {
                    tracing::debug!("{} resolved directly by icon rule {}", part.id, rule.id);
                    processed.mark(part.id.clone());
                    report.resolutions.push(Resolution {
                        part: part.id.clone(),
                        resolved,
                        source: ResolutionSource::Direct {
                            rule: rule.id.clone(),
                        },
                    });
                }
                None => report.unmatched += 1,
            }
        }
    }

    fn scan_operations<'o>(
        &self,
        parts: &impl PartLookup,
        operations: impl IntoIterator<Item = &'o OperationDefinition>,
        processed: &mut ProcessedSet,
        report: &mut ScanReport,
    ) {
        for operation in operations {
            for body_part in &operation.body_parts {
                for ingredient_id in &operation.ingredients {
                    if processed.contains(ingredient_id) {
                        report.already_processed += 1;
                        continue;
                    }
                    let Some(ingredient) = parts.part(ingredient_id) else {
                        report.unknown_parts += 1;
                        continue;
                    };

                    match self
                        .engine
                        .resolve_via_operation(operation, body_part, ingredient)
                    {
                        Some(resolved) => {
                            tracing::debug!(
                                "{} resolved via {} on {}",
                                ingredient.id,
                                operation.id,
                                body_part
                            );
                            processed.mark(ingredient.id.clone());
                            report.resolutions.push(Resolution {
                                part: ingredient.id.clone(),
                                resolved,
                                source: ResolutionSource::Operation {
                                    operation: operation.id.clone(),
                                    body_part: body_part.clone(),
                                },
                            });
                        }
                        None => report.unmatched += 1,
                    }
                }
            }
        }
    }
}
