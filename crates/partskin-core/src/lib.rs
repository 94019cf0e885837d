//! Partskin Core -- rule resolution for part icon overrides.
//!
//! Given rule catalogs and a host's part, body-part, and operation catalogs,
//! this crate decides which icon texture and color each part should be drawn
//! with. The host owns rendering; this crate only fills in graphic
//! descriptors and calls a host hook to initialize them.
//!
//! # Resolution Pipeline
//!
//! A run is built from scratch and proceeds in four steps:
//!
//! 1. **Index** -- [`index::RuleIndex::build`] buckets texture rules by source
//!    texture and icon rules by body part.
//! 2. **Direct pass** -- icon rules naming a target part resolve that part
//!    through [`engine::ResolutionEngine::resolve_direct`].
//! 3. **Operation pass** -- every (operation, body part, ingredient) triple
//!    goes through [`engine::ResolutionEngine::resolve_via_operation`].
//! 4. **Apply** -- [`apply::OverrideApplier`] writes each override into its
//!    part and calls the [`graphic::GraphicInit`] hook.
//!
//! Each part is resolved at most once per run; [`scan::ProcessedSet`] is the
//! caller-owned record of which parts are done.
//!
//! ```rust,ignore
//! let index = RuleIndex::build(texture_rules, icon_rules, &catalog);
//! let scanner = Scanner::new(ResolutionEngine::new(&index));
//! let report = scanner.scan(&catalog, catalog.operations(), &mut ProcessedSet::new());
//! OverrideApplier::new(PassthroughInit).apply_all(&mut catalog, &report.resolutions)?;
//! ```
//!
//! # Key Types
//!
//! - [`index::RuleIndex`] -- Immutable texture and icon lookup tables.
//! - [`engine::ResolutionEngine`] -- Stateless two-phase matcher.
//! - [`engine::Override`] -- Resolved icon texture, color, and optional
//!   color rule.
//! - [`scan::Scanner`] -- Orchestrates the direct and operation passes.
//! - [`catalog::HostCatalog`] -- Frozen registry of parts, body parts, and
//!   operations.

pub mod apply;
pub mod catalog;
pub mod engine;
pub mod graphic;
pub mod id;
pub mod index;
pub mod part;
pub mod rule;
pub mod scan;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
