use crate::id::{BodyPartId, OperationId, PartId};
use crate::part::{OperationDefinition, PartDefinition};
use std::collections::{HashMap, HashSet};

/// Existence check over the host's body-part catalog.
pub trait BodyPartLookup {
    fn contains_body_part(&self, id: &BodyPartId) -> bool;
}

/// Lookup over the host's part catalog. Unknown ids resolve to `None`.
pub trait PartLookup {
    fn part(&self, id: &PartId) -> Option<&PartDefinition>;
}

impl BodyPartLookup for HashSet<BodyPartId> {
    fn contains_body_part(&self, id: &BodyPartId) -> bool {
        self.contains(id)
    }
}

/// Builder for constructing a frozen [`HostCatalog`].
/// Two-phase lifecycle: registration -> finalization.
#[derive(Debug, Default)]
pub struct HostCatalogBuilder {
    parts: Vec<PartDefinition>,
    part_index: HashMap<PartId, usize>,
    body_parts: Vec<BodyPartId>,
    operations: Vec<OperationDefinition>,
}

impl HostCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a part. Duplicates are reported by [`build`](Self::build).
    pub fn register_part(&mut self, part: PartDefinition) -> &mut Self {
        self.part_index
            .entry(part.id.clone())
            .or_insert(self.parts.len());
        self.parts.push(part);
        self
    }

    pub fn register_body_part(&mut self, id: impl Into<BodyPartId>) -> &mut Self {
        self.body_parts.push(id.into());
        self
    }

    /// Register an operation. Declaration order is the scan order.
    pub fn register_operation(&mut self, operation: OperationDefinition) -> &mut Self {
        self.operations.push(operation);
        self
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Finalize. Fails on duplicate part or operation ids; repeated body-part
    /// ids collapse silently.
    pub fn build(self) -> Result<HostCatalog, CatalogError> {
        if self.part_index.len() != self.parts.len() {
            let mut seen = HashSet::new();
            for part in &self.parts {
                if !seen.insert(&part.id) {
                    return Err(CatalogError::DuplicatePart(part.id.clone()));
                }
            }
        }

        let mut seen_ops = HashSet::new();
        for op in &self.operations {
            if !seen_ops.insert(&op.id) {
                return Err(CatalogError::DuplicateOperation(op.id.clone()));
            }
        }

        Ok(HostCatalog {
            parts: self.parts,
            part_index: self.part_index,
            body_parts: self.body_parts.into_iter().collect(),
            operations: self.operations,
        })
    }
}

/// Frozen host catalog. Part appearance fields stay writable through
/// [`part_mut`](Self::part_mut) for the override sink; everything else is
/// read-only.
#[derive(Debug)]
pub struct HostCatalog {
    parts: Vec<PartDefinition>,
    part_index: HashMap<PartId, usize>,
    body_parts: HashSet<BodyPartId>,
    operations: Vec<OperationDefinition>,
}

impl HostCatalog {
    pub fn part_mut(&mut self, id: &PartId) -> Option<&mut PartDefinition> {
        let index = *self.part_index.get(id)?;
        self.parts.get_mut(index)
    }

    pub fn parts(&self) -> impl Iterator<Item = &PartDefinition> {
        self.parts.iter()
    }

    pub fn operations(&self) -> &[OperationDefinition] {
        &self.operations
    }

    pub fn operation(&self, id: &OperationId) -> Option<&OperationDefinition> {
        self.operations.iter().find(|op| &op.id == id)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn body_part_count(&self) -> usize {
        self.body_parts.len()
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }
}

impl PartLookup for HostCatalog {
    fn part(&self, id: &PartId) -> Option<&PartDefinition> {
        self.part_index.get(id).and_then(|&i| self.parts.get(i))
    }
}

impl BodyPartLookup for HostCatalog {
    fn contains_body_part(&self, id: &BodyPartId) -> bool {
        self.body_parts.contains(id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate part: {0}")]
    DuplicatePart(PartId),
    #[error("duplicate operation: {0}")]
    DuplicateOperation(OperationId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphic::GraphicData;

    fn setup_builder() -> HostCatalogBuilder {
        let mut b = HostCatalogBuilder::new();
        b.register_body_part("Shoulder")
            .register_body_part("Leg")
            .register_part(PartDefinition::new(
                "BionicArm",
                Some(GraphicData::single("Things/Item/Bionic")),
            ))
            .register_part(PartDefinition::new("PegLeg", None))
            .register_operation(OperationDefinition {
                id: OperationId::new("InstallBionicArm"),
                body_parts: vec![BodyPartId::new("Shoulder")],
                ingredients: vec![PartId::new("BionicArm")],
                added_effect: None,
            });
        b
    }

    #[test]
    fn register_and_build() {
        let catalog = setup_builder().build().unwrap();
        assert_eq!(catalog.part_count(), 2);
        assert_eq!(catalog.body_part_count(), 2);
        assert_eq!(catalog.operation_count(), 1);
    }

    #[test]
    fn lookup_by_id() {
        let catalog = setup_builder().build().unwrap();
        assert!(catalog.part(&PartId::new("BionicArm")).is_some());
        assert!(catalog.part(&PartId::new("Nonexistent")).is_none());
        assert!(catalog.contains_body_part(&BodyPartId::new("Leg")));
        assert!(!catalog.contains_body_part(&BodyPartId::new("Tail")));
        assert!(
            catalog
                .operation(&OperationId::new("InstallBionicArm"))
                .is_some()
        );
    }

    #[test]
    fn part_mut_writes_through() {
        let mut catalog = setup_builder().build().unwrap();
        catalog
            .part_mut(&PartId::new("PegLeg"))
            .unwrap()
            .ui_icon = Some("Icons/Leg".to_string());
        let part = catalog.part(&PartId::new("PegLeg")).unwrap();
        assert_eq!(part.ui_icon.as_deref(), Some("Icons/Leg"));
        assert!(catalog.part_mut(&PartId::new("Nonexistent")).is_none());
    }

    #[test]
    fn duplicate_part_fails() {
        let mut b = setup_builder();
        b.register_part(PartDefinition::new("PegLeg", None));
        match b.build() {
            Err(CatalogError::DuplicatePart(id)) => {
                assert_eq!(id, PartId::new("PegLeg"));
                let msg = format!("{}", CatalogError::DuplicatePart(id));
                assert!(msg.contains("duplicate part"), "got: {msg}");
            }
            other => panic!("expected DuplicatePart, got: {other:?}"),
        }
    }

    #[test]
    fn duplicate_operation_fails() {
        let mut b = setup_builder();
        b.register_operation(OperationDefinition {
            id: OperationId::new("InstallBionicArm"),
            body_parts: vec![],
            ingredients: vec![],
            added_effect: None,
        });
        assert!(matches!(
            b.build(),
            Err(CatalogError::DuplicateOperation(_))
        ));
    }

    #[test]
    fn repeated_body_parts_collapse() {
        let mut b = setup_builder();
        b.register_body_part("Leg");
        let catalog = b.build().unwrap();
        assert_eq!(catalog.body_part_count(), 2);
    }

    #[test]
    fn empty_catalog_builds_successfully() {
        let catalog = HostCatalogBuilder::new().build().unwrap();
        assert_eq!(catalog.part_count(), 0);
        assert_eq!(catalog.body_part_count(), 0);
        assert_eq!(catalog.operation_count(), 0);
    }
}
