//! Integrity Guard: gates every deletion and re-parenting mutation against
//! the hierarchy invariants. Deletion is blocked while any direct dependent
//! collection is non-empty — one uniform rule for every edge, never a
//! cascade. Resident writes keep the single-head-per-household rule and the
//! denormalized ancestor chain consistent.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{wrong_kind, CoreError};
use crate::store::models::{Barangay, Household, Resident, Zone};
use crate::store::{Entity, EntityKind, HierarchyStore};

/// Outcome of a delete pre-check. `blocking` names every non-empty
/// dependent collection with its row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteCheck {
    pub allowed: bool,
    pub blocking: Vec<(EntityKind, u64)>,
}

pub struct IntegrityGuard {
    store: Arc<dyn HierarchyStore>,
}

impl IntegrityGuard {
    pub fn new(store: Arc<dyn HierarchyStore>) -> Self {
        Self { store }
    }

    /// Loads the node's direct dependent collections and reports whether
    /// deletion would succeed. Fails with `NotFound` for an absent node.
    pub async fn can_delete(&self, kind: EntityKind, id: Uuid) -> Result<DeleteCheck, CoreError> {
        self.store.get(kind, id).await?;

        let mut blocking = Vec::new();
        for &child in kind.dependent_kinds() {
            let count = self.store.count_children(kind, id, child).await?;
            if count > 0 {
                blocking.push((child, count));
            }
        }

        Ok(DeleteCheck {
            allowed: blocking.is_empty(),
            blocking,
        })
    }

    /// Removes exactly one row, or fails with `DependencyConflict` naming
    /// the live children. No side effects beyond the single row.
    pub async fn delete(&self, kind: EntityKind, id: Uuid) -> Result<(), CoreError> {
        let check = self.can_delete(kind, id).await?;
        if !check.allowed {
            info!(%kind, %id, blocking = ?check.blocking, "delete blocked by dependents");
            return Err(CoreError::DependencyConflict {
                blocking: check.blocking,
            });
        }

        self.store.delete(kind, id).await?;
        info!(%kind, %id, "row deleted");
        Ok(())
    }

    /// Validates parent links and resident invariants, then persists a new
    /// row. Payload scalars are assumed pre-validated upstream.
    pub async fn create(&self, entity: Entity) -> Result<(), CoreError> {
        self.check_parent_links(&entity).await?;
        if let Entity::Resident(resident) = &entity {
            self.check_resident_chain(resident).await?;
            if resident.is_head {
                self.demote_other_heads(resident.household_id, resident.id)
                    .await?;
            }
        }
        self.store.insert(entity).await?;
        Ok(())
    }

    /// Replaces scalar fields on an existing row. Re-parenting is rejected;
    /// moving a node requires the explicit move operation.
    pub async fn update(&self, entity: Entity) -> Result<(), CoreError> {
        let existing = self.store.get(entity.kind(), entity.id()).await?;
        if existing.parent_links() != entity.parent_links() {
            return Err(CoreError::InvalidRelationship(
                "update may not re-parent a record; use the explicit move operation".to_string(),
            ));
        }
        if let Entity::Resident(resident) = &entity {
            if resident.is_head {
                self.demote_other_heads(resident.household_id, resident.id)
                    .await?;
            }
        }
        self.store.update(entity).await?;
        Ok(())
    }

    /// Atomically makes the named resident the household's sole head:
    /// clears `is_head` on every other member, sets it on the target.
    pub async fn set_household_head(
        &self,
        household_id: Uuid,
        resident_id: Uuid,
    ) -> Result<(), CoreError> {
        self.store.get(EntityKind::Household, household_id).await?;
        let resident = self.resident(resident_id).await?;

        if resident.household_id != household_id {
            return Err(CoreError::InvalidRelationship(format!(
                "resident {} does not belong to household {}",
                resident_id, household_id
            )));
        }

        self.demote_other_heads(household_id, resident_id).await?;

        if !resident.is_head {
            let mut promoted = resident;
            promoted.is_head = true;
            self.store.update(Entity::Resident(promoted)).await?;
        }

        info!(%household_id, %resident_id, "household head reassigned");
        Ok(())
    }

    /// The explicit re-parent operation: moves a household under a new
    /// zone and rewrites the denormalized ancestor chain of its residents.
    pub async fn move_household(
        &self,
        household_id: Uuid,
        new_zone_id: Uuid,
    ) -> Result<(), CoreError> {
        let mut household = self.household(household_id).await?;
        let zone = self.zone(new_zone_id).await?;
        let barangay = self.barangay(zone.barangay_id).await?;

        household.zone_id = new_zone_id;
        self.store.update(Entity::Household(household)).await?;

        let members = self
            .store
            .list_children(EntityKind::Household, household_id, EntityKind::Resident)
            .await?;
        for member in members {
            let Some(resident) = member.as_resident() else {
                continue;
            };
            let mut moved = resident.clone();
            moved.zone_id = new_zone_id;
            moved.barangay_id = zone.barangay_id;
            moved.municipality_id = barangay.municipality_id;
            self.store.update(Entity::Resident(moved)).await?;
        }

        info!(%household_id, %new_zone_id, "household moved");
        Ok(())
    }

    /// Every parent reference must point at an existing row of the right
    /// kind. Absent parents surface as `NotFound`.
    async fn check_parent_links(&self, entity: &Entity) -> Result<(), CoreError> {
        for (kind, parent_id) in entity.parent_links() {
            self.store.get(kind, parent_id).await?;
        }
        Ok(())
    }

    /// A resident's denormalized barangay/municipality ids must equal its
    /// zone's ancestor chain, and its zone must be the household's zone.
    async fn check_resident_chain(&self, resident: &Resident) -> Result<(), CoreError> {
        let household = self.household(resident.household_id).await?;
        if household.zone_id != resident.zone_id {
            return Err(CoreError::InvalidRelationship(format!(
                "resident zone {} does not match household zone {}",
                resident.zone_id, household.zone_id
            )));
        }

        let zone = self.zone(resident.zone_id).await?;
        if zone.barangay_id != resident.barangay_id {
            return Err(CoreError::InvalidRelationship(format!(
                "resident barangay {} does not match zone's barangay {}",
                resident.barangay_id, zone.barangay_id
            )));
        }

        let barangay = self.barangay(resident.barangay_id).await?;
        if barangay.municipality_id != resident.municipality_id {
            return Err(CoreError::InvalidRelationship(format!(
                "resident municipality {} does not match barangay's municipality {}",
                resident.municipality_id, barangay.municipality_id
            )));
        }

        Ok(())
    }

    async fn demote_other_heads(&self, household_id: Uuid, keep: Uuid) -> Result<(), CoreError> {
        let members = self
            .store
            .list_children(EntityKind::Household, household_id, EntityKind::Resident)
            .await?;
        for member in members {
            let Some(resident) = member.as_resident() else {
                continue;
            };
            if resident.id != keep && resident.is_head {
                let mut demoted = resident.clone();
                demoted.is_head = false;
                self.store.update(Entity::Resident(demoted)).await?;
            }
        }
        Ok(())
    }

    async fn barangay(&self, id: Uuid) -> Result<Barangay, CoreError> {
        let entity = self.store.get(EntityKind::Barangay, id).await?;
        entity
            .as_barangay()
            .cloned()
            .ok_or_else(|| wrong_kind(EntityKind::Barangay, id))
    }

    async fn zone(&self, id: Uuid) -> Result<Zone, CoreError> {
        let entity = self.store.get(EntityKind::Zone, id).await?;
        entity
            .as_zone()
            .cloned()
            .ok_or_else(|| wrong_kind(EntityKind::Zone, id))
    }

    async fn household(&self, id: Uuid) -> Result<Household, CoreError> {
        let entity = self.store.get(EntityKind::Household, id).await?;
        entity
            .as_household()
            .cloned()
            .ok_or_else(|| wrong_kind(EntityKind::Household, id))
    }

    async fn resident(&self, id: Uuid) -> Result<Resident, CoreError> {
        let entity = self.store.get(EntityKind::Resident, id).await?;
        entity
            .as_resident()
            .cloned()
            .ok_or_else(|| wrong_kind(EntityKind::Resident, id))
    }
}
