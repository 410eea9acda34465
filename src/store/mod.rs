//! Abstract access to the hierarchy collections. The core only ever talks
//! to this contract; the real records platform plugs its persistence in
//! behind it. Rows are addressed arena-style by `(EntityKind, Uuid)` and
//! navigation goes through `get`/`list_children` rather than in-memory
//! object graphs.

pub mod memory;
pub mod models;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use self::models::{AdminAccount, Barangay, Household, Municipality, Resident, Zone};

/// Discriminant for the six entity collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Municipality,
    Barangay,
    Zone,
    Household,
    Resident,
    Admin,
}

impl EntityKind {
    /// Direct dependent collections that block deletion of a node of this
    /// kind. One uniform policy for every hierarchy edge: any live child
    /// blocks, nothing cascades.
    pub fn dependent_kinds(self) -> &'static [EntityKind] {
        match self {
            EntityKind::Municipality => &[EntityKind::Barangay, EntityKind::Admin],
            EntityKind::Barangay => &[EntityKind::Zone, EntityKind::Admin],
            EntityKind::Zone => &[EntityKind::Household],
            EntityKind::Household => &[EntityKind::Resident],
            EntityKind::Resident | EntityKind::Admin => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Municipality => "municipality",
            EntityKind::Barangay => "barangay",
            EntityKind::Zone => "zone",
            EntityKind::Household => "household",
            EntityKind::Resident => "resident",
            EntityKind::Admin => "admin",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row in any of the six collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Municipality(Municipality),
    Barangay(Barangay),
    Zone(Zone),
    Household(Household),
    Resident(Resident),
    Admin(AdminAccount),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Municipality(_) => EntityKind::Municipality,
            Entity::Barangay(_) => EntityKind::Barangay,
            Entity::Zone(_) => EntityKind::Zone,
            Entity::Household(_) => EntityKind::Household,
            Entity::Resident(_) => EntityKind::Resident,
            Entity::Admin(_) => EntityKind::Admin,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Entity::Municipality(m) => m.id,
            Entity::Barangay(b) => b.id,
            Entity::Zone(z) => z.id,
            Entity::Household(h) => h.id,
            Entity::Resident(r) => r.id,
            Entity::Admin(a) => a.id,
        }
    }

    /// The id this row carries for an ancestor/owner of the given kind,
    /// when it carries one. Admin scope references count as parent links.
    pub fn parent_id(&self, kind: EntityKind) -> Option<Uuid> {
        match (self, kind) {
            (Entity::Barangay(b), EntityKind::Municipality) => Some(b.municipality_id),
            (Entity::Zone(z), EntityKind::Barangay) => Some(z.barangay_id),
            (Entity::Household(h), EntityKind::Zone) => Some(h.zone_id),
            (Entity::Resident(r), EntityKind::Household) => Some(r.household_id),
            (Entity::Resident(r), EntityKind::Zone) => Some(r.zone_id),
            (Entity::Resident(r), EntityKind::Barangay) => Some(r.barangay_id),
            (Entity::Resident(r), EntityKind::Municipality) => Some(r.municipality_id),
            (Entity::Admin(a), EntityKind::Municipality) => a.municipality_id,
            (Entity::Admin(a), EntityKind::Barangay) => a.barangay_id,
            (Entity::Admin(a), EntityKind::Zone) => a.zone_id,
            _ => None,
        }
    }

    /// Every parent reference this row carries, for existence validation on
    /// create. All of them are mandatory for hierarchy rows; admin scope
    /// references are included when set.
    pub fn parent_links(&self) -> Vec<(EntityKind, Uuid)> {
        let kinds: &[EntityKind] = match self {
            Entity::Municipality(_) => &[],
            Entity::Barangay(_) => &[EntityKind::Municipality],
            Entity::Zone(_) => &[EntityKind::Barangay],
            Entity::Household(_) => &[EntityKind::Zone],
            Entity::Resident(_) => &[
                EntityKind::Household,
                EntityKind::Zone,
                EntityKind::Barangay,
                EntityKind::Municipality,
            ],
            Entity::Admin(_) => &[EntityKind::Municipality, EntityKind::Barangay, EntityKind::Zone],
        };
        kinds
            .iter()
            .filter_map(|&k| self.parent_id(k).map(|id| (k, id)))
            .collect()
    }

    pub fn as_municipality(&self) -> Option<&Municipality> {
        match self {
            Entity::Municipality(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_barangay(&self) -> Option<&Barangay> {
        match self {
            Entity::Barangay(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_zone(&self) -> Option<&Zone> {
        match self {
            Entity::Zone(z) => Some(z),
            _ => None,
        }
    }

    pub fn as_household(&self) -> Option<&Household> {
        match self {
            Entity::Household(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_resident(&self) -> Option<&Resident> {
        match self {
            Entity::Resident(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_admin(&self) -> Option<&AdminAccount> {
        match self {
            Entity::Admin(a) => Some(a),
            _ => None,
        }
    }
}

/// Typed failures the store contract may return.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// One consistent read of every collection, taken for aggregation. Folding
/// over a snapshot can never double-count or miss a row relative to one
/// logical store state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchySnapshot {
    pub municipalities: Vec<Municipality>,
    pub barangays: Vec<Barangay>,
    pub zones: Vec<Zone>,
    pub households: Vec<Household>,
    pub residents: Vec<Resident>,
    pub admins: Vec<AdminAccount>,
}

/// Read/write access to the hierarchy collections. Implementations must
/// apply single-row writes atomically, re-check existence on delete, and
/// complete every call in bounded time (timeouts surface as
/// `StoreError::Unavailable`; the core never retries).
#[async_trait]
pub trait HierarchyStore: Send + Sync {
    async fn get(&self, kind: EntityKind, id: Uuid) -> Result<Entity, StoreError>;

    async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>, StoreError>;

    async fn list_children(
        &self,
        parent_kind: EntityKind,
        parent_id: Uuid,
        child_kind: EntityKind,
    ) -> Result<Vec<Entity>, StoreError>;

    async fn count_children(
        &self,
        parent_kind: EntityKind,
        parent_id: Uuid,
        child_kind: EntityKind,
    ) -> Result<u64, StoreError> {
        let children = self.list_children(parent_kind, parent_id, child_kind).await?;
        Ok(children.len() as u64)
    }

    async fn insert(&self, entity: Entity) -> Result<(), StoreError>;

    /// Replaces the row with the same `(kind, id)`.
    async fn update(&self, entity: Entity) -> Result<(), StoreError>;

    async fn delete(&self, kind: EntityKind, id: Uuid) -> Result<(), StoreError>;

    /// One consistent copy of all collections, where the backend supports
    /// it (a read transaction or a lock). Backends that cannot guarantee
    /// a true snapshot may return a best-effort read; callers tolerate
    /// bounded staleness but never a torn row.
    async fn snapshot(&self) -> Result<HierarchySnapshot, StoreError>;
}
