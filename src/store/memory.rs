//! Reference in-memory store. Backs the test suites and the demo binary,
//! and documents the write-isolation and snapshot semantics the core
//! expects from a real backend.

use std::collections::HashMap;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::{Entity, EntityKind, HierarchySnapshot, HierarchyStore, StoreError};
use async_trait::async_trait;

/// Arena of rows keyed by `(kind, id)` behind a single `RwLock`. Writes
/// take the write guard, so per-row updates are atomic and isolated;
/// `snapshot` clones every collection under one read guard, so aggregation
/// always sees one logical store state.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<(EntityKind, Uuid), Entity>>,
    fail_next: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next store call fail with the given error. Used by tests
    /// to exercise the `Unavailable` propagation path.
    pub async fn fail_next_call(&self, err: StoreError) {
        *self.fail_next.lock().await = Some(err);
    }

    async fn take_injected_failure(&self) -> Option<StoreError> {
        self.fail_next.lock().await.take()
    }
}

#[async_trait]
impl HierarchyStore for MemoryStore {
    async fn get(&self, kind: EntityKind, id: Uuid) -> Result<Entity, StoreError> {
        if let Some(err) = self.take_injected_failure().await {
            return Err(err);
        }
        let rows = self.rows.read().await;
        rows.get(&(kind, id))
            .cloned()
            .ok_or(StoreError::NotFound { kind, id })
    }

    async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>, StoreError> {
        if let Some(err) = self.take_injected_failure().await {
            return Err(err);
        }
        let rows = self.rows.read().await;
        let mut out: Vec<Entity> = rows
            .values()
            .filter(|e| e.kind() == kind)
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary; keep results stable
        out.sort_by_key(Entity::id);
        Ok(out)
    }

    async fn list_children(
        &self,
        parent_kind: EntityKind,
        parent_id: Uuid,
        child_kind: EntityKind,
    ) -> Result<Vec<Entity>, StoreError> {
        if let Some(err) = self.take_injected_failure().await {
            return Err(err);
        }
        let rows = self.rows.read().await;
        let mut out: Vec<Entity> = rows
            .values()
            .filter(|e| e.kind() == child_kind && e.parent_id(parent_kind) == Some(parent_id))
            .cloned()
            .collect();
        out.sort_by_key(Entity::id);
        Ok(out)
    }

    async fn insert(&self, entity: Entity) -> Result<(), StoreError> {
        if let Some(err) = self.take_injected_failure().await {
            return Err(err);
        }
        let key = (entity.kind(), entity.id());
        let mut rows = self.rows.write().await;
        if rows.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "{} already exists: {}",
                key.0, key.1
            )));
        }
        debug!(kind = %key.0, id = %key.1, "row inserted");
        rows.insert(key, entity);
        Ok(())
    }

    async fn update(&self, entity: Entity) -> Result<(), StoreError> {
        if let Some(err) = self.take_injected_failure().await {
            return Err(err);
        }
        let key = (entity.kind(), entity.id());
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&key) {
            return Err(StoreError::NotFound {
                kind: key.0,
                id: key.1,
            });
        }
        rows.insert(key, entity);
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: Uuid) -> Result<(), StoreError> {
        if let Some(err) = self.take_injected_failure().await {
            return Err(err);
        }
        let mut rows = self.rows.write().await;
        match rows.remove(&(kind, id)) {
            Some(_) => {
                debug!(%kind, %id, "row removed");
                Ok(())
            }
            None => Err(StoreError::NotFound { kind, id }),
        }
    }

    async fn snapshot(&self) -> Result<HierarchySnapshot, StoreError> {
        if let Some(err) = self.take_injected_failure().await {
            return Err(err);
        }
        let rows = self.rows.read().await;
        let mut snap = HierarchySnapshot::default();
        for entity in rows.values() {
            match entity {
                Entity::Municipality(m) => snap.municipalities.push(m.clone()),
                Entity::Barangay(b) => snap.barangays.push(b.clone()),
                Entity::Zone(z) => snap.zones.push(z.clone()),
                Entity::Household(h) => snap.households.push(h.clone()),
                Entity::Resident(r) => snap.residents.push(r.clone()),
                Entity::Admin(a) => snap.admins.push(a.clone()),
            }
        }
        snap.municipalities.sort_by_key(|m| m.id);
        snap.barangays.sort_by_key(|b| b.id);
        snap.zones.sort_by_key(|z| z.id);
        snap.households.sort_by_key(|h| h.id);
        snap.residents.sort_by_key(|r| r.id);
        snap.admins.sort_by_key(|a| a.id);
        debug!(
            municipalities = snap.municipalities.len(),
            barangays = snap.barangays.len(),
            zones = snap.zones.len(),
            households = snap.households.len(),
            residents = snap.residents.len(),
            admins = snap.admins.len(),
            "snapshot taken"
        );
        Ok(snap)
    }
}
