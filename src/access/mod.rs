//! Access Gate: maps an authenticated caller's role and assigned scope to
//! the hierarchy subtrees it may reach. Purely advisory — it holds no state
//! of its own and never mutates data. Credentials are resolved upstream;
//! the gate only ever sees `(role, scope)`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{wrong_kind, CoreError};
use crate::store::models::AdminRole;
use crate::store::models::{Barangay, Household, Resident, Zone};
use crate::store::{EntityKind, HierarchyStore};

/// The hierarchy node(s) a caller's account is assigned to. Which fields
/// are set depends on the role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallerScope {
    pub municipality_id: Option<Uuid>,
    pub barangay_id: Option<Uuid>,
    pub zone_id: Option<Uuid>,
    pub household_id: Option<Uuid>,
    pub resident_id: Option<Uuid>,
}

impl CallerScope {
    pub fn unscoped() -> Self {
        Self::default()
    }

    pub fn for_municipality(municipality_id: Uuid) -> Self {
        Self {
            municipality_id: Some(municipality_id),
            ..Self::default()
        }
    }

    pub fn for_barangay(barangay_id: Uuid) -> Self {
        Self {
            barangay_id: Some(barangay_id),
            ..Self::default()
        }
    }

    pub fn for_resident(resident_id: Uuid, household_id: Uuid) -> Self {
        Self {
            resident_id: Some(resident_id),
            household_id: Some(household_id),
            ..Self::default()
        }
    }
}

/// Root of the subtree a request wants to reach. `System` covers the
/// cross-cutting system-wide views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SubtreeRoot {
    System,
    Municipality(Uuid),
    Barangay(Uuid),
    Zone(Uuid),
    Household(Uuid),
    Resident(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    Read,
    Write,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    OutOfScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny { reason: DenyReason },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

const fn deny() -> Decision {
    Decision::Deny {
        reason: DenyReason::OutOfScope,
    }
}

/// Entry view for a role after successful authentication. On an
/// out-of-scope request the UI redirects here instead of showing a raw
/// authorization error.
pub fn entry_view(role: AdminRole) -> &'static str {
    match role {
        AdminRole::SuperAdmin => "/dashboard",
        AdminRole::MunicipalityAdmin => "/municipality/dashboard",
        AdminRole::BarangayAdmin => "/barangay/dashboard",
        AdminRole::Resident => "/portal",
    }
}

pub fn redirect_on_denial(role: AdminRole) -> &'static str {
    entry_view(role)
}

pub struct AccessGate {
    store: Arc<dyn HierarchyStore>,
}

impl AccessGate {
    pub fn new(store: Arc<dyn HierarchyStore>) -> Self {
        Self { store }
    }

    /// Decides whether a caller may reach the requested subtree.
    /// SuperAdmin reaches everything; MunicipalityAdmin and BarangayAdmin
    /// reach only the subtree rooted at their assigned node; Resident has
    /// read-only reach over its own resident/household records.
    pub async fn authorize(
        &self,
        role: AdminRole,
        scope: &CallerScope,
        root: SubtreeRoot,
        mode: AccessMode,
    ) -> Result<Decision, CoreError> {
        match role {
            AdminRole::SuperAdmin => Ok(Decision::Allow),

            AdminRole::MunicipalityAdmin => {
                let Some(assigned) = scope.municipality_id else {
                    return Ok(deny());
                };
                let root_municipality = self.municipality_of(root).await?;
                Ok(match root_municipality {
                    Some(m) if m == assigned => Decision::Allow,
                    _ => deny(),
                })
            }

            AdminRole::BarangayAdmin => {
                let Some(assigned) = scope.barangay_id else {
                    return Ok(deny());
                };
                let root_barangay = self.barangay_of(root).await?;
                Ok(match root_barangay {
                    Some(b) if b == assigned => Decision::Allow,
                    _ => deny(),
                })
            }

            AdminRole::Resident => {
                if mode == AccessMode::Write {
                    return Ok(deny());
                }
                Ok(match root {
                    SubtreeRoot::Resident(id) if scope.resident_id == Some(id) => Decision::Allow,
                    SubtreeRoot::Household(id) if scope.household_id == Some(id) => {
                        Decision::Allow
                    }
                    _ => deny(),
                })
            }
        }
    }

    /// The municipality a subtree root sits under, resolved through the
    /// store. `None` for the system-wide root. Residents carry their chain
    /// denormalized and the Integrity Guard keeps it consistent, so one
    /// lookup suffices there.
    async fn municipality_of(&self, root: SubtreeRoot) -> Result<Option<Uuid>, CoreError> {
        Ok(match root {
            SubtreeRoot::System => None,
            SubtreeRoot::Municipality(id) => Some(id),
            SubtreeRoot::Barangay(id) => Some(self.barangay(id).await?.municipality_id),
            SubtreeRoot::Zone(id) => {
                let zone = self.zone(id).await?;
                Some(self.barangay(zone.barangay_id).await?.municipality_id)
            }
            SubtreeRoot::Household(id) => {
                let household = self.household(id).await?;
                let zone = self.zone(household.zone_id).await?;
                Some(self.barangay(zone.barangay_id).await?.municipality_id)
            }
            SubtreeRoot::Resident(id) => Some(self.resident(id).await?.municipality_id),
        })
    }

    /// The barangay a subtree root sits under. `None` for roots at or
    /// above the municipality level — those are out of any barangay scope.
    async fn barangay_of(&self, root: SubtreeRoot) -> Result<Option<Uuid>, CoreError> {
        Ok(match root {
            SubtreeRoot::System | SubtreeRoot::Municipality(_) => None,
            SubtreeRoot::Barangay(id) => Some(id),
            SubtreeRoot::Zone(id) => Some(self.zone(id).await?.barangay_id),
            SubtreeRoot::Household(id) => {
                let household = self.household(id).await?;
                Some(self.zone(household.zone_id).await?.barangay_id)
            }
            SubtreeRoot::Resident(id) => Some(self.resident(id).await?.barangay_id),
        })
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
