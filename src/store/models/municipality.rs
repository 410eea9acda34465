use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top of the administrative hierarchy. Owns barangays and the admin
/// accounts scoped to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub region: String,
    pub province: String,
}
