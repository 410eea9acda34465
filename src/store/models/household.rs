use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub id: Uuid,
    /// Display name, typically the head's family name.
    pub name: String,
    pub zone_id: Uuid,
}
