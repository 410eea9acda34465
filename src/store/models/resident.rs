use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Leaf of the hierarchy. Carries its full ancestor chain: `household_id`
/// and `zone_id` are structural, `barangay_id` and `municipality_id` are
/// denormalized for query convenience and must match the zone's ancestors
/// at time of write (the Integrity Guard enforces this).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub sex: String,
    pub civil_status: String,
    pub occupation: Option<String>,
    pub household_id: Uuid,
    pub zone_id: Uuid,
    pub barangay_id: Uuid,
    pub municipality_id: Uuid,
    /// At most one resident per household may carry this flag.
    pub is_head: bool,
    pub is_active: bool,
}
