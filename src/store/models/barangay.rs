use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barangay {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub municipality_id: Uuid,
}
