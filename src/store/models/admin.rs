use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Administrator roles, from widest to narrowest reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    MunicipalityAdmin,
    BarangayAdmin,
    Resident,
}

/// An administrator account attached to a hierarchy level. The scope
/// references say which subtree the account is assigned to; which of them
/// are set depends on the role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: Uuid,
    pub username: String,
    pub role: AdminRole,
    pub municipality_id: Option<Uuid>,
    pub barangay_id: Option<Uuid>,
    pub zone_id: Option<Uuid>,
    /// None means never locked out. A set timestamp locks the account out
    /// until that instant passes.
    pub lockout_end: Option<DateTime<Utc>>,
}

impl AdminAccount {
    /// Active means no lockout, or a lockout strictly in the past. At the
    /// exact boundary (`lockout_end == now`) the lockout is still in force.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.lockout_end {
            None => true,
            Some(end) => end < now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn account(lockout_end: Option<DateTime<Utc>>) -> AdminAccount {
        AdminAccount {
            id: Uuid::new_v4(),
            username: "clerk".to_string(),
            role: AdminRole::BarangayAdmin,
            municipality_id: None,
            barangay_id: Some(Uuid::new_v4()),
            zone_id: None,
            lockout_end,
        }
    }

    #[test]
    fn no_lockout_is_active() {
        let now = Utc::now();
        assert!(account(None).is_active(now));
    }

    #[test]
    fn lockout_boundary_is_still_locked() {
        let now = Utc::now();
        assert!(account(Some(now - Duration::seconds(1))).is_active(now));
        assert!(!account(Some(now)).is_active(now));
        assert!(!account(Some(now + Duration::seconds(1))).is_active(now));
    }
}
