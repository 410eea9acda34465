// Shared fixture: a small Iloilo-style hierarchy seeded into the in-memory
// store. Municipality "Ajuy" has one barangay "Adcadarao" with two zones;
// zone 1 holds two households with residents, zone 2 is empty.
#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use lgu_registry::store::memory::MemoryStore;
use lgu_registry::store::models::{
    AdminAccount, AdminRole, Barangay, Household, Municipality, Resident, Zone,
};
use lgu_registry::store::{Entity, HierarchyStore};

pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub ajuy: Uuid,
    pub adcadarao: Uuid,
    pub zone1: Uuid,
    pub zone2: Uuid,
    pub delgado_household: Uuid,
    pub saldana_household: Uuid,
    /// Head of the Delgado household.
    pub ramon: Uuid,
    pub alma: Uuid,
    /// Head of the Saldana household.
    pub teresa: Uuid,
    pub municipal_admin: Uuid,
    pub barangay_admin: Uuid,
}

pub fn municipality(name: &str) -> Municipality {
    Municipality {
        id: Uuid::new_v4(),
        name: name.to_string(),
        code: format!("06-{}", &name.to_lowercase()),
        region: "VI".to_string(),
        province: "Iloilo".to_string(),
    }
}

pub fn barangay(name: &str, municipality_id: Uuid) -> Barangay {
    Barangay {
        id: Uuid::new_v4(),
        name: name.to_string(),
        code: format!("06-brgy-{}", &name.to_lowercase()),
        municipality_id,
    }
}

pub fn zone(name: &str, barangay_id: Uuid) -> Zone {
    Zone {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        barangay_id,
    }
}

pub fn household(name: &str, zone_id: Uuid) -> Household {
    Household {
        id: Uuid::new_v4(),
        name: name.to_string(),
        zone_id,
    }
}

pub fn resident(
    first_name: &str,
    last_name: &str,
    household: &Household,
    chain: (&Zone, &Barangay),
    is_head: bool,
) -> Resident {
    let (zone, barangay) = chain;
    Resident {
        id: Uuid::new_v4(),
        first_name: first_name.to_string(),
        middle_name: None,
        last_name: last_name.to_string(),
        birthdate: NaiveDate::from_ymd_opt(1975, 3, 2).unwrap(),
        sex: "F".to_string(),
        civil_status: "married".to_string(),
        occupation: None,
        household_id: household.id,
        zone_id: zone.id,
        barangay_id: barangay.id,
        municipality_id: barangay.municipality_id,
        is_head,
        is_active: true,
    }
}

pub fn admin(
    username: &str,
    role: AdminRole,
    municipality_id: Option<Uuid>,
    barangay_id: Option<Uuid>,
    lockout_end: Option<DateTime<Utc>>,
) -> AdminAccount {
    AdminAccount {
        id: Uuid::new_v4(),
        username: username.to_string(),
        role,
        municipality_id,
        barangay_id,
        zone_id: None,
        lockout_end,
    }
}

/// Seeds the fixture directly through the store; payloads here are already
/// consistent, the integrity paths are what the suites exercise.
pub async fn seed() -> Result<Fixture> {
    let store = Arc::new(MemoryStore::new());

    let ajuy = municipality("Ajuy");
    let adcadarao = barangay("Adcadarao", ajuy.id);
    let z1 = zone("Zone 1", adcadarao.id);
    let z2 = zone("Zone 2", adcadarao.id);
    let delgado = household("Delgado residence", z1.id);
    let saldana = household("Saldana residence", z1.id);

    let ramon = resident("Ramon", "Delgado", &delgado, (&z1, &adcadarao), true);
    let alma = resident("Alma", "Delgado", &delgado, (&z1, &adcadarao), false);
    let teresa = resident("Teresa", "Saldana", &saldana, (&z1, &adcadarao), true);

    let municipal_admin = admin(
        "ajuy-admin",
        AdminRole::MunicipalityAdmin,
        Some(ajuy.id),
        None,
        None,
    );
    let barangay_admin = admin(
        "adcadarao-admin",
        AdminRole::BarangayAdmin,
        None,
        Some(adcadarao.id),
        None,
    );

    let fixture = Fixture {
        store: store.clone(),
        ajuy: ajuy.id,
        adcadarao: adcadarao.id,
        zone1: z1.id,
        zone2: z2.id,
        delgado_household: delgado.id,
        saldana_household: saldana.id,
        ramon: ramon.id,
        alma: alma.id,
        teresa: teresa.id,
        municipal_admin: municipal_admin.id,
        barangay_admin: barangay_admin.id,
    };

    store.insert(Entity::Municipality(ajuy)).await?;
    store.insert(Entity::Barangay(adcadarao)).await?;
    store.insert(Entity::Zone(z1)).await?;
    store.insert(Entity::Zone(z2)).await?;
    store.insert(Entity::Household(delgado)).await?;
    store.insert(Entity::Household(saldana)).await?;
    store.insert(Entity::Resident(ramon)).await?;
    store.insert(Entity::Resident(alma)).await?;
    store.insert(Entity::Resident(teresa)).await?;
    store.insert(Entity::Admin(municipal_admin)).await?;
    store.insert(Entity::Admin(barangay_admin)).await?;

    Ok(fixture)
}
