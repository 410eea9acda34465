//! Seeds a small demo hierarchy into the in-memory store and prints the
//! system overview as JSON. Handy for eyeballing the aggregation output
//! without wiring up a real backend.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use lgu_registry::store::memory::MemoryStore;
use lgu_registry::store::models::{
    AdminAccount, AdminRole, Barangay, Household, Municipality, Resident, Zone,
};
use lgu_registry::{AggregationEngine, Entity, IntegrityGuard, StatisticsContext, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so LGU_ENV and LGU_LAND_AREAS_FILE are picked up
    let _ = dotenvy::dotenv();

    let config = lgu_registry::config::config();
    let default_level = if config.stats.verbose_snapshots { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
    tracing::info!("Computing demo overview in {:?} mode", config.environment);

    let store = Arc::new(MemoryStore::new());
    let guard = IntegrityGuard::new(store.clone());
    let ajuy = seed_demo_hierarchy(&guard).await?;

    let mut ctx = match &config.stats.land_areas_file {
        Some(path) => StatisticsContext::from_json_file(path)?,
        None => StatisticsContext::default(),
    };
    // Ajuy's land area per the provincial land records, if not configured
    ctx.land_areas.entry(ajuy).or_insert(193.42);

    let engine = AggregationEngine::new(store, Arc::new(SystemClock));
    let overview = engine.system_overview(&ctx).await?;

    println!("{}", serde_json::to_string_pretty(&overview)?);
    Ok(())
}

/// One municipality, one barangay, two zones, two households, five
/// residents, three admin accounts. Returns the municipality id.
async fn seed_demo_hierarchy(guard: &IntegrityGuard) -> anyhow::Result<Uuid> {
    let ajuy = Municipality {
        id: Uuid::new_v4(),
        name: "Ajuy".to_string(),
        code: "063001".to_string(),
        region: "VI".to_string(),
        province: "Iloilo".to_string(),
    };
    let adcadarao = Barangay {
        id: Uuid::new_v4(),
        name: "Adcadarao".to_string(),
        code: "063001001".to_string(),
        municipality_id: ajuy.id,
    };
    let zone1 = Zone {
        id: Uuid::new_v4(),
        name: "Zone 1".to_string(),
        description: Some("Poblacion side".to_string()),
        barangay_id: adcadarao.id,
    };
    let zone2 = Zone {
        id: Uuid::new_v4(),
        name: "Zone 2".to_string(),
        description: None,
        barangay_id: adcadarao.id,
    };

    let municipality_id = ajuy.id;
    guard.create(Entity::Municipality(ajuy)).await?;
    guard.create(Entity::Barangay(adcadarao.clone())).await?;
    guard.create(Entity::Zone(zone1.clone())).await?;
    guard.create(Entity::Zone(zone2.clone())).await?;

    let families = [
        ("Delgado", &zone1, vec![("Ramon", true), ("Alma", false), ("Paolo", false)]),
        ("Saldana", &zone2, vec![("Teresa", true), ("Marco", false)]),
    ];
    for (family, zone, members) in families {
        let household = Household {
            id: Uuid::new_v4(),
            name: format!("{} residence", family),
            zone_id: zone.id,
        };
        let household_id = household.id;
        guard.create(Entity::Household(household)).await?;

        for (first, is_head) in members {
            guard
                .create(Entity::Resident(Resident {
                    id: Uuid::new_v4(),
                    first_name: first.to_string(),
                    middle_name: None,
                    last_name: family.to_string(),
                    birthdate: NaiveDate::from_ymd_opt(1980, 6, 15).unwrap(),
                    sex: "F".to_string(),
                    civil_status: "married".to_string(),
                    occupation: Some("farmer".to_string()),
                    household_id,
                    zone_id: zone.id,
                    barangay_id: zone.barangay_id,
                    municipality_id,
                    is_head,
                    is_active: true,
                }))
                .await?;
        }
    }

    let admins = [
        (AdminRole::SuperAdmin, None, None),
        (AdminRole::MunicipalityAdmin, Some(municipality_id), None),
        (AdminRole::BarangayAdmin, None, Some(adcadarao.id)),
    ];
    for (role, muni, brgy) in admins {
        guard
            .create(Entity::Admin(AdminAccount {
                id: Uuid::new_v4(),
                username: format!("demo-{:?}", role).to_lowercase(),
                role,
                municipality_id: muni,
                barangay_id: brgy,
                zone_id: None,
                lockout_end: None,
            }))
            .await?;
    }

    Ok(municipality_id)
}
