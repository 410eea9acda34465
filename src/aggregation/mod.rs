//! Aggregation Engine: read-only roll-ups over the hierarchy. Every call
//! takes one store snapshot and folds it bottom-up with a single pass per
//! level, so the output is reproducible for a given row set and never mixes
//! two store states.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::CoreError;
use crate::store::models::AdminRole;
use crate::store::{HierarchySnapshot, HierarchyStore};

/// Admin account counts broken down by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminRoleCounts {
    pub super_admins: u64,
    pub municipality_admins: u64,
    pub barangay_admins: u64,
    pub residents: u64,
}

/// System-wide counts and averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub municipalities: u64,
    pub barangays: u64,
    pub zones: u64,
    pub households: u64,
    pub residents: u64,
    pub active_residents: u64,
    pub admins_by_role: AdminRoleCounts,
    pub active_admins: u64,
    pub inactive_admins: u64,
    /// residents / households, rounded to 2 decimals; 0 when there are no
    /// households.
    pub average_household_size: f64,
}

/// Roll-up for one municipality. Zone/household/resident counts are
/// transitive over all descendant barangays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MunicipalityStats {
    pub municipality_id: Uuid,
    pub name: String,
    pub barangays: u64,
    pub zones: u64,
    pub households: u64,
    pub residents: u64,
    pub average_household_size: f64,
    pub active_admins: u64,
    /// residents / land area, present only when the caller context supplied
    /// a land area for this municipality.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_density: Option<f64>,
}

/// Composed dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub system: SystemStats,
    pub municipalities: Vec<MunicipalityStats>,
    pub last_updated: DateTime<Utc>,
}

/// Caller-supplied inputs the store does not hold: land areas in square
/// kilometers, keyed by municipality id.
#[derive(Debug, Clone, Default)]
pub struct StatisticsContext {
    pub land_areas: HashMap<Uuid, f64>,
}

impl StatisticsContext {
    /// Loads a `{municipality_id: sq_km}` JSON map, the format the config's
    /// land-areas file uses.
    pub fn from_json_file(path: &Path) -> io::Result<Self> {
        let file = std::fs::File::open(path)?;
        let land_areas: HashMap<Uuid, f64> = serde_json::from_reader(file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self { land_areas })
    }
}

pub struct AggregationEngine {
    store: Arc<dyn HierarchyStore>,
    clock: Arc<dyn Clock>,
}

impl AggregationEngine {
    pub fn new(store: Arc<dyn HierarchyStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Counts across all collections plus admin activity states.
    pub async fn system_statistics(&self) -> Result<SystemStats, CoreError> {
        let snapshot = self.store.snapshot().await?;
        Ok(Self::fold_system(&snapshot, self.clock.now()))
    }

    /// One entry per municipality, ordered by ascending name for stable
    /// pagination.
    pub async fn municipality_statistics(
        &self,
        ctx: &StatisticsContext,
    ) -> Result<Vec<MunicipalityStats>, CoreError> {
        let snapshot = self.store.snapshot().await?;
        Ok(Self::fold_municipalities(&snapshot, ctx, self.clock.now()))
    }

    /// System and per-municipality statistics from a single snapshot and a
    /// single evaluation instant.
    pub async fn system_overview(&self, ctx: &StatisticsContext) -> Result<Overview, CoreError> {
        let snapshot = self.store.snapshot().await?;
        let now = self.clock.now();
        let overview = Overview {
            system: Self::fold_system(&snapshot, now),
            municipalities: Self::fold_municipalities(&snapshot, ctx, now),
            last_updated: now,
        };
        debug!(
            municipalities = overview.municipalities.len(),
            residents = overview.system.residents,
            "overview computed"
        );
        Ok(overview)
    }

    fn fold_system(snapshot: &HierarchySnapshot, now: DateTime<Utc>) -> SystemStats {
        let mut admins_by_role = AdminRoleCounts::default();
        let mut active_admins = 0u64;
        for admin in &snapshot.admins {
            match admin.role {
                AdminRole::SuperAdmin => admins_by_role.super_admins += 1,
                AdminRole::MunicipalityAdmin => admins_by_role.municipality_admins += 1,
                AdminRole::BarangayAdmin => admins_by_role.barangay_admins += 1,
                AdminRole::Resident => admins_by_role.residents += 1,
            }
            if admin.is_active(now) {
                active_admins += 1;
            }
        }

        let residents = snapshot.residents.len() as u64;
        let households = snapshot.households.len() as u64;

        SystemStats {
            municipalities: snapshot.municipalities.len() as u64,
            barangays: snapshot.barangays.len() as u64,
            zones: snapshot.zones.len() as u64,
            households,
            residents,
            active_residents: snapshot.residents.iter().filter(|r| r.is_active).count() as u64,
            admins_by_role,
            active_admins,
            inactive_admins: snapshot.admins.len() as u64 - active_admins,
            average_household_size: average_household_size(residents, households),
        }
    }

    fn fold_municipalities(
        snapshot: &HierarchySnapshot,
        ctx: &StatisticsContext,
        now: DateTime<Utc>,
    ) -> Vec<MunicipalityStats> {
        // One pass per level, bottom-up along the structural chain. The
        // denormalized resident columns are deliberately not used here so
        // top-down and bottom-up computation always agree.
        let muni_of_barangay: HashMap<Uuid, Uuid> = snapshot
            .barangays
            .iter()
            .map(|b| (b.id, b.municipality_id))
            .collect();
        let muni_of_zone: HashMap<Uuid, Uuid> = snapshot
            .zones
            .iter()
            .filter_map(|z| muni_of_barangay.get(&z.barangay_id).map(|&m| (z.id, m)))
            .collect();
        let muni_of_household: HashMap<Uuid, Uuid> = snapshot
            .households
            .iter()
            .filter_map(|h| muni_of_zone.get(&h.zone_id).map(|&m| (h.id, m)))
            .collect();

        #[derive(Default)]
        struct Tally {
            barangays: u64,
            zones: u64,
            households: u64,
            residents: u64,
            active_admins: u64,
        }
        let mut tallies: HashMap<Uuid, Tally> = HashMap::new();

        for barangay in &snapshot.barangays {
            tallies.entry(barangay.municipality_id).or_default().barangays += 1;
        }
        for zone in &snapshot.zones {
            if let Some(&m) = muni_of_barangay.get(&zone.barangay_id) {
                tallies.entry(m).or_default().zones += 1;
            }
        }
        for household in &snapshot.households {
            if let Some(&m) = muni_of_zone.get(&household.zone_id) {
                tallies.entry(m).or_default().households += 1;
            }
        }
        for resident in &snapshot.residents {
            if let Some(&m) = muni_of_household.get(&resident.household_id) {
                tallies.entry(m).or_default().residents += 1;
            }
        }
        for admin in &snapshot.admins {
            if !admin.is_active(now) {
                continue;
            }
            // Scope resolves under a municipality either directly or
            // through the assigned barangay
            let scoped_to = admin
                .municipality_id
                .or_else(|| admin.barangay_id.and_then(|b| muni_of_barangay.get(&b).copied()));
            if let Some(m) = scoped_to {
                tallies.entry(m).or_default().active_admins += 1;
            }
        }

        let mut stats: Vec<MunicipalityStats> = snapshot
            .municipalities
            .iter()
            .map(|m| {
                let tally = tallies.remove(&m.id).unwrap_or_default();
                let population_density = ctx
                    .land_areas
                    .get(&m.id)
                    .filter(|&&area| area > 0.0)
                    .map(|&area| tally.residents as f64 / area);
                MunicipalityStats {
                    municipality_id: m.id,
                    name: m.name.clone(),
                    barangays: tally.barangays,
                    zones: tally.zones,
                    households: tally.households,
                    residents: tally.residents,
                    average_household_size: average_household_size(
                        tally.residents,
                        tally.households,
                    ),
                    active_admins: tally.active_admins,
                    population_density,
                }
            })
            .collect();

        stats.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.municipality_id.cmp(&b.municipality_id))
        });
        stats
    }
}

/// residents / households rounded to 2 decimals; defined as 0 for an empty
/// household collection to avoid the division.
fn average_household_size(residents: u64, households: u64) -> f64 {
    if households == 0 {
        return 0.0;
    }
    round2(residents as f64 / households as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
