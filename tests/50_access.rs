mod common;

use anyhow::Result;
use uuid::Uuid;

use lgu_registry::store::models::AdminRole;
use lgu_registry::store::{Entity, HierarchyStore};
use lgu_registry::{AccessGate, AccessMode, CallerScope, CoreError, Decision, SubtreeRoot};

#[tokio::test]
async fn super_admin_reaches_every_subtree() -> Result<()> {
    let fx = common::seed().await?;
    let gate = AccessGate::new(fx.store.clone());
    let scope = CallerScope::unscoped();

    for root in [
        SubtreeRoot::System,
        SubtreeRoot::Municipality(fx.ajuy),
        SubtreeRoot::Barangay(fx.adcadarao),
        SubtreeRoot::Zone(fx.zone1),
        SubtreeRoot::Household(fx.delgado_household),
        SubtreeRoot::Resident(fx.ramon),
    ] {
        for mode in [AccessMode::Read, AccessMode::Write] {
            let decision = gate
                .authorize(AdminRole::SuperAdmin, &scope, root, mode)
                .await?;
            assert!(decision.is_allowed(), "denied {:?} {:?}", root, mode);
        }
    }
    Ok(())
}

#[tokio::test]
async fn municipality_admin_is_confined_to_its_subtree() -> Result<()> {
    let fx = common::seed().await?;
    let gate = AccessGate::new(fx.store.clone());
    let scope = CallerScope::for_municipality(fx.ajuy);

    // Everything at or beneath the assigned municipality is reachable
    for root in [
        SubtreeRoot::Municipality(fx.ajuy),
        SubtreeRoot::Barangay(fx.adcadarao),
        SubtreeRoot::Zone(fx.zone2),
        SubtreeRoot::Household(fx.saldana_household),
        SubtreeRoot::Resident(fx.teresa),
    ] {
        let decision = gate
            .authorize(AdminRole::MunicipalityAdmin, &scope, root, AccessMode::Write)
            .await?;
        assert!(decision.is_allowed(), "denied {:?}", root);
    }

    // System-wide views are cross-cutting: denied
    let decision = gate
        .authorize(
            AdminRole::MunicipalityAdmin,
            &scope,
            SubtreeRoot::System,
            AccessMode::Read,
        )
        .await?;
    assert!(!decision.is_allowed());
    Ok(())
}

#[tokio::test]
async fn municipality_admin_cannot_cross_into_another_municipality() -> Result<()> {
    let fx = common::seed().await?;
    let store = fx.store.clone();

    let lemery = common::municipality("Lemery");
    let almenana = common::barangay("Almeñana", lemery.id);
    let lemery_id = lemery.id;
    let almenana_id = almenana.id;
    store.insert(Entity::Municipality(lemery)).await?;
    store.insert(Entity::Barangay(almenana)).await?;

    let gate = AccessGate::new(store);
    let scope = CallerScope::for_municipality(fx.ajuy);

    for root in [
        SubtreeRoot::Municipality(lemery_id),
        SubtreeRoot::Barangay(almenana_id),
    ] {
        let decision = gate
            .authorize(AdminRole::MunicipalityAdmin, &scope, root, AccessMode::Read)
            .await?;
        assert_eq!(
            decision,
            Decision::Deny {
                reason: lgu_registry::DenyReason::OutOfScope
            }
        );
    }
    Ok(())
}

#[tokio::test]
async fn barangay_admin_cannot_reach_above_its_barangay() -> Result<()> {
    let fx = common::seed().await?;
    let gate = AccessGate::new(fx.store.clone());
    let scope = CallerScope::for_barangay(fx.adcadarao);

    for root in [
        SubtreeRoot::Barangay(fx.adcadarao),
        SubtreeRoot::Zone(fx.zone1),
        SubtreeRoot::Household(fx.delgado_household),
        SubtreeRoot::Resident(fx.alma),
    ] {
        let decision = gate
            .authorize(AdminRole::BarangayAdmin, &scope, root, AccessMode::Write)
            .await?;
        assert!(decision.is_allowed(), "denied {:?}", root);
    }

    // The parent municipality and system views sit above its scope
    for root in [SubtreeRoot::Municipality(fx.ajuy), SubtreeRoot::System] {
        let decision = gate
            .authorize(AdminRole::BarangayAdmin, &scope, root, AccessMode::Read)
            .await?;
        assert!(!decision.is_allowed(), "allowed {:?}", root);
    }
    Ok(())
}

#[tokio::test]
async fn resident_reads_only_its_own_records() -> Result<()> {
    let fx = common::seed().await?;
    let gate = AccessGate::new(fx.store.clone());
    let scope = CallerScope::for_resident(fx.ramon, fx.delgado_household);

    for root in [
        SubtreeRoot::Resident(fx.ramon),
        SubtreeRoot::Household(fx.delgado_household),
    ] {
        let decision = gate
            .authorize(AdminRole::Resident, &scope, root, AccessMode::Read)
            .await?;
        assert!(decision.is_allowed(), "denied {:?}", root);

        // Read-only reach: writes are always denied
        let decision = gate
            .authorize(AdminRole::Resident, &scope, root, AccessMode::Write)
            .await?;
        assert!(!decision.is_allowed(), "write allowed {:?}", root);
    }

    // Someone else's records and wider subtrees are out of reach
    for root in [
        SubtreeRoot::Resident(fx.teresa),
        SubtreeRoot::Household(fx.saldana_household),
        SubtreeRoot::Zone(fx.zone1),
        SubtreeRoot::System,
    ] {
        let decision = gate
            .authorize(AdminRole::Resident, &scope, root, AccessMode::Read)
            .await?;
        assert!(!decision.is_allowed(), "allowed {:?}", root);
    }
    Ok(())
}

#[tokio::test]
async fn admin_without_an_assigned_scope_is_denied() -> Result<()> {
    let fx = common::seed().await?;
    let gate = AccessGate::new(fx.store.clone());

    let decision = gate
        .authorize(
            AdminRole::MunicipalityAdmin,
            &CallerScope::unscoped(),
            SubtreeRoot::Municipality(fx.ajuy),
            AccessMode::Read,
        )
        .await?;
    assert!(!decision.is_allowed());
    Ok(())
}

#[tokio::test]
async fn unknown_subtree_root_is_not_found() -> Result<()> {
    let fx = common::seed().await?;
    let gate = AccessGate::new(fx.store.clone());
    let scope = CallerScope::for_municipality(fx.ajuy);

    let err = gate
        .authorize(
            AdminRole::MunicipalityAdmin,
            &scope,
            SubtreeRoot::Barangay(Uuid::new_v4()),
            AccessMode::Read,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
    Ok(())
}
