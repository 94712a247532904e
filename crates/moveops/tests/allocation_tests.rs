//! Integration tests for the resource allocation engine against the
//! in-memory repositories.

mod common;

use common::builders::{equipment, inactive_worker, vehicle, worker, JobBuilder, COMPANY};
use common::TestHarness;
use moveops::{DesiredResources, JobStatus, MoveOpsError, RepoError, ValidationError};

async fn seeded_job(h: &TestHarness) -> String {
    let stored = h
        .repos
        .jobs
        .insert(vec![JobBuilder::new("Quinn Harper")
            .status(JobStatus::Quote)
            .build()])
        .await
        .unwrap();
    stored[0].id.clone()
}

#[tokio::test]
async fn dolly_allocation_scenario() {
    // Job starts in Quote with nothing allocated; Dolly has 5 in the pool.
    let h = TestHarness::new();
    let job_id = seeded_job(&h).await;
    let dolly = h.repos.equipment.insert(vec![equipment("Dolly", 5)]).await.unwrap()[0]
        .id
        .clone();

    // Allocate 2 -> pool 3, one row with quantity 2.
    let desired = DesiredResources::new().with_equipment(dolly.clone(), 2);
    h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap();
    assert_eq!(h.pool_quantity(&dolly).await, 3);
    let rows = h.allocations_for(&job_id).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity_assigned, 2);
    let row_id = rows[0].id.clone();

    // Drop to 1 -> pool 4, same row updated in place.
    let desired = DesiredResources::new().with_equipment(dolly.clone(), 1);
    h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap();
    assert_eq!(h.pool_quantity(&dolly).await, 4);
    let rows = h.allocations_for(&job_id).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity_assigned, 1);
    assert_eq!(rows[0].id, row_id, "upsert keeps row identity stable");

    // Deselect -> pool back to 5, no rows left.
    h.allocation
        .reconcile(&job_id, COMPANY, &DesiredResources::new())
        .await
        .unwrap();
    assert_eq!(h.pool_quantity(&dolly).await, 5);
    assert!(h.allocations_for(&job_id).await.is_empty());
}

#[tokio::test]
async fn reconcile_is_idempotent() {
    let h = TestHarness::new();
    let job_id = seeded_job(&h).await;
    let dolly = h.repos.equipment.insert(vec![equipment("Dolly", 5)]).await.unwrap()[0]
        .id
        .clone();
    let ana = h.repos.workers.insert(vec![worker("Ana")]).await.unwrap()[0].id.clone();
    let truck = h.repos.vehicles.insert(vec![vehicle("Box Truck")]).await.unwrap()[0]
        .id
        .clone();

    let desired = DesiredResources::new()
        .with_workers([ana])
        .with_vehicles([truck])
        .with_equipment(dolly.clone(), 3);

    let first = h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap();
    assert!(!first.is_noop());
    assert_eq!(h.pool_quantity(&dolly).await, 2);

    let second = h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap();
    assert!(second.is_noop(), "same desired set must be a no-op: {:?}", second);
    assert_eq!(h.pool_quantity(&dolly).await, 2);
}

#[tokio::test]
async fn quantity_is_conserved_across_reconcile_sequences() {
    let h = TestHarness::new();
    let job_id = seeded_job(&h).await;
    let straps = h
        .repos
        .equipment
        .insert(vec![equipment("Straps", 10)])
        .await
        .unwrap()[0]
        .id
        .clone();

    let initial_pool = h.pool_quantity(&straps).await;
    for qty in [4, 1, 7, 2] {
        let desired = DesiredResources::new().with_equipment(straps.clone(), qty);
        h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap();
    }

    // Final allocated = 2, so the pool must be down by exactly 2.
    let rows = h.allocations_for(&job_id).await;
    assert_eq!(rows[0].quantity_assigned, 2);
    assert_eq!(h.pool_quantity(&straps).await, initial_pool - 2);
}

#[tokio::test]
async fn pool_may_go_negative_but_is_never_clamped() {
    let h = TestHarness::new();
    let job_id = seeded_job(&h).await;
    let blankets = h
        .repos
        .equipment
        .insert(vec![equipment("Blankets", 3)])
        .await
        .unwrap()[0]
        .id
        .clone();

    let desired = DesiredResources::new().with_equipment(blankets.clone(), 5);
    h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap();
    assert_eq!(h.pool_quantity(&blankets).await, -2);

    // Returning stock brings the visible mismatch back in line.
    h.allocation
        .reconcile(&job_id, COMPANY, &DesiredResources::new())
        .await
        .unwrap();
    assert_eq!(h.pool_quantity(&blankets).await, 3);
}

#[tokio::test]
async fn workers_and_vehicles_diff_minimally() {
    let h = TestHarness::new();
    let job_id = seeded_job(&h).await;
    let ana = h.repos.workers.insert(vec![worker("Ana")]).await.unwrap()[0].id.clone();
    let ben = h.repos.workers.insert(vec![worker("Ben")]).await.unwrap()[0].id.clone();
    let cam = h.repos.workers.insert(vec![worker("Cam")]).await.unwrap()[0].id.clone();

    let desired = DesiredResources::new().with_workers([ana.clone(), ben.clone()]);
    h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap();
    let rows = h.worker_assignments_for(&job_id).await;
    assert_eq!(rows.len(), 2);
    let ana_row_id = rows
        .iter()
        .find(|r| r.worker_id == ana)
        .map(|r| r.id.clone())
        .unwrap();

    // Swap Ben for Cam; Ana's row must survive untouched.
    let desired = DesiredResources::new().with_workers([ana.clone(), cam.clone()]);
    let summary = h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap();
    assert_eq!(summary.workers_added, 1);
    assert_eq!(summary.workers_removed, 1);

    let rows = h.worker_assignments_for(&job_id).await;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|r| r.id == ana_row_id));
    assert!(rows.iter().all(|r| r.worker_id != ben));
}

#[tokio::test]
async fn inactive_worker_is_rejected() {
    let h = TestHarness::new();
    let job_id = seeded_job(&h).await;
    let mia = h
        .repos
        .workers
        .insert(vec![inactive_worker("Mia")])
        .await
        .unwrap()[0]
        .id
        .clone();

    let desired = DesiredResources::new().with_workers([mia]);
    let err = h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap_err();
    assert!(matches!(
        err,
        MoveOpsError::Validation(ValidationError::InactiveWorker { .. })
    ));
    assert!(h.worker_assignments_for(&job_id).await.is_empty());
}

#[tokio::test]
async fn unknown_references_surface_not_found() {
    let h = TestHarness::new();
    let job_id = seeded_job(&h).await;

    let desired = DesiredResources::new().with_workers(["ghost-worker".to_string()]);
    let err = h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap_err();
    assert!(matches!(err, MoveOpsError::Repo(RepoError::NotFound { .. })));

    let desired = DesiredResources::new().with_equipment("ghost-equipment", 1);
    let err = h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap_err();
    assert!(matches!(err, MoveOpsError::Repo(RepoError::NotFound { .. })));

    let err = h
        .allocation
        .reconcile("ghost-job", COMPANY, &DesiredResources::new())
        .await
        .unwrap_err();
    assert!(matches!(err, MoveOpsError::Repo(RepoError::NotFound { .. })));
}

#[tokio::test]
async fn job_deletion_cascades_to_assignment_rows() {
    let h = TestHarness::new();
    let job_id = seeded_job(&h).await;
    let ana = h.repos.workers.insert(vec![worker("Ana")]).await.unwrap()[0].id.clone();
    let dolly = h.repos.equipment.insert(vec![equipment("Dolly", 5)]).await.unwrap()[0]
        .id
        .clone();

    let desired = DesiredResources::new()
        .with_workers([ana])
        .with_equipment(dolly, 2);
    h.allocation.reconcile(&job_id, COMPANY, &desired).await.unwrap();

    h.repos.delete_job(&job_id).await.unwrap();
    assert!(h.repos.jobs.get_by_id(&job_id).await.unwrap().is_none());
    assert!(h.worker_assignments_for(&job_id).await.is_empty());
    assert!(h.allocations_for(&job_id).await.is_empty());
}
