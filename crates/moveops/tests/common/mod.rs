//! Shared test harness and builders for integration tests.

#![allow(dead_code)]

pub mod builders;

use std::sync::Arc;

use moveops::notify::LogNotifier;
use moveops::{AllocationEngine, Filter, LifecycleEngine, Repositories};

/// Isolated in-memory environment wiring both engines to fresh repositories.
pub struct TestHarness {
    pub repos: Repositories,
    pub allocation: AllocationEngine,
    pub lifecycle: LifecycleEngine,
}

impl TestHarness {
    pub fn new() -> Self {
        let repos = Repositories::in_memory();
        let allocation = AllocationEngine::new(repos.clone());
        let lifecycle = LifecycleEngine::new(repos.jobs.clone(), Arc::new(LogNotifier));
        Self {
            repos,
            allocation,
            lifecycle,
        }
    }

    /// Current `total_quantity` of one equipment item.
    pub async fn pool_quantity(&self, equipment_id: &str) -> i64 {
        self.repos
            .equipment
            .get_by_id(equipment_id)
            .await
            .expect("equipment lookup")
            .expect("equipment exists")
            .total_quantity
    }

    /// All allocation rows for one job, in repository order.
    pub async fn allocations_for(
        &self,
        job_id: &str,
    ) -> Vec<moveops::JobEquipmentAllocation> {
        self.repos
            .equipment_allocations
            .list_by_filter(&Filter::new().eq("jobId", job_id))
            .await
            .expect("allocation listing")
    }

    pub async fn worker_assignments_for(
        &self,
        job_id: &str,
    ) -> Vec<moveops::JobWorkerAssignment> {
        self.repos
            .worker_assignments
            .list_by_filter(&Filter::new().eq("jobId", job_id))
            .await
            .expect("assignment listing")
    }

    pub async fn vehicle_assignments_for(
        &self,
        job_id: &str,
    ) -> Vec<moveops::JobVehicleAssignment> {
        self.repos
            .vehicle_assignments
            .list_by_filter(&Filter::new().eq("jobId", job_id))
            .await
            .expect("assignment listing")
    }
}
