//! Resource allocation engine.
//!
//! Reconciles the persisted worker/vehicle assignment rows and equipment
//! allocation rows of one job against a desired selection, and keeps each
//! equipment item's shared `total_quantity` pool consistent with the net
//! change. Workers and vehicles are presence-only; equipment carries a
//! quantity.
//!
//! Writes are issued sequentially and the first failure aborts the rest.
//! There is no multi-document rollback: a caller that sees a reconcile
//! error must treat the job's allocation state as unknown and re-read
//! before retrying.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, ValidationError};
use crate::model::{
    JobEquipmentAllocation, JobVehicleAssignment, JobWorkerAssignment, WorkerStatus,
};
use crate::repo::{require, Filter, Repositories};

/// The selection a job's resources should converge to.
///
/// Equipment selection is presence in the map; a quantity of zero is the
/// same as not selecting the item, so zero entries are normalized out at
/// the boundary and the minimum stored quantity is 1.
#[derive(Debug, Clone, Default)]
pub struct DesiredResources {
    pub worker_ids: BTreeSet<String>,
    pub vehicle_ids: BTreeSet<String>,
    equipment_qty: BTreeMap<String, u32>,
}

impl DesiredResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workers<I: IntoIterator<Item = String>>(mut self, ids: I) -> Self {
        self.worker_ids = ids.into_iter().collect();
        self
    }

    pub fn with_vehicles<I: IntoIterator<Item = String>>(mut self, ids: I) -> Self {
        self.vehicle_ids = ids.into_iter().collect();
        self
    }

    /// Sets the desired quantity for one equipment item. Zero deselects.
    pub fn set_equipment(&mut self, id: impl Into<String>, quantity: u32) {
        let id = id.into();
        if quantity == 0 {
            self.equipment_qty.remove(&id);
        } else {
            self.equipment_qty.insert(id, quantity);
        }
    }

    pub fn with_equipment(mut self, id: impl Into<String>, quantity: u32) -> Self {
        self.set_equipment(id, quantity);
        self
    }

    pub fn equipment_qty(&self) -> &BTreeMap<String, u32> {
        &self.equipment_qty
    }
}

/// What a reconcile pass actually changed. All-zero means the persisted
/// state already matched the desired selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub workers_added: usize,
    pub workers_removed: usize,
    pub vehicles_added: usize,
    pub vehicles_removed: usize,
    /// Net change in allocated quantity per equipment id (positive consumed
    /// stock, negative returned it).
    pub equipment_deltas: BTreeMap<String, i64>,
}

impl ReconcileSummary {
    pub fn is_noop(&self) -> bool {
        self.workers_added == 0
            && self.workers_removed == 0
            && self.vehicles_added == 0
            && self.vehicles_removed == 0
            && self.equipment_deltas.is_empty()
    }
}

/// Diffs desired resources against persisted rows and applies the changes.
pub struct AllocationEngine {
    repos: Repositories,
}

impl AllocationEngine {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Converges the job's persisted assignments and allocations to
    /// `desired`, adjusting the shared equipment pools by the net deltas.
    ///
    /// Idempotent: reconciling a selection equal to the persisted state
    /// performs zero writes and zero pool adjustments.
    pub async fn reconcile(
        &self,
        job_id: &str,
        company_id: &str,
        desired: &DesiredResources,
    ) -> Result<ReconcileSummary> {
        // The job must resolve before anything is written.
        require(self.repos.jobs.as_ref(), job_id).await?;

        let mut summary = ReconcileSummary::default();
        self.reconcile_workers(job_id, company_id, desired, &mut summary)
            .await?;
        self.reconcile_vehicles(job_id, company_id, desired, &mut summary)
            .await?;
        self.reconcile_equipment(job_id, company_id, desired, &mut summary)
            .await?;

        if summary.is_noop() {
            log::debug!("Reconcile for job {} was a no-op", job_id);
        } else {
            log::info!(
                "Reconciled job {}: +{}/-{} workers, +{}/-{} vehicles, {} equipment deltas",
                job_id,
                summary.workers_added,
                summary.workers_removed,
                summary.vehicles_added,
                summary.vehicles_removed,
                summary.equipment_deltas.len()
            );
        }
        Ok(summary)
    }

    async fn reconcile_workers(
        &self,
        job_id: &str,
        company_id: &str,
        desired: &DesiredResources,
        summary: &mut ReconcileSummary,
    ) -> Result<()> {
        let current = self
            .repos
            .worker_assignments
            .list_by_filter(&Filter::new().eq("jobId", job_id))
            .await?;
        let current_ids: BTreeSet<&str> = current.iter().map(|r| r.worker_id.as_str()).collect();

        let mut to_add = Vec::new();
        for worker_id in &desired.worker_ids {
            if current_ids.contains(worker_id.as_str()) {
                continue;
            }
            let worker = require(self.repos.workers.as_ref(), worker_id).await?;
            if worker.status != WorkerStatus::Active {
                return Err(ValidationError::InactiveWorker {
                    id: worker_id.clone(),
                }
                .into());
            }
            to_add.push(JobWorkerAssignment {
                company_id: company_id.to_string(),
                job_id: job_id.to_string(),
                worker_id: worker_id.clone(),
                ..Default::default()
            });
        }

        let to_remove: Vec<String> = current
            .iter()
            .filter(|r| !desired.worker_ids.contains(&r.worker_id))
            .map(|r| r.id.clone())
            .collect();

        summary.workers_added = to_add.len();
        summary.workers_removed = to_remove.len();
        if !to_add.is_empty() {
            self.repos.worker_assignments.insert(to_add).await?;
        }
        if !to_remove.is_empty() {
            self.repos.worker_assignments.delete_by_ids(&to_remove).await?;
        }
        Ok(())
    }

    async fn reconcile_vehicles(
        &self,
        job_id: &str,
        company_id: &str,
        desired: &DesiredResources,
        summary: &mut ReconcileSummary,
    ) -> Result<()> {
        let current = self
            .repos
            .vehicle_assignments
            .list_by_filter(&Filter::new().eq("jobId", job_id))
            .await?;
        let current_ids: BTreeSet<&str> = current.iter().map(|r| r.vehicle_id.as_str()).collect();

        let mut to_add = Vec::new();
        for vehicle_id in &desired.vehicle_ids {
            if current_ids.contains(vehicle_id.as_str()) {
                continue;
            }
            require(self.repos.vehicles.as_ref(), vehicle_id).await?;
            to_add.push(JobVehicleAssignment {
                company_id: company_id.to_string(),
                job_id: job_id.to_string(),
                vehicle_id: vehicle_id.clone(),
                ..Default::default()
            });
        }

        let to_remove: Vec<String> = current
            .iter()
            .filter(|r| !desired.vehicle_ids.contains(&r.vehicle_id))
            .map(|r| r.id.clone())
            .collect();

        summary.vehicles_added = to_add.len();
        summary.vehicles_removed = to_remove.len();
        if !to_add.is_empty() {
            self.repos.vehicle_assignments.insert(to_add).await?;
        }
        if !to_remove.is_empty() {
            self.repos
                .vehicle_assignments
                .delete_by_ids(&to_remove)
                .await?;
        }
        Ok(())
    }

    async fn reconcile_equipment(
        &self,
        job_id: &str,
        company_id: &str,
        desired: &DesiredResources,
        summary: &mut ReconcileSummary,
    ) -> Result<()> {
        let current = self
            .repos
            .equipment_allocations
            .list_by_filter(&Filter::new().eq("jobId", job_id))
            .await?;

        // At most one row exists per (job, equipment) pair; keyed lookup is
        // safe.
        let old_qty: BTreeMap<&str, u32> = current
            .iter()
            .map(|r| (r.equipment_id.as_str(), r.quantity_assigned))
            .collect();
        let new_qty = desired.equipment_qty();

        // Adjust the shared pools first, one atomic repository call per id
        // with a nonzero net change.
        let all_ids: BTreeSet<&str> = old_qty
            .keys()
            .copied()
            .chain(new_qty.keys().map(String::as_str))
            .collect();
        for equipment_id in all_ids {
            let old = i64::from(old_qty.get(equipment_id).copied().unwrap_or(0));
            let new = i64::from(new_qty.get(equipment_id).copied().unwrap_or(0));
            let delta = new - old;
            if delta == 0 {
                continue;
            }
            let remaining = self
                .repos
                .equipment
                .adjust_quantity(equipment_id, -delta)
                .await?;
            if remaining < 0 {
                log::warn!(
                    "Equipment {} pool went negative ({}) after allocating {} to job {}",
                    equipment_id,
                    remaining,
                    new,
                    job_id
                );
            }
            summary
                .equipment_deltas
                .insert(equipment_id.to_string(), delta);
        }

        // Upsert rows keyed by (job, equipment): update changed quantities
        // in place, insert newly selected items, delete deselected rows.
        let mut to_insert = Vec::new();
        for (equipment_id, quantity) in new_qty {
            match current.iter().find(|r| &r.equipment_id == equipment_id) {
                Some(row) if row.quantity_assigned == *quantity => {}
                Some(row) => {
                    let mut updated = row.clone();
                    updated.quantity_assigned = *quantity;
                    self.repos
                        .equipment_allocations
                        .update(&row.id, updated)
                        .await?;
                }
                None => to_insert.push(JobEquipmentAllocation {
                    company_id: company_id.to_string(),
                    job_id: job_id.to_string(),
                    equipment_id: equipment_id.clone(),
                    quantity_assigned: *quantity,
                    ..Default::default()
                }),
            }
        }
        if !to_insert.is_empty() {
            self.repos.equipment_allocations.insert(to_insert).await?;
        }

        let to_remove: Vec<String> = current
            .iter()
            .filter(|r| !new_qty.contains_key(&r.equipment_id))
            .map(|r| r.id.clone())
            .collect();
        if !to_remove.is_empty() {
            self.repos
                .equipment_allocations
                .delete_by_ids(&to_remove)
                .await?;
        }
        Ok(())
    }
}
