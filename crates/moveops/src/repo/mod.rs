//! Repository seam for the moving-operations core.
//!
//! The core never talks to a concrete store. Each entity is reachable
//! through [`EntityRepo`], a narrow async contract (get by id, list by
//! equality filter, insert, update, delete by ids) that a document database,
//! an HTTP backend, or the bundled [`memory`] implementation can satisfy.
//!
//! Equipment gets one extra operation: [`EquipmentRepo::adjust_quantity`],
//! an atomic counter adjustment owned by the repository so that concurrent
//! allocation edits cannot lose updates to the shared pool.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::{
    Equipment, Job, JobEquipmentAllocation, JobVehicleAssignment, JobWorkerAssignment, Vehicle,
    Worker,
};

pub mod error;
pub mod memory;

pub use error::{RepoError, Result};
pub use memory::MemoryRepo;

/// Implemented by every persisted entity.
///
/// Repositories assign ids and creation metadata on insert and preserve them
/// on update, so entities expose the handful of fields the generic plumbing
/// needs.
pub trait Entity: Clone + Send + Sync + serde::Serialize {
    /// A short noun for error messages ("job", "equipment", ...).
    fn kind() -> &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn set_created_at(&mut self, at: Option<DateTime<Utc>>);
    fn set_updated_at(&mut self, at: Option<DateTime<Utc>>);
}

macro_rules! impl_entity {
    ($ty:ty, $kind:literal) => {
        impl Entity for $ty {
            fn kind() -> &'static str {
                $kind
            }

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn created_at(&self) -> Option<DateTime<Utc>> {
                self.created_at
            }

            fn set_created_at(&mut self, at: Option<DateTime<Utc>>) {
                self.created_at = at;
            }

            fn set_updated_at(&mut self, at: Option<DateTime<Utc>>) {
                self.updated_at = at;
            }
        }
    };
}

impl_entity!(Job, "job");
impl_entity!(Worker, "worker");
impl_entity!(Vehicle, "vehicle");
impl_entity!(Equipment, "equipment");
impl_entity!(JobWorkerAssignment, "job worker assignment");
impl_entity!(JobVehicleAssignment, "job vehicle assignment");
impl_entity!(JobEquipmentAllocation, "job equipment allocation");

/// A flat equality filter over an entity's serialized fields.
///
/// Field names use the wire (camelCase) spelling. An empty filter matches
/// everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    fields: BTreeMap<String, serde_json::Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns true if the serialized entity satisfies every condition.
    pub fn matches(&self, entity: &serde_json::Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| entity.get(field) == Some(expected))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// CRUD access to one entity collection.
#[async_trait]
pub trait EntityRepo<T: Entity>: Send + Sync {
    /// Fetches one entity, `None` if the id does not resolve.
    async fn get_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Lists entities matching a flat equality filter.
    async fn list_by_filter(&self, filter: &Filter) -> Result<Vec<T>>;

    /// Inserts entities, assigning ids and creation timestamps. Returns the
    /// stored copies.
    async fn insert(&self, entities: Vec<T>) -> Result<Vec<T>>;

    /// Replaces an entity, preserving its original creation metadata.
    async fn update(&self, id: &str, entity: T) -> Result<T>;

    /// Deletes the given ids. Unknown ids are ignored.
    async fn delete_by_ids(&self, ids: &[String]) -> Result<()>;
}

/// Convenience: fetch an entity or fail with [`RepoError::NotFound`].
pub async fn require<T: Entity>(repo: &dyn EntityRepo<T>, id: &str) -> Result<T> {
    repo.get_by_id(id)
        .await?
        .ok_or_else(|| RepoError::not_found(T::kind(), id))
}

/// Equipment repository with the atomic pool-counter operation.
#[async_trait]
pub trait EquipmentRepo: EntityRepo<Equipment> {
    /// Atomically adds `delta` to the equipment's `total_quantity` and
    /// returns the new value. Negative results are allowed; surfacing a
    /// mismatch beats hiding it.
    async fn adjust_quantity(&self, id: &str, delta: i64) -> Result<i64>;
}

/// The full set of repositories the core operates on.
#[derive(Clone)]
pub struct Repositories {
    pub jobs: Arc<dyn EntityRepo<Job>>,
    pub workers: Arc<dyn EntityRepo<Worker>>,
    pub vehicles: Arc<dyn EntityRepo<Vehicle>>,
    pub equipment: Arc<dyn EquipmentRepo>,
    pub worker_assignments: Arc<dyn EntityRepo<JobWorkerAssignment>>,
    pub vehicle_assignments: Arc<dyn EntityRepo<JobVehicleAssignment>>,
    pub equipment_allocations: Arc<dyn EntityRepo<JobEquipmentAllocation>>,
}

impl Repositories {
    /// Builds a fully in-memory set, used by tests and by embedders without
    /// a backing store.
    pub fn in_memory() -> Self {
        Self {
            jobs: Arc::new(MemoryRepo::<Job>::new()),
            workers: Arc::new(MemoryRepo::<Worker>::new()),
            vehicles: Arc::new(MemoryRepo::<Vehicle>::new()),
            equipment: Arc::new(MemoryRepo::<Equipment>::new()),
            worker_assignments: Arc::new(MemoryRepo::<JobWorkerAssignment>::new()),
            vehicle_assignments: Arc::new(MemoryRepo::<JobVehicleAssignment>::new()),
            equipment_allocations: Arc::new(MemoryRepo::<JobEquipmentAllocation>::new()),
        }
    }

    /// Deletes a job and cascades to its assignment and allocation rows.
    ///
    /// Equipment pool counters are deliberately untouched: deleting an
    /// active job is an operator action, and any outstanding allocations
    /// should be reconciled away first.
    pub async fn delete_job(&self, job_id: &str) -> Result<()> {
        let by_job = Filter::new().eq("jobId", job_id);

        let worker_rows = self.worker_assignments.list_by_filter(&by_job).await?;
        let ids: Vec<String> = worker_rows.into_iter().map(|r| r.id).collect();
        self.worker_assignments.delete_by_ids(&ids).await?;

        let vehicle_rows = self.vehicle_assignments.list_by_filter(&by_job).await?;
        let ids: Vec<String> = vehicle_rows.into_iter().map(|r| r.id).collect();
        self.vehicle_assignments.delete_by_ids(&ids).await?;

        let allocation_rows = self.equipment_allocations.list_by_filter(&by_job).await?;
        let ids: Vec<String> = allocation_rows.into_iter().map(|r| r.id).collect();
        self.equipment_allocations.delete_by_ids(&ids).await?;

        self.jobs.delete_by_ids(&[job_id.to_string()]).await?;
        log::info!("Deleted job {} with cascading assignment rows", job_id);
        Ok(())
    }
}
