//! Domain entities for the moving-operations core.
//!
//! Everything here is a plain serde struct. Persistence is handled by the
//! repository seam in [`crate::repo`]; entities carry their own ids as
//! strings so they stay agnostic of the backing store.

pub mod assignment;
pub mod inventory;
pub mod job;
pub mod resource;

pub use assignment::{JobEquipmentAllocation, JobVehicleAssignment, JobWorkerAssignment};
pub use inventory::{InventoryItem, Room};
pub use job::{Job, JobStatus};
pub use resource::{Equipment, Vehicle, Worker, WorkerStatus};

/// Generates a fresh entity id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
