//! Job lifecycle and resource allocation core for moving-company
//! operations.
//!
//! This crate is the engine behind the CRUD screens: the job state machine,
//! the worker/vehicle/equipment allocation reconciler, and the inventory
//! reconciliation that merges classifier-detected and manually entered
//! items. Storage, the vision model, and notification delivery are
//! collaborator seams ([`repo`], [`vision`], [`notify`]); the UI layer calls
//! into this library and owns everything visual.

pub mod allocation;
pub mod error;
pub mod inventory;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod repo;
pub mod vision;

pub use allocation::{AllocationEngine, DesiredResources, ReconcileSummary};
pub use error::{MoveOpsError, Result, ValidationError};
pub use lifecycle::{LifecycleEngine, TransitionError, TransitionPatch};
pub use model::{
    Equipment, InventoryItem, Job, JobEquipmentAllocation, JobStatus, JobVehicleAssignment,
    JobWorkerAssignment, Room, Vehicle, Worker, WorkerStatus,
};
pub use notify::{LogNotifier, Notifier, NotifyError};
pub use repo::{EntityRepo, EquipmentRepo, Filter, MemoryRepo, RepoError, Repositories};
pub use vision::{DetectedItem, StubClassifier, VisionClassifier, VisionError};
