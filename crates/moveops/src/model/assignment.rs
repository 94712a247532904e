//! Join rows tying workers, vehicles and equipment to a job.
//!
//! A job conceptually owns these rows; deleting a job cascades to them in
//! the repository layer. Worker and vehicle assignments carry no quantity,
//! presence means assigned. Equipment allocations carry the quantity
//! committed to the job, and at most one row exists per
//! `(job_id, equipment_id)` pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWorkerAssignment {
    #[serde(default)]
    pub id: String,
    pub company_id: String,
    pub job_id: String,
    pub worker_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobVehicleAssignment {
    #[serde(default)]
    pub id: String,
    pub company_id: String,
    pub job_id: String,
    pub vehicle_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEquipmentAllocation {
    #[serde(default)]
    pub id: String,
    pub company_id: String,
    pub job_id: String,
    pub equipment_id: String,
    pub quantity_assigned: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
