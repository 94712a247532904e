//! The `Job` entity and its status enum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::inventory::Room;

/// The lifecycle status of a job.
///
/// The numeric values are a stable wire contract: the mobile field app and
/// the customer portal branch on these exact integers. They are not strictly
/// ordered — `Completed` and `Canceled` were assigned before the en-route
/// stages were added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum JobStatus {
    #[default]
    Unspecified = 0,
    Quote = 1,
    Booked = 2,
    /// Legacy alias for the en-route stage, still emitted by older clients.
    InProgress = 3,
    Completed = 4,
    Canceled = 5,
    EnRoute = 6,
    Arrived = 7,
    Loading = 8,
    OnWayToDropoff = 9,
    Unloading = 10,
}

impl From<JobStatus> for u8 {
    fn from(status: JobStatus) -> Self {
        status as u8
    }
}

impl TryFrom<u8> for JobStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(JobStatus::Unspecified),
            1 => Ok(JobStatus::Quote),
            2 => Ok(JobStatus::Booked),
            3 => Ok(JobStatus::InProgress),
            4 => Ok(JobStatus::Completed),
            5 => Ok(JobStatus::Canceled),
            6 => Ok(JobStatus::EnRoute),
            7 => Ok(JobStatus::Arrived),
            8 => Ok(JobStatus::Loading),
            9 => Ok(JobStatus::OnWayToDropoff),
            10 => Ok(JobStatus::Unloading),
            other => Err(format!("unknown job status value: {}", other)),
        }
    }
}

impl JobStatus {
    /// Returns true if no further transitions are allowed from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Canceled)
    }

    /// The set of statuses reachable from this one.
    ///
    /// This is the single source of truth for legal transitions; nothing
    /// else in the crate checks statuses pairwise.
    pub fn allowed_next(&self) -> &'static [JobStatus] {
        match self {
            JobStatus::Unspecified => &[JobStatus::Quote, JobStatus::Canceled],
            JobStatus::Quote => &[JobStatus::Booked, JobStatus::Canceled],
            JobStatus::Booked => &[
                JobStatus::InProgress,
                JobStatus::EnRoute,
                JobStatus::Canceled,
            ],
            JobStatus::InProgress | JobStatus::EnRoute => {
                &[JobStatus::Arrived, JobStatus::Canceled]
            }
            JobStatus::Arrived => &[JobStatus::Loading, JobStatus::Canceled],
            JobStatus::Loading => &[JobStatus::OnWayToDropoff, JobStatus::Canceled],
            JobStatus::OnWayToDropoff => &[JobStatus::Unloading, JobStatus::Canceled],
            JobStatus::Unloading => &[JobStatus::Completed, JobStatus::Canceled],
            JobStatus::Completed | JobStatus::Canceled => &[],
        }
    }

    /// Returns true if a direct transition to `target` is legal.
    pub fn can_transition_to(&self, target: JobStatus) -> bool {
        self.allowed_next().contains(&target)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JobStatus::Unspecified => "unspecified",
            JobStatus::Quote => "quote",
            JobStatus::Booked => "booked",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Canceled => "canceled",
            JobStatus::EnRoute => "en_route",
            JobStatus::Arrived => "arrived",
            JobStatus::Loading => "loading",
            JobStatus::OnWayToDropoff => "on_way_to_dropoff",
            JobStatus::Unloading => "unloading",
        };
        write!(f, "{}", name)
    }
}

/// A single customer move.
///
/// Created in `Quote` status by the quote flow and mutated through the
/// lifecycle engine plus direct field edits (cost, notes). Never hard-deleted
/// while active; deletion is an explicit operator action handled by the
/// repository layer, which cascades to the job's assignment rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default)]
    pub id: String,
    pub company_id: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pickup_address: String,
    #[serde(default)]
    pub dropoff_address: String,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    /// Draft per-room inventory built during the quote flow.
    #[serde(default)]
    pub inventory_data: Vec<Room>,
    /// Authoritative post-walkthrough inventory, set during field execution.
    #[serde(default)]
    pub final_inventory_data: Option<Vec<Room>>,
    /// Pre-trip checklist; its presence gates the transition to `EnRoute`.
    #[serde(default)]
    pub vehicle_checklist: Option<serde_json::Value>,
    #[serde(default)]
    pub signatures: Option<serde_json::Value>,
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Legacy free-form equipment list kept for older clients; the
    /// allocation rows are authoritative.
    #[serde(default)]
    pub equipment_ids: Vec<String>,
    #[serde(default)]
    pub crew_notes: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub actual_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Creates a new job in `Quote` status.
    pub fn new_quote(company_id: impl Into<String>, customer_name: impl Into<String>) -> Self {
        Self {
            id: super::new_id(),
            company_id: company_id.into(),
            customer_name: customer_name.into(),
            status: JobStatus::Quote,
            ..Default::default()
        }
    }
}
