//! Job lifecycle state machine.
//!
//! The transition table lives on [`JobStatus::allowed_next`]; this module
//! validates against it in one place, merges companion fields into the same
//! update, applies side effects (timestamps, notifications) and persists the
//! result. Illegal transitions and missing preconditions are hard errors —
//! callers never observe a partially applied transition.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::error::Result;
use crate::model::{Job, JobStatus, Room};
use crate::notify::Notifier;
use crate::repo::{require, EntityRepo};

/// Errors produced by transition validation.
#[derive(Error, Debug)]
pub enum TransitionError {
    #[error("Illegal transition from '{from}' to '{to}'")]
    Invalid { from: JobStatus, to: JobStatus },

    #[error("Transition to '{target}' requires '{field}'")]
    Precondition {
        target: JobStatus,
        field: &'static str,
    },
}

/// Companion fields merged into the job in the same update as a status
/// change. Every field is optional; `None` leaves the job's value alone.
#[derive(Debug, Clone, Default)]
pub struct TransitionPatch {
    pub vehicle_checklist: Option<serde_json::Value>,
    pub signatures: Option<serde_json::Value>,
    pub payment_status: Option<String>,
    pub final_inventory_data: Option<Vec<Room>>,
    pub estimated_cost: Option<f64>,
    pub crew_notes: Option<String>,
    pub cancellation_reason: Option<String>,
}

impl TransitionPatch {
    /// A patch carrying only a vehicle checklist, the common case when the
    /// crew supplies it in the same call as the `EnRoute` transition.
    pub fn with_checklist(checklist: serde_json::Value) -> Self {
        Self {
            vehicle_checklist: Some(checklist),
            ..Default::default()
        }
    }
}

/// Validates and applies a transition to a job, returning the updated copy.
///
/// Pure: no I/O, no persistence. [`LifecycleEngine::apply_transition`] wraps
/// this with repository access and notification.
pub fn apply(
    job: &Job,
    target: JobStatus,
    patch: &TransitionPatch,
) -> std::result::Result<Job, TransitionError> {
    if !job.status.can_transition_to(target) {
        return Err(TransitionError::Invalid {
            from: job.status,
            to: target,
        });
    }

    let mut updated = job.clone();
    if let Some(checklist) = &patch.vehicle_checklist {
        updated.vehicle_checklist = Some(checklist.clone());
    }
    if let Some(signatures) = &patch.signatures {
        updated.signatures = Some(signatures.clone());
    }
    if let Some(payment_status) = &patch.payment_status {
        updated.payment_status = Some(payment_status.clone());
    }
    if let Some(final_inventory) = &patch.final_inventory_data {
        updated.final_inventory_data = Some(final_inventory.clone());
    }
    if let Some(cost) = patch.estimated_cost {
        updated.estimated_cost = Some(cost);
    }
    if let Some(notes) = &patch.crew_notes {
        updated.crew_notes = Some(notes.clone());
    }
    if let Some(reason) = &patch.cancellation_reason {
        updated.cancellation_reason = Some(reason.clone());
    }

    // The pre-trip checklist gates the drive to the pickup address. It may
    // arrive in the same call; merged above before the check.
    let departing = matches!(target, JobStatus::EnRoute | JobStatus::InProgress);
    if departing && updated.vehicle_checklist.is_none() {
        return Err(TransitionError::Precondition {
            target,
            field: "vehicle_checklist",
        });
    }

    let now = Utc::now();
    if departing && updated.actual_start_time.is_none() {
        updated.actual_start_time = Some(now);
    }
    if target == JobStatus::Completed && updated.completed_at.is_none() {
        updated.completed_at = Some(now);
    }

    updated.status = target;
    updated.updated_at = Some(now);
    Ok(updated)
}

/// Drives jobs through the lifecycle against the job repository.
pub struct LifecycleEngine {
    jobs: Arc<dyn EntityRepo<Job>>,
    notifier: Arc<dyn Notifier>,
}

impl LifecycleEngine {
    pub fn new(jobs: Arc<dyn EntityRepo<Job>>, notifier: Arc<dyn Notifier>) -> Self {
        Self { jobs, notifier }
    }

    /// Loads the job, applies the transition and persists the result.
    ///
    /// Departure and arrival notifications are fire-and-forget: a send
    /// failure is logged and the transition still succeeds.
    pub async fn apply_transition(
        &self,
        job_id: &str,
        target: JobStatus,
        patch: TransitionPatch,
    ) -> Result<Job> {
        let job = require(self.jobs.as_ref(), job_id).await?;
        let from = job.status;
        let updated = apply(&job, target, &patch)?;
        let stored = self.jobs.update(job_id, updated).await?;
        log::info!("Job {} transitioned {} -> {}", job_id, from, target);

        if matches!(
            target,
            JobStatus::EnRoute | JobStatus::InProgress | JobStatus::Arrived
        ) {
            if let Err(e) = self
                .notifier
                .notify_arrival(
                    &stored.customer_name,
                    stored.customer_phone.as_deref(),
                    stored.customer_email.as_deref(),
                )
                .await
            {
                log::warn!("Notification for job {} failed: {}", job_id, e);
            }
        }

        Ok(stored)
    }
}
