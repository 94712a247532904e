//! Builder helpers for creating test entities without boilerplate.

#![allow(dead_code)]

use moveops::{Equipment, Job, JobStatus, Vehicle, Worker, WorkerStatus};

pub const COMPANY: &str = "co-test";

/// Builder for `Job` test instances.
pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn new(customer_name: &str) -> Self {
        let mut job = Job::new_quote(COMPANY, customer_name);
        job.id = String::new(); // let the repository assign one
        Self { job }
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.job.status = status;
        self
    }

    pub fn checklist(mut self, checklist: serde_json::Value) -> Self {
        self.job.vehicle_checklist = Some(checklist);
        self
    }

    pub fn contact(mut self, phone: &str, email: &str) -> Self {
        self.job.customer_phone = Some(phone.to_string());
        self.job.customer_email = Some(email.to_string());
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}

pub fn worker(name: &str) -> Worker {
    Worker {
        company_id: COMPANY.to_string(),
        name: name.to_string(),
        status: WorkerStatus::Active,
        ..Default::default()
    }
}

pub fn inactive_worker(name: &str) -> Worker {
    Worker {
        status: WorkerStatus::Inactive,
        ..worker(name)
    }
}

pub fn vehicle(name: &str) -> Vehicle {
    Vehicle {
        company_id: COMPANY.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn equipment(name: &str, total_quantity: i64) -> Equipment {
    Equipment {
        company_id: COMPANY.to_string(),
        name: name.to_string(),
        total_quantity,
        ..Default::default()
    }
}
