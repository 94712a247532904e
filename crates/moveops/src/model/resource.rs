//! Company-scoped resource records: workers, vehicles, equipment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Worker availability for assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    #[default]
    Active,
    Inactive,
}

/// A crew member. Only `Active` workers are offered for assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    #[serde(default)]
    pub id: String,
    pub company_id: String,
    pub name: String,
    #[serde(default)]
    pub status: WorkerStatus,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A truck or van in the company fleet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(default)]
    pub id: String,
    pub company_id: String,
    pub name: String,
    #[serde(default)]
    pub license_plate: Option<String>,
    #[serde(default)]
    pub capacity_cubic_feet: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A consumable or reusable equipment item (dollies, blankets, straps).
///
/// `total_quantity` is the company-wide available count, shared across all
/// jobs and adjusted as allocations change. It is intentionally signed: a
/// negative value surfaces a data-entry mismatch instead of hiding it behind
/// a clamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default)]
    pub id: String,
    pub company_id: String,
    pub name: String,
    #[serde(default)]
    pub total_quantity: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
