//! Inventory rooms and items.
//!
//! An item's inclusion in the move is the `selected` flag; `quantity` is a
//! count and nothing more. Committing a room filters on both, so quantity 0
//! never reaches the persisted selection either way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category used when an item has none.
pub const FALLBACK_CATEGORY: &str = "other";

/// A single inventory item inside a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub quantity: u32,
    /// Whether the item is included in the move. Distinct from quantity:
    /// a deselected item keeps its count in the draft list.
    #[serde(default = "default_selected")]
    pub selected: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub estimated_size: Option<String>,
    #[serde(default)]
    pub estimated_weight: Option<String>,
    #[serde(default)]
    pub fragile: Option<bool>,
    #[serde(default)]
    pub special_handling: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_selected() -> bool {
    true
}

impl InventoryItem {
    /// The display category, falling back to [`FALLBACK_CATEGORY`].
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(FALLBACK_CATEGORY)
    }
}

/// A room's worth of inventory, either in the quote flow or the on-site
/// walkthrough.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub room_type: String,
    #[serde(default)]
    pub items: Vec<InventoryItem>,
    /// Count of committed items; recomputed on commit.
    #[serde(default)]
    pub total_items: u32,
    /// Stamped when the room's draft list is committed.
    #[serde(default)]
    pub analyzed_at: Option<DateTime<Utc>>,
}

impl Room {
    pub fn new(name: impl Into<String>, room_type: impl Into<String>) -> Self {
        Self {
            id: super::new_id(),
            name: name.into(),
            room_type: room_type.into(),
            ..Default::default()
        }
    }
}
