//! Inventory reconciliation.
//!
//! Maintains the working item list for a room — in the quote flow or the
//! on-site walkthrough — merging three sources: classifier-detected items,
//! manually entered items, and in-place edits. The draft stays mutable and
//! forgiving; [`commit`] is the single point where it becomes the selected
//! inventory persisted on the job.

use chrono::Utc;

use crate::model::{new_id, InventoryItem, Room};
use crate::vision::DetectedItem;

/// Id prefix for classifier-detected items.
pub const AI_ID_PREFIX: &str = "ai-";
/// Id prefix for manually entered items.
pub const MANUAL_ID_PREFIX: &str = "manual-";

/// Fields a user supplies when adding an item by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualItemDraft {
    pub name: String,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub description: Option<String>,
    pub fragile: Option<bool>,
    pub special_handling: Option<String>,
}

/// Appends classifier output to the room's working list.
///
/// An empty detection result is a valid outcome — the room simply gains no
/// items and the caller presents an empty state rather than retrying.
pub fn merge_detected(room: &mut Room, detected: Vec<DetectedItem>) {
    for item in detected {
        room.items.push(InventoryItem {
            id: format!("{}{}", AI_ID_PREFIX, new_id()),
            name: item.name,
            category: item.category,
            quantity: item.quantity.max(1),
            selected: true,
            description: item.description,
            estimated_size: item.estimated_size,
            estimated_weight: item.estimated_weight,
            fragile: item.fragile,
            special_handling: item.special_handling,
            image_url: item.image_url,
        });
    }
}

/// Appends a manually entered item, selected with a default quantity of 1.
/// Returns the generated item id.
pub fn add_manual_item(room: &mut Room, draft: ManualItemDraft) -> String {
    let item = InventoryItem {
        id: format!("{}{}", MANUAL_ID_PREFIX, new_id()),
        name: draft.name,
        category: draft.category,
        quantity: draft.quantity.unwrap_or(1).max(1),
        selected: true,
        description: draft.description,
        estimated_size: None,
        estimated_weight: None,
        fragile: draft.fragile,
        special_handling: draft.special_handling,
        image_url: None,
    };
    let id = item.id.clone();
    room.items.push(item);
    id
}

/// Flips an item's inclusion in the move. Its quantity is untouched, so
/// toggling twice restores the item exactly.
pub fn toggle_selection(item: &mut InventoryItem) {
    item.selected = !item.selected;
}

/// Sets an item's quantity, clamped at zero.
pub fn set_quantity(item: &mut InventoryItem, quantity: i64) {
    item.quantity = quantity.max(0) as u32;
}

/// Parses user quantity input. Non-numeric text coerces to the previous
/// valid quantity instead of producing garbage.
pub fn parse_quantity(input: &str, previous: u32) -> u32 {
    input.trim().parse().unwrap_or(previous)
}

/// Removes an item from the working list outright. Unlike deselection, this
/// forgets the item existed. Returns true if something was removed.
pub fn remove_item(room: &mut Room, item_id: &str) -> bool {
    let before = room.items.len();
    room.items.retain(|i| i.id != item_id);
    room.items.len() != before
}

/// Turns the draft rooms into the committed selection: only selected items
/// with a positive quantity survive, `total_items` is recomputed and
/// `analyzed_at` stamped.
pub fn commit(mut rooms: Vec<Room>) -> Vec<Room> {
    let now = Utc::now();
    for room in &mut rooms {
        room.items.retain(|i| i.selected && i.quantity > 0);
        room.total_items = room.items.len() as u32;
        room.analyzed_at = Some(now);
    }
    rooms
}

/// Buckets items by category for display.
///
/// Category order follows first appearance and items keep their insertion
/// order within a category; items without a category land in the
/// [`crate::model::inventory::FALLBACK_CATEGORY`] bucket.
pub fn group_by_category(items: &[InventoryItem]) -> Vec<(String, Vec<&InventoryItem>)> {
    let mut groups: Vec<(String, Vec<&InventoryItem>)> = Vec::new();
    for item in items {
        let category = item.category_or_default();
        match groups.iter_mut().find(|(name, _)| name == category) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((category.to_string(), vec![item])),
        }
    }
    groups
}
