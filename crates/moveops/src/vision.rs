//! Vision classifier seam for inventory scanning.
//!
//! Field staff photograph a room and the classifier returns the furniture
//! it sees. The model, prompt and transport live outside this core; this
//! module owns the contract: the room-type allow-list checked before any
//! request is built, the response payload shape, and its validation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from classification or response validation.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Room type '{0}' is not in the allowed list")]
    DisallowedRoomType(String),

    #[error("Classification failed: {0}")]
    Classification(String),

    #[error("Failed to parse classifier response: {0}")]
    ResponseParse(String),
}

/// Room types the classifier may be asked about.
///
/// The label is interpolated into the model prompt, so anything outside
/// this fixed list is rejected up front rather than sanitized.
pub const ALLOWED_ROOM_TYPES: &[&str] = &[
    "living_room",
    "bedroom",
    "kitchen",
    "dining_room",
    "bathroom",
    "office",
    "garage",
    "basement",
    "attic",
    "outdoor",
    "other",
];

/// Checks a room type against [`ALLOWED_ROOM_TYPES`].
pub fn validate_room_type(room_type: &str) -> Result<(), VisionError> {
    if ALLOWED_ROOM_TYPES.contains(&room_type) {
        Ok(())
    } else {
        Err(VisionError::DisallowedRoomType(room_type.to_string()))
    }
}

/// One item the classifier detected in a photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedItem {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
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

/// Quantity when the model omits one.
fn default_quantity() -> u32 {
    1
}

/// Classifier response payload.
#[derive(Debug, Deserialize)]
struct ClassifierResponse {
    items: Vec<DetectedItem>,
}

/// Parses the raw model output into detected items.
///
/// An empty `items` array is a valid, non-error outcome (an empty room is
/// not a failure). Anything that does not match the payload shape is a
/// parse error.
pub fn parse_detected_items(raw: &str) -> Result<Vec<DetectedItem>, VisionError> {
    let response: ClassifierResponse =
        serde_json::from_str(raw).map_err(|e| VisionError::ResponseParse(e.to_string()))?;
    Ok(response.items)
}

/// Classifies room photos into inventory items.
#[async_trait]
pub trait VisionClassifier: Send + Sync {
    /// Analyzes one image. Implementations must call
    /// [`validate_room_type`] before constructing a model request.
    async fn analyze(
        &self,
        image_bytes: &[u8],
        room_type: &str,
    ) -> Result<Vec<DetectedItem>, VisionError>;
}

/// Canned-response classifier for tests and classifier-less deployments.
#[derive(Debug, Default)]
pub struct StubClassifier {
    items: Vec<DetectedItem>,
}

impl StubClassifier {
    /// A stub that detects nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A stub that always returns the given items.
    pub fn with_items(items: Vec<DetectedItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl VisionClassifier for StubClassifier {
    async fn analyze(
        &self,
        _image_bytes: &[u8],
        room_type: &str,
    ) -> Result<Vec<DetectedItem>, VisionError> {
        validate_room_type(room_type)?;
        Ok(self.items.clone())
    }
}
