//! Field domain — the value the host CMS stores for this plugin.
//!
//! The host is the single source of truth. The plugin only keeps a
//! transient mirror and always replaces the stored value wholesale.

pub mod host;
pub mod session;

pub use host::{FieldHost, FileFieldHost, MemoryFieldHost};
pub use session::{FieldSession, SessionStatus};

use crate::content::ContentType;
use serde::{Deserialize, Serialize};

/// Maximum number of story fields folded into the generation context.
const MAX_STORY_FIELDS: usize = 5;

/// The persisted field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredFieldValue {
    pub generated_text: String,
    pub original_prompt: String,
    pub content_type: ContentType,
    /// Unix time of the last mutation, in milliseconds.
    pub timestamp: u64,
}

impl Default for StoredFieldValue {
    fn default() -> Self {
        Self {
            generated_text: String::new(),
            original_prompt: String::new(),
            content_type: ContentType::Text,
            timestamp: now_millis(),
        }
    }
}

impl StoredFieldValue {
    /// Copy of this value with a fresh timestamp.
    pub fn touched(mut self) -> Self {
        self.timestamp = now_millis();
        self
    }
}

/// Normalise whatever the host handed over into a usable field value.
///
/// Anything that isn't a JSON object becomes the empty default. Objects
/// keep the fields they have; missing or mistyped ones take defaults.
pub fn validate_content(raw: Option<&serde_json::Value>) -> StoredFieldValue {
    match raw {
        Some(value) if value.is_object() => {
            serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                log::warn!("[FIELD] Stored value unreadable, using defaults: {}", e);
                StoredFieldValue::default()
            })
        }
        _ => StoredFieldValue::default(),
    }
}

/// Describe the story the field lives in, for use as generation context.
///
/// Reads `story.name` and up to five non-empty string fields of
/// `story.content`. Returns an empty string when there is no story.
pub fn story_context(data: &serde_json::Value) -> String {
    let story = match data.get("story") {
        Some(s) if s.is_object() => s,
        _ => return String::new(),
    };

    let mut context = Vec::new();

    if let Some(name) = story.get("name").and_then(|n| n.as_str()) {
        if !name.is_empty() {
            context.push(format!("Story: {}", name));
        }
    }

    if let Some(content) = story.get("content").and_then(|c| c.as_object()) {
        let fields: Vec<String> = content
            .iter()
            .filter_map(|(key, value)| match value.as_str() {
                Some(s) if !s.is_empty() => Some(format!("{}: {}", key, s)),
                _ => None,
            })
            .take(MAX_STORY_FIELDS)
            .collect();
        if !fields.is_empty() {
            context.push(format!("Content: {}", fields.join(", ")));
        }
    }

    context.join("\n")
}

pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
