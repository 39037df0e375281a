//! Host adapters — where the field value lives.
//!
//! The session only needs "read the current value" and "replace it".
//! `FileFieldHost` keeps the value as pretty JSON on disk, at
//! `~/.config/promptblok/field.json` unless told otherwise.

use super::{story_context, validate_content, StoredFieldValue};
use crate::error::FieldError;
use std::path::{Path, PathBuf};

pub trait FieldHost {
    /// Current stored value, normalised.
    fn current(&self) -> StoredFieldValue;

    /// Replace the stored value wholesale.
    fn set_content(&mut self, value: StoredFieldValue) -> Result<(), FieldError>;

    /// Story data the field is embedded in, if the host provides it.
    fn story(&self) -> Option<serde_json::Value> {
        None
    }

    /// Generation context derived from `story()`. Empty when there is none.
    fn story_context(&self) -> String {
        self.story().map(|s| story_context(&s)).unwrap_or_default()
    }
}

/// In-process host. Useful for embedding and for tests.
#[derive(Debug, Default)]
pub struct MemoryFieldHost {
    value: Option<serde_json::Value>,
    story: Option<serde_json::Value>,
    reject_writes: bool,
    writes: usize,
}

impl MemoryFieldHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw host payload, as the CMS would hand it over.
    pub fn with_raw(value: serde_json::Value) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn with_story(mut self, story: serde_json::Value) -> Self {
        self.story = Some(story);
        self
    }

    /// Make every subsequent write fail.
    pub fn reject_writes(mut self) -> Self {
        self.reject_writes = true;
        self
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl FieldHost for MemoryFieldHost {
    fn current(&self) -> StoredFieldValue {
        validate_content(self.value.as_ref())
    }

    fn set_content(&mut self, value: StoredFieldValue) -> Result<(), FieldError> {
        if self.reject_writes {
            return Err(FieldError::Rejected("host is read-only".to_string()));
        }
        self.value = Some(serde_json::to_value(&value)?);
        self.writes += 1;
        Ok(())
    }

    fn story(&self) -> Option<serde_json::Value> {
        self.story.clone()
    }
}

/// Field value persisted to a JSON file.
#[derive(Debug, Clone)]
pub struct FileFieldHost {
    path: PathBuf,
    story_path: Option<PathBuf>,
}

impl FileFieldHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            story_path: None,
        }
    }

    /// Read story data from a separate JSON file (`{"story": {...}}`).
    pub fn with_story_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.story_path = Some(path.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Returns `None` if the file doesn't exist or isn't valid JSON.
fn read_json(path: &Path) -> Option<serde_json::Value> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("[FIELD] Ignoring invalid JSON in {}: {}", path.display(), e);
            None
        }
    }
}

impl FieldHost for FileFieldHost {
    fn current(&self) -> StoredFieldValue {
        validate_content(read_json(&self.path).as_ref())
    }

    fn set_content(&mut self, value: StoredFieldValue) -> Result<(), FieldError> {
        let io_err = |source: std::io::Error| FieldError::Io {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&value)?;
        std::fs::write(&self.path, json).map_err(io_err)?;
        log::info!("[FIELD] Saved field value to {}", self.path.display());
        Ok(())
    }

    fn story(&self) -> Option<serde_json::Value> {
        self.story_path.as_deref().and_then(read_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentType;
    use serde_json::json;

    #[test]
    fn memory_host_round_trips_values() {
        let mut host = MemoryFieldHost::new();
        assert_eq!(host.current().content_type, ContentType::Text);

        let value = StoredFieldValue {
            generated_text: "Cut costs".into(),
            content_type: ContentType::Bullets,
            ..StoredFieldValue::default()
        };
        host.set_content(value.clone()).unwrap();
        assert_eq!(host.current(), value);
        assert_eq!(host.writes(), 1);
    }

    #[test]
    fn rejecting_host_reports_error() {
        let mut host = MemoryFieldHost::new().reject_writes();
        let err = host.set_content(StoredFieldValue::default()).unwrap_err();
        assert!(matches!(err, FieldError::Rejected(_)));
        assert_eq!(host.writes(), 0);
    }

    #[test]
    fn memory_host_exposes_story_context() {
        let host = MemoryFieldHost::new().with_story(json!({"story": {"name": "Home"}}));
        assert_eq!(host.story_context(), "Story: Home");
        assert_eq!(MemoryFieldHost::new().story_context(), "");
    }

    #[test]
    fn file_host_missing_file_gives_defaults() {
        let host = FileFieldHost::new(std::env::temp_dir().join("promptblok-test-missing/field.json"));
        assert_eq!(host.current().generated_text, "");
    }

    #[test]
    fn file_host_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("promptblok-test-file-host");
        let _ = std::fs::remove_dir_all(&dir);
        let mut host = FileFieldHost::new(dir.join("nested").join("field.json"));

        let value = StoredFieldValue {
            generated_text: "Grow faster".into(),
            original_prompt: "tagline for a gym".into(),
            content_type: ContentType::Tagline,
            timestamp: 42,
        };
        host.set_content(value.clone()).unwrap();
        assert_eq!(host.current(), value);

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_host_reads_story_file() {
        let dir = std::env::temp_dir().join("promptblok-test-story");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let story_path = dir.join("story.json");
        std::fs::write(&story_path, r#"{"story": {"name": "Launch", "content": {"title": "Rocket"}}}"#).unwrap();

        let host = FileFieldHost::new(dir.join("field.json")).with_story_file(&story_path);
        assert_eq!(host.story_context(), "Story: Launch\nContent: title: Rocket");

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }
}
