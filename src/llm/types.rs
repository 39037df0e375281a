//! Generation request and result types.
//!
//! The result is a tagged union. On the wire it keeps the two-field shape
//! the field plugin frontend reads: `{ "content": "...", "error": null }`.

use crate::content::ContentType;
use crate::error::{GenerateError, GenerationFailure};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One generation call. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub content_type: ContentType,
    pub user_instruction: String,
}

impl GenerationRequest {
    pub fn new(content_type: ContentType, user_instruction: &str) -> Self {
        Self {
            content_type,
            user_instruction: user_instruction.trim().to_string(),
        }
    }
}

/// Outcome of a generation call. Exactly one side carries information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    /// Sanitized, non-empty content.
    Content(String),
    Failed(GenerationFailure),
}

impl GenerationResult {
    pub fn failed(err: &GenerateError) -> Self {
        GenerationResult::Failed(GenerationFailure::from(err))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Content(_))
    }

    /// Generated content, or `""` on failure.
    pub fn content(&self) -> &str {
        match self {
            GenerationResult::Content(c) => c,
            GenerationResult::Failed(_) => "",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            GenerationResult::Content(_) => None,
            GenerationResult::Failed(f) => Some(&f.message),
        }
    }

    pub fn failure(&self) -> Option<&GenerationFailure> {
        match self {
            GenerationResult::Content(_) => None,
            GenerationResult::Failed(f) => Some(f),
        }
    }
}

impl Serialize for GenerationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GenerationResult", 2)?;
        state.serialize_field("content", self.content())?;
        state.serialize_field("error", &self.error())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_trims_instruction() {
        let req = GenerationRequest::new(ContentType::Cta, "  sign up page \n");
        assert_eq!(req.user_instruction, "sign up page");
    }

    #[test]
    fn success_serializes_with_null_error() {
        let result = GenerationResult::Content("Ship Faster".to_string());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"content": "Ship Faster", "error": null}));
    }

    #[test]
    fn failure_serializes_with_empty_content() {
        let result = GenerationResult::failed(&GenerateError::MissingApiKey);
        assert!(!result.is_success());
        assert_eq!(result.content(), "");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"content": "", "error": "Gemini API key missing"})
        );
    }
}
