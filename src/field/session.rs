//! Field session — the plugin's interaction state, without the UI.
//!
//! Transitions: Idle → Submitting → (Succeeded | Failed) → Idle.
//! Only one error or success message is held at a time; starting a new
//! generation clears the previous one.

use super::{FieldHost, StoredFieldValue};
use crate::content::{ContentType, QuickPrompt};
use crate::error::{user_message, GenerationFailure, EDIT_FAILED_MESSAGE};
use crate::llm::{self, GenerationRequest, GenerationResult, TextGenerator};

pub const SUCCESS_MESSAGE: &str = "Content generated successfully!";
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

pub struct FieldSession<H, G> {
    host: H,
    generator: G,
    selected_type: ContentType,
    draft_prompt: String,
    status: SessionStatus,
}

impl<H: FieldHost, G: TextGenerator> FieldSession<H, G> {
    pub fn new(host: H, generator: G) -> Self {
        let selected_type = host.current().content_type;
        Self {
            host,
            generator,
            selected_type,
            draft_prompt: String::new(),
            status: SessionStatus::Idle,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn selected_type(&self) -> ContentType {
        self.selected_type
    }

    pub fn draft_prompt(&self) -> &str {
        &self.draft_prompt
    }

    /// The stored value as the host currently has it.
    pub fn current(&self) -> StoredFieldValue {
        self.host.current()
    }

    /// The host reported a change: mirror its content type.
    pub fn sync_from_host(&mut self) {
        self.selected_type = self.host.current().content_type;
    }

    /// Generate content for `prompt` with the selected type and persist it.
    ///
    /// The prompt is trimmed; a blank one fails without calling the model.
    /// Dropping the returned future leaves the status at `Submitting` until
    /// the next `generate` or `acknowledge`.
    pub async fn generate(&mut self, prompt: &str) -> &SessionStatus {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            log::warn!("[SESSION] Empty prompt, nothing to generate");
            self.status = SessionStatus::Failed(EMPTY_PROMPT_MESSAGE.to_string());
            return &self.status;
        }
        self.status = SessionStatus::Submitting;

        let context = self.host.story_context();
        let enhanced = if context.is_empty() {
            prompt.to_string()
        } else {
            format!("{}\n\nContext about what I'm building:\n{}", prompt, context)
        };

        let request = GenerationRequest::new(self.selected_type, &enhanced);
        let result = llm::generate(&self.generator, &request).await;

        self.status = match result {
            GenerationResult::Content(generated) => {
                let value = StoredFieldValue {
                    generated_text: generated,
                    original_prompt: prompt.to_string(),
                    content_type: self.selected_type,
                    timestamp: super::now_millis(),
                };
                match self.host.set_content(value) {
                    Ok(()) => {
                        log::info!("[SESSION] Content saved to field");
                        SessionStatus::Succeeded(SUCCESS_MESSAGE.to_string())
                    }
                    Err(e) => {
                        log::error!("[SESSION] Failed to save generated content: {}", e);
                        SessionStatus::Failed(user_message(&GenerationFailure::new(e.to_string())))
                    }
                }
            }
            GenerationResult::Failed(failure) => SessionStatus::Failed(user_message(&failure)),
        };
        &self.status
    }

    /// Run the stored prompt again. No-op when nothing was generated yet.
    pub async fn regenerate(&mut self) -> &SessionStatus {
        let original = self.host.current().original_prompt;
        if original.is_empty() {
            log::info!("[SESSION] Nothing to regenerate");
            return &self.status;
        }
        self.generate(&original).await
    }

    /// Replace the generated text with a user edit.
    pub fn edit(&mut self, new_text: &str) -> &SessionStatus {
        let value = StoredFieldValue {
            generated_text: new_text.to_string(),
            ..self.host.current()
        }
        .touched();
        if let Err(e) = self.host.set_content(value) {
            log::error!("[SESSION] Failed to save edit: {}", e);
            self.status = SessionStatus::Failed(EDIT_FAILED_MESSAGE.to_string());
        }
        &self.status
    }

    /// Select a content type and persist the choice.
    pub fn change_type(&mut self, content_type: ContentType) -> &SessionStatus {
        self.selected_type = content_type;
        let value = StoredFieldValue {
            content_type,
            ..self.host.current()
        }
        .touched();
        if let Err(e) = self.host.set_content(value) {
            log::error!("[SESSION] Failed to save content type: {}", e);
            self.status = SessionStatus::Failed(user_message(&GenerationFailure::new(e.to_string())));
        }
        &self.status
    }

    /// Fill the draft from a preset. Never generates on its own.
    pub fn apply_quick_prompt(&mut self, quick_prompt: &QuickPrompt) {
        self.selected_type = quick_prompt.content_type;
        self.draft_prompt = quick_prompt.prompt.to_string();
    }

    /// Dismiss the current message. Also clears a `Submitting` left behind
    /// by a cancelled generation.
    pub fn acknowledge(&mut self) {
        self.status = SessionStatus::Idle;
    }
}
