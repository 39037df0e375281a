//! Integration tests for the field session.
//!
//! Drives the same flows the editor does — generate, edit, regenerate,
//! switch type, quick prompts — against an in-memory host.

use promptblok_lib::content::{quick_prompt, ContentType};
use promptblok_lib::error::{GenerateError, AUTH_MESSAGE, EDIT_FAILED_MESSAGE};
use promptblok_lib::field::session::{EMPTY_PROMPT_MESSAGE, SUCCESS_MESSAGE};
use promptblok_lib::field::{FieldHost, FieldSession, MemoryFieldHost, SessionStatus};
use promptblok_lib::llm::TextGenerator;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Replies from a queue and remembers the prompts it was sent.
struct QueuedGenerator {
    replies: Mutex<Vec<Result<String, u16>>>,
    prompts: Mutex<Vec<String>>,
}

impl QueuedGenerator {
    fn new(replies: Vec<Result<&str, u16>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .rev()
                    .map(|r| r.map(str::to_string))
                    .collect(),
            ),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }

    fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl TextGenerator for QueuedGenerator {
    fn name(&self) -> &str {
        "queued"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.replies.lock().unwrap().pop();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(status)) => Err(GenerateError::Http {
                status,
                body: String::new(),
            }),
            None => Ok(String::new()),
        }
    }
}

/// Shared-reference generators work too; the session only needs the trait.
impl TextGenerator for &QueuedGenerator {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        (**self).generate_text(prompt).await
    }
}

/// Hangs on the first call, answers immediately afterwards.
struct StallingGenerator {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl TextGenerator for StallingGenerator {
    fn name(&self) -> &str {
        "stalling"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        Ok("Fresh take".to_string())
    }
}

impl TextGenerator for &StallingGenerator {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_configured(&self) -> bool {
        (**self).is_configured()
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        (**self).generate_text(prompt).await
    }
}

#[tokio::test]
async fn generate_persists_value_and_reports_success() {
    let gen = QueuedGenerator::new(vec![Ok("- Boost sales\n- Save time")]);
    let mut session = FieldSession::new(MemoryFieldHost::new(), &gen);
    session.change_type(ContentType::Bullets);

    let status = session.generate("benefits of our CRM").await.clone();
    assert_eq!(status, SessionStatus::Succeeded(SUCCESS_MESSAGE.to_string()));

    let stored = session.current();
    assert_eq!(stored.generated_text, "Boost sales\nSave time");
    assert_eq!(stored.original_prompt, "benefits of our CRM");
    assert_eq!(stored.content_type, ContentType::Bullets);
    assert!(stored.timestamp > 0);
}

#[tokio::test]
async fn story_context_is_appended_but_not_stored() {
    let gen = QueuedGenerator::new(vec![Ok("Pricing that scales")]);
    let host = MemoryFieldHost::new().with_story(json!({
        "story": {"name": "Pricing", "content": {"title": "Plans"}}
    }));
    let mut session = FieldSession::new(host, &gen);

    session.generate("tagline").await;

    assert!(gen
        .last_prompt()
        .contains("User request: tagline\n\nContext about what I'm building:\nStory: Pricing\nContent: title: Plans"));
    assert_eq!(session.current().original_prompt, "tagline");
}

#[tokio::test]
async fn failure_is_classified_and_nothing_is_written() {
    let gen = QueuedGenerator::new(vec![Err(401)]);
    let mut session = FieldSession::new(MemoryFieldHost::new(), &gen);

    let status = session.generate("anything").await.clone();
    assert_eq!(status, SessionStatus::Failed(AUTH_MESSAGE.to_string()));
    assert_eq!(session.host().writes(), 0);
}

#[tokio::test]
async fn new_generation_clears_previous_error() {
    let gen = QueuedGenerator::new(vec![Err(500), Ok("Ship Faster")]);
    let mut session = FieldSession::new(MemoryFieldHost::new(), &gen);

    assert!(matches!(session.generate("a").await, SessionStatus::Failed(_)));
    assert!(matches!(session.generate("a").await, SessionStatus::Succeeded(_)));
    session.acknowledge();
    assert_eq!(session.status(), &SessionStatus::Idle);
}

#[tokio::test]
async fn regenerate_reuses_original_prompt() {
    let gen = QueuedGenerator::new(vec![Ok("First take"), Ok("Second take")]);
    let mut session = FieldSession::new(MemoryFieldHost::new(), &gen);

    session.generate("landing hero copy").await;
    session.regenerate().await;

    assert_eq!(gen.call_count(), 2);
    assert!(gen.last_prompt().contains("User request: landing hero copy"));
    assert_eq!(session.current().generated_text, "Second take");
}

#[tokio::test]
async fn regenerate_without_prompt_is_a_noop() {
    let gen = QueuedGenerator::new(vec![]);
    let mut session = FieldSession::new(MemoryFieldHost::new(), &gen);

    assert_eq!(session.regenerate().await, &SessionStatus::Idle);
    assert_eq!(gen.call_count(), 0);
}

#[test]
fn edit_replaces_text_and_keeps_the_rest() {
    let host = MemoryFieldHost::with_raw(json!({
        "generatedText": "Old",
        "originalPrompt": "p",
        "contentType": "cta",
        "timestamp": 1
    }));
    let gen = QueuedGenerator::new(vec![]);
    let mut session = FieldSession::new(host, &gen);

    session.edit("Start free trial");

    let stored = session.current();
    assert_eq!(stored.generated_text, "Start free trial");
    assert_eq!(stored.original_prompt, "p");
    assert_eq!(stored.content_type, ContentType::Cta);
    assert!(stored.timestamp > 1);
}

#[test]
fn edit_failure_surfaces_fixed_message() {
    let gen = QueuedGenerator::new(vec![]);
    let mut session = FieldSession::new(MemoryFieldHost::new().reject_writes(), &gen);

    let status = session.edit("new text").clone();
    assert_eq!(status, SessionStatus::Failed(EDIT_FAILED_MESSAGE.to_string()));
}

#[test]
fn session_mirrors_host_content_type() {
    let host = MemoryFieldHost::with_raw(json!({"contentType": "subject"}));
    let gen = QueuedGenerator::new(vec![]);
    let mut session = FieldSession::new(host, &gen);
    assert_eq!(session.selected_type(), ContentType::Subject);

    session.change_type(ContentType::AltText);
    assert_eq!(session.host().current().content_type, ContentType::AltText);
    session.sync_from_host();
    assert_eq!(session.selected_type(), ContentType::AltText);
}

#[test]
fn quick_prompt_fills_draft_without_generating() {
    let gen = QueuedGenerator::new(vec![]);
    let mut session = FieldSession::new(MemoryFieldHost::new(), &gen);

    let qp = quick_prompt("email-subject").unwrap();
    session.apply_quick_prompt(qp);

    assert_eq!(session.selected_type(), ContentType::Subject);
    assert_eq!(session.draft_prompt(), qp.prompt);
    assert_eq!(gen.call_count(), 0);
    assert_eq!(session.host().writes(), 0);
}

#[tokio::test]
async fn cancelled_generation_does_not_wedge_the_session() {
    let gen = StallingGenerator {
        calls: AtomicUsize::new(0),
        prompts: Mutex::new(Vec::new()),
    };
    let mut session = FieldSession::new(MemoryFieldHost::new(), &gen);

    let timed_out = tokio::time::timeout(Duration::from_millis(20), session.generate("first"))
        .await
        .is_err();
    assert!(timed_out);
    assert_eq!(session.status(), &SessionStatus::Submitting);
    assert_eq!(session.host().writes(), 0);

    session.acknowledge();
    assert_eq!(session.status(), &SessionStatus::Idle);

    let status = session.generate("second").await.clone();
    assert_eq!(status, SessionStatus::Succeeded(SUCCESS_MESSAGE.to_string()));
    assert_eq!(gen.calls.load(Ordering::SeqCst), 2);
    assert!(gen.prompts.lock().unwrap()[1].contains("User request: second"));
    assert_eq!(session.current().generated_text, "Fresh take");
}

#[tokio::test]
async fn generation_after_cancel_works_without_acknowledge() {
    let gen = StallingGenerator {
        calls: AtomicUsize::new(0),
        prompts: Mutex::new(Vec::new()),
    };
    let mut session = FieldSession::new(MemoryFieldHost::new(), &gen);

    let _ = tokio::time::timeout(Duration::from_millis(20), session.generate("first")).await;
    assert!(matches!(session.generate("second").await, SessionStatus::Succeeded(_)));
}

#[tokio::test]
async fn blank_prompt_fails_without_calling_the_model() {
    let gen = QueuedGenerator::new(vec![Ok("never used")]);
    let mut session = FieldSession::new(MemoryFieldHost::new(), &gen);

    let status = session.generate("   \n\t ").await.clone();
    assert_eq!(status, SessionStatus::Failed(EMPTY_PROMPT_MESSAGE.to_string()));
    assert_eq!(gen.call_count(), 0);
    assert_eq!(session.host().writes(), 0);
}

#[tokio::test]
async fn prompt_is_trimmed_before_storing() {
    let gen = QueuedGenerator::new(vec![Ok("Ship Faster")]);
    let mut session = FieldSession::new(MemoryFieldHost::new(), &gen);

    session.generate("  hero headline \n").await;

    assert_eq!(session.current().original_prompt, "hero headline");
    assert!(gen.last_prompt().contains("User request: hero headline\n\nGenerate the content:"));
}
