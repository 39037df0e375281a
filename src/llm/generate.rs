//! Generation pipeline — instruction in, sanitized content out.
//!
//! Steps:
//! 1. Credential check (no network call without a key)
//! 2. System prompt for the content type
//! 3. Compose the full prompt
//! 4. Call the text generator
//! 5. Sanitize, rejecting empty output before and after
//!
//! Never returns `Err`: every failure becomes `GenerationResult::Failed`.

use super::prompts::{build_generation_prompt, system_prompt};
use super::provider::TextGenerator;
use super::sanitize::sanitize;
use super::types::{GenerationRequest, GenerationResult};
use crate::error::GenerateError;

pub async fn generate<G: TextGenerator>(
    generator: &G,
    request: &GenerationRequest,
) -> GenerationResult {
    let start = std::time::Instant::now();
    log::info!(
        "[GENERATE] Type: {}, instruction: {} chars, provider: {}",
        request.content_type,
        request.user_instruction.len(),
        generator.name()
    );

    match try_generate(generator, request).await {
        Ok(content) => {
            log::info!(
                "[GENERATE] Success in {}ms: {} chars",
                start.elapsed().as_millis(),
                content.len()
            );
            GenerationResult::Content(content)
        }
        Err(e) => {
            log::error!("[GENERATE] Content generation error: {}", e);
            GenerationResult::failed(&e)
        }
    }
}

async fn try_generate<G: TextGenerator>(
    generator: &G,
    request: &GenerationRequest,
) -> Result<String, GenerateError> {
    if !generator.is_configured() {
        return Err(GenerateError::MissingApiKey);
    }

    let system = system_prompt(request.content_type);
    let full_prompt = build_generation_prompt(system, &request.user_instruction);

    let raw = generator.generate_text(&full_prompt).await?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(GenerateError::Empty);
    }

    let sanitized = sanitize(request.content_type, raw);
    if sanitized.is_empty() {
        log::warn!("[GENERATE] Raw output fully stripped: {:?}", raw);
        return Err(GenerateError::EmptyAfterSanitize);
    }
    Ok(sanitized)
}
