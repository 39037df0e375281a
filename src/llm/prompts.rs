//! Generation prompt constants — one system prompt per content type.
//!
//! These prompts are the contract between the field plugin and the model.
//! The sanitizer assumes the model was asked for bare text with no
//! options, prefixes or markdown, so keep the output rules in sync with it.

use crate::content::ContentType;

pub const GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
pub const MAX_OUTPUT_TOKENS: u32 = 256;
pub const TEMPERATURE: f64 = 0.7;

const HEADLINE_PROMPT: &str = "You are a professional copywriter. Generate a compelling, benefit-focused headline that captures attention and communicates value. \
Constraints: under 60 characters, avoid jargon, actionable, no ending punctuation. \
Output one single-line headline ONLY. No options, no prefixes, no headings, no quotes, no markdown.";

const DESCRIPTION_PROMPT: &str = "You are a professional copywriter. Write a clear, engaging description that explains the value proposition and benefits. \
Constraints: 1-2 sentences, conversational tone, builds trust. \
Output the description text ONLY. No options, no prefixes, no headings, no quotes, no markdown.";

const BULLETS_PROMPT: &str = "You are a professional copywriter. Create 3-5 concise bullet points that focus on outcomes and benefits, not just features. \
Constraints: start with action verbs, keep each <9 words. \
Output ONLY the bullet lines, one per line. No bullet symbols, no numbering, no headings, no extra text.";

const CTA_PROMPT: &str = "You are a professional copywriter. Generate a compelling call-to-action that reduces anxiety and sets clear expectations. \
Constraints: 2-5 words, action-oriented; include trust signals where relevant (e.g., Free, No card). \
Output one CTA ONLY as plain text. No options, no prefixes, no quotes, no markdown.";

const ALT_TEXT_PROMPT: &str = "You are an accessibility expert. Create descriptive alt text that helps screen readers understand the image content. \
Constraints: <125 characters, specific about what is shown, avoid \"image of\". \
Output ONLY the alt text sentence. No prefixes or extra formatting.";

const TAGLINE_PROMPT: &str = "You are a professional copywriter. Create a memorable tagline (3-5 words) that reinforces the value proposition. \
Constraints: Avoid clichés. \
Output one tagline ONLY as plain text. No options, no prefixes, no quotes, no markdown.";

const SUBJECT_PROMPT: &str = "You are an email marketing expert. Generate a high-open-rate subject line that creates curiosity without being clickbait. \
Constraints: ~45 characters, action-oriented. \
Output one subject line ONLY as plain text. No options, no prefixes, no quotes, no markdown.";

const TEXT_PROMPT: &str = "You are a professional copywriter. Generate clear, engaging text content that provides value to the reader. \
Constraints: Focus on benefits over features. \
Output ONLY the requested text. No prefixes, no headings, no markdown.";

/// System prompt for a content type.
///
/// Unknown tags never reach this function: `ContentType::from_tag` maps them
/// to `Text`, whose template is the generic fallback.
pub fn system_prompt(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Headline => HEADLINE_PROMPT,
        ContentType::Description => DESCRIPTION_PROMPT,
        ContentType::Bullets => BULLETS_PROMPT,
        ContentType::Cta => CTA_PROMPT,
        ContentType::AltText => ALT_TEXT_PROMPT,
        ContentType::Tagline => TAGLINE_PROMPT,
        ContentType::Subject => SUBJECT_PROMPT,
        ContentType::Text => TEXT_PROMPT,
    }
}

/// Builds the single prompt string sent to the model.
pub fn build_generation_prompt(system_prompt: &str, user_instruction: &str) -> String {
    format!(
        "{}\n\nUser request: {}\n\nGenerate the content:",
        system_prompt, user_instruction
    )
}
