//! Gemini text generation — one-shot `generateContent` via Google AI API.
//!
//! Key differences from a chat-style API:
//! - API key in URL query param, not header
//! - the composed prompt travels as a single user part (no system field)
//! - text arrives in `candidates[0].content.parts[*].text`
//! - a blocked prompt returns 200 with `promptFeedback.blockReason` and no candidates

use super::prompts::{GEMINI_MODEL, MAX_OUTPUT_TOKENS, TEMPERATURE};
use super::provider::TextGenerator;
use crate::config::Config;
use crate::error::GenerateError;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Longest slice of an error body kept in logs and error messages.
const ERROR_BODY_PREVIEW: usize = 200;

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    model: String,
    max_output_tokens: u32,
    temperature: f64,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_base: DEFAULT_API_BASE.to_string(),
            model: GEMINI_MODEL.to_string(),
            max_output_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut client = Self::new(config.api_key.clone());
        client.api_base = config.api_base.trim_end_matches('/').to_string();
        client.model = config.model.clone();
        client
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.api_base, self.model, api_key
        )
    }
}

impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        let api_key = self.api_key.as_deref().ok_or(GenerateError::MissingApiKey)?;

        log::info!("[GEMINI] Model: {}", self.model);
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.endpoint(api_key))
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "contents": [
                    {
                        "role": "user",
                        "parts": [
                            {
                                "text": prompt
                            }
                        ]
                    }
                ],
                "generationConfig": {
                    "maxOutputTokens": self.max_output_tokens,
                    "temperature": self.temperature
                }
            }))
            .send()
            .await
            .map_err(|e| {
                log::error!("[GEMINI] HTTP request failed: {}", e);
                GenerateError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;
        log::info!(
            "[GEMINI] {} in {}ms, {} bytes",
            status,
            start.elapsed().as_millis(),
            body.len()
        );

        if !status.is_success() {
            let preview = preview(&body);
            log::error!("[GEMINI] API returned {}: {}", status, preview);
            return Err(GenerateError::Http {
                status: status.as_u16(),
                body: preview,
            });
        }

        extract_gemini_text(&body)
    }
}

/// Pull the completion text out of a `generateContent` response body.
///
/// Concatenates every text part of the first candidate. A response with no
/// candidates and no block reason yields an empty string.
fn extract_gemini_text(body: &str) -> Result<String, GenerateError> {
    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| GenerateError::Decode(e.to_string()))?;

    if let Some(reason) = json
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|r| r.as_str())
    {
        log::warn!("[GEMINI] Prompt blocked: {}", reason);
        return Err(GenerateError::Blocked(reason.to_string()));
    }

    let parts = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array());

    Ok(parts
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect::<String>()
        })
        .unwrap_or_default())
}

fn preview(body: &str) -> String {
    body.chars().take(ERROR_BODY_PREVIEW).collect()
}
