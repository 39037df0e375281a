//! LLM domain — prompt composition, model calls and output cleanup.
//!
//! Public API for the generation side of the field plugin.
//! External code should only use the items exported here.
//!
//! Pieces:
//!   - prompts.rs  — per-content-type system prompts + prompt composer
//!   - sanitize.rs — turns raw model text into the requested shape
//!   - provider.rs — `TextGenerator` seam + retry wrapper
//!   - gemini.rs   — Google Gemini client
//!   - generate.rs — the orchestrator tying it together

pub mod gemini;
mod generate;
pub mod prompts;
pub mod provider;
pub mod sanitize;
pub mod types;

pub use gemini::GeminiClient;
pub use generate::generate;
pub use provider::{MaybeRetrying, RetryingGenerator, TextGenerator};
pub use sanitize::{sanitize, sanitize_with, SanitizeLimits};
pub use types::{GenerationRequest, GenerationResult};
