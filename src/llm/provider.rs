//! Text generator trait — the seam between the orchestrator and a model.
//!
//! The orchestrator only needs "prompt in, text out" plus a way to ask
//! whether the backend has its credential before making a call.

use crate::error::GenerateError;
use crate::retry::{retry_if, RetryPolicy};
use std::future::Future;

pub trait TextGenerator: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Whether the backend has the credential it needs.
    fn is_configured(&self) -> bool;

    /// Send one composed prompt and return the raw completion text.
    fn generate_text(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, GenerateError>> + Send;
}

/// Wraps a generator so transient failures are retried with exponential backoff.
pub struct RetryingGenerator<G> {
    inner: G,
    policy: RetryPolicy,
}

impl<G: TextGenerator> RetryingGenerator<G> {
    pub fn new(inner: G, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: TextGenerator> TextGenerator for RetryingGenerator<G> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        let inner = &self.inner;
        retry_if(
            self.policy,
            move || inner.generate_text(prompt),
            GenerateError::is_retryable,
        )
        .await
    }
}

/// Either a plain generator or one wrapped for retries, picked at startup.
pub enum MaybeRetrying<G> {
    Plain(G),
    Retrying(RetryingGenerator<G>),
}

impl<G: TextGenerator> MaybeRetrying<G> {
    /// Wrap `inner` only when the policy allows more than one attempt.
    pub fn new(inner: G, policy: Option<RetryPolicy>) -> Self {
        match policy {
            Some(p) if p.max_attempts > 1 => {
                MaybeRetrying::Retrying(RetryingGenerator::new(inner, p))
            }
            _ => MaybeRetrying::Plain(inner),
        }
    }
}

impl<G: TextGenerator> TextGenerator for MaybeRetrying<G> {
    fn name(&self) -> &str {
        match self {
            MaybeRetrying::Plain(g) => g.name(),
            MaybeRetrying::Retrying(g) => g.name(),
        }
    }

    fn is_configured(&self) -> bool {
        match self {
            MaybeRetrying::Plain(g) => g.is_configured(),
            MaybeRetrying::Retrying(g) => g.is_configured(),
        }
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        match self {
            MaybeRetrying::Plain(g) => g.generate_text(prompt).await,
            MaybeRetrying::Retrying(g) => g.generate_text(prompt).await,
        }
    }
}
