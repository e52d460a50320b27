//! LLM client port for the generative-language service.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use super::PortError;

/// Boxed future returned by [`LlmClient::complete`]; boxing keeps the trait
/// dyn-compatible.
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, PortError>> + Send + 'a>>;

/// A single-prompt generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (e.g. `"gemini-2.5-flash"`).
    pub model: String,
    /// Prompt text.
    pub prompt: String,
    /// Upper bound on generated tokens. `None` leaves it to the model,
    /// which on thinking models also covers the thinking budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// When set, the reply must be JSON matching this schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// The generated reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text; may be empty.
    pub text: String,
    /// Prompt tokens consumed, when reported.
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion tokens generated, when reported.
    #[serde(default)]
    pub completion_tokens: u32,
}

/// Sends generation requests to a language model.
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, quota, etc.).
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_>;
}
