//! Live adapter for the `LlmClient` port using the Gemini
//! `generateContent` API.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
use crate::ports::PortError;

/// Default API root for the Gemini REST API.
pub const GEMINI_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Live LLM client that calls the Gemini API.
pub struct LiveLlmClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LiveLlmClient {
    /// Creates a client for `endpoint`. Without an API key every call fails
    /// with a clear message instead of hitting the network.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into(), api_key }
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.endpoint.trim_end_matches('/'))
    }
}

/// Request body sent to `generateContent`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a serde_json::Value>,
}

impl<'a> GeminiRequest<'a> {
    fn from_completion(request: &'a CompletionRequest) -> Self {
        let json_mode = request.response_schema.is_some();
        Self {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: &request.prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: request.max_tokens,
                response_mime_type: json_mode.then_some("application/json"),
                response_schema: request.response_schema.as_ref(),
            },
        }
    }
}

/// Top-level response from `generateContent`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

/// Finish reasons that mean the model stopped before producing its answer.
const CUT_OFF_REASONS: [&str; 4] = ["MAX_TOKENS", "SAFETY", "RECITATION", "PROHIBITED_CONTENT"];

/// Concatenates the text parts of the first candidate.
///
/// An empty reply cut off by the token limit or a safety block is an error,
/// not an empty answer.
fn parse_response(body: &str) -> Result<CompletionResponse, PortError> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| -> PortError { format!("Failed to parse Gemini API response: {e}").into() })?;

    let (text, finish_reason) = response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            let text = candidate
                .content
                .map(|content| content.parts.into_iter().map(|part| part.text).collect::<String>())
                .unwrap_or_default();
            (text, candidate.finish_reason)
        })
        .unwrap_or_default();

    if let Some(reason) = finish_reason.filter(|r| CUT_OFF_REASONS.contains(&r.as_str())) {
        if text.trim().is_empty() {
            return Err(format!("Gemini API returned no text (finish reason {reason})").into());
        }
        tracing::warn!(finish_reason = %reason, "Gemini reply was cut short");
    }
    let usage = response.usage_metadata;

    Ok(CompletionResponse {
        text,
        prompt_tokens: usage.as_ref().map_or(0, |u| u.prompt_token_count),
        completion_tokens: usage.as_ref().map_or(0, |u| u.candidates_token_count),
    })
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let api_key = self.api_key.as_deref().ok_or_else(|| -> PortError {
                "GEMINI_API_KEY environment variable not set".into()
            })?;

            tracing::debug!(model = %request.model, "sending generateContent request");
            let response = self
                .client
                .post(self.url_for(&request.model))
                .header("x-goog-api-key", api_key)
                .json(&GeminiRequest::from_completion(&request))
                .send()
                .await
                .map_err(|e| -> PortError { format!("Gemini API request failed: {e}").into() })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| -> PortError {
                format!("Failed to read Gemini API response: {e}").into()
            })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(format!("Gemini API error ({}): {msg}", status.as_u16()).into());
            }

            parse_response(&body)
        })
    }
}
