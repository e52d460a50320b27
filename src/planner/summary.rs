//! Daily workload advice.

use super::PlanningError;
use crate::ports::llm::{CompletionRequest, LlmClient};

/// Advice used when the model replies with nothing.
pub const EMPTY_REPLY_ADVICE: &str = "Focus on your high priority tasks first!";
/// Advice used when the call fails.
pub const FAILURE_ADVICE: &str = "Plan your day by tackling the hardest task first.";

/// Asks the model for a short, encouraging plan for `pending_titles`.
///
/// Never fails: an empty reply or any error degrades to a fixed sentence.
pub async fn summarize_workload(
    llm: &dyn LlmClient,
    model: &str,
    pending_titles: &[String],
) -> String {
    match request_summary(llm, model, pending_titles).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => EMPTY_REPLY_ADVICE.to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "workload summary failed, using fallback advice");
            FAILURE_ADVICE.to_string()
        }
    }
}

async fn request_summary(
    llm: &dyn LlmClient,
    model: &str,
    pending_titles: &[String],
) -> Result<String, PlanningError> {
    let request = CompletionRequest {
        model: model.to_string(),
        prompt: build_summary_prompt(pending_titles)?,
        max_tokens: None,
        response_schema: None,
    };
    let response =
        llm.complete(&request).await.map_err(|e| PlanningError::Service(e.to_string()))?;
    Ok(response.text)
}

fn build_summary_prompt(pending_titles: &[String]) -> Result<String, PlanningError> {
    let list = serde_json::to_string(pending_titles)?;
    Ok(format!(
        "I have this list of tasks: {list}.\n\
         Please provide a short, encouraging summary of how I should tackle this day efficiently.\n\
         Keep it under 50 words."
    ))
}
