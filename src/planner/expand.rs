//! Goal expansion into proposed subtasks.

use serde_json::json;

use super::{strip_code_fence, PlanningError};
use crate::ports::llm::{CompletionRequest, LlmClient};
use crate::task::ProposedSubtask;

/// Asks the model to break `goal` into an ordered list of subtasks.
///
/// An empty reply means "no subtasks" and yields an empty list.
///
/// # Errors
///
/// Returns [`PlanningError::EmptyGoal`] for a blank goal (without calling
/// the service), [`PlanningError::Service`] if the call fails, and
/// [`PlanningError::InvalidResponse`] if the reply is not a subtask list.
pub async fn expand_goal(
    llm: &dyn LlmClient,
    model: &str,
    goal: &str,
) -> Result<Vec<ProposedSubtask>, PlanningError> {
    let goal = goal.trim();
    if goal.is_empty() {
        return Err(PlanningError::EmptyGoal);
    }

    let request = CompletionRequest {
        model: model.to_string(),
        prompt: build_expansion_prompt(goal),
        max_tokens: None,
        response_schema: Some(subtask_schema()),
    };

    let response = llm.complete(&request).await.map_err(|e| {
        tracing::warn!(error = %e, "goal expansion failed");
        PlanningError::Service(e.to_string())
    })?;

    let subtasks = parse_subtasks(&response.text)?;
    tracing::debug!(subtasks = subtasks.len(), "expanded goal");
    Ok(subtasks)
}

fn build_expansion_prompt(goal: &str) -> String {
    format!(
        r#"Break down the following goal/task into smaller, actionable subtasks. Goal: "{goal}".
Return a logical sequence of steps. Estimate time in minutes for each.
Assign a priority based on importance."#
    )
}

/// Response schema in the Gemini `responseSchema` dialect.
fn subtask_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {"type": "STRING", "description": "Actionable title of the subtask"},
                "description": {"type": "STRING", "description": "Brief details about the task"},
                "priority": {"type": "STRING", "enum": ["Low", "Medium", "High", "Urgent"]},
                "estimatedMinutes": {
                    "type": "INTEGER",
                    "description": "Estimated duration in minutes"
                }
            },
            "required": ["title", "priority", "estimatedMinutes"]
        }
    })
}

fn parse_subtasks(text: &str) -> Result<Vec<ProposedSubtask>, PlanningError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Ok(Vec::new());
    }
    let subtasks: Vec<ProposedSubtask> = serde_json::from_str(body)?;
    Ok(subtasks.into_iter().filter(|s| !s.title.trim().is_empty()).collect())
}
