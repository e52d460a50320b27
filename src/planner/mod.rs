//! Generative task planning.
//!
//! Two calls on the language model: breaking a goal into proposed subtasks,
//! and turning the pending task titles into a short piece of advice for the
//! day. Goal expansion reports failure; the advice never does.

mod expand;
mod summary;

use thiserror::Error;

pub use expand::expand_goal;
pub use summary::{summarize_workload, EMPTY_REPLY_ADVICE, FAILURE_ADVICE};

/// Why goal expansion produced no subtasks.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// The goal was blank, so the service was not called.
    #[error("goal is empty")]
    EmptyGoal,
    /// The service call itself failed.
    #[error("planning service failed: {0}")]
    Service(String),
    /// The service replied with something that is not a subtask list.
    #[error("planning service returned an unusable reply: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Strips a Markdown code fence the model sometimes wraps JSON in.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
