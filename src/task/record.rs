//! Task record shapes: the persisted record, the reduced transfer shape,
//! and the planner's proposal shape.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::priority::Priority;
use super::status::TaskStatus;

/// Estimate used when a task without one is exported in a share link.
pub const DEFAULT_ESTIMATE_MINUTES: u32 = 30;

/// A task as stored on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Unique within one store; minted at creation and never changed.
    pub id: String,
    /// Display title, never blank.
    pub title: String,
    /// Optional free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How urgent the task is.
    pub priority: Priority,
    /// Workflow status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Optional calendar due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Optional estimate. `Some(0)` is a real estimate, not "unknown".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
    /// Labels in insertion order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Reduces this record to the shape carried by a share link.
    #[must_use]
    pub fn to_transfer(&self) -> TransferTaskRecord {
        TransferTaskRecord {
            title: self.title.clone(),
            priority: self.priority,
            estimated_minutes: self.estimated_minutes.unwrap_or(DEFAULT_ESTIMATE_MINUTES),
        }
    }
}

/// The reduced task shape carried by the transfer codec.
///
/// Deliberately has no id, status or tags: the receiver mints those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTaskRecord {
    /// Non-blank title.
    pub title: String,
    /// Priority proposed by the sender.
    pub priority: Priority,
    /// Estimate in minutes.
    pub estimated_minutes: u32,
}

impl TransferTaskRecord {
    /// Convenience constructor.
    pub fn new(title: impl Into<String>, priority: Priority, estimated_minutes: u32) -> Self {
        Self { title: title.into(), priority, estimated_minutes }
    }
}

/// A subtask proposed by the planning service for a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedSubtask {
    /// Actionable title.
    pub title: String,
    /// Brief details; may be empty.
    #[serde(default)]
    pub description: String,
    /// Suggested priority.
    pub priority: Priority,
    /// Estimated duration.
    pub estimated_minutes: u32,
}
