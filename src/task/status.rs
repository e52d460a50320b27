//! Task workflow status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a task is in its workflow. Any status can move to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started. Every new task starts here.
    #[default]
    Todo,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Returns `true` for anything not yet `Done`.
    #[must_use]
    pub fn is_pending(self) -> bool {
        self != Self::Done
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Todo => "Todo",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        })
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" | "to-do" => Ok(Self::Todo),
            "in-progress" | "in_progress" | "in progress" | "inprogress" | "doing" => {
                Ok(Self::InProgress)
            }
            "done" => Ok(Self::Done),
            _ => Err(format!("unknown status {s:?} (expected todo, in-progress or done)")),
        }
    }
}
