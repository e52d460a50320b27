//! Filtered and sorted views over a task list, plus status counts.

use std::cmp::Ordering;

use clap::ValueEnum;

use super::record::TaskRecord;
use super::status::TaskStatus;

/// Which tasks a view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Filter {
    /// Everything.
    #[default]
    All,
    /// Anything not done.
    #[value(alias = "todo")]
    Pending,
    /// Finished tasks only.
    Done,
}

impl Filter {
    /// Returns `true` if `task` belongs in this view.
    #[must_use]
    pub fn matches(self, task: &TaskRecord) -> bool {
        match self {
            Self::All => true,
            Self::Pending => task.status.is_pending(),
            Self::Done => task.status == TaskStatus::Done,
        }
    }
}

/// How a view orders its tasks. All orderings are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Store order (newest additions first).
    #[default]
    Created,
    /// Urgent first.
    Priority,
    /// Earliest due date first, undated last.
    Due,
    /// Shortest estimate first, unestimated last.
    Estimate,
}

/// Selects and orders tasks for display.
#[must_use]
pub fn view(tasks: &[TaskRecord], filter: Filter, sort: SortKey) -> Vec<&TaskRecord> {
    let mut selected: Vec<&TaskRecord> = tasks.iter().filter(|t| filter.matches(t)).collect();
    match sort {
        SortKey::Created => {}
        SortKey::Priority => selected.sort_by(|a, b| b.priority.cmp(&a.priority)),
        SortKey::Due => selected.sort_by(|a, b| none_last(a.due_date, b.due_date)),
        SortKey::Estimate => {
            selected.sort_by(|a, b| none_last(a.estimated_minutes, b.estimated_minutes));
        }
    }
    selected
}

fn none_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Number of tasks in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Not started.
    pub todo: usize,
    /// In progress.
    pub in_progress: usize,
    /// Finished.
    pub done: usize,
}

impl StatusCounts {
    /// Tallies `tasks` by status.
    #[must_use]
    pub fn tally(tasks: &[TaskRecord]) -> Self {
        tasks.iter().fold(Self::default(), |mut counts, task| {
            match task.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Done => counts.done += 1,
            }
            counts
        })
    }

    /// Total number of tasks counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.done
    }

    /// Share of tasks done, rounded down to a whole percent. Zero when empty.
    #[must_use]
    pub fn completion_percent(&self) -> usize {
        match self.total() {
            0 => 0,
            total => self.done * 100 / total,
        }
    }
}
