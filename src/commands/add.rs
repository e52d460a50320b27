//! `taskflow add` command.

use std::path::Path;

use chrono::NaiveDate;

use crate::board::{NewTask, TaskBoard};
use crate::context::ServiceContext;
use crate::task::Priority;

/// Parsed `add` arguments.
#[derive(Debug)]
pub struct AddArgs<'a> {
    /// Task title.
    pub title: &'a str,
    /// Priority.
    pub priority: Priority,
    /// Estimated minutes.
    pub minutes: u32,
    /// Optional due date.
    pub due: Option<NaiveDate>,
    /// Optional description.
    pub description: Option<&'a str>,
    /// Tags.
    pub tags: &'a [String],
}

/// Execute the `add` command.
///
/// # Errors
///
/// Returns an error string if the title is blank.
pub fn run(ctx: &ServiceContext, root: &Path, args: AddArgs<'_>) -> Result<(), String> {
    let board = TaskBoard::new(ctx, root);
    let task = board
        .add_task(NewTask {
            title: args.title.to_string(),
            description: args.description.map(str::to_string),
            priority: args.priority,
            due_date: args.due,
            estimated_minutes: Some(args.minutes),
            tags: args.tags.to_vec(),
        })
        .map_err(|e| e.to_string())?;

    println!("Added {} [{}] {}", super::list::short_id(&task.id), task.priority, task.title);
    Ok(())
}
