//! `taskflow status` command.

use std::path::Path;

use crate::board::TaskBoard;
use crate::context::ServiceContext;
use crate::task::TaskStatus;

/// Execute the `status` command.
///
/// # Errors
///
/// Returns an error string if `id` matches no task or several.
pub fn run(ctx: &ServiceContext, root: &Path, id: &str, status: TaskStatus) -> Result<(), String> {
    let task = TaskBoard::new(ctx, root).set_status(id, status).map_err(|e| e.to_string())?;
    println!("{} is now {}: {}", super::list::short_id(&task.id), task.status, task.title);
    Ok(())
}
