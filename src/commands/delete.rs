//! `taskflow delete` command.

use std::path::Path;

use crate::board::TaskBoard;
use crate::context::ServiceContext;

/// Execute the `delete` command.
///
/// # Errors
///
/// Returns an error string if `id` matches no task or several.
pub fn run(ctx: &ServiceContext, root: &Path, id: &str) -> Result<(), String> {
    let task = TaskBoard::new(ctx, root).delete(id).map_err(|e| e.to_string())?;
    println!("Deleted {}: {}", super::list::short_id(&task.id), task.title);
    Ok(())
}
