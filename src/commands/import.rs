//! `taskflow import` command.

use std::path::Path;

use crate::board::TaskBoard;
use crate::context::ServiceContext;

/// Execute the `import` command.
///
/// # Errors
///
/// Returns an error string if `link` carries no valid token. The task list
/// is left as it was.
pub fn run(ctx: &ServiceContext, root: &Path, link: &str) -> Result<(), String> {
    let imported = TaskBoard::new(ctx, root).import(link).map_err(|e| e.to_string())?;
    for task in &imported {
        println!("+ {} [{}] {}", super::list::short_id(&task.id), task.priority, task.title);
    }
    println!("\nImported {} task(s).", imported.len());
    Ok(())
}
