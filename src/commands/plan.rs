//! `taskflow plan` command.

use std::path::Path;

use crate::board::TaskBoard;
use crate::context::ServiceContext;

/// Execute the `plan` command.
///
/// Breaks `goal` into subtasks with the language model and adds them to the
/// top of the list.
///
/// # Errors
///
/// Returns an error string if the goal is blank or the model call fails.
pub async fn run(ctx: &ServiceContext, root: &Path, model: &str, goal: &str) -> Result<(), String> {
    let added = TaskBoard::new(ctx, root).plan_goal(model, goal).await.map_err(|e| e.to_string())?;
    if added.is_empty() {
        println!("No subtasks suggested for that goal.");
        return Ok(());
    }
    for task in &added {
        let minutes = task.estimated_minutes.unwrap_or_default();
        println!("+ [{}] {} ({minutes}m)", task.priority, task.title);
    }
    println!("\nAdded {} task(s).", added.len());
    Ok(())
}
