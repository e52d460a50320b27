//! `taskflow list` command.

use std::path::Path;

use crate::board::TaskBoard;
use crate::context::ServiceContext;
use crate::task::{view, Filter, SortKey, TaskRecord};

/// Characters of an id shown in tables; enough to use as a prefix.
const SHORT_ID_LEN: usize = 8;

/// Execute the `list` command.
///
/// Displays a table of the tasks matching `filter`, ordered by `sort`.
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
pub fn run(ctx: &ServiceContext, root: &Path, filter: Filter, sort: SortKey) -> Result<(), String> {
    let tasks = TaskBoard::new(ctx, root).tasks();
    let shown = view(&tasks, filter, sort);
    if shown.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }
    print!("{}", render_table(&shown));
    println!("\n{} task(s) shown.", shown.len());
    Ok(())
}

/// Leading characters of `id` used in tables and confirmations.
pub(crate) fn short_id(id: &str) -> &str {
    id.char_indices().nth(SHORT_ID_LEN).map_or(id, |(end, _)| &id[..end])
}

fn render_table(tasks: &[&TaskRecord]) -> String {
    let rows: Vec<[String; 6]> = tasks
        .iter()
        .map(|t| {
            [
                short_id(&t.id).to_string(),
                t.status.to_string(),
                t.priority.to_string(),
                t.estimated_minutes.map_or_else(|| "-".to_string(), |m| format!("{m}m")),
                t.due_date.map_or_else(|| "-".to_string(), |d| d.to_string()),
                t.title.clone(),
            ]
        })
        .collect();

    let headers = ["ID", "STATUS", "PRIORITY", "EST", "DUE", "TITLE"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers.map(String::from), &widths);
    push_row(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
