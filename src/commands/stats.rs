//! `taskflow stats` command.

use std::path::Path;

use crate::board::TaskBoard;
use crate::context::ServiceContext;
use crate::task::StatusCounts;

/// Execute the `stats` command.
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
pub fn run(ctx: &ServiceContext, root: &Path) -> Result<(), String> {
    let counts = StatusCounts::tally(&TaskBoard::new(ctx, root).tasks());
    print!("{}", render(&counts));
    Ok(())
}

fn render(counts: &StatusCounts) -> String {
    format!(
        "Total:        {}\nTo do:        {}\nIn progress:  {}\nDone:         {}\nCompletion:   {}%\n",
        counts.total(),
        counts.todo,
        counts.in_progress,
        counts.done,
        counts.completion_percent(),
    )
}
