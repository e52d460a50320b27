//! `taskflow advice` command.

use std::path::Path;

use crate::board::TaskBoard;
use crate::context::ServiceContext;

/// Execute the `advice` command.
///
/// # Errors
///
/// Never fails: advice falls back to a fixed sentence when the model is
/// unavailable.
pub async fn run(ctx: &ServiceContext, root: &Path, model: &str) -> Result<(), String> {
    println!("{}", TaskBoard::new(ctx, root).advice(model).await);
    Ok(())
}
