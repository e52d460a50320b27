//! `taskflow share` command.

use std::path::Path;

use url::Url;

use crate::board::TaskBoard;
use crate::context::ServiceContext;

/// Execute the `share` command.
///
/// Prints the link on stdout alone so it can be piped; the count goes to
/// stderr.
///
/// # Errors
///
/// Returns an error string if an id is unknown or there is nothing to share.
pub fn run(ctx: &ServiceContext, root: &Path, base: &Url, ids: &[String]) -> Result<(), String> {
    let link = TaskBoard::new(ctx, root).share_link(base, ids).map_err(|e| e.to_string())?;
    println!("{}", link.url);
    eprintln!("Shared {} task(s).", link.count);
    Ok(())
}
