//! Command dispatch and handlers.

pub mod add;
pub mod advice;
pub mod delete;
pub mod import;
pub mod list;
pub mod plan;
pub mod share;
pub mod stats;
pub mod status;

use std::env;
use std::future::Future;
use std::path::Path;

use crate::adapters::live::LiveFileSystem;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `TASKFLOW_REPLAY` names a cassette file, the clock, id generator
/// and language model replay from it; the store stays on disk.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let mut config = Config::from_env().map_err(|e| e.to_string())?;
    if let Some(store) = &cli.store {
        config.store_dir.clone_from(store);
    }

    let ctx = match env::var("TASKFLOW_REPLAY") {
        Ok(path) if !path.is_empty() => {
            tracing::info!(cassette = %path, "replaying service ports");
            let mut ctx = ServiceContext::replaying(Path::new(&path))?;
            ctx.fs = Box::new(LiveFileSystem);
            ctx
        }
        _ => ServiceContext::live(&config),
    };

    dispatch_with_context(&cli.command, &ctx, &config)
}

/// Dispatch a command with the given service context.
fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<(), String> {
    let root = config.store_dir.as_path();
    match command {
        Command::Add { title, priority, minutes, due, description, tags } => add::run(
            ctx,
            root,
            add::AddArgs {
                title,
                priority: *priority,
                minutes: *minutes,
                due: *due,
                description: description.as_deref(),
                tags,
            },
        ),
        Command::List { filter, sort } => list::run(ctx, root, *filter, *sort),
        Command::Status { id, status } => status::run(ctx, root, id, *status),
        Command::Delete { id } => delete::run(ctx, root, id),
        Command::Stats => stats::run(ctx, root),
        Command::Plan { goal } => block_on(plan::run(ctx, root, &config.model, goal))?,
        Command::Advice => block_on(advice::run(ctx, root, &config.model))?,
        Command::Share { ids, base_url } => {
            share::run(ctx, root, base_url.as_ref().unwrap_or(&config.base_url), ids)
        }
        Command::Import { link } => import::run(ctx, root, link),
    }
}

/// Runs a future on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    Ok(runtime.block_on(future))
}
