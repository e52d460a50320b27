//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use url::Url;

use crate::task::{Filter, Priority, SortKey, TaskStatus, DEFAULT_ESTIMATE_MINUTES};

/// Top-level CLI parser for `taskflow`.
#[derive(Debug, Parser)]
#[command(name = "taskflow", version, about = "Track tasks, plan goals, and share task lists as links")]
pub struct Cli {
    /// Directory holding the task list.
    #[arg(long, global = true, env = "TASKFLOW_STORE", value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a task to the top of the list.
    Add {
        /// Task title.
        title: String,
        /// Priority: low, medium, high or urgent.
        #[arg(short, long, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Estimated minutes.
        #[arg(short, long, default_value_t = DEFAULT_ESTIMATE_MINUTES)]
        minutes: u32,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Longer description.
        #[arg(short, long)]
        description: Option<String>,
        /// Tag; repeat for several.
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// List tasks.
    List {
        /// Which tasks to show.
        #[arg(short, long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
        /// Sort order.
        #[arg(short, long, value_enum, default_value_t = SortKey::Created)]
        sort: SortKey,
    },
    /// Change a task's status.
    Status {
        /// Task id or a unique prefix of one.
        id: String,
        /// New status: todo, in-progress or done.
        status: TaskStatus,
    },
    /// Delete a task.
    Delete {
        /// Task id or a unique prefix of one.
        id: String,
    },
    /// Show counts by status and the completion rate.
    Stats,
    /// Break a goal into subtasks with the language model and add them.
    Plan {
        /// The goal to break down.
        goal: String,
    },
    /// Ask the language model how to approach today's pending tasks.
    Advice,
    /// Print a link that carries tasks to another board.
    Share {
        /// Task ids (or unique prefixes) to share; defaults to every pending task.
        ids: Vec<String>,
        /// Page URL to build the link on.
        #[arg(long, env = "TASKFLOW_BASE_URL")]
        base_url: Option<Url>,
    },
    /// Import tasks from a share link or bare token.
    Import {
        /// Share link, `import=` query, or token.
        link: String,
    },
}
