//! Task data model.
//!
//! Defines the persisted task record, the reduced shape carried by share
//! links, the planner's proposal shape, and the filter/sort views used by
//! the CLI.

mod priority;
mod record;
mod status;
pub mod view;

pub use priority::Priority;
pub use record::{ProposedSubtask, TaskRecord, TransferTaskRecord, DEFAULT_ESTIMATE_MINUTES};
pub use status::TaskStatus;
pub use view::{view, Filter, SortKey, StatusCounts};
