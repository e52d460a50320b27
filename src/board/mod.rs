//! The task board: every user-facing operation on the stored list.
//!
//! Each mutating call loads the list, changes it, and writes it back. A
//! failed write is logged and otherwise ignored; the in-memory result is
//! still returned. Operations that fail before mutating (bad token, unknown
//! id, planner error) leave the stored list untouched.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use url::Url;

use crate::context::ServiceContext;
use crate::planner::{self, PlanningError};
use crate::store::TaskStore;
use crate::task::{
    Priority, ProposedSubtask, TaskRecord, TaskStatus, TransferTaskRecord,
    DEFAULT_ESTIMATE_MINUTES,
};
use crate::transfer::{self, DecodeError};

/// Tag put on tasks that came from goal expansion.
pub const AI_GENERATED_TAG: &str = "AI-Generated";
/// Advice shown when nothing is pending.
pub const ALL_CAUGHT_UP: &str = "You're all caught up! Great job.";

/// Why a board operation did nothing.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A task needs a non-blank title.
    #[error("task title cannot be empty")]
    EmptyTitle,
    /// No task id starts with the given text.
    #[error("no task matches id {0:?}")]
    TaskNotFound(String),
    /// More than one task id starts with the given text.
    #[error("id {prefix:?} matches {count} tasks; use more characters")]
    AmbiguousId {
        /// What the user typed.
        prefix: String,
        /// How many ids it matched.
        count: usize,
    },
    /// There were no tasks to put in a share link.
    #[error("no tasks to share")]
    NothingToShare,
    /// The import token or link was malformed.
    #[error("could not import tasks: {0}")]
    Decode(#[from] DecodeError),
    /// Goal expansion failed.
    #[error(transparent)]
    Planning(#[from] PlanningError),
}

/// Fields for a hand-entered task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Title; must not be blank.
    pub title: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Priority.
    pub priority: Priority,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional estimate.
    pub estimated_minutes: Option<u32>,
    /// Labels.
    pub tags: Vec<String>,
}

impl NewTask {
    /// Quick-add defaults: medium priority, thirty minutes, no tags.
    pub fn quick(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: Priority::Medium,
            due_date: None,
            estimated_minutes: Some(DEFAULT_ESTIMATE_MINUTES),
            tags: Vec::new(),
        }
    }
}

/// A generated share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Full link carrying the token.
    pub url: Url,
    /// Number of tasks encoded.
    pub count: usize,
}

/// Operations on the stored task list.
pub struct TaskBoard<'a> {
    ctx: &'a ServiceContext,
    store: TaskStore<'a>,
}

impl<'a> TaskBoard<'a> {
    /// Creates a board over the store at `root`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, store: TaskStore::new(ctx, root) }
    }

    /// The current list, newest additions first.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskRecord> {
        self.store.load()
    }

    /// Adds a task at the front of the list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyTitle`] for a blank title.
    pub fn add_task(&self, new: NewTask) -> Result<TaskRecord, BoardError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        let record = TaskRecord {
            id: self.ctx.id_gen.generate_id(),
            title: title.to_string(),
            description: new.description.filter(|d| !d.trim().is_empty()),
            priority: new.priority,
            status: TaskStatus::Todo,
            due_date: new.due_date,
            estimated_minutes: new.estimated_minutes,
            tags: new.tags,
            created_at: self.ctx.clock.now(),
        };

        let mut tasks = self.store.load();
        tasks.insert(0, record.clone());
        self.persist(&tasks);
        tracing::info!(id = %record.id, "added task");
        Ok(record)
    }

    /// Moves a task to `status`.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` matches no task or more than one.
    pub fn set_status(&self, id: &str, status: TaskStatus) -> Result<TaskRecord, BoardError> {
        let mut tasks = self.store.load();
        let index = find_task(&tasks, id)?;
        tasks[index].status = status;
        self.persist(&tasks);
        Ok(tasks.swap_remove(index))
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` matches no task or more than one.
    pub fn delete(&self, id: &str) -> Result<TaskRecord, BoardError> {
        let mut tasks = self.store.load();
        let index = find_task(&tasks, id)?;
        let removed = tasks.remove(index);
        self.persist(&tasks);
        Ok(removed)
    }

    /// Adds planner proposals as one block at the front, tagged
    /// [`AI_GENERATED_TAG`].
    pub fn add_proposed(&self, proposals: Vec<ProposedSubtask>) -> Vec<TaskRecord> {
        let created_at = self.ctx.clock.now();
        let added: Vec<TaskRecord> = proposals
            .into_iter()
            .map(|p| TaskRecord {
                id: self.ctx.id_gen.generate_id(),
                title: p.title,
                description: Some(p.description).filter(|d| !d.trim().is_empty()),
                priority: p.priority,
                status: TaskStatus::Todo,
                due_date: None,
                estimated_minutes: Some(p.estimated_minutes),
                tags: vec![AI_GENERATED_TAG.to_string()],
                created_at,
            })
            .collect();
        self.prepend(&added);
        added
    }

    /// Expands `goal` with the planner and adds the proposals.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Planning`] if expansion fails; nothing is added.
    pub async fn plan_goal(&self, model: &str, goal: &str) -> Result<Vec<TaskRecord>, BoardError> {
        let proposals = planner::expand_goal(self.ctx.llm.as_ref(), model, goal).await?;
        Ok(self.add_proposed(proposals))
    }

    /// Imports the tasks carried by a share link or bare token.
    ///
    /// Each imported task gets a fresh id, status `Todo` and no tags, and
    /// the block goes to the front in token order. Importing the same token
    /// twice adds two independent copies.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Decode`] if the input is not a valid link or
    /// token; the stored list is not touched.
    pub fn import(&self, link_or_token: &str) -> Result<Vec<TaskRecord>, BoardError> {
        let token = transfer::extract_token(link_or_token)?;
        let incoming = transfer::decode(&token)?;

        let created_at = self.ctx.clock.now();
        let imported: Vec<TaskRecord> = incoming
            .into_iter()
            .map(|t| TaskRecord {
                id: self.ctx.id_gen.generate_id(),
                title: t.title,
                description: None,
                priority: t.priority,
                status: TaskStatus::Todo,
                due_date: None,
                estimated_minutes: Some(t.estimated_minutes),
                tags: Vec::new(),
                created_at,
            })
            .collect();
        self.prepend(&imported);
        tracing::info!(tasks = imported.len(), "imported tasks from share token");
        Ok(imported)
    }

    /// Builds a share link on `base` for the tasks named by `ids`, or for
    /// every pending task when `ids` is empty. Tasks keep list order.
    ///
    /// # Errors
    ///
    /// Returns an error if an id matches no task or several, or if there is
    /// nothing to share.
    pub fn share_link(&self, base: &Url, ids: &[String]) -> Result<ShareLink, BoardError> {
        let tasks = self.store.load();
        let selected: Vec<&TaskRecord> = if ids.is_empty() {
            tasks.iter().filter(|t| t.status.is_pending()).collect()
        } else {
            let wanted = ids
                .iter()
                .map(|id| find_task(&tasks, id))
                .collect::<Result<HashSet<usize>, _>>()?;
            tasks.iter().enumerate().filter(|(i, _)| wanted.contains(i)).map(|(_, t)| t).collect()
        };
        if selected.is_empty() {
            return Err(BoardError::NothingToShare);
        }

        let records: Vec<TransferTaskRecord> = selected.iter().map(|t| t.to_transfer()).collect();
        let token = transfer::encode(&records);
        Ok(ShareLink { url: transfer::share_link(base, &token), count: records.len() })
    }

    /// Titles of every task not yet done, in list order.
    #[must_use]
    pub fn pending_titles(&self) -> Vec<String> {
        self.store
            .load()
            .into_iter()
            .filter(|t| t.status.is_pending())
            .map(|t| t.title)
            .collect()
    }

    /// A short recommendation for the day. Never fails.
    pub async fn advice(&self, model: &str) -> String {
        let pending = self.pending_titles();
        if pending.is_empty() {
            return ALL_CAUGHT_UP.to_string();
        }
        planner::summarize_workload(self.ctx.llm.as_ref(), model, &pending).await
    }

    fn prepend(&self, block: &[TaskRecord]) {
        if block.is_empty() {
            return;
        }
        let mut tasks = block.to_vec();
        tasks.extend(self.store.load());
        self.persist(&tasks);
    }

    fn persist(&self, tasks: &[TaskRecord]) {
        if let Err(err) = self.store.save(tasks) {
            tracing::warn!(error = %err, "could not save task list");
        }
    }
}

/// Finds a task by exact id, or by a prefix that matches exactly one id.
fn find_task(tasks: &[TaskRecord], id: &str) -> Result<usize, BoardError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(BoardError::TaskNotFound(String::new()));
    }
    if let Some(index) = tasks.iter().position(|t| t.id == id) {
        return Ok(index);
    }
    let matches: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.id.starts_with(id))
        .map(|(i, _)| i)
        .collect();
    match matches.as_slice() {
        [] => Err(BoardError::TaskNotFound(id.to_string())),
        [index] => Ok(*index),
        _ => Err(BoardError::AmbiguousId { prefix: id.to_string(), count: matches.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{llm_text, test_context, MemFs};
    use serde_json::json;

    fn root() -> &'static Path {
        Path::new("/store")
    }

    fn base() -> Url {
        Url::parse("http://localhost:3000/").unwrap()
    }

    fn task(title: &str, priority: Priority, minutes: u32) -> NewTask {
        NewTask { priority, estimated_minutes: Some(minutes), ..NewTask::quick(title) }
    }

    fn stored(ctx: &ServiceContext) -> String {
        ctx.fs.read_to_string(&root().join("tasks.json")).unwrap()
    }

    #[test]
    fn add_prepends_with_fresh_id_and_todo_status() {
        let ctx = test_context(MemFs::default(), &["id-1", "id-2"], vec![]);
        let board = TaskBoard::new(&ctx, root());

        board.add_task(NewTask::quick("First")).unwrap();
        let second = board.add_task(NewTask::quick("  Second  ")).unwrap();

        assert_eq!(second.id, "id-2");
        assert_eq!(second.title, "Second");
        assert_eq!(second.status, TaskStatus::Todo);
        assert_eq!(second.priority, Priority::Medium);
        assert_eq!(second.estimated_minutes, Some(DEFAULT_ESTIMATE_MINUTES));
        assert_eq!(second.created_at.to_rfc3339(), "2025-01-15T09:00:00+00:00");

        let titles: Vec<String> = board.tasks().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["Second", "First"]);
    }

    #[test]
    fn blank_title_is_rejected() {
        let ctx = test_context(MemFs::default(), &[], vec![]);
        let board = TaskBoard::new(&ctx, root());
        assert!(matches!(board.add_task(NewTask::quick("   ")), Err(BoardError::EmptyTitle)));
        assert!(board.tasks().is_empty());
    }

    #[test]
    fn shared_tasks_arrive_as_new_todo_tasks() {
        let sender = test_context(MemFs::default(), &["s-1", "s-2"], vec![]);
        let board = TaskBoard::new(&sender, root());
        board
            .add_task(NewTask {
                tags: vec!["work".into()],
                ..task("Draft report", Priority::High, 45)
            })
            .unwrap();
        board.add_task(task("Email client", Priority::Medium, 15)).unwrap();
        let link = board.share_link(&base(), &[]).unwrap();
        assert_eq!(link.count, 2);
        assert!(link.url.as_str().starts_with("http://localhost:3000/?import="));

        let receiver = test_context(MemFs::default(), &["r-1", "r-2"], vec![]);
        let inbox = TaskBoard::new(&receiver, root());
        let imported = inbox.import(link.url.as_str()).unwrap();

        let summary: Vec<(&str, &str, Priority, Option<u32>)> = imported
            .iter()
            .map(|t| (t.id.as_str(), t.title.as_str(), t.priority, t.estimated_minutes))
            .collect();
        assert_eq!(
            summary,
            [
                ("r-1", "Email client", Priority::Medium, Some(15)),
                ("r-2", "Draft report", Priority::High, Some(45)),
            ]
        );
        assert!(imported.iter().all(|t| t.status == TaskStatus::Todo && t.tags.is_empty()));
        assert_eq!(inbox.tasks(), imported);
    }

    #[test]
    fn reimporting_the_same_token_adds_a_second_copy() {
        let token = transfer::encode(&[TransferTaskRecord::new("Call mom", Priority::Low, 10)]);
        let ctx = test_context(MemFs::default(), &["a", "b"], vec![]);
        let board = TaskBoard::new(&ctx, root());

        board.import(&token).unwrap();
        board.import(&token).unwrap();

        let tasks = board.tasks();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "b");
        assert_eq!(tasks[1].id, "a");
        assert!(tasks.iter().all(|t| t.title == "Call mom"));
    }

    #[test]
    fn bad_token_leaves_the_store_untouched() {
        let ctx = test_context(MemFs::default(), &["keep"], vec![]);
        let board = TaskBoard::new(&ctx, root());
        board.add_task(NewTask::quick("Existing")).unwrap();
        let before = stored(&ctx);

        let valid = transfer::encode(&[TransferTaskRecord::new("x", Priority::High, 5)]);
        for input in ["", "!!!not-a-token!!!", &valid[..valid.len() - 2], "http://localhost:3000/?other=1"] {
            assert!(matches!(board.import(input), Err(BoardError::Decode(_))), "{input:?}");
        }

        assert_eq!(stored(&ctx), before);
    }

    #[test]
    fn status_and_delete_accept_unique_prefixes() {
        let ctx = test_context(MemFs::default(), &["abc-1", "abd-2"], vec![]);
        let board = TaskBoard::new(&ctx, root());
        board.add_task(NewTask::quick("One")).unwrap();
        board.add_task(NewTask::quick("Two")).unwrap();

        let done = board.set_status("abc", TaskStatus::Done).unwrap();
        assert_eq!(done.title, "One");
        assert_eq!(board.tasks()[1].status, TaskStatus::Done);

        assert!(matches!(
            board.set_status("ab", TaskStatus::Done),
            Err(BoardError::AmbiguousId { count: 2, .. })
        ));
        assert!(matches!(board.delete("zzz"), Err(BoardError::TaskNotFound(_))));

        let removed = board.delete("abd-2").unwrap();
        assert_eq!(removed.title, "Two");
        assert_eq!(board.tasks().len(), 1);
    }

    #[test]
    fn sharing_skips_done_tasks_and_defaults_missing_estimates() {
        let ctx = test_context(MemFs::default(), &["t-1", "t-2"], vec![]);
        let board = TaskBoard::new(&ctx, root());
        board.add_task(NewTask { estimated_minutes: None, ..NewTask::quick("Open") }).unwrap();
        board.add_task(NewTask::quick("Finished")).unwrap();
        board.set_status("t-2", TaskStatus::Done).unwrap();

        let link = board.share_link(&base(), &[]).unwrap();
        let token = transfer::extract_token(link.url.as_str()).unwrap();
        assert_eq!(
            transfer::decode(&token).unwrap(),
            [TransferTaskRecord::new("Open", Priority::Medium, DEFAULT_ESTIMATE_MINUTES)]
        );
    }

    #[test]
    fn explicit_selection_keeps_list_order() {
        let ctx = test_context(MemFs::default(), &["t-1", "t-2", "t-3"], vec![]);
        let board = TaskBoard::new(&ctx, root());
        for title in ["A", "B", "C"] {
            board.add_task(NewTask::quick(title)).unwrap();
        }

        let link = board.share_link(&base(), &["t-1".into(), "t-3".into()]).unwrap();
        let token = transfer::extract_token(link.url.as_str()).unwrap();
        let titles: Vec<String> = transfer::decode(&token).unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["C", "A"]);

        assert!(matches!(board.share_link(&base(), &["nope".into()]), Err(BoardError::TaskNotFound(_))));
    }

    #[test]
    fn nothing_pending_means_nothing_to_share() {
        let ctx = test_context(MemFs::default(), &[], vec![]);
        let board = TaskBoard::new(&ctx, root());
        assert!(matches!(board.share_link(&base(), &[]), Err(BoardError::NothingToShare)));
    }

    #[tokio::test]
    async fn plan_goal_adds_tagged_block() {
        let reply = llm_text(
            r#"[{"title":"Outline","description":"Sections","priority":"High","estimatedMinutes":20},
               {"title":"Draft","priority":"Medium","estimatedMinutes":60}]"#,
        );
        let ctx = test_context(MemFs::default(), &["p-1", "p-2"], vec![reply]);
        let board = TaskBoard::new(&ctx, root());

        let added = board.plan_goal("gemini-2.5-flash", "Write a book").await.unwrap();

        assert_eq!(added.len(), 2);
        assert_eq!(added[0].description.as_deref(), Some("Sections"));
        assert_eq!(added[1].description, None);
        assert!(added.iter().all(|t| t.tags == [AI_GENERATED_TAG]));
        assert_eq!(board.tasks(), added);
    }

    #[tokio::test]
    async fn failed_planning_adds_nothing() {
        let ctx = test_context(MemFs::default(), &[], vec![json!({"err": "quota exceeded"})]);
        let board = TaskBoard::new(&ctx, root());
        assert!(matches!(board.plan_goal("m", "Launch").await, Err(BoardError::Planning(_))));
        assert!(board.tasks().is_empty());
    }

    #[tokio::test]
    async fn advice_skips_the_service_when_caught_up() {
        let ctx = test_context(MemFs::default(), &[], vec![]);
        let board = TaskBoard::new(&ctx, root());
        assert_eq!(board.advice("m").await, ALL_CAUGHT_UP);
    }

    #[tokio::test]
    async fn advice_asks_about_pending_titles() {
        let ctx = test_context(MemFs::default(), &["t-1"], vec![llm_text("Start with the report.")]);
        let board = TaskBoard::new(&ctx, root());
        board.add_task(NewTask::quick("Report")).unwrap();

        assert_eq!(board.pending_titles(), ["Report"]);
        assert_eq!(board.advice("m").await, "Start with the report.");
    }

    #[test]
    fn failed_save_still_returns_the_task() {
        let ctx = test_context(MemFs::read_only(), &["t-1"], vec![]);
        let board = TaskBoard::new(&ctx, root());
        let record = board.add_task(NewTask::quick("Unsaved")).unwrap();
        assert_eq!(record.id, "t-1");
        assert!(board.tasks().is_empty());
    }
}
