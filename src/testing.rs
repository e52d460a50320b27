//! Shared test fixtures.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::json;

use crate::cassette::format::{Cassette, Interaction};
use crate::context::ServiceContext;
use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// In-memory filesystem so store and board tests never touch disk.
#[derive(Default)]
pub struct MemFs {
    files: Mutex<HashMap<PathBuf, String>>,
    fail_writes: bool,
}

impl MemFs {
    /// A filesystem whose writes always fail.
    pub fn read_only() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    /// Seeds a file.
    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.files.lock().unwrap().insert(PathBuf::from(path), contents.to_string());
        self
    }
}

impl FileSystem for MemFs {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if self.fail_writes {
            return Err("read-only filesystem".into());
        }
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

/// A context that replays `ids` in order, a fixed clock, and `llm_outputs`
/// for successive completions; the filesystem is `fs`.
pub fn test_context(fs: MemFs, ids: &[&str], llm_outputs: Vec<serde_json::Value>) -> ServiceContext {
    let mut interactions = Vec::new();
    let mut seq = 0;
    let mut push = |port: &str, method: &str, output: serde_json::Value| {
        interactions.push(Interaction::new(seq, port, method, json!({}), output));
        seq += 1;
    };
    for id in ids {
        push("id_gen", "generate_id", json!(id));
        push("clock", "now", json!("2025-01-15T09:00:00Z"));
    }
    for output in llm_outputs {
        push("llm", "complete", output);
    }

    let mut ctx = ServiceContext::from_cassette(&Cassette::new("test", interactions));
    ctx.fs = Box::new(fs);
    ctx
}

/// A recorded successful completion with the given text.
pub fn llm_text(text: &str) -> serde_json::Value {
    json!({"ok": {"text": text, "prompt_tokens": 10, "completion_tokens": 5}})
}
