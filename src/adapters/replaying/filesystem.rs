//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Serves recorded filesystem results. Paths are not checked; calls are
/// answered in recorded order per method.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        let output = next_output(&self.replayer, "fs", "read_to_string");
        replay_result(output, "fs::read_to_string")
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        let output = next_output(&self.replayer, "fs", "write");
        replay_result(output, "fs::write")
    }

    fn exists(&self, _path: &Path) -> bool {
        next_output(&self.replayer, "fs", "exists")
            .as_bool()
            .expect("fs::exists: expected boolean output")
    }
}
