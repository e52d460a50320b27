//! Writes interactions out as a YAML cassette.

use std::path::PathBuf;

use super::format::{Cassette, Interaction};

/// Collects interactions and writes them to a cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    interactions: Vec<Interaction>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Creates a recorder that will write to `path`.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), interactions: Vec::new(), next_seq: 0 }
    }

    /// Appends an interaction; `seq` is assigned here.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        self.interactions.push(Interaction::new(self.next_seq, port, method, input, output));
        self.next_seq += 1;
    }

    /// Writes the cassette and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette::new(self.name, self.interactions);
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_and_finish() {
        let dir = std::env::temp_dir().join("taskflow_cassette_recorder_test");
        let path = dir.join("flow.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "flow");
        recorder.record("clock", "now", json!({}), json!("2025-01-01T00:00:00Z"));
        recorder.record("id_gen", "generate_id", json!({}), json!("id-1"));

        let written = recorder.finish().expect("finish should succeed");
        assert_eq!(written, path);

        let cassette: Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cassette.name, "flow");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[1].seq, 1);
        assert_eq!(cassette.interactions[1].port, "id_gen");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
