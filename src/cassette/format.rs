//! Cassette data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded call on a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the recording.
    pub seq: u64,
    /// Port name (`clock`, `id_gen`, `fs`, `llm`).
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Arguments, for humans reading the cassette. Replay ignores them.
    pub input: serde_json::Value,
    /// What the port returned.
    pub output: serde_json::Value,
}

impl Interaction {
    /// Builds an interaction.
    pub fn new(
        seq: u64,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) -> Self {
        Self { seq, port: port.into(), method: method.into(), input, output }
    }
}

/// A named, ordered list of interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the cassette was written.
    pub recorded_at: DateTime<Utc>,
    /// Ordered interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Builds a cassette stamped with the current time.
    pub fn new(name: impl Into<String>, interactions: Vec<Interaction>) -> Self {
        Self { name: name.into(), recorded_at: Utc::now(), interactions }
    }
}
