//! Replaying adapters that serve recorded interactions from a cassette.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod llm;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use id_gen::ReplayingIdGenerator;
pub use llm::ReplayingLlmClient;

/// Takes the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics if the cassette has no interaction left for the pair.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output
}

/// Turns a recorded output into a `Result`.
///
/// Outputs are `{"ok": <value>}` or `{"err": "message"}`; a bare value is
/// treated as `ok`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, PortError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = match output {
        serde_json::Value::Object(mut map) if map.contains_key("ok") => {
            map.remove("ok").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
