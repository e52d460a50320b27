//! Cassettes: recorded port interactions for deterministic replay.

pub mod format;
pub mod recorder;
pub mod replayer;
