//! Port traits defining external boundaries.
//!
//! The board and the planner only see the outside world through these
//! traits: wall-clock time, id minting, the disk that holds the store, and
//! the generative-language service. Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod llm;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// Error type carried across port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
