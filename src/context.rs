//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{LiveClock, LiveFileSystem, LiveIdGenerator, LiveLlmClient};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingIdGenerator, ReplayingLlmClient,
};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::id_gen::IdGenerator;
use crate::ports::llm::LlmClient;

/// Every external boundary the application uses, passed explicitly instead
/// of reached for globally.
pub struct ServiceContext {
    /// Clock for creation timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem holding the store.
    pub fs: Box<dyn FileSystem>,
    /// Mints task ids.
    pub id_gen: Box<dyn IdGenerator>,
    /// Generative-language service.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Creates a context wired to the real world.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            id_gen: Box::new(LiveIdGenerator),
            llm: Box::new(LiveLlmClient::new(config.llm_endpoint.clone(), config.api_key.clone())),
        }
    }

    /// Creates a context whose ports all replay from one cassette.
    ///
    /// Each port gets its own replayer, so cursors advance independently.
    /// A port the cassette never recorded panics when called.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(cassette))),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(cassette))),
            id_gen: Box::new(ReplayingIdGenerator::new(CassetteReplayer::new(cassette))),
            llm: Box::new(ReplayingLlmClient::new(CassetteReplayer::new(cassette))),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::from_cassette(&cassette))
    }
}
