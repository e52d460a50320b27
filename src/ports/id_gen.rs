//! ID generator port for minting task identities.

/// Mints task identifiers.
///
/// Every created, planned or imported task gets its id from here, so a
/// replayed generator makes those flows deterministic under test.
pub trait IdGenerator: Send + Sync {
    /// Returns an identifier not handed out before.
    fn generate_id(&self) -> String;
}
