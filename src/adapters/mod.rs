//! Port implementations.
//!
//! `live` talks to the real world; `replaying` serves recorded cassette
//! interactions so tests run without a network, a clock or random ids.

pub mod live;
pub mod replaying;
