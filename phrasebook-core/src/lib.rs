//! Word-level phrasebook text generation library.
//!
//! This crate provides a small quasi-Markov-chain engine including:
//! - Whitespace tokenization with an end-of-utterance marker
//! - A transition table mapping fixed-width token windows to their successors
//! - Bounded random-walk generation with uniform successor selection
//! - JSON persistence of the learned table across restarts
//!
//! The entry point is [`Phrasebook`], an owned engine instance that the
//! surrounding system builds once and then feeds and queries.

/// Engine configuration (key width, storage location, phrase limit).
pub mod config;

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// Tokenization, transition table, generation and the `Phrasebook` engine.
pub mod model;

/// On-disk representation of the transition table.
pub mod persistence;

/// File helpers.
///
/// Not exposed
pub(crate) mod io;

pub use config::PhrasebookConfig;
pub use error::{PhrasebookError, PhrasebookResult};
pub use model::phrasebook::Phrasebook;
