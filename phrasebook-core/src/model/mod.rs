//! Top-level module for the phrasebook engine.
//!
//! It provides a word-level quasi-Markov chain, including:
//! - Tokens, keys and tokenization (`token`)
//! - The learned transition table (`TransitionTable`)
//! - Per-key successor sets (`SuccessorSet`)
//! - Bounded random-walk generation (`generator`)
//! - The owned engine tying them together (`Phrasebook`)

/// Tokens, the terminator sentinel and fixed-width keys.
pub mod token;

/// Set of distinct successors of one key, with uniform sampling.
pub mod state;

/// Key to successor-set mapping.
///
/// Handles utterance ingestion, successor lookups,
/// random key selection and table merging.
pub mod transition_table;

/// Bounded random walk over a transition table.
pub mod generator;

/// High-level engine: learning, generation, corpus ingestion and persistence.
pub mod phrasebook;
