//! Word-level Markov chain text generation library.
//!
//! This crate provides a fixed-order (resolution) Markov chain including:
//! - Corpus ingestion with a permissive tokenization policy
//! - Sentence-aware random walks producing whole phrases
//! - A versioned persisted format (JSON, or compact binary)
//! - File helpers used by the command-line front end
//!
//! The random source is always supplied by the caller, so generation can be
//! made reproducible by seeding it.

/// Chain model, configuration, generation and persisted schema.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// File helpers (model load/save, corpus streaming, phrase output).
pub mod io;

pub use error::{ChainError, ChainResult};
pub use model::chain::Chain;
pub use model::chain_config::ChainConfig;
pub use model::generator::PhraseGenerator;
pub use model::snapshot::{ChainSnapshot, Expected};
