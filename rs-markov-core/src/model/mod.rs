//! Top-level module for the Markov chain system.
//!
//! This module provides:
//! - The chain itself (`Chain`): ingestion and the transition table
//! - Chain configuration (`ChainConfig`)
//! - Per-key successor lists (`Successors`)
//! - Token normalization (`tokenizer`)
//! - Phrase generation (`PhraseGenerator`)
//! - The persisted schema (`snapshot`)

/// Word-level Markov chain with a sliding context window.
///
/// Handles line ingestion, key construction and transition recording.
pub mod chain;

/// Construction parameters: resolution, token separator, sentence terminators.
pub mod chain_config;

/// Ordered, deduplicated list of tokens observed after one key.
pub mod successors;

/// Normalization rules applied to every corpus token.
pub mod tokenizer;

/// Random walk over a chain producing whole phrases.
pub mod generator;

/// Versioned persisted form of a chain (JSON and binary).
pub mod snapshot;

/// Reserved token marking a sentence or paragraph boundary.
///
/// Never produced by tokenization, since tokens contain no whitespace.
pub const SENTENCE_BREAK: &str = "\n";

/// Version of the persisted schema understood by this build.
pub const FORMAT_VERSION: u32 = 1;

pub const DEFAULT_RESOLUTION: usize = 2;

pub const DEFAULT_TOKEN_SEPARATOR: &str = " ";

pub const DEFAULT_SENTENCE_TERMINATORS: &str = ".?!:;";

/// Default soft upper bound on the number of tokens in a generated phrase.
pub const DEFAULT_MAX_TOKENS: usize = 64;
