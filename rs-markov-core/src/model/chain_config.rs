use std::collections::BTreeSet;

use crate::error::{ChainError, ChainResult};
use super::{
	DEFAULT_RESOLUTION, DEFAULT_SENTENCE_TERMINATORS, DEFAULT_TOKEN_SEPARATOR, SENTENCE_BREAK,
};

/// Construction parameters of a [`Chain`](super::chain::Chain).
///
/// `ChainConfig` only holds values that have been validated, so a chain
/// built from it never has to re-check them.
///
/// # Responsibilities
/// - Track the chain order (`resolution`)
/// - Track the key separator and make sure it can never occur inside a token
/// - Track the set of sentence terminators
///
/// # Invariants
/// - `resolution >= 1`
/// - `token_separator` is non-empty, whitespace only, and does not contain
///   the sentence break marker
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainConfig {
	/// Number of previous tokens forming a key.
	resolution: usize,

	/// String placed between tokens of a key.
	token_separator: String,

	/// Characters closing a sentence when they end a raw token.
	sentence_terminators: BTreeSet<char>,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			resolution: DEFAULT_RESOLUTION,
			token_separator: DEFAULT_TOKEN_SEPARATOR.to_owned(),
			sentence_terminators: DEFAULT_SENTENCE_TERMINATORS.chars().collect(),
		}
	}
}

impl ChainConfig {
	/// Creates a default configuration with the given resolution.
	///
	/// # Errors
	/// Returns an error if `resolution` is 0.
	pub fn new(resolution: usize) -> ChainResult<Self> {
		let mut config = Self::default();
		config.set_resolution(resolution)?;
		Ok(config)
	}

	pub fn resolution(&self) -> usize {
		self.resolution
	}

	pub fn token_separator(&self) -> &str {
		&self.token_separator
	}

	pub fn sentence_terminators(&self) -> &BTreeSet<char> {
		&self.sentence_terminators
	}

	/// Sets the chain order.
	///
	/// # Errors
	/// Returns an error if `resolution` is 0.
	pub fn set_resolution(&mut self, resolution: usize) -> ChainResult<()> {
		check_resolution(resolution)?;
		self.resolution = resolution;
		Ok(())
	}

	/// Sets the key separator.
	///
	/// Tokens are whitespace-free and the sentence break is a lone newline,
	/// so a separator made of non-newline whitespace can never appear inside
	/// either. Splitting a key back into tokens is then unambiguous.
	///
	/// # Errors
	/// Returns an error if the separator is empty, contains a non-whitespace
	/// character, or contains a newline.
	pub fn set_token_separator(&mut self, token_separator: &str) -> ChainResult<()> {
		check_token_separator(token_separator)?;
		self.token_separator = token_separator.to_owned();
		Ok(())
	}

	/// Replaces the sentence terminators with the characters of `terminators`.
	///
	/// An empty string disables sentence detection; only blank lines then
	/// break the context.
	pub fn set_sentence_terminators(&mut self, terminators: &str) {
		self.sentence_terminators = terminators.chars().collect();
	}
}

pub(crate) fn check_resolution(resolution: usize) -> ChainResult<()> {
	if resolution == 0 {
		return Err(ChainError::InvalidConfig("resolution must be >= 1".to_owned()));
	}
	Ok(())
}

pub(crate) fn check_token_separator(token_separator: &str) -> ChainResult<()> {
	if token_separator.is_empty() {
		return Err(ChainError::InvalidConfig("token separator cannot be empty".to_owned()));
	}
	if token_separator.contains(SENTENCE_BREAK) {
		return Err(ChainError::InvalidConfig(
			"token separator cannot contain a newline".to_owned(),
		));
	}
	if !token_separator.chars().all(char::is_whitespace) {
		return Err(ChainError::InvalidConfig(format!(
			"token separator {token_separator:?} could appear inside a token (whitespace only)"
		)));
	}
	Ok(())
}
