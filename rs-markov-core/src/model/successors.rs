use rand::Rng;
use rand::seq::IndexedRandom;

use super::SENTENCE_BREAK;

/// Tokens observed right after one key of the chain.
///
/// A `Successors` list is the set of outgoing edges of a single chain state.
/// Entries keep their first-seen order and each appears once, so a random
/// pick is uniform over distinct tokens regardless of how often they were
/// observed.
///
/// ## Responsibilities:
/// - Accumulate distinct next tokens during ingestion
/// - Pick the next token uniformly at random during generation
///
/// ## Invariants
/// - No duplicate entries
/// - Never empty once owned by a chain (a list is created by its first push)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Successors {
	/// Next tokens in insertion order.
	/// Example: ["cat", "dog", "\n"]
	tokens: Vec<String>,
}

impl Successors {
	/// Creates an empty list.
	pub fn new() -> Self {
		Self { tokens: Vec::new() }
	}

	/// Records `token` as a possible successor.
	///
	/// Returns `false` if it was already present, in which case the list is
	/// left untouched.
	pub fn push(&mut self, token: &str) -> bool {
		// Linear membership check keeps the list indexable for random picks
		if self.contains(token) {
			return false;
		}
		self.tokens.push(token.to_owned());
		true
	}

	pub fn contains(&self, token: &str) -> bool {
		self.tokens.iter().any(|t| t == token)
	}

	/// Picks a successor uniformly at random.
	///
	/// Returns `None` if the list is empty.
	pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.tokens.choose(rng).map(String::as_str)
	}

	/// `true` when the only thing ever seen after this key is a sentence end.
	pub fn is_sentence_end_only(&self) -> bool {
		matches!(self.tokens.as_slice(), [only] if only == SENTENCE_BREAK)
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tokens.iter().map(String::as_str)
	}

	pub fn as_slice(&self) -> &[String] {
		&self.tokens
	}
}

impl From<Vec<String>> for Successors {
	/// Builds a list from raw tokens, dropping repeated entries.
	fn from(tokens: Vec<String>) -> Self {
		let mut successors = Self::new();
		for token in &tokens {
			successors.push(token);
		}
		successors
	}
}
