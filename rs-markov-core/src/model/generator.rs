use log::trace;
use rand::Rng;

use crate::error::{ChainError, ChainResult};
use super::chain::Chain;
use super::successors::Successors;
use super::SENTENCE_BREAK;

/// Produces phrases by walking a [`Chain`].
///
/// # Responsibilities
/// - Snapshot the key population once, so repeated phrases do not rebuild it
/// - Walk the chain from a random key, restarting ("rekeying") from a fresh
///   random key whenever a sentence ends or the context leaves known keys
/// - Cut the result back to its last complete sentence
///
/// The random source is passed to each call; seeding it makes output
/// reproducible for a given chain.
#[derive(Debug)]
pub struct PhraseGenerator<'a> {
	chain: &'a Chain,
	/// Every (key, successors) pair of the chain, in key order.
	entries: Vec<(&'a str, &'a Successors)>,
}

impl<'a> PhraseGenerator<'a> {
	/// Prepares a generator for `chain`.
	///
	/// # Errors
	/// Returns [`ChainError::EmptyModel`] if the chain has no keys.
	pub fn new(chain: &'a Chain) -> ChainResult<Self> {
		if chain.is_empty() {
			return Err(ChainError::EmptyModel);
		}
		let entries = chain
			.transitions()
			.iter()
			.map(|(key, successors)| (key.as_str(), successors))
			.collect();
		Ok(Self { chain, entries })
	}

	/// Picks a key uniformly among all keys.
	fn random_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> (&'a str, &'a Successors) {
		// `entries` is never empty, see `new`
		self.entries[rng.random_range(0..self.entries.len())]
	}

	/// Generates one phrase.
	///
	/// # Behavior
	/// - Starts from a random key, whose tokens open the phrase.
	/// - While fewer than `max_tokens` tokens were produced, picks a random
	///   successor of the current key and slides the key over it.
	/// - Picking a sentence break, sitting on a key that only ever ended a
	///   sentence, or sliding onto an unknown key triggers a rekey: the last
	///   token gets a period, and a fresh random key is appended whole.
	/// - The joined text is cut after its last period.
	///
	/// # Notes
	/// - `max_tokens` is a soft bound: the seed key, or a rekey right before
	///   the bound, can push the phrase past it.
	/// - Sentence breaks carried by keys are counted as tokens but never
	///   rendered.
	/// - When no period was produced at all, the whole text is kept and a
	///   period is appended.
	/// - A walk made only of sentence breaks renders as a bare `"."`. This
	///   happens with an order-1 chain seeded on the `"\n"` key when
	///   `max_tokens` is 1.
	pub fn phrase<R: Rng + ?Sized>(&self, rng: &mut R, max_tokens: usize) -> String {
		let start = self.random_entry(rng);
		let tokens = self.walk(rng, start, max_tokens);
		Self::close(&tokens, self.chain.token_separator())
	}

	/// Walks the chain from `start` and returns the raw tokens, before
	/// truncation. Sentence breaks carried by keys are kept.
	fn walk<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		start: (&'a str, &'a Successors),
		max_tokens: usize,
	) -> Vec<String> {
		let separator = self.chain.token_separator();
		let resolution = self.chain.resolution();

		let (mut key, mut successors) = start;
		let mut tokens: Vec<String> = key.split(separator).map(str::to_owned).collect();

		while tokens.len() < max_tokens {
			let rekey = match successors.choose(rng) {
				_ if successors.is_sentence_end_only() => true,
				Some(next) if next == SENTENCE_BREAK => true,
				Some(next) => {
					tokens.push(next.to_owned());

					let mut context: Vec<&str> = key.split(separator).collect();
					if context.len() == resolution {
						context.remove(0);
					}
					context.push(next);

					match self.chain.entry(&context.join(separator)) {
						Some(found) => {
							(key, successors) = found;
							false
						}
						None => true,
					}
				}
				// Successor lists are never empty
				None => true,
			};

			if rekey {
				if let Some(last) = tokens.last_mut() {
					last.push('.');
				}
				(key, successors) = self.random_entry(rng);
				trace!("Rekey on {:?}", key);
				tokens.extend(key.split(separator).map(str::to_owned));
			}
		}

		tokens
	}

	/// Generates `count` independent phrases.
	pub fn phrases<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		count: usize,
		max_tokens: usize,
	) -> Vec<String> {
		(0..count).map(|_| self.phrase(rng, max_tokens)).collect()
	}

	/// Joins `tokens` and drops the trailing incomplete sentence.
	fn close(tokens: &[String], separator: &str) -> String {
		let text = tokens
			.iter()
			.map(String::as_str)
			.filter(|token| *token != SENTENCE_BREAK)
			.collect::<Vec<_>>()
			.join(separator);

		match text.rfind('.') {
			Some(end) => format!("{}.", &text[..end]),
			None => format!("{text}."),
		}
	}
}
