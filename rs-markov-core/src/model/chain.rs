use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, BufRead};

use log::debug;
use rand::Rng;

use crate::error::ChainResult;
use super::chain_config::ChainConfig;
use super::generator::PhraseGenerator;
use super::successors::Successors;
use super::tokenizer;
use super::SENTENCE_BREAK;

/// Word-level Markov chain of a fixed order.
///
/// The `Chain` maps every key (the last `resolution` tokens seen, joined by
/// `token_separator`) to the distinct tokens observed right after it. Sentence
/// ends are recorded as transitions to [`SENTENCE_BREAK`], and the context
/// window restarts from sentence breaks after every sentence or blank line.
///
/// # Responsibilities
/// - Consume corpus lines and record transitions
/// - Expose the transition table for generation and persistence
///
/// # Invariants
/// - Every key holds exactly `resolution` tokens
/// - The key made of two sentence breaks is never recorded
/// - No successor list is empty
/// - `window.len() == resolution`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
	/// The order of the chain (number of tokens in a key)
	resolution: usize, // must be >= 1

	token_separator: String,

	sentence_terminators: BTreeSet<char>,

	/// Mapping from a key to its successors, sorted by key
	transitions: BTreeMap<String, Successors>,

	/// Last `resolution` tokens of the current sentence
	window: Vec<String>,
}

impl Chain {
	/// Creates an empty chain of order `resolution` with default settings.
	///
	/// # Errors
	/// Returns an error if `resolution` is 0.
	pub fn new(resolution: usize) -> ChainResult<Self> {
		Ok(Self::with_config(ChainConfig::new(resolution)?))
	}

	/// Creates an empty chain from an already validated configuration.
	pub fn with_config(config: ChainConfig) -> Self {
		let resolution = config.resolution();
		Self {
			resolution,
			token_separator: config.token_separator().to_owned(),
			sentence_terminators: config.sentence_terminators().clone(),
			transitions: BTreeMap::new(),
			window: vec![SENTENCE_BREAK.to_owned(); resolution],
		}
	}

	/// Reassembles a chain from decoded parts.
	///
	/// Callers (the snapshot decoder) are responsible for checking invariants.
	pub(crate) fn from_parts(
		config: ChainConfig,
		transitions: BTreeMap<String, Successors>,
		window: Vec<String>,
	) -> Self {
		let mut chain = Self::with_config(config);
		chain.transitions = transitions;
		chain.window = window;
		chain
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

	/// Replaces the sentence terminators with the characters of `terminators`.
	///
	/// Only affects lines ingested afterwards.
	pub fn set_sentence_terminators(&mut self, terminators: &str) {
		self.sentence_terminators = terminators.chars().collect();
	}

	/// Current context window (oldest token first).
	pub fn window(&self) -> &[String] {
		&self.window
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Keys in sorted order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.transitions.keys().map(String::as_str)
	}

	/// Successors of `key`, if it was ever recorded.
	pub fn successors(&self, key: &str) -> Option<&Successors> {
		self.transitions.get(key)
	}

	pub(crate) fn transitions(&self) -> &BTreeMap<String, Successors> {
		&self.transitions
	}

	/// Looks up `key` and returns the stored key along with its successors.
	///
	/// The returned references borrow from the chain, not from `key`.
	pub(crate) fn entry(&self, key: &str) -> Option<(&str, &Successors)> {
		self.transitions.get_key_value(key).map(|(k, s)| (k.as_str(), s))
	}

	/// Restarts the context: the window is filled with sentence breaks.
	pub fn reset_window(&mut self) {
		self.window.clear();
		self.window.resize(self.resolution, SENTENCE_BREAK.to_owned());
	}

	fn window_key(&self) -> String {
		self.window.join(&self.token_separator)
	}

	/// `true` for the key made of exactly two sentence breaks.
	///
	/// It only shows up at the start of a sentence in an order-2 chain and
	/// would otherwise link every paragraph opening together.
	fn is_degenerate_key(&self, key: &str) -> bool {
		key.strip_prefix(SENTENCE_BREAK)
			.and_then(|rest| rest.strip_suffix(SENTENCE_BREAK))
			.is_some_and(|middle| middle == self.token_separator)
	}

	/// Records `token` as a successor of `key`.
	fn push_transition(&mut self, key: String, token: &str) {
		if self.is_degenerate_key(&key) {
			return;
		}
		self.transitions.entry(key).or_default().push(token);
	}

	/// Consumes one line of corpus text.
	///
	/// - A blank line is a paragraph break: the window is reset and nothing
	///   is recorded.
	/// - Otherwise each whitespace-separated token is normalized, recorded as
	///   a successor of the current window key, then pushed into the window.
	/// - A token closing a sentence also records a transition from the new
	///   window key to [`SENTENCE_BREAK`], then resets the window.
	///
	/// Never fails: any input is accepted.
	pub fn read_line(&mut self, line: &str) {
		let line = line.trim();
		if line.is_empty() {
			self.reset_window();
			return;
		}

		for raw in line.split_whitespace() {
			let token = tokenizer::normalize(raw, &self.sentence_terminators);

			let key = self.window_key();
			self.push_transition(key, &token.text);

			self.window.remove(0);
			self.window.push(token.text);

			if token.ends_sentence {
				let key = self.window_key();
				self.push_transition(key, SENTENCE_BREAK);
				self.reset_window();
			}
		}
	}

	/// Feeds every line of `text` to [`read_line`](Self::read_line).
	pub fn read_text(&mut self, text: &str) {
		for line in text.lines() {
			self.read_line(line);
		}
	}

	/// Streams lines from `reader` into the chain.
	///
	/// Returns the number of lines consumed.
	///
	/// # Errors
	/// Returns the first read error; lines read before it stay recorded.
	pub fn read_lines<B: BufRead>(&mut self, reader: B) -> io::Result<usize> {
		let mut count = 0;
		for line in reader.lines() {
			self.read_line(&line?);
			count += 1;
		}
		debug!("Ingested {} lines, chain now has {} keys", count, self.len());
		Ok(count)
	}

	/// Generates one phrase of roughly `max_tokens` tokens.
	///
	/// See [`PhraseGenerator::phrase`] for the walk itself. Build a
	/// `PhraseGenerator` directly when producing many phrases.
	///
	/// # Errors
	/// Returns [`ChainError::EmptyModel`](crate::ChainError::EmptyModel) if
	/// nothing was ingested.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, max_tokens: usize) -> ChainResult<String> {
		Ok(PhraseGenerator::new(self)?.phrase(rng, max_tokens))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ChainError;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn successors_of(chain: &Chain, key: &str) -> Vec<String> {
		chain.successors(key).map(|s| s.as_slice().to_vec()).unwrap_or_default()
	}

	#[test]
	fn new_chain_is_empty_with_reset_window() {
		let chain = Chain::new(3).unwrap();
		assert!(chain.is_empty());
		assert_eq!(chain.window(), &["\n", "\n", "\n"]);
	}

	#[test]
	fn zero_resolution_is_rejected() {
		assert!(matches!(Chain::new(0), Err(ChainError::InvalidConfig(_))));
	}

	#[test]
	fn the_cat_sat() {
		let mut chain = Chain::new(2).unwrap();
		chain.read_line("The cat sat.");

		assert_eq!(chain.len(), 3);
		assert!(chain.successors("\n \n").is_none());
		assert_eq!(successors_of(&chain, "\n the"), vec!["cat"]);
		assert_eq!(successors_of(&chain, "the cat"), vec!["sat"]);
		assert_eq!(successors_of(&chain, "cat sat"), vec!["\n"]);
		assert_eq!(chain.window(), &["\n", "\n"]);
	}

	#[test]
	fn window_carries_across_lines_without_sentence_end() {
		let mut chain = Chain::new(2).unwrap();
		chain.read_line("once upon");
		assert_eq!(chain.window(), &["once", "upon"]);
		chain.read_line("a time.");
		assert_eq!(successors_of(&chain, "once upon"), vec!["a"]);
		assert_eq!(successors_of(&chain, "upon a"), vec!["time"]);
		assert_eq!(successors_of(&chain, "a time"), vec!["\n"]);
	}

	#[test]
	fn blank_line_resets_window() {
		let mut chain = Chain::new(2).unwrap();
		chain.read_line("no ending here");
		chain.read_line("   \t ");
		assert_eq!(chain.window(), &["\n", "\n"]);
		chain.read_line("fresh start");
		assert_eq!(successors_of(&chain, "\n fresh"), vec!["start"]);
		assert!(chain.successors("ending here").is_none());
	}

	#[test]
	fn repeated_pairs_do_not_grow_lists() {
		let mut chain = Chain::new(2).unwrap();
		chain.read_line("The cat sat.");
		chain.read_line("The cat sat.");
		chain.read_line("The cat ran.");
		assert_eq!(successors_of(&chain, "\n the"), vec!["cat"]);
		assert_eq!(successors_of(&chain, "the cat"), vec!["sat", "ran"]);
	}

	#[test]
	fn degenerate_key_is_never_recorded() {
		let mut chain = Chain::new(2).unwrap();
		chain.read_text("One. Two! Three?\n\nFour: five; six\n");
		assert!(chain.successors("\n \n").is_none());
		assert!(chain.keys().all(|k| k != "\n \n"));
	}

	#[test]
	fn order_one_records_sentence_openings() {
		let mut chain = Chain::new(1).unwrap();
		chain.read_line("a b.");
		assert_eq!(successors_of(&chain, "\n"), vec!["a"]);
		assert_eq!(successors_of(&chain, "a"), vec!["b"]);
		assert_eq!(successors_of(&chain, "b"), vec!["\n"]);
	}

	#[test]
	fn every_key_has_resolution_tokens() {
		for resolution in 1..=4 {
			let mut chain = Chain::new(resolution).unwrap();
			chain.read_text(
				"It was the best of times, it was the worst of times.\n\
				We had everything before us; we had nothing.",
			);
			for key in chain.keys() {
				assert_eq!(key.split(' ').count(), resolution, "key {key:?}");
				assert!(!chain.successors(key).unwrap().is_empty());
			}
		}
	}

	#[test]
	fn each_token_follows_its_key() {
		let mut chain = Chain::new(2).unwrap();
		chain.read_line("\u{201c}Hello,\u{201d} she said\u{2014}softly. Then left!");
		assert_eq!(successors_of(&chain, "\n hello"), vec!["she"]);
		assert_eq!(successors_of(&chain, "hello she"), vec!["said-softly"]);
		assert_eq!(successors_of(&chain, "she said-softly"), vec!["\n"]);
		assert_eq!(successors_of(&chain, "\n then"), vec!["left"]);
		assert_eq!(successors_of(&chain, "then left"), vec!["\n"]);
	}

	#[test]
	fn custom_separator_builds_keys() {
		let mut config = ChainConfig::default();
		config.set_token_separator("\t").unwrap();
		let mut chain = Chain::with_config(config);
		chain.read_line("red green blue.");
		assert_eq!(successors_of(&chain, "red\tgreen"), vec!["blue"]);
		// With a tab separator the double break key is "\n\t\n"
		assert!(chain.successors("\n\t\n").is_none());
	}

	#[test]
	fn custom_terminators_change_sentence_ends() {
		let mut chain = Chain::new(2).unwrap();
		chain.set_sentence_terminators("!");
		chain.read_line("stop. go!");
		assert_eq!(successors_of(&chain, "\n stop."), vec!["go"]);
		assert_eq!(successors_of(&chain, "stop. go"), vec!["\n"]);
	}

	#[test]
	fn read_lines_counts() {
		let mut chain = Chain::new(2).unwrap();
		let count = chain.read_lines("first line.\n\nsecond line.\n".as_bytes()).unwrap();
		assert_eq!(count, 3);
		assert_eq!(successors_of(&chain, "\n second"), vec!["line"]);
	}

	#[test]
	fn generate_on_empty_chain_fails() {
		let chain = Chain::new(2).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		assert!(matches!(chain.generate(&mut rng, 10), Err(ChainError::EmptyModel)));
	}
}
