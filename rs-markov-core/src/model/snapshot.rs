use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{ChainError, ChainResult};
use super::chain::Chain;
use super::chain_config::{check_resolution, check_token_separator, ChainConfig};
use super::successors::Successors;
use super::FORMAT_VERSION;

/// Persisted form of a [`Chain`], version [`FORMAT_VERSION`].
///
/// Field names follow the historical chain files (`inputs`, `word_stack`,
/// `endings`); the descriptive names are accepted as aliases when reading.
/// `version` comes first so the binary layout starts with it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChainSnapshot {
	pub version: u32,
	pub resolution: usize,
	pub token_separator: String,
	#[serde(alias = "transitions")]
	pub inputs: BTreeMap<String, Vec<String>>,
	#[serde(alias = "window")]
	pub word_stack: Vec<String>,
	#[serde(alias = "sentence_terminators")]
	pub endings: Vec<char>,
}

/// Just enough of a JSON snapshot to read its version.
#[derive(Deserialize)]
struct VersionHeader {
	version: u32,
}

impl From<&Chain> for ChainSnapshot {
	fn from(chain: &Chain) -> Self {
		Self {
			version: FORMAT_VERSION,
			resolution: chain.resolution(),
			token_separator: chain.token_separator().to_owned(),
			inputs: chain
				.transitions()
				.iter()
				.map(|(key, successors)| (key.clone(), successors.as_slice().to_vec()))
				.collect(),
			word_stack: chain.window().to_vec(),
			endings: chain.sentence_terminators().iter().copied().collect(),
		}
	}
}

/// What the caller expects of the chain being loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expected<'a> {
	/// Wanted resolution, 0 to accept whatever the data holds.
	pub resolution: usize,
	/// Wanted separator, `None` to accept whatever the data holds.
	pub token_separator: Option<&'a str>,
}

fn check_version(found: u32) -> ChainResult<()> {
	if found != FORMAT_VERSION {
		return Err(ChainError::VersionMismatch { expected: FORMAT_VERSION, found });
	}
	Ok(())
}

impl ChainSnapshot {
	/// Converts the snapshot back into a chain.
	///
	/// # Errors
	/// - `VersionMismatch` if `version` is not [`FORMAT_VERSION`]
	/// - `ResolutionMismatch` / `SeparatorMismatch` against `expected`
	/// - `InvalidConfig` for a zero resolution or an unusable separator
	/// - `Corrupt` if the window or a key does not hold `resolution`
	///   tokens, or a successor list is empty
	pub fn into_chain(self, expected: Expected<'_>) -> ChainResult<Chain> {
		check_version(self.version)?;

		if expected.resolution != 0 && expected.resolution != self.resolution {
			return Err(ChainError::ResolutionMismatch {
				expected: expected.resolution,
				found: self.resolution,
			});
		}
		if let Some(separator) = expected.token_separator {
			if separator != self.token_separator {
				return Err(ChainError::SeparatorMismatch {
					expected: separator.to_owned(),
					found: self.token_separator,
				});
			}
		}

		check_resolution(self.resolution)?;
		check_token_separator(&self.token_separator)?;

		if self.word_stack.len() != self.resolution {
			return Err(ChainError::Corrupt(format!(
				"window holds {} tokens, expected {}",
				self.word_stack.len(),
				self.resolution
			)));
		}

		let mut transitions = BTreeMap::new();
		for (key, tokens) in self.inputs {
			if key.split(self.token_separator.as_str()).count() != self.resolution {
				return Err(ChainError::Corrupt(format!(
					"key {key:?} does not hold {} tokens",
					self.resolution
				)));
			}
			if tokens.is_empty() {
				return Err(ChainError::Corrupt(format!("key {key:?} has no successors")));
			}
			transitions.insert(key, Successors::from(tokens));
		}

		let mut config = ChainConfig::new(self.resolution)?;
		config.set_token_separator(&self.token_separator)?;
		config.set_sentence_terminators(&self.endings.iter().collect::<String>());

		Ok(Chain::from_parts(config, transitions, self.word_stack))
	}
}

impl Chain {
	/// Serializes the chain to pretty-printed JSON.
	///
	/// Output is deterministic: object keys are sorted at every level and
	/// indentation is two spaces.
	pub fn to_json(&self) -> ChainResult<String> {
		// `Value` objects are sorted maps, which gives the sorted field order
		let value = serde_json::to_value(ChainSnapshot::from(self))?;
		Ok(serde_json::to_string_pretty(&value)?)
	}

	/// Restores a chain from JSON.
	///
	/// `resolution` is the wanted order, or 0 to take the one stored in the
	/// data. The separator is taken from the data.
	///
	/// # Errors
	/// See [`ChainSnapshot::into_chain`]. The version is checked before the
	/// rest of the document is decoded.
	pub fn from_json(json: &str, resolution: usize) -> ChainResult<Self> {
		Self::from_json_checked(json, Expected { resolution, token_separator: None })
	}

	/// Restores a chain from JSON, checking both resolution and separator.
	pub fn from_json_checked(json: &str, expected: Expected<'_>) -> ChainResult<Self> {
		let header: VersionHeader = serde_json::from_str(json)?;
		check_version(header.version)?;

		let snapshot: ChainSnapshot = serde_json::from_str(json)?;
		let chain = snapshot.into_chain(expected)?;
		info!(
			"Loaded V{} chain: resolution {}, {} keys",
			FORMAT_VERSION,
			chain.resolution(),
			chain.len()
		);
		Ok(chain)
	}

	/// Serializes the chain to the compact binary form.
	pub fn to_bytes(&self) -> ChainResult<Vec<u8>> {
		Ok(postcard::to_stdvec(&ChainSnapshot::from(self))?)
	}

	/// Restores a chain from its binary form.
	///
	/// Same rules as [`from_json_checked`](Self::from_json_checked).
	pub fn from_bytes(bytes: &[u8], expected: Expected<'_>) -> ChainResult<Self> {
		// `version` is the first field of the layout
		let (version, _) = postcard::take_from_bytes::<u32>(bytes)?;
		check_version(version)?;

		let snapshot: ChainSnapshot = postcard::from_bytes(bytes)?;
		let chain = snapshot.into_chain(expected)?;
		info!(
			"Loaded V{} chain: resolution {}, {} keys",
			FORMAT_VERSION,
			chain.resolution(),
			chain.len()
		);
		Ok(chain)
	}
}
