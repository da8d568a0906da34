use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use log::{debug, info};

use crate::error::{ChainError, ChainResult};
use crate::model::chain::Chain;
use crate::model::snapshot::Expected;

/// On-disk encoding of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
	/// Pretty-printed, key-sorted JSON (the default).
	Json,
	/// Compact postcard encoding.
	Binary,
}

impl ModelFormat {
	/// Picks the format from the path extension.
	///
	/// Examples:
	/// - `"chain.bin"` → `Binary`
	/// - `"chain.json"`, `"chain"` → `Json`
	pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
		match path.as_ref().extension().and_then(|ext| ext.to_str()) {
			Some(ext) if ext.eq_ignore_ascii_case("bin") => ModelFormat::Binary,
			_ => ModelFormat::Json,
		}
	}
}

fn require_file(path: &Path) -> ChainResult<()> {
	if !path.is_file() {
		return Err(ChainError::MissingFile(path.to_path_buf()));
	}
	Ok(())
}

/// Loads a chain from `path`, in the format given by its extension.
///
/// - `resolution`: wanted order, 0 to take the stored one
/// - `token_separator`: wanted separator, `None` to take the stored one
///
/// # Errors
/// - `MissingFile` if `path` is not a file
/// - any decoding or mismatch error from the snapshot layer
pub fn load_chain<P: AsRef<Path>>(
	path: P,
	resolution: usize,
	token_separator: Option<&str>,
) -> ChainResult<Chain> {
	let path = path.as_ref();
	require_file(path)?;

	let expected = Expected { resolution, token_separator };
	let chain = match ModelFormat::from_path(path) {
		ModelFormat::Json => Chain::from_json_checked(&fs::read_to_string(path)?, expected)?,
		ModelFormat::Binary => Chain::from_bytes(&fs::read(path)?, expected)?,
	};
	debug!("Read chain from {}", path.display());
	Ok(chain)
}

/// Writes `chain` to `path`, in the format given by its extension.
pub fn save_chain<P: AsRef<Path>>(chain: &Chain, path: P) -> ChainResult<()> {
	let path = path.as_ref();
	match ModelFormat::from_path(path) {
		ModelFormat::Json => fs::write(path, chain.to_json()?)?,
		ModelFormat::Binary => fs::write(path, chain.to_bytes()?)?,
	}
	info!("Wrote chain data to {}", path.display());
	Ok(())
}

/// Streams a corpus file into `chain`, line by line.
///
/// Returns the number of lines read.
///
/// # Errors
/// - `MissingFile` if `path` is not a file
/// - `Io` on read failures (including invalid UTF-8)
pub fn ingest_file<P: AsRef<Path>>(chain: &mut Chain, path: P) -> ChainResult<usize> {
	let path = path.as_ref();
	require_file(path)?;
	let lines = chain.read_lines(BufReader::new(File::open(path)?))?;
	debug!("Read {} lines from {}", lines, path.display());
	Ok(lines)
}

/// Writes phrases separated by a blank line to `writer`.
///
/// No trailing newline is added; the caller decides how the output ends.
pub fn write_phrases<W: Write>(phrases: &[String], mut writer: W) -> ChainResult<()> {
	writer.write_all(phrases.join("\n\n").as_bytes())?;
	writer.flush()?;
	Ok(())
}
