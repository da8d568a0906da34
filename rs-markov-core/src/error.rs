use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the chain library.
///
/// Ingestion never fails; everything here comes from configuration,
/// persistence or generating from an empty chain.
#[derive(Error, Debug)]
pub enum ChainError {
	#[error("Version mismatch (this build supports V{expected}, chain data is V{found})")]
	VersionMismatch { expected: u32, found: u32 },

	#[error("Chain resolution does not match wanted resolution (wanted {expected}, got {found})")]
	ResolutionMismatch { expected: usize, found: usize },

	#[error(
		"Chain token separator does not match wanted separator (wanted {expected:?}, got {found:?})"
	)]
	SeparatorMismatch { expected: String, found: String },

	#[error("File doesn't exist: {}", .0.display())]
	MissingFile(PathBuf),

	#[error("Cannot generate from an empty chain")]
	EmptyModel,

	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("Corrupt chain data: {0}")]
	Corrupt(String),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Binary encoding error: {0}")]
	Binary(#[from] postcard::Error),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

pub type ChainResult<T> = Result<T, ChainError>;
