use anyhow::{Context, Result};
use log::info;
use rs_markov_core::io::{ingest_file, load_chain, save_chain};
use rs_markov_core::model::DEFAULT_RESOLUTION;
use rs_markov_core::{Chain, ChainConfig};

use crate::cli::BuildArgs;

/// Builds or extends the chain stored at `args.outfile` with `args.infile`.
///
/// An existing chain file is reused: its resolution is kept unless `-r`
/// asks for a different one, which is an error.
pub fn run(args: &BuildArgs) -> Result<()> {
	let mut chain = if args.outfile.is_file() {
		info!("Using old chain file {}...", args.outfile.display());
		load_chain(&args.outfile, args.resolution.unwrap_or(0), Some(args.separator.as_str()))
			.with_context(|| format!("cannot reuse chain file {}", args.outfile.display()))?
	} else {
		info!("Creating a new chain");
		let mut config = ChainConfig::new(args.resolution.unwrap_or(DEFAULT_RESOLUTION))?;
		config.set_token_separator(&args.separator)?;
		config.set_sentence_terminators(&args.terminators);
		Chain::with_config(config)
	};

	let lines = ingest_file(&mut chain, &args.infile)?;
	info!("Read {} lines, chain has {} keys", lines, chain.len());

	save_chain(&chain, &args.outfile)?;
	Ok(())
}
