use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rs_markov_core::model::{
	DEFAULT_MAX_TOKENS, DEFAULT_SENTENCE_TERMINATORS, DEFAULT_TOKEN_SEPARATOR,
};

#[derive(Parser)]
#[command(name = "rs-markov")]
#[command(author, version, about = "Build word-level Markov chains and generate phrases from them")]
#[command(propagate_version = true)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Build (or extend) a chain from a text corpus
	Build(BuildArgs),

	/// Generate phrases from a chain file
	Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
	/// A file of text on which to build the chain
	#[arg(short, long)]
	pub infile: PathBuf,

	/// Chain file to create or extend (".bin" for the binary format)
	#[arg(short, long, default_value = "chain.json")]
	pub outfile: PathBuf,

	/// Phrase resolution (default 2 for a new chain, the stored one otherwise)
	#[arg(short, long, env = "MARKOV_RESOLUTION")]
	pub resolution: Option<usize>,

	/// Separator placed between tokens of a key (whitespace only)
	#[arg(long, env = "MARKOV_SEPARATOR", default_value = DEFAULT_TOKEN_SEPARATOR)]
	pub separator: String,

	/// Characters ending a sentence, used when creating a new chain
	#[arg(long, env = "MARKOV_TERMINATORS", default_value = DEFAULT_SENTENCE_TERMINATORS)]
	pub terminators: String,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
	/// A chain file created with `build`
	#[arg(short, long)]
	pub infile: PathBuf,

	/// File to write generated phrases to (default: stdout)
	#[arg(short, long)]
	pub outfile: Option<PathBuf>,

	/// Number of phrases to generate
	#[arg(short, long, default_value_t = 1)]
	pub count: usize,

	/// Max phrase length, in tokens
	#[arg(short, long, default_value_t = DEFAULT_MAX_TOKENS)]
	pub length: usize,

	/// Seed for reproducible output
	#[arg(short, long, env = "MARKOV_SEED")]
	pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn verify_cli() {
		Cli::command().debug_assert();
	}

	#[test]
	fn generate_defaults() {
		let cli = Cli::try_parse_from(["rs-markov", "generate", "-i", "chain.json"]).unwrap();
		let Commands::Generate(args) = cli.command else { panic!("expected generate") };
		assert_eq!(args.count, 1);
		assert_eq!(args.length, 64);
		assert!(args.outfile.is_none());
	}

	#[test]
	fn build_requires_infile() {
		assert!(Cli::try_parse_from(["rs-markov", "build"]).is_err());
		let cli =
			Cli::try_parse_from(["rs-markov", "build", "-i", "corpus.txt", "-r", "3"]).unwrap();
		let Commands::Build(args) = cli.command else { panic!("expected build") };
		assert_eq!(args.outfile, PathBuf::from("chain.json"));
		assert_eq!(args.resolution, Some(3));
		assert_eq!(args.separator, " ");
	}
}
