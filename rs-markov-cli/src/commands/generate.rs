use std::fs::File;
use std::io::{self, Write};

use anyhow::Result;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::PhraseGenerator;
use rs_markov_core::io::{load_chain, write_phrases};

use crate::cli::GenerateArgs;

/// Produces `args.count` phrases from the chain in `args.infile`.
///
/// The resolution is read from the file. Phrases are joined by a blank line.
pub fn phrases(args: &GenerateArgs) -> Result<Vec<String>> {
	let chain = load_chain(&args.infile, 0, None)?;
	let generator = PhraseGenerator::new(&chain)?;

	let mut rng = match args.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};
	Ok(generator.phrases(&mut rng, args.count, args.length))
}

/// Writes the phrases to `args.outfile`, or to stdout when none is given.
pub fn run(args: &GenerateArgs) -> Result<()> {
	let phrases = phrases(args)?;
	match &args.outfile {
		Some(path) => {
			write_phrases(&phrases, File::create(path)?)?;
			info!("Wrote {} phrases to {}", phrases.len(), path.display());
		}
		None => {
			let mut stdout = io::stdout().lock();
			write_phrases(&phrases, &mut stdout)?;
			writeln!(stdout)?;
		}
	}
	Ok(())
}
