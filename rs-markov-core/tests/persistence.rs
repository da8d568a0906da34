use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::io::{ingest_file, load_chain, save_chain, write_phrases};
use rs_markov_core::{Chain, ChainError, PhraseGenerator};

const CORPUS: &str = "\u{201c}It was a bright cold day in April,\u{201d} he wrote.\n\
	The clocks were striking thirteen.\n\
	\n\
	Nobody answered\u{2014}the clocks kept striking!\n";

#[test]
fn build_save_load_generate() {
	let dir = tempfile::tempdir().unwrap();
	let corpus = dir.path().join("corpus.txt");
	let model = dir.path().join("chain.json");
	fs::write(&corpus, CORPUS).unwrap();

	let mut chain = Chain::new(2).unwrap();
	assert_eq!(ingest_file(&mut chain, &corpus).unwrap(), 4);
	save_chain(&chain, &model).unwrap();

	let restored = load_chain(&model, 0, None).unwrap();
	assert_eq!(restored, chain);
	assert_eq!(restored.successors("were striking").unwrap().as_slice(), &["thirteen".to_owned()]);
	assert_eq!(restored.successors("\n nobody").unwrap().as_slice(), &["answered-the".to_owned()]);

	let generator = PhraseGenerator::new(&restored).unwrap();
	let phrases = generator.phrases(&mut StdRng::seed_from_u64(2024), 3, 20);
	assert_eq!(phrases.len(), 3);
	assert!(phrases.iter().all(|p| p.ends_with('.')));
}

#[test]
fn binary_models_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let model = dir.path().join("chain.bin");

	let mut chain = Chain::new(3).unwrap();
	chain.read_text(CORPUS);
	save_chain(&chain, &model).unwrap();

	assert_eq!(load_chain(&model, 3, Some(" ")).unwrap(), chain);
	assert!(matches!(
		load_chain(&model, 2, None),
		Err(ChainError::ResolutionMismatch { expected: 2, found: 3 })
	));
}

#[test]
fn existing_model_keeps_learning() {
	let dir = tempfile::tempdir().unwrap();
	let model = dir.path().join("chain.json");

	let mut chain = Chain::new(2).unwrap();
	chain.read_line("The cat sat.");
	save_chain(&chain, &model).unwrap();

	let mut chain = load_chain(&model, 2, Some(" ")).unwrap();
	chain.read_line("The cat ran.");
	save_chain(&chain, &model).unwrap();

	let chain = load_chain(&model, 0, None).unwrap();
	assert_eq!(
		chain.successors("the cat").unwrap().as_slice(),
		&["sat".to_owned(), "ran".to_owned()]
	);
}

#[test]
fn saved_json_is_stable() {
	let dir = tempfile::tempdir().unwrap();
	let first = dir.path().join("first.json");
	let second = dir.path().join("second.json");

	let mut chain = Chain::new(2).unwrap();
	chain.read_text(CORPUS);
	save_chain(&chain, &first).unwrap();
	save_chain(&load_chain(&first, 0, None).unwrap(), &second).unwrap();

	assert_eq!(fs::read_to_string(first).unwrap(), fs::read_to_string(second).unwrap());
}

#[test]
fn version_mismatch_on_disk() {
	let dir = tempfile::tempdir().unwrap();
	let model = dir.path().join("old.json");

	let chain = {
		let mut chain = Chain::new(2).unwrap();
		chain.read_line("Hello there.");
		chain
	};
	let json = chain.to_json().unwrap().replace("\"version\": 1", "\"version\": 2");
	fs::write(&model, json).unwrap();

	assert!(matches!(
		load_chain(&model, 0, None),
		Err(ChainError::VersionMismatch { expected: 1, found: 2 })
	));
}

#[test]
fn phrases_written_with_blank_lines() {
	let dir = tempfile::tempdir().unwrap();
	let out = dir.path().join("phrases.txt");
	let phrases = vec!["one.".to_owned(), "two.".to_owned()];

	write_phrases(&phrases, fs::File::create(&out).unwrap()).unwrap();
	assert_eq!(fs::read_to_string(out).unwrap(), "one.\n\ntwo.");
}
