use std::collections::BTreeSet;

/// A corpus token after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedToken {
	pub text: String,
	/// The raw token closed a sentence (its terminator was removed from `text`).
	pub ends_sentence: bool,
}

fn is_double_quote(c: char) -> bool {
	matches!(c, '"' | '\u{201c}' | '\u{201d}')
}

/// Normalizes one whitespace-free token taken from a corpus line.
///
/// Applied in order:
/// - lowercase
/// - strip leading/trailing straight and curly double quotes, as one run: any
///   mix of them is removed, so `“"x"”` becomes `x`
/// - em-dash to hyphen
/// - strip trailing commas
///
/// The sentence-end test looks at the raw token: it must be longer than one
/// character and end with one of `terminators`. When it does, the last
/// character of the normalized text is dropped. A lone terminator such as
/// `"."` is therefore kept as a token of its own.
///
/// Never fails; the result may be empty (e.g. `"",`).
pub fn normalize(raw: &str, terminators: &BTreeSet<char>) -> NormalizedToken {
	let lowered = raw.to_lowercase();
	let mut text = lowered
		.trim_matches(is_double_quote)
		.replace('\u{2014}', "-")
		.trim_end_matches(',')
		.to_owned();

	let mut chars = raw.chars();
	let last = chars.next_back();
	let ends_sentence = chars.next().is_some() && last.is_some_and(|c| terminators.contains(&c));
	if ends_sentence {
		text.pop();
	}

	NormalizedToken { text, ends_sentence }
}
