use log::warn;
use rand::Rng;

use super::token::{Key, Token, is_terminator};
use super::transition_table::TransitionTable;

/// Returned by [`generate`] when nothing has been learned yet.
pub const FALLBACK_PHRASE: &str = "I don't have anything to say...";

/// Generates a phrase from a uniformly random starting key.
///
/// # Behavior
/// - Empty table: returns [`FALLBACK_PHRASE`] without walking.
/// - Otherwise walks from a random key (see [`walk`]) and renders the
///   resulting tokens (see [`render`]).
pub fn generate<R: Rng + ?Sized>(table: &TransitionTable, limit: usize, rng: &mut R) -> String {
	match table.random_key(rng) {
		Some(start) => render(&walk(table, start, limit, rng)),
		None => FALLBACK_PHRASE.to_owned(),
	}
}

/// Performs the bounded random walk starting at `start`.
///
/// # Parameters
/// - `start`: first window of the phrase, emitted as is
/// - `limit`: maximum number of iterations after the first successor pick
///
/// # Returns
/// The key tokens followed by every chosen successor, including the
/// terminator if one was chosen. The result never holds more than
/// `start.len() + 1 + limit` tokens.
///
/// # Notes
/// - The walk stops when the terminator is chosen or `limit` iterations
///   have run.
/// - A key without an entry (only possible with a table loaded from a file
///   of another order, or edited by hand) ends the walk as if the
///   terminator had been reached.
pub fn walk<R: Rng + ?Sized>(table: &TransitionTable, start: &Key, limit: usize, rng: &mut R) -> Vec<Token> {
	let mut output: Vec<Token> = start.tokens().to_vec();
	let mut key = start.clone();

	let Some(mut next) = next_token(table, &key, rng) else {
		return output;
	};

	let mut iterations = 0;
	loop {
		output.push(next.clone());
		if is_terminator(&next) || iterations >= limit {
			break;
		}

		key = key.slide(&next);
		next = match next_token(table, &key, rng) {
			Some(token) => token,
			None => break,
		};
		iterations += 1;
	}

	output
}

/// Joins walked tokens with single spaces.
///
/// A trailing terminator is dropped first, so the text never ends with a
/// dangling space.
pub fn render(tokens: &[Token]) -> String {
	let tokens = match tokens.split_last() {
		Some((last, rest)) if is_terminator(last) => rest,
		_ => tokens,
	};
	tokens.join(" ")
}

fn next_token<R: Rng + ?Sized>(table: &TransitionTable, key: &Key, rng: &mut R) -> Option<Token> {
	match table.successors(key).and_then(|successors| successors.predict(rng)) {
		Some(token) => Some(token.to_owned()),
		None => {
			warn!("No successor learned for key '{key}', ending the phrase");
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::state::SuccessorSet;
	use crate::model::token::{TERMINATOR, tokenize};
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn table(order: usize, texts: &[&str]) -> TransitionTable {
		let mut table = TransitionTable::new(order).unwrap();
		for text in texts {
			table.learn(&tokenize(text));
		}
		table
	}

	#[test]
	fn empty_table_returns_fallback() {
		let table = TransitionTable::new(2).unwrap();
		let mut rng = StdRng::seed_from_u64(1);
		for limit in [0, 1, 20, 1000] {
			assert_eq!(generate(&table, limit, &mut rng), FALLBACK_PHRASE);
		}
	}

	#[test]
	fn single_chain_is_deterministic() {
		let table = table(2, &["the quick fox jumps"]);
		let start = Key::from_iter(["the", "quick"]);
		let mut rng = StdRng::seed_from_u64(9);

		let tokens = walk(&table, &start, 10, &mut rng);
		assert_eq!(tokens, vec!["the", "quick", "fox", "jumps", TERMINATOR]);
		// 2 tokens of key + 1 initial pick + 2 iterations
		assert!(tokens.len() - start.len() - 1 <= 3);
		assert_eq!(render(&tokens), "the quick fox jumps");
	}

	#[test]
	fn limit_zero_stops_after_first_pick() {
		let table = table(2, &["the quick fox jumps"]);
		let start = Key::from_iter(["the", "quick"]);
		let tokens = walk(&table, &start, 0, &mut StdRng::seed_from_u64(0));
		assert_eq!(tokens, vec!["the", "quick", "fox"]);
	}

	#[test]
	fn output_length_is_bounded() {
		// A cycle: the walk can only stop on the limit or the rare terminator
		let table = table(1, &["a b a b a b c", "b a"]);
		let mut rng = StdRng::seed_from_u64(11);
		for limit in 0..30 {
			for _ in 0..20 {
				let start = table.random_key(&mut rng).unwrap().clone();
				let tokens = walk(&table, &start, limit, &mut rng);
				assert!(tokens.len() <= table.order() + 1 + limit);
			}
		}
	}

	#[test]
	fn missing_key_ends_the_walk() {
		// Hand-built table: "a b" -> "c", but "b c" was never learned
		let mut table = TransitionTable::new(2).unwrap();
		table.set_successors(Key::from_iter(["a", "b"]), SuccessorSet::from_iter(["c"]));

		let tokens = walk(&table, &Key::from_iter(["a", "b"]), 10, &mut StdRng::seed_from_u64(5));
		assert_eq!(tokens, vec!["a", "b", "c"]);
		assert_eq!(render(&tokens), "a b c");
	}

	#[test]
	fn unknown_start_key_yields_key_only() {
		let table = table(2, &["the quick fox jumps"]);
		let tokens = walk(&table, &Key::from_iter(["no", "such"]), 10, &mut StdRng::seed_from_u64(5));
		assert_eq!(tokens, vec!["no", "such"]);
	}

	#[test]
	fn rendered_text_has_no_trailing_space() {
		let table = table(1, &["hello there", "hello world", "good morning world"]);
		let mut rng = StdRng::seed_from_u64(21);
		for _ in 0..100 {
			let phrase = generate(&table, 20, &mut rng);
			assert!(!phrase.ends_with(' '), "trailing space in {phrase:?}");
			assert!(!phrase.is_empty());
		}
	}

	#[test]
	fn render_keeps_text_without_terminator() {
		let tokens: Vec<Token> = vec!["cut".into(), "short".into()];
		assert_eq!(render(&tokens), "cut short");
		assert_eq!(render(&[]), "");
	}

	#[test]
	fn generated_words_come_from_learned_text() {
		let table = table(2, &["the cat sat on the mat", "the cat ate the fish"]);
		let mut rng = StdRng::seed_from_u64(33);
		let vocabulary = ["the", "cat", "sat", "on", "mat", "ate", "fish"];
		for _ in 0..50 {
			for word in generate(&table, 10, &mut rng).split(' ') {
				assert!(vocabulary.contains(&word), "unexpected word {word:?}");
			}
		}
	}
}
