use std::fmt;

/// A single unit of text: one whitespace-delimited word, or the terminator.
pub type Token = String;

/// Special token denoting the end of an utterance.
///
/// Tokenization never yields an empty word, so the empty string cannot
/// collide with real text and survives a JSON round trip unchanged.
pub const TERMINATOR: &str = "";

/// Separator used when a key is written as a single string.
pub const KEY_DELIMITER: &str = " ";

/// Returns `true` if `token` marks the end of an utterance.
pub fn is_terminator(token: &str) -> bool {
	token == TERMINATOR
}

/// Splits `text` on runs of whitespace and appends the terminator.
///
/// No normalization is done: tokens are exact substrings of the input.
/// Empty or blank input yields only the terminator.
pub fn tokenize(text: &str) -> Vec<Token> {
	let mut tokens: Vec<Token> = text.split_whitespace().map(str::to_owned).collect();
	tokens.push(TERMINATOR.to_owned());
	tokens
}

/// An ordered window of exactly `order` tokens, used as a table lookup key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Vec<Token>);

impl Key {
	pub fn new(tokens: Vec<Token>) -> Self {
		Self(tokens)
	}

	pub fn tokens(&self) -> &[Token] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the key that follows this one once `next` has been emitted:
	/// the first token is dropped and `next` is appended.
	pub fn slide(&self, next: &str) -> Self {
		let mut tokens = Vec::with_capacity(self.0.len());
		tokens.extend(self.0.iter().skip(1).cloned());
		tokens.push(next.to_owned());
		Self(tokens)
	}

	/// Joins the tokens with [`KEY_DELIMITER`].
	pub fn encode(&self) -> String {
		self.0.join(KEY_DELIMITER)
	}

	/// Inverse of [`Key::encode`].
	///
	/// Splits on the single-space delimiter rather than on whitespace runs,
	/// so an encoded terminator (empty token) is preserved.
	pub fn decode(encoded: &str) -> Self {
		Self(encoded.split(KEY_DELIMITER).map(str::to_owned).collect())
	}
}

impl<S: Into<Token>> FromIterator<S> for Key {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.encode())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tokenize_splits_on_whitespace_runs() {
		assert_eq!(tokenize("  the quick\t\tfox \n jumps "), vec!["the", "quick", "fox", "jumps", TERMINATOR]);
	}

	#[test]
	fn tokenize_keeps_case_and_punctuation() {
		assert_eq!(tokenize("Hello, World!"), vec!["Hello,", "World!", TERMINATOR]);
	}

	#[test]
	fn tokenize_empty_input_is_only_terminator() {
		assert_eq!(tokenize(""), vec![TERMINATOR]);
		assert_eq!(tokenize("   \t"), vec![TERMINATOR]);
	}

	#[test]
	fn terminator_is_never_a_word() {
		assert_eq!(tokenize("a b c").iter().filter(|t| is_terminator(t)).count(), 1);
	}

	#[test]
	fn slide_drops_first_and_appends() {
		let key: Key = ["the", "quick"].into_iter().collect();
		assert_eq!(key.slide("fox"), Key::from_iter(["quick", "fox"]));
	}

	#[test]
	fn encode_decode_preserves_terminator() {
		let key: Key = ["jumps", TERMINATOR].into_iter().collect();
		assert_eq!(key.encode(), "jumps ");
		assert_eq!(Key::decode(&key.encode()), key);
	}
}
