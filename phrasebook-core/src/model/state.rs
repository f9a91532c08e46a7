use std::collections::HashSet;

use rand::Rng;
use rand::seq::IteratorRandom;

use super::token::Token;

/// The successors observed after a single key.
///
/// Conceptually, this is a node in a Markov chain whose outgoing edges
/// are all equally likely: only the *possibility* of a transition is
/// recorded, never how many times it was seen.
///
/// ## Invariants
/// - Each successor appears once (set semantics)
/// - A set stored in a table is never empty
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuccessorSet {
	successors: HashSet<Token>,
}

impl SuccessorSet {
	/// Creates a new empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records that `next` was observed after the key.
	///
	/// Returns `false` if it was already known.
	pub fn add_successor(&mut self, next: &str) -> bool {
		if self.successors.contains(next) {
			return false;
		}
		self.successors.insert(next.to_owned())
	}

	pub fn contains(&self, token: &str) -> bool {
		self.successors.contains(token)
	}

	pub fn len(&self) -> usize {
		self.successors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.successors.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.successors.iter().map(String::as_str)
	}

	/// Picks one successor uniformly at random.
	///
	/// Returns `None` if the set is empty.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.successors.iter().choose(rng).map(String::as_str)
	}

	/// Adds every successor of `other` to this set.
	///
	/// Intended for parallel learning, where partial tables are combined.
	pub fn merge(&mut self, other: &Self) {
		for next in &other.successors {
			self.add_successor(next);
		}
	}
}

impl<S: Into<Token>> FromIterator<S> for SuccessorSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self { successors: iter.into_iter().map(Into::into).collect() }
	}
}
