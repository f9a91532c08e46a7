use std::collections::HashMap;
use std::collections::hash_map::Entry;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::SuccessorSet;
use super::token::{Key, Token};
use crate::error::{PhrasebookError, PhrasebookResult};

/// Learned mapping from fixed-width token windows to their successors.
///
/// # Responsibilities
/// - Ingest tokenized utterances by sliding a window of `order` tokens
/// - Answer successor lookups for a key
/// - Pick a uniformly random key to start a walk
/// - Merge with another table of the same `order`
///
/// # Invariants
/// - `order` is always >= 1 and never changes
/// - Entries are only added or grown, never removed
/// - `keys` lists every key of `states` exactly once, in insertion order
///
/// `keys` trades one extra clone per distinct key for O(1) uniform key
/// selection; since the table never shrinks, it never needs compaction.
#[derive(Clone, Debug)]
pub struct TransitionTable {
	/// Number of tokens per key
	order: usize,

	/// Mapping from a key to the tokens seen right after it
	states: HashMap<Key, SuccessorSet>,

	/// Stable index over `states` for random access
	keys: Vec<Key>,
}

impl TransitionTable {
	/// Creates a new empty table with keys of `order` tokens.
	///
	/// # Errors
	/// Returns [`PhrasebookError::InvalidOrder`] if `order == 0`.
	pub fn new(order: usize) -> PhrasebookResult<Self> {
		if order == 0 {
			return Err(PhrasebookError::InvalidOrder);
		}
		Ok(Self { order, states: HashMap::new(), keys: Vec::new() })
	}

	/// Creates an empty table with the same order as `self`.
	pub(crate) fn empty_like(&self) -> Self {
		Self { order: self.order, states: HashMap::new(), keys: Vec::new() }
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Adds a tokenized utterance to the table.
	///
	/// Every window of `order` tokens followed by at least one token records
	/// that following token as a successor. Inputs shorter than `order + 1`
	/// tokens have no such window and are ignored.
	pub fn learn(&mut self, tokens: &[Token]) {
		if tokens.len() <= self.order {
			return;
		}

		for window in tokens.windows(self.order + 1) {
			let (key, next) = window.split_at(self.order);
			self.entry(Key::new(key.to_vec())).add_successor(&next[0]);
		}
	}

	/// Returns the successors of `key`, if it was ever learned.
	pub fn successors(&self, key: &Key) -> Option<&SuccessorSet> {
		self.states.get(key)
	}

	/// Replaces the successors of `key`.
	///
	/// Used when restoring a persisted table. Empty sets are ignored so the
	/// table never holds a key that cannot be walked from.
	pub fn set_successors(&mut self, key: Key, successors: SuccessorSet) {
		if successors.is_empty() {
			return;
		}
		*self.entry(key) = successors;
	}

	/// Returns a uniformly random key, or `None` if the table is empty.
	pub fn random_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Key> {
		self.keys.choose(rng)
	}

	/// Iterates over the entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&Key, &SuccessorSet)> {
		self.keys.iter().filter_map(|key| self.states.get_key_value(key))
	}

	/// Merges another table into this one.
	///
	/// Successor sets of shared keys are united; new keys are cloned.
	///
	/// # Errors
	/// Returns [`PhrasebookError::OrderMismatch`] if the orders differ.
	pub fn merge(&mut self, other: &Self) -> PhrasebookResult<()> {
		if self.order != other.order {
			return Err(PhrasebookError::OrderMismatch { expected: self.order, found: other.order });
		}

		for (key, successors) in other.iter() {
			self.entry(key.clone()).merge(successors);
		}

		Ok(())
	}

	/// Get or create the successor set for `key`, keeping `keys` in sync.
	fn entry(&mut self, key: Key) -> &mut SuccessorSet {
		match self.states.entry(key) {
			Entry::Occupied(entry) => entry.into_mut(),
			Entry::Vacant(entry) => {
				self.keys.push(entry.key().clone());
				entry.insert(SuccessorSet::new())
			}
		}
	}
}

impl PartialEq for TransitionTable {
	/// Two tables are equal when they hold the same keys with the same
	/// successors, regardless of the order keys were learned in.
	fn eq(&self, other: &Self) -> bool {
		self.order == other.order && self.states == other.states
	}
}

impl Eq for TransitionTable {}
