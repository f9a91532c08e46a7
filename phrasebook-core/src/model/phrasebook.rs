use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{error, info};
use rand::Rng;

use super::generator;
use super::token::{Key, tokenize};
use super::transition_table::TransitionTable;
use crate::config::PhrasebookConfig;
use crate::error::{PhrasebookError, PhrasebookResult};
use crate::io::read_file;
use crate::persistence::Store;

/// Number of corpus chunks per CPU core in `learn_corpus`.
const CHUNK_FACTOR: usize = 8;

/// The phrasebook engine: a transition table plus an optional store.
///
/// One instance is owned by the surrounding system, which must call
/// [`Phrasebook::load`] before serving `learn`/`generate`, otherwise the
/// persisted state is silently shadowed by an empty table.
///
/// ```
/// use phrasebook_core::Phrasebook;
///
/// let mut phrasebook = Phrasebook::new(2).unwrap();
/// phrasebook.learn("the quick fox jumps");
/// assert!(!phrasebook.generate(20).is_empty());
/// ```
#[derive(Debug)]
pub struct Phrasebook {
	table: TransitionTable,
	store: Option<Store>,
}

impl Phrasebook {
	/// Creates an empty phrasebook without persistence.
	///
	/// # Errors
	/// Returns [`PhrasebookError::InvalidOrder`] if `order == 0`.
	pub fn new(order: usize) -> PhrasebookResult<Self> {
		Ok(Self { table: TransitionTable::new(order)?, store: None })
	}

	/// Creates an empty phrasebook persisted at `path`.
	///
	/// Nothing is read yet; call [`Phrasebook::load`].
	pub fn with_storage<P: AsRef<Path>>(order: usize, path: P) -> PhrasebookResult<Self> {
		Ok(Self { table: TransitionTable::new(order)?, store: Some(Store::new(path.as_ref())) })
	}

	/// Creates an empty phrasebook from its configuration.
	pub fn from_config(config: &PhrasebookConfig) -> PhrasebookResult<Self> {
		match &config.storage_path {
			Some(path) => Self::with_storage(config.order, path),
			None => Self::new(config.order),
		}
	}

	pub fn order(&self) -> usize {
		self.table.order()
	}

	/// Read-only view of the learned table.
	pub fn table(&self) -> &TransitionTable {
		&self.table
	}

	/// Where the table is persisted, if anywhere.
	pub fn storage_path(&self) -> Option<&Path> {
		self.store.as_ref().map(Store::path)
	}

	/// Learns one utterance.
	///
	/// Never fails: text too short to fill a window is ignored.
	pub fn learn(&mut self, text: &str) {
		self.table.learn(&tokenize(text));
	}

	/// Generates a phrase of at most `order + 1 + limit` words.
	///
	/// Returns [`generator::FALLBACK_PHRASE`] if nothing was learned.
	pub fn generate(&self, limit: usize) -> String {
		self.generate_with(limit, &mut rand::rng())
	}

	/// Same as [`Phrasebook::generate`] with a caller-provided generator.
	pub fn generate_with<R: Rng + ?Sized>(&self, limit: usize, rng: &mut R) -> String {
		generator::generate(&self.table, limit, rng)
	}

	/// Generates a phrase starting from a chosen key instead of a random one.
	///
	/// An unknown key yields the key itself.
	pub fn generate_from<R: Rng + ?Sized>(&self, start: &Key, limit: usize, rng: &mut R) -> String {
		generator::render(&generator::walk(&self.table, start, limit, rng))
	}

	/// Learns every line of a text file, one utterance per line.
	///
	/// # Behavior
	/// - Splits lines into chunks (based on CPU cores * factor).
	/// - Spawns threads to build a partial table for each chunk.
	/// - Merges all partial tables into this one.
	///
	/// The result is the same as learning the lines one by one.
	///
	/// # Returns
	/// The number of lines read.
	///
	/// # Errors
	/// Returns [`PhrasebookError::Io`] if the file cannot be read.
	pub fn learn_corpus<P: AsRef<Path>>(&mut self, filepath: P) -> PhrasebookResult<usize> {
		let path = filepath.as_ref();
		let lines = read_file(path).map_err(|source| {
			error!("Failed to read corpus {}: {source}", path.display());
			PhrasebookError::Io { operation: "read corpus", path: path.to_path_buf(), source }
		})?;
		if lines.is_empty() {
			return Ok(0);
		}

		let chunks = num_cpus::get() * CHUNK_FACTOR;
		let chunk_size = lines.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		for chunk in lines.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();
			let mut partial = self.table.empty_like();

			thread::spawn(move || {
				for line in &chunk {
					partial.learn(&tokenize(line));
				}
				// The receiver is only dropped once every partial table has been merged
				let _ = tx.send(partial);
			});
		}
		drop(tx);

		for partial in rx.iter() {
			self.table.merge(&partial)?;
		}

		info!("Learned {} lines from {} ({} keys)", lines.len(), path.display(), self.table.len());
		Ok(lines.len())
	}

	/// Writes the whole table to the store.
	///
	/// Does nothing if persistence is disabled.
	///
	/// # Errors
	/// See [`Store::dump`].
	pub fn dump(&self) -> PhrasebookResult<()> {
		match &self.store {
			Some(store) => store.dump(&self.table),
			None => Ok(()),
		}
	}

	/// Restores the table from the store.
	///
	/// A missing file leaves the table as it is. Does nothing if persistence
	/// is disabled.
	///
	/// # Errors
	/// See [`Store::load`].
	pub fn load(&mut self) -> PhrasebookResult<()> {
		match &self.store {
			Some(store) => store.load(&mut self.table).map(|_| ()),
			None => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::generator::FALLBACK_PHRASE;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::io::Write;

	#[test]
	fn fresh_phrasebook_uses_fallback() {
		let phrasebook = Phrasebook::new(3).unwrap();
		assert_eq!(phrasebook.generate(0), FALLBACK_PHRASE);
		assert_eq!(phrasebook.generate(50), FALLBACK_PHRASE);
	}

	#[test]
	fn zero_order_is_rejected() {
		assert!(matches!(Phrasebook::new(0), Err(PhrasebookError::InvalidOrder)));
		let config = PhrasebookConfig { order: 0, ..Default::default() };
		assert!(Phrasebook::from_config(&config).is_err());
	}

	#[test]
	fn generate_from_follows_the_only_chain() {
		let mut phrasebook = Phrasebook::new(2).unwrap();
		phrasebook.learn("the quick fox jumps");
		let mut rng = StdRng::seed_from_u64(0);
		let phrase = phrasebook.generate_from(&Key::from_iter(["the", "quick"]), 10, &mut rng);
		assert_eq!(phrase, "the quick fox jumps");
	}

	#[test]
	fn single_sentence_always_regenerates_a_suffix() {
		let mut phrasebook = Phrasebook::new(2).unwrap();
		phrasebook.learn("the quick fox jumps");
		let mut rng = StdRng::seed_from_u64(4);
		for _ in 0..20 {
			let phrase = phrasebook.generate_with(10, &mut rng);
			assert!(["the quick fox jumps", "quick fox jumps", "fox jumps"].contains(&phrase.as_str()), "{phrase}");
		}
	}

	#[test]
	fn no_storage_means_no_op_persistence() {
		let mut phrasebook = Phrasebook::new(2).unwrap();
		phrasebook.learn("a b c");
		assert!(phrasebook.storage_path().is_none());
		phrasebook.dump().unwrap();
		phrasebook.load().unwrap();
		assert_eq!(phrasebook.table().len(), 2);
	}

	#[test]
	fn from_config_uses_storage_path() {
		let dir = tempfile::tempdir().unwrap();
		let config = PhrasebookConfig {
			order: 2,
			storage_path: Some(dir.path().join("pb.json")),
			..Default::default()
		};
		let phrasebook = Phrasebook::from_config(&config).unwrap();
		assert_eq!(phrasebook.order(), 2);
		assert_eq!(phrasebook.storage_path(), Some(dir.path().join("pb.json").as_path()));
	}

	#[test]
	fn corpus_learning_matches_sequential_learning() {
		let lines: Vec<String> = (0..500).map(|i| format!("line {} says {} and {}", i % 7, i % 11, i % 13)).collect();

		let mut file = tempfile::NamedTempFile::new().unwrap();
		for line in &lines {
			writeln!(file, "{line}").unwrap();
		}

		let mut parallel = Phrasebook::new(2).unwrap();
		assert_eq!(parallel.learn_corpus(file.path()).unwrap(), lines.len());

		let mut sequential = Phrasebook::new(2).unwrap();
		for line in &lines {
			sequential.learn(line);
		}

		assert_eq!(parallel.table(), sequential.table());
	}

	#[test]
	fn empty_corpus_learns_nothing() {
		let file = tempfile::NamedTempFile::new().unwrap();
		let mut phrasebook = Phrasebook::new(2).unwrap();
		assert_eq!(phrasebook.learn_corpus(file.path()).unwrap(), 0);
		assert!(phrasebook.table().is_empty());
	}

	#[test]
	fn missing_corpus_is_an_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let mut phrasebook = Phrasebook::new(2).unwrap();
		let err = phrasebook.learn_corpus(dir.path().join("missing.txt")).unwrap_err();
		assert!(matches!(err, PhrasebookError::Io { operation: "read corpus", .. }));
	}
}
