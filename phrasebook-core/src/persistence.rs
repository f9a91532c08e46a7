//! JSON file representation of a [`TransitionTable`].
//!
//! The file is a single object: each property name is a key whose tokens
//! are joined by one space, each value is the array of its distinct
//! successors. No order, version or other envelope is stored.
//!
//! ```json
//! {"fox jumps":[""],"quick fox":["jumps"],"the quick":["fox"]}
//! ```
//!
//! Keys and sets are converted explicitly by [`encode_table`] and
//! [`decode_table`] rather than derived on the table type, since the
//! key encoding is what keeps the format readable and collision free.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::{debug, error, info};

use crate::error::{PhrasebookError, PhrasebookResult};
use crate::io::{read_if_exists, write_file};
use crate::model::state::SuccessorSet;
use crate::model::token::Key;
use crate::model::transition_table::TransitionTable;

/// Converts a table into its file object.
///
/// Properties and successors are sorted so that dumping the same table
/// twice produces the same bytes.
pub fn encode_table(table: &TransitionTable) -> BTreeMap<String, Vec<&str>> {
	table
		.iter()
		.map(|(key, successors)| {
			let mut successors: Vec<&str> = successors.iter().collect();
			successors.sort_unstable();
			(key.encode(), successors)
		})
		.collect()
}

/// Fills `table` from a parsed file object.
///
/// Each property replaces the successors of its key. Key widths are not
/// checked against the table order.
pub fn decode_table(object: BTreeMap<String, Vec<String>>, table: &mut TransitionTable) {
	for (encoded, successors) in object {
		table.set_successors(Key::decode(&encoded), successors.into_iter().collect::<SuccessorSet>());
	}
}

/// The file a phrasebook is dumped to and loaded from.
///
/// Writes go through `write_lock`, so two `dump` calls on a shared store
/// never interleave: the second waits for the first to finish.
#[derive(Debug)]
pub struct Store {
	path: PathBuf,
	write_lock: Mutex<()>,
}

impl Store {
	pub fn new<P: Into<PathBuf>>(path: P) -> Self {
		Self { path: path.into(), write_lock: Mutex::new(()) }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Writes the whole table to the file, replacing its content.
	///
	/// # Errors
	/// - [`PhrasebookError::Encode`] if the table cannot be serialized
	/// - [`PhrasebookError::Io`] if the file cannot be written
	///
	/// Both are logged before being returned.
	pub fn dump(&self, table: &TransitionTable) -> PhrasebookResult<()> {
		let contents = serde_json::to_string(&encode_table(table)).map_err(|source| {
			error!("Failed to encode phrasebook for {}: {source}", self.path.display());
			PhrasebookError::Encode { path: self.path.clone(), source }
		})?;

		// A poisoned lock only means a previous writer panicked; the file is rewritten wholesale anyway
		let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

		write_file(&self.path, &contents).map_err(|source| {
			error!("Failed to write {} bytes to {}: {source}", contents.len(), self.path.display());
			PhrasebookError::Io { operation: "write", path: self.path.clone(), source }
		})?;

		info!("Dumped {} keys ({} bytes) to {}", table.len(), contents.len(), self.path.display());
		Ok(())
	}

	/// Reads the file into `table`.
	///
	/// # Returns
	/// - `Ok(true)` if a file was found and loaded
	/// - `Ok(false)` if there is no file yet; `table` is left untouched
	///
	/// # Errors
	/// - [`PhrasebookError::Io`] if the file exists but cannot be read
	/// - [`PhrasebookError::Parse`] if its content is not a valid table object
	pub fn load(&self, table: &mut TransitionTable) -> PhrasebookResult<bool> {
		let contents = read_if_exists(&self.path).map_err(|source| {
			error!("Failed to read {}: {source}", self.path.display());
			PhrasebookError::Io { operation: "read", path: self.path.clone(), source }
		})?;

		let Some(contents) = contents else {
			info!("No phrasebook at {}, starting empty", self.path.display());
			return Ok(false);
		};

		let object: BTreeMap<String, Vec<String>> = serde_json::from_str(&contents).map_err(|source| {
			error!("Failed to parse {} ({} bytes): {source}", self.path.display(), contents.len());
			PhrasebookError::Parse { path: self.path.clone(), source }
		})?;

		debug!("Decoding {} keys from {}", object.len(), self.path.display());
		decode_table(object, table);
		info!("Loaded {} keys from {}", table.len(), self.path.display());
		Ok(true)
	}
}
