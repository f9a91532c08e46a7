use std::path::PathBuf;

use serde::Deserialize;

/// Construction options of a [`Phrasebook`](crate::Phrasebook).
///
/// Every field has a default, so a partial configuration file is enough:
///
/// ```toml
/// order = 2
/// storage_path = "data/phrasebook.json"
/// ```
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhrasebookConfig {
	/// Number of tokens per key. Must be >= 1 and must stay the same
	/// between the run that dumped a file and the run that loads it.
	pub order: usize,

	/// Where the table is persisted. `None` disables persistence.
	pub storage_path: Option<PathBuf>,

	/// Iteration limit handed to `generate` by the surrounding system.
	pub max_phrase_length: usize,
}

impl Default for PhrasebookConfig {
	fn default() -> Self {
		Self {
			order: 3,
			storage_path: None,
			max_phrase_length: 20,
		}
	}
}
