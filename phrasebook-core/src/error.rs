use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhrasebookError {
	#[error("Order must be a positive integer")]
	InvalidOrder,

	#[error("Order mismatch: expected {expected}, found {found}")]
	OrderMismatch { expected: usize, found: usize },

	#[error("IO error while trying to {operation} {}: {source}", .path.display())]
	Io {
		operation: &'static str,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Malformed phrasebook file {}: {source}", .path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("Failed to encode phrasebook for {}: {source}", .path.display())]
	Encode {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

pub type PhrasebookResult<T> = Result<T, PhrasebookError>;
