use std::path::Path;
use std::{fs, io};

use phrasebook_core::PhrasebookConfig;
use serde::Deserialize;

/// Default location of the settings file.
pub const DEFAULT_SETTINGS_PATH: &str = "phrasebook.toml";

/// Environment variable overriding [`DEFAULT_SETTINGS_PATH`].
pub const SETTINGS_ENV: &str = "PHRASEBOOK_CONFIG";

/// Network and identity settings of the HTTP surface.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
	/// Identity of the bot: its own messages are never learned, and
	/// messages mentioning `<@bot_user>` get a reply.
	pub bot_user: Option<String>,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self { host: "127.0.0.1".to_owned(), port: 5000, bot_user: None }
	}
}

/// Whole settings file.
///
/// ```toml
/// [server]
/// port = 5000
/// bot_user = "U024BE7LH"
///
/// [phrasebook]
/// order = 3
/// storage_path = "data/phrasebook.json"
/// ```
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub phrasebook: PhrasebookConfig,
}

impl Settings {
	/// Parses settings from TOML text.
	pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(text)
	}

	/// Reads settings from `path`, falling back to defaults if the file
	/// does not exist.
	pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
		match fs::read_to_string(path) {
			Ok(text) => Self::parse(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
			Err(e) => Err(e),
		}
	}
}
