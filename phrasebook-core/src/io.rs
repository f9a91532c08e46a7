use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Reads a whole file, or `None` if it does not exist.
///
/// Any other failure (permissions, invalid UTF-8, ...) is returned as is.
pub(crate) fn read_if_exists<P: AsRef<Path>>(filename: P) -> io::Result<Option<String>> {
	match fs::read_to_string(filename) {
		Ok(contents) => Ok(Some(contents)),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(e),
	}
}

/// Writes `contents` to `filename`, replacing the previous content.
///
/// Missing parent directories are created first.
pub(crate) fn write_file<P: AsRef<Path>>(filename: P, contents: &str) -> io::Result<()> {
	let path = filename.as_ref();
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent)?;
	}
	fs::write(path, contents)
}
