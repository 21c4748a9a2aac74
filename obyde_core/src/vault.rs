use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::Path;
use std::path::PathBuf;

use derive_more::Deref;
use derive_more::IntoIterator;
use ignore::WalkBuilder;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use tracing::debug;
use tracing::instrument;

use crate::ObydeError;
use crate::ObydeResult;

/// Files found in a directory tree, keyed by file name. File names are unique
/// across the whole tree.
#[derive(Debug, Default, Clone, Deref, IntoIterator)]
pub struct FileIndex(#[into_iterator(owned, ref)] BTreeMap<String, PathBuf>);

/// Return the absolute form of `path` if it is an existing directory.
pub fn ensure_directory(path: &Path, kind: &str) -> ObydeResult<PathBuf> {
	if !path.is_dir() {
		return Err(ObydeError::MissingDirectory {
			path: path.to_path_buf(),
			kind: kind.to_string(),
		});
	}

	Ok(std::path::absolute(path)?)
}

/// Walk `dir` recursively and index every file, optionally only those with
/// the given `extension`.
///
/// Symlinks are not followed and hidden or git-ignored files are not skipped.
/// Files under any of the `exclusions` (relative to `dir`) are left out. Two
/// files sharing a name anywhere in the tree fail with
/// [`ObydeError::FilenameCollision`].
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn find_files(
	dir: &Path,
	extension: Option<&str>,
	exclusions: &[PathBuf],
) -> ObydeResult<FileIndex> {
	let dir = ensure_directory(dir, "input files location")?;
	let exclusions: Vec<PathBuf> = exclusions.iter().map(|exc| dir.join(exc)).collect();
	let mut found: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

	let walker = WalkBuilder::new(&dir)
		.standard_filters(false)
		.follow_links(false)
		.sort_by_file_name(|a, b| a.cmp(b))
		.build();

	for entry in walker {
		let entry = entry.map_err(std::io::Error::other)?;
		let path = entry.path();

		if !entry.file_type().is_some_and(|kind| kind.is_file()) {
			continue;
		}

		if exclusions.iter().any(|exc| path.starts_with(exc)) {
			debug!(path = %path.display(), "skipping excluded file");
			continue;
		}

		if let Some(extension) = extension {
			if path.extension().and_then(OsStr::to_str) != Some(extension) {
				continue;
			}
		}

		let Some(name) = path.file_name() else {
			continue;
		};

		found
			.entry(name.to_string_lossy().into_owned())
			.or_default()
			.push(path.to_path_buf());
	}

	let mut index = BTreeMap::new();

	for (name, mut paths) in found {
		if paths.len() > 1 {
			let paths = paths
				.iter()
				.map(|path| path.display().to_string())
				.collect::<Vec<_>>()
				.join(", ");
			return Err(ObydeError::FilenameCollision { name, paths });
		}

		if let Some(path) = paths.pop() {
			index.insert(name, path);
		}
	}

	debug!(files = index.len(), "indexed directory");

	Ok(FileIndex(index))
}

/// Turn a note name into a URL slug: ASCII punctuation and whitespace become
/// `-` and the result is lowercased.
pub fn slugify(name: &str) -> String {
	name.chars()
		.map(|c| {
			if c.is_ascii_punctuation() || c.is_ascii_whitespace() || c == '\x0b' {
				'-'
			} else {
				c
			}
		})
		.collect::<String>()
		.to_lowercase()
}

/// An attachment and the content-addressed name it is published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
	/// File name inside the vault.
	pub name: String,
	pub source: PathBuf,
	/// Lowercase hex SHA-256 of the content plus the original extension.
	pub hashed_name: String,
}

impl Asset {
	/// Read and hash the file at `source`.
	pub fn load(name: &str, source: &Path) -> ObydeResult<Self> {
		let data = std::fs::read(source)?;
		let extension = source
			.extension()
			.map(|ext| format!(".{}", ext.to_string_lossy()))
			.unwrap_or_default();

		Ok(Self {
			name: name.to_string(),
			source: source.to_path_buf(),
			hashed_name: format!("{}{extension}", hex::encode(Sha256::digest(&data))),
		})
	}

	/// Copy the asset into `output_dir` under its hashed name unless a file by
	/// that name already exists. Returns the target path when a copy was made.
	pub fn write_to(&self, output_dir: &Path) -> ObydeResult<Option<PathBuf>> {
		let target = output_dir.join(&self.hashed_name);

		if target.exists() {
			return Ok(None);
		}

		std::fs::copy(&self.source, &target)?;
		Ok(Some(target))
	}
}
