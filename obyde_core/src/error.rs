use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ObydeError {
	#[error(transparent)]
	#[diagnostic(code(obyde::io_error))]
	Io(#[from] std::io::Error),

	#[error("unterminated fence: {fence_length} backtick(s) opened at byte {offset} are never closed")]
	#[diagnostic(
		code(obyde::unterminated_fence),
		help("close the fence with a run of at least {fence_length} backtick(s)")
	)]
	UnterminatedFence { offset: usize, fence_length: usize },

	#[error("hit end of input while parsing wikilink at byte {offset}")]
	#[diagnostic(
		code(obyde::unterminated_link),
		help("close the link with `]]`")
	)]
	UnterminatedLink { offset: usize },

	#[error("invalid scan start {start} for text of {len} bytes")]
	#[diagnostic(code(obyde::invalid_scan_precondition))]
	InvalidScanPrecondition { start: usize, len: usize },

	#[error("failed to parse config file `{path}`: {reason}")]
	#[diagnostic(
		code(obyde::config_parse),
		help("check that the config is valid YAML with `vault` and `output` sections")
	)]
	ConfigParse { path: PathBuf, reason: String },

	#[error("no config file found in `{0}`")]
	#[diagnostic(
		code(obyde::config_not_found),
		help("pass `--config <path>` or create `obyde.yaml` in the working directory")
	)]
	ConfigNotFound(PathBuf),

	#[error("`{path}` ({kind}) does not exist or is not a directory")]
	#[diagnostic(code(obyde::missing_directory))]
	MissingDirectory { path: PathBuf, kind: String },

	#[error("filename collision detected for `{name}`: {paths}")]
	#[diagnostic(
		code(obyde::filename_collision),
		help("file names must be unique across the vault; rename one of the files")
	)]
	FilenameCollision { name: String, paths: String },

	#[error("`{path}` has the same slug `{slug}` as `{existing}`")]
	#[diagnostic(
		code(obyde::slug_collision),
		help("note names that differ only in case or punctuation publish to the same post")
	)]
	SlugCollision {
		slug: String,
		path: PathBuf,
		existing: PathBuf,
	},

	#[error("invalid front matter in `{path}`: {reason}")]
	#[diagnostic(code(obyde::front_matter))]
	FrontMatter { path: PathBuf, reason: String },

	#[error("post at `{0}` does not have a date")]
	#[diagnostic(
		code(obyde::missing_post_date),
		help("add a `date: YYYY-MM-DD` entry to the front matter")
	)]
	MissingPostDate(PathBuf),

	#[error("invalid front matter date `{date}` in `{path}`")]
	#[diagnostic(
		code(obyde::invalid_post_date),
		help("the expected format is YYYY-MM-DD")
	)]
	InvalidPostDate { path: PathBuf, date: String },

	#[error("`find` has {find} pattern(s) but `replace` has {replace} replacement(s)")]
	#[diagnostic(
		code(obyde::find_replace_mismatch),
		help("every `find` pattern needs exactly one `replace` entry")
	)]
	FindReplaceMismatch { find: usize, replace: usize },

	#[error("invalid find pattern `{pattern}`: {reason}")]
	#[diagnostic(code(obyde::invalid_pattern))]
	InvalidPattern { pattern: String, reason: String },
}

pub type ObydeResult<T> = Result<T, ObydeError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
