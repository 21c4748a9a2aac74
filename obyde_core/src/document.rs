use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use serde_yaml_ng::Value;

use crate::ObydeError;
use crate::ObydeResult;

/// The line which opens and closes a front matter section.
const DELIMITER: &str = "---";

/// A note split into its raw front matter and its body.
///
/// The front matter is kept as text so that rendering reproduces the note
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	/// YAML between the delimiter lines, trailing newline included. `None`
	/// when the note has no front matter.
	pub front_matter: Option<String>,
	/// Everything after the closing delimiter line.
	pub body: String,
}

impl Document {
	/// Split `text` into front matter and body. `path` is only used for
	/// error messages.
	pub fn parse(text: &str, path: &Path) -> ObydeResult<Self> {
		let text = normalize_line_endings(text);

		let Some(rest) = strip_delimiter_line(&text) else {
			return Ok(Self {
				front_matter: None,
				body: text,
			});
		};

		let mut offset = 0;
		for line in rest.split_inclusive('\n') {
			if line.trim_end() == DELIMITER {
				return Ok(Self {
					front_matter: Some(rest[..offset].to_string()),
					body: rest[offset + line.len()..].to_string(),
				});
			}
			offset += line.len();
		}

		Err(ObydeError::FrontMatter {
			path: path.to_path_buf(),
			reason: "missing closing `---` delimiter".to_string(),
		})
	}

	/// The delimited front matter section, or an empty string when there is
	/// none.
	pub fn metadata_section(&self) -> String {
		self.front_matter
			.as_ref()
			.map(|yaml| format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
			.unwrap_or_default()
	}

	/// The full note text.
	pub fn render(&self) -> String {
		let mut text = self.metadata_section();
		text.push_str(&self.body);
		text
	}

	/// Deserialize the front matter. A note without front matter yields the
	/// default (empty) value.
	pub fn front_matter(&self, path: &Path) -> ObydeResult<FrontMatter> {
		let Some(yaml) = &self.front_matter else {
			return Ok(FrontMatter::default());
		};

		if yaml.trim().is_empty() {
			return Ok(FrontMatter::default());
		}

		serde_yaml_ng::from_str(yaml).map_err(|e| {
			ObydeError::FrontMatter {
				path: path.to_path_buf(),
				reason: e.to_string(),
			}
		})
	}
}

/// Return the text after a leading `---` line.
fn strip_delimiter_line(text: &str) -> Option<&str> {
	let rest = text.strip_prefix(DELIMITER)?;
	let (line, rest) = rest.split_once('\n').unwrap_or((rest, ""));

	line.trim().is_empty().then_some(rest)
}

/// Normalize CRLF line endings to LF.
pub fn normalize_line_endings(content: &str) -> String {
	if content.contains('\r') {
		content.replace("\r\n", "\n").replace('\r', "\n")
	} else {
		content.to_string()
	}
}

/// The front matter keys obyde understands. Every other key is passed
/// through untouched.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FrontMatter {
	/// Publication date, `YYYY-MM-DD`.
	#[serde(default)]
	pub date: Option<Value>,
	/// Regex patterns to search for in the whole note before publishing.
	#[serde(default)]
	pub find: Vec<String>,
	/// Replacements for the `find` patterns, in the same order.
	#[serde(default)]
	pub replace: Vec<String>,
}

impl FrontMatter {
	/// The `date` value as written, if it is a scalar.
	pub fn date_text(&self) -> Option<String> {
		match self.date.as_ref()? {
			Value::String(text) => Some(text.clone()),
			Value::Number(number) => Some(number.to_string()),
			Value::Null => None,
			other => serde_yaml_ng::to_string(other).ok().map(|s| s.trim().to_string()),
		}
	}
}

/// Check that a post has a `YYYY-MM-DD` shaped date and return it.
pub fn validate_post_date(path: &Path, date: Option<&str>) -> ObydeResult<String> {
	let Some(date) = date.map(str::trim).filter(|date| !date.is_empty()) else {
		return Err(ObydeError::MissingPostDate(path.to_path_buf()));
	};

	let components: Vec<&str> = date.split('-').collect();
	let valid = components.len() == 3
		&& components
			.iter()
			.all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));

	if !valid {
		return Err(ObydeError::InvalidPostDate {
			path: path.to_path_buf(),
			date: date.to_string(),
		});
	}

	Ok(date.to_string())
}

/// Apply each `find` regex with its `replace` string, in order.
///
/// When either list is empty the text is returned unchanged. Replacements use
/// `$1` / `${name}` capture syntax.
pub fn find_replace(text: &str, find: &[String], replace: &[String]) -> ObydeResult<String> {
	if find.is_empty() || replace.is_empty() {
		return Ok(text.to_string());
	}

	if find.len() != replace.len() {
		return Err(ObydeError::FindReplaceMismatch {
			find: find.len(),
			replace: replace.len(),
		});
	}

	let mut rewritten = text.to_string();

	for (pattern, replacement) in find.iter().zip(replace) {
		let regex = Regex::new(pattern).map_err(|e| {
			ObydeError::InvalidPattern {
				pattern: pattern.clone(),
				reason: e.to_string(),
			}
		})?;
		rewritten = regex.replace_all(&rewritten, replacement.as_str()).into_owned();
	}

	Ok(rewritten)
}
