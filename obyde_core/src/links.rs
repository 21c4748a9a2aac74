use std::ops::Range;

use serde::Serialize;

use crate::ObydeError;
use crate::ObydeResult;
use crate::scanner::FenceEvent;
use crate::scanner::FenceLexer;
use crate::scanner::scan_run;

const LINK_OPEN: char = '[';
const LINK_CLOSE: char = ']';

/// A raw wikilink found in the source text, e.g. `[[Target|Display]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan<'a> {
	/// The link exactly as written, brackets included.
	pub text: &'a str,
	/// Byte range of the link within the scanned text.
	pub range: Range<usize>,
}

/// Extract every wikilink outside of backtick fences, in document order.
pub fn extract_links(text: &str) -> ObydeResult<Vec<String>> {
	let spans = extract_link_spans(text)?;
	Ok(spans.into_iter().map(|span| span.text.to_string()).collect())
}

/// Like [`extract_links`] but keeps the position of every link.
///
/// Fences are skipped without checking that they are terminated; an
/// unterminated fence simply hides the rest of the text.
pub fn extract_link_spans(text: &str) -> ObydeResult<Vec<LinkSpan<'_>>> {
	let mut lexer = FenceLexer::new(text);
	let mut spans = Vec::new();

	while let Some(event) = lexer.next_event()? {
		let FenceEvent::Text { text: run, offset } = event else {
			continue;
		};

		if let Some(end) = find_links_in_run(text, offset..offset + run.len(), &mut spans)? {
			lexer.skip_to(end);
		}
	}

	Ok(spans)
}

/// Scan one run of unfenced text for `[[...]]` constructs.
///
/// Only the opening `[[` has to lie inside the run. The body and the closing
/// brackets are measured against the whole text, so backticks inside a link
/// belong to the link. Returns the end of the last link when it reaches past
/// the run, which is where fence scanning has to resume.
///
/// A single `]` close is not a link and is skipped silently. Running out of
/// input before any `]` is an error.
fn find_links_in_run<'a>(
	text: &'a str,
	run: Range<usize>,
	spans: &mut Vec<LinkSpan<'a>>,
) -> ObydeResult<Option<usize>> {
	let mut cursor = run.start;

	while let Some(found) = text[cursor..run.end].find(LINK_OPEN) {
		let start = cursor + found;
		let opening = scan_run(text, start, |c| c == LINK_OPEN)?;

		if opening.len() < 2 {
			cursor = start + opening.len();
			continue;
		}

		let body_start = start + opening.len();
		let body = scan_run(text, body_start, |c| c != LINK_CLOSE)?;
		let close_start = body_start + body.len();
		let closing = scan_run(text, close_start, |c| c == LINK_CLOSE)?;

		if closing.is_empty() {
			return Err(ObydeError::UnterminatedLink { offset: start });
		}

		let end = close_start + closing.len();

		if closing.len() >= 2 {
			spans.push(LinkSpan {
				text: &text[start..end],
				range: start..end,
			});
		}

		if end > run.end {
			return Ok(Some(end));
		}

		cursor = end;
	}

	Ok(None)
}

/// A wikilink split into its target and the text to display for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WikiLink {
	pub target: String,
	/// Explicit display text from `[[target|display]]`, if any.
	pub display: Option<String>,
}

impl WikiLink {
	/// Decompose a raw link such as `[[Target|Display]]`. The display text
	/// is everything after the first `|`.
	pub fn parse(raw: &str) -> Self {
		let inner = raw.replace("[[", "").replace("]]", "");

		match inner.split_once('|') {
			Some((target, display)) => {
				Self {
					target: target.to_string(),
					display: Some(display.to_string()),
				}
			}
			None => {
				Self {
					target: inner,
					display: None,
				}
			}
		}
	}

	/// The text shown for the link: the display override, else the target.
	pub fn label(&self) -> &str {
		self.display.as_deref().unwrap_or(&self.target)
	}
}
