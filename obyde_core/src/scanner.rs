use logos::Logos;

use crate::ObydeError;
use crate::ObydeResult;

/// The backtick character which opens and closes fences.
pub const TICK: char = '`';

/// Return the maximal run of characters satisfying `predicate` that starts at
/// byte offset `start`.
///
/// The run may be empty. `start` must lie within the text (or exactly at its
/// end) and on a character boundary.
pub fn scan_run(
	text: &str,
	start: usize,
	predicate: impl Fn(char) -> bool,
) -> ObydeResult<&str> {
	if start > text.len() || !text.is_char_boundary(start) {
		return Err(ObydeError::InvalidScanPrecondition {
			start,
			len: text.len(),
		});
	}

	let rest = &text[start..];
	let end = rest.find(|c: char| !predicate(c)).unwrap_or(rest.len());

	Ok(&rest[..end])
}

/// Raw runs produced by logos. Every byte of the input belongs to exactly one
/// run, so the lexer never has to skip anything.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawRun {
	#[regex(r"`+")]
	Ticks,
	#[regex(r"[^`]+")]
	Text,
}

/// A structural event produced by the [`FenceLexer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceEvent<'a> {
	/// A run of text outside of any fence.
	Text { text: &'a str, offset: usize },
	/// A fence was opened with a run of `length` backticks.
	Open { length: usize, offset: usize },
	/// A run of text inside a fence. Backtick runs shorter than the opening
	/// run are reported as content.
	Content { text: &'a str, offset: usize },
	/// The open fence was closed with exactly `length` backticks.
	Close { length: usize, offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceState {
	/// Outside of any fence.
	Open,
	/// A fence was opened and no content has been read yet.
	FenceStart,
	/// Inside a fence, reading content.
	Fence,
}

/// Single forward pass over raw text which tracks backtick fences.
///
/// Runs are tokenized with logos and each call to [`FenceLexer::next_event`]
/// consumes at most one of them, so the whole scan is linear in the length of
/// the input. When a closing run is
/// longer than the opening run, exactly the opening length is consumed and
/// the surplus backticks are scanned again as the start of a new fence.
#[derive(Debug)]
pub struct FenceLexer<'a> {
	text: &'a str,
	cursor: usize,
	state: FenceState,
	/// Length of the currently open backtick run, `0` when outside a fence.
	fence_len: usize,
	/// Byte offset of the currently open fence.
	fence_offset: usize,
}

impl<'a> FenceLexer<'a> {
	pub fn new(text: &'a str) -> Self {
		Self {
			text,
			cursor: 0,
			state: FenceState::Open,
			fence_len: 0,
			fence_offset: 0,
		}
	}

	/// Returns the next event, or `None` once the input is exhausted.
	pub fn next_event(&mut self) -> ObydeResult<Option<FenceEvent<'a>>> {
		let Some((kind, run)) = self.next_run()? else {
			return Ok(None);
		};

		let offset = self.cursor;

		let event = match (self.state, kind) {
			(FenceState::Open, RawRun::Ticks) => {
				self.cursor += run.len();
				self.fence_len = run.len();
				self.fence_offset = offset;
				self.state = FenceState::FenceStart;
				FenceEvent::Open {
					length: run.len(),
					offset,
				}
			}
			(FenceState::Open, RawRun::Text) => {
				self.cursor += run.len();
				FenceEvent::Text { text: run, offset }
			}
			(FenceState::FenceStart | FenceState::Fence, RawRun::Ticks) => {
				if run.len() < self.fence_len {
					self.cursor += run.len();
					self.state = FenceState::Fence;
					FenceEvent::Content { text: run, offset }
				} else {
					let length = self.fence_len;
					self.cursor += length;
					self.fence_len = 0;
					self.state = FenceState::Open;
					FenceEvent::Close { length, offset }
				}
			}
			(FenceState::FenceStart | FenceState::Fence, RawRun::Text) => {
				self.cursor += run.len();
				self.state = FenceState::Fence;
				FenceEvent::Content { text: run, offset }
			}
		};

		Ok(Some(event))
	}

	/// Move the cursor forward to `offset` while outside of a fence, so that
	/// backticks inside a construct that was already consumed (a wikilink)
	/// never open a fence. Ignored inside a fence or when `offset` is behind
	/// the cursor.
	pub fn skip_to(&mut self, offset: usize) {
		if self.state == FenceState::Open && offset > self.cursor {
			self.cursor = offset.min(self.text.len());
		}
	}

	/// Lex the single maximal run starting at the cursor. The lexer is rebuilt
	/// at the cursor each time because a close may consume only part of a
	/// backtick run, and [`FenceLexer::skip_to`] can move the cursor.
	fn next_run(&self) -> ObydeResult<Option<(RawRun, &'a str)>> {
		let rest = &self.text[self.cursor..];
		let mut lexer = RawRun::lexer(rest);

		match lexer.next() {
			None => Ok(None),
			Some(Ok(kind)) => Ok(Some((kind, lexer.slice()))),
			Some(Err(())) => {
				Err(ObydeError::InvalidScanPrecondition {
					start: self.cursor,
					len: self.text.len(),
				})
			}
		}
	}

	/// Fail with [`ObydeError::UnterminatedFence`] if a fence is still open.
	/// Only meaningful once [`FenceLexer::next_event`] has returned `None`.
	pub fn finish(&self) -> ObydeResult<()> {
		if self.state == FenceState::Open {
			return Ok(());
		}

		Err(ObydeError::UnterminatedFence {
			offset: self.fence_offset,
			fence_length: self.fence_len,
		})
	}
}
