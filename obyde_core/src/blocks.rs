use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::ObydeResult;
use crate::scanner::FenceEvent;
use crate::scanner::FenceLexer;
use crate::scanner::TICK;

/// A contiguous span of document content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
	/// Text outside of any fence.
	Plain { text: String },
	/// Text inside a backtick fence. `text` excludes the delimiters.
	Preformatted { text: String, fence_length: usize },
}

impl Block {
	/// The block content without fence delimiters.
	pub fn text(&self) -> &str {
		match self {
			Self::Plain { text } | Self::Preformatted { text, .. } => text,
		}
	}
}

/// Writes the block as it appeared in the source, fence delimiters included.
impl fmt::Display for Block {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Plain { text } => f.write_str(text),
			Self::Preformatted { text, fence_length } => {
				let ticks = fence(*fence_length);
				write!(f, "{ticks}{text}{ticks}")
			}
		}
	}
}

/// A run of `length` backticks.
pub(crate) fn fence(length: usize) -> String {
	TICK.to_string().repeat(length)
}

/// Split `text` into plain and preformatted blocks around backtick fences.
///
/// Inline fences (`` `x` ``) and block fences (```` ```x``` ````) are treated
/// alike; the fence length is whatever backtick run opened the fence.
pub fn segment(text: &str) -> ObydeResult<Vec<Block>> {
	let mut lexer = FenceLexer::new(text);
	let mut blocks = Vec::new();
	let mut buffer = String::new();

	while let Some(event) = lexer.next_event()? {
		match event {
			FenceEvent::Text { text, .. } | FenceEvent::Content { text, .. } => {
				buffer.push_str(text);
			}
			FenceEvent::Open { .. } => {
				if !buffer.is_empty() {
					blocks.push(Block::Plain {
						text: std::mem::take(&mut buffer),
					});
				}
			}
			FenceEvent::Close { length, .. } => {
				blocks.push(Block::Preformatted {
					text: std::mem::take(&mut buffer),
					fence_length: length,
				});
			}
		}
	}

	lexer.finish()?;

	if !buffer.is_empty() {
		blocks.push(Block::Plain { text: buffer });
	}

	Ok(blocks)
}

/// Reassemble blocks into the text they were segmented from.
pub fn join_blocks(blocks: &[Block]) -> String {
	blocks.iter().map(ToString::to_string).collect()
}
