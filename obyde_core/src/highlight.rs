use std::sync::LazyLock;

use regex::Regex;

use crate::transform::RewritingTransformer;

/// `==text==` spans, shortest match first, allowed to cross newlines.
static HIGHLIGHT: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)==(.*?)==").expect("Invalid highlight regex"));

/// Turns Obsidian `==highlight==` markup into `<mark>highlight</mark>`.
///
/// Only normal blocks are rewritten; fenced code and front matter are left
/// alone even when they contain `==`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HighlightTransformer;

impl RewritingTransformer for HighlightTransformer {
	fn transform_normal_block(&self, block: &str) -> Option<String> {
		if !HIGHLIGHT.is_match(block) {
			return None;
		}

		Some(HIGHLIGHT.replace_all(block, "<mark>$1</mark>").into_owned())
	}
}
