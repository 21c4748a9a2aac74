use crate::Block;
use crate::blocks::fence;
use crate::transform::RewritingTransformer;

/// Applies a transformer to one document: its metadata section and the
/// blocks of its body.
#[derive(Debug)]
pub struct RewritingEngine<T> {
	transformer: T,
}

impl<T: RewritingTransformer> RewritingEngine<T> {
	pub fn new(transformer: T) -> Self {
		Self { transformer }
	}

	/// Rewrite `metadata` and `blocks`, returning the new metadata and the
	/// reassembled body. Sections the transformer leaves unchanged are copied
	/// through verbatim, and fence delimiters are always preserved.
	pub fn rewrite(&self, metadata: &str, blocks: Vec<Block>) -> (String, String) {
		let metadata = self
			.transformer
			.transform_metadata_section(metadata)
			.unwrap_or_else(|| metadata.to_string());

		let mut body = String::new();

		for block in blocks {
			match block {
				Block::Preformatted { text, fence_length } => {
					let transformed = self
						.transformer
						.transform_preformatted_block(&text)
						.unwrap_or(text);
					let ticks = fence(fence_length);
					body.push_str(&ticks);
					body.push_str(&transformed);
					body.push_str(&ticks);
				}
				Block::Plain { text } => {
					let transformed = self
						.transformer
						.transform_normal_block(&text)
						.unwrap_or(text);
					body.push_str(&transformed);
				}
			}
		}

		(metadata, body)
	}
}
