use std::fmt;

/// A pure rewrite of document sections.
///
/// Each operation returns `Some(replacement)` to change its input, or `None`
/// to leave it untouched. `None` is never an error. The default
/// implementations leave every section untouched.
pub trait RewritingTransformer: Send + Sync {
	/// Rewrite text outside of any backtick fence.
	fn transform_normal_block(&self, _block: &str) -> Option<String> {
		None
	}

	/// Rewrite the interior of a backtick fence. Delimiters are not included.
	fn transform_preformatted_block(&self, _block: &str) -> Option<String> {
		None
	}

	/// Rewrite the front matter section of a document.
	fn transform_metadata_section(&self, _metadata: &str) -> Option<String> {
		None
	}
}

/// An ordered list of transformers which behaves as one transformer.
///
/// Every phase receives the same original input rather than the output of the
/// phase before it. The last phase in list order that returns a change
/// decides the result, and `None` means no phase changed the input.
#[derive(Default)]
pub struct RewritingPipeline {
	phases: Vec<Box<dyn RewritingTransformer>>,
}

impl RewritingPipeline {
	pub fn new(phases: Vec<Box<dyn RewritingTransformer>>) -> Self {
		Self { phases }
	}

	/// Append a phase to the end of the pipeline.
	#[must_use]
	pub fn with_phase(mut self, phase: impl RewritingTransformer + 'static) -> Self {
		self.phases.push(Box::new(phase));
		self
	}

	pub fn len(&self) -> usize {
		self.phases.len()
	}

	pub fn is_empty(&self) -> bool {
		self.phases.is_empty()
	}

	fn last_change(
		&self,
		input: &str,
		operation: impl Fn(&dyn RewritingTransformer, &str) -> Option<String>,
	) -> Option<String> {
		let mut current = None;

		for phase in &self.phases {
			if let Some(transformed) = operation(phase.as_ref(), input) {
				current = Some(transformed);
			}
		}

		current
	}
}

impl fmt::Debug for RewritingPipeline {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RewritingPipeline")
			.field("phases", &self.phases.len())
			.finish()
	}
}

impl RewritingTransformer for RewritingPipeline {
	fn transform_normal_block(&self, block: &str) -> Option<String> {
		self.last_change(block, |phase, input| phase.transform_normal_block(input))
	}

	fn transform_preformatted_block(&self, block: &str) -> Option<String> {
		self.last_change(block, |phase, input| {
			phase.transform_preformatted_block(input)
		})
	}

	fn transform_metadata_section(&self, metadata: &str) -> Option<String> {
		self.last_change(metadata, |phase, input| {
			phase.transform_metadata_section(input)
		})
	}
}
