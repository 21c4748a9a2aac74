use std::collections::BTreeMap;

use serde::Serialize;

use crate::ObydeResult;
use crate::config::PostLinkMode;
use crate::links::WikiLink;
use crate::links::extract_link_spans;
use crate::vault::Asset;
use crate::vault::slugify;

/// Where a wikilink points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Resolution {
	/// An attachment, published under `path`.
	Asset { path: String },
	/// Another published post.
	Post { dated_name: String, permalink: String },
	/// Nothing matched; the link is left as written.
	Unresolved,
}

/// Maps wikilink targets to asset paths or post permalinks.
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
	assets: &'a [Asset],
	/// Post slug to dated name, e.g. `my-post` to `2021-08-21-my-post`.
	posts: &'a BTreeMap<String, String>,
	asset_prefix: &'a str,
	mode: PostLinkMode,
}

impl<'a> LinkResolver<'a> {
	pub fn new(
		assets: &'a [Asset],
		posts: &'a BTreeMap<String, String>,
		asset_prefix: &'a str,
		mode: PostLinkMode,
	) -> Self {
		Self {
			assets,
			posts,
			asset_prefix,
			mode,
		}
	}

	/// Assets win over posts. An asset matches when its file name or source
	/// path contains the target; a post matches when its slug equals the
	/// slugified target.
	pub fn resolve(&self, link: &WikiLink) -> Resolution {
		let target = link.target.as_str();

		if !target.is_empty() {
			let asset = self.assets.iter().find(|asset| {
				asset.name.contains(target) || asset.source.to_string_lossy().contains(target)
			});

			if let Some(asset) = asset {
				return Resolution::Asset {
					path: format!("{}/{}", self.asset_prefix, asset.hashed_name),
				};
			}
		}

		match self.posts.get(&slugify(target)) {
			Some(dated_name) => {
				Resolution::Post {
					dated_name: dated_name.clone(),
					permalink: self.mode.post_link(dated_name),
				}
			}
			None => Resolution::Unresolved,
		}
	}

	/// The markdown link replacing `raw`, or `None` when it does not resolve.
	pub fn replacement(&self, raw: &str) -> Option<String> {
		let link = WikiLink::parse(raw);
		let label = link.label();

		match self.resolve(&link) {
			Resolution::Asset { path } => Some(format!("[{label}]({path})")),
			Resolution::Post { permalink, .. } => Some(format!("[{label}]({permalink})")),
			Resolution::Unresolved => None,
		}
	}

	/// Replace every resolvable wikilink in `body` with a markdown link.
	/// Links inside fences and unresolved links are left as written.
	pub fn rewrite_links(&self, body: &str) -> ObydeResult<String> {
		let spans = extract_link_spans(body)?;
		let mut result = String::with_capacity(body.len());
		let mut cursor = 0;

		for span in spans {
			let Some(replacement) = self.replacement(span.text) else {
				continue;
			};

			result.push_str(&body[cursor..span.range.start]);
			result.push_str(&replacement);
			cursor = span.range.end;
		}

		result.push_str(&body[cursor..]);
		Ok(result)
	}
}
