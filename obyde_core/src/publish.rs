use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;
use tracing::instrument;
use tracing::warn;

use crate::HighlightTransformer;
use crate::ObydeError;
use crate::ObydeResult;
use crate::RewritingEngine;
use crate::RewritingPipeline;
use crate::config::ObydeConfig;
use crate::config::OutputConfig;
use crate::document::Document;
use crate::document::FrontMatter;
use crate::document::find_replace;
use crate::document::validate_post_date;
use crate::links::WikiLink;
use crate::links::extract_links;
use crate::resolve::LinkResolver;
use crate::resolve::Resolution;
use crate::segment;
use crate::vault::Asset;
use crate::vault::ensure_directory;
use crate::vault::find_files;
use crate::vault::slugify;

/// Extension of the notes that are published.
pub const NOTE_EXTENSION: &str = "md";

/// A note that will be published as a post.
#[derive(Debug, Clone)]
pub struct Post {
	pub source: PathBuf,
	/// Slug of the note's file name, used to resolve links to it.
	pub slug: String,
	/// `YYYY-MM-DD` date from the front matter.
	pub date: String,
	pub document: Document,
	pub front_matter: FrontMatter,
}

impl Post {
	/// Load the note at `source`, whose file stem is `stem`.
	pub fn load(stem: &str, source: &Path) -> ObydeResult<Self> {
		let text = std::fs::read_to_string(source)?;
		let document = Document::parse(&text, source)?;
		let front_matter = document.front_matter(source)?;
		let date = validate_post_date(source, front_matter.date_text().as_deref())?;

		Ok(Self {
			source: source.to_path_buf(),
			slug: slugify(stem),
			date,
			document,
			front_matter,
		})
	}

	/// `DATE-slug`, the name posts are linked and published by.
	pub fn dated_name(&self) -> String {
		format!("{}-{}", self.date, self.slug)
	}

	pub fn output_name(&self) -> String {
		format!("{}.{NOTE_EXTENSION}", self.dated_name())
	}
}

/// A note which could not be published.
#[derive(Debug)]
pub struct PostFailure {
	pub source: PathBuf,
	pub error: ObydeError,
}

/// A rendered post ready to be written.
#[derive(Debug, Clone)]
pub struct RenderedPost {
	pub source: PathBuf,
	pub output: PathBuf,
	pub content: String,
}

/// A wikilink found in a post together with what it resolves to.
#[derive(Debug, Clone)]
pub struct ResolvedLink {
	pub raw: String,
	pub link: WikiLink,
	pub resolution: Resolution,
}

/// Outcome of publishing a vault.
#[derive(Debug, Default)]
pub struct PublishReport {
	/// Every successfully rendered post, whether or not it was written.
	pub posts: Vec<RenderedPost>,
	/// Assets newly copied into the asset output directory.
	pub copied_assets: Vec<PathBuf>,
	pub failures: Vec<PostFailure>,
	pub dry_run: bool,
}

impl PublishReport {
	/// Returns true if every note was published.
	pub fn is_ok(&self) -> bool {
		self.failures.is_empty()
	}
}

/// Everything needed to publish a vault: its indexed assets and loaded
/// posts.
#[derive(Debug)]
pub struct PublishPlan {
	output: OutputConfig,
	pub assets: Vec<Asset>,
	pub posts: Vec<Post>,
	/// Notes which failed to load. They are not linkable.
	pub failures: Vec<PostFailure>,
	/// Post slug to dated name.
	post_index: BTreeMap<String, String>,
	engine: RewritingEngine<RewritingPipeline>,
}

impl PublishPlan {
	/// Index the vault described by `config`.
	///
	/// Missing directories and file name collisions abort the plan. Notes
	/// that fail to load are recorded in [`PublishPlan::failures`].
	#[instrument(skip_all)]
	pub fn new(config: &ObydeConfig) -> ObydeResult<Self> {
		let notes = find_files(
			&config.vault.path,
			Some(NOTE_EXTENSION),
			&config.vault.excluded_subdirectories,
		)?;
		let asset_files = find_files(&config.vault.asset_path, None, &[])?;
		ensure_directory(&config.output.post_output_path, "post output path")?;
		ensure_directory(&config.output.asset_output_path, "asset output path")?;

		let assets = asset_files
			.iter()
			.map(|(name, path)| Asset::load(name, path))
			.collect::<ObydeResult<Vec<_>>>()?;

		let mut posts: Vec<Post> = Vec::new();
		let mut failures = Vec::new();
		let mut post_index: BTreeMap<String, String> = BTreeMap::new();

		for (name, path) in &notes {
			let stem = name
				.strip_suffix(&format!(".{NOTE_EXTENSION}"))
				.unwrap_or(name);

			let post = Post::load(stem, path).and_then(|post| {
				match posts.iter().find(|existing| existing.slug == post.slug) {
					Some(existing) => {
						Err(ObydeError::SlugCollision {
							slug: post.slug.clone(),
							path: post.source.clone(),
							existing: existing.source.clone(),
						})
					}
					None => Ok(post),
				}
			});

			match post {
				Ok(post) => {
					post_index.insert(post.slug.clone(), post.dated_name());
					posts.push(post);
				}
				Err(error) => {
					warn!(path = %path.display(), %error, "skipping note");
					failures.push(PostFailure {
						source: path.clone(),
						error,
					});
				}
			}
		}

		debug!(
			posts = posts.len(),
			assets = assets.len(),
			failures = failures.len(),
			"planned vault"
		);

		let pipeline = RewritingPipeline::default().with_phase(HighlightTransformer);

		Ok(Self {
			output: config.output.clone(),
			assets,
			posts,
			failures,
			post_index,
			engine: RewritingEngine::new(pipeline),
		})
	}

	pub fn resolver(&self) -> LinkResolver<'_> {
		LinkResolver::new(
			&self.assets,
			&self.post_index,
			&self.output.relative_asset_path_prefix,
			self.output.post_link_mode,
		)
	}

	/// Render a post: apply its find/replace rules, rewrite its blocks and
	/// turn its wikilinks into markdown links.
	#[instrument(skip_all, fields(post = %post.source.display()))]
	pub fn render_post(&self, post: &Post) -> ObydeResult<String> {
		let text = find_replace(
			&post.document.render(),
			&post.front_matter.find,
			&post.front_matter.replace,
		)?;
		let document = Document::parse(&text, &post.source)?;
		let blocks = segment(&document.body)?;
		debug!(blocks = blocks.len(), "segmented body");

		let (metadata, body) = self.engine.rewrite(&document.metadata_section(), blocks);
		let body = self.resolver().rewrite_links(&body)?;

		Ok(metadata + &body)
	}

	/// The wikilinks of a post as written in the vault, with their
	/// resolutions.
	pub fn post_links(&self, post: &Post) -> ObydeResult<Vec<ResolvedLink>> {
		let resolver = self.resolver();
		let links = extract_links(&post.document.body)?;

		Ok(links
			.into_iter()
			.map(|raw| {
				let link = WikiLink::parse(&raw);
				let resolution = resolver.resolve(&link);
				ResolvedLink {
					raw,
					link,
					resolution,
				}
			})
			.collect())
	}

	/// Render every post and, unless `dry_run`, copy assets and write the
	/// posts. A post that fails to render does not stop the others.
	#[instrument(skip(self))]
	pub fn execute(self, dry_run: bool) -> ObydeResult<PublishReport> {
		let mut report = PublishReport {
			dry_run,
			..PublishReport::default()
		};

		for post in &self.posts {
			match self.render_post(post) {
				Ok(content) => {
					report.posts.push(RenderedPost {
						source: post.source.clone(),
						output: self.output.post_output_path.join(post.output_name()),
						content,
					});
				}
				Err(error) => {
					warn!(path = %post.source.display(), %error, "failed to render post");
					report.failures.push(PostFailure {
						source: post.source.clone(),
						error,
					});
				}
			}
		}

		report.failures.extend(self.failures);
		report.failures.sort_by(|a, b| a.source.cmp(&b.source));

		if dry_run {
			return Ok(report);
		}

		for asset in &self.assets {
			if let Some(target) = asset.write_to(&self.output.asset_output_path)? {
				debug!(asset = %asset.name, target = %target.display(), "copied asset");
				report.copied_assets.push(target);
			}
		}

		// A post that cannot be written is a failure of that note only.
		for post in std::mem::take(&mut report.posts) {
			match std::fs::write(&post.output, &post.content) {
				Ok(()) => {
					info!(output = %post.output.display(), "wrote post");
					report.posts.push(post);
				}
				Err(error) => {
					warn!(output = %post.output.display(), %error, "failed to write post");
					report.failures.push(PostFailure {
						source: post.source,
						error: error.into(),
					});
				}
			}
		}

		report.failures.sort_by(|a, b| a.source.cmp(&b.source));

		Ok(report)
	}
}
