use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Publish an Obsidian vault as Jekyll or Hugo posts.",
	long_about = "obyde converts the notes of a markdown vault into static site posts.\n\nIt \
	              renders ==highlights==, rewrites [[wikilinks]] into links to other posts or to \
	              content-addressed assets, and applies per-note find/replace rules from the front \
	              matter.\n\nQuick start:\n  obyde publish   Write every post and asset\n  obyde \
	              check     Render every post without writing\n  obyde links     Show how each \
	              wikilink resolves"
)]
pub struct ObydeCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the config file. Defaults to `obyde.yaml`, `obyde.yml` or
	/// `.obyde.yaml` in the current directory.
	#[arg(long, short, global = true)]
	pub config: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Publish every dated note as a post and copy its assets.
	///
	/// Notes are rendered with highlights and resolved wikilinks, then
	/// written as `DATE-slug.md` to the post output directory. Assets are
	/// copied under the SHA-256 of their content. Exits with a non-zero
	/// status code if any note could not be published.
	Publish {
		/// Render every post without writing posts or assets.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Show a line diff between each existing post and its new content.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// Render every note without writing anything and report failures.
	///
	/// Useful in CI pipelines to catch missing dates, unterminated fences and
	/// broken front matter before publishing.
	Check,
	/// List the wikilinks of every post and what they resolve to.
	Links {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
