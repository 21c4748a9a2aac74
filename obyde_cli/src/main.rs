use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use obyde_cli::Commands;
use obyde_cli::ObydeCli;
use obyde_cli::OutputFormat;
use obyde_core::ObydeError;
use obyde_core::config::ObydeConfig;
use obyde_core::links::WikiLink;
use obyde_core::publish::PostFailure;
use obyde_core::publish::PublishPlan;
use obyde_core::resolve::Resolution;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "OBYDE_LOG";

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = ObydeCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match args.command {
		Some(Commands::Publish { dry_run, diff }) => run_publish(&args, dry_run, diff),
		Some(Commands::Check) => run_check(&args),
		Some(Commands::Links { format }) => run_links(&args, format),
		None => {
			eprintln!("No subcommand specified. Run `obyde --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<ObydeError>() {
			Ok(obyde_err) => {
				let report: miette::Report = (*obyde_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Send logs to stderr, filtered by `OBYDE_LOG` when it is set.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root() -> PathBuf {
	std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn load_plan(args: &ObydeCli) -> Result<(ObydeConfig, PublishPlan), Box<dyn std::error::Error>> {
	let config = ObydeConfig::discover(args.config.as_deref(), &resolve_root())?;
	debug!(
		vault = %config.vault.path.display(),
		mode = %config.output.post_link_mode,
		"loaded config"
	);
	let plan = PublishPlan::new(&config)?;

	Ok((config, plan))
}

fn run_publish(
	args: &ObydeCli,
	dry_run: bool,
	show_diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root();
	let (config, plan) = load_plan(args)?;

	// Posts are overwritten in place, so capture what is there first.
	let mut existing: BTreeMap<PathBuf, String> = BTreeMap::new();
	if show_diff {
		for post in &plan.posts {
			let output = config.output.post_output_path.join(post.output_name());
			if let Ok(content) = std::fs::read_to_string(&output) {
				existing.insert(output, content);
			}
		}
	}

	let report = plan.execute(dry_run)?;
	let verb = if dry_run { "Would write" } else { "Wrote" };

	for post in &report.posts {
		let previous = existing.get(&post.output).map_or("", String::as_str);
		let unchanged = previous == post.content;
		println!("{verb} {}", make_relative(&post.output, &root));

		if show_diff && !unchanged {
			print_diff(previous, &post.content);
		}
	}

	if dry_run {
		println!(
			"Dry run: {} post(s) rendered, nothing written.",
			report.posts.len()
		);
	} else {
		println!(
			"Published {} post(s), copied {} new asset(s).",
			report.posts.len(),
			report.copied_assets.len()
		);

		if args.verbose {
			for asset in &report.copied_assets {
				println!("  {}", make_relative(asset, &root));
			}
		}
	}

	if !report.is_ok() {
		eprintln!();
		print_failures(&report.failures, &root);
		process::exit(1);
	}

	Ok(())
}

fn run_check(args: &ObydeCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root();
	let (_, plan) = load_plan(args)?;
	let report = plan.execute(true)?;

	if report.is_ok() {
		println!(
			"Check passed: {} post(s) render cleanly.",
			report.posts.len()
		);
		return Ok(());
	}

	eprintln!("Check failed.");
	eprintln!("  rendered posts: {}", report.posts.len());
	eprintln!("  failed notes: {}", report.failures.len());
	eprintln!();
	print_failures(&report.failures, &root);
	process::exit(1);
}

#[derive(Debug, Serialize)]
struct PostLinks<'a> {
	post: String,
	source: String,
	links: Vec<LinkEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct LinkEntry<'a> {
	raw: String,
	#[serde(flatten)]
	link: &'a WikiLink,
	resolution: &'a Resolution,
}

fn run_links(args: &ObydeCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root();
	let (_, plan) = load_plan(args)?;
	let mut resolved = Vec::with_capacity(plan.posts.len());
	let mut failures = Vec::new();

	for post in &plan.posts {
		match plan.post_links(post) {
			Ok(links) => resolved.push((post, links)),
			Err(error) => {
				failures.push(PostFailure {
					source: post.source.clone(),
					error,
				});
			}
		}
	}

	match format {
		OutputFormat::Json => {
			let entries: Vec<PostLinks<'_>> = resolved
				.iter()
				.map(|(post, links)| {
					PostLinks {
						post: post.dated_name(),
						source: make_relative(&post.source, &root),
						links: links
							.iter()
							.map(|link| {
								LinkEntry {
									raw: link.raw.clone(),
									link: &link.link,
									resolution: &link.resolution,
								}
							})
							.collect(),
					}
				})
				.collect();
			println!("{}", serde_json::to_string_pretty(&entries)?);
		}
		OutputFormat::Text => {
			if resolved.iter().all(|(_, links)| links.is_empty()) {
				println!("No wikilinks found.");
			}

			for (post, links) in &resolved {
				if links.is_empty() {
					continue;
				}

				println!(
					"{} ({})",
					colored!(post.dated_name(), bold),
					make_relative(&post.source, &root)
				);

				for link in links {
					let resolution = match &link.resolution {
						Resolution::Asset { path } => format!("asset {path}"),
						Resolution::Post { permalink, .. } => format!("post {permalink}"),
						Resolution::Unresolved => colored!("unresolved", yellow),
					};
					println!("  {} -> {resolution}", link.raw);
				}
			}
		}
	}

	if !failures.is_empty() {
		print_failures(&failures, &root);
		process::exit(1);
	}

	Ok(())
}

fn print_failures(failures: &[PostFailure], root: &Path) {
	for failure in failures {
		eprintln!(
			"{} {}: {}",
			colored!("error:", red),
			make_relative(&failure.source, root),
			failure.error
		);
	}

	eprintln!();
	eprintln!(
		"{} note(s) could not be published.",
		colored!(failures.len(), bold)
	);
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
