use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::ObydeError;
use crate::ObydeResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["obyde.yaml", "obyde.yml", ".obyde.yaml"];

/// Asset link prefix used when `relative_asset_path_prefix` is not set.
pub const DEFAULT_ASSET_PATH_PREFIX: &str = "{{ site.assets_location }}";

/// Configuration loaded from an `obyde.yaml` file.
///
/// ```yaml
/// vault:
///   path: ./vault
///   asset_path: ./vault/assets
///   excluded_subdirectories:
///     - drafts
///
/// output:
///   post_output_path: ./site/_posts
///   asset_output_path: ./site/assets
///   relative_asset_path_prefix: "{{ site.assets_location }}"
///   post_link_mode: jekyll
/// ```
///
/// Relative paths are resolved against the directory containing the config
/// file.
#[derive(Debug, Clone, Deserialize)]
pub struct ObydeConfig {
	pub vault: VaultConfig,
	pub output: OutputConfig,
}

/// Where notes and their attachments are read from.
#[derive(Debug, Clone, Deserialize)]
pub struct VaultConfig {
	/// Root directory of the markdown notes.
	pub path: PathBuf,
	/// Directory holding images and other attachments.
	pub asset_path: PathBuf,
	/// Subdirectories of `path` whose notes are never published.
	#[serde(default)]
	pub excluded_subdirectories: Vec<PathBuf>,
}

/// Where published posts and assets are written, and how links to them are
/// spelled.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
	pub post_output_path: PathBuf,
	pub asset_output_path: PathBuf,
	/// Prepended to hashed asset names in rewritten links.
	#[serde(default = "default_asset_path_prefix")]
	pub relative_asset_path_prefix: String,
	#[serde(default)]
	pub post_link_mode: PostLinkMode,
}

fn default_asset_path_prefix() -> String {
	DEFAULT_ASSET_PATH_PREFIX.to_string()
}

/// The static site generator whose link syntax is used for post links.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum PostLinkMode {
	/// `{% post_url 2021-08-21-my-post %}`
	#[default]
	Jekyll,
	/// `{{< relref "2021-08-21-my-post" >}}`
	Hugo,
}

impl PostLinkMode {
	/// The permalink expression for a post with the given dated name.
	pub fn post_link(self, dated_name: &str) -> String {
		match self {
			Self::Jekyll => format!("{{% post_url {dated_name} %}}"),
			Self::Hugo => format!("{{{{< relref \"{dated_name}\" >}}}}"),
		}
	}
}

impl fmt::Display for PostLinkMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Jekyll => f.write_str("jekyll"),
			Self::Hugo => f.write_str("hugo"),
		}
	}
}

impl ObydeConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the explicit config file, or discover one in `root`.
	pub fn discover(explicit: Option<&Path>, root: &Path) -> ObydeResult<Self> {
		match explicit {
			Some(path) => Self::load(path),
			None => {
				let path = Self::resolve_path(root)
					.ok_or_else(|| ObydeError::ConfigNotFound(root.to_path_buf()))?;
				Self::load(&path)
			}
		}
	}

	/// Load and parse the config file at `path`, resolving relative paths
	/// against its parent directory.
	pub fn load(path: &Path) -> ObydeResult<Self> {
		let content = std::fs::read_to_string(path).map_err(|e| {
			ObydeError::ConfigParse {
				path: path.to_path_buf(),
				reason: e.to_string(),
			}
		})?;
		let config = Self::from_yaml(&content, path)?;
		let base = path.parent().unwrap_or_else(|| Path::new(""));

		Ok(config.relative_to(base))
	}

	/// Parse config content. `path` is only used for error messages.
	pub fn from_yaml(content: &str, path: &Path) -> ObydeResult<Self> {
		serde_yaml_ng::from_str(content).map_err(|e| {
			ObydeError::ConfigParse {
				path: path.to_path_buf(),
				reason: e.to_string(),
			}
		})
	}

	/// Rebase every configured path onto `base`. Absolute paths are kept.
	#[must_use]
	pub fn relative_to(mut self, base: &Path) -> Self {
		self.vault.path = base.join(&self.vault.path);
		self.vault.asset_path = base.join(&self.vault.asset_path);
		self.output.post_output_path = base.join(&self.output.post_output_path);
		self.output.asset_output_path = base.join(&self.output.asset_output_path);
		self
	}
}
