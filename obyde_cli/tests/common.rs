#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;
use obyde_core::AnyEmptyResult;

pub const CONFIG: &str = "vault:\n  path: vault\n  asset_path: vault/assets\n  \
                          excluded_subdirectories:\n    - drafts\noutput:\n  post_output_path: \
                          site/_posts\n  asset_output_path: site/assets\n  \
                          relative_asset_path_prefix: /assets\n";

pub fn obyde_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("obyde"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("OBYDE_LOG");
	cmd
}

pub fn write_file(root: &Path, relative: &str, content: &str) -> AnyEmptyResult {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)?;

	Ok(())
}

/// A vault with two linked posts, a draft, and one image, plus an
/// `obyde.yaml` using `config`.
pub fn create_vault(root: &Path, config: &str) -> AnyEmptyResult {
	write_file(root, "obyde.yaml", config)?;
	write_file(
		root,
		"vault/posts/My Note.md",
		"---\ndate: 2021-08-21\ntitle: Mine\n---\nHello ==world==, see [[Other Post|other]], \
		 ![[diagram.png]] and [[Nowhere]].\n```\n[[My Note]]\n```\n",
	)?;
	write_file(
		root,
		"vault/posts/Other Post.md",
		"---\ndate: 2021-09-01\n---\nBack to [[My Note]].\n",
	)?;
	write_file(root, "vault/drafts/Draft.md", "Not published\n")?;
	write_file(root, "vault/assets/diagram.png", "png-bytes")?;
	std::fs::create_dir_all(root.join("site/_posts"))?;
	std::fs::create_dir_all(root.join("site/assets"))?;

	Ok(())
}
