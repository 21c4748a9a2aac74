mod common;

use obyde_core::AnyEmptyResult;

#[test]
fn publish_writes_posts_and_assets() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("publish")
		.assert()
		.success()
		.stdout(predicates::str::contains("Wrote site/_posts/2021-08-21-my-note.md"))
		.stdout(predicates::str::contains(
			"Published 2 post(s), copied 1 new asset(s).",
		));

	let content = std::fs::read_to_string(tmp.path().join("site/_posts/2021-08-21-my-note.md"))?;
	assert!(content.starts_with("---\ndate: 2021-08-21\ntitle: Mine\n---\n"));
	assert!(content.contains("Hello <mark>world</mark>"));
	assert!(content.contains("[other]({% post_url 2021-09-01-other-post %})"));
	assert!(content.contains("![diagram.png](/assets/"));
	assert!(content.contains("[[Nowhere]]"));
	assert!(content.contains("```\n[[My Note]]\n```"));

	assert!(!tmp.path().join("site/_posts/2021-01-01-draft.md").exists());
	assert_eq!(std::fs::read_dir(tmp.path().join("site/assets"))?.count(), 1);

	Ok(())
}

#[test]
fn publish_does_not_copy_assets_twice() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("publish")
		.assert()
		.success();

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("publish")
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Published 2 post(s), copied 0 new asset(s).",
		));

	Ok(())
}

#[test]
fn publish_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("publish")
		.arg("--dry-run")
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Would write site/_posts/2021-09-01-other-post.md",
		))
		.stdout(predicates::str::contains(
			"Dry run: 2 post(s) rendered, nothing written.",
		));

	assert_eq!(std::fs::read_dir(tmp.path().join("site/_posts"))?.count(), 0);
	assert_eq!(std::fs::read_dir(tmp.path().join("site/assets"))?.count(), 0);

	Ok(())
}

#[test]
fn publish_diff_shows_changed_lines() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("publish")
		.assert()
		.success();

	common::write_file(
		tmp.path(),
		"vault/posts/Other Post.md",
		"---\ndate: 2021-09-01\n---\nStill ==here==.\n",
	)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("publish")
		.arg("--dry-run")
		.arg("--diff")
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"-Back to [My Note]({% post_url 2021-08-21-my-note %}).",
		))
		.stdout(predicates::str::contains("+Still <mark>here</mark>."));

	Ok(())
}

#[test]
fn publish_uses_hugo_links() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config = format!("{}  post_link_mode: hugo\n", common::CONFIG);
	common::create_vault(tmp.path(), &config)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("publish")
		.assert()
		.success();

	let content =
		std::fs::read_to_string(tmp.path().join("site/_posts/2021-09-01-other-post.md"))?;
	assert!(content.contains("[My Note]({{< relref \"2021-08-21-my-note\" >}})"));

	Ok(())
}

#[test]
fn publish_fails_on_undated_note() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;
	common::write_file(
		tmp.path(),
		"vault/posts/Undated.md",
		"---\ntitle: No date\n---\nBody\n",
	)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("publish")
		.assert()
		.code(1)
		.stdout(predicates::str::contains("Published 2 post(s)"))
		.stderr(predicates::str::contains("Undated.md"))
		.stderr(predicates::str::contains("does not have a date"))
		.stderr(predicates::str::contains("1 note(s) could not be published."));

	assert!(
		tmp.path()
			.join("site/_posts/2021-08-21-my-note.md")
			.is_file()
	);

	Ok(())
}
