mod common;

use obyde_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn check_passes_when_every_note_renders() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Check passed: 2 post(s) render cleanly.",
		));

	assert_eq!(std::fs::read_dir(tmp.path().join("site/_posts"))?.count(), 0);

	Ok(())
}

#[test]
fn check_fails_on_unterminated_fence() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;
	common::write_file(
		tmp.path(),
		"vault/posts/Broken.md",
		"---\ndate: 2021-10-01\n---\nOpen ``` fence\n",
	)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Check failed."))
		.stderr(predicates::str::contains("failed notes: 1"))
		.stderr(predicates::str::contains("Broken.md"))
		.stderr(predicates::str::contains("unterminated fence"));

	Ok(())
}

#[test]
fn check_fails_on_invalid_date() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;
	common::write_file(
		tmp.path(),
		"vault/posts/Bad Date.md",
		"---\ndate: 21/08/2021\n---\nBody\n",
	)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("invalid front matter date"))
		.stderr(predicates::str::contains("skipping note"));

	Ok(())
}

#[test]
fn check_log_filter_from_environment() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;
	common::write_file(tmp.path(), "vault/posts/Undated.md", "No front matter\n")?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.env("OBYDE_LOG", "off")
		.arg("check")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("does not have a date"))
		.stderr(predicates::str::contains("skipping note").not());

	Ok(())
}

#[test]
fn check_without_config_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no config file found"));

	Ok(())
}

#[test]
fn check_filename_collision_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;
	common::write_file(
		tmp.path(),
		"vault/archive/Other Post.md",
		"---\ndate: 2020-01-01\n---\nOld\n",
	)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("filename collision"));

	Ok(())
}

#[test]
fn check_missing_output_directory_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;
	std::fs::remove_dir(tmp.path().join("site/_posts"))?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("post output path"));

	Ok(())
}
