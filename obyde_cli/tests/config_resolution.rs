mod common;

use obyde_core::AnyEmptyResult;
use rstest::rstest;

#[rstest]
#[case::yml("obyde.yml")]
#[case::dot_yaml(".obyde.yaml")]
fn check_resolves_config_candidates(#[case] candidate: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;
	std::fs::rename(tmp.path().join("obyde.yaml"), tmp.path().join(candidate))?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.assert()
		.success();

	Ok(())
}

#[test]
fn check_prefers_obyde_yaml_over_other_candidates() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;
	std::fs::write(tmp.path().join("obyde.yml"), "not: [valid")?;
	std::fs::write(tmp.path().join(".obyde.yaml"), "not: [valid")?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.assert()
		.success();

	Ok(())
}

#[test]
fn explicit_config_resolves_paths_against_its_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let site = tmp.path().join("site-root");
	common::create_vault(&site, common::CONFIG)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("publish")
		.arg("--config")
		.arg(site.join("obyde.yaml"))
		.assert()
		.success();

	assert!(site.join("site/_posts/2021-08-21-my-note.md").is_file());

	Ok(())
}

#[test]
fn unknown_post_link_mode_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config = format!("{}  post_link_mode: gatsby\n", common::CONFIG);
	common::create_vault(tmp.path(), &config)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn missing_explicit_config_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg("-c")
		.arg("nowhere.yaml")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("nowhere.yaml"));

	Ok(())
}
