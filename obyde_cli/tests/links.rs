mod common;

use obyde_core::AnyEmptyResult;
use serde_json::Value;

#[test]
fn links_text_lists_resolutions() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("links")
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"2021-08-21-my-note (vault/posts/My Note.md)",
		))
		.stdout(predicates::str::contains(
			"[[Other Post|other]] -> post {% post_url 2021-09-01-other-post %}",
		))
		.stdout(predicates::str::contains("[[diagram.png]] -> asset /assets/"))
		.stdout(predicates::str::contains("[[Nowhere]] -> unresolved"))
		.stdout(predicates::str::contains(
			"[[My Note]] -> post {% post_url 2021-08-21-my-note %}",
		));

	Ok(())
}

#[test]
fn links_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;

	let output = common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("links")
		.arg("--format")
		.arg("json")
		.output()?;

	assert!(output.status.success());
	let value: Value = serde_json::from_slice(&output.stdout)?;
	let posts = value.as_array().ok_or("expected an array")?;
	assert_eq!(posts.len(), 2);

	let first = &posts[0];
	assert_eq!(first["post"], "2021-08-21-my-note");
	assert_eq!(first["links"].as_array().map(Vec::len), Some(3));

	let post_link = &first["links"][0];
	assert_eq!(post_link["raw"], "[[Other Post|other]]");
	assert_eq!(post_link["target"], "Other Post");
	assert_eq!(post_link["display"], "other");
	assert_eq!(post_link["resolution"]["kind"], "post");
	assert_eq!(
		post_link["resolution"]["dated_name"],
		"2021-09-01-other-post"
	);

	assert_eq!(first["links"][1]["resolution"]["kind"], "asset");
	assert_eq!(first["links"][2]["resolution"]["kind"], "unresolved");
	assert_eq!(first["links"][2]["display"], Value::Null);

	Ok(())
}

#[test]
fn links_fail_on_unterminated_link() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::create_vault(tmp.path(), common::CONFIG)?;
	common::write_file(
		tmp.path(),
		"vault/posts/Dangling.md",
		"---\ndate: 2021-10-01\n---\nSee [[Other",
	)?;

	common::obyde_cmd()
		.current_dir(tmp.path())
		.arg("links")
		.assert()
		.code(1)
		.stdout(predicates::str::contains("2021-09-01-other-post"))
		.stderr(predicates::str::contains("Dangling.md"))
		.stderr(predicates::str::contains("end of input while parsing wikilink"));

	Ok(())
}
