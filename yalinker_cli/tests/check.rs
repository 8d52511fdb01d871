mod common;

use yalinker_core::AnyEmptyResult;

#[test]
fn check_fails_when_targets_are_stale() -> AnyEmptyResult {
	let tmp = common::site()?;

	common::yalinker_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("index.html is out of date"))
		.stderr(predicates::str::contains("1 target file(s) out of date"));

	Ok(())
}

#[test]
fn check_passes_after_link() -> AnyEmptyResult {
	let tmp = common::site()?;

	common::yalinker_cmd()
		.arg("link")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::yalinker_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("All target files are up to date."));

	Ok(())
}

#[test]
fn check_diff_shows_inserted_lines() -> AnyEmptyResult {
	let tmp = common::site()?;

	common::yalinker_cmd()
		.arg("check")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("+    <script src=\"/js/app.js?"));

	Ok(())
}

#[test]
fn check_does_not_write() -> AnyEmptyResult {
	let tmp = common::site()?;
	let index = tmp.path().join("public/index.html");
	let before = std::fs::read_to_string(&index)?;

	common::yalinker_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1);

	assert_eq!(std::fs::read_to_string(&index)?, before);

	Ok(())
}

#[test]
fn check_ignores_targets_without_markers() -> AnyEmptyResult {
	let tmp = common::site()?;
	common::write_file(tmp.path(), "plain.html", "<p>no markers</p>")?;

	common::yalinker_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.arg("plain.html")
		.assert()
		.success();

	Ok(())
}
