mod common;

use rstest::rstest;
use similar_asserts::assert_eq;
use yalinker_core::AnyEmptyResult;

#[test]
fn link_injects_assets_between_markers() -> AnyEmptyResult {
	let tmp = common::site()?;
	let app = common::mtime_of(&tmp.path().join("public/js/app.js"))?;
	let vendor = common::mtime_of(&tmp.path().join("public/js/vendor.js"))?;

	common::yalinker_cmd()
		.arg("link")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated 1 file(s)."));

	let content = std::fs::read_to_string(tmp.path().join("public/index.html"))?;
	assert_eq!(
		content,
		format!(
			"<html>\n  <body>\n    <!--START-->\n    <script \
			 src=\"/js/app.js?{app}\"></script>\n    <script \
			 src=\"/js/vendor.js?{vendor}\"></script>\n    <!--END-->\n  </body>\n</html>\n"
		)
	);

	Ok(())
}

#[test]
fn link_twice_is_a_noop() -> AnyEmptyResult {
	let tmp = common::site()?;

	common::yalinker_cmd()
		.arg("link")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::yalinker_cmd()
		.arg("link")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already up to date"));

	Ok(())
}

#[test]
fn link_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = common::site()?;
	let index = tmp.path().join("public/index.html");
	let before = std::fs::read_to_string(&index)?;

	common::yalinker_cmd()
		.arg("link")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("would update 1 file(s)"))
		.stdout(predicates::str::contains("index.html"));

	assert_eq!(std::fs::read_to_string(&index)?, before);

	Ok(())
}

#[test]
fn link_positional_targets_override_config() -> AnyEmptyResult {
	let tmp = common::site()?;
	common::write_file(tmp.path(), "other.html", "<!--START--><!--END-->")?;

	common::yalinker_cmd()
		.arg("link")
		.arg("--path")
		.arg(tmp.path())
		.arg("other.html")
		.assert()
		.success()
		.stdout(predicates::str::contains("Updated 1 file(s)."));

	let other = std::fs::read_to_string(tmp.path().join("other.html"))?;
	assert!(other.contains("/js/app.js?"));
	let index = std::fs::read_to_string(tmp.path().join("public/index.html"))?;
	assert!(!index.contains("/js/app.js?"));

	Ok(())
}

#[test]
fn link_flags_override_config_values() -> AnyEmptyResult {
	let tmp = common::site()?;
	common::write_file(tmp.path(), "page.html", "<!-- css -->\n<!-- /css -->\n")?;
	common::write_file(tmp.path(), "public/css/site.css", "body {}")?;

	common::yalinker_cmd()
		.arg("link")
		.arg("--path")
		.arg(tmp.path())
		.arg("--file")
		.arg("public/css/*.css")
		.arg("--template")
		.arg("<link href=\"{{src}}\">")
		.arg("--area-start")
		.arg("<!-- css -->")
		.arg("--area-end")
		.arg("<!-- /css -->")
		.arg("page.html")
		.assert()
		.success();

	let page = std::fs::read_to_string(tmp.path().join("page.html"))?;
	assert_eq!(
		page,
		"<!-- css -->\n<link href=\"/css/site.css\">\n<!-- /css -->\n"
	);

	Ok(())
}

#[test]
fn link_without_files_leaves_targets_untouched() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "index.html", "<!--START--><!--END-->")?;

	common::yalinker_cmd()
		.arg("link")
		.arg("--path")
		.arg(tmp.path())
		.arg("index.html")
		.assert()
		.success()
		.stderr(predicates::str::contains("no input files"))
		.stdout(predicates::str::contains("already up to date"));

	let content = std::fs::read_to_string(tmp.path().join("index.html"))?;
	assert_eq!(content, "<!--START--><!--END-->");

	Ok(())
}

#[test]
fn link_reports_no_matching_targets() -> AnyEmptyResult {
	let tmp = common::site()?;

	common::yalinker_cmd()
		.arg("link")
		.arg("--path")
		.arg(tmp.path())
		.arg("missing/*.html")
		.assert()
		.success()
		.stdout(predicates::str::contains("No target files matched."));

	Ok(())
}

#[test]
fn link_reports_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "yalinker.toml", "files = \"not a list\"")?;

	common::yalinker_cmd()
		.arg("link")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[rstest]
#[case::plain("public/js/app.js", "public", "/js/app.js")]
#[case::trailing_slash("public/js/app.js", "public/", "/js/app.js")]
#[case::dot_slash_folder("public/js/app.js", "./public", "/js/app.js")]
#[case::dot_slash_both("./public/js/app.js", "./public", "/js/app.js")]
#[case::dot_slash_pattern("./public/js/app.js", "public", "/js/app.js")]
#[case::empty_folder("public/js/app.js", "", "/public/js/app.js")]
fn link_strips_public_folder_spellings(
	#[case] pattern: &str,
	#[case] public_folder: &str,
	#[case] expected: &str,
) -> AnyEmptyResult {
	let tmp = common::site()?;
	common::write_file(tmp.path(), "page.html", "<!--START--><!--END-->")?;

	common::yalinker_cmd()
		.arg("link")
		.arg("--path")
		.arg(tmp.path())
		.arg("--file")
		.arg(pattern)
		.arg("--template")
		.arg("{{src}}")
		.arg("--public-folder")
		.arg(public_folder)
		.arg("page.html")
		.assert()
		.success();

	let page = std::fs::read_to_string(tmp.path().join("page.html"))?;
	assert_eq!(page, format!("<!--START-->\n{expected}\n<!--END-->"));

	Ok(())
}

#[test]
fn link_verbose_logs_progress() -> AnyEmptyResult {
	let tmp = common::site()?;

	common::yalinker_cmd()
		.arg("link")
		.arg("--verbose")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("resolved target files"))
		.stderr(predicates::str::contains("resolved asset files"))
		.stdout(predicates::str::contains("public/index.html"));

	Ok(())
}
