#![allow(dead_code)]

use std::path::Path;
use std::time::UNIX_EPOCH;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;
use yalinker_core::AnyEmptyResult;
use yalinker_core::AnyResult;

pub fn yalinker_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("yalinker"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
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

pub fn mtime_of(path: &Path) -> AnyResult<u64> {
	let modified = std::fs::metadata(path)?.modified()?;
	Ok(u64::try_from(modified.duration_since(UNIX_EPOCH)?.as_millis())?)
}

/// A small site with two scripts and one page containing the markers.
pub fn site() -> AnyResult<tempfile::TempDir> {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "public/js/app.js", "console.log('app');")?;
	write_file(tmp.path(), "public/js/vendor.js", "console.log('vendor');")?;
	write_file(tmp.path(), "public/js/app.test.js", "test();")?;
	write_file(
		tmp.path(),
		"public/index.html",
		"<html>\n  <body>\n    <!--START-->\n    <!--END-->\n  </body>\n</html>\n",
	)?;
	write_file(
		tmp.path(),
		"yalinker.toml",
		"files = [\"public/js/*.js\", \"!public/js/*.test.js\"]\nfile_template = '<script \
		 src=\"{{src}}?{{mtime}}\"></script>'\npublic_folder = \"public\"\nline_ending = \
		 \"lf\"\ntargets = [\"public/**/*.html\"]\n",
	)?;
	Ok(tmp)
}
