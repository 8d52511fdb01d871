use crate::config::MTIME_PLACEHOLDER;
use crate::config::SRC_PLACEHOLDER;
use crate::stat_cache::FileEntry;

/// Turn a filesystem path into a web-root-relative path.
///
/// `public_folder` is stripped when it is a leading prefix of `path` that
/// ends on a path boundary. A leading `./` on either side is ignored, so
/// `./public` strips from `public/js/app.js` and the other way round. The
/// result always starts with exactly one `/`.
pub fn web_path(path: &str, public_folder: &str) -> String {
	let path = trim_dot_slash(path);
	let public_folder = trim_dot_slash(public_folder);
	let stripped = path
		.strip_prefix(public_folder)
		.filter(|rest| public_folder.ends_with('/') || rest.is_empty() || rest.starts_with('/'))
		.unwrap_or(path);

	format!("/{}", stripped.trim_start_matches('/'))
}

fn trim_dot_slash(path: &str) -> &str {
	path.strip_prefix("./").unwrap_or(path)
}

/// Render a single asset line.
///
/// Only the first `{{src}}` and the first `{{mtime}}` in `template` are
/// replaced. A missing modification time renders as `0`. The path is
/// inserted as-is, without any escaping.
pub fn render(entry: &FileEntry, template: &str, public_folder: &str) -> String {
	let src = web_path(&entry.path, public_folder);
	let mtime = entry.mtime_millis.unwrap_or(0).to_string();

	template
		.replacen(SRC_PLACEHOLDER, &src, 1)
		.replacen(MTIME_PLACEHOLDER, &mtime, 1)
}

/// Render one line per entry, in entry order.
pub fn render_all(entries: &[FileEntry], template: &str, public_folder: &str) -> Vec<String> {
	entries
		.iter()
		.map(|entry| render(entry, template, public_folder))
		.collect()
}
