use std::path::Path;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use globset::GlobBuilder;
use ignore::WalkBuilder;

use crate::YalError;
use crate::YalResult;

/// Read-only filesystem capabilities needed to link assets.
///
/// Both methods block. Callers that need concurrency run them on a blocking
/// thread pool.
pub trait AssetSource: Send + Sync + 'static {
	/// Expand a single glob pattern (without any `!` prefix) into the paths
	/// it matches. A pattern that matches nothing yields an empty list.
	fn expand(&self, pattern: &str) -> YalResult<Vec<String>>;

	/// Modification time of `path` in milliseconds since the unix epoch, or
	/// `None` when the platform does not report one.
	fn modified(&self, path: &str) -> YalResult<Option<u64>>;
}

/// [`AssetSource`] backed by the real filesystem. Relative patterns and
/// paths are resolved against `root`.
#[derive(Debug, Clone)]
pub struct FsAssetSource {
	root: PathBuf,
}

impl FsAssetSource {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl AssetSource for FsAssetSource {
	fn expand(&self, pattern: &str) -> YalResult<Vec<String>> {
		let (prefix, pattern) = match pattern.strip_prefix("./") {
			Some(rest) => ("./", rest),
			None => ("", pattern),
		};
		if pattern.is_empty() {
			return Ok(Vec::new());
		}

		let matcher = GlobBuilder::new(pattern)
			.literal_separator(true)
			.build()
			.map_err(|e| {
				YalError::InvalidPattern {
					pattern: pattern.to_string(),
					reason: e.to_string(),
				}
			})?
			.compile_matcher();

		let base = literal_base(pattern);
		let walk_root = self.root.join(&base);
		if !walk_root.exists() {
			return Ok(Vec::new());
		}

		let walker = WalkBuilder::new(&walk_root)
			.standard_filters(false)
			.hidden(!names_hidden_component(pattern))
			.build();

		let mut matches = Vec::new();
		for entry in walker {
			let entry = entry.map_err(|e| YalError::Io(std::io::Error::other(e.to_string())))?;
			let is_file = if entry.path_is_symlink() {
				entry.path().is_file()
			} else {
				entry.file_type().is_some_and(|kind| kind.is_file())
			};
			if !is_file {
				continue;
			}

			let Ok(relative) = entry.path().strip_prefix(&walk_root) else {
				continue;
			};

			let candidate = join_base(&base, relative);
			if matcher.is_match(&candidate) {
				matches.push(format!("{prefix}{candidate}"));
			}
		}

		matches.sort();
		Ok(matches)
	}

	fn modified(&self, path: &str) -> YalResult<Option<u64>> {
		let metadata = std::fs::metadata(self.root.join(path)).map_err(|e| {
			YalError::Stat {
				path: path.to_string(),
				reason: e.to_string(),
			}
		})?;

		Ok(metadata
			.modified()
			.ok()
			.and_then(|time| time.duration_since(UNIX_EPOCH).ok())
			.and_then(|duration| duration.as_millis().try_into().ok()))
	}
}

/// The leading components of `pattern` that contain no glob syntax. This is
/// the directory the walk starts from.
fn literal_base(pattern: &str) -> String {
	let literal: Vec<&str> = pattern
		.split('/')
		.take_while(|component| !has_glob_syntax(component))
		.collect();
	let base = literal.join("/");

	if !base.is_empty() {
		base
	} else if pattern.starts_with('/') {
		"/".to_string()
	} else {
		".".to_string()
	}
}

fn has_glob_syntax(component: &str) -> bool {
	component.contains(['*', '?', '[', ']', '{', '}', '\\'])
}

/// Dot-prefixed entries are only walked when the pattern spells one out.
fn names_hidden_component(pattern: &str) -> bool {
	pattern
		.split('/')
		.any(|component| component.starts_with('.') && component != "." && component != "..")
}

/// Rebuild a walked path relative to the pattern's base. A leading `./` on
/// the pattern is added back by the caller.
fn join_base(base: &str, relative: &Path) -> String {
	let relative = relative.to_string_lossy().replace('\\', "/");

	if relative.is_empty() {
		base.to_string()
	} else if base == "." {
		relative
	} else if base.ends_with('/') {
		format!("{base}{relative}")
	} else {
		format!("{base}/{relative}")
	}
}
