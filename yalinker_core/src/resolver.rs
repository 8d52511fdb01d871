use std::collections::HashSet;

use derive_more::Deref;
use tracing::debug;

use crate::YalResult;
use crate::pattern::PatternSpec;
use crate::source::AssetSource;

/// Ordered set of unique asset paths.
#[derive(Debug, Clone, Default, Deref, Eq, PartialEq)]
pub struct ResolvedFileSet(Vec<String>);

impl ResolvedFileSet {
	/// Append every path that is not already present, keeping first-seen
	/// order.
	pub fn union(&mut self, paths: Vec<String>) {
		for path in paths {
			if !self.0.contains(&path) {
				self.0.push(path);
			}
		}
	}

	/// Remove every path in `paths` from the set.
	pub fn difference(&mut self, paths: &[String]) {
		let removed: HashSet<&str> = paths.iter().map(String::as_str).collect();
		self.0.retain(|path| !removed.contains(path.as_str()));
	}

	pub fn into_inner(self) -> Vec<String> {
		self.0
	}
}

impl From<Vec<String>> for ResolvedFileSet {
	fn from(paths: Vec<String>) -> Self {
		let mut set = Self::default();
		set.union(paths);
		set
	}
}

/// Expand `patterns` into a single ordered set of paths.
///
/// Patterns are applied strictly in list order: matches of a positive
/// pattern are unioned into the set built so far and matches of a negated
/// pattern are subtracted from it. A later positive pattern can therefore
/// re-add a path that an earlier negation removed.
pub fn resolve_patterns<S>(patterns: &[PatternSpec], source: &S) -> YalResult<ResolvedFileSet>
where
	S: AssetSource + ?Sized,
{
	let mut files = ResolvedFileSet::default();

	for spec in patterns {
		let found = source.expand(&spec.pattern)?;
		debug!(pattern = %spec, matches = found.len(), "expanded asset pattern");

		if found.is_empty() {
			continue;
		}

		if spec.negated {
			files.difference(&found);
		} else {
			files.union(found);
		}
	}

	Ok(files)
}
