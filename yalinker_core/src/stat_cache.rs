use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use crate::YalError;
use crate::YalResult;
use crate::source::AssetSource;

/// An asset path paired with its modification time.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileEntry {
	pub path: String,
	/// Milliseconds since the unix epoch. `None` when the platform reports no
	/// modification time.
	pub mtime_millis: Option<u64>,
}

impl FileEntry {
	pub fn new(path: impl Into<String>, mtime_millis: Option<u64>) -> Self {
		Self {
			path: path.into(),
			mtime_millis,
		}
	}
}

/// Run-scoped cache of asset modification times.
///
/// The first successful [`StatCache::stat_all`] call is kept for the lifetime
/// of the cache and returned to every later caller, whatever paths they pass.
/// Callers that arrive while the first lookup is in flight wait on it
/// instead of starting their own. A failed lookup is not cached.
#[derive(Debug)]
pub struct StatCache<S> {
	source: Arc<S>,
	entries: OnceCell<Vec<FileEntry>>,
}

impl<S: AssetSource> StatCache<S> {
	pub fn new(source: Arc<S>) -> Self {
		Self {
			source,
			entries: OnceCell::new(),
		}
	}

	pub async fn stat_all(&self, paths: &[String]) -> YalResult<&[FileEntry]> {
		let entries = self
			.entries
			.get_or_try_init(|| stat_paths(Arc::clone(&self.source), paths))
			.await?;

		Ok(entries.as_slice())
	}

	/// The cached entries, if a lookup has already succeeded.
	pub fn cached(&self) -> Option<&[FileEntry]> {
		self.entries.get().map(Vec::as_slice)
	}
}

/// Stat every path concurrently on the blocking pool. The result keeps the
/// order of `paths` and fails as soon as any single lookup fails.
async fn stat_paths<S: AssetSource>(source: Arc<S>, paths: &[String]) -> YalResult<Vec<FileEntry>> {
	debug!(count = paths.len(), "reading asset modification times");

	let handles: Vec<_> = paths
		.iter()
		.map(|path| {
			let source = Arc::clone(&source);
			let path = path.clone();
			tokio::task::spawn_blocking(move || -> YalResult<FileEntry> {
				let mtime_millis = source.modified(&path)?;
				Ok(FileEntry { path, mtime_millis })
			})
		})
		.collect();

	let mut entries = Vec::with_capacity(handles.len());
	for handle in handles {
		let entry = handle.await.map_err(|e| YalError::Task(e.to_string()))??;
		entries.push(entry);
	}

	Ok(entries)
}
