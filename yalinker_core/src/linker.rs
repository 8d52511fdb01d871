use std::fmt;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::Span;
use tracing::debug;
use tracing::warn;

use crate::YalError;
use crate::YalResult;
use crate::config::LinkerConfig;
use crate::pattern::PatternSpec;
use crate::render::render_all;
use crate::resolver::ResolvedFileSet;
use crate::resolver::resolve_patterns;
use crate::source::AssetSource;
use crate::source::FsAssetSource;
use crate::splice::find_region;
use crate::splice::splice_region;
use crate::stat_cache::FileEntry;
use crate::stat_cache::StatCache;

/// The contents slot of a [`SourceFile`].
#[non_exhaustive]
pub enum Contents {
	/// No contents. Passes through untouched.
	Null,
	/// Buffered bytes, the only kind that can be linked.
	Buffer(Vec<u8>),
	/// Streamed contents. Rejected as bad input.
	Stream(Box<dyn Read + Send + Sync>),
}

impl fmt::Debug for Contents {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("Null"),
			Self::Buffer(bytes) => write!(f, "Buffer({} bytes)", bytes.len()),
			Self::Stream(_) => f.write_str("Stream"),
		}
	}
}

/// A named file flowing through the linker.
#[derive(Debug)]
pub struct SourceFile {
	pub path: PathBuf,
	pub contents: Contents,
}

impl SourceFile {
	pub fn new(path: impl Into<PathBuf>, contents: Contents) -> Self {
		Self {
			path: path.into(),
			contents,
		}
	}

	pub fn buffer(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
		Self::new(path, Contents::Buffer(bytes.into()))
	}

	pub fn null(path: impl Into<PathBuf>) -> Self {
		Self::new(path, Contents::Null)
	}

	pub fn is_null(&self) -> bool {
		matches!(self.contents, Contents::Null)
	}

	pub fn is_buffer(&self) -> bool {
		matches!(self.contents, Contents::Buffer(_))
	}

	/// The buffered bytes, if any.
	pub fn bytes(&self) -> Option<&[u8]> {
		match &self.contents {
			Contents::Buffer(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Read a file from disk into a buffered [`SourceFile`].
	pub fn read(path: &Path) -> YalResult<Self> {
		let bytes = std::fs::read(path)?;
		Ok(Self::buffer(path, bytes))
	}
}

/// Whether a [`Linker`] processes files. Decided once, at construction.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LinkerState {
	Enabled,
	/// The configuration was invalid. Every file passes through unchanged.
	Disabled,
}

/// Injects rendered asset lines between the configured markers of every
/// file it processes.
///
/// The asset set is resolved and stat'ed once, on the first file that
/// contains both markers, and reused for every later file.
#[derive(Debug)]
pub struct Linker<S = FsAssetSource> {
	config: LinkerConfig,
	patterns: Vec<PatternSpec>,
	state: LinkerState,
	source: Arc<S>,
	files: OnceCell<ResolvedFileSet>,
	stats: StatCache<S>,
}

impl Linker<FsAssetSource> {
	/// A linker that resolves asset patterns against `root` on disk.
	pub fn with_root(config: LinkerConfig, root: impl Into<PathBuf>) -> Self {
		Self::new(config, FsAssetSource::new(root))
	}
}

impl<S: AssetSource> Linker<S> {
	/// Validate `config` and build a linker. Configuration problems are
	/// logged and leave the linker permanently disabled.
	pub fn new(config: LinkerConfig, source: S) -> Self {
		let issues = config.validate();
		for issue in &issues {
			warn!("{issue}");
		}

		let state = if issues.is_empty() {
			LinkerState::Enabled
		} else {
			LinkerState::Disabled
		};
		let source = Arc::new(source);

		Self {
			patterns: config.patterns(),
			config,
			state,
			stats: StatCache::new(Arc::clone(&source)),
			source,
			files: OnceCell::new(),
		}
	}

	pub fn config(&self) -> &LinkerConfig {
		&self.config
	}

	pub fn state(&self) -> LinkerState {
		self.state
	}

	pub fn is_enabled(&self) -> bool {
		self.state == LinkerState::Enabled
	}

	/// The asset paths matched by the configured patterns, resolved on
	/// first use. The directory walk runs on the blocking thread pool.
	pub async fn resolve_files(&self) -> YalResult<&ResolvedFileSet> {
		self.files
			.get_or_try_init(|| {
				async {
					let patterns = self.patterns.clone();
					let source = Arc::clone(&self.source);
					let span = Span::current();
					let files = tokio::task::spawn_blocking(move || {
						span.in_scope(|| resolve_patterns(&patterns, source.as_ref()))
					})
					.await
					.map_err(|e| YalError::Task(e.to_string()))??;
					debug!(count = files.len(), "resolved asset files");
					Ok::<_, YalError>(files)
				}
			})
			.await
	}

	/// The resolved assets with their modification times.
	pub async fn assets(&self) -> YalResult<&[FileEntry]> {
		let files = self.resolve_files().await?;
		self.stats.stat_all(files).await
	}

	/// One rendered line per asset.
	pub async fn render_lines(&self) -> YalResult<Vec<String>> {
		let assets = self.assets().await?;
		Ok(render_all(
			assets,
			&self.config.file_template,
			&self.config.public_folder,
		))
	}

	/// Splice the asset lines into `content`.
	///
	/// Returns `None` when nothing changes: the markers are absent or out of
	/// order, or no asset matched. Assets are only resolved when the markers
	/// are present.
	pub async fn link_text(&self, content: &str) -> YalResult<Option<String>> {
		let Some(region) = find_region(content, &self.config.area_start, &self.config.area_end)
		else {
			debug!("markers not found, leaving content untouched");
			return Ok(None);
		};

		let lines = self.render_lines().await?;
		if lines.is_empty() {
			debug!("no assets matched, leaving content untouched");
			return Ok(None);
		}

		Ok(Some(splice_region(
			content,
			region,
			&self.config.area_start,
			&lines,
			self.config.line_ending.as_str(),
		)))
	}

	/// Process a single file.
	///
	/// Disabled linkers, null contents, and contents that are not UTF-8 text
	/// pass through unchanged. Streamed contents are rejected with
	/// [`YalError::BadInput`].
	pub async fn process(&self, mut file: SourceFile) -> YalResult<SourceFile> {
		if !self.is_enabled() {
			return Ok(file);
		}

		let linked = match &file.contents {
			Contents::Null => None,
			Contents::Stream(_) => {
				return Err(YalError::BadInput {
					path: file.path.display().to_string(),
				});
			}
			Contents::Buffer(bytes) => {
				if let Ok(text) = std::str::from_utf8(bytes) {
					self.link_text(text).await?
				} else {
					debug!(path = %file.path.display(), "contents are not utf-8 text, skipping");
					None
				}
			}
		};

		if let Some(linked) = linked {
			file.contents = Contents::Buffer(linked.into_bytes());
		}

		Ok(file)
	}

	/// Process `files` in order. Each result lines up with its input file.
	pub async fn process_all(&self, files: Vec<SourceFile>) -> Vec<YalResult<SourceFile>> {
		let mut results = Vec::with_capacity(files.len());
		for file in files {
			results.push(self.process(file).await);
		}
		results
	}
}
