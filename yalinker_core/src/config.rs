use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::YalError;
use crate::YalResult;
use crate::pattern::PatternSpec;

/// Placeholder replaced with the web-root-relative path of an asset.
pub const SRC_PLACEHOLDER: &str = "{{src}}";
/// Placeholder replaced with the modification time of an asset in
/// milliseconds since the unix epoch.
pub const MTIME_PLACEHOLDER: &str = "{{mtime}}";

pub const DEFAULT_FILE_TEMPLATE: &str = "{{src}}?{{mtime}}";
pub const DEFAULT_AREA_START: &str = "<!--START-->";
pub const DEFAULT_AREA_END: &str = "<!--END-->";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"yalinker.toml",
	".yalinker.toml",
	".config/yalinker.toml",
];

/// Line ending used to join the injected lines.
#[derive(Debug, Clone, Copy, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
	/// `\r\n` on Windows, `\n` everywhere else.
	#[default]
	Native,
	Lf,
	Crlf,
}

impl LineEnding {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Native => {
				if cfg!(windows) {
					"\r\n"
				} else {
					"\n"
				}
			}
			Self::Lf => "\n",
			Self::Crlf => "\r\n",
		}
	}
}

/// Configuration loaded from a `yalinker.toml` file.
///
/// ```toml
/// files = ["public/js/**/*.js", "!public/js/vendor/**"]
/// file_template = '<script src="{{src}}?{{mtime}}"></script>'
/// area_start = "<!-- scripts -->"
/// area_end = "<!-- /scripts -->"
/// public_folder = "public"
/// targets = ["public/index.html"]
/// ```
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct LinkerConfig {
	/// Glob patterns of the assets to link. A leading `!` excludes matches.
	#[serde(default)]
	pub files: Vec<String>,
	/// Line rendered for every asset.
	#[serde(default = "default_file_template", alias = "fileTemplate")]
	pub file_template: String,
	/// Marker that opens the injected region.
	#[serde(default = "default_area_start", alias = "areaStart")]
	pub area_start: String,
	/// Marker that closes the injected region.
	#[serde(default = "default_area_end", alias = "areaEnd")]
	pub area_end: String,
	/// Prefix stripped from every asset path before rendering.
	#[serde(default, alias = "publicFolder")]
	pub public_folder: String,
	#[serde(default, alias = "lineEnding")]
	pub line_ending: LineEnding,
	/// Glob patterns of the files the CLI splices into.
	#[serde(default)]
	pub targets: Vec<String>,
}

impl Default for LinkerConfig {
	fn default() -> Self {
		Self {
			files: Vec::new(),
			file_template: default_file_template(),
			area_start: default_area_start(),
			area_end: default_area_end(),
			public_folder: String::new(),
			line_ending: LineEnding::default(),
			targets: Vec::new(),
		}
	}
}

fn default_file_template() -> String {
	DEFAULT_FILE_TEMPLATE.to_string()
}

fn default_area_start() -> String {
	DEFAULT_AREA_START.to_string()
}

fn default_area_end() -> String {
	DEFAULT_AREA_END.to_string()
}

/// A configuration problem that disables linking instead of failing.
#[derive(Debug, Clone, Copy, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum ConfigIssue {
	#[error("no input files, this task will be skipped")]
	NoFiles,
	#[error("illegal area_start delimiter specified, this task will be skipped")]
	EmptyAreaStart,
	#[error("illegal area_end delimiter specified, this task will be skipped")]
	EmptyAreaEnd,
}

impl LinkerConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> YalResult<Option<LinkerConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;

		Ok(Some(config))
	}

	pub fn from_toml(content: &str) -> YalResult<LinkerConfig> {
		toml::from_str(content).map_err(|e| YalError::ConfigParse(e.to_string()))
	}

	/// Every problem that prevents this configuration from linking. An empty
	/// list means the configuration is usable.
	pub fn validate(&self) -> Vec<ConfigIssue> {
		let mut issues = Vec::new();
		if self.files.is_empty() {
			issues.push(ConfigIssue::NoFiles);
		}
		if self.area_start.is_empty() {
			issues.push(ConfigIssue::EmptyAreaStart);
		}
		if self.area_end.is_empty() {
			issues.push(ConfigIssue::EmptyAreaEnd);
		}
		issues
	}

	/// The asset patterns parsed into include/exclude specs, in the order
	/// they were listed.
	pub fn patterns(&self) -> Vec<PatternSpec> {
		PatternSpec::parse_all(&self.files)
	}
}
