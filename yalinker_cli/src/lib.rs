use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use yalinker_core::LinkerConfig;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Inject cache-busted asset links between marker comments.",
	long_about = "yalinker resolves a set of asset glob patterns, renders one line per file with \
	              its modification time as a cache-busting value, and splices the rendered block \
	              between two marker strings in your HTML (or any text) files.\n\nQuick start:\n  \
	              yalinker init   Create a yalinker.toml\n  yalinker link   Inject asset links \
	              into the target files\n  yalinker check  Verify the target files are up to \
	              date\n  yalinker list   Show the resolved assets"
)]
pub struct YalinkerCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory. Asset and target patterns are
	/// resolved relative to it.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Asset glob pattern. Repeat to add more; prefix with `!` to exclude.
	/// Replaces `files` from the config file.
	#[arg(long = "file", short = 'f', global = true)]
	pub files: Vec<String>,

	/// Line rendered for each asset, with `{{src}}` and `{{mtime}}`
	/// placeholders.
	#[arg(long, global = true)]
	pub template: Option<String>,

	/// Marker that opens the injected region.
	#[arg(long, global = true)]
	pub area_start: Option<String>,

	/// Marker that closes the injected region.
	#[arg(long, global = true)]
	pub area_end: Option<String>,

	/// Prefix stripped from asset paths before rendering.
	#[arg(long, global = true)]
	pub public_folder: Option<String>,
}

impl YalinkerCli {
	/// Apply command line overrides on top of `config`.
	pub fn apply_overrides(&self, mut config: LinkerConfig) -> LinkerConfig {
		if !self.files.is_empty() {
			config.files.clone_from(&self.files);
		}
		if let Some(template) = &self.template {
			config.file_template.clone_from(template);
		}
		if let Some(area_start) = &self.area_start {
			config.area_start.clone_from(area_start);
		}
		if let Some(area_end) = &self.area_end {
			config.area_end.clone_from(area_end);
		}
		if let Some(public_folder) = &self.public_folder {
			config.public_folder.clone_from(public_folder);
		}
		config
	}
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `yalinker.toml` in the project root.
	///
	/// If a config file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// Inject asset links into the target files.
	///
	/// Resolves the asset patterns once, renders one line per asset, and
	/// replaces the text between the markers of every target file that
	/// contains them. Files without markers are left untouched.
	Link {
		/// Preview changes without writing files.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Target file glob patterns. Defaults to `targets` from the config
		/// file.
		targets: Vec<String>,
	},
	/// Check that every target file is up to date.
	///
	/// Exits with a non-zero status code if linking would change any target
	/// file. Nothing is written.
	Check {
		/// Show a line diff for each file that would change.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Target file glob patterns. Defaults to `targets` from the config
		/// file.
		targets: Vec<String>,
	},
	/// List the resolved assets and the line rendered for each.
	List,
}
