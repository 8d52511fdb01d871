use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yalinker_cli::Commands;
use yalinker_cli::YalinkerCli;
use yalinker_core::FsAssetSource;
use yalinker_core::Linker;
use yalinker_core::LinkerConfig;
use yalinker_core::PatternSpec;
use yalinker_core::SourceFile;
use yalinker_core::YalError;
use yalinker_core::YalResult;
use yalinker_core::resolve_patterns;

static USE_COLOR: AtomicBool = AtomicBool::new(true);

/// Style `$text` with an [`OwoColorize`] method, unless color is disabled.
macro_rules! paint {
	($text:expr, $style:ident) => {
		if USE_COLOR.load(Ordering::Relaxed) {
			$text.$style().to_string()
		} else {
			$text.to_string()
		}
	};
}

fn main() {
	let args = YalinkerCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Link { dry_run, targets }) => run_link(&args, targets, *dry_run),
		Some(Commands::Check { diff, targets }) => run_check(&args, targets, *diff),
		Some(Commands::List) => run_list(&args),
		None => {
			eprintln!("No subcommand specified. Run `yalinker --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<YalError>() {
			Ok(yal_err) => {
				let report: miette::Report = (*yal_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", paint!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &YalinkerCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(args: &YalinkerCli, root: &Path) -> YalResult<LinkerConfig> {
	let config = match LinkerConfig::load(root)? {
		Some(config) => config,
		None => {
			debug!(root = %root.display(), "no config file found, using defaults");
			LinkerConfig::default()
		}
	};
	Ok(args.apply_overrides(config))
}

fn build_linker(args: &YalinkerCli) -> YalResult<(PathBuf, Linker)> {
	let root = resolve_root(args);
	let config = load_config(args, &root)?;
	let linker = Linker::with_root(config, root.clone());

	if !linker.is_enabled() {
		eprintln!(
			"{} linking is disabled by the configuration, files are left unchanged",
			paint!("warning:", yellow)
		);
	}

	Ok((root, linker))
}

/// Resolve target patterns (from the command line, or `targets` in the
/// config) into file paths.
fn resolve_targets(
	root: &Path,
	config: &LinkerConfig,
	cli_targets: &[String],
) -> YalResult<Vec<PathBuf>> {
	let raw = if cli_targets.is_empty() {
		config.targets.as_slice()
	} else {
		cli_targets
	};
	let patterns = PatternSpec::parse_all(raw);
	let files = resolve_patterns(&patterns, &FsAssetSource::new(root))?;
	debug!(count = files.len(), "resolved target files");

	Ok(files.iter().map(|file| root.join(file)).collect())
}

/// A target file before and after linking.
struct TargetOutcome {
	path: PathBuf,
	original: Vec<u8>,
	linked: Vec<u8>,
}

impl TargetOutcome {
	fn is_changed(&self) -> bool {
		self.original != self.linked
	}
}

async fn link_targets(linker: &Linker, targets: &[PathBuf]) -> YalResult<Vec<TargetOutcome>> {
	let mut outcomes = Vec::with_capacity(targets.len());

	for path in targets {
		let original = tokio::fs::read(path).await?;
		let file = linker
			.process(SourceFile::buffer(path, original.clone()))
			.await?;
		let linked = file.bytes().map(<[u8]>::to_vec).unwrap_or_default();

		outcomes.push(TargetOutcome {
			path: path.clone(),
			original,
			linked,
		});
	}

	Ok(outcomes)
}

fn process_targets(
	args: &YalinkerCli,
	cli_targets: &[String],
) -> YalResult<(PathBuf, Vec<TargetOutcome>)> {
	let (root, linker) = build_linker(args)?;
	let targets = resolve_targets(&root, linker.config(), cli_targets)?;
	if targets.is_empty() {
		return Ok((root, Vec::new()));
	}

	let runtime = tokio::runtime::Runtime::new()?;
	let outcomes = runtime.block_on(link_targets(&linker, &targets))?;

	Ok((root, outcomes))
}

fn run_init(args: &YalinkerCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = LinkerConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("yalinker.toml");
	let sample_config = "# yalinker configuration\n\n# Asset glob patterns. Prefix a pattern with \
	                     `!` to exclude its matches.\nfiles = [\"public/js/**/*.js\", \
	                     \"!public/js/**/*.test.js\"]\n\n# Line rendered for every asset. \
	                     {{src}} is the web path, {{mtime}} the modification time.\nfile_template \
	                     = '<script src=\"{{src}}?{{mtime}}\"></script>'\n\n# Markers around \
	                     the injected region.\narea_start = \"<!--START-->\"\narea_end = \
	                     \"<!--END-->\"\n\n# Stripped from asset paths so they become web-root \
	                     relative.\npublic_folder = \"public\"\n\n# Files updated by `yalinker \
	                     link`.\ntargets = [\"public/**/*.html\"]\n";

	std::fs::write(&config_path, sample_config)?;
	println!("Created config file: {}", config_path.display());
	println!();
	println!("Next steps:");
	println!("  1. Edit {} to match your assets", config_path.display());
	println!("  2. Add the markers to your HTML files:");
	println!("     <!--START-->");
	println!("     <!--END-->");
	println!("  3. Run `yalinker link` to inject the asset links");

	Ok(())
}

fn run_link(
	args: &YalinkerCli,
	cli_targets: &[String],
	dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let (root, outcomes) = process_targets(args, cli_targets)?;

	if outcomes.is_empty() {
		println!("No target files matched.");
		return Ok(());
	}

	let changed: Vec<&TargetOutcome> = outcomes.iter().filter(|o| o.is_changed()).collect();
	if changed.is_empty() {
		println!("All target files are already up to date.");
		return Ok(());
	}

	if dry_run {
		println!("Dry run: would update {} file(s):", changed.len());
		for outcome in &changed {
			println!("  {}", display_path(&outcome.path, &root));
		}
		return Ok(());
	}

	for outcome in &changed {
		std::fs::write(&outcome.path, &outcome.linked)?;
		info!(path = %display_path(&outcome.path, &root), "linked");
	}
	println!("Updated {} file(s).", changed.len());

	if args.verbose {
		for outcome in &changed {
			println!("  {}", display_path(&outcome.path, &root));
		}
	}

	Ok(())
}

fn run_check(
	args: &YalinkerCli,
	cli_targets: &[String],
	show_diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let (root, outcomes) = process_targets(args, cli_targets)?;

	if outcomes.is_empty() {
		println!("No target files matched.");
		return Ok(());
	}

	let stale: Vec<&TargetOutcome> = outcomes.iter().filter(|o| o.is_changed()).collect();
	if stale.is_empty() {
		println!("{} All target files are up to date.", paint!("✓", green));
		return Ok(());
	}

	for outcome in &stale {
		eprintln!(
			"{} {} is out of date",
			paint!("stale:", red),
			display_path(&outcome.path, &root)
		);
		if show_diff {
			print_diff(
				&String::from_utf8_lossy(&outcome.original),
				&String::from_utf8_lossy(&outcome.linked),
			);
		}
	}

	eprintln!();
	eprintln!(
		"{} target file(s) out of date. Run `yalinker link` to update them.",
		stale.len()
	);
	process::exit(1);
}

fn run_list(args: &YalinkerCli) -> Result<(), Box<dyn std::error::Error>> {
	let (_root, linker) = build_linker(args)?;
	if !linker.is_enabled() {
		return Ok(());
	}

	let runtime = tokio::runtime::Runtime::new()?;
	let (assets, lines) = runtime.block_on(async {
		let assets = linker.assets().await?.to_vec();
		let lines = linker.render_lines().await?;
		Ok::<_, YalError>((assets, lines))
	})?;

	if assets.is_empty() {
		println!("No assets matched.");
		return Ok(());
	}

	println!("{}", paint!("Assets:", bold));
	for (asset, line) in assets.iter().zip(&lines) {
		println!("  {} {line}", asset.path);
	}
	println!("\n{} asset(s)", assets.len());

	Ok(())
}

/// Print the changed hunks between `current` and `expected`, with a line of
/// context around each.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);

	for (index, group) in diff.grouped_ops(1).iter().enumerate() {
		if index > 0 {
			eprintln!("  {}", paint!("...", dimmed));
		}

		for op in group {
			for change in diff.iter_changes(op) {
				let line = change.value().trim_end_matches(['\r', '\n']);
				match change.tag() {
					ChangeTag::Delete => eprintln!("  {}", paint!(format!("-{line}"), red)),
					ChangeTag::Insert => eprintln!("  {}", paint!(format!("+{line}"), green)),
					ChangeTag::Equal => eprintln!("   {line}"),
				}
			}
		}
	}
}

/// `path` relative to `root` when it lives under it.
fn display_path(path: &Path, root: &Path) -> String {
	let relative = path.strip_prefix(root).unwrap_or(path);
	relative.to_string_lossy().replace('\\', "/")
}
