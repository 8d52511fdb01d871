//! `yalinker_core` injects a generated list of asset references into a
//! marked region of an HTML (or any other text) file. Given a set of glob
//! patterns it resolves the matching files, reads their modification times,
//! renders one line per file from a template and splices the rendered block
//! between two marker strings, keeping the indentation of the start marker.
//!
//! ## Processing Pipeline
//!
//! ```text
//! LinkerConfig
//!   → PatternSpec parsing (`!` prefix marks exclusions)
//!   → Resolver (union / difference of glob matches, in list order, once per run)
//!   → StatCache (concurrent mtime lookups, once per run)
//!   → Renderer (`{{src}}` and `{{mtime}}` substitution per asset)
//!   → Splicer (replaces the text between the markers of each file)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yalinker_core::Linker;
//! use yalinker_core::LinkerConfig;
//! use yalinker_core::SourceFile;
//!
//! # async fn run() -> yalinker_core::YalResult<()> {
//! let config = LinkerConfig {
//! 	files: vec!["public/js/*.js".into(), "!public/js/*.test.js".into()],
//! 	file_template: r#"<script src="{{src}}?{{mtime}}"></script>"#.into(),
//! 	public_folder: "public".into(),
//! 	..LinkerConfig::default()
//! };
//! let linker = Linker::with_root(config, ".");
//!
//! let file = SourceFile::read("public/index.html".as_ref())?;
//! let linked = linker.process(file).await?;
//! # let _ = linked;
//! # Ok(())
//! # }
//! ```

pub use config::*;
pub use error::*;
pub use linker::*;
pub use pattern::*;
pub use render::*;
pub use resolver::*;
pub use source::*;
pub use splice::*;
pub use stat_cache::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod linker;
mod pattern;
mod render;
mod resolver;
mod source;
mod splice;
mod stat_cache;
