use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum YalError {
	#[error(transparent)]
	#[diagnostic(code(yalinker::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(yalinker::config_parse),
		help("check that yalinker.toml is valid TOML with a `files` list")
	)]
	ConfigParse(String),

	#[error("invalid glob pattern `{pattern}`: {reason}")]
	#[diagnostic(
		code(yalinker::invalid_pattern),
		help("prefix a pattern with `!` to exclude matches; other characters follow glob syntax")
	)]
	InvalidPattern { pattern: String, reason: String },

	#[error("failed to read modification time of `{path}`: {reason}")]
	#[diagnostic(
		code(yalinker::stat),
		help("the file may have been removed after the asset patterns were expanded")
	)]
	Stat { path: String, reason: String },

	#[error("bad input file: `{path}`")]
	#[diagnostic(
		code(yalinker::bad_input),
		help("only buffered file contents can be linked, streamed contents are not supported")
	)]
	BadInput { path: String },

	#[error("asset lookup task failed: {0}")]
	#[diagnostic(code(yalinker::task))]
	Task(String),
}

pub type YalResult<T> = Result<T, YalError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
