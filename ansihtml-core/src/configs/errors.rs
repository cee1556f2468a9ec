use std::ops::Range;

use crossterm::style::Stylize;
use miette::{NamedSource, SourceSpan};

/// A wrapper around error types that may arise from attempting to parse a
/// config file.
///
/// [`ConfigError::AlreadyInitialized`] should never arise in normal use; it
/// only fires if `initialize_config()` runs twice in one process.
#[derive(Debug, miette::Diagnostic, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    TomlError(#[from] TomlError),
    #[error(
        "Config already initialized.\nPlease report the bug to {}",
        "https://github.com/ansihtml/ansihtml".bold()
    )]
    AlreadyInitialized,
}

/// A wrapper around [`toml::de::Error`] to print custom error messages with
/// [`miette`], pointing at the offending span of `config.toml`.
#[derive(thiserror::Error, miette::Diagnostic, Debug)]
#[error("{}", "Error reading config file".red())]
#[diagnostic(
    help("{}", self.msg.split_once(',').unwrap_or(("", self.msg.as_str())).1.trim())
)]
pub struct TomlError {
    #[label("{}", self.msg.split_once(',').unwrap_or((self.msg.as_str(), "")).0.trim())]
    at: SourceSpan,

    #[source_code]
    src: NamedSource<String>,

    msg: String,
}

impl TomlError {
    pub(crate) fn new(span: Range<usize>, source: String, message: String) -> Self {
        let at: SourceSpan = (span.start, span.end - span.start).into();
        Self {
            at,
            src: NamedSource::new("config.toml", source),
            msg: message,
        }
    }
}
