//! Error taxonomy for a lint run.
//!
//! - `ConfigError`: bad severity/display/ruleset/reporter names, unsupported
//!   language versions and unreadable config files. Always fatal, raised
//!   before any template is tokenized.
//! - `SyntaxError`: a template the lexer could not read. Fatal only when the
//!   run does not tolerate syntax errors; otherwise it becomes a violation.
//! - `LintError`: everything that can abort a run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid severity limit '{0}' (expected ignore|info|warning|error)")]
    UnknownSeverity(String),
    #[error("invalid display mode '{0}' (expected all|blocking)")]
    UnknownDisplayMode(String),
    #[error("unknown ruleset '{name}' (available: {})", .available.join(", "))]
    UnknownRuleset { name: String, available: Vec<String> },
    #[error("unknown reporter '{name}' (available: {})", .available.join(", "))]
    UnknownReporter { name: String, available: Vec<String> },
    #[error("ruleset '{ruleset}' does not support language version {version} (supported: {supported})")]
    UnsupportedVersion {
        ruleset: String,
        version: u8,
        supported: String,
    },
    #[error("invalid config file {}: {message}", .path.display())]
    InvalidConfigFile { path: PathBuf, message: String },
    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// A template that could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} in {source_path} at line {line}, column {column}")]
pub struct SyntaxError {
    pub source_path: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(source_path: &str, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            source_path: source_path.to_string(),
            line,
            column,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LintError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write report: {0}")]
    Report(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display_keeps_location() {
        let e = SyntaxError::new("views/a.twig", 4, 10, "Unclosed \"block\"");
        assert_eq!(
            e.to_string(),
            "Unclosed \"block\" in views/a.twig at line 4, column 10"
        );
    }

    #[test]
    fn test_unknown_ruleset_lists_available() {
        let e = ConfigError::UnknownRuleset {
            name: "nope".into(),
            available: vec!["official".into(), "whitespace".into()],
        };
        assert_eq!(
            e.to_string(),
            "unknown ruleset 'nope' (available: official, whitespace)"
        );
    }

    #[test]
    fn test_lint_error_is_transparent_for_syntax() {
        let e: LintError = SyntaxError::new("a.twig", 1, 0, "boom").into();
        assert_eq!(e.to_string(), "boom in a.twig at line 1, column 0");
    }
}
