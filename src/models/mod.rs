//! Shared data models for sources, violations and severities.

pub mod source;

pub use source::Source;

use serde::Serialize;
use std::fmt;

/// Violation severity. Ordered `Ignore < Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ignore,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Ignore,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Numeric rank used by the severity gate.
    pub fn ordinal(self) -> i8 {
        match self {
            Severity::Ignore => 0,
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Error => 3,
        }
    }

    pub fn from_name(name: &str) -> Option<Severity> {
        match name {
            "ignore" => Some(Severity::Ignore),
            "info" => Some(Severity::Info),
            "warning" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ignore => "ignore",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single reported issue, located by display path, line and column.
pub struct Violation {
    pub source_path: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub severity: Severity,
}

impl Violation {
    pub fn new(
        source_path: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            line,
            column,
            message: message.into(),
            severity,
        }
    }
}

impl From<crate::error::SyntaxError> for Violation {
    /// Recovered syntax errors are reported at error severity.
    fn from(e: crate::error::SyntaxError) -> Self {
        Violation {
            source_path: e.source_path,
            line: e.line,
            column: e.column,
            message: e.message,
            severity: Severity::Error,
        }
    }
}
