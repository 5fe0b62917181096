//! Reporters: render the displayed violations.
//!
//! Supports `console` (default), `json`, `emacs`, `checkstyle` and `github`.
//! Reporters write to any `io::Write`, selected by name through
//! `ReporterRegistry`.

use crate::error::ConfigError;
use crate::models::{Severity, Violation};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::collections::BTreeMap;
use std::io::{self, Write};

pub trait Reporter: Send + Sync {
    fn report(&self, out: &mut dyn Write, violations: &[Violation]) -> io::Result<()>;
}

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Violations bucketed per file, files in first-seen order.
fn group_by_file(violations: &[Violation]) -> Vec<(&str, Vec<&Violation>)> {
    let mut groups: Vec<(&str, Vec<&Violation>)> = Vec::new();
    for v in violations {
        match groups.iter_mut().find(|(f, _)| *f == v.source_path) {
            Some((_, list)) => list.push(v),
            None => groups.push((v.source_path.as_str(), vec![v])),
        }
    }
    groups
}

pub struct ConsoleReporter {
    pub color: bool,
}

impl ConsoleReporter {
    fn badge(&self, severity: Severity) -> String {
        let (icon, label) = match severity {
            Severity::Error => ("✖", "⟦error⟧"),
            Severity::Warning => ("▲", "⟦warn⟧"),
            Severity::Info => ("◆", "⟦info⟧"),
            Severity::Ignore => ("·", "⟦ignore⟧"),
        };
        if !self.color {
            return format!("{} {}", icon, label);
        }
        match severity {
            Severity::Error => format!("{} {}", icon.red(), label.red().bold()),
            Severity::Warning => format!("{} {}", icon.yellow(), label.yellow().bold()),
            Severity::Info => format!("{} {}", icon.blue(), label.blue().bold()),
            Severity::Ignore => format!("{} {}", icon.bright_black(), label.bright_black()),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, out: &mut dyn Write, violations: &[Violation]) -> io::Result<()> {
        for (file, list) in group_by_file(violations) {
            if self.color {
                writeln!(out, "{}", file.bold())?;
            } else {
                writeln!(out, "{}", file)?;
            }
            for v in list {
                writeln!(
                    out,
                    "  {} l.{} c.{} — {}",
                    self.badge(v.severity),
                    v.line,
                    v.column,
                    v.message
                )?;
            }
        }
        let count = |s: Severity| violations.iter().filter(|v| v.severity == s).count();
        let summary = if violations.is_empty() {
            "No violation found.".to_string()
        } else {
            format!(
                "— Summary — {} violation(s): errors={} warnings={} infos={} ignored={}",
                violations.len(),
                count(Severity::Error),
                count(Severity::Warning),
                count(Severity::Info),
                count(Severity::Ignore)
            )
        };
        if self.color {
            writeln!(out, "{}", summary.bold())
        } else {
            writeln!(out, "{}", summary)
        }
    }
}

pub struct JsonReporter;

/// Compose the JSON report (pure) for testing purposes.
pub fn compose_json(violations: &[Violation]) -> JsonVal {
    let files: Vec<JsonVal> = group_by_file(violations)
        .into_iter()
        .map(|(file, list)| {
            let items: Vec<JsonVal> = list
                .iter()
                .map(|v| {
                    json!({
                        "line": v.line,
                        "column": v.column,
                        "severity": v.severity.ordinal(),
                        "type": v.severity.as_str(),
                        "message": v.message,
                    })
                })
                .collect();
            json!({"file": file, "violations": items})
        })
        .collect();
    json!({"failures": violations.len(), "files": files})
}

impl Reporter for JsonReporter {
    fn report(&self, out: &mut dyn Write, violations: &[Violation]) -> io::Result<()> {
        let body = serde_json::to_string_pretty(&compose_json(violations))?;
        writeln!(out, "{}", body)
    }
}

pub struct EmacsReporter;

impl Reporter for EmacsReporter {
    fn report(&self, out: &mut dyn Write, violations: &[Violation]) -> io::Result<()> {
        for v in violations {
            writeln!(
                out,
                "{}:{}:{}: {} - {}",
                v.source_path, v.line, v.column, v.severity, v.message
            )?;
        }
        Ok(())
    }
}

pub struct CheckstyleReporter;

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl Reporter for CheckstyleReporter {
    fn report(&self, out: &mut dyn Write, violations: &[Violation]) -> io::Result<()> {
        writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(out, "<checkstyle>")?;
        for (file, list) in group_by_file(violations) {
            writeln!(out, "  <file name=\"{}\">", xml_escape(file))?;
            for v in list {
                writeln!(
                    out,
                    "    <error line=\"{}\" column=\"{}\" severity=\"{}\" message=\"{}\" source=\"tmplint\"/>",
                    v.line,
                    v.column,
                    v.severity,
                    xml_escape(&v.message)
                )?;
            }
            writeln!(out, "  </file>")?;
        }
        writeln!(out, "</checkstyle>")
    }
}

pub struct GithubReporter;

fn gh_escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn gh_escape_property(s: &str) -> String {
    gh_escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

impl Reporter for GithubReporter {
    fn report(&self, out: &mut dyn Write, violations: &[Violation]) -> io::Result<()> {
        for v in violations {
            let level = match v.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info | Severity::Ignore => "notice",
            };
            writeln!(
                out,
                "::{} file={},line={},col={}::{}",
                level,
                gh_escape_property(&v.source_path),
                v.line,
                v.column,
                gh_escape_data(&v.message)
            )?;
        }
        Ok(())
    }
}

pub type ReporterFactory = fn() -> Box<dyn Reporter>;

pub struct ReporterRegistry {
    factories: BTreeMap<String, ReporterFactory>,
}

impl Default for ReporterRegistry {
    fn default() -> Self {
        let mut reg = Self {
            factories: BTreeMap::new(),
        };
        reg.register("console", || Box::new(ConsoleReporter { color: use_colors() }));
        reg.register("json", || Box::new(JsonReporter));
        reg.register("emacs", || Box::new(EmacsReporter));
        reg.register("checkstyle", || Box::new(CheckstyleReporter));
        reg.register("github", || Box::new(GithubReporter));
        reg
    }
}

impl ReporterRegistry {
    pub fn register(&mut self, name: &str, factory: ReporterFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    pub fn resolve(&self, name: &str) -> Result<Box<dyn Reporter>, ConfigError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| ConfigError::UnknownReporter {
                name: name.to_string(),
                available: self.names(),
            })
    }
}
