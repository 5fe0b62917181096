//! CLI argument parsing via `clap`.

use crate::config::CliOverrides;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tmplint",
    version,
    about = "Template linter",
    long_about = "tmplint — lint template files against a ruleset and gate CI on violation severity.\n\nConfiguration precedence: CLI > tmplint.toml > defaults.",
    after_help = "Examples:\n  tmplint lint templates/\n  tmplint lint templates/ --exclude vendor --severity error --display blocking\n  tmplint lint page.twig --reporter json --throw-syntax-error",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current tmplint version.")]
    Version,
    /// List available rulesets and reporters
    #[command(
        about = "List rulesets and reporters",
        long_about = "Print the names accepted by --ruleset and --reporter."
    )]
    Rulesets,
    /// Lint templates
    #[command(
        about = "Run lint checks",
        long_about = "Tokenize every template found under PATHS, validate it with the selected ruleset and report violations. Exits 1 when any violation is at or above --severity.",
        after_help = "Examples:\n  tmplint lint\n  tmplint lint views/ --severity info --reporter emacs"
    )]
    Lint(LintArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct LintArgs {
    #[arg(help = "Paths to scan for templates (default: .)")]
    pub paths: Vec<String>,
    #[arg(short = 't', long, help = "Major version of the template language (default: 3)")]
    pub language_version: Option<u8>,
    #[arg(long, help = "Folder to exclude below a scanned path (repeatable)")]
    pub exclude: Vec<String>,
    #[arg(long = "ext", help = "Template file extension to scan (repeatable, default: twig)")]
    pub extensions: Vec<String>,
    #[arg(short, long, help = "Lowest blocking severity: ignore|info|warning|error (default: warning)")]
    pub severity: Option<String>,
    #[arg(short, long, help = "Reporter: console|json|emacs|checkstyle|github (default: console)")]
    pub reporter: Option<String>,
    #[arg(short, long, help = "Violations to display: all|blocking (default: all)")]
    pub display: Option<String>,
    #[arg(short = 'e', long, action = clap::ArgAction::SetTrue, help = "Abort on the first template syntax error instead of reporting it")]
    pub throw_syntax_error: bool,
    #[arg(long, help = "Ruleset name (default: official)")]
    pub ruleset: Option<String>,
    #[arg(long, help = "Project root used to find tmplint.toml (default: current dir)")]
    pub project_root: Option<String>,
}

impl From<LintArgs> for CliOverrides {
    fn from(a: LintArgs) -> Self {
        CliOverrides {
            project_root: a.project_root,
            paths: a.paths,
            exclude: a.exclude,
            extensions: a.extensions,
            severity: a.severity,
            display: a.display,
            reporter: a.reporter,
            ruleset: a.ruleset,
            language_version: a.language_version,
            throw_syntax_error: a.throw_syntax_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lint_flags() {
        let cli = Cli::try_parse_from([
            "tmplint", "lint", "a", "b", "-t", "2", "--exclude", "vendor", "-s", "error", "-r",
            "json", "-d", "blocking", "-e", "--ruleset", "whitespace",
        ])
        .unwrap();
        let Commands::Lint(args) = cli.cmd else {
            panic!("expected lint");
        };
        let o: CliOverrides = args.into();
        assert_eq!(o.paths, vec!["a", "b"]);
        assert_eq!(o.language_version, Some(2));
        assert_eq!(o.exclude, vec!["vendor"]);
        assert_eq!(o.severity.as_deref(), Some("error"));
        assert_eq!(o.reporter.as_deref(), Some("json"));
        assert_eq!(o.display.as_deref(), Some("blocking"));
        assert!(o.throw_syntax_error);
        assert_eq!(o.ruleset.as_deref(), Some("whitespace"));
    }

    #[test]
    fn test_lint_without_flags_leaves_defaults_to_config() {
        let cli = Cli::try_parse_from(["tmplint", "lint"]).unwrap();
        let Commands::Lint(args) = cli.cmd else {
            panic!("expected lint");
        };
        assert!(args.paths.is_empty());
        assert!(args.severity.is_none());
        assert!(!args.throw_syntax_error);
    }
}
