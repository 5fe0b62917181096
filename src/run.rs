//! End-to-end lint run over an `Effective` config.
//!
//! Every name in the config (severity, display, ruleset, reporter) is
//! resolved before discovery starts, so a bad value fails without touching
//! any template.

use crate::config::Effective;
use crate::discovery::{discover, load_sources};
use crate::error::{ConfigError, LintError};
use crate::gate::{decide_exit_code, filter_for_display, resolve_threshold, DisplayMode};
use crate::lexer::{Lexer, Tokenizer};
use crate::lint::{Linter, SyntaxErrors};
use crate::models::Violation;
use crate::output::{Reporter, ReporterRegistry};
use crate::ruleset::{Ruleset, RulesetRegistry};
use std::io::Write;

/// Validated run settings.
pub struct Plan {
    pub threshold: i8,
    pub display: DisplayMode,
    pub syntax_errors: SyntaxErrors,
    pub ruleset: Box<dyn Ruleset>,
    pub reporter: Box<dyn Reporter>,
}

pub fn prepare(
    eff: &Effective,
    rulesets: &RulesetRegistry,
    reporters: &ReporterRegistry,
) -> Result<Plan, ConfigError> {
    let threshold = resolve_threshold(&eff.severity)?;
    let display: DisplayMode = eff.display.parse()?;
    let ruleset = rulesets.resolve(&eff.ruleset, eff.language_version)?;
    let reporter = reporters.resolve(&eff.reporter)?;
    Ok(Plan {
        threshold,
        display,
        syntax_errors: SyntaxErrors::from_throw_flag(eff.throw_syntax_error),
        ruleset,
        reporter,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Everything the ruleset and tokenizer produced.
    pub violations: Vec<Violation>,
    /// What the reporter was given.
    pub displayed: Vec<Violation>,
    pub exit_code: i32,
}

/// Lint with the given plan and tokenizer, then render to `out`.
pub fn execute(
    eff: &Effective,
    plan: &Plan,
    tokenizer: &dyn Tokenizer,
    out: &mut dyn Write,
) -> Result<RunOutcome, LintError> {
    let groups = discover(&eff.paths, &eff.exclude, &eff.extensions)?;
    let sources = load_sources(&groups)?;
    let linter = Linter::new(tokenizer, plan.ruleset.as_ref(), plan.syntax_errors);
    let violations = linter.lint_all(&sources)?;

    let displayed = filter_for_display(&violations, plan.display, plan.threshold);
    plan.reporter
        .report(out, &displayed)
        .map_err(LintError::Report)?;
    let exit_code = decide_exit_code(&violations, plan.threshold);
    Ok(RunOutcome {
        violations,
        displayed,
        exit_code,
    })
}

/// Run with the stock registries and lexer.
pub fn run(eff: &Effective, out: &mut dyn Write) -> Result<RunOutcome, LintError> {
    let plan = prepare(eff, &RulesetRegistry::default(), &ReporterRegistry::default())?;
    execute(eff, &plan, &Lexer::new(), out)
}
