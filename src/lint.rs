//! Lint orchestration: tokenize and validate each source in order.
//!
//! The tokenizer and ruleset are handed in by the caller. A syntax error
//! either aborts the run (strict) or is recorded as one error-level
//! violation for that file (tolerant). Nothing here prints.

use crate::error::SyntaxError;
use crate::lexer::Tokenizer;
use crate::models::{Source, Violation};
use crate::ruleset::Ruleset;

/// How a tokenizer failure is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrors {
    /// Record the error as a violation and move on.
    Tolerate,
    /// Abort the whole run with the error.
    Throw,
}

impl SyntaxErrors {
    pub fn from_throw_flag(throw: bool) -> Self {
        if throw {
            SyntaxErrors::Throw
        } else {
            SyntaxErrors::Tolerate
        }
    }
}

pub struct Linter<'a> {
    tokenizer: &'a dyn Tokenizer,
    ruleset: &'a dyn Ruleset,
    syntax_errors: SyntaxErrors,
}

impl<'a> Linter<'a> {
    pub fn new(
        tokenizer: &'a dyn Tokenizer,
        ruleset: &'a dyn Ruleset,
        syntax_errors: SyntaxErrors,
    ) -> Self {
        Self {
            tokenizer,
            ruleset,
            syntax_errors,
        }
    }

    /// Violations for one source, in rule emission order.
    pub fn lint_source(&self, source: &Source) -> Result<Vec<Violation>, SyntaxError> {
        match self.tokenizer.tokenize(source) {
            Ok(tokens) => {
                tracing::trace!(
                    file = source.display_path(),
                    path = %source.real_path().display(),
                    tokens = tokens.len(),
                    "tokenized"
                );
                Ok(self.ruleset.validate(&tokens))
            }
            Err(e) => match self.syntax_errors {
                SyntaxErrors::Throw => Err(e),
                SyntaxErrors::Tolerate => {
                    tracing::debug!(
                    path = %source.real_path().display(),
                    error = %e,
                    "syntax error recorded as violation"
                );
                    Ok(vec![Violation::from(e)])
                }
            },
        }
    }

    /// Violations for all sources, concatenated in the order given.
    ///
    /// In strict mode the first syntax error wins and no violations are
    /// returned for any file.
    pub fn lint_all<'s, I>(&self, sources: I) -> Result<Vec<Violation>, SyntaxError>
    where
        I: IntoIterator<Item = &'s Source>,
    {
        let mut violations = Vec::new();
        let mut files = 0usize;
        for source in sources {
            let found = self.lint_source(source)?;
            tracing::debug!(file = source.display_path(), violations = found.len(), "linted");
            violations.extend(found);
            files += 1;
        }
        tracing::info!(files, violations = violations.len(), "lint complete");
        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, Token, TokenKind, TokenStream};
    use crate::models::Severity;
    use crate::ruleset::RulesetRegistry;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// One violation per `Text` token, so output order is easy to follow.
    struct PerText {
        severity: Severity,
    }

    impl Ruleset for PerText {
        fn name(&self) -> &str {
            "per-text"
        }

        fn validate(&self, tokens: &TokenStream) -> Vec<Violation> {
            tokens
                .tokens()
                .iter()
                .filter(|t| t.is(TokenKind::Text))
                .map(|t| {
                    Violation::new(
                        tokens.source_path(),
                        t.line,
                        t.column,
                        t.value.clone(),
                        self.severity,
                    )
                })
                .collect()
        }
    }

    /// Fails on sources whose content starts with `!`; counts calls.
    struct Picky {
        calls: Cell<usize>,
    }

    impl Tokenizer for Picky {
        fn tokenize(&self, source: &Source) -> Result<TokenStream, SyntaxError> {
            self.calls.set(self.calls.get() + 1);
            if source.content().starts_with('!') {
                return Err(SyntaxError::new(source.display_path(), 4, 10, "bad token"));
            }
            let tok = Token {
                kind: TokenKind::Text,
                value: source.content().to_string(),
                line: 1,
                column: 0,
            };
            Ok(TokenStream::new(source.display_path(), vec![tok]))
        }
    }

    fn src(display: &str, content: &str) -> Source {
        Source::new(content, format!("/abs/{}", display), display)
    }

    #[test]
    fn test_order_follows_files_then_rules() {
        let sources = vec![src("a.twig", "x{{ a }}y"), src("b.twig", "z")];
        let rs = PerText {
            severity: Severity::Info,
        };
        let lexer = Lexer::new();
        let out = Linter::new(&lexer, &rs, SyntaxErrors::Tolerate)
            .lint_all(&sources)
            .unwrap();
        let got: Vec<(&str, &str)> = out
            .iter()
            .map(|v| (v.source_path.as_str(), v.message.as_str()))
            .collect();
        assert_eq!(got, vec![("a.twig", "x"), ("a.twig", "y"), ("b.twig", "z")]);
    }

    #[test]
    fn test_tolerant_mode_records_syntax_error() {
        let sources = vec![
            src("a.twig", "ok"),
            src("b.twig", "!broken"),
            src("c.twig", "fine"),
        ];
        let tok = Picky { calls: Cell::new(0) };
        let rs = PerText {
            severity: Severity::Warning,
        };
        let out = Linter::new(&tok, &rs, SyntaxErrors::Tolerate)
            .lint_all(&sources)
            .unwrap();
        assert_eq!(
            out,
            vec![
                Violation::new("a.twig", 1, 0, "ok", Severity::Warning),
                Violation::new("b.twig", 4, 10, "bad token", Severity::Error),
                Violation::new("c.twig", 1, 0, "fine", Severity::Warning),
            ]
        );
        assert_eq!(tok.calls.get(), 3);
    }

    #[test]
    fn test_strict_mode_aborts_on_first_syntax_error() {
        let sources = vec![
            src("a.twig", "ok"),
            src("b.twig", "!broken"),
            src("c.twig", "fine"),
        ];
        let tok = Picky { calls: Cell::new(0) };
        let rs = PerText {
            severity: Severity::Warning,
        };
        let err = Linter::new(&tok, &rs, SyntaxErrors::Throw)
            .lint_all(&sources)
            .unwrap_err();
        assert_eq!(err, SyntaxError::new("b.twig", 4, 10, "bad token"));
        // files after the failing one are never tokenized
        assert_eq!(tok.calls.get(), 2);
    }

    #[test]
    fn test_real_lexer_syntax_error_in_tolerant_run() {
        let rs = RulesetRegistry::default().resolve("official", 3).unwrap();
        let lexer = Lexer::new();
        let sources = vec![src("bad.twig", "a\nb\nc\n   text {% if")];
        let out = Linter::new(&lexer, rs.as_ref(), SyntaxErrors::Tolerate)
            .lint_all(&sources)
            .unwrap();
        assert_eq!(
            out,
            vec![Violation::new("bad.twig", 4, 8, "Unclosed \"block\"", Severity::Error)]
        );
    }

    #[test]
    fn test_no_sources_no_violations() {
        let rs = RulesetRegistry::default().resolve("official", 3).unwrap();
        let lexer = Lexer::new();
        let out = Linter::new(&lexer, rs.as_ref(), SyntaxErrors::Throw)
            .lint_all(&Vec::<Source>::new())
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_throw_flag_mapping() {
        assert_eq!(SyntaxErrors::from_throw_flag(true), SyntaxErrors::Throw);
        assert_eq!(SyntaxErrors::from_throw_flag(false), SyntaxErrors::Tolerate);
    }
}
