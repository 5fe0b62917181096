//! Variables assigned with `set` must be snake_case.

use super::Rule;
use crate::lexer::{TokenKind, TokenStream};
use crate::models::{Severity, Violation};
use regex::Regex;
use std::sync::OnceLock;

fn snake_case() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^_?[a-z][a-z0-9_]*$").expect("valid regex"))
}

pub struct LowerCaseVariable {
    pub severity: Severity,
}

impl Default for LowerCaseVariable {
    fn default() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }
}

impl Rule for LowerCaseVariable {
    fn id(&self) -> &'static str {
        "lower-case-variable"
    }

    fn check(&self, tokens: &TokenStream, out: &mut Vec<Violation>) {
        let toks = tokens.tokens();
        for (i, tok) in toks.iter().enumerate() {
            if !tok.is(TokenKind::BlockStart) {
                continue;
            }
            let Some((tag_idx, tag)) = tokens.next_significant(i) else {
                continue;
            };
            if !tag.is_value(TokenKind::Name, "set") {
                continue;
            }
            // `{% set a, b = ... %}` declares several names before `=`.
            let mut idx = tag_idx;
            while let Some((next_idx, next)) = tokens.next_significant(idx) {
                match next.kind {
                    TokenKind::Name => {
                        if !snake_case().is_match(&next.value) {
                            out.push(Violation::new(
                                tokens.source_path(),
                                next.line,
                                next.column,
                                format!(
                                    "The \"{}\" variable should be in lower case (use _ as a separator).",
                                    next.value
                                ),
                                self.severity,
                            ));
                        }
                    }
                    TokenKind::Punctuation if next.value == "," => {}
                    _ => break,
                }
                idx = next_idx;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::run_rule;

    #[test]
    fn test_snake_case_passes() {
        let found = run_rule(
            &LowerCaseVariable::default(),
            "{% set user_name = 'a' %}{{ userName }}",
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_camel_case_set_is_reported() {
        let found = run_rule(&LowerCaseVariable::default(), "\n{% set userName = 'a' %}");
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].line, found[0].column), (2, 7));
        assert_eq!(found[0].severity, Severity::Warning);
        assert_eq!(
            found[0].message,
            "The \"userName\" variable should be in lower case (use _ as a separator)."
        );
    }

    #[test]
    fn test_multiple_targets() {
        let found = run_rule(&LowerCaseVariable::default(), "{% set a, bB, Cc = 1, 2, 3 %}");
        let names: Vec<usize> = found.iter().map(|v| v.column).collect();
        assert_eq!(names, vec![10, 14]);
    }

    #[test]
    fn test_block_form_set() {
        let found = run_rule(&LowerCaseVariable::default(), "{% set Body %}x{% endset %}");
        assert_eq!(found.len(), 1);
    }
}
