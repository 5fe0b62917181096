//! Lines must not end with blanks.

use super::Rule;
use crate::lexer::{TokenKind, TokenStream};
use crate::models::{Severity, Violation};

pub struct TrailingSpace {
    pub severity: Severity,
}

impl Default for TrailingSpace {
    fn default() -> Self {
        Self {
            severity: Severity::Error,
        }
    }
}

impl Rule for TrailingSpace {
    fn id(&self) -> &'static str {
        "trailing-space"
    }

    fn check(&self, tokens: &TokenStream, out: &mut Vec<Violation>) {
        for tok in tokens.tokens() {
            if !matches!(tok.kind, TokenKind::Text | TokenKind::Whitespace) {
                continue;
            }
            let mut line = tok.line;
            let mut column = tok.column;
            let mut segments = tok.value.split('\n').peekable();
            while let Some(seg) = segments.next() {
                // The last segment continues on the same line as whatever follows.
                if segments.peek().is_none() {
                    break;
                }
                let seg = seg.strip_suffix('\r').unwrap_or(seg);
                let trimmed = seg.trim_end_matches([' ', '\t']);
                if trimmed.len() != seg.len() {
                    out.push(Violation::new(
                        tokens.source_path(),
                        line,
                        column + trimmed.chars().count(),
                        "A line should not end with blank space(s).",
                        self.severity,
                    ));
                }
                line += 1;
                column = 0;
            }
        }
    }
}
