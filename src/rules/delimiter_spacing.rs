//! Exactly one space inside `{{ }}` and `{% %}`.

use super::Rule;
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::models::{Severity, Violation};

pub struct DelimiterSpacing {
    pub spaces: usize,
    pub severity: Severity,
}

impl Default for DelimiterSpacing {
    fn default() -> Self {
        Self {
            spaces: 1,
            severity: Severity::Error,
        }
    }
}

impl DelimiterSpacing {
    fn expect(
        &self,
        ws: Option<&Token>,
        at: &Token,
        position: &str,
        out: &mut Vec<Violation>,
        path: &str,
    ) {
        // Padding that spans a line break is left to layout.
        let ok = match ws {
            Some(t) if t.is(TokenKind::Whitespace) => {
                t.value.contains('\n')
                    || (t.value.chars().count() == self.spaces && t.value.chars().all(|c| c == ' '))
            }
            _ => self.spaces == 0,
        };
        if !ok {
            out.push(Violation::new(
                path,
                at.line,
                at.column,
                format!(
                    "There should be {} space(s) {} \"{}\".",
                    self.spaces, position, at.value
                ),
                self.severity,
            ));
        }
    }
}

impl Rule for DelimiterSpacing {
    fn id(&self) -> &'static str {
        "delimiter-spacing"
    }

    fn check(&self, tokens: &TokenStream, out: &mut Vec<Violation>) {
        let toks = tokens.tokens();
        for (i, tok) in toks.iter().enumerate() {
            match tok.kind {
                TokenKind::VarStart | TokenKind::BlockStart => {
                    self.expect(toks.get(i + 1), tok, "after", out, tokens.source_path());
                }
                TokenKind::VarEnd | TokenKind::BlockEnd => {
                    let prev = i.checked_sub(1).and_then(|p| toks.get(p));
                    self.expect(prev, tok, "before", out, tokens.source_path());
                }
                _ => {}
            }
        }
    }
}
