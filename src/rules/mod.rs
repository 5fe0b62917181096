//! Stock rule checks.
//!
//! A rule looks at one token stream and appends what it finds. Rules carry
//! configuration only (severity, language version); they never remember
//! anything between calls.

pub mod delimiter_spacing;
pub mod deprecated_tag;
pub mod lower_case_variable;
pub mod trailing_space;

use crate::lexer::TokenStream;
use crate::models::Violation;

pub use delimiter_spacing::DelimiterSpacing;
pub use deprecated_tag::DeprecatedTag;
pub use lower_case_variable::LowerCaseVariable;
pub use trailing_space::TrailingSpace;

pub trait Rule: Send + Sync {
    /// Stable identifier, e.g. `trailing-space`.
    fn id(&self) -> &'static str;
    fn check(&self, tokens: &TokenStream, out: &mut Vec<Violation>);
}

#[cfg(test)]
pub(crate) fn run_rule(rule: &dyn Rule, content: &str) -> Vec<Violation> {
    use crate::lexer::{Lexer, Tokenizer};
    use crate::models::Source;
    let ts = Lexer::new()
        .tokenize(&Source::new(content, "/abs/t.twig", "t.twig"))
        .unwrap();
    let mut out = Vec::new();
    rule.check(&ts, &mut out);
    out
}
