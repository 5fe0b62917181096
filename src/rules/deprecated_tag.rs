//! Tags removed from the template language in a given major version.

use super::Rule;
use crate::lexer::{TokenKind, TokenStream};
use crate::models::{Severity, Violation};

/// (tag, major version that removed it, replacement hint)
const REMOVED_TAGS: [(&str, u8, &str); 2] = [
    ("spaceless", 3, "use the \"spaceless\" filter or whitespace control"),
    ("filter", 3, "use the \"apply\" tag"),
];

pub struct DeprecatedTag {
    pub version: u8,
    pub severity: Severity,
}

impl DeprecatedTag {
    pub fn new(version: u8) -> Self {
        Self {
            version,
            severity: Severity::Warning,
        }
    }
}

impl Rule for DeprecatedTag {
    fn id(&self) -> &'static str {
        "deprecated-tag"
    }

    fn check(&self, tokens: &TokenStream, out: &mut Vec<Violation>) {
        for (i, tok) in tokens.tokens().iter().enumerate() {
            if !tok.is(TokenKind::BlockStart) {
                continue;
            }
            let Some((_, tag)) = tokens.next_significant(i) else {
                continue;
            };
            if !tag.is(TokenKind::Name) {
                continue;
            }
            let removed = REMOVED_TAGS
                .iter()
                .find(|(name, since, _)| *name == tag.value && self.version >= *since);
            if let Some((name, since, hint)) = removed {
                out.push(Violation::new(
                    tokens.source_path(),
                    tag.line,
                    tag.column,
                    format!(
                        "The \"{}\" tag is not available since version {}; {}.",
                        name, since, hint
                    ),
                    self.severity,
                ));
            }
        }
    }
}
