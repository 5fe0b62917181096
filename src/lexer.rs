//! Template tokenizer.
//!
//! `Tokenizer` is the seam the lint pipeline depends on; `Lexer` is the stock
//! implementation for Twig-style templates (`{{ }}`, `{% %}`, `{# #}` with the
//! `-`/`~` whitespace-control modifiers). Inside tags every run of blanks is
//! kept as a `Whitespace` token so spacing rules can inspect it.
//!
//! Positions: `line` is 1-based, `column` is a 0-based character offset.

use crate::error::SyntaxError;
use crate::models::Source;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Text,
    VarStart,
    VarEnd,
    BlockStart,
    BlockEnd,
    CommentStart,
    CommentEnd,
    Whitespace,
    Name,
    Number,
    String,
    Operator,
    Punctuation,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_value(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value == value
    }
}

/// Tokens of one template, tagged with the path violations should report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    source_path: String,
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(source_path: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            source_path: source_path.into(),
            tokens,
        }
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Next token after `idx` that is not whitespace.
    pub fn next_significant(&self, idx: usize) -> Option<(usize, &Token)> {
        self.tokens
            .iter()
            .enumerate()
            .skip(idx + 1)
            .find(|(_, t)| !t.is(TokenKind::Whitespace))
    }
}

/// Turns a source into tokens, or reports where it stopped making sense.
///
/// Implementations must be deterministic and free of side effects.
pub trait Tokenizer {
    fn tokenize(&self, source: &Source) -> Result<TokenStream, SyntaxError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }
}

impl Tokenizer for Lexer {
    fn tokenize(&self, source: &Source) -> Result<TokenStream, SyntaxError> {
        let mut scan = Scanner::new(source.content(), source.display_path());
        scan.run()?;
        Ok(TokenStream::new(source.display_path(), scan.tokens))
    }
}

const OPERATORS: [&str; 17] = [
    "..", "//", "**", "==", "!=", "<=", ">=", "??", "+", "-", "~", "*", "/", "%", "<", ">", "=",
];
const WORD_OPERATORS: [&str; 5] = ["and", "or", "not", "in", "is"];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tag {
    Variable,
    Block,
}

impl Tag {
    fn close(self) -> &'static str {
        match self {
            Tag::Variable => "}}",
            Tag::Block => "%}",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Tag::Variable => "variable",
            Tag::Block => "block",
        }
    }
}

struct Scanner<'a> {
    chars: Vec<char>,
    path: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(content: &str, path: &'a str) -> Self {
        Self {
            chars: content.chars().collect(),
            path,
            pos: 0,
            line: 1,
            column: 0,
            tokens: Vec::new(),
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars().enumerate().all(|(i, c)| self.peek(i) == Some(c))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Consume `n` chars, returning them and keeping line/column in step.
    fn take(&mut self, n: usize) -> String {
        let end = (self.pos + n).min(self.chars.len());
        let out: String = self.chars[self.pos..end].iter().collect();
        for c in &self.chars[self.pos..end] {
            if *c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
        out
    }

    fn push(&mut self, kind: TokenKind, value: String, line: usize, column: usize) {
        self.tokens.push(Token {
            kind,
            value,
            line,
            column,
        });
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.path, line, column, message)
    }

    fn run(&mut self) -> Result<(), SyntaxError> {
        while !self.at_end() {
            let (line, column) = (self.line, self.column);
            let mut len = 0;
            while self.pos + len < self.chars.len() && !self.opens_tag_at(self.pos + len) {
                len += 1;
            }
            if len > 0 {
                let text = self.take(len);
                self.push(TokenKind::Text, text, line, column);
                continue;
            }
            match self.peek(1) {
                Some('#') => self.lex_comment()?,
                Some('{') => self.lex_tag(Tag::Variable)?,
                _ => self.lex_tag(Tag::Block)?,
            }
        }
        let (line, column) = (self.line, self.column);
        self.push(TokenKind::Eof, String::new(), line, column);
        Ok(())
    }

    fn opens_tag_at(&self, at: usize) -> bool {
        self.chars.get(at) == Some(&'{')
            && matches!(self.chars.get(at + 1), Some('{') | Some('%') | Some('#'))
    }

    /// Length of an opening delimiter including an optional `-`/`~` modifier.
    fn open_len(&self) -> usize {
        match self.peek(2) {
            Some('-') | Some('~') => 3,
            _ => 2,
        }
    }

    /// Length of the closing delimiter at the cursor, if any.
    fn close_len(&self, close: &str) -> Option<usize> {
        if matches!(self.peek(0), Some('-') | Some('~')) {
            let rest: Vec<char> = close.chars().collect();
            if self.peek(1) == Some(rest[0]) && self.peek(2) == Some(rest[1]) {
                return Some(3);
            }
        }
        if self.starts_with(close) {
            return Some(2);
        }
        None
    }

    fn lex_comment(&mut self) -> Result<(), SyntaxError> {
        let (line, column) = (self.line, self.column);
        let n = self.open_len();
        let open = self.take(n);
        self.push(TokenKind::CommentStart, open, line, column);

        let (body_line, body_column) = (self.line, self.column);
        let mut len = 0;
        loop {
            let at = self.pos + len;
            if at >= self.chars.len() {
                return Err(self.error(line, column, "Unclosed comment"));
            }
            if self.chars[at] == '#' && self.chars.get(at + 1) == Some(&'}') {
                break;
            }
            len += 1;
        }
        // A trailing modifier belongs to the closing delimiter.
        let modifier = len > 0 && matches!(self.chars[self.pos + len - 1], '-' | '~');
        let body_len = if modifier { len - 1 } else { len };
        if body_len > 0 {
            let body = self.take(body_len);
            self.push(TokenKind::Text, body, body_line, body_column);
        }
        let (end_line, end_column) = (self.line, self.column);
        let close = self.take(if modifier { 3 } else { 2 });
        self.push(TokenKind::CommentEnd, close, end_line, end_column);
        Ok(())
    }

    fn lex_tag(&mut self, tag: Tag) -> Result<(), SyntaxError> {
        let (line, column) = (self.line, self.column);
        let n = self.open_len();
        let open = self.take(n);
        let (start_kind, end_kind) = match tag {
            Tag::Variable => (TokenKind::VarStart, TokenKind::VarEnd),
            Tag::Block => (TokenKind::BlockStart, TokenKind::BlockEnd),
        };
        self.push(start_kind, open, line, column);

        let mut brackets: Vec<(char, usize, usize)> = Vec::new();
        loop {
            if self.at_end() {
                if let Some((open, bl, bc)) = brackets.last() {
                    return Err(self.error(*bl, *bc, format!("Unclosed \"{}\"", open)));
                }
                return Err(self.error(line, column, format!("Unclosed \"{}\"", tag.name())));
            }
            let (tl, tc) = (self.line, self.column);
            if brackets.is_empty() {
                if let Some(n) = self.close_len(tag.close()) {
                    let close = self.take(n);
                    self.push(end_kind, close, tl, tc);
                    return Ok(());
                }
            }
            let c = self.chars[self.pos];
            if c.is_whitespace() {
                let mut len = 0;
                while self.peek(len).is_some_and(|c| c.is_whitespace()) {
                    len += 1;
                }
                let ws = self.take(len);
                self.push(TokenKind::Whitespace, ws, tl, tc);
            } else if c.is_ascii_alphabetic() || c == '_' {
                let mut len = 0;
                while self
                    .peek(len)
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    len += 1;
                }
                let word = self.take(len);
                let kind = if WORD_OPERATORS.contains(&word.as_str()) {
                    TokenKind::Operator
                } else {
                    TokenKind::Name
                };
                self.push(kind, word, tl, tc);
            } else if c.is_ascii_digit() {
                let mut len = 0;
                while self.peek(len).is_some_and(|c| c.is_ascii_digit()) {
                    len += 1;
                }
                if self.peek(len) == Some('.')
                    && self.peek(len + 1).is_some_and(|c| c.is_ascii_digit())
                {
                    len += 1;
                    while self.peek(len).is_some_and(|c| c.is_ascii_digit()) {
                        len += 1;
                    }
                }
                let num = self.take(len);
                self.push(TokenKind::Number, num, tl, tc);
            } else if c == '"' || c == '\'' {
                let mut len = 1;
                loop {
                    match self.peek(len) {
                        None => return Err(self.error(tl, tc, "Unclosed string")),
                        Some('\\') => len += 2,
                        Some(q) if q == c => {
                            len += 1;
                            break;
                        }
                        Some(_) => len += 1,
                    }
                }
                let s = self.take(len);
                self.push(TokenKind::String, s, tl, tc);
            } else if matches!(c, '(' | '[' | '{') {
                brackets.push((c, tl, tc));
                let p = self.take(1);
                self.push(TokenKind::Punctuation, p, tl, tc);
            } else if matches!(c, ')' | ']' | '}') {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match brackets.pop() {
                    Some((open, _, _)) if open == expected => {}
                    Some((open, bl, bc)) => {
                        return Err(self.error(bl, bc, format!("Unclosed \"{}\"", open)))
                    }
                    None => return Err(self.error(tl, tc, format!("Unexpected \"{}\"", c))),
                }
                let p = self.take(1);
                self.push(TokenKind::Punctuation, p, tl, tc);
            } else if let Some(op) = OPERATORS.iter().find(|op| self.starts_with(op)) {
                let op = self.take(op.chars().count());
                self.push(TokenKind::Operator, op, tl, tc);
            } else if matches!(c, '?' | ':' | '.' | ',' | '|') {
                let p = self.take(1);
                self.push(TokenKind::Punctuation, p, tl, tc);
            } else {
                return Err(self.error(tl, tc, format!("Unexpected character \"{}\"", c)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(content: &str) -> Result<TokenStream, SyntaxError> {
        Lexer::new().tokenize(&Source::new(content, "/abs/t.twig", "t.twig"))
    }

    fn kinds(ts: &TokenStream) -> Vec<TokenKind> {
        ts.tokens().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_text_and_variable() {
        let ts = lex("Hi {{ name }}!").unwrap();
        assert!(!ts.is_empty());
        assert_eq!(ts.source_path(), "t.twig");
        assert_eq!(
            kinds(&ts),
            vec![
                TokenKind::Text,
                TokenKind::VarStart,
                TokenKind::Whitespace,
                TokenKind::Name,
                TokenKind::Whitespace,
                TokenKind::VarEnd,
                TokenKind::Text,
                TokenKind::Eof,
            ]
        );
        let name = &ts.tokens()[3];
        assert_eq!((name.value.as_str(), name.line, name.column), ("name", 1, 6));
    }

    #[test]
    fn test_block_with_operators_and_strings() {
        let ts = lex("{% set x = a ~ 'b' %}").unwrap();
        let values: Vec<&str> = ts
            .tokens()
            .iter()
            .filter(|t| !t.is(TokenKind::Whitespace))
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(values, vec!["{%", "set", "x", "=", "a", "~", "'b'", "%}", ""]);
    }

    #[test]
    fn test_whitespace_control_modifiers() {
        let ts = lex("{%- if a -%}{{~ b ~}}").unwrap();
        let delims: Vec<&str> = ts
            .tokens()
            .iter()
            .filter(|t| {
                matches!(
                    t.kind,
                    TokenKind::BlockStart
                        | TokenKind::BlockEnd
                        | TokenKind::VarStart
                        | TokenKind::VarEnd
                )
            })
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(delims, vec!["{%-", "-%}", "{{~", "~}}"]);
    }

    #[test]
    fn test_comment_body_is_text() {
        let ts = lex("{# note -#}").unwrap();
        assert_eq!(
            kinds(&ts),
            vec![
                TokenKind::CommentStart,
                TokenKind::Text,
                TokenKind::CommentEnd,
                TokenKind::Eof
            ]
        );
        assert_eq!(ts.tokens()[2].value, "-#}");
    }

    #[test]
    fn test_positions_track_newlines() {
        let ts = lex("a\nb\n  {{ x }}").unwrap();
        let start = ts.tokens().iter().find(|t| t.is(TokenKind::VarStart)).unwrap();
        assert_eq!((start.line, start.column), (3, 2));
    }

    #[test]
    fn test_nested_braces_in_variable() {
        let ts = lex("{{ {a: 1}|json_encode }}").unwrap();
        assert!(ts.tokens().iter().any(|t| t.is_value(TokenKind::Name, "json_encode")));
        assert_eq!(ts.tokens().last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_unclosed_block_reports_opening_position() {
        let err = lex("line1\n\n\n   text {% if a").unwrap_err();
        assert_eq!(err, SyntaxError::new("t.twig", 4, 8, "Unclosed \"block\""));
    }

    #[test]
    fn test_unclosed_comment_and_string() {
        assert_eq!(lex("{# x").unwrap_err().message, "Unclosed comment");
        assert_eq!(lex("{{ 'abc }}").unwrap_err().message, "Unclosed string");
    }

    #[test]
    fn test_bracket_errors() {
        let err = lex("{{ foo(1 }}").unwrap_err();
        assert_eq!((err.message.as_str(), err.column), ("Unclosed \"(\"", 6));
        let err = lex("{{ foo) }}").unwrap_err();
        assert_eq!(err.message, "Unexpected \")\"");
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex("{{ a @ b }}").unwrap_err();
        assert_eq!(err.message, "Unexpected character \"@\"");
        assert_eq!((err.line, err.column), (1, 5));
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let src = "{% for i in 1..3 %}{{ i }}{% endfor %}";
        assert_eq!(lex(src).unwrap(), lex(src).unwrap());
    }
}
