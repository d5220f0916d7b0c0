//! Coarse tokens over the code portions of a span stream.
//!
//! Comments are skipped, each literal becomes one opaque token, and code is
//! split into identifiers, numbers and punctuation. That is all the
//! declaration matcher needs; there is no attempt at a real grammar.

use crate::types::{Span, SpanKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    Punct,
    Literal,
}

#[derive(Debug, Clone, Copy)]
pub struct Token<'s> {
    pub kind: TokenKind,
    pub text: &'s str,
    pub start: usize,
    pub end: usize,
    /// A line break sits between this token and the previous one.
    pub newline_before: bool,
}

impl Token<'_> {
    pub fn is_ident(&self) -> bool {
        self.kind == TokenKind::Ident
    }

    /// Punctuation with exactly this text.
    pub fn is(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == punct
    }
}

const TWO_CHAR_PUNCT: &[&str] = &["::", "->", "=>"];

pub struct Tokens<'a> {
    source: &'a str,
    spans: &'a [Span],
    idx: usize,
    pos: usize,
    limit: usize,
    newline: bool,
}

impl<'a> Tokens<'a> {
    /// Tokens starting at byte `from`, stopping before byte `limit`.
    pub fn new(source: &'a str, spans: &'a [Span], from: usize, limit: usize) -> Self {
        Self {
            source,
            spans,
            idx: spans.partition_point(|s| s.end <= from),
            pos: from,
            limit: limit.min(source.len()),
            newline: false,
        }
    }

    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) -> Token<'a> {
        self.pos = end;
        Token {
            kind,
            text: &self.source[start..end],
            start,
            end,
            newline_before: std::mem::take(&mut self.newline),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if self.pos >= self.limit {
                return None;
            }
            let span = *self.spans.get(self.idx)?;
            if self.pos >= span.end {
                self.idx += 1;
                continue;
            }
            self.pos = self.pos.max(span.start);

            match span.kind {
                SpanKind::LineComment | SpanKind::BlockComment => {
                    self.pos = span.end;
                    self.idx += 1;
                }
                SpanKind::StringLiteral | SpanKind::CharLiteral => {
                    self.idx += 1;
                    return Some(self.emit(TokenKind::Literal, span.start, span.end));
                }
                SpanKind::Code => {
                    let rest = &self.source[self.pos..span.end];
                    let Some(c) = rest.chars().next() else {
                        self.idx += 1;
                        continue;
                    };
                    if c.is_whitespace() {
                        self.newline |= c == '\n';
                        self.pos += c.len_utf8();
                        continue;
                    }
                    let (kind, len) = lex(rest, c);
                    let start = self.pos;
                    return Some(self.emit(kind, start, start + len));
                }
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Kind and byte length of the token at the start of `rest`.
fn lex(rest: &str, c: char) -> (TokenKind, usize) {
    if is_ident_start(c) {
        let len = rest.find(|ch: char| !is_ident_continue(ch)).unwrap_or(rest.len());
        if &rest[..len] == "operator" {
            return (TokenKind::Ident, len + operator_suffix(&rest[len..]));
        }
        return (TokenKind::Ident, len);
    }
    if c.is_ascii_digit() {
        let len = rest
            .find(|ch: char| !(ch.is_alphanumeric() || ch == '.' || ch == '_'))
            .unwrap_or(rest.len());
        return (TokenKind::Number, len);
    }
    if let Some(p) = TWO_CHAR_PUNCT.iter().find(|p| rest.starts_with(**p)) {
        return (TokenKind::Punct, p.len());
    }
    (TokenKind::Punct, c.len_utf8())
}

/// Length of the symbol glued onto `operator` (`==`, `()`, `[]`, `<<=`).
fn operator_suffix(after: &str) -> usize {
    let trimmed = after.trim_start();
    let ws = after.len() - trimmed.len();
    for fixed in ["()", "[]"] {
        if trimmed.starts_with(fixed) {
            return ws + fixed.len();
        }
    }
    let sym = trimmed
        .find(|ch: char| !ch.is_ascii_punctuation() || ch == '(')
        .unwrap_or(trimmed.len());
    if sym == 0 { 0 } else { ws + sym }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::LanguageProfile;
    use crate::scanner::Scanner;
    use pretty_assertions::assert_eq;

    fn texts(source: &str) -> Vec<String> {
        let profile = LanguageProfile::cpp();
        let spans: Vec<Span> = Scanner::new(source, &profile).collect();
        Tokens::new(source, &spans, 0, source.len())
            .map(|t| t.text.to_string())
            .collect()
    }

    #[test]
    fn splits_code_and_skips_comments() {
        assert_eq!(
            texts("int add(int a /* first */, int b) // tail\n{"),
            vec!["int", "add", "(", "int", "a", ",", "int", "b", ")", "{"]
        );
    }

    #[test]
    fn literals_are_single_tokens() {
        assert_eq!(
            texts(r#"extern "C" { char c = '{'; }"#),
            vec!["extern", "\"C\"", "{", "char", "c", "=", "'{'", ";", "}"]
        );
    }

    #[test]
    fn scope_and_arrow_are_one_token() {
        assert_eq!(
            texts("std::string f() -> int"),
            vec!["std", "::", "string", "f", "(", ")", "->", "int"]
        );
    }

    #[test]
    fn operator_names_are_glued() {
        assert_eq!(
            texts("bool operator==(const A&) const; void operator()(int);"),
            vec![
                "bool", "operator==", "(", "const", "A", "&", ")", "const", ";", "void",
                "operator()", "(", "int", ")", ";"
            ]
        );
    }

    #[test]
    fn tracks_line_breaks() {
        let source = "a b\n  c";
        let profile = LanguageProfile::go();
        let spans: Vec<Span> = Scanner::new(source, &profile).collect();
        let breaks: Vec<bool> = Tokens::new(source, &spans, 0, source.len())
            .map(|t| t.newline_before)
            .collect();
        assert_eq!(breaks, vec![false, false, true]);
    }

    #[test]
    fn respects_limit() {
        let source = "one two three";
        let profile = LanguageProfile::c();
        let spans: Vec<Span> = Scanner::new(source, &profile).collect();
        let got: Vec<&str> = Tokens::new(source, &spans, 4, 8).map(|t| t.text).collect();
        assert_eq!(got, vec!["two"]);
    }
}
