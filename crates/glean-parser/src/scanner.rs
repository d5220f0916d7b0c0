//! Literal-aware scanner.
//!
//! Walks the source once and labels every byte as code, string literal,
//! char literal, line comment or block comment. The produced spans tile
//! `[0, len)` exactly, in order. Comment tokens inside literals never open a
//! comment, and quotes inside comments never open a literal.

use crate::profile::{LanguageProfile, RawStringStyle};
use crate::types::{Diagnostic, DiagnosticKind, Span, SpanKind};

/// Longest delimiter C++ allows in `R"delim(...)delim"`.
const MAX_RAW_DELIMITER: usize = 16;

/// What starts at a given position while in code.
#[derive(Debug, Clone)]
enum Opener {
    Block,
    Line,
    Str { delim: char, raw: bool },
    /// Prefixed raw string: everything up to `close` is literal text.
    PrefixedRaw { open_len: usize, close: String },
    Char { delim: char },
}

/// Lazy single-pass iterator of [`Span`]s over one source buffer.
///
/// Diagnostics for literals or comments left open at end of input are
/// collected while iterating and read back with [`Scanner::into_diagnostics`].
pub struct Scanner<'a> {
    source: &'a str,
    profile: &'a LanguageProfile,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub const fn new(source: &'a str, profile: &'a LanguageProfile) -> Self {
        Self {
            source,
            profile,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics gathered while iterating. Only complete once the
    /// iterator is exhausted.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn report(&mut self, kind: DiagnosticKind, offset: usize) {
        self.diagnostics.push(Diagnostic {
            kind,
            offset,
            line: 0,
        });
    }

    fn opener_at(&self, at: usize) -> Option<Opener> {
        let rest = &self.source[at..];
        if let Some(block) = &self.profile.block_comment {
            if rest.starts_with(block.open.as_str()) {
                return Some(Opener::Block);
            }
        }
        if let Some(prefix) = &self.profile.line_comment {
            if rest.starts_with(prefix.as_str()) {
                return Some(Opener::Line);
            }
        }
        if let Some(opener) = self.prefixed_raw_at(at) {
            return Some(opener);
        }
        let c = rest.chars().next()?;
        if self.profile.raw_string_delimiters.contains(&c) {
            return Some(Opener::Str {
                delim: c,
                raw: true,
            });
        }
        if self.profile.string_delimiters.contains(&c) {
            return Some(Opener::Str {
                delim: c,
                raw: false,
            });
        }
        if self.profile.char_delimiters.contains(&c) {
            if self.profile.quote_may_open_lifetime && !self.looks_like_char(rest, c) {
                return None;
            }
            return Some(Opener::Char { delim: c });
        }
        None
    }

    /// A raw string opening at `at`, e.g. `R"x(` or `r##"`. The prefix must
    /// start a word so identifiers ending in `r` never open one.
    fn prefixed_raw_at(&self, at: usize) -> Option<Opener> {
        let raw = self.profile.raw_strings.as_ref()?;
        if self.source[..at]
            .chars()
            .next_back()
            .is_some_and(|p| p.is_alphanumeric() || p == '_')
        {
            return None;
        }
        let rest = &self.source[at..];
        raw.prefixes.iter().find_map(|prefix| {
            let after = rest.strip_prefix(prefix.as_str())?;
            let (open_len, close) = match raw.style {
                RawStringStyle::Parenthesized => {
                    let body = after.strip_prefix('"')?;
                    let (paren, _) = body
                        .char_indices()
                        .take(MAX_RAW_DELIMITER + 1)
                        .find(|&(_, c)| c == '(')?;
                    let delim = &body[..paren];
                    if delim
                        .chars()
                        .any(|c| c.is_whitespace() || matches!(c, '\\' | ')' | '"'))
                    {
                        return None;
                    }
                    (prefix.len() + 1 + paren + 1, format!("){delim}\""))
                }
                RawStringStyle::Hashed => {
                    let hashes = after.len() - after.trim_start_matches('#').len();
                    after[hashes..].strip_prefix('"')?;
                    (prefix.len() + hashes + 1, format!("\"{}", "#".repeat(hashes)))
                }
                RawStringStyle::TripleQuoted => {
                    let quotes = prefix.get(prefix.len().checked_sub(3)?..)?;
                    (prefix.len(), quotes.to_string())
                }
            };
            Some(Opener::PrefixedRaw { open_len, close })
        })
    }

    /// `'x'` or `'\…'` rather than a lifetime such as `'a`.
    fn looks_like_char(&self, rest: &str, delim: char) -> bool {
        let mut chars = rest.chars().skip(1);
        match chars.next() {
            Some(c) if Some(c) == self.profile.escape => true,
            Some(_) => chars.next() == Some(delim),
            None => false,
        }
    }

    fn scan_code(&self, start: usize) -> usize {
        self.source[start..]
            .char_indices()
            .skip(1)
            .map(|(i, _)| start + i)
            .find(|&at| self.opener_at(at).is_some())
            .unwrap_or(self.source.len())
    }

    fn scan_line_comment(&self, start: usize) -> usize {
        self.source[start..]
            .find('\n')
            .map_or(self.source.len(), |i| start + i)
    }

    fn scan_block_comment(&mut self, start: usize) -> usize {
        let Some(block) = self.profile.block_comment.as_ref() else {
            return self.source.len();
        };
        let (open, close) = (block.open.as_str(), block.close.as_str());
        let nested = self.profile.nested_block_comments;

        let mut depth = 1usize;
        let mut at = start + open.len();
        while at < self.source.len() {
            let rest = &self.source[at..];
            if rest.starts_with(close) {
                at += close.len();
                depth -= 1;
                if depth == 0 || !nested {
                    return at;
                }
            } else if nested && rest.starts_with(open) {
                at += open.len();
                depth += 1;
            } else {
                at += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
        self.report(DiagnosticKind::UnterminatedComment, start);
        self.source.len()
    }

    fn scan_prefixed_raw(&mut self, start: usize, open_len: usize, close: &str) -> usize {
        let body = start + open_len;
        if let Some(found) = self.source[body..].find(close) {
            return body + found + close.len();
        }
        self.report(DiagnosticKind::UnterminatedLiteral, start);
        self.source.len()
    }

    fn scan_literal(&mut self, start: usize, delim: char, raw: bool) -> usize {
        let escape = if raw { None } else { self.profile.escape };
        let spans_lines = raw || self.profile.multiline_strings;

        let mut chars = self.source[start..].char_indices().skip(1);
        while let Some((i, c)) = chars.next() {
            if Some(c) == escape {
                chars.next();
            } else if c == delim {
                return start + i + c.len_utf8();
            } else if c == '\n' && !spans_lines {
                self.report(DiagnosticKind::UnterminatedLiteral, start);
                return start + i;
            }
        }
        self.report(DiagnosticKind::UnterminatedLiteral, start);
        self.source.len()
    }
}

impl Iterator for Scanner<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let start = self.pos;
        if start >= self.source.len() {
            return None;
        }

        let (kind, end) = match self.opener_at(start) {
            Some(Opener::Block) => (SpanKind::BlockComment, self.scan_block_comment(start)),
            Some(Opener::Line) => (SpanKind::LineComment, self.scan_line_comment(start)),
            Some(Opener::Str { delim, raw }) => {
                (SpanKind::StringLiteral, self.scan_literal(start, delim, raw))
            }
            Some(Opener::PrefixedRaw { open_len, close }) => (
                SpanKind::StringLiteral,
                self.scan_prefixed_raw(start, open_len, &close),
            ),
            Some(Opener::Char { delim }) => {
                (SpanKind::CharLiteral, self.scan_literal(start, delim, false))
            }
            None => (SpanKind::Code, self.scan_code(start)),
        };

        self.pos = end;
        Some(Span::new(start, end, kind))
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}
