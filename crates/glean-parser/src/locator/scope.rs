//! Brace-scope index: which kind of body encloses a given offset.

use super::tokens::{Token, TokenKind, Tokens};
use crate::profile::DeclarationSyntax;
use crate::types::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Top level of the file.
    File,
    /// `namespace x { }`, `mod x { }`, `extern "C" { }`.
    Namespace,
    /// Members of a class, struct, trait or impl.
    TypeBody,
    /// Enumerators.
    EnumBody,
    /// Function bodies, initializers and anything else.
    Block,
}

impl ScopeKind {
    pub const fn holds_members(self) -> bool {
        matches!(self, Self::TypeBody | Self::EnumBody)
    }
}

#[derive(Debug, Clone, Copy)]
struct Scope {
    open: usize,
    close: usize,
    kind: ScopeKind,
}

#[derive(Debug, Default)]
pub struct ScopeIndex {
    scopes: Vec<Scope>,
}

impl ScopeIndex {
    pub fn build(source: &str, spans: &[Span], syntax: &DeclarationSyntax) -> Self {
        let mut scopes = Vec::new();
        let mut stack: Vec<(usize, ScopeKind)> = Vec::new();
        let mut head: Vec<Token<'_>> = Vec::new();
        let mut parens = 0usize;
        let mut in_directive = false;

        for tok in Tokens::new(source, spans, 0, source.len()) {
            if in_directive {
                if !tok.newline_before {
                    continue;
                }
                in_directive = false;
            }
            if syntax.newline_terminated && tok.newline_before && parens == 0 {
                head.clear();
            }
            if syntax.macro_define.is_some() && tok.is("#") && (tok.newline_before || head.is_empty())
            {
                in_directive = true;
                continue;
            }

            match (tok.kind, tok.text) {
                (TokenKind::Punct, "{") => {
                    stack.push((tok.start, classify_head(&head, syntax)));
                    head.clear();
                    parens = 0;
                }
                (TokenKind::Punct, "}") => {
                    if let Some((open, kind)) = stack.pop() {
                        scopes.push(Scope { open, close: tok.end, kind });
                    }
                    head.clear();
                    parens = 0;
                }
                (TokenKind::Punct, ";") if parens == 0 => head.clear(),
                (TokenKind::Punct, "(" | "[") => {
                    parens += 1;
                    head.push(tok);
                }
                (TokenKind::Punct, ")" | "]") => {
                    parens = parens.saturating_sub(1);
                    head.push(tok);
                }
                _ => head.push(tok),
            }
        }
        while let Some((open, kind)) = stack.pop() {
            scopes.push(Scope { open, close: source.len(), kind });
        }
        scopes.sort_by_key(|s| s.open);
        Self { scopes }
    }

    /// Innermost scope strictly containing `offset`.
    pub fn enclosing(&self, offset: usize) -> ScopeKind {
        self.scopes
            .iter()
            .take_while(|s| s.open < offset)
            .filter(|s| offset < s.close)
            .last()
            .map_or(ScopeKind::File, |s| s.kind)
    }
}

/// Decide what a `{` opens from the tokens since the previous statement.
fn classify_head(head: &[Token<'_>], syntax: &DeclarationSyntax) -> ScopeKind {
    let mut depth = 0usize;
    let mut call_parens = false;
    let mut after_annotation = false;
    let mut annotation_name = false;
    let (mut enum_kw, mut type_kw, mut namespace_kw) = (false, false, false);
    let mut significant = false;
    let mut literal = false;

    for tok in head {
        let pending = std::mem::take(&mut after_annotation);
        if std::mem::take(&mut annotation_name) && tok.is_ident() {
            after_annotation = true;
            continue;
        }
        match (tok.kind, tok.text) {
            (TokenKind::Punct, "(" | "[") => {
                if depth == 0 && tok.text == "(" && !pending {
                    call_parens = true;
                }
                depth += 1;
            }
            (TokenKind::Punct, ")" | "]") => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            (TokenKind::Literal, _) => literal = true,
            (TokenKind::Ident, word) => {
                if syntax.is_enum_keyword(word) {
                    enum_kw = true;
                } else if syntax.is_type_keyword(word) || syntax.is_impl_keyword(word) {
                    type_kw = true;
                } else if syntax.is_namespace_keyword(word) {
                    namespace_kw = true;
                } else if !syntax.is_modifier(word) {
                    significant = true;
                }
            }
            (TokenKind::Punct, text) => {
                if syntax.annotation_prefix.is_some_and(|p| text.chars().eq(std::iter::once(p))) {
                    annotation_name = true;
                }
            }
            (TokenKind::Number, _) => {}
        }
    }

    if call_parens {
        ScopeKind::Block
    } else if enum_kw {
        ScopeKind::EnumBody
    } else if type_kw {
        ScopeKind::TypeBody
    } else if namespace_kw || (literal && !significant) {
        ScopeKind::Namespace
    } else {
        ScopeKind::Block
    }
}
