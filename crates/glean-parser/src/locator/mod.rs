//! Construct locator: attach a comment to the declaration that follows it.
//!
//! The locator never parses. It reads a bounded window of coarse tokens after
//! the comment, skips decorators and access labels, reads the declaration
//! head up to its top-level terminator and classifies that head against the
//! profile's keyword tables. Whether a `{` opens a type body, an enum body, a
//! namespace or a plain block is decided once per source by [`ScopeIndex`].

mod scope;
mod tokens;

use crate::helpers::normalize_whitespace;
use crate::profile::{DeclStyle, DeclarationSyntax, LanguageProfile};
use crate::types::{Construct, ConstructKind, Span};

use scope::{ScopeIndex, ScopeKind};
use tokens::{Token, TokenKind, Tokens};

pub struct Locator<'a> {
    source: &'a str,
    spans: &'a [Span],
    syntax: &'a DeclarationSyntax,
    scopes: ScopeIndex,
    max_lookahead: usize,
}

/// Declaration head: the tokens from the first significant token up to the
/// terminator, with a typedef body (if any) cut out.
struct Head<'s> {
    tokens: Vec<Token<'s>>,
    start: usize,
    end: usize,
    body: Option<(usize, usize)>,
}

impl<'a> Locator<'a> {
    pub fn new(
        source: &'a str,
        spans: &'a [Span],
        profile: &'a LanguageProfile,
        max_lookahead: usize,
    ) -> Self {
        Self {
            source,
            spans,
            syntax: &profile.syntax,
            scopes: ScopeIndex::build(source, spans, &profile.syntax),
            max_lookahead,
        }
    }

    /// The declaration directly following a comment that ends at `comment_end`.
    pub fn locate(&self, comment_end: usize) -> Option<Construct> {
        let limit = comment_end.saturating_add(self.max_lookahead).min(self.source.len());
        let truncated = limit < self.source.len();
        let tokens: Vec<Token<'_>> =
            Tokens::new(self.source, self.spans, comment_end, limit).collect();

        let i = self.skip_decorations(&tokens, 0);
        let first = tokens.get(i)?;
        match first.kind {
            TokenKind::Punct if first.text == "#" => return self.macro_constant(&tokens, i),
            TokenKind::Punct if first.text != "~" => return None,
            TokenKind::Literal | TokenKind::Number => return None,
            TokenKind::Ident if self.syntax.is_statement_keyword(first.text) => return None,
            _ => {}
        }

        if self.syntax.indentation_scoped
            && line_indent(self.source, first.start) < line_indent(self.source, comment_end)
        {
            return None;
        }

        let scope = self.scopes.enclosing(first.start);
        let head = self.read_head(&tokens, i, scope, truncated)?;
        self.classify(&head, scope)
    }

    // ── Skipping ──────────────────────────────────────────────────

    /// Skip annotations, attributes and access labels starting at `i`.
    fn skip_decorations(&self, tokens: &[Token<'_>], mut i: usize) -> usize {
        loop {
            let Some(tok) = tokens.get(i) else { return i };

            if self.is_annotation_start(tokens, i) {
                i += 2;
                while tokens.get(i).is_some_and(|t| t.is("."))
                    && tokens.get(i + 1).is_some_and(Token::is_ident)
                {
                    i += 2;
                }
                if tokens.get(i).is_some_and(|t| t.is("(")) {
                    i = skip_group(tokens, i);
                }
                continue;
            }

            if let Some(bracket) = self.attribute_at(tokens, i) {
                i = skip_group(tokens, bracket);
                continue;
            }

            if tok.is_ident()
                && self.syntax.is_access_label(tok.text)
                && tokens.get(i + 1).is_some_and(|t| t.is(":"))
            {
                i += 2;
                continue;
            }

            return i;
        }
    }

    fn is_annotation_start(&self, tokens: &[Token<'_>], i: usize) -> bool {
        let Some(prefix) = self.syntax.annotation_prefix else { return false };
        let (Some(at), Some(name)) = (tokens.get(i), tokens.get(i + 1)) else { return false };
        at.kind == TokenKind::Punct
            && at.text.chars().eq(std::iter::once(prefix))
            && name.is_ident()
            && name.text != "interface"
    }

    /// Index of the opening `[` when an attribute opener starts at `i`.
    fn attribute_at(&self, tokens: &[Token<'_>], i: usize) -> Option<usize> {
        self.syntax.attribute_opens.iter().find_map(|open| {
            let n = open.chars().count();
            let matches = open.chars().enumerate().all(|(k, c)| {
                tokens.get(i + k).is_some_and(|t| {
                    t.kind == TokenKind::Punct && t.text.chars().eq(std::iter::once(c))
                })
            });
            // `[[` nests: start the group at the outer bracket.
            matches.then(|| if open.starts_with('[') { i } else { i + n - 1 })
        })
    }

    // ── Head ──────────────────────────────────────────────────────

    fn read_head<'s>(
        &self,
        tokens: &[Token<'s>],
        start: usize,
        scope: ScopeKind,
        truncated: bool,
    ) -> Option<Head<'s>> {
        let members = scope.holds_members();
        let typedef = self.head_is_typedef(&tokens[start..]);
        let mut collected = Vec::new();
        let mut body = None;
        let mut depth = 0usize;
        let mut angles = 0usize;
        let mut assigned = false;
        let mut j = start;
        let mut terminated = false;

        while let Some(tok) = tokens.get(j) {
            if self.syntax.newline_terminated && depth == 0 && j > start && tok.newline_before {
                terminated = true;
                break;
            }
            if tok.kind == TokenKind::Punct {
                let after_name = j > start && (tokens[j - 1].is_ident() || tokens[j - 1].is("::"));
                match tok.text {
                    "(" | "[" => depth += 1,
                    ")" | "]" => depth = depth.checked_sub(1)?,
                    "<" if depth == 0 && !assigned && after_name => angles += 1,
                    ">" if depth == 0 && angles > 0 => angles -= 1,
                    "=" if depth == 0 => assigned = true,
                    "{" if depth == 0 && typedef && body.is_none() => {
                        let after = skip_group(tokens, j);
                        let close = tokens.get(after.checked_sub(1)?)?;
                        body = Some((tok.start, close.end));
                        j = after;
                        continue;
                    }
                    "{" | ";" | "}" if depth == 0 => {
                        terminated = true;
                        break;
                    }
                    // `def f():` and `class C:` open their block at the colon.
                    ":" if depth == 0 && self.syntax.indentation_scoped => {
                        collected.push(*tok);
                        terminated = true;
                        break;
                    }
                    "," if depth == 0 && angles == 0 && members => {
                        terminated = true;
                        break;
                    }
                    _ => {}
                }
            }
            collected.push(*tok);
            j += 1;
        }

        // Ran off the end of the window without finding where the head stops.
        if !terminated && truncated {
            return None;
        }
        let start = collected.first()?.start;
        let end = collected.last()?.end;
        Some(Head { tokens: collected, start, end, body })
    }

    fn head_is_typedef(&self, tokens: &[Token<'_>]) -> bool {
        tokens
            .iter()
            .find(|t| !(t.is_ident() && self.syntax.is_modifier(t.text)))
            .is_some_and(|t| t.is_ident() && self.syntax.is_typedef(t.text))
    }

    // ── Classification ────────────────────────────────────────────

    fn classify(&self, head: &Head<'_>, scope: ScopeKind) -> Option<Construct> {
        let core = &head.tokens[self.skip_modifiers(&head.tokens)..];
        let first = core.first()?;

        if first.is_ident()
            && (self.syntax.is_namespace_keyword(first.text) || self.syntax.is_impl_keyword(first.text))
        {
            return None;
        }

        if let Some(at) = self.function_keyword_at(core) {
            return self.keyword_function(head, core, at, scope);
        }
        if first.is_ident() && self.syntax.is_typedef(first.text) {
            return self.typedef(head, core);
        }
        if let Some(found) = self.shaped_function(head, core, scope) {
            return Some(found);
        }
        if first.is_ident() && self.syntax.is_type_keyword(first.text) {
            if let Some(found) = self.type_declaration(head, core) {
                return Some(found);
            }
        }
        if let Some(after) = self.constant_qualifier_end(&head.tokens) {
            return self.constant(head, after);
        }
        match scope {
            ScopeKind::EnumBody => core
                .iter()
                .find(|t| t.is_ident())
                .map(|name| Construct::new(ConstructKind::Constant, name.text, self.signature(head))),
            ScopeKind::TypeBody => self.field(head, core),
            _ => None,
        }
    }

    /// Index of the first token past leading modifiers, visibility groups
    /// like `pub(crate)`, linkage literals and template parameter lists.
    fn skip_modifiers(&self, tokens: &[Token<'_>]) -> usize {
        let mut k = 0;
        let mut after_modifier = false;
        while let Some(tok) = tokens.get(k) {
            if tok.is_ident() && self.syntax.is_modifier(tok.text) {
                k += 1;
                after_modifier = true;
            } else if after_modifier && tok.is("(") {
                k = skip_group(tokens, k);
            } else if after_modifier && tok.kind == TokenKind::Literal {
                k += 1;
            } else if tok.is_ident()
                && self.syntax.is_generic_prefix(tok.text)
                && tokens.get(k + 1).is_some_and(|t| t.is("<"))
            {
                k = skip_angles(tokens, k + 1);
                after_modifier = false;
            } else {
                break;
            }
        }
        k
    }

    fn function_keyword_at(&self, core: &[Token<'_>]) -> Option<usize> {
        core.iter()
            .take_while(|t| !t.is("("))
            .position(|t| t.is_ident() && self.syntax.is_function_keyword(t.text))
    }

    fn keyword_function(
        &self,
        head: &Head<'_>,
        core: &[Token<'_>],
        at: usize,
        scope: ScopeKind,
    ) -> Option<Construct> {
        let mut j = at + 1;
        let receiver = core.get(j).is_some_and(|t| t.is("("));
        if receiver {
            j = skip_group(core, j);
        }
        let name = core.get(j).filter(|t| t.is_ident())?;
        let indented_member =
            self.syntax.indentation_scoped && line_indent(self.source, head.start) > 0;
        let kind = if receiver || indented_member || scope == ScopeKind::TypeBody {
            ConstructKind::Method
        } else {
            ConstructKind::Function
        };
        Some(Construct::new(kind, name.text, self.signature(head)))
    }

    fn typedef(&self, head: &Head<'_>, core: &[Token<'_>]) -> Option<Construct> {
        // Function pointer: `typedef int (*handler_t)(int);`
        let pointer = core.windows(3).find_map(|w| {
            (w[0].is("(") && w[1].is("*") && w[2].is_ident()).then_some(w[2])
        });
        let name = match pointer {
            Some(tok) => tok,
            None => *core
                .iter()
                .take_while(|t| !t.is("["))
                .filter(|t| t.is_ident())
                .last()?,
        };
        if core.first().is_some_and(|t| t.start == name.start) {
            return None;
        }
        // `typedef struct { ... };` names nothing.
        if head.body.is_some_and(|(_, close)| close > head.end || name.start < close) {
            return None;
        }

        let signature = match head.body {
            Some((open, close)) => format!(
                "{} {{ ... }} {}",
                self.text_without_comments(head.start, open),
                self.text_without_comments(close, head.end)
            )
            .trim()
            .to_string(),
            None => self.signature(head),
        };
        Some(Construct::new(ConstructKind::Type, name.text, signature))
    }

    /// C-family shape: `ret name(params)`, `Class::name(params)`, or a
    /// constructor `Name(params)` inside a type body.
    fn shaped_function(
        &self,
        head: &Head<'_>,
        core: &[Token<'_>],
        scope: ScopeKind,
    ) -> Option<Construct> {
        if self.syntax.keyword_functions_only {
            // Interface method sets: `Read(p []byte) error`.
            let name = core.first().filter(|t| t.is_ident())?;
            return (scope == ScopeKind::TypeBody && core.get(1).is_some_and(|t| t.is("(")))
                .then(|| Construct::new(ConstructKind::Method, name.text, self.signature(head)));
        }
        if scope == ScopeKind::Block {
            return None;
        }

        let params = first_parameter_list(core)?;
        let name = core.get(params.checked_sub(1)?).filter(|t| t.is_ident())?;
        if self.is_reserved(name.text) || core.get(params + 1).is_some_and(|t| t.is("*")) {
            return None;
        }
        // `record Point(int x)` declares a type, not a function.
        if core.first().is_some_and(|t| self.syntax.is_type_keyword(t.text))
            && core.get(1).is_some_and(|t| t.start == name.start)
        {
            return None;
        }

        let mut q = params - 1;
        let destructor = q >= 1 && core[q - 1].is("~");
        if destructor {
            q -= 1;
        }
        let mut qualified = false;
        while q >= 2 && core[q - 1].is("::") && core[q - 2].is_ident() {
            q -= 2;
            qualified = true;
        }
        let has_return_type = core[..q].last().is_some_and(|t| {
            t.is_ident() || t.is("*") || t.is("&") || t.is(">") || t.is("]")
        });
        if !(has_return_type || qualified || scope == ScopeKind::TypeBody) {
            return None;
        }

        let kind = if qualified || scope == ScopeKind::TypeBody {
            ConstructKind::Method
        } else {
            ConstructKind::Function
        };
        let name = if destructor {
            format!("~{}", name.text)
        } else {
            name.text.split_whitespace().collect()
        };

        // Cut before a constructor initializer list.
        let after_params = skip_group(core, params);
        let end = core[after_params.min(core.len())..]
            .iter()
            .find(|t| t.is(":"))
            .and_then(|colon| core.iter().rev().find(|t| t.end <= colon.start))
            .map_or(head.end, |t| t.end);
        let signature = self.text_without_comments(head.start, end);
        Some(Construct::new(kind, name, trim_assignment(&signature)))
    }

    fn type_declaration(&self, head: &Head<'_>, core: &[Token<'_>]) -> Option<Construct> {
        let mut k = 1;
        let name = loop {
            let tok = core.get(k)?;
            if tok.is_ident()
                && (self.syntax.is_type_keyword(tok.text) || self.syntax.is_modifier(tok.text))
            {
                k += 1;
            } else if tok.is_ident()
                && !self.syntax.indentation_scoped
                && core.get(k + 1).is_some_and(|t| t.is("("))
            {
                // `__attribute__((packed))`, `alignas(8)`
                k = skip_group(core, k + 1);
            } else if tok.is("[") {
                k = skip_group(core, k);
            } else if tok.is_ident() {
                break *tok;
            } else {
                return None;
            }
        };

        // `struct Point origin;` declares a variable of the type.
        if !self.syntax.keyword_functions_only
            && self.terminated_by_semicolon(head)
            && core.get(k + 1).is_some_and(Token::is_ident)
        {
            return None;
        }
        Some(Construct::new(ConstructKind::Type, name.text, self.signature(head)))
    }

    fn terminated_by_semicolon(&self, head: &Head<'_>) -> bool {
        self.source[head.end..].trim_start().starts_with(';')
    }

    /// Index just past a constant qualifier sequence (`const`, `static final`).
    fn constant_qualifier_end(&self, tokens: &[Token<'_>]) -> Option<usize> {
        let before_value = tokens.iter().take_while(|t| !t.is("=") && !t.is("(")).count();
        self.syntax.constant_keywords.iter().find_map(|keyword| {
            let words: Vec<&str> = keyword.split_whitespace().collect();
            (0..before_value).find_map(|at| {
                let hit = words.iter().enumerate().all(|(n, w)| {
                    at + n < before_value && tokens[at + n].is_ident() && tokens[at + n].text == *w
                });
                hit.then_some(at + words.len())
            })
        })
    }

    fn constant(&self, head: &Head<'_>, after: usize) -> Option<Construct> {
        let tokens = &head.tokens;
        let name = match self.syntax.style {
            DeclStyle::TypeFirst => tokens
                .iter()
                .take_while(|t| !(t.is("=") || t.is("[") || t.is("(")))
                .filter(|t| t.is_ident())
                .last()
                .filter(|t| t.start >= tokens[after.min(tokens.len() - 1)].start)?,
            DeclStyle::NameFirst => tokens[after..]
                .iter()
                .find(|t| !(t.is_ident() && self.syntax.is_modifier(t.text)))
                .filter(|t| t.is_ident())?,
        };
        Some(Construct::new(ConstructKind::Constant, name.text, self.signature(head)))
    }

    fn field(&self, head: &Head<'_>, core: &[Token<'_>]) -> Option<Construct> {
        let name = match self.syntax.style {
            DeclStyle::TypeFirst => {
                let decl: Vec<&Token<'_>> = core
                    .iter()
                    .take_while(|t| !(t.is("=") || t.is("[") || t.is(":")))
                    .collect();
                if decl.len() < 2 {
                    return None;
                }
                decl.last().filter(|t| t.is_ident()).copied()?
            }
            DeclStyle::NameFirst => {
                if core.len() < 2 {
                    return None;
                }
                core.first().filter(|t| t.is_ident())?
            }
        };
        Some(Construct::new(ConstructKind::Field, name.text, self.signature(head)))
    }

    /// `#define NAME value` up to the end of its line.
    fn macro_constant(&self, tokens: &[Token<'_>], i: usize) -> Option<Construct> {
        let directive = self.syntax.macro_define.as_deref()?.trim_start_matches('#');
        let keyword = tokens.get(i + 1).filter(|t| t.is_ident() && !t.newline_before)?;
        if keyword.text != directive {
            return None;
        }
        let name = tokens.get(i + 2).filter(|t| t.is_ident() && !t.newline_before)?;
        let start = tokens[i].start;
        let line_end = self.source[start..].find('\n').map_or(self.source.len(), |n| start + n);
        let signature = self.text_without_comments(start, line_end);
        Some(Construct::new(ConstructKind::Constant, name.text, signature))
    }

    // ── Text ──────────────────────────────────────────────────────

    fn is_reserved(&self, word: &str) -> bool {
        self.syntax.is_statement_keyword(word)
            || self.syntax.is_type_keyword(word)
            || self.syntax.is_modifier(word)
    }

    fn signature(&self, head: &Head<'_>) -> String {
        let text = self.text_without_comments(head.start, head.end);
        trim_assignment(&text).to_string()
    }

    /// Source text of `[start, end)` with comment spans replaced by a space.
    fn text_without_comments(&self, start: usize, end: usize) -> String {
        if start >= end {
            return String::new();
        }
        let first = self.spans.partition_point(|s| s.end <= start);
        let mut out = String::with_capacity(end.saturating_sub(start));
        for span in self.spans[first..].iter().take_while(|s| s.start < end) {
            if span.kind.is_comment() {
                out.push(' ');
            } else {
                out.push_str(&self.source[span.start.max(start)..span.end.min(end)]);
            }
        }
        normalize_whitespace(&out)
    }
}

/// Index of the first parameter list: a top-level `(` that is not preceded
/// by an initializer `=` and not inside template arguments.
fn first_parameter_list(core: &[Token<'_>]) -> Option<usize> {
    let mut angles = 0usize;
    for (idx, tok) in core.iter().enumerate() {
        match tok.text {
            "<" if tok.kind == TokenKind::Punct
                && idx > 0
                && (core[idx - 1].is_ident() || core[idx - 1].is(">")) =>
            {
                angles += 1;
            }
            ">" if tok.kind == TokenKind::Punct && angles > 0 => angles -= 1,
            "=" if tok.kind == TokenKind::Punct && angles == 0 => return None,
            "(" if tok.kind == TokenKind::Punct && angles == 0 => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Index just past the group opened at `open` (`(`, `[` or `{`).
fn skip_group(tokens: &[Token<'_>], open: usize) -> usize {
    let mut depth = 0usize;
    for (idx, tok) in tokens.iter().enumerate().skip(open) {
        if tok.kind != TokenKind::Punct {
            continue;
        }
        match tok.text {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return idx + 1;
                }
            }
            _ => {}
        }
    }
    tokens.len()
}

/// Index just past the angle-bracket list opened at `open`.
fn skip_angles(tokens: &[Token<'_>], open: usize) -> usize {
    let mut depth = 0usize;
    for (idx, tok) in tokens.iter().enumerate().skip(open) {
        if tok.is("<") {
            depth += 1;
        } else if tok.is(">") {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return idx + 1;
            }
        }
    }
    tokens.len()
}

/// Drop a dangling `=` or block-opening `:` left at the end of a head.
fn trim_assignment(signature: &str) -> &str {
    signature
        .strip_suffix('=')
        .or_else(|| signature.strip_suffix(':'))
        .map_or(signature, str::trim_end)
}

/// Width of the leading whitespace on the line containing `offset`.
fn line_indent(source: &str, offset: usize) -> usize {
    let start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line = &source[start..];
    line.len() - line.trim_start_matches([' ', '\t']).len()
}
