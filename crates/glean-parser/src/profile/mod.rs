//! Lexical and declaration rules per host language.
//!
//! Everything that differs between languages lives in a [`LanguageProfile`]
//! value. The scanner, collector and locator only ever consult the profile,
//! so adding a language means registering a profile, not adding code paths.

mod builtin;
mod registry;

use serde::{Deserialize, Serialize};

pub use registry::{ProfileRegistry, global, install_global};

/// Open/close pair for block comments, e.g. `/*` and `*/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDelimiters {
    pub open: String,
    pub close: String,
}

impl BlockDelimiters {
    #[must_use]
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
        }
    }
}

/// How the body of a prefixed raw string is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawStringStyle {
    /// `R"delim( ... )delim"`, with a delimiter of at most 16 characters.
    Parenthesized,
    /// `r#"..."#` with any number of `#`, including none.
    Hashed,
    /// `"""..."""`: the prefix ends with the opening quote run, and the
    /// same run closes the literal.
    TripleQuoted,
}

/// Raw string literals introduced by a prefix, such as C++ `R"(...)"` or
/// Rust `r#"..."#`. Their bodies have no escapes and may span lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStringSyntax {
    /// Prefixes written directly before the opening quote (`R`, `u8R`, `br`).
    pub prefixes: Vec<String>,
    pub style: RawStringStyle,
}

/// Word order of variable-like declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclStyle {
    /// `int count;`, `const int MAX = 3;`
    #[default]
    TypeFirst,
    /// `count: i32`, `Count int`, `const MAX: u32 = 3;`
    NameFirst,
}

/// Keyword tables the construct locator matches declaration heads against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclarationSyntax {
    pub style: DeclStyle,
    /// Keywords introducing a function (`fn`, `func`). Empty for C-like
    /// languages where functions are recognized by shape.
    pub function_keywords: Vec<String>,
    /// Only accept functions introduced by a function keyword.
    pub keyword_functions_only: bool,
    /// Keywords introducing a type declaration.
    pub type_keywords: Vec<String>,
    /// Subset of `type_keywords` whose bodies hold enumerators.
    pub enum_keywords: Vec<String>,
    /// Keywords opening a body whose members are methods but which is not
    /// itself documented as a construct (`impl`).
    pub impl_keywords: Vec<String>,
    /// Keywords opening a namespace-like scope (`namespace`, `mod`).
    pub namespace_keywords: Vec<String>,
    /// Qualifier sequences marking a named constant. Multi-word entries
    /// (`"static final"`) must appear as consecutive words.
    pub constant_keywords: Vec<String>,
    /// Words that may precede a declaration without changing its shape.
    pub modifiers: Vec<String>,
    /// Labels followed by `:` that may sit between a comment and its
    /// declaration (`public:`).
    pub access_labels: Vec<String>,
    /// Words that start a statement rather than a declaration.
    pub statement_keywords: Vec<String>,
    /// Prefix of annotations such as `@Override`.
    pub annotation_prefix: Option<char>,
    /// Openers of bracketed attributes such as `#[` or `[[`.
    pub attribute_opens: Vec<String>,
    pub typedef_keyword: Option<String>,
    /// Preprocessor directive declaring a constant macro (`#define`).
    pub macro_define: Option<String>,
    /// Keyword introducing a generic prefix (`template<...>`).
    pub generic_prefix: Option<String>,
    /// Declarations end at a line break outside brackets (Go).
    pub newline_terminated: bool,
    /// Blocks are delimited by indentation (Python): a comment never
    /// attaches to a less indented declaration, and an indented function
    /// keyword declares a method.
    pub indentation_scoped: bool,
}

/// Immutable lexical rules for one language.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub id: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// File extensions without the dot.
    #[serde(default)]
    pub extensions: Vec<String>,
    pub line_comment: Option<String>,
    pub block_comment: Option<BlockDelimiters>,
    /// Openers turning a block comment into a doc-block (`/**`).
    #[serde(default)]
    pub doc_block_opens: Vec<String>,
    /// Prefixes turning line comments into a doc-block (`///`).
    #[serde(default)]
    pub doc_line_prefixes: Vec<String>,
    #[serde(default)]
    pub string_delimiters: Vec<char>,
    /// Delimiters of strings without escapes that may span lines (Go's backtick).
    #[serde(default)]
    pub raw_string_delimiters: Vec<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_strings: Option<RawStringSyntax>,
    #[serde(default)]
    pub char_delimiters: Vec<char>,
    pub escape: Option<char>,
    #[serde(default)]
    pub nested_block_comments: bool,
    /// Ordinary strings may contain a raw line break.
    #[serde(default)]
    pub multiline_strings: bool,
    /// A char delimiter may also start a lifetime or label (`'a`).
    #[serde(default)]
    pub quote_may_open_lifetime: bool,
    #[serde(default)]
    pub syntax: DeclarationSyntax,
}

impl LanguageProfile {
    /// A profile with the given id and no syntax. Used as a starting point
    /// for profiles assembled field by field.
    #[must_use]
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            aliases: Vec::new(),
            extensions: Vec::new(),
            line_comment: None,
            block_comment: None,
            doc_block_opens: Vec::new(),
            doc_line_prefixes: Vec::new(),
            string_delimiters: Vec::new(),
            raw_string_delimiters: Vec::new(),
            raw_strings: None,
            char_delimiters: Vec::new(),
            escape: None,
            nested_block_comments: false,
            multiline_strings: false,
            quote_may_open_lifetime: false,
            syntax: DeclarationSyntax::default(),
        }
    }

    #[must_use]
    pub fn c() -> Self {
        builtin::c()
    }

    #[must_use]
    pub fn cpp() -> Self {
        builtin::cpp()
    }

    #[must_use]
    pub fn rust() -> Self {
        builtin::rust()
    }

    #[must_use]
    pub fn go() -> Self {
        builtin::go()
    }

    #[must_use]
    pub fn java() -> Self {
        builtin::java()
    }

    #[must_use]
    pub fn python() -> Self {
        builtin::python()
    }

    /// All profiles preconfigured in [`ProfileRegistry::with_builtins`].
    #[must_use]
    pub fn builtins() -> Vec<Self> {
        vec![
            Self::c(),
            Self::cpp(),
            Self::rust(),
            Self::go(),
            Self::java(),
            Self::python(),
        ]
    }

    /// Whether `id` names this profile, directly or through an alias.
    #[must_use]
    pub fn answers_to(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(id))
    }
}

impl DeclarationSyntax {
    pub(crate) fn is_modifier(&self, word: &str) -> bool {
        self.modifiers.iter().any(|m| m == word)
    }

    pub(crate) fn is_statement_keyword(&self, word: &str) -> bool {
        self.statement_keywords.iter().any(|k| k == word)
    }

    pub(crate) fn is_type_keyword(&self, word: &str) -> bool {
        self.type_keywords.iter().any(|k| k == word)
    }

    pub(crate) fn is_enum_keyword(&self, word: &str) -> bool {
        self.enum_keywords.iter().any(|k| k == word)
    }

    pub(crate) fn is_impl_keyword(&self, word: &str) -> bool {
        self.impl_keywords.iter().any(|k| k == word)
    }

    pub(crate) fn is_namespace_keyword(&self, word: &str) -> bool {
        self.namespace_keywords.iter().any(|k| k == word)
    }

    pub(crate) fn is_function_keyword(&self, word: &str) -> bool {
        self.function_keywords.iter().any(|k| k == word)
    }

    pub(crate) fn is_access_label(&self, word: &str) -> bool {
        self.access_labels.iter().any(|k| k == word)
    }

    pub(crate) fn is_typedef(&self, word: &str) -> bool {
        self.typedef_keyword.as_deref() == Some(word)
    }

    pub(crate) fn is_generic_prefix(&self, word: &str) -> bool {
        self.generic_prefix.as_deref() == Some(word)
    }
}
