//! # glean-parser
//!
//! Literal-aware comment extraction for C-family languages.
//!
//! A single pass splits source into code, literal and comment spans, so
//! comment-like text inside strings is never reported. Comments are then
//! collected (adjacent line comments merged, doc comments recognised),
//! attached to the declaration that follows them, and mined for `@tags`
//! and `TODO:`-style markers.
//!
//! Languages are data: each one is a [`LanguageProfile`] in a
//! [`ProfileRegistry`]. Built-in profiles cover C, C++, Rust, Go, Java and Python.
//!
//! ```
//! let result = glean_parser::extract_comments(
//!     "/** @brief Add two numbers */\nint add(int a, int b) { return a + b; }\n",
//!     "cpp",
//! )
//! .unwrap();
//! let record = &result.comments[0];
//! assert_eq!(record.tag("brief").unwrap().description, "Add two numbers");
//! assert_eq!(record.construct.as_ref().unwrap().signature, "int add(int a, int b)");
//! ```

pub mod collector;
pub mod error;
pub mod extract;
pub(crate) mod helpers;
mod locator;
pub mod profile;
pub mod scanner;
pub mod tags;
pub mod types;

pub use error::ExtractError;
pub use extract::{
    DEFAULT_MAX_LOOKAHEAD, ExtractOptions, Extractor, extract_comments, extract_with_profile,
};
pub use profile::{
    BlockDelimiters, DeclStyle, DeclarationSyntax, LanguageProfile, ProfileRegistry,
    RawStringStyle, RawStringSyntax, global, install_global,
};
pub use scanner::Scanner;
pub use types::{
    CommentKind, CommentRecord, Construct, ConstructKind, Diagnostic, DiagnosticKind,
    ExtractionResult, Marker, MarkerKind, SourceRange, Span, SpanKind, TagEntry, Tags,
};
