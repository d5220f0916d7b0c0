use serde::{Deserialize, Serialize};

/// Recoverable problems found while scanning.
///
/// These never abort extraction: the offending literal or comment is closed
/// implicitly and the result is still produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnterminatedLiteral,
    UnterminatedComment,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::UnterminatedLiteral => "unterminated literal",
            Self::UnterminatedComment => "unterminated comment",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Byte offset where the unterminated construct opened.
    pub offset: usize,
    /// 1-based line of `offset`. Filled in by the extractor.
    pub line: u32,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} opened at line {}", self.kind, self.line)
    }
}
