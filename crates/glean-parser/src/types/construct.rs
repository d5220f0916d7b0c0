use serde::{Deserialize, Serialize};

/// The kind of declaration a comment documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructKind {
    Function,
    Method,
    Type,
    Field,
    Constant,
}

impl std::fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Function => "function",
            Self::Method => "method",
            Self::Type => "type",
            Self::Field => "field",
            Self::Constant => "constant",
        };
        write!(f, "{s}")
    }
}

/// The declaration found after a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Construct {
    pub kind: ConstructKind,
    pub name: String,
    /// Declaration head up to its body or terminator, whitespace-normalized.
    pub signature: String,
}

impl Construct {
    #[must_use]
    pub fn new(kind: ConstructKind, name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            signature: signature.into(),
        }
    }
}
