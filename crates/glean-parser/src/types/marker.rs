use serde::{Deserialize, Serialize};

/// Annotation keywords flagged inside comment bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarkerKind {
    Todo,
    Fixme,
    Bug,
    Hack,
    Note,
    Xxx,
}

impl MarkerKind {
    pub const ALL: [Self; 6] = [
        Self::Todo,
        Self::Fixme,
        Self::Bug,
        Self::Hack,
        Self::Note,
        Self::Xxx,
    ];

    /// The exact, case-sensitive keyword as written in source.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Fixme => "FIXME",
            Self::Bug => "BUG",
            Self::Hack => "HACK",
            Self::Note => "NOTE",
            Self::Xxx => "XXX",
        }
    }
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A single annotation marker and the rest of its line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub text: String,
    /// 1-based source line the marker sits on.
    pub line: u32,
}
