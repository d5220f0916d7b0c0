use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Construct, Marker, SourceRange};

/// How a comment was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    /// One `//` line, or a merged run of adjacent ones.
    Line,
    /// A plain `/* ... */` comment.
    Block,
    /// A documentation comment: `/** ... */` or a run of `///` lines.
    DocBlock,
}

impl CommentKind {
    #[must_use]
    pub const fn is_doc(self) -> bool {
        matches!(self, Self::DocBlock)
    }
}

impl std::fmt::Display for CommentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Line => "line",
            Self::Block => "block",
            Self::DocBlock => "doc_block",
        };
        write!(f, "{s}")
    }
}

/// One occurrence of an `@tag` inside a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    /// Leading name token for tags like `@param a ...` or `@throws Error ...`.
    pub name: Option<String>,
    pub description: String,
}

impl TagEntry {
    #[must_use]
    pub fn new(name: Option<&str>, description: impl Into<String>) -> Self {
        Self {
            name: name.map(str::to_string),
            description: description.into(),
        }
    }
}

/// Tag name (without `@`) to its entries, in first-seen order.
pub type Tags = IndexMap<String, Vec<TagEntry>>;

/// A single extracted comment with everything learned about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub span: SourceRange,
    pub start_line: u32,
    pub end_line: u32,
    pub kind: CommentKind,
    /// Comment body with the delimiter tokens removed.
    pub raw_text: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tags: Tags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construct: Option<Construct>,
}

impl CommentRecord {
    /// First entry of a tag, if present.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&TagEntry> {
        self.tags.get(name).and_then(|entries| entries.first())
    }

    /// All entries recorded for a tag, in source order.
    #[must_use]
    pub fn tag_all(&self, name: &str) -> &[TagEntry] {
        self.tags.get(name).map_or(&[], Vec::as_slice)
    }

    /// The body with comment alignment removed.
    ///
    /// Strips `*` gutters (or the common indentation when there is no
    /// gutter), trailing whitespace, and leading/trailing blank lines.
    #[must_use]
    pub fn text(&self) -> String {
        crate::helpers::dedent_comment_body(&self.raw_text)
    }
}
