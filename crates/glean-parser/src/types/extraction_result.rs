use serde::{Deserialize, Serialize};

use super::{CommentKind, CommentRecord, Diagnostic};

/// Everything one extraction call produced, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub language: String,
    pub comments: Vec<CommentRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ExtractionResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommentRecord> {
        self.comments.iter()
    }

    pub fn of_kind(&self, kind: CommentKind) -> impl Iterator<Item = &CommentRecord> {
        self.comments.iter().filter(move |c| c.kind == kind)
    }
}

impl<'a> IntoIterator for &'a ExtractionResult {
    type Item = &'a CommentRecord;
    type IntoIter = std::slice::Iter<'a, CommentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.comments.iter()
    }
}
