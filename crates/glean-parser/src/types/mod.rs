//! Data types produced by comment extraction.

mod comment_record;
mod construct;
mod diagnostic;
mod extraction_result;
mod marker;
mod span;

pub use comment_record::{CommentKind, CommentRecord, TagEntry, Tags};
pub use construct::{Construct, ConstructKind};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use extraction_result::ExtractionResult;
pub use marker::{Marker, MarkerKind};
pub use span::{SourceRange, Span, SpanKind};
