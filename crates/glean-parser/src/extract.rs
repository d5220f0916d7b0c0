//! Extraction pipeline: scan, collect, locate, parse tags.

use serde::{Deserialize, Serialize};

use crate::collector::{self, RawComment};
use crate::error::ExtractError;
use crate::helpers::LineIndex;
use crate::locator::Locator;
use crate::profile::{self, LanguageProfile, ProfileRegistry};
use crate::scanner::Scanner;
use crate::tags::{find_markers, parse_tags};
use crate::types::{CommentKind, CommentRecord, ExtractionResult, SourceRange, Span, Tags};

/// Default look-ahead window for construct attachment, in bytes.
pub const DEFAULT_MAX_LOOKAHEAD: usize = 4096;

/// Knobs for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Blank lines allowed between two line comments that still merge.
    pub merge_blank_lines: usize,
    /// How far past a comment the construct locator may read.
    pub max_lookahead_bytes: usize,
    /// Parse `@tags` in plain line comments too, not only in block and doc
    /// comments.
    pub tags_in_line_comments: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            merge_blank_lines: 0,
            max_lookahead_bytes: DEFAULT_MAX_LOOKAHEAD,
            tags_in_line_comments: false,
        }
    }
}

/// Extracts comments using an explicit registry and options.
///
/// ```
/// use glean_parser::{ExtractOptions, Extractor, ProfileRegistry};
///
/// let registry = ProfileRegistry::with_builtins();
/// let extractor = Extractor::new(&registry).with_options(ExtractOptions::default());
/// let result = extractor.extract("/// Answer\nconst int ANSWER = 42;\n", "cpp").unwrap();
/// assert_eq!(result.comments[0].construct.as_ref().unwrap().name, "ANSWER");
/// ```
#[derive(Debug, Clone)]
pub struct Extractor<'r> {
    registry: &'r ProfileRegistry,
    options: ExtractOptions,
}

impl<'r> Extractor<'r> {
    pub fn new(registry: &'r ProfileRegistry) -> Self {
        Self {
            registry,
            options: ExtractOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract all comments from `source` written in `language`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnknownLanguage`] if no registered profile
    /// answers to `language`. Nothing is extracted in that case.
    pub fn extract(&self, source: &str, language: &str) -> Result<ExtractionResult, ExtractError> {
        let profile = self.registry.resolve(language)?;
        Ok(extract_with_profile(source, profile, &self.options))
    }
}

/// Extract comments using the process-wide registry and default options.
///
/// # Errors
///
/// Returns [`ExtractError::UnknownLanguage`] for an unregistered language.
pub fn extract_comments(source: &str, language: &str) -> Result<ExtractionResult, ExtractError> {
    Extractor::new(profile::global()).extract(source, language)
}

/// Run the whole pipeline against one profile. Never fails: malformed
/// input produces diagnostics, not errors.
pub fn extract_with_profile(
    source: &str,
    profile: &LanguageProfile,
    options: &ExtractOptions,
) -> ExtractionResult {
    let mut scanner = Scanner::new(source, profile);
    let spans: Vec<Span> = scanner.by_ref().collect();
    let mut diagnostics = scanner.into_diagnostics();

    let lines = LineIndex::new(source);
    let locator = Locator::new(source, &spans, profile, options.max_lookahead_bytes);
    let raw = collector::collect(source, spans.iter().copied(), profile, options.merge_blank_lines);

    let comments: Vec<CommentRecord> = raw
        .into_iter()
        .map(|comment| build_record(comment, &locator, &lines, options))
        .collect();

    for diagnostic in &mut diagnostics {
        diagnostic.line = lines.line(diagnostic.offset);
        tracing::warn!(
            language = %profile.id,
            line = diagnostic.line,
            offset = diagnostic.offset,
            "{}",
            diagnostic.kind
        );
    }

    tracing::debug!(
        language = %profile.id,
        bytes = source.len(),
        comments = comments.len(),
        diagnostics = diagnostics.len(),
        "extracted comments"
    );

    ExtractionResult {
        language: profile.id.clone(),
        comments,
        diagnostics,
    }
}

fn build_record(
    comment: RawComment,
    locator: &Locator<'_>,
    lines: &LineIndex,
    options: &ExtractOptions,
) -> CommentRecord {
    let start_line = lines.line(comment.start);
    let end_line = lines.line(comment.end.saturating_sub(1).max(comment.start));

    let construct = locator.locate(comment.end);
    if let Some(found) = &construct {
        tracing::trace!(line = start_line, kind = %found.kind, name = %found.name, "attached construct");
    }

    let tags = if comment.kind != CommentKind::Line || options.tags_in_line_comments {
        parse_tags(&comment.raw_text)
    } else {
        Tags::new()
    };
    let markers = find_markers(&comment.raw_text, start_line);

    CommentRecord {
        span: SourceRange::new(comment.start, comment.end),
        start_line,
        end_line,
        kind: comment.kind,
        raw_text: comment.raw_text,
        tags,
        markers,
        construct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiagnosticKind, MarkerKind};
    use pretty_assertions::assert_eq;

    fn cpp(source: &str) -> ExtractionResult {
        extract_with_profile(source, &LanguageProfile::cpp(), &ExtractOptions::default())
    }

    #[test]
    fn lines_are_one_based_and_inclusive() {
        let result = cpp("int a;\n/*\n * two\n */\nint b;\n");
        let comment = &result.comments[0];
        assert_eq!((comment.start_line, comment.end_line), (2, 4));
    }

    #[test]
    fn diagnostics_carry_lines() {
        let result = cpp("int a;\n\n/* never closed");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UnterminatedComment);
        assert_eq!(result.diagnostics[0].line, 3);
    }

    #[test]
    fn line_comment_tags_are_opt_in() {
        let source = "// @deprecated use g\nvoid f();\n";
        assert!(cpp(source).comments[0].tags.is_empty());

        let options = ExtractOptions {
            tags_in_line_comments: true,
            ..ExtractOptions::default()
        };
        let result = extract_with_profile(source, &LanguageProfile::cpp(), &options);
        assert_eq!(result.comments[0].tag("deprecated").map(|t| t.description.as_str()), Some("use g"));
    }

    #[test]
    fn markers_report_their_own_line() {
        let result = cpp("int x;\n/*\n * NOTE: first\n * HACK: second\n */\n");
        let found: Vec<(MarkerKind, u32)> =
            result.comments[0].markers.iter().map(|m| (m.kind, m.line)).collect();
        assert_eq!(found, vec![(MarkerKind::Note, 3), (MarkerKind::Hack, 4)]);
    }

    #[test]
    fn blank_line_merge_is_configurable() {
        let source = "// one\n\n// two\nint x;\n";
        assert_eq!(cpp(source).len(), 2);

        let options = ExtractOptions {
            merge_blank_lines: 1,
            ..ExtractOptions::default()
        };
        let merged = extract_with_profile(source, &LanguageProfile::cpp(), &options);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.comments[0].raw_text, "one\n\ntwo");
        assert_eq!(merged.comments[0].span.start, 0);
    }

    #[test]
    fn unknown_language_fails_fast() {
        let registry = ProfileRegistry::with_builtins();
        let err = Extractor::new(&registry).extract("// x", "cobol").unwrap_err();
        assert!(matches!(err, ExtractError::UnknownLanguage(ref id) if id == "cobol"));
    }

    #[test]
    fn extractor_resolves_aliases() {
        let registry = ProfileRegistry::with_builtins();
        let result = Extractor::new(&registry).extract("/// d\nfn f() {}\n", "RS").unwrap();
        assert_eq!(result.language, "rust");
        assert_eq!(result.comments[0].kind, CommentKind::DocBlock);
    }
}
