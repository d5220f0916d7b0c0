//! Comment collector: turns comment spans into comments.
//!
//! Strips delimiters, decides doc vs plain, and folds runs of adjacent line
//! comments into one logical comment.

use crate::profile::LanguageProfile;
use crate::types::{CommentKind, Span, SpanKind};

/// A comment before construct lookup and tag parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    pub start: usize,
    pub end: usize,
    pub kind: CommentKind,
    pub raw_text: String,
}

/// A run of line comments still open for merging.
struct LineRun {
    start: usize,
    end: usize,
    doc: bool,
    trailing: bool,
    bodies: Vec<String>,
}

impl LineRun {
    fn finish(self) -> RawComment {
        RawComment {
            start: self.start,
            end: self.end,
            kind: if self.doc {
                CommentKind::DocBlock
            } else {
                CommentKind::Line
            },
            raw_text: self.bodies.join("\n"),
        }
    }
}

/// Collect comments from a span stream, in source order.
///
/// `merge_blank_lines` is how many blank lines may separate two line
/// comments that still merge; `0` requires them on adjacent lines.
pub fn collect<I>(
    source: &str,
    spans: I,
    profile: &LanguageProfile,
    merge_blank_lines: usize,
) -> Vec<RawComment>
where
    I: IntoIterator<Item = Span>,
{
    let mut out = Vec::new();
    let mut run: Option<LineRun> = None;

    for span in spans {
        match span.kind {
            SpanKind::LineComment => {
                let text = span.text(source);
                let (doc, body) = split_line_comment(text, profile);
                let trailing = has_code_before(source, span.start);

                if let Some(open) = run.as_mut() {
                    if let Some(blank) = mergeable(source, open, &span, doc, trailing, merge_blank_lines) {
                        open.bodies.extend(std::iter::repeat_n(String::new(), blank));
                        open.bodies.push(body);
                        open.end = span.end;
                        continue;
                    }
                }
                if let Some(done) = run.take() {
                    out.push(done.finish());
                }
                run = Some(LineRun {
                    start: span.start,
                    end: span.end,
                    doc,
                    trailing,
                    bodies: vec![body],
                });
            }
            SpanKind::BlockComment => {
                if let Some(done) = run.take() {
                    out.push(done.finish());
                }
                out.push(block_comment(source, &span, profile));
            }
            SpanKind::Code | SpanKind::StringLiteral | SpanKind::CharLiteral => {
                let text = span.text(source);
                if !text.trim().is_empty() {
                    if let Some(done) = run.take() {
                        out.push(done.finish());
                    }
                }
            }
        }
    }
    if let Some(done) = run.take() {
        out.push(done.finish());
    }
    out
}

/// Number of blank lines between `run` and `next` if they merge.
fn mergeable(
    source: &str,
    run: &LineRun,
    next: &Span,
    doc: bool,
    trailing: bool,
    merge_blank_lines: usize,
) -> Option<usize> {
    if run.trailing || trailing || run.doc != doc {
        return None;
    }
    let gap = &source[run.end..next.start];
    if !gap.trim().is_empty() {
        return None;
    }
    let breaks = gap.matches('\n').count();
    if breaks == 0 || breaks > merge_blank_lines + 1 {
        return None;
    }
    Some(breaks - 1)
}

fn has_code_before(source: &str, offset: usize) -> bool {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    !source[line_start..offset].trim().is_empty()
}

/// `(is_doc, body)` for one `//`-style line.
fn split_line_comment(text: &str, profile: &LanguageProfile) -> (bool, String) {
    let doc_prefix = profile
        .doc_line_prefixes
        .iter()
        .find(|p| is_marker_match(text, p));
    let prefix_len = doc_prefix.map_or_else(
        || profile.line_comment.as_ref().map_or(0, String::len),
        String::len,
    );
    let body = &text[prefix_len.min(text.len())..];
    let body = body.strip_prefix(' ').unwrap_or(body).trim_end();
    (doc_prefix.is_some(), body.to_string())
}

/// `text` opens with `marker` and does not repeat its last character
/// (`////` and `/***` are banners, not doc comments).
fn is_marker_match(text: &str, marker: &str) -> bool {
    let Some(rest) = text.strip_prefix(marker) else {
        return false;
    };
    let last = marker.chars().last();
    rest.chars().next() != last || last.is_none()
}

fn block_comment(source: &str, span: &Span, profile: &LanguageProfile) -> RawComment {
    let text = span.text(source);
    let (open, close) = profile
        .block_comment
        .as_ref()
        .map_or(("", ""), |b| (b.open.as_str(), b.close.as_str()));

    let doc_open = profile
        .doc_block_opens
        .iter()
        .find(|o| is_marker_match(text, o) && text.len() >= o.len() + close.len());
    let open_len = doc_open.map_or(open.len(), String::len);

    let terminated = text.len() >= open_len + close.len() && text.ends_with(close);
    let body_end = if terminated {
        text.len() - close.len()
    } else {
        text.len()
    };

    RawComment {
        start: span.start,
        end: span.end,
        kind: if doc_open.is_some() {
            CommentKind::DocBlock
        } else {
            CommentKind::Block
        },
        raw_text: text[open_len.min(body_end)..body_end].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn collect_with(source: &str, profile: &LanguageProfile, blank: usize) -> Vec<RawComment> {
        collect(source, Scanner::new(source, profile), profile, blank)
    }

    fn collect_c(source: &str) -> Vec<RawComment> {
        collect_with(source, &LanguageProfile::cpp(), 0)
    }

    fn summary(comments: &[RawComment]) -> Vec<(CommentKind, &str)> {
        comments
            .iter()
            .map(|c| (c.kind, c.raw_text.as_str()))
            .collect()
    }

    #[test]
    fn adjacent_line_comments_merge_in_order() {
        let source = "// NOTE: This method should be optimized\n    // HACK: Quick fix\nvoid process();";
        let comments = collect_c(source);
        assert_eq!(
            summary(&comments),
            vec![(
                CommentKind::Line,
                "NOTE: This method should be optimized\nHACK: Quick fix"
            )]
        );
        assert_eq!(comments[0].start, 0);
        assert_eq!(
            &source[comments[0].start..comments[0].end],
            "// NOTE: This method should be optimized\n    // HACK: Quick fix"
        );
    }

    #[test]
    fn blank_line_separates_line_comments_by_default() {
        let source = "// one\n\n// two\n";
        assert_eq!(
            summary(&collect_c(source)),
            vec![(CommentKind::Line, "one"), (CommentKind::Line, "two")]
        );
    }

    #[test]
    fn blank_line_threshold_is_configurable() {
        let source = "// one\n\n// two\n";
        let comments = collect_with(source, &LanguageProfile::c(), 1);
        assert_eq!(summary(&comments), vec![(CommentKind::Line, "one\n\ntwo")]);
    }

    #[test]
    fn code_between_line_comments_prevents_merge() {
        let source = "    // Inline comment\n    return a + b; // End of line comment\n}";
        assert_eq!(
            summary(&collect_c(source)),
            vec![
                (CommentKind::Line, "Inline comment"),
                (CommentKind::Line, "End of line comment"),
            ]
        );
    }

    #[test]
    fn trailing_comment_does_not_absorb_next_line() {
        let source = "int x; // trailing\n// own line\nint y;";
        assert_eq!(
            summary(&collect_c(source)),
            vec![
                (CommentKind::Line, "trailing"),
                (CommentKind::Line, "own line"),
            ]
        );
    }

    #[test]
    fn doc_and_plain_line_comments_do_not_merge() {
        let source = "// plain\n/// Maximum retry attempts\nconst int MAX_RETRIES = 3;";
        assert_eq!(
            summary(&collect_c(source)),
            vec![
                (CommentKind::Line, "plain"),
                (CommentKind::DocBlock, "Maximum retry attempts"),
            ]
        );
    }

    #[test]
    fn triple_slash_run_is_one_doc_block() {
        let source = "/// Doc comment\n///\n/// # Returns\n/// Sum\npub fn add() {}";
        let comments = collect_with(source, &LanguageProfile::rust(), 0);
        assert_eq!(
            summary(&comments),
            vec![(CommentKind::DocBlock, "Doc comment\n\n# Returns\nSum")]
        );
    }

    #[rstest]
    #[case("/** doc */", CommentKind::DocBlock, " doc ")]
    #[case("/*! doc */", CommentKind::DocBlock, " doc ")]
    #[case("/* plain */", CommentKind::Block, " plain ")]
    #[case("/*** banner ***/", CommentKind::Block, "** banner **")]
    #[case("/**/", CommentKind::Block, "")]
    #[case("//// banner", CommentKind::Line, "// banner")]
    #[case("/// doc", CommentKind::DocBlock, "doc")]
    #[case("/* open", CommentKind::Block, " open")]
    #[case("/** open", CommentKind::DocBlock, " open")]
    fn classifies_and_strips_delimiters(
        #[case] source: &str,
        #[case] kind: CommentKind,
        #[case] body: &str,
    ) {
        let comments = collect_c(source);
        assert_eq!(summary(&comments), vec![(kind, body)]);
    }

    #[test]
    fn block_comment_keeps_inner_layout() {
        let source = "/*\n * Multi-line block comment\n * describing the User class\n */\nclass User {};";
        let comments = collect_c(source);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].kind, CommentKind::Block);
        assert_eq!(
            comments[0].raw_text,
            "\n * Multi-line block comment\n * describing the User class\n "
        );
    }

    #[test]
    fn block_comment_breaks_line_run() {
        let source = "// a\n/* b */\n// c\n";
        assert_eq!(
            summary(&collect_c(source)),
            vec![
                (CommentKind::Line, "a"),
                (CommentKind::Block, " b "),
                (CommentKind::Line, "c"),
            ]
        );
    }

    #[test]
    fn ordering_is_preserved_and_nothing_is_dropped() {
        let source = "/* 1 */ int a; // 2\n// 3\n// 4\nchar *s = \"// no\"; /** 5 */";
        let comments = collect_c(source);
        let starts: Vec<usize> = comments.iter().map(|c| c.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
        assert_eq!(
            summary(&comments),
            vec![
                (CommentKind::Block, " 1 "),
                (CommentKind::Line, "2"),
                (CommentKind::Line, "3\n4"),
                (CommentKind::DocBlock, " 5 "),
            ]
        );
    }
}
