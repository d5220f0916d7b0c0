//! Doc-tag and annotation-marker parsing.
//!
//! Both passes are purely additive: a comment without `@tags` or markers
//! yields empty results, never an error.

use crate::helpers::strip_alignment;
use crate::types::{Marker, MarkerKind, TagEntry, Tags};

/// Tags whose first word names the thing being described.
const NAMED_TAGS: &[&str] = &["param", "tparam", "throws", "throw", "exception", "retval"];

/// Parse `@tag` lines into a tag table.
///
/// Lines are matched after stripping indentation and `*` gutters. Text on
/// the following lines continues the previous tag until a blank line or
/// the next tag. Unknown tag names are kept as-is.
#[must_use]
pub fn parse_tags(raw: &str) -> Tags {
    let mut tags = Tags::new();
    let mut current: Option<String> = None;

    for line in raw.lines() {
        let line = strip_alignment(line).trim_end();
        if line.is_empty() {
            current = None;
            continue;
        }

        if let Some((name, rest)) = split_tag(line) {
            let entry = if NAMED_TAGS.contains(&name) {
                let (param, desc) = split_first_word(rest);
                TagEntry::new(param, desc)
            } else {
                TagEntry::new(None, rest)
            };
            tags.entry(name.to_string()).or_default().push(entry);
            current = Some(name.to_string());
            continue;
        }

        let Some(entry) = current
            .as_deref()
            .and_then(|name| tags.get_mut(name))
            .and_then(|entries| entries.last_mut())
        else {
            continue;
        };
        if !entry.description.is_empty() {
            entry.description.push(' ');
        }
        entry.description.push_str(line);
    }
    tags
}

/// `@name[dir] rest` → `(name, rest)`.
fn split_tag(line: &str) -> Option<(&str, &str)> {
    let after_at = line.strip_prefix('@')?;
    let name_len = after_at
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(after_at.len());
    if name_len == 0 {
        return None;
    }
    let (name, mut rest) = after_at.split_at(name_len);
    if rest.starts_with('[') {
        rest = rest.find(']').map_or("", |close| &rest[close + 1..]);
    }
    Some((name, rest.trim()))
}

fn split_first_word(text: &str) -> (Option<&str>, &str) {
    let text = text.trim();
    if text.is_empty() {
        return (None, "");
    }
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (Some(word), rest.trim()),
        None => (Some(text), ""),
    }
}

/// Find annotation markers, at most one per line, in source order.
///
/// A marker is one of the exact keywords at a word boundary, followed by
/// `:` or whitespace. Its text is the rest of that line. `first_line` is
/// the source line of the first line of `raw`.
#[must_use]
pub fn find_markers(raw: &str, first_line: u32) -> Vec<Marker> {
    let mut markers = Vec::new();
    for (line, number) in raw.lines().zip(first_line..) {
        if let Some((kind, text)) = marker_in_line(line) {
            markers.push(Marker {
                kind,
                text: text.to_string(),
                line: number,
            });
        }
    }
    markers
}

fn marker_in_line(line: &str) -> Option<(MarkerKind, &str)> {
    let mut prev: Option<char> = None;
    for (at, c) in line.char_indices() {
        let at_boundary = !prev.is_some_and(|p| p.is_alphanumeric() || p == '_');
        prev = Some(c);
        if !at_boundary || !c.is_ascii_uppercase() {
            continue;
        }
        let rest = &line[at..];
        for kind in MarkerKind::ALL {
            let Some(after) = rest.strip_prefix(kind.keyword()) else {
                continue;
            };
            match after.chars().next() {
                Some(':') => return Some((kind, after[1..].trim())),
                Some(next) if next.is_whitespace() => return Some((kind, after.trim())),
                _ => {}
            }
        }
    }
    None
}
