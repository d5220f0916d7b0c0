//! Text helpers shared by the collector, locator and tag parser.

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip leading indentation and a `*` gutter from one comment line.
///
/// `"   * @param a x"` becomes `"@param a x"`. Lines without a gutter are
/// only left-trimmed.
pub fn strip_alignment(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('*') {
        Some(rest) if !rest.starts_with('/') => rest.trim_start_matches('*').trim_start(),
        _ => trimmed,
    }
}

/// Remove gutters or common indentation plus surrounding blank lines.
pub fn dedent_comment_body(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();
    let has_gutter = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .all(|l| l.trim_start().starts_with('*'));

    let body: Vec<String> = if has_gutter {
        lines
            .iter()
            .map(|l| {
                let t = l.trim_start();
                let t = t.strip_prefix('*').unwrap_or(t);
                t.strip_prefix(' ').unwrap_or(t).trim_end().to_string()
            })
            .collect()
    } else {
        let indent = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.len() - l.trim_start().len())
            .min()
            .unwrap_or(0);
        lines
            .iter()
            .map(|l| {
                if l.trim().is_empty() {
                    String::new()
                } else {
                    l.get(indent..).unwrap_or_else(|| l.trim_start()).trim_end().to_string()
                }
            })
            .collect()
    };

    let first = body.iter().position(|l| !l.is_empty());
    let last = body.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => body[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Byte offset to 1-based line lookups over one source buffer.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    /// 1-based line containing `offset`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn line(&self, offset: usize) -> u32 {
        self.starts.partition_point(|&start| start <= offset) as u32
    }

    /// Byte offset where the line containing `offset` begins.
    pub fn line_start(&self, offset: usize) -> usize {
        let idx = self.starts.partition_point(|&start| start <= offset);
        self.starts[idx.saturating_sub(1)]
    }
}
