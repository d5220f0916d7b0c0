//! `[extraction]` section: knobs passed to every extraction run.

use glean_parser::{DEFAULT_MAX_LOOKAHEAD, ExtractOptions};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_max_lookahead() -> usize {
    DEFAULT_MAX_LOOKAHEAD
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Blank lines allowed between line comments that still merge.
    #[serde(default)]
    pub merge_blank_lines: usize,

    /// Bytes the construct locator may read past a comment.
    #[serde(default = "default_max_lookahead")]
    pub max_lookahead_bytes: usize,

    /// Parse `@tags` in plain `//` comments as well.
    #[serde(default)]
    pub tags_in_line_comments: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            merge_blank_lines: 0,
            max_lookahead_bytes: default_max_lookahead(),
            tags_in_line_comments: false,
        }
    }
}

impl ExtractionConfig {
    /// Reject values that would silently disable extraction features.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when `max_lookahead_bytes` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lookahead_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "extraction.max_lookahead_bytes".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            merge_blank_lines: self.merge_blank_lines,
            max_lookahead_bytes: self.max_lookahead_bytes,
            tags_in_line_comments: self.tags_in_line_comments,
        }
    }
}
