use serde::Serialize;

use glean_parser::{DeclStyle, LanguageProfile};

use crate::cli::GlobalFlags;
use crate::commands::extract::{install_registry, load_config};
use crate::output::output_list;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct LanguageSummary {
    id: String,
    aliases: Vec<String>,
    extensions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_comment: Option<[String; 2]>,
    doc_comments: Vec<String>,
    declaration_style: DeclStyle,
}

impl From<&LanguageProfile> for LanguageSummary {
    fn from(profile: &LanguageProfile) -> Self {
        let doc_comments = profile
            .doc_block_opens
            .iter()
            .chain(&profile.doc_line_prefixes)
            .cloned()
            .collect();
        Self {
            id: profile.id.clone(),
            aliases: profile.aliases.clone(),
            extensions: profile.extensions.clone(),
            line_comment: profile.line_comment.clone(),
            block_comment: profile
                .block_comment
                .as_ref()
                .map(|b| [b.open.clone(), b.close.clone()]),
            doc_comments,
            declaration_style: profile.syntax.style,
        }
    }
}

/// Handle `glean languages`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = load_config(flags)?;
    let registry = install_registry(&config)?;
    let summaries: Vec<LanguageSummary> = registry.iter().map(LanguageSummary::from).collect();
    output_list(&summaries, flags.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_lists_comment_syntax() {
        let summary = LanguageSummary::from(&LanguageProfile::rust());
        assert_eq!(summary.id, "rust");
        assert_eq!(summary.line_comment.as_deref(), Some("//"));
        assert_eq!(
            summary.block_comment,
            Some(["/*".to_string(), "*/".to_string()])
        );
        assert!(summary.doc_comments.contains(&"///".to_string()));
        assert_eq!(summary.declaration_style, DeclStyle::NameFirst);
    }

    #[test]
    fn summary_serializes_style_in_snake_case() {
        let json = serde_json::to_value(LanguageSummary::from(&LanguageProfile::c())).unwrap();
        assert_eq!(json["declaration_style"], "type_first");
        assert_eq!(json["id"], "c");
    }
}
