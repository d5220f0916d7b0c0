//! `[[languages]]` entries: extra comment syntaxes registered at startup.
//!
//! ```toml
//! [[languages]]
//! id = "glsl"
//! base = "c"
//! extensions = ["glsl", "vert", "frag"]
//! ```
//!
//! An entry with a `base` starts from that profile's lexical rules and
//! declaration keywords; every field given in the entry replaces the
//! inherited one. Aliases and extensions are never inherited so the new
//! language does not shadow its base.

use glean_parser::{
    BlockDelimiters, DeclarationSyntax, LanguageProfile, ProfileRegistry, RawStringSyntax,
};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageConfig {
    pub id: String,

    /// Registered profile to extend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub extensions: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_comment: Option<String>,

    /// `[open, close]`, e.g. `["/*", "*/"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_comment: Option<[String; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_block_opens: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_line_prefixes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_delimiters: Option<Vec<char>>,

    /// Unescaped, multi-line string delimiters such as Go's backtick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_string_delimiters: Option<Vec<char>>,

    /// Prefixed raw strings, e.g. `{ prefixes = ["r"], style = "hashed" }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_strings: Option<RawStringSyntax>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_delimiters: Option<Vec<char>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escape: Option<char>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_block_comments: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiline_strings: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_may_open_lifetime: Option<bool>,

    /// Declaration keyword tables used to attach comments to constructs.
    /// Replaces the inherited table as a whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<DeclarationSyntax>,
}

impl LanguageConfig {
    /// Build the profile this entry describes, resolving `base` in `registry`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when `base` names an unknown
    /// language.
    pub fn to_profile(&self, registry: &ProfileRegistry) -> Result<LanguageProfile, ConfigError> {
        let mut profile = match &self.base {
            Some(base) => {
                let inherited = registry.resolve(base).map_err(|err| ConfigError::InvalidValue {
                    field: format!("languages.{}.base", self.id),
                    reason: err.to_string(),
                })?;
                LanguageProfile {
                    id: self.id.clone(),
                    aliases: Vec::new(),
                    extensions: Vec::new(),
                    ..inherited.clone()
                }
            }
            None => LanguageProfile::empty(&self.id),
        };

        profile.aliases.clone_from(&self.aliases);
        profile.extensions.clone_from(&self.extensions);
        if let Some(prefix) = &self.line_comment {
            profile.line_comment = Some(prefix.clone());
        }
        if let Some([open, close]) = &self.block_comment {
            profile.block_comment = Some(BlockDelimiters::new(open, close));
        }
        if let Some(opens) = &self.doc_block_opens {
            profile.doc_block_opens.clone_from(opens);
        }
        if let Some(prefixes) = &self.doc_line_prefixes {
            profile.doc_line_prefixes.clone_from(prefixes);
        }
        if let Some(delims) = &self.string_delimiters {
            profile.string_delimiters.clone_from(delims);
        }
        if let Some(delims) = &self.raw_string_delimiters {
            profile.raw_string_delimiters.clone_from(delims);
        }
        if let Some(raw) = &self.raw_strings {
            profile.raw_strings = Some(raw.clone());
        }
        if let Some(delims) = &self.char_delimiters {
            profile.char_delimiters.clone_from(delims);
        }
        if let Some(escape) = self.escape {
            profile.escape = Some(escape);
        }
        if let Some(nested) = self.nested_block_comments {
            profile.nested_block_comments = nested;
        }
        if let Some(multiline) = self.multiline_strings {
            profile.multiline_strings = multiline;
        }
        if let Some(lifetimes) = self.quote_may_open_lifetime {
            profile.quote_may_open_lifetime = lifetimes;
        }
        if let Some(syntax) = &self.syntax {
            profile.syntax = syntax.clone();
        }
        Ok(profile)
    }
}

/// The built-in profiles plus every configured language, in order.
///
/// Later entries may use earlier ones as their `base`.
///
/// # Errors
/// Fails on the first entry with an unknown base or an unusable profile.
pub fn build_registry(languages: &[LanguageConfig]) -> Result<ProfileRegistry, ConfigError> {
    let mut registry = ProfileRegistry::with_builtins();
    for language in languages {
        let profile = language.to_profile(&registry)?;
        registry
            .register(profile)
            .map_err(|source| ConfigError::Language {
                id: language.id.clone(),
                source,
            })?;
    }
    Ok(registry)
}
