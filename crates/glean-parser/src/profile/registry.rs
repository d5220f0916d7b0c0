//! Language id → profile table.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use super::LanguageProfile;
use crate::error::ExtractError;

/// Table of known languages.
///
/// Built once at startup; extraction only ever reads it, so a shared
/// reference can be handed to any number of concurrent extractions.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, LanguageProfile>,
}

impl ProfileRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with `c`, `cpp`, `rust`, `go`, `java` and `python`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for profile in LanguageProfile::builtins() {
            registry.profiles.insert(profile.id.clone(), profile);
        }
        registry
    }

    /// Insert a profile, replacing any previous profile with the same id.
    ///
    /// # Errors
    /// Returns `ExtractError::InvalidProfile` when the id is empty, a comment
    /// delimiter is empty, or the profile declares no comment syntax at all.
    pub fn register(&mut self, profile: LanguageProfile) -> Result<(), ExtractError> {
        validate(&profile)?;
        let id = profile.id.to_ascii_lowercase();
        if self.profiles.insert(id.clone(), profile).is_some() {
            tracing::debug!(language = %id, "replaced language profile");
        }
        Ok(())
    }

    /// Look up a profile by id or alias, ignoring ASCII case.
    ///
    /// # Errors
    /// Returns `ExtractError::UnknownLanguage` if nothing answers to `id`.
    pub fn resolve(&self, id: &str) -> Result<&LanguageProfile, ExtractError> {
        self.profiles
            .get(&id.to_ascii_lowercase())
            .or_else(|| self.profiles.values().find(|p| p.answers_to(id)))
            .ok_or_else(|| ExtractError::UnknownLanguage(id.to_string()))
    }

    /// Pick a profile from a file extension.
    ///
    /// Returns `None` for unsupported or missing extensions.
    #[must_use]
    pub fn resolve_path(&self, path: &Path) -> Option<&LanguageProfile> {
        let ext = path.extension()?.to_str()?;
        self.profiles
            .values()
            .find(|p| p.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.resolve(id).is_ok()
    }

    /// Registered profiles ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageProfile> {
        self.profiles.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn validate(profile: &LanguageProfile) -> Result<(), ExtractError> {
    let invalid = |reason: &str| ExtractError::InvalidProfile {
        id: profile.id.clone(),
        reason: reason.to_string(),
    };

    if profile.id.trim().is_empty() {
        return Err(invalid("id must not be empty"));
    }
    if profile.line_comment.is_none() && profile.block_comment.is_none() {
        return Err(invalid("no line or block comment syntax"));
    }
    if profile.line_comment.as_deref().is_some_and(str::is_empty) {
        return Err(invalid("line comment prefix is empty"));
    }
    if let Some(block) = &profile.block_comment {
        if block.open.is_empty() || block.close.is_empty() {
            return Err(invalid("block comment delimiters must not be empty"));
        }
    }
    if profile.doc_block_opens.iter().any(String::is_empty)
        || profile.doc_line_prefixes.iter().any(String::is_empty)
    {
        return Err(invalid("doc comment markers must not be empty"));
    }
    Ok(())
}

static GLOBAL: OnceLock<ProfileRegistry> = OnceLock::new();

/// Install the process-wide registry. Call once at startup, before any
/// extraction runs.
///
/// # Errors
/// Hands the registry back if a global registry is already in place
/// (explicitly installed, or defaulted by an earlier [`global`] call).
pub fn install_global(registry: ProfileRegistry) -> Result<(), ProfileRegistry> {
    GLOBAL.set(registry)
}

/// The process-wide registry, defaulting to the built-in profiles.
pub fn global() -> &'static ProfileRegistry {
    GLOBAL.get_or_init(ProfileRegistry::with_builtins)
}
