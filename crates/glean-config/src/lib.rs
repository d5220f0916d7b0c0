//! # glean-config
//!
//! Layered configuration loading for glean using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GLEAN_*` prefix, `__` as separator)
//! 2. Project-level `.glean/config.toml`
//! 3. User-level `~/.config/glean/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GLEAN_EXTRACTION__MERGE_BLANK_LINES` -> `extraction.merge_blank_lines`.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use glean_config::GleanConfig;
//!
//! let config = GleanConfig::load_with_dotenv().expect("config");
//! let registry = config.registry().expect("languages");
//! let extractor = glean_parser::Extractor::new(&registry).with_options(config.extraction.options());
//! ```

mod error;
mod extraction;
mod language;

pub use error::ConfigError;
pub use extraction::ExtractionConfig;
pub use language::{LanguageConfig, build_registry};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use glean_parser::ProfileRegistry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG: &str = ".glean/config.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "GLEAN_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GleanConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub languages: Vec<LanguageConfig>,
}

impl GleanConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a source fails to parse or a value is
    /// out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate a config from any figment.
    ///
    /// # Errors
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.extraction.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain: defaults, the user file,
    /// `.glean/config.toml`, then `GLEAN_*` variables. Later layers win.
    ///
    /// Public so callers can layer an explicit `--config` file on top.
    pub fn figment() -> Figment {
        Self::global_config_path()
            .into_iter()
            .chain(std::iter::once(PathBuf::from(PROJECT_CONFIG)))
            .filter(|path| path.exists())
            .fold(Figment::from(Serialized::defaults(Self::default())), |figment, path| {
                figment.merge(Toml::file(path))
            })
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Profile registry with the built-ins plus configured `[[languages]]`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for an unknown `base` or an invalid profile.
    pub fn registry(&self) -> Result<ProfileRegistry, ConfigError> {
        build_registry(&self.languages)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("glean").join("config.toml"))
    }

    /// Load the nearest `.env` at most two levels above the crate being
    /// built, else from the current directory. Missing files are ignored.
    pub fn load_dotenv_from_workspace() {
        let near_manifest = std::env::var_os("CARGO_MANIFEST_DIR").and_then(|dir| {
            Path::new(&dir)
                .ancestors()
                .take(3)
                .map(|ancestor| ancestor.join(".env"))
                .find(|candidate| candidate.exists())
        });
        let _ = match near_manifest {
            Some(path) => dotenvy::from_path(&path),
            None => dotenvy::dotenv().map(drop),
        };
    }
}
