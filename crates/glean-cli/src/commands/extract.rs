use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use figment::providers::{Format, Toml};
use glean_config::GleanConfig;
use glean_parser::{
    CommentKind, CommentRecord, Diagnostic, ExtractOptions, LanguageProfile, ProfileRegistry,
    extract_with_profile,
};
use rayon::prelude::*;
use serde::Serialize;

use crate::cli::{ExtractArgs, GlobalFlags};
use crate::output::output_list;
use crate::walk::discover;

/// Extraction output for one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    pub language: String,
    pub comments: Vec<CommentRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Load layered config, with `--config` merged above the project file.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<GleanConfig> {
    GleanConfig::load_dotenv_from_workspace();
    let mut figment = GleanConfig::figment();
    if let Some(path) = &flags.config {
        if !path.is_file() {
            bail!("config file '{}' does not exist", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }
    GleanConfig::from_figment(&figment).context("failed to load glean config")
}

/// Build the configured registry and make it the process-wide one, so
/// `[[languages]]` entries are visible to every extraction entry point.
pub fn install_registry(config: &GleanConfig) -> anyhow::Result<&'static ProfileRegistry> {
    glean_parser::install_global(config.registry()?)
        .map_err(|_| anyhow::anyhow!("language registry is already installed"))?;
    Ok(glean_parser::global())
}

/// Handle `glean extract`.
pub fn handle(args: &ExtractArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = load_config(flags)?;
    let registry = install_registry(&config)?;
    let options = config.extraction.options();

    let reports = collect_reports(args, registry, &options)?;
    tracing::info!(
        files = reports.len(),
        comments = reports.iter().map(|r| r.comments.len()).sum::<usize>(),
        "extraction finished"
    );
    output_list(&reports, flags.format)
}

/// Discover, read and extract every input, sorted by path.
pub fn collect_reports(
    args: &ExtractArgs,
    registry: &ProfileRegistry,
    options: &ExtractOptions,
) -> anyhow::Result<Vec<FileReport>> {
    let forced = args
        .lang
        .as_deref()
        .map(|lang| registry.resolve(lang))
        .transpose()?;
    let kinds: Vec<CommentKind> = args.kinds.iter().copied().map(CommentKind::from).collect();

    let files = discover(&args.paths, registry)?;
    tracing::debug!(files = files.len(), "discovered inputs");

    let reports: Vec<Option<FileReport>> = files
        .par_iter()
        .map(|path| {
            let profile = match forced.or_else(|| registry.resolve_path(path)) {
                Some(profile) => profile,
                None => bail!(
                    "cannot detect the language of '{}'; pass --lang",
                    path.display()
                ),
            };
            extract_file(path, profile, options, &kinds, args.attached_only)
        })
        .collect::<anyhow::Result<_>>()?;

    Ok(reports.into_iter().flatten().collect())
}

fn extract_file(
    path: &Path,
    profile: &LanguageProfile,
    options: &ExtractOptions,
    kinds: &[CommentKind],
    attached_only: bool,
) -> anyhow::Result<Option<FileReport>> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) if error.kind() == std::io::ErrorKind::InvalidData => {
            tracing::warn!(path = %path.display(), "skipping file that is not valid UTF-8");
            return Ok(None);
        }
        Err(error) => {
            return Err(error).with_context(|| format!("failed to read '{}'", path.display()));
        }
    };

    let result = extract_with_profile(&source, profile, options);
    let comments = result
        .comments
        .into_iter()
        .filter(|c| kinds.is_empty() || kinds.contains(&c.kind))
        .filter(|c| !attached_only || c.construct.is_some())
        .collect();

    Ok(Some(FileReport {
        path: display_path(path),
        language: result.language,
        comments,
        diagnostics: result.diagnostics,
    }))
}

fn display_path(path: &Path) -> String {
    path.strip_prefix(".")
        .map(PathBuf::from)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::KindArg;
    use glean_config::LanguageConfig;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn args(paths: Vec<PathBuf>) -> ExtractArgs {
        ExtractArgs {
            paths,
            lang: None,
            kinds: Vec::new(),
            attached_only: false,
        }
    }

    fn write_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("math.c"),
            "/** Adds. */\nint add(int a, int b);\n// TODO: overflow\nconst int LIMIT = 1;\n",
        )
        .unwrap();
        fs::write(dir.path().join("lib.rs"), "/// Answer\npub const ANSWER: u32 = 42;\n").unwrap();
        fs::write(dir.path().join("README.md"), "// not code").unwrap();
        dir
    }

    #[test]
    fn directory_walk_extracts_known_languages_in_path_order() {
        let dir = write_tree();
        let registry = ProfileRegistry::with_builtins();
        let reports =
            collect_reports(&args(vec![dir.path().to_path_buf()]), &registry, &ExtractOptions::default())
                .unwrap();

        let languages: Vec<&str> = reports.iter().map(|r| r.language.as_str()).collect();
        assert_eq!(languages, vec!["rust", "c"]);
        assert_eq!(reports[1].comments.len(), 2);
        assert_eq!(
            reports[0].comments[0].construct.as_ref().map(|c| c.name.as_str()),
            Some("ANSWER")
        );
    }

    #[test]
    fn kind_and_attachment_filters_apply() {
        let dir = write_tree();
        let registry = ProfileRegistry::with_builtins();
        let mut filtered = args(vec![dir.path().join("math.c")]);
        filtered.kinds = vec![KindArg::Line];
        let reports = collect_reports(&filtered, &registry, &ExtractOptions::default()).unwrap();
        assert_eq!(reports[0].comments.len(), 1);
        assert_eq!(reports[0].comments[0].kind, CommentKind::Line);

        let mut attached = args(vec![dir.path().join("math.c")]);
        attached.attached_only = true;
        let reports = collect_reports(&attached, &registry, &ExtractOptions::default()).unwrap();
        let names: Vec<&str> = reports[0]
            .comments
            .iter()
            .filter_map(|c| c.construct.as_ref().map(|k| k.name.as_str()))
            .collect();
        assert_eq!(names, vec!["add", "LIMIT"]);
    }

    #[test]
    fn explicit_file_without_language_needs_lang() {
        let dir = write_tree();
        let registry = ProfileRegistry::with_builtins();
        let readme = dir.path().join("README.md");

        let err = collect_reports(&args(vec![readme.clone()]), &registry, &ExtractOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("pass --lang"));

        let mut forced = args(vec![readme]);
        forced.lang = Some("cpp".to_string());
        let reports = collect_reports(&forced, &registry, &ExtractOptions::default()).unwrap();
        assert_eq!(reports[0].language, "cpp");
        assert_eq!(reports[0].comments[0].raw_text, "not code");
    }

    #[test]
    fn unknown_forced_language_is_an_error() {
        let dir = write_tree();
        let registry = ProfileRegistry::with_builtins();
        let mut forced = args(vec![dir.path().to_path_buf()]);
        forced.lang = Some("cobol".to_string());
        let err = collect_reports(&forced, &registry, &ExtractOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown language: cobol");
    }

    #[test]
    fn configured_languages_become_the_global_registry() {
        let config = GleanConfig {
            languages: vec![LanguageConfig {
                id: "glsl".to_string(),
                base: Some("c".to_string()),
                extensions: vec!["frag".to_string()],
                ..LanguageConfig::default()
            }],
            ..GleanConfig::default()
        };
        let registry = install_registry(&config).unwrap();
        assert!(registry.contains("glsl"));
        let result = glean_parser::extract_comments("// light\n", "glsl").unwrap();
        assert_eq!(result.language, "glsl");

        let err = install_registry(&config).unwrap_err();
        assert!(err.to_string().contains("already installed"));
    }

    #[test]
    fn non_utf8_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bin.c"), [0x2f, 0x2f, 0xff, 0xfe]).unwrap();
        let registry = ProfileRegistry::with_builtins();
        let reports =
            collect_reports(&args(vec![dir.path().to_path_buf()]), &registry, &ExtractOptions::default())
                .unwrap();
        assert!(reports.is_empty());
    }
}
