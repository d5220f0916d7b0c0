//! Input discovery for `glean extract`.
//!
//! Explicit file arguments are always taken. Directories are walked with the
//! `ignore` crate, so `.gitignore` and `.gleanignore` apply and `.glean/`
//! is skipped; only files whose extension maps to a registered profile are
//! kept.

use std::path::{Path, PathBuf};

use glean_parser::ProfileRegistry;
use ignore::WalkBuilder;

/// Per-project ignore file, in `.gitignore` syntax.
pub const IGNORE_FILE: &str = ".gleanignore";

/// Build a gitignore-aware walker over `root`.
pub fn build_walker(root: &Path) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    // Don't skip hidden files; .gitignore will still filter build output.
    builder.hidden(false);
    builder.add_custom_ignore_filename(IGNORE_FILE);
    builder.filter_entry(|entry| {
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        !(is_dir && matches!(entry.file_name().to_str(), Some(".glean" | ".git")))
    });
    builder.build()
}

/// Expand `paths` into the source files to extract, sorted and deduplicated.
///
/// Walked files are kept only when the registry maps their extension to a
/// language.
pub fn discover(paths: &[PathBuf], registry: &ProfileRegistry) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            anyhow::bail!("path '{}' does not exist", path.display());
        }
        for entry in build_walker(path) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!(%error, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let file = entry.into_path();
            if registry.resolve_path(&file).is_some() {
                files.push(file);
            } else {
                tracing::trace!(path = %file.display(), "no profile for extension");
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
