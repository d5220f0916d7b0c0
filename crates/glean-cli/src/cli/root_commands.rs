use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use glean_parser::CommentKind;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Extract comments from files and directories.
    Extract(ExtractArgs),
    /// List the registered language profiles.
    Languages,
}

#[derive(Clone, Debug, Args)]
pub struct ExtractArgs {
    /// Files or directories to scan. Directories are walked respecting
    /// `.gitignore` and `.gleanignore`.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Language id or alias for every file, instead of detecting it from
    /// the file extension.
    #[arg(long)]
    pub lang: Option<String>,

    /// Only report these comment kinds (comma separated).
    #[arg(long, value_enum, value_delimiter = ',')]
    pub kinds: Vec<KindArg>,

    /// Drop comments that are not attached to a declaration.
    #[arg(long)]
    pub attached_only: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum KindArg {
    Line,
    Block,
    Doc,
}

impl From<KindArg> for CommentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Line => Self::Line,
            KindArg::Block => Self::Block,
            KindArg::Doc => Self::DocBlock,
        }
    }
}
