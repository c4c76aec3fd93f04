//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Reconcile a compiled stylesheet and its images with the published site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: subsheet.toml)
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = "subsheet.toml",
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile, validate and reconcile; writes the adapted CSS and build state
    #[command(visible_alias = "b")]
    Build {
        /// Revision note recorded with the published stylesheet
        #[arg(short = 'r', long)]
        revision_comment: Option<String>,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Publish the last build: remove, upload, stylesheet, data page
    #[command(visible_alias = "u")]
    Update {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// Check that the published data page verifies under the key
    Verify {
        #[command(flatten)]
        key: KeyArgs,
    },
}

/// Data Page signing key.
#[derive(clap::Args, Debug, Clone)]
pub struct KeyArgs {
    /// Secret used to sign and verify the data page
    #[arg(long = "data-key", env = "SUBSHEET_DATA_KEY", hide_env_values = true)]
    pub data_key: String,
}

/// Revision note for this build.
///
/// An explicit comment wins; on CI it is a link to the commit being built.
pub fn revision_note(explicit: Option<&str>) -> String {
    revision_note_from(explicit, |name| std::env::var(name).ok())
}

fn revision_note_from(explicit: Option<&str>, env: impl Fn(&str) -> Option<String>) -> String {
    if let Some(note) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
        return note.to_string();
    }
    match (env("GITHUB_SERVER_URL"), env("GITHUB_REPOSITORY"), env("GITHUB_SHA")) {
        (Some(server), Some(repo), Some(sha)) => format!("{server}/{repo}/commit/{sha}"),
        _ => "manual update".to_string(),
    }
}
