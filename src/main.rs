//! subsheet - reconcile a Sass stylesheet and its images with a published site.

mod asset;
mod cli;
mod compiler;
mod config;
mod embed;
mod error;
mod image;
mod logger;
mod reconcile;
mod remote;
mod state;
mod utils;
mod validate;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, revision_note};
use config::SheetConfig;
use remote::DirectoryHost;

fn main() {
    if let Err(e) = run() {
        log!("error"; "{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SheetConfig::load(&cli.config)?;
    let host = DirectoryHost::new(&config.remote.dir);
    debug!(
        "config";
        "root `{}`, remote `{}`",
        config.get_root().display(),
        config.remote.dir.display()
    );

    match &cli.command {
        Commands::Build {
            revision_comment,
            key,
        } => {
            let note = revision_note(revision_comment.as_deref());
            cli::build::build_sheet(&config, &host, &key.data_key()?, note).map(|_| ())
        }
        Commands::Update { key } => {
            cli::update::update_sheet(&config, &host, &key.data_key()?).map(|_| ())
        }
        Commands::Verify { key } => cli::verify::verify_sheet(&config, &host, &key.data_key()?),
    }
}
