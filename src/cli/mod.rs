//! Command-line interface module.
//!
//! `build` prepares everything without touching the published site,
//! `update` publishes what the last build prepared.

mod args;
pub mod build;
pub mod update;
pub mod verify;

pub use args::{Cli, Commands, KeyArgs, revision_note};

use anyhow::{Context, Result};

use crate::state::DataKey;

impl KeyArgs {
    pub fn data_key(&self) -> Result<DataKey> {
        DataKey::new(&self.data_key).context("unusable data key")
    }
}
