//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! sass = "main.scss"              # Sass entry point
//! images = "images"               # Directory of images referenced by the CSS
//! css = "stylesheet.css"          # Adapted CSS written by `subsheet build`
//! state = ".subsheet/state.json"  # Reconciliation state shared with `subsheet update`
//! ```
//!
//! All paths are relative to the directory holding `subsheet.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Sass entry point compiled into the stylesheet.
    pub sass: PathBuf,

    /// Local images directory (scanned non-recursively).
    pub images: PathBuf,

    /// Output path of the adapted CSS.
    pub css: PathBuf,

    /// Output path of the persisted reconciliation state.
    pub state: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            sass: "main.scss".into(),
            images: "images".into(),
            css: "stylesheet.css".into(),
            state: ".subsheet/state.json".into(),
        }
    }
}

impl BuildConfig {
    /// Resolve every path against `root`.
    pub fn resolve(&mut self, root: &Path) {
        for path in [
            &mut self.sass,
            &mut self.images,
            &mut self.css,
            &mut self.state,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
    }
}
