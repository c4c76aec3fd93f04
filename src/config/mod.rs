//! Project configuration management for `subsheet.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── limits     # [limits]
//! │   ├── remote     # [remote]
//! │   └── target     # [target]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SheetConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                             |
//! |--------------|-----------------------------------------------------|
//! | `[build]`    | Sass entry, images dir, adapted CSS and state paths |
//! | `[target]`   | Published site name and Data Page name              |
//! | `[limits]`   | Image count/size/width, CSS size, formats           |
//! | `[remote]`   | Root of the directory-backed host                   |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildConfig, LimitsConfig, RemoteConfig, TargetConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing subsheet.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

impl SheetConfig {
    /// Load configuration from the given config path.
    ///
    /// Relative paths are searched upward from cwd. The project root is the
    /// config file's parent directory.
    pub fn load(config: &Path) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(config).ok_or_else(|| {
            ConfigError::Validation(format!(
                "config file `{}` not found in `{}` or any parent directory",
                config.display(),
                cwd.display()
            ))
        })?;

        let mut sheet = Self::from_path(&config_path)?;
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        sheet.config_path = config_path;
        sheet.finalize(&root);
        sheet.validate()?;

        Ok(sheet)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.build.resolve(root);
        if self.remote.dir.is_relative() {
            self.remote.dir = root.join(&self.remote.dir);
        }
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.target.validate(&mut diag);
        self.limits.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with the minimal required `[target]` name.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SheetConfig {
    let config = format!("[target]\nname = \"test_site\"\n{extra}");
    let (parsed, ignored) = SheetConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
