//! `[remote]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [remote]
//! dir = "published"   # Root of the directory-backed host
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Root directory of the published site.
    pub dir: PathBuf,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            dir: "published".into(),
        }
    }
}
