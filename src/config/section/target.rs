//! `[target]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [target]
//! name = "my_site"                # Identity of the published site (required)
//! data_page = "stylesheet/data"   # Page holding the digest-protected state
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub name: String,
    pub data_page: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            data_page: "stylesheet/data".to_string(),
        }
    }
}

impl TargetConfig {
    pub const NAME: FieldPath = FieldPath::new("target.name");
    pub const DATA_PAGE: FieldPath = FieldPath::new("target.data_page");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.error_with_hint(
                Self::NAME,
                "target name must not be empty",
                "add `name = \"...\"` under [target]",
            );
        }
        if self.data_page.trim().is_empty() {
            diag.error(Self::DATA_PAGE, "data page name must not be empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_reported() {
        let mut diag = ConfigDiagnostics::new();
        TargetConfig::default().validate(&mut diag);

        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, TargetConfig::NAME);
    }
}
