//! Reconciliation state shared between `build` and `update`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SheetError;
use crate::image::ImageSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetState {
    /// Published site identity.
    pub target: String,
    /// Where the adapted CSS was written.
    pub css_file: PathBuf,
    pub data_page: String,
    pub revision_note: String,
    pub stored: ImageSet,
    pub local: ImageSet,
    pub remote: ImageSet,
    pub previous_css_size: Option<usize>,
    pub saved_css_size: Option<usize>,
}

impl SheetState {
    pub fn new(
        target: impl Into<String>,
        css_file: impl Into<PathBuf>,
        data_page: impl Into<String>,
        revision_note: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            css_file: css_file.into(),
            data_page: data_page.into(),
            revision_note: revision_note.into(),
            ..Default::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, SheetError> {
        const WHAT: &str = "the stylesheet state file";
        let content = fs::read_to_string(path).map_err(|err| SheetError::read(WHAT, path, err))?;
        serde_json::from_str(&content).map_err(|err| SheetError::read(WHAT, path, err.into()))
    }

    pub fn save(&self, path: &Path) -> Result<(), SheetError> {
        const WHAT: &str = "the stylesheet state file";
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| SheetError::write(WHAT, parent, err))?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|err| SheetError::write(WHAT, path, err.into()))?;
        fs::write(path, content).map_err(|err| SheetError::write(WHAT, path, err))
    }
}
