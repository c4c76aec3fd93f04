//! `[limits]` section configuration.
//!
//! Constraints the hosting site places on the stylesheet and its images.
//!
//! # Example
//!
//! ```toml
//! [limits]
//! max_image_count = 50
//! max_image_size = 512000             # bytes
//! max_image_width = 2000              # pixels
//! max_css_size = 102400               # bytes, after identifier substitution
//! image_extensions = ["png", "jpg", "jpeg"]
//! allowed_formats = ["png", "jpeg"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum number of images, also the size of the identifier space.
    pub max_image_count: usize,

    /// Maximum file size of a single image in bytes.
    pub max_image_size: u64,

    /// Maximum pixel width of a single image.
    pub max_image_width: u32,

    /// Maximum size of the adapted CSS in bytes.
    pub max_css_size: usize,

    /// File extensions recognized in CSS references and in the images directory.
    pub image_extensions: Vec<String>,

    /// Decoded pixel formats accepted by the host (lowercase, e.g. "png").
    pub allowed_formats: Vec<String>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_count: 50,
            max_image_size: 512_000,
            max_image_width: 2000,
            max_css_size: 102_400,
            image_extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
            allowed_formats: vec!["png".into(), "jpeg".into()],
        }
    }
}

impl LimitsConfig {
    pub const MAX_IMAGE_COUNT: FieldPath = FieldPath::new("limits.max_image_count");
    pub const IMAGE_EXTENSIONS: FieldPath = FieldPath::new("limits.image_extensions");
    pub const ALLOWED_FORMATS: FieldPath = FieldPath::new("limits.allowed_formats");

    /// Whether `filename` ends with one of the configured extensions (case-insensitive).
    pub fn has_image_extension(&self, filename: &str) -> bool {
        filename.rsplit_once('.').is_some_and(|(_, ext)| {
            self.image_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.max_image_count == 0 {
            diag.error(Self::MAX_IMAGE_COUNT, "must be at least 1");
        }

        if self.image_extensions.is_empty() {
            diag.error_with_hint(
                Self::IMAGE_EXTENSIONS,
                "at least one image extension is required",
                "e.g. image_extensions = [\"png\", \"jpg\"]",
            );
        }
        for ext in &self.image_extensions {
            if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                diag.error(
                    Self::IMAGE_EXTENSIONS,
                    format!("`{ext}` is not a valid extension (letters and digits only, no dot)"),
                );
            }
        }

        if self.allowed_formats.is_empty() {
            diag.error(Self::ALLOWED_FORMATS, "at least one image format is required");
        }
    }
}
