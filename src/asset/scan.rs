//! Local image discovery and loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::config::LimitsConfig;
use crate::error::SheetError;
use crate::image::{ImageSet, load_local_image};

/// List image files directly inside `dir` (non-recursive), sorted by name.
///
/// Files whose extension is not configured are skipped.
pub fn scan_images(dir: &Path, limits: &LimitsConfig) -> Result<Vec<String>, SheetError> {
    let entries =
        fs::read_dir(dir).map_err(|err| SheetError::read("the images directory", dir, err))?;

    let mut filenames = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if limits.has_image_extension(filename) {
            filenames.push(filename.to_string());
        } else {
            crate::debug!("scan"; "skipped unsupported file: {}", filename);
        }
    }

    filenames.sort();
    Ok(filenames)
}

/// Load the scanned files in parallel, attaching their CSS usage counts.
///
/// The result keeps the order of `filenames`. The first failure aborts.
pub fn load_local_images(
    dir: &Path,
    filenames: &[String],
    references: &BTreeMap<String, usize>,
) -> Result<ImageSet, SheetError> {
    let images = filenames
        .par_iter()
        .map(|filename| {
            let usage_count = references.get(filename).copied().unwrap_or(0);
            load_local_image(dir, filename, usage_count)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(images.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::test_png_bytes;
    use tempfile::TempDir;

    #[test]
    fn test_scan_filters_extensions_and_dirs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::write(dir.path().join("a.JPG"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let found = scan_images(dir.path(), &LimitsConfig::default()).unwrap();
        assert_eq!(found, ["a.JPG", "b.png"]);
    }

    #[test]
    fn test_scan_missing_dir_names_artifact() {
        let dir = TempDir::new().unwrap();
        let err = scan_images(&dir.path().join("images"), &LimitsConfig::default()).unwrap_err();
        assert!(err.to_string().contains("the images directory"));
    }

    #[test]
    fn test_load_keeps_order_and_usage() {
        let dir = TempDir::new().unwrap();
        for (i, name) in ["a.png", "b.png", "c.png"].iter().enumerate() {
            fs::write(dir.path().join(name), test_png_bytes(2, 2, i as u8)).unwrap();
        }
        let filenames: Vec<String> = ["a.png", "b.png", "c.png"].map(String::from).to_vec();
        let references = BTreeMap::from([("b.png".to_string(), 3)]);

        let images = load_local_images(dir.path(), &filenames, &references).unwrap();
        let summary: Vec<_> = images
            .iter()
            .map(|image| (image.filename(), image.usage_count()))
            .collect();
        assert_eq!(summary, [("a.png", 0), ("b.png", 3), ("c.png", 0)]);
    }

    #[test]
    fn test_load_aborts_on_broken_image() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.png"), test_png_bytes(2, 2, 0)).unwrap();
        fs::write(dir.path().join("b.png"), b"garbage").unwrap();
        let filenames = vec!["a.png".to_string(), "b.png".to_string()];

        let result = load_local_images(dir.path(), &filenames, &BTreeMap::new());
        assert!(matches!(result, Err(SheetError::InvalidImage { .. })));
    }
}
