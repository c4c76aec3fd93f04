//! Path normalization utilities.
//!
//! Provides consistent path handling across the codebase:
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `relative_path` - forward-slash relative path between two directories

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Compute the path of `target` relative to `base`, joined with `/`.
///
/// Both paths are expected in the same normalized (absolute) form.
/// Returns `"."` when they are equal.
///
/// # Example
/// ```ignore
/// let rel = relative_path(Path::new("/site/images"), Path::new("/site/out"));
/// assert_eq!(rel, "../images");
/// ```
pub fn relative_path(target: &Path, base: &Path) -> String {
    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();

    let common = target
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> =
        std::iter::repeat_n("..".to_string(), base.len() - common).collect();
    parts.extend(
        target[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_relative_path_child() {
        assert_eq!(
            relative_path(Path::new("/site/images"), Path::new("/site")),
            "images"
        );
    }

    #[test]
    fn test_relative_path_sibling() {
        assert_eq!(
            relative_path(Path::new("/site/images"), Path::new("/site/out/css")),
            "../../images"
        );
    }

    #[test]
    fn test_relative_path_same() {
        assert_eq!(relative_path(Path::new("/site"), Path::new("/site")), ".");
    }
}
