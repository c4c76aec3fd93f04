//! Sass → CSS via grass.
//!
//! Output is compressed and has its `@charset` rules removed; the hosting
//! side rejects them.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use grass::{Options, OutputStyle};
use regex::Regex;

use crate::debug;
use crate::error::SheetError;

static CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@charset(.+?);").expect("static regex"));

/// Compile the Sass file at `path`.
///
/// Imports resolve against the file's own directory.
pub fn compile_sass(path: &Path) -> Result<String, SheetError> {
    let scss =
        fs::read_to_string(path).map_err(|err| SheetError::read("the sass file", path, err))?;
    let load_paths: Vec<&Path> = path.parent().into_iter().collect();

    let options = Options::default()
        .load_paths(&load_paths)
        .style(OutputStyle::Compressed);

    let css = grass::from_string(scss, &options).map_err(|e| SheetError::SassCompile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    debug!("sass"; "compiled {} ({} bytes)", path.display(), css.len());
    Ok(strip_charset(&css))
}

/// Remove every `@charset ...;` rule.
pub fn strip_charset(css: &str) -> String {
    CHARSET.replace_all(css, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_compile_compressed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.scss");
        fs::write(&path, "$c: red;\n.a {\n  .b { color: $c; }\n}\n").unwrap();

        let css = compile_sass(&path).unwrap();
        assert_eq!(css.trim(), ".a .b{color:red}");
    }

    #[test]
    fn test_compile_resolves_partials_next_to_entry() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_vars.scss"), "$size: 4px;\n").unwrap();
        let path = dir.path().join("main.scss");
        fs::write(&path, "@import 'vars';\n.a { margin: $size; }\n").unwrap();

        let css = compile_sass(&path).unwrap();
        assert!(css.contains("margin:4px"));
    }

    #[test]
    fn test_compile_error_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.scss");
        fs::write(&path, ".a { color: $missing; }").unwrap();

        let err = compile_sass(&path).unwrap_err();
        assert!(matches!(err, SheetError::SassCompile { .. }));
        assert!(err.to_string().contains("broken.scss"));
    }

    #[test]
    fn test_missing_sass_file() {
        let dir = TempDir::new().unwrap();
        let err = compile_sass(&dir.path().join("nope.scss")).unwrap_err();
        assert!(matches!(err, SheetError::FileRead { what: "the sass file", .. }));
    }

    #[test]
    fn test_strip_charset() {
        assert_eq!(strip_charset("@charset \"UTF-8\";a{b:c}"), "a{b:c}");
        assert_eq!(strip_charset("a{b:c}"), "a{b:c}");
    }
}
