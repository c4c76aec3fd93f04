//! Image references in compiled CSS.
//!
//! A reference has the form `url("<images-dir>/<filename>.<ext>")`, where
//! `<images-dir>` is the images directory relative to the CSS file. After
//! identifiers are allocated each reference becomes `url(%%<identifier>%%)`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::image::ImageSet;

/// Any `url(...)` occurrence, valid or not.
static ANY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"url\(.*?\)").expect("static regex")
});

#[derive(Debug, Clone)]
pub struct AssetIndex {
    images_dir: String,
    reference: Regex,
}

impl AssetIndex {
    /// Build the reference pattern for `images_dir` (forward slashes, no
    /// trailing slash) and the given extensions (without dots).
    pub fn new(images_dir: &str, extensions: &[String]) -> Result<Self, regex::Error> {
        let extensions = extensions
            .iter()
            .map(|ext| regex::escape(ext))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r#"url\("{}/([\w-]+\.(?:{}))"\)"#,
            regex::escape(images_dir),
            extensions
        );
        let reference = RegexBuilder::new(&pattern).case_insensitive(true).build()?;

        Ok(Self {
            images_dir: images_dir.to_string(),
            reference,
        })
    }

    pub fn images_dir(&self) -> &str {
        &self.images_dir
    }

    /// Count references per filename.
    pub fn references(&self, css: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for caps in self.reference.captures_iter(css) {
            *counts.entry(caps[1].to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Every `url(...)` that is not a recognizable image reference.
    pub fn invalid_references<'a>(&self, css: &'a str) -> Vec<&'a str> {
        ANY_URL
            .find_iter(css)
            .map(|m| m.as_str())
            .filter(|candidate| !self.reference.is_match(candidate))
            .collect()
    }

    /// Replace each named image's reference with its identifier token.
    ///
    /// Images without an identifier are left untouched.
    pub fn adapt(&self, css: &str, images: &ImageSet) -> String {
        let mut adapted = css.to_string();
        for image in images {
            let Some(identifier) = image.identifier() else {
                continue;
            };
            let reference = format!("url(\"{}/{}\")", self.images_dir, image.filename());
            adapted = adapted.replace(&reference, &format!("url(%%{identifier}%%)"));
        }
        adapted
    }
}

/// Encoded size of a stylesheet (UTF-8 bytes, not characters).
#[inline]
pub fn css_size(css: &str) -> usize {
    css.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::test_local;

    fn index() -> AssetIndex {
        let exts = ["png", "jpg", "jpeg"].map(String::from);
        AssetIndex::new("images", &exts).unwrap()
    }

    #[test]
    fn test_references_count_per_filename() {
        let css = concat!(
            r#"a{background:url("images/logo.png")}"#,
            r#"b{background:url("images/logo.png")}"#,
            r#"c{background:url("images/bg.JPG")}"#,
        );
        let refs = index().references(css);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs["logo.png"], 2);
        assert_eq!(refs["bg.JPG"], 1);
    }

    #[test]
    fn test_references_ignore_other_dirs_and_extensions() {
        let css = concat!(
            r#"a{background:url("img/logo.png")}"#,
            r#"b{background:url("images/anim.gif")}"#,
            r#"c{background:url("images/sub/x.png")}"#,
        );
        assert!(index().references(css).is_empty());
    }

    #[test]
    fn test_relative_parent_dir_is_escaped() {
        let idx = AssetIndex::new("../images", &["png".to_string()]).unwrap();
        let css = r#"a{background:url("../images/a.png")}b{background:url("x/images/b.png")}"#;
        let refs = idx.references(css);

        assert_eq!(refs.len(), 1);
        assert!(refs.contains_key("a.png"));
    }

    #[test]
    fn test_invalid_references() {
        let css = concat!(
            r#"a{background:url("images/a.png")}"#,
            r#"b{background:url(images/b.png)}"#,
            r#"c{src:url("font.woff")}"#,
        );
        let invalid = index().invalid_references(css);

        assert_eq!(invalid, ["url(images/b.png)", "url(\"font.woff\")"]);
    }

    #[test]
    fn test_adapt_replaces_named_images() {
        let css = concat!(
            r#"a{background:url("images/logo.png")}"#,
            r#"b{background:url("images/logo.png")}"#,
            r#"c{background:url("images/bg.jpg")}"#,
        );
        let mut logo = test_local("logo.png", "h1", 2);
        logo.assign_identifier("0");
        let bg = test_local("bg.jpg", "h2", 1);
        let images: ImageSet = [logo, bg].into_iter().collect();

        let adapted = index().adapt(css, &images);
        assert_eq!(
            adapted,
            r#"a{background:url(%%0%%)}b{background:url(%%0%%)}c{background:url("images/bg.jpg")}"#
        );
    }

    #[test]
    fn test_css_size_counts_bytes() {
        assert_eq!(css_size("a{content:\"é\"}"), 15);
        assert_eq!(css_size(""), 0);
    }
}
