//! Constraint checks over the local images and the stylesheet.
//!
//! Checks accumulate into one [`ValidationReport`]; nothing short-circuits.

use std::collections::BTreeMap;

use super::{Check, ValidationReport};
use crate::asset::AssetIndex;
use crate::config::LimitsConfig;
use crate::debug;
use crate::error::SheetError;
use crate::image::ImageSet;

pub struct Validator<'a> {
    limits: &'a LimitsConfig,
    report: ValidationReport,
}

impl<'a> Validator<'a> {
    pub fn new(limits: &'a LimitsConfig) -> Self {
        Self {
            limits,
            report: ValidationReport::default(),
        }
    }

    /// Image count, then format, file size and width of every image.
    pub fn images(&mut self, local: &ImageSet) -> &mut Self {
        debug!("validate"; "checking {} images", local.len());
        let limits = self.limits;

        if local.len() > limits.max_image_count {
            self.report.add(
                Check::Images,
                format!(
                    "at most {} images are allowed, but the images directory holds {}",
                    limits.max_image_count,
                    local.len()
                ),
            );
        }

        for image in local {
            let Some(facts) = image.local_facts() else {
                continue;
            };
            let path = facts.path.display();

            if !limits.allowed_formats.iter().any(|f| f.eq_ignore_ascii_case(&facts.format)) {
                self.report.add(
                    Check::Images,
                    format!(
                        "`{path}` is {}, allowed formats are: {}",
                        facts.format,
                        limits.allowed_formats.join(", ")
                    ),
                );
            }
            if facts.file_size > limits.max_image_size {
                self.report.add(
                    Check::Images,
                    format!(
                        "`{path}` is {} bytes, the maximum is {} bytes",
                        facts.file_size, limits.max_image_size
                    ),
                );
            }
            if facts.width > limits.max_image_width {
                self.report.add(
                    Check::Images,
                    format!(
                        "`{path}` is {} px wide, the maximum is {} px",
                        facts.width, limits.max_image_width
                    ),
                );
            }
        }
        self
    }

    /// Every local image is referenced by the CSS and every reference has a file.
    pub fn integrity(
        &mut self,
        local: &ImageSet,
        references: &BTreeMap<String, usize>,
    ) -> &mut Self {
        let mut unmatched = references.clone();

        for image in local {
            if unmatched.remove(image.filename()).is_none() {
                self.report.add(
                    Check::Integrity,
                    format!(
                        "`{}` is in the images directory, but the CSS never references it",
                        image.filename()
                    ),
                );
            }
        }

        for filename in unmatched.keys() {
            self.report.add(
                Check::Integrity,
                format!(
                    "the CSS references `{filename}`, but the images directory has no such file"
                ),
            );
        }
        self
    }

    /// Every `url(...)` in the CSS must be a recognizable image reference.
    pub fn references(&mut self, index: &AssetIndex, css: &str) -> &mut Self {
        for reference in index.invalid_references(css) {
            self.report.add(
                Check::References,
                format!("the CSS contains an unsupported reference: {reference}"),
            );
        }
        self
    }

    /// No two images share content. Groups are reported in first-seen order.
    pub fn uniqueness(&mut self, local: &ImageSet) -> &mut Self {
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for image in local {
            let Some(hash) = image.hash() else {
                continue;
            };
            match groups.iter_mut().find(|(h, _)| *h == hash) {
                Some((_, names)) => names.push(image.filename()),
                None => groups.push((hash, vec![image.filename()])),
            }
        }

        for (_, names) in groups.into_iter().filter(|(_, names)| names.len() > 1) {
            self.report.add(
                Check::Uniqueness,
                format!("these images are identical: {}", names.join(", ")),
            );
        }
        self
    }

    /// Size of the adapted CSS.
    pub fn css_size(&mut self, size: usize) -> &mut Self {
        if size > self.limits.max_css_size {
            self.report.add(
                Check::Stylesheet,
                format!(
                    "the adapted CSS is {size} bytes, the maximum is {} bytes",
                    self.limits.max_css_size
                ),
            );
        }
        self
    }

    #[cfg(test)]
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Fail with the whole report if any check failed.
    pub fn finish(&mut self) -> Result<(), SheetError> {
        if self.report.is_empty() {
            Ok(())
        } else {
            Err(SheetError::Validation(std::mem::take(&mut self.report)))
        }
    }
}
