//! Crate-wide error kinds for the reconciliation pipeline.
//!
//! Resource errors name the artifact being read or written so the top-level
//! report reads like "failed to read the Data Page: ...".

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::ValidationReport;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("cannot name {unnamed} new images: only {available} of {max} identifiers are free")]
    Capacity {
        unnamed: usize,
        available: usize,
        max: usize,
    },

    #[error("{0}")]
    Validation(ValidationReport),

    #[error("failed to read {what} `{}`", path.display())]
    FileRead {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {what} `{}`", path.display())]
    FileWrite {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image `{name}` could not be decoded")]
    InvalidImage {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("sass compilation of `{}` failed:\n{message}", path.display())]
    SassCompile { path: PathBuf, message: String },

    #[error("upload of `{}` failed: {details}", path.display())]
    Upload { path: PathBuf, details: String },

    #[error("remote {operation} failed: {details}")]
    Remote {
        operation: &'static str,
        details: String,
    },

    #[error("stylesheet update incomplete: sent {submitted} bytes, remote holds {saved} bytes")]
    StylesheetUpdate { submitted: usize, saved: usize },
}

impl SheetError {
    pub fn read(what: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            what,
            path: path.into(),
            source,
        }
    }

    pub fn write(what: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            what,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_file_read_names_artifact() {
        let err = SheetError::read(
            "the CSS file",
            "out/stylesheet.css",
            Error::new(ErrorKind::NotFound, "missing"),
        );
        let display = err.to_string();
        assert!(display.contains("the CSS file"));
        assert!(display.contains("out/stylesheet.css"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_capacity_display() {
        let err = SheetError::Capacity {
            unnamed: 3,
            available: 1,
            max: 2,
        };
        assert!(err.to_string().contains("3 new images"));
    }
}
