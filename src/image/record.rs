//! A single physical image in one of three roles.
//!
//! The same file may show up as several records during a run (a local file,
//! its stored row from the Data Page, and the live remote upload). Each record
//! carries exactly one [`ImageRole`]; role-specific flags live inside the role.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Attributes shared by every role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCommon {
    /// Local filename. Absent for remote records, which only know their identifier.
    pub filename: Option<String>,
    /// Short remote name substituted into the CSS.
    pub identifier: Option<String>,
    pub url: Option<String>,
    /// Hex content hash of the raw file bytes.
    pub hash: Option<String>,
    /// Byte size of the hosted copy.
    pub remote_size: Option<u64>,
}

/// Facts read from a file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFacts {
    pub path: PathBuf,
    pub file_size: u64,
    pub width: u32,
    pub height: u32,
    /// Decoded format in lowercase (`png`, `jpeg`, ...).
    pub format: String,
    /// Occurrences of the image reference in the compiled CSS.
    pub usage_count: usize,
    pub is_new: bool,
}

/// Fate of a live remote image within one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFlags {
    pub is_used: bool,
    pub is_replaced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ImageRole {
    Local(LocalFacts),
    Remote(RemoteFlags),
    Stored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub common: ImageCommon,
    pub role: ImageRole,
}

impl ImageRecord {
    pub fn local(filename: impl Into<String>, hash: impl Into<String>, facts: LocalFacts) -> Self {
        Self {
            common: ImageCommon {
                filename: Some(filename.into()),
                hash: Some(hash.into()),
                ..Default::default()
            },
            role: ImageRole::Local(facts),
        }
    }

    /// A live image as reported by the host listing.
    pub fn remote(identifier: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            common: ImageCommon {
                identifier: Some(identifier.into()),
                url: Some(url.into()),
                ..Default::default()
            },
            role: ImageRole::Remote(RemoteFlags::default()),
        }
    }

    /// A row of the previous Data Page.
    pub fn stored(
        filename: impl Into<String>,
        identifier: impl Into<String>,
        url: impl Into<String>,
        hash: impl Into<String>,
        remote_size: u64,
    ) -> Self {
        Self {
            common: ImageCommon {
                filename: Some(filename.into()),
                identifier: Some(identifier.into()),
                url: Some(url.into()),
                hash: Some(hash.into()),
                remote_size: Some(remote_size),
            },
            role: ImageRole::Stored,
        }
    }

    // ------------------------------------------------------------------------
    // read access
    // ------------------------------------------------------------------------

    /// Filename, or the empty string for records that have none.
    pub fn filename(&self) -> &str {
        self.common.filename.as_deref().unwrap_or_default()
    }

    pub fn identifier(&self) -> Option<&str> {
        self.common.identifier.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.common.url.as_deref()
    }

    pub fn hash(&self) -> Option<&str> {
        self.common.hash.as_deref()
    }

    pub fn remote_size(&self) -> Option<u64> {
        self.common.remote_size
    }

    pub fn local_facts(&self) -> Option<&LocalFacts> {
        match &self.role {
            ImageRole::Local(facts) => Some(facts),
            _ => None,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self.role, ImageRole::Local(_))
    }

    pub fn is_named(&self) -> bool {
        self.common.identifier.is_some()
    }

    /// Usage count in the CSS; zero for non-local records.
    pub fn usage_count(&self) -> usize {
        self.local_facts().map_or(0, |facts| facts.usage_count)
    }

    pub fn is_new(&self) -> bool {
        self.local_facts().is_some_and(|facts| facts.is_new)
    }

    pub fn is_used(&self) -> bool {
        matches!(self.role, ImageRole::Remote(flags) if flags.is_used)
    }

    pub fn is_replaced(&self) -> bool {
        matches!(self.role, ImageRole::Remote(flags) if flags.is_replaced)
    }

    /// A remote image neither kept nor overwritten.
    pub fn is_removed(&self) -> bool {
        matches!(self.role, ImageRole::Remote(flags) if !(flags.is_used || flags.is_replaced))
    }

    // ------------------------------------------------------------------------
    // role-specific updates
    // ------------------------------------------------------------------------

    /// Flag a local image for upload. Its remote URL is no longer valid.
    pub fn mark_as_new(&mut self) {
        if let ImageRole::Local(facts) = &mut self.role {
            facts.is_new = true;
            self.common.url = None;
        }
    }

    pub fn mark_as_used(&mut self) {
        if let ImageRole::Remote(flags) = &mut self.role {
            flags.is_used = true;
        }
    }

    pub fn mark_as_replaced(&mut self) {
        if let ImageRole::Remote(flags) = &mut self.role {
            flags.is_replaced = true;
        }
    }

    pub fn assign_identifier(&mut self, identifier: impl Into<String>) {
        debug_assert!(self.is_local(), "only local images receive identifiers");
        self.common.identifier = Some(identifier.into());
    }

    /// Record where the image is hosted after an upload or a successful match.
    pub fn set_remote(&mut self, url: impl Into<String>, remote_size: Option<u64>) {
        self.common.url = Some(url.into());
        self.common.remote_size = remote_size;
    }
}

#[cfg(test)]
pub(crate) fn test_local(filename: &str, hash: &str, usage_count: usize) -> ImageRecord {
    ImageRecord::local(
        filename,
        hash,
        LocalFacts {
            path: PathBuf::from("images").join(filename),
            file_size: 1024,
            width: 16,
            height: 16,
            format: "png".to_string(),
            usage_count,
            is_new: false,
        },
    )
}
