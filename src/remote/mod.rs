//! Remote hosting collaborator.
//!
//! The engine only talks to the published site through [`RemoteHost`].
//! Calls are blocking; retries are up to the caller.
//!
//! - [`directory`]: `DirectoryHost`, a host backed by a local directory

mod directory;

pub use directory::DirectoryHost;

use std::path::Path;

use crate::error::SheetError;

/// Operations the published site must support.
///
/// `Sync` so size probes can fan out over rayon.
pub trait RemoteHost: Sync {
    /// Current images as `(identifier, url)` pairs.
    fn list_images(&self) -> Result<Vec<(String, String)>, SheetError>;

    /// Byte size behind `url`, `None` when it cannot be determined.
    fn probe_size(&self, url: &str) -> Option<u64>;

    /// Upload the image at `path` under `identifier`, returning its URL.
    fn upload_image(
        &self,
        identifier: &str,
        path: &Path,
        format: &str,
    ) -> Result<String, SheetError>;

    fn remove_image(&self, identifier: &str) -> Result<(), SheetError>;

    /// Text of a named page, `None` if it does not exist.
    fn read_page(&self, name: &str) -> Result<Option<String>, SheetError>;

    fn write_page(&self, name: &str, content: &str, note: &str) -> Result<(), SheetError>;

    /// Published stylesheet, empty if none was published yet.
    fn read_stylesheet(&self) -> Result<String, SheetError>;

    /// Replace the stylesheet and return the byte size the host now holds.
    fn write_stylesheet(&self, css: &str, note: &str) -> Result<usize, SheetError>;
}
