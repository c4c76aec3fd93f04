//! Stylesheet assets: CSS image references and the local images they point to.
//!
//! # Modules
//!
//! - [`index`]: `AssetIndex`, reference extraction and CSS adaptation
//! - [`scan`]: Images directory scanning and parallel loading

mod index;
mod scan;

pub use index::{AssetIndex, css_size};
pub use scan::{load_local_images, scan_images};
