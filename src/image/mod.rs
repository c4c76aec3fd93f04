//! Image data model.
//!
//! # Modules
//!
//! - [`record`]: `ImageRecord`, one image in its Local / Remote / Stored role
//! - [`set`]: `ImageSet` and its filtered, sorted `ImageView`s
//! - [`load`]: Reading, hashing and decoding local image files

mod load;
mod record;
mod set;

pub use load::load_local_image;
pub use record::{ImageRecord, LocalFacts};
pub use set::ImageSet;

#[cfg(test)]
pub(crate) use load::test_png_bytes;
#[cfg(test)]
pub(crate) use record::test_local;
