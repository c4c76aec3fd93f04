//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `relative_path`)

pub mod fs;

pub use fs::{normalize_path, relative_path};
