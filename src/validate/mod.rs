//! Asset validation.
//!
//! - [`checks`]: the `Validator` with its individual checks
//! - [`report`]: the aggregated `ValidationReport`

mod checks;
mod report;

pub use checks::Validator;
pub use report::{Check, ValidationReport};
