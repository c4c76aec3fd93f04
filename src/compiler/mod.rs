//! Sass compilation.
//!
//! - [`sass`]: compile the entry stylesheet to compressed CSS

mod sass;

pub use sass::compile_sass;
