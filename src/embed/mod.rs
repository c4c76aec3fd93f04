//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `page` - Data Page template
//!
//! # Usage
//!
//! ```ignore
//! use embed::page::{DATA_PAGE_MD, DataPageVars};
//!
//! let text = DATA_PAGE_MD.render(&vars);
//! ```

mod template;

pub use template::{Template, TemplateVars, fill_placeholders};

pub mod page {
    use super::{Template, TemplateVars, fill_placeholders};

    /// Variables for data_page.md.
    pub struct DataPageVars {
        pub updated_at: String,
        pub revision_note: String,
        pub previous_css_size: Option<usize>,
        pub current_css_size: Option<usize>,
        pub images_unchanged: usize,
        pub images_added: usize,
        pub images_removed: usize,
        /// Pre-rendered table rows, one per line.
        pub image_table_rows: String,
    }

    fn size_cell(size: Option<usize>) -> String {
        size.map_or_else(String::new, |size| size.to_string())
    }

    impl TemplateVars for DataPageVars {
        fn apply(&self, content: &str) -> String {
            fill_placeholders(content, |name| {
                let value = match name {
                    // one line, so a note cannot open a table heading
                    "REVISION_NOTE" => self.revision_note.replace(['\r', '\n'], " "),
                    "UPDATED_AT" => self.updated_at.clone(),
                    "PREVIOUS_CSS_SIZE" => size_cell(self.previous_css_size),
                    "CURRENT_CSS_SIZE" => size_cell(self.current_css_size),
                    "IMAGES_UNCHANGED" => self.images_unchanged.to_string(),
                    "IMAGES_ADDED" => self.images_added.to_string(),
                    "IMAGES_REMOVED" => self.images_removed.to_string(),
                    "IMAGE_TABLE_ROWS" => self.image_table_rows.clone(),
                    _ => return None,
                };
                Some(value)
            })
        }
    }

    /// Data Page skeleton, filled before the digest is appended.
    pub const DATA_PAGE_MD: Template<DataPageVars> =
        Template::new(include_str!("page/data_page.md"));
}
