//! Data Page encoding.
//!
//! The page is the filled [`DATA_PAGE_MD`] template followed directly by the
//! 96-character hex HMAC of everything before it. Parsing only looks at the
//! image table once that digest checks out.

use std::sync::LazyLock;

use regex::Regex;

use super::{DIGEST_HEX_LEN, DataKey, SheetState};
use crate::embed::page::{DATA_PAGE_MD, DataPageVars};
use crate::image::{ImageRecord, ImageSet};
use crate::log;
use crate::utils::date::DateTimeUtc;

const TABLE_HEADING: &str = "###Images";

static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\[(?P<identifier>\w+)\]\((?P<url>.+?)\)",
        r"\|(?P<filename>[\w\-]+\.\w+)",
        r"\|(?P<usage>\d+)",
        r"\|(?P<size>\d+)",
        r"\|(?P<remote_size>\d+)",
        r"\|(?P<width>\d+)x(?P<height>\d+)",
        r"\|(?P<hash>\w+)$",
    ))
    .expect("static regex")
});

/// Render and sign the Data Page for `state`.
pub fn render_data_page(state: &SheetState, key: &DataKey, updated_at: DateTimeUtc) -> String {
    let vars = DataPageVars {
        updated_at: updated_at.to_page_stamp(),
        revision_note: state.revision_note.clone(),
        previous_css_size: state.previous_css_size,
        current_css_size: state.saved_css_size,
        images_unchanged: state.local.view().unchanged().len(),
        images_added: state.local.view().new_images().len(),
        images_removed: state.remote.view().removed().len(),
        image_table_rows: image_table_rows(&state.local),
    };

    let content = DATA_PAGE_MD.render(&vars);
    let digest = key.sign(&content);
    content + &digest
}

/// One row per local image, shortest identifiers first.
fn image_table_rows(local: &ImageSet) -> String {
    local
        .view()
        .by_identifier()
        .iter()
        .map(|image| {
            let facts = image.local_facts();
            let cell = |value: Option<String>| value.unwrap_or_default();
            [
                format!(
                    "[{}]({})",
                    image.identifier().unwrap_or_default(),
                    image.url().unwrap_or_default()
                ),
                image.filename().to_string(),
                image.usage_count().to_string(),
                cell(facts.map(|f| f.file_size.to_string())),
                cell(image.remote_size().map(|s| s.to_string())),
                cell(facts.map(|f| format!("{}x{}", f.width, f.height))),
                image.hash().unwrap_or_default().to_string(),
            ]
            .join("|")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a page into its content and digest suffix.
fn split_digest(page: &str) -> Option<(&str, &str)> {
    let at = page.len().checked_sub(DIGEST_HEX_LEN)?;
    page.is_char_boundary(at).then(|| page.split_at(at))
}

/// Verify `page` under `key` and parse its stored images.
///
/// Returns `None` when the page cannot be trusted (missing or wrong digest);
/// the caller then treats every local image as new. A verified page without
/// an image table yields an empty set.
pub fn parse_data_page(page: &str, key: &DataKey) -> Option<ImageSet> {
    let (content, digest) = split_digest(page)?;
    if !key.verify(content, digest) {
        return None;
    }

    let mut lines = content.lines();
    if !lines.by_ref().any(|line| line.trim_end() == TABLE_HEADING) {
        log!("warning"; "image table not found on the data page");
        return Some(ImageSet::new());
    }

    let mut stored = ImageSet::new();
    for line in lines {
        let line = line.trim_end();
        if line.starts_with('#') {
            break;
        }
        if line.is_empty() || is_table_chrome(line) {
            continue;
        }

        match parse_row(line) {
            Some(image) => stored.push(image),
            None => log!("warning"; "skipping malformed data page row: {}", line),
        }
    }

    Some(stored)
}

/// Header and separator rows of the image table.
fn is_table_chrome(line: &str) -> bool {
    line.starts_with("Name|") || line.chars().all(|c| matches!(c, '-' | '|' | ':' | ' '))
}

fn parse_row(line: &str) -> Option<ImageRecord> {
    let caps = ROW.captures(line)?;
    let remote_size = caps["remote_size"].parse().ok()?;

    Some(ImageRecord::stored(
        &caps["filename"],
        &caps["identifier"],
        &caps["url"],
        &caps["hash"],
        remote_size,
    ))
}
