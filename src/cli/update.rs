//! `subsheet update`: publish what the last build prepared.
//!
//! Order matters: stale images go first, then uploads, then the stylesheet
//! that references them, and finally the Data Page recording the result.

use std::fs;

use anyhow::Result;

use crate::config::SheetConfig;
use crate::error::SheetError;
use crate::log;
use crate::logger::ProgressLine;
use crate::remote::RemoteHost;
use crate::state::{DataKey, SheetState, render_data_page};
use crate::utils::date::DateTimeUtc;
use crate::utils::plural::plural_count;

pub fn update_sheet(
    config: &SheetConfig,
    host: &dyn RemoteHost,
    key: &DataKey,
) -> Result<SheetState> {
    let mut state = SheetState::load(&config.build.state)?;
    let css = fs::read_to_string(&state.css_file)
        .map_err(|err| SheetError::read("the adapted stylesheet", &state.css_file, err))?;

    publish_images(&mut state, host)?;
    publish_stylesheet(&mut state, host, &css)?;
    publish_data_page(&state, host, key)?;

    state.save(&config.build.state)?;
    log!("done"; "published {} for `{}`", plural_count(state.local.len(), "image"), state.target);
    Ok(state)
}

fn publish_images(state: &mut SheetState, host: &dyn RemoteHost) -> Result<(), SheetError> {
    let removed = state.remote.view().removed().by_identifier().indices();
    let added = state.local.view().new_images().by_identifier().indices();
    let progress = ProgressLine::new(
        "update",
        &[("remove", removed.len()), ("upload", added.len())],
    );

    for i in removed {
        if let Some(identifier) = state.remote.get(i).and_then(|image| image.identifier()) {
            host.remove_image(identifier)?;
        }
        progress.inc("remove");
    }

    for i in added {
        let Some(image) = state.local.get_mut(i) else {
            continue;
        };
        let (Some(identifier), Some(facts)) = (image.identifier(), image.local_facts()) else {
            continue;
        };

        let url = host.upload_image(identifier, &facts.path, &facts.format)?;
        let size = host.probe_size(&url).ok_or_else(|| SheetError::Upload {
            path: facts.path.clone(),
            details: format!("size of uploaded `{url}` is unavailable"),
        })?;
        image.set_remote(url, Some(size));
        progress.inc("upload");
    }

    progress.finish();
    Ok(())
}

fn publish_stylesheet(
    state: &mut SheetState,
    host: &dyn RemoteHost,
    css: &str,
) -> Result<(), SheetError> {
    state.previous_css_size = Some(host.read_stylesheet()?.len());

    let saved = host.write_stylesheet(css, &state.revision_note)?;
    if saved != css.len() {
        return Err(SheetError::StylesheetUpdate {
            submitted: css.len(),
            saved,
        });
    }
    state.saved_css_size = Some(saved);
    Ok(())
}

fn publish_data_page(
    state: &SheetState,
    host: &dyn RemoteHost,
    key: &DataKey,
) -> Result<(), SheetError> {
    let page = render_data_page(state, key, DateTimeUtc::now());
    host.write_page(&state.data_page, &page, &state.revision_note)?;

    if host.read_page(&state.data_page)?.as_deref() != Some(page.as_str()) {
        return Err(SheetError::Remote {
            operation: "data page update",
            details: format!("`{}` does not hold the submitted text", state.data_page),
        });
    }
    Ok(())
}
