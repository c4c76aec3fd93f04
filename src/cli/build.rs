//! `subsheet build`: everything up to, but not including, publishing.
//!
//! Compile → scan and load images → validate → read prior state and remote
//! images → reconcile → adapt CSS. Results land in the build state file
//! and the adapted stylesheet; the remote is only read.

use std::fs;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::asset::{AssetIndex, css_size, load_local_images, scan_images};
use crate::compiler::compile_sass;
use crate::config::SheetConfig;
use crate::error::SheetError;
use crate::image::{ImageRecord, ImageSet};
use crate::reconcile::reconcile;
use crate::remote::RemoteHost;
use crate::state::{DataKey, SheetState, parse_data_page};
use crate::utils::path::{normalize_path, relative_path};
use crate::utils::plural::plural_count;
use crate::validate::Validator;
use crate::{debug, log};

pub fn build_sheet(
    config: &SheetConfig,
    host: &dyn RemoteHost,
    key: &DataKey,
    revision_note: String,
) -> Result<SheetState> {
    let build = &config.build;
    let limits = &config.limits;

    log!("build"; "compiling {}", build.sass.display());
    let css = compile_sass(&build.sass)?;

    let css_dir = build.css.parent().unwrap_or(config.get_root());
    fs::create_dir_all(css_dir)
        .map_err(|err| SheetError::write("the output directory", css_dir, err))?;
    let images_ref = relative_path(&normalize_path(&build.images), &normalize_path(css_dir));
    let index = AssetIndex::new(&images_ref, &limits.image_extensions)
        .context("image extensions do not form a valid reference pattern")?;
    debug!("build"; "images referenced as `{}/...`", index.images_dir());

    let references = index.references(&css);
    let filenames = scan_images(&build.images, limits)?;
    let mut local = load_local_images(&build.images, &filenames, &references)?;
    log!("build"; "loaded {}", plural_count(local.len(), "image"));

    Validator::new(limits)
        .images(&local)
        .integrity(&local, &references)
        .references(&index, &css)
        .uniqueness(&local)
        .finish()?;

    let stored = read_stored(host, &config.target.data_page, key)?;
    let mut remote = list_remote(host)?;
    debug!("build"; "{} stored, {} remote", stored.len(), remote.len());

    reconcile(&stored, &mut local, &mut remote, limits.max_image_count)?;

    let adapted = index.adapt(&css, &local);
    Validator::new(limits).css_size(css_size(&adapted)).finish()?;

    let state = SheetState {
        stored,
        local,
        remote,
        ..SheetState::new(
            config.target.name.as_str(),
            build.css.as_path(),
            config.target.data_page.as_str(),
            revision_note,
        )
    };
    state.save(&build.state)?;
    fs::write(&build.css, &adapted)
        .map_err(|err| SheetError::write("the adapted stylesheet", &build.css, err))?;

    log!(
        "build";
        "{} unchanged, {} new, {} to remove",
        state.local.view().unchanged().len(),
        state.local.view().new_images().len(),
        state.remote.view().removed().len()
    );
    Ok(state)
}

/// Stored images from the Data Page, or none if it cannot be trusted.
fn read_stored(
    host: &dyn RemoteHost,
    data_page: &str,
    key: &DataKey,
) -> Result<ImageSet, SheetError> {
    let page = host.read_page(data_page)?.unwrap_or_default();
    if page.trim().is_empty() {
        log!("warning"; "data page `{}` is empty, treating every image as new", data_page);
        return Ok(ImageSet::new());
    }

    match parse_data_page(&page, key) {
        Some(stored) => Ok(stored),
        None => {
            log!(
                "warning";
                "data page `{}` failed verification, treating every image as new",
                data_page
            );
            Ok(ImageSet::new())
        }
    }
}

/// Remote images with their probed sizes.
fn list_remote(host: &dyn RemoteHost) -> Result<ImageSet, SheetError> {
    let listed = host.list_images()?;
    Ok(listed
        .par_iter()
        .map(|(identifier, url)| {
            let mut image = ImageRecord::remote(identifier.as_str(), url.as_str());
            image.common.remote_size = host.probe_size(url);
            image
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect())
}
