//! Three-way matching of local images against stored and remote records.
//!
//! Per local image, in filename order:
//!
//! 1. No stored record with the same filename: new.
//! 2. No remote record matching the stored identifier, URL and remote size
//!    (all three): new.
//! 3. Hash differs from the stored one: new, and the remote slot is replaced.
//!    Otherwise the stored URL and size are reused and the remote is used.
//!
//! In case 3 the local image keeps the stored identifier either way, so a
//! changed image is uploaded over its old slot.

use rustc_hash::FxHashMap;

use crate::debug;
use crate::image::ImageSet;

/// Outcome of matching, consumed by the allocator.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Matching {
    /// Identifiers already taken, with the usage count of their local image.
    pub used: FxHashMap<String, usize>,
    /// Local images still without an identifier, most used first.
    pub unnamed: Vec<usize>,
}

pub fn match_images(stored: &ImageSet, local: &mut ImageSet, remote: &mut ImageSet) -> Matching {
    let mut used = FxHashMap::default();

    for index in local.view().by_filename().indices() {
        let Some(image) = local.get(index) else {
            continue;
        };
        let filename = image.filename().to_string();
        let hash = image.hash().map(str::to_string);
        let usage_count = image.usage_count();

        let Some(stored_image) = stored.find_by_filename(&filename) else {
            debug!("match"; "{}: not in stored images, new", filename);
            mark_new(local, index);
            continue;
        };

        let remote_index = remote.position(|r| {
            r.identifier() == stored_image.identifier()
                && r.url() == stored_image.url()
                && r.remote_size() == stored_image.remote_size()
        });
        let Some(remote_index) = remote_index else {
            debug!("match"; "{}: no live remote image, new", filename);
            mark_new(local, index);
            continue;
        };

        let Some(identifier) = stored_image.identifier() else {
            mark_new(local, index);
            continue;
        };
        if used.contains_key(identifier) {
            debug!("match"; "{}: identifier {} already taken, new", filename, identifier);
            mark_new(local, index);
            continue;
        }

        let unchanged = hash.as_deref() == stored_image.hash();
        if let Some(remote_image) = remote.get_mut(remote_index) {
            if unchanged {
                remote_image.mark_as_used();
            } else {
                remote_image.mark_as_replaced();
            }
        }

        if let Some(image) = local.get_mut(index) {
            if unchanged {
                if let Some(url) = stored_image.url() {
                    image.set_remote(url, stored_image.remote_size());
                }
                debug!("match"; "{}: unchanged as {}", filename, identifier);
            } else {
                image.mark_as_new();
                debug!("match"; "{}: changed, replaces {}", filename, identifier);
            }
            image.assign_identifier(identifier);
        }
        used.insert(identifier.to_string(), usage_count);
    }

    let unnamed = local.view().unnamed().by_usage_count().desc().indices();
    Matching { used, unnamed }
}

fn mark_new(local: &mut ImageSet, index: usize) {
    if let Some(image) = local.get_mut(index) {
        image.mark_as_new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageRecord, test_local};

    fn remote_with_size(identifier: &str, url: &str, size: u64) -> ImageRecord {
        let mut image = ImageRecord::remote(identifier, url);
        image.common.remote_size = Some(size);
        image
    }

    #[test]
    fn test_new_image_without_stored_record() {
        let stored = ImageSet::new();
        let mut local: ImageSet = [test_local("logo.png", "H1", 5)].into_iter().collect();
        let mut remote = ImageSet::new();

        let matching = match_images(&stored, &mut local, &mut remote);

        let logo = local.get(0).unwrap();
        assert!(logo.is_new());
        assert!(!logo.is_named());
        assert_eq!(matching.unnamed, [0]);
        assert!(matching.used.is_empty());
    }

    #[test]
    fn test_unchanged_image_reuses_identifier() {
        let stored: ImageSet = [ImageRecord::stored("bg.jpg", "c", "file:///c.png", "H2", 700)]
            .into_iter()
            .collect();
        let mut local: ImageSet = [test_local("bg.jpg", "H2", 3)].into_iter().collect();
        let mut remote: ImageSet = [remote_with_size("c", "file:///c.png", 700)]
            .into_iter()
            .collect();

        let matching = match_images(&stored, &mut local, &mut remote);

        let bg = local.get(0).unwrap();
        assert!(!bg.is_new());
        assert_eq!(bg.identifier(), Some("c"));
        assert_eq!(bg.url(), Some("file:///c.png"));
        assert_eq!(bg.remote_size(), Some(700));
        assert!(remote.get(0).unwrap().is_used());
        assert_eq!(matching.used.get("c"), Some(&3));
        assert!(matching.unnamed.is_empty());
    }

    #[test]
    fn test_changed_hash_replaces_remote() {
        let stored: ImageSet = [ImageRecord::stored("bg.jpg", "c", "file:///c.png", "H2", 700)]
            .into_iter()
            .collect();
        let mut local: ImageSet = [test_local("bg.jpg", "H3", 3)].into_iter().collect();
        let mut remote: ImageSet = [remote_with_size("c", "file:///c.png", 700)]
            .into_iter()
            .collect();

        match_images(&stored, &mut local, &mut remote);

        let bg = local.get(0).unwrap();
        assert!(bg.is_new());
        assert_eq!(bg.identifier(), Some("c"));
        assert_eq!(bg.url(), None);

        let c = remote.get(0).unwrap();
        assert!(c.is_replaced());
        assert!(!c.is_removed());
    }

    #[test]
    fn test_unmatched_remote_is_removed() {
        let stored: ImageSet = [ImageRecord::stored("old.png", "0", "file:///0.png", "H0", 10)]
            .into_iter()
            .collect();
        let mut local: ImageSet = [test_local("logo.png", "H1", 1)].into_iter().collect();
        let mut remote: ImageSet = [remote_with_size("0", "file:///0.png", 10)]
            .into_iter()
            .collect();

        match_images(&stored, &mut local, &mut remote);

        assert!(remote.get(0).unwrap().is_removed());
        assert_eq!(remote.view().removed().len(), 1);
    }

    /// A remote image whose URL changed under the same identifier is not
    /// matched: all three of identifier, URL and size must agree, so the
    /// local image is uploaded again and the old slot counts as removed.
    #[test]
    fn test_three_field_match_rejects_changed_url() {
        let stored: ImageSet = [ImageRecord::stored("bg.jpg", "c", "file:///old.png", "H2", 700)]
            .into_iter()
            .collect();
        let mut local: ImageSet = [test_local("bg.jpg", "H2", 3)].into_iter().collect();
        let mut remote: ImageSet = [remote_with_size("c", "file:///new.png", 700)]
            .into_iter()
            .collect();

        let matching = match_images(&stored, &mut local, &mut remote);

        assert!(local.get(0).unwrap().is_new());
        assert!(!local.get(0).unwrap().is_named());
        assert!(remote.get(0).unwrap().is_removed());
        assert_eq!(matching.unnamed, [0]);
    }

    #[test]
    fn test_three_field_match_rejects_changed_size() {
        let stored: ImageSet = [ImageRecord::stored("bg.jpg", "c", "u", "H2", 700)]
            .into_iter()
            .collect();
        let mut local: ImageSet = [test_local("bg.jpg", "H2", 3)].into_iter().collect();
        let mut remote: ImageSet = [ImageRecord::remote("c", "u")].into_iter().collect();

        match_images(&stored, &mut local, &mut remote);

        assert!(local.get(0).unwrap().is_new());
        assert!(remote.get(0).unwrap().is_removed());
    }

    #[test]
    fn test_unnamed_queue_orders_by_usage_then_original_order() {
        let mut local: ImageSet = [
            test_local("a.png", "A", 1),
            test_local("b.png", "B", 4),
            test_local("c.png", "C", 1),
            test_local("d.png", "D", 4),
        ]
        .into_iter()
        .collect();

        let matching = match_images(&ImageSet::new(), &mut local, &mut ImageSet::new());
        assert_eq!(matching.unnamed, [1, 3, 0, 2]);
    }
}
