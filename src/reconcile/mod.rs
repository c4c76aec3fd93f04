//! Reconciliation of local images against the stored and remote state.
//!
//! - [`matcher`]: decides new / unchanged per local image and used /
//!   replaced / removed per remote image
//! - [`alloc`]: names the images left without an identifier

mod alloc;
mod matcher;

pub use alloc::allocate;
pub use matcher::match_images;

use crate::error::SheetError;
use crate::image::ImageSet;

/// Match, then allocate. On success every local image has a unique identifier.
pub fn reconcile(
    stored: &ImageSet,
    local: &mut ImageSet,
    remote: &mut ImageSet,
    max_image_count: usize,
) -> Result<(), SheetError> {
    let matching = match_images(stored, local, remote);
    allocate(local, &matching.unnamed, &matching.used, max_image_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageRecord, test_local};

    #[test]
    fn test_reconcile_names_every_image_uniquely() {
        let stored: ImageSet = [
            ImageRecord::stored("keep.png", "0", "u0", "K", 10),
            ImageRecord::stored("change.png", "1", "u1", "C1", 11),
            ImageRecord::stored("gone.png", "2", "u2", "G", 12),
        ]
        .into_iter()
        .collect();
        let mut remote: ImageSet = [("0", "u0", 10), ("1", "u1", 11), ("2", "u2", 12)]
            .into_iter()
            .map(|(id, url, size)| {
                let mut image = ImageRecord::remote(id, url);
                image.common.remote_size = Some(size);
                image
            })
            .collect();
        let mut local: ImageSet = [
            test_local("keep.png", "K", 4),
            test_local("change.png", "C2", 2),
            test_local("added.png", "A", 9),
        ]
        .into_iter()
        .collect();

        reconcile(&stored, &mut local, &mut remote, 50).unwrap();

        let ids: Vec<_> = local.iter().map(|i| i.identifier().unwrap()).collect();
        assert_eq!(ids, ["0", "1", "2"]);
        assert!(remote.get(0).unwrap().is_used());
        assert!(remote.get(1).unwrap().is_replaced());
        assert!(remote.get(2).unwrap().is_removed());
        assert_eq!(local.view().new_images().len(), 2);
    }
}
