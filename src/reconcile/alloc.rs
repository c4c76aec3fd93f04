//! Identifier allocation.
//!
//! Identifiers are bijective base-62 numerals over [`ALPHABET`]: `1 → "0"`,
//! `62 → "Z"`, `63 → "00"`. Shorter identifiers are exhausted before longer
//! ones, so the most used images should get the lowest ordinals.
//!
//! Ordinals already held by unchanged images are skipped. Each free ordinal
//! remembers a usage floor: the usage count of the nearest taken ordinal
//! above it. While spare identifiers remain, a free identifier whose floor
//! exceeds the next image's usage is held back for that image's betters.

use rustc_hash::FxHashMap;

use crate::debug;
use crate::error::SheetError;
use crate::image::ImageSet;

pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Bijective base-62 numeral of `number` (`0` yields the empty string).
pub fn alpha_base(mut number: usize) -> String {
    let base = ALPHABET.len();
    let mut digits = Vec::new();
    while number > 0 {
        let rem = (number - 1) % base;
        number = (number - 1) / base;
        digits.push(ALPHABET[rem]);
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Free identifiers in ascending ordinal order, each with its usage floor.
pub fn available_identifiers(
    max_image_count: usize,
    used: &FxHashMap<String, usize>,
) -> Vec<(String, usize)> {
    let mut available = Vec::new();
    let mut floor = 0;
    let mut in_free_run = false;

    for ordinal in (1..=max_image_count).rev() {
        let identifier = alpha_base(ordinal);
        match used.get(&identifier) {
            Some(&usage) => {
                if in_free_run {
                    floor = usage;
                    in_free_run = false;
                }
            }
            None => {
                available.push((identifier, floor));
                in_free_run = true;
            }
        }
    }

    available.reverse();
    available
}

/// Assign identifiers to the `unnamed` local images (most used first).
pub fn allocate(
    local: &mut ImageSet,
    unnamed: &[usize],
    used: &FxHashMap<String, usize>,
    max_image_count: usize,
) -> Result<(), SheetError> {
    if unnamed.is_empty() {
        return Ok(());
    }

    let available = available_identifiers(max_image_count, used);
    if unnamed.len() > available.len() {
        return Err(SheetError::Capacity {
            unnamed: unnamed.len(),
            available: available.len(),
            max: max_image_count,
        });
    }

    let mut extra = available.len() - unnamed.len();
    debug!("alloc"; "{} free identifiers, {} spare", available.len(), extra);

    let mut pending = unnamed.iter().copied().peekable();
    for (identifier, floor) in available {
        let Some(&next) = pending.peek() else {
            break;
        };
        let usage = local.get(next).map_or(0, |image| image.usage_count());

        if extra > 0 && floor > usage {
            extra -= 1;
            continue;
        }

        if let Some(image) = local.get_mut(next) {
            debug!("alloc"; "{} -> {}", image.filename(), identifier);
            image.assign_identifier(identifier);
        }
        pending.next();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::test_local;
    use crate::reconcile::match_images;
    use rustc_hash::FxHashSet;

    /// Deterministic xorshift for property tests.
    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }

        fn below(&mut self, n: usize) -> usize {
            (self.next() % n as u64) as usize
        }
    }

    fn used_map(entries: &[(&str, usize)]) -> FxHashMap<String, usize> {
        entries.iter().map(|(id, usage)| (id.to_string(), *usage)).collect()
    }

    #[test]
    fn test_alpha_base() {
        assert_eq!(alpha_base(0), "");
        assert_eq!(alpha_base(1), "0");
        assert_eq!(alpha_base(10), "9");
        assert_eq!(alpha_base(11), "a");
        assert_eq!(alpha_base(62), "Z");
        assert_eq!(alpha_base(63), "00");
        assert_eq!(alpha_base(62 + 62 * 62), "ZZ");
        assert_eq!(alpha_base(62 + 62 * 62 + 1), "000");
    }

    #[test]
    fn test_available_identifiers_floors() {
        // ordinals 1..=5 are "0".."4"; "1" and "3" are taken
        let used = used_map(&[("1", 7), ("3", 2)]);
        let available = available_identifiers(5, &used);

        assert_eq!(
            available,
            [
                ("0".to_string(), 7),
                ("2".to_string(), 2),
                ("4".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_allocate_shortest_first() {
        let mut local: ImageSet = [
            test_local("a.png", "A", 1),
            test_local("b.png", "B", 9),
        ]
        .into_iter()
        .collect();

        allocate(&mut local, &[1, 0], &FxHashMap::default(), 50).unwrap();

        assert_eq!(local.get(1).unwrap().identifier(), Some("0"));
        assert_eq!(local.get(0).unwrap().identifier(), Some("1"));
    }

    #[test]
    fn test_allocate_reserves_identifier_below_heavier_slot() {
        // "0" sits below taken "1" (usage 10); the only new image is used once,
        // so with spare capacity it skips "0" and takes "2".
        let mut local: ImageSet = [test_local("a.png", "A", 1)].into_iter().collect();
        let used = used_map(&[("1", 10)]);

        allocate(&mut local, &[0], &used, 3).unwrap();
        assert_eq!(local.get(0).unwrap().identifier(), Some("2"));
    }

    #[test]
    fn test_allocate_uses_reserved_when_no_spare() {
        let mut local: ImageSet = [test_local("a.png", "A", 1), test_local("b.png", "B", 1)]
            .into_iter()
            .collect();
        let used = used_map(&[("1", 10)]);

        allocate(&mut local, &[0, 1], &used, 3).unwrap();
        assert_eq!(local.get(0).unwrap().identifier(), Some("0"));
        assert_eq!(local.get(1).unwrap().identifier(), Some("2"));
    }

    #[test]
    fn test_capacity_error() {
        let mut local: ImageSet = [test_local("a.png", "A", 1), test_local("b.png", "B", 1)]
            .into_iter()
            .collect();
        let used = used_map(&[("0", 1)]);

        let err = allocate(&mut local, &[0, 1], &used, 2).unwrap_err();
        assert!(matches!(
            err,
            SheetError::Capacity {
                unnamed: 2,
                available: 1,
                max: 2
            }
        ));
    }

    #[test]
    fn test_new_logo_gets_shortest_unused_identifier() {
        use crate::image::ImageRecord;

        let stored: ImageSet = [ImageRecord::stored("bg.jpg", "0", "u0", "H2", 5)]
            .into_iter()
            .collect();
        let mut remote: ImageSet = [{
            let mut r = ImageRecord::remote("0", "u0");
            r.common.remote_size = Some(5);
            r
        }]
        .into_iter()
        .collect();
        let mut local: ImageSet = [test_local("bg.jpg", "H2", 1), test_local("logo.png", "H1", 5)]
            .into_iter()
            .collect();

        let matching = match_images(&stored, &mut local, &mut remote);
        allocate(&mut local, &matching.unnamed, &matching.used, 50).unwrap();

        let logo = local.find_by_filename("logo.png").unwrap();
        assert!(logo.is_new());
        assert_eq!(logo.identifier(), Some("1"));
    }

    /// Random usage counts, capacities and taken slots: every unnamed image
    /// gets a unique free identifier, the result is reproducible, and a more
    /// used image never gets a longer identifier than a less used one.
    #[test]
    fn test_allocation_properties() {
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);

        for _ in 0..300 {
            let max = 1 + rng.below(150);
            let taken = rng.below(max + 1);
            let wanted = rng.below(max + 1);

            let mut used = FxHashMap::default();
            while used.len() < taken {
                let ordinal = 1 + rng.below(max);
                used.insert(alpha_base(ordinal), rng.below(20));
            }

            let images: ImageSet = (0..wanted)
                .map(|i| test_local(&format!("img{i}.png"), &format!("h{i}"), rng.below(20)))
                .collect();
            let unnamed = images.view().by_usage_count().desc().indices();

            let mut first = images.clone();
            let result = allocate(&mut first, &unnamed, &used, max);

            if wanted > max - taken {
                assert!(matches!(result, Err(SheetError::Capacity { .. })));
                continue;
            }
            result.unwrap();

            let mut second = images.clone();
            allocate(&mut second, &unnamed, &used, max).unwrap();
            assert_eq!(first, second);

            let mut seen = FxHashSet::default();
            for image in first.iter() {
                let id = image.identifier().expect("every image is named");
                assert!(!used.contains_key(id), "{id} collides with a kept image");
                assert!(seen.insert(id.to_string()), "{id} assigned twice");
            }

            for a in first.iter() {
                for b in first.iter() {
                    if a.usage_count() > b.usage_count() {
                        let (la, lb) = (
                            a.identifier().map_or(0, str::len),
                            b.identifier().map_or(0, str::len),
                        );
                        assert!(
                            la <= lb,
                            "usage {} got longer id than usage {}",
                            a.usage_count(),
                            b.usage_count()
                        );
                    }
                }
            }
        }
    }
}
