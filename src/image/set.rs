//! Ordered image collections with composable, non-destructive views.
//!
//! ```ignore
//! // new images, most used first
//! let queue = set.view().new_images().by_usage_count().desc();
//! for image in queue.iter() { ... }
//! ```
//!
//! A view borrows the backing slice and stores only its filters and sort
//! order. Nothing is copied until iteration, and a view never hands out
//! mutable access: callers that need to update records take
//! [`ImageView::indices`] and go through [`ImageSet::get_mut`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::ImageRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSet(Vec<ImageRecord>);

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, image: ImageRecord) {
        self.0.push(image);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageRecord> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ImageRecord> {
        self.0.get_mut(index)
    }

    /// Index of the first record satisfying `pred`.
    pub fn position(&self, pred: impl Fn(&ImageRecord) -> bool) -> Option<usize> {
        self.0.iter().position(pred)
    }

    pub fn find(&self, pred: impl Fn(&ImageRecord) -> bool) -> Option<&ImageRecord> {
        self.0.iter().find(|image| pred(image))
    }

    pub fn find_by_filename(&self, filename: &str) -> Option<&ImageRecord> {
        self.find(|image| image.filename() == filename)
    }

    /// Unfiltered, unsorted view over all records.
    pub fn view(&self) -> ImageView<'_> {
        ImageView::new(&self.0)
    }
}

impl FromIterator<ImageRecord> for ImageSet {
    fn from_iter<I: IntoIterator<Item = ImageRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ImageSet {
    type Item = &'a ImageRecord;
    type IntoIter = std::slice::Iter<'a, ImageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Filename,
    /// Shortest identifiers first, then alphabetical. Unnamed records last.
    Identifier,
    UsageCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

type Predicate = fn(&ImageRecord) -> bool;

#[derive(Clone)]
pub struct ImageView<'a> {
    records: &'a [ImageRecord],
    filters: Vec<Predicate>,
    sort: Option<SortKey>,
    order: Order,
}

impl<'a> ImageView<'a> {
    fn new(records: &'a [ImageRecord]) -> Self {
        Self {
            records,
            filters: Vec::new(),
            sort: None,
            order: Order::Asc,
        }
    }

    /// Keep records that satisfy `pred` (combined with existing filters).
    pub fn filter(mut self, pred: Predicate) -> Self {
        self.filters.push(pred);
        self
    }

    pub fn new_images(self) -> Self {
        self.filter(ImageRecord::is_new)
    }

    pub fn unchanged(self) -> Self {
        self.filter(|image| !image.is_new())
    }

    pub fn unnamed(self) -> Self {
        self.filter(|image| !image.is_named())
    }

    pub fn removed(self) -> Self {
        self.filter(ImageRecord::is_removed)
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    pub fn by_filename(self) -> Self {
        self.sort_by(SortKey::Filename)
    }

    pub fn by_identifier(self) -> Self {
        self.sort_by(SortKey::Identifier)
    }

    pub fn by_usage_count(self) -> Self {
        self.sort_by(SortKey::UsageCount)
    }

    /// Reverse the sort order. Ties keep their original relative order.
    pub fn desc(mut self) -> Self {
        self.order = Order::Desc;
        self
    }

    fn matches(&self, image: &ImageRecord) -> bool {
        self.filters.iter().all(|pred| pred(image))
    }

    /// Positions in the backing storage, filtered and in view order.
    pub fn indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, image)| self.matches(image))
            .map(|(i, _)| i)
            .collect();

        if let Some(key) = self.sort {
            let records = self.records;
            indices.sort_by(|&a, &b| {
                let ord = compare(&records[a], &records[b], key);
                match self.order {
                    Order::Asc => ord,
                    Order::Desc => ord.reverse(),
                }
            });
        }

        indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ImageRecord> + use<'a> {
        let records = self.records;
        self.indices().into_iter().map(move |i| &records[i])
    }

    pub fn len(&self) -> usize {
        if self.filters.is_empty() {
            return self.records.len();
        }
        self.records.iter().filter(|image| self.matches(image)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First matching record in backing order.
    pub fn find(&self, pred: impl Fn(&ImageRecord) -> bool) -> Option<&'a ImageRecord> {
        self.records
            .iter()
            .find(|image| self.matches(image) && pred(image))
    }
}

fn compare(a: &ImageRecord, b: &ImageRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Filename => a.filename().cmp(b.filename()),
        SortKey::Identifier => identifier_key(a).cmp(&identifier_key(b)),
        SortKey::UsageCount => a.usage_count().cmp(&b.usage_count()),
    }
}

fn identifier_key(image: &ImageRecord) -> (bool, usize, &str) {
    match image.identifier() {
        Some(id) => (false, id.len(), id),
        None => (true, 0, ""),
    }
}
