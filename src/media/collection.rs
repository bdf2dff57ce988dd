// SPDX-License-Identifier: MPL-2.0
//! The sorted image list of the currently loaded folder.

use super::sort::sort_entries;
use super::{path, ImageEntry};
use crate::config::SortOrder;

/// Ordered images of one folder.
///
/// Replaced wholesale on each successful load. The only in-place mutation is
/// [`ImageCollection::remove`], which drops exactly one entry and shifts the
/// following indices down by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCollection {
    folder: String,
    entries: Vec<ImageEntry>,
}

impl ImageCollection {
    /// Creates a collection from entries that are already in display order.
    pub fn new(folder: impl Into<String>, entries: Vec<ImageEntry>) -> Self {
        Self {
            folder: folder.into(),
            entries,
        }
    }

    #[must_use]
    pub fn folder(&self) -> &str {
        &self.folder
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageEntry> {
        self.entries.iter()
    }

    /// Index of the entry with the given filename.
    #[must_use]
    pub fn position(&self, filename: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.filename() == filename)
    }

    /// Removes the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<ImageEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Re-sorts the entries locally, without a network round-trip.
    pub fn resort(&mut self, order: SortOrder) {
        sort_entries(&mut self.entries, order);
    }

    /// Encoded URL path of the image at `index`.
    #[must_use]
    pub fn image_path(&self, index: usize) -> Option<String> {
        self.get(index)
            .map(|entry| path::image_path(&self.folder, entry.filename()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::sort_images;

    fn collection(names: &[&str]) -> ImageCollection {
        ImageCollection::new("Alice", names.iter().map(|n| ImageEntry::new(*n)).collect())
    }

    #[test]
    fn remove_shifts_following_entries() {
        let mut images = collection(&["a.png", "b.png", "c.png"]);
        let removed = images.remove(1);

        assert_eq!(removed.map(|e| e.filename().to_string()), Some("b.png".into()));
        assert_eq!(images.len(), 2);
        assert_eq!(images.get(1).map(ImageEntry::filename), Some("c.png"));
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut images = collection(&["a.png"]);
        assert!(images.remove(3).is_none());
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn resort_flips_order() {
        let mut images = ImageCollection::new(
            "Alice",
            sort_images(["2024-01-01.png", "2023-01-01.png"], SortOrder::Newest),
        );
        images.resort(SortOrder::Oldest);
        assert_eq!(images.get(0).map(ImageEntry::filename), Some("2023-01-01.png"));
    }

    #[test]
    fn image_path_encodes_segments() {
        let images = ImageCollection::new("Bob & Co", vec![ImageEntry::new("a b.png")]);
        assert_eq!(
            images.image_path(0).as_deref(),
            Some("user/images/Bob%20%26%20Co/a%20b.png")
        );
        assert!(images.image_path(1).is_none());
    }
}
