//! The track: the strip element holding the cards.

mod clones;

pub use clones::{PaddedSequence, Slot};

use crate::geometry::ItemMetrics;

/// A track element as found in the host container: its cards in display order
/// and the measurements of one rendered card.
#[derive(Clone, Debug, PartialEq)]
pub struct Track<T> {
    items: Vec<T>,
    metrics: ItemMetrics,
}

impl<T> Track<T> {
    /// Create a track from its cards and their measured size.
    #[must_use]
    pub fn new(items: Vec<T>, metrics: ItemMetrics) -> Self {
        Self { items, metrics }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn metrics(&self) -> ItemMetrics {
        self.metrics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<T>, ItemMetrics) {
        (self.items, self.metrics)
    }
}
