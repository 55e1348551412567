//! Position indicators (dots).
//!
//! The padded index and the real index are separate spaces; [`real_index`] is
//! the only bridge between them.

/// Map a padded index to the real item it shows.
///
/// `((index - clones) mod len + len) mod len`, always in `[0, len)`.
/// Returns `None` for an empty sequence.
#[must_use]
pub fn real_index(index: usize, clones: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let shifted = index as i64 - clones as i64;
    Some(shifted.rem_euclid(len as i64) as usize)
}

/// A row of indicators, one per real item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndicatorRow {
    count: usize,
    active: Option<usize>,
}

impl IndicatorRow {
    /// Indicators for `count` real items; the first one starts active.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            active: (count > 0).then_some(0),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Currently active real index.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn is_active(&self, real: usize) -> bool {
        self.active == Some(real)
    }

    /// Recompute the active indicator for a padded index.
    ///
    /// Returns the previous active index when it changed.
    pub fn sync(&mut self, index: usize, clones: usize) -> Option<Option<usize>> {
        let next = real_index(index, clones, self.count);
        if next == self.active {
            return None;
        }
        let previous = self.active;
        self.active = next;
        Some(previous)
    }

    /// Active state of every indicator, in order.
    pub fn states(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.count).map(|i| self.is_active(i))
    }
}
