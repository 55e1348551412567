//! Clone buffer construction.
//!
//! The padded sequence is `clones(last C) ++ real ++ clones(first C)`. Every
//! slot remembers the real index it shows, so the two index spaces (padded
//! and real) never need to be reconstructed from arithmetic on the slot.

use crate::error::{Error, Result};

/// One slot of the padded sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot<T> {
    item: T,
    source: usize,
    clone: bool,
}

impl<T> Slot<T> {
    /// The item rendered in this slot.
    #[must_use]
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Mutable access to this slot's own copy of the item.
    ///
    /// Clones are independent values: editing one never touches its source.
    pub fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    /// Index of the real item this slot shows.
    #[must_use]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Whether this slot is padding.
    #[must_use]
    pub fn is_clone(&self) -> bool {
        self.clone
    }
}

/// Real items plus the clone padding that makes looping seamless.
#[derive(Clone, Debug)]
pub struct PaddedSequence<T> {
    slots: Vec<Slot<T>>,
    real_len: usize,
    clone_count: usize,
}

impl<T: Clone> PaddedSequence<T> {
    /// Build the padded sequence for `items` shown `cards_to_show` at a time.
    ///
    /// Looping needs strictly more items than fit in one viewport; otherwise
    /// (or when `looping` is false) the sequence is left unpadded.
    #[must_use]
    pub fn build(items: Vec<T>, cards_to_show: usize, looping: bool) -> Self {
        let real_len = items.len();
        if !looping || real_len <= cards_to_show {
            return Self::unpadded(items);
        }

        let clone_count = real_len.min(cards_to_show);
        let mut slots = Vec::with_capacity(real_len + 2 * clone_count);

        let tail_start = real_len - clone_count;
        slots.extend(
            items[tail_start..]
                .iter()
                .enumerate()
                .map(|(offset, item)| Slot {
                    item: item.clone(),
                    source: tail_start + offset,
                    clone: true,
                }),
        );
        let head: Vec<Slot<T>> = items[..clone_count]
            .iter()
            .enumerate()
            .map(|(source, item)| Slot {
                item: item.clone(),
                source,
                clone: true,
            })
            .collect();
        slots.extend(items.into_iter().enumerate().map(|(source, item)| Slot {
            item,
            source,
            clone: false,
        }));
        slots.extend(head);

        Self {
            slots,
            real_len,
            clone_count,
        }
    }
}

impl<T> PaddedSequence<T> {
    /// A sequence with no clone padding.
    #[must_use]
    pub fn unpadded(items: Vec<T>) -> Self {
        let real_len = items.len();
        let slots = items
            .into_iter()
            .enumerate()
            .map(|(source, item)| Slot {
                item,
                source,
                clone: false,
            })
            .collect();
        Self {
            slots,
            real_len,
            clone_count: 0,
        }
    }

    /// Number of real items (N).
    #[must_use]
    pub fn real_len(&self) -> usize {
        self.real_len
    }

    /// Clones on each side (C). Zero when looping is disabled.
    #[must_use]
    pub fn clone_count(&self) -> usize {
        self.clone_count
    }

    /// Total slots (N + 2C).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the sequence is padded for looping.
    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.clone_count > 0
    }

    /// Slot at a padded index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Slot<T>> {
        self.slots.get(index)
    }

    /// Mutable slot at a padded index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slot<T>> {
        self.slots.get_mut(index)
    }

    /// All slots in display order.
    #[must_use]
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    /// Padded index of the first real item.
    #[must_use]
    pub fn real_start(&self) -> usize {
        self.clone_count
    }

    /// Padded index of the real item `real`.
    #[must_use]
    pub fn padded_index_of(&self, real: usize) -> Option<usize> {
        (real < self.real_len).then_some(real + self.clone_count)
    }

    /// Like [`padded_index_of`](Self::padded_index_of), failing with
    /// [`Error::IndexOutOfRange`].
    pub fn checked_padded_index(&self, real: usize) -> Result<usize> {
        self.padded_index_of(real).ok_or(Error::IndexOutOfRange {
            index: real,
            len: self.real_len,
        })
    }

    /// Iterate over the real (non-clone) items.
    pub fn real_items(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|slot| !slot.clone).map(Slot::item)
    }
}
