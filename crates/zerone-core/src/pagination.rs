//! Offset-based pagination.
//!
//! Clients send an item offset and a page size; stores work with a page
//! index. The index is `offset / size`, so an offset that is not a multiple
//! of the size lands on the page containing it.

use std::num::NonZeroU64;

/// Page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    index: u64,
    size: NonZeroU64,
}

impl PageRequest {
    pub fn new(index: u64, size: NonZeroU64) -> Self {
        Self { index, size }
    }

    /// Convert an item offset to the page that contains it.
    pub fn from_offset(offset: u64, size: NonZeroU64) -> Self {
        Self::new(offset / size.get(), size)
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn size(&self) -> u64 {
        self.size.get()
    }

    /// Number of items before the first item of this page.
    pub fn skip(&self) -> u64 {
        self.index.saturating_mul(self.size.get())
    }

    /// Cut this page out of a full, ordered result set.
    pub fn window<T>(&self, items: impl IntoIterator<Item = T>) -> Page<T> {
        let skip = self.skip();
        let end = skip.saturating_add(self.size());
        let mut total = 0u64;
        let mut page = Vec::new();

        for item in items {
            if total >= skip && total < end {
                page.push(item);
            }
            total += 1;
        }

        Page::new(page, total)
    }
}

/// One page of results plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
