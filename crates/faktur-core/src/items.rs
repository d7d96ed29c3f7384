//! # Item Store
//!
//! The ordered list of line items on the invoice.
//!
//! ## Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ItemList always holds at least ONE item                                │
//! │                                                                         │
//! │  new()            → [default]                                           │
//! │  add()            → [.., default]                                       │
//! │  remove(i)        → removes only when len > 1 AND i < len               │
//! │  replace_all([])  → [default]        (old / hand-edited snapshots)      │
//! │  reset()          → [default]                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store knows nothing about rendering or persistence. The editor
//! controller follows every mutation with render, recompute and save.

use crate::types::{ItemField, LineItem};

/// Ordered line items, never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemList {
    items: Vec<LineItem>,
}

impl Default for ItemList {
    fn default() -> Self {
        ItemList::new()
    }
}

impl ItemList {
    /// Creates a list holding one default item.
    pub fn new() -> Self {
        ItemList {
            items: vec![LineItem::default()],
        }
    }

    /// Builds a list from loaded items, keeping the non-empty invariant.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut list = ItemList::new();
        list.replace_all(items);
        list
    }

    /// Appends a default item.
    pub fn add(&mut self) {
        self.items.push(LineItem::default());
    }

    /// Removes the item at `index`.
    ///
    /// Returns false without touching the list when it would become empty
    /// or when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.items.len() <= 1 || index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    /// Overwrites one field of the item at `index` from raw input text.
    ///
    /// Out-of-range indices are ignored. Returns whether an item changed.
    pub fn update(&mut self, index: usize, field: ItemField, raw: &str) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.set(field, raw);
                true
            }
            None => false,
        }
    }

    /// Replaces every item. An empty input becomes a single default item.
    pub fn replace_all(&mut self, items: Vec<LineItem>) {
        if items.is_empty() {
            self.reset();
        } else {
            self.items = items;
        }
    }

    /// Back to a single default item.
    pub fn reset(&mut self) {
        self.items = vec![LineItem::default()];
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: the list never drops below one item.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[LineItem] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
