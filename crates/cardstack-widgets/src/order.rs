//! Stack order: the card sequence and its highlighted position.
//!
//! Position 0 fans out lowest on screen. Promoting a card moves
//! it to the last position; nothing else ever reorders the sequence.

/// One history entry shown on a card.
///
/// Identity is the entry's position in the [`StackOrder`]; two value-equal
/// entries are still distinct cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Display name, rendered on the card.
    pub name: String,
    /// Address carried along untouched; never fetched or validated.
    pub url: String,
}

impl Item {
    /// Create an entry.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// An ordered, fixed-length sequence with an optional highlighted position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOrder<T> {
    items: Vec<T>,
    highlighted: Option<usize>,
}

impl<T> StackOrder<T> {
    /// Create an order with nothing highlighted.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            highlighted: None,
        }
    }

    /// Items in stack order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items. Fixed for the lifetime of the order.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if the order holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Position of the most recently promoted item.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Move the item at `index` to the last position and highlight it.
    ///
    /// Returns the item's new index, or `None` (leaving the order untouched)
    /// when `index` is out of range.
    pub fn promote(&mut self, index: usize) -> Option<usize> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.items.push(item);
        let last = self.items.len() - 1;
        self.highlighted = Some(last);
        Some(last)
    }
}
