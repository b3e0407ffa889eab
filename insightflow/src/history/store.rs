//! Newest-first store with an optional capacity and a selection pointer.

use std::collections::VecDeque;

/// Number of workflow runs retained by default.
pub const DEFAULT_RUN_HISTORY: usize = 5;

/// Items that carry a stable string identity.
pub trait Identified {
    /// Returns the item's id.
    fn id(&self) -> &str;
}

/// Ordered, most-recent-first list of items with a "currently selected" id.
///
/// With a capacity, appending beyond it drops the oldest item. Selecting an
/// id that is not present is ignored; evicting the selected item clears the
/// selection.
#[derive(Debug, Clone)]
pub struct HistoryStore<T> {
    items: VecDeque<T>,
    capacity: Option<usize>,
    selected: Option<String>,
}

impl<T> Default for HistoryStore<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T> HistoryStore<T> {
    /// Creates a store with no capacity limit.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            items: VecDeque::new(),
            capacity: None,
            selected: None,
        }
    }

    /// Creates a store that keeps at most `capacity` items (minimum 1).
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.max(1)),
            capacity: Some(capacity.max(1)),
            selected: None,
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Returns the selected id.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Returns the most recent item.
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.items.front()
    }

    /// Iterates items newest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Returns the capacity limit, if any.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Identified> HistoryStore<T> {
    /// Inserts an item at the front.
    ///
    /// Returns the evicted item, if the capacity was exceeded.
    pub fn append(&mut self, item: T) -> Option<T> {
        self.items.push_front(item);
        let evicted = match self.capacity {
            Some(cap) if self.items.len() > cap => self.items.pop_back(),
            _ => None,
        };
        if let Some(ref old) = evicted {
            if self.selected.as_deref() == Some(old.id()) {
                self.selected = None;
            }
        }
        evicted
    }

    /// Selects the item with `id`. Returns false if it is not present.
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_some() {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Returns the selected item.
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Returns an item by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Returns a mutable item by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Applies `f` to the item with `id`. Returns false if it is not present.
    pub fn update<F>(&mut self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.get_mut(id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }
}
