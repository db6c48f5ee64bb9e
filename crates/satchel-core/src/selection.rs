//! Selection over a list of items
//!
//! [`SelectionModel`] owns a list and at most one selected item, and notifies
//! subscribers whenever either changes. [`SearchableSelection`] sits on top and
//! narrows the list with a text query.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use tracing::trace;

use crate::collections::{next_index, previous_index};
use crate::search::{ObjectTextSearcher, Query, Searchable};
use crate::{Result, SatchelError};

/// What changed in a [`SelectionModel`]
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange<T> {
    /// The item list was replaced
    ItemsReplaced { count: usize },
    /// The selected item changed
    Selected {
        previous: Option<T>,
        current: Option<T>,
    },
}

/// Callback invoked after every change
pub type SelectionCallback<T> = Arc<dyn Fn(&SelectionChange<T>) + Send + Sync>;

/// A list of items with an optional selected item
pub struct SelectionModel<T> {
    items: RwLock<Vec<T>>,
    selected: RwLock<Option<T>>,
    subscribers: RwLock<HashMap<u64, SelectionCallback<T>>>,
    next_subscription_id: RwLock<u64>,
}

impl<T> std::fmt::Debug for SelectionModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionModel")
            .field("items", &self.items.read().len())
            .field("selected", &self.selected.read().is_some())
            .field("subscribers", &self.subscribers.read().len())
            .finish()
    }
}

impl<T: Clone + PartialEq> Default for SelectionModel<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Clone + PartialEq> SelectionModel<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            selected: RwLock::new(None),
            subscribers: RwLock::new(HashMap::new()),
            next_subscription_id: RwLock::new(1),
        }
    }

    /// Snapshot of the current items
    pub fn items(&self) -> Vec<T> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn selected(&self) -> Option<T> {
        self.selected.read().clone()
    }

    /// Position of the selected item in the current list
    pub fn selected_index(&self) -> Option<usize> {
        self.position_in(&self.items.read())
    }

    /// Register a callback. Returns an id for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&self, callback: F) -> u64
    where
        F: Fn(&SelectionChange<T>) + Send + Sync + 'static,
    {
        let mut next_id = self.next_subscription_id.write();
        let id = *next_id;
        *next_id += 1;

        self.subscribers.write().insert(id, Arc::new(callback));
        id
    }

    pub fn unsubscribe(&self, subscription_id: u64) -> bool {
        self.subscribers.write().remove(&subscription_id).is_some()
    }

    /// Swap in a new list. The selection survives when the selected item is
    /// still present, otherwise it is cleared. Subscribers see the new list
    /// and the settled selection together.
    pub fn replace_items(&self, items: Vec<T>) {
        let count = items.len();
        let cleared = {
            let mut current = self.items.write();
            let mut selected = self.selected.write();
            let keep = selected.as_ref().map_or(true, |item| items.contains(item));
            *current = items;
            trace!(count, keep, "replaced selection items");
            if keep {
                None
            } else {
                selected.take()
            }
        };

        self.notify(&SelectionChange::ItemsReplaced { count });
        if let Some(previous) = cleared {
            self.notify(&SelectionChange::Selected {
                previous: Some(previous),
                current: None,
            });
        }
    }

    /// Select an item from the list
    pub fn select(&self, item: T) -> Result<()> {
        let items = self.items.read();
        if !items.contains(&item) {
            return Err(SatchelError::InvalidOperation(
                "cannot select an item that is not in the list".to_string(),
            ));
        }
        self.set_selected(items, Some(item));
        Ok(())
    }

    pub fn select_index(&self, index: usize) -> Result<()> {
        let items = self.items.read();
        let item = items
            .get(index)
            .cloned()
            .ok_or_else(|| SatchelError::out_of_range("selection index", index, items.len()))?;
        self.set_selected(items, Some(item));
        Ok(())
    }

    pub fn clear_selection(&self) {
        self.set_selected(self.items.read(), None);
    }

    /// Move the selection forward, wrapping to the first item. With nothing
    /// selected the first item is chosen.
    pub fn select_next(&self) -> Option<T> {
        let items = self.items.read();
        if items.is_empty() {
            return None;
        }
        let index = match self.position_in(&items) {
            Some(current) => next_index(items.len(), current),
            None => 0,
        };
        let target = items[index].clone();
        self.set_selected(items, Some(target.clone()));
        Some(target)
    }

    /// Move the selection backward, wrapping to the last item. With nothing
    /// selected the last item is chosen.
    pub fn select_previous(&self) -> Option<T> {
        let items = self.items.read();
        if items.is_empty() {
            return None;
        }
        let index = match self.position_in(&items) {
            Some(current) => previous_index(items.len(), current),
            None => items.len() - 1,
        };
        let target = items[index].clone();
        self.set_selected(items, Some(target.clone()));
        Some(target)
    }

    fn position_in(&self, items: &[T]) -> Option<usize> {
        let selected = self.selected.read();
        let current = selected.as_ref()?;
        items.iter().position(|item| item == current)
    }

    /// Write the selection while `items` is still read-locked, so a concurrent
    /// `replace_items` cannot strand it. Both locks are released before
    /// subscribers run.
    fn set_selected(&self, items: RwLockReadGuard<'_, Vec<T>>, current: Option<T>) {
        let previous = {
            let mut selected = self.selected.write();
            if *selected == current {
                return;
            }
            std::mem::replace(&mut *selected, current.clone())
        };
        drop(items);
        self.notify(&SelectionChange::Selected { previous, current });
    }

    fn notify(&self, change: &SelectionChange<T>) {
        // Subscribers may re-enter the model; never call out under the lock
        let callbacks: Vec<SelectionCallback<T>> = self.subscribers.read().values().cloned().collect();
        for callback in callbacks {
            callback(change);
        }
    }
}

/// A [`SelectionModel`] fed by a text query over a source list
pub struct SearchableSelection<T> {
    source: RwLock<Vec<T>>,
    query: RwLock<Query>,
    searcher: ObjectTextSearcher,
    model: SelectionModel<T>,
}

impl<T: Searchable + Clone + PartialEq> SearchableSelection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self::with_searcher(items, ObjectTextSearcher::default())
    }

    pub fn with_searcher(items: Vec<T>, searcher: ObjectTextSearcher) -> Self {
        let model = SelectionModel::new(items.clone());
        Self {
            source: RwLock::new(items),
            query: RwLock::new(Query::default()),
            searcher,
            model,
        }
    }

    /// The filtered view
    pub fn model(&self) -> &SelectionModel<T> {
        &self.model
    }

    pub fn query(&self) -> Query {
        self.query.read().clone()
    }

    pub fn source_len(&self) -> usize {
        self.source.read().len()
    }

    /// Change the query and refilter
    pub fn set_query(&self, text: &str) {
        *self.query.write() = Query::parse(text);
        self.refilter();
    }

    /// Replace the source items and refilter
    pub fn set_items(&self, items: Vec<T>) {
        *self.source.write() = items;
        self.refilter();
    }

    /// Append one item to the source and refilter
    pub fn add_item(&self, item: T) {
        self.source.write().push(item);
        self.refilter();
    }

    /// Empty the source, which also clears the selection
    pub fn clear_items(&self) {
        self.source.write().clear();
        self.refilter();
    }

    fn refilter(&self) {
        let filtered: Vec<T> = {
            let source = self.source.read();
            let query = self.query.read();
            source
                .iter()
                .filter(|item| self.searcher.matches(*item, &query))
                .cloned()
                .collect()
        };
        self.model.replace_items(filtered);
    }
}
