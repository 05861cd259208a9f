//! Insertion-ordered record collection with id lookup.

use crate::model::record::{Record, RecordId};
use std::collections::HashMap;

/// Ordered list of records plus an id → position index.
///
/// Duplicates are allowed. When several records share an id, lookups resolve
/// to the earliest one.
#[derive(Debug, Clone)]
pub struct RecordLog<T> {
    items: Vec<T>,
    index: HashMap<RecordId, usize>,
}

impl<T> Default for RecordLog<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Record> RecordLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<T>) -> Self {
        let mut log = Self {
            items: records,
            index: HashMap::new(),
        };
        log.rebuild_index();
        log
    }

    /// Appends one record at the end.
    pub fn push(&mut self, record: T) {
        let position = self.items.len();
        self.index.entry(record.id()).or_insert(position);
        self.items.push(record);
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.index.get(&id).map(|position| &self.items[*position])
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut T> {
        let position = *self.index.get(&id)?;
        self.items.get_mut(position)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.index.contains_key(&id)
    }

    /// Removes every record carrying `id`. Returns how many were removed.
    pub fn remove_all(&mut self, id: RecordId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        let before = self.items.len();
        self.items.retain(|record| record.id() != id);
        self.rebuild_index();
        before - self.items.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, record) in self.items.iter().enumerate() {
            self.index.entry(record.id()).or_insert(position);
        }
    }
}
