//! In-process repository guarded by a single `RwLock`.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::{Record, RecordId, Repository};
use crate::error::StoreError;

#[derive(Debug)]
struct Inner<T> {
    records: HashMap<RecordId, T>,
    order: Vec<RecordId>,
}

impl<T: Record> Inner<T> {
    fn key_taken(&self, key: &str, except: Option<RecordId>) -> bool {
        self.records
            .values()
            .any(|r| Some(r.id()) != except && r.unique_key() == Some(key))
    }

    fn next_id(&self) -> RecordId {
        self.order.iter().copied().max().unwrap_or(0) + 1
    }

    fn push(&mut self, record: T) -> Result<(), StoreError> {
        let id = record.id();
        if self.records.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        if let Some(key) = record.unique_key() {
            if self.key_taken(key, None) {
                return Err(StoreError::DuplicateKey(key.to_string()));
            }
        }
        self.order.push(id);
        self.records.insert(id, record);
        Ok(())
    }
}

/// Thread-safe in-memory collection.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    /// Create a repository holding `records` in the given order.
    ///
    /// Fails if two records share an id or a unique key.
    pub fn seeded(records: impl IntoIterator<Item = T>) -> Result<Self, StoreError> {
        let mut inner = Inner {
            records: HashMap::new(),
            order: Vec::new(),
        };
        for record in records {
            inner.push(record)?;
        }
        debug!(collection = %T::COLLECTION, count = inner.order.len(), "Seeded collection");
        Ok(Self {
            inner: RwLock::new(inner),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner<T>>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner<T>>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn list(&self) -> Result<Vec<T>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id).cloned())
            .collect())
    }

    fn get_by_id(&self, id: RecordId) -> Result<Option<T>, StoreError> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    fn find(&self, predicate: &dyn Fn(&T) -> bool) -> Result<Option<T>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id))
            .find(|&r| predicate(r))
            .cloned())
    }

    fn insert(&self, record: T) -> Result<T, StoreError> {
        let mut inner = self.write()?;
        let record = record.with_id(inner.next_id());
        inner.push(record.clone())?;
        debug!(collection = %T::COLLECTION, id = record.id(), "Inserted record");
        Ok(record)
    }

    fn update_by_id(&self, id: RecordId, record: T) -> Result<T, StoreError> {
        let mut inner = self.write()?;
        if !inner.records.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        let record = record.with_id(id);
        if let Some(key) = record.unique_key() {
            if inner.key_taken(key, Some(id)) {
                return Err(StoreError::DuplicateKey(key.to_string()));
            }
        }
        inner.records.insert(id, record.clone());
        debug!(collection = %T::COLLECTION, id, "Updated record");
        Ok(record)
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.order.len())
    }
}
