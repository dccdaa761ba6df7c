//! Collection store.
//!
//! Each collection is reached through the [`Repository`] trait. The only
//! implementation is [`InMemoryRepository`], an id-indexed map plus an ordered
//! id sequence so listing keeps insertion order.

pub mod memory;

use strum::{Display, EnumString};

use crate::error::StoreError;

pub use memory::InMemoryRepository;

/// Record identifier.
pub type RecordId = i64;

/// Named collections held by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    /// Student roster.
    Students,
    /// Registered users.
    Users,
}

/// A storable record.
pub trait Record: Clone + Send + Sync + 'static {
    /// Collection this record type lives in.
    const COLLECTION: Collection;

    /// Record id.
    fn id(&self) -> RecordId;

    /// Same record with a different id.
    fn with_id(self, id: RecordId) -> Self;

    /// Secondary key that must be unique across the collection, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

/// Storage operations over one collection.
pub trait Repository<T: Record>: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Record with the given id.
    fn get_by_id(&self, id: RecordId) -> Result<Option<T>, StoreError>;

    /// First record (in insertion order) matching the predicate.
    fn find(&self, predicate: &dyn Fn(&T) -> bool) -> Result<Option<T>, StoreError>;

    /// Store a record under the next free id and return it.
    ///
    /// The id carried by `record` is ignored.
    fn insert(&self, record: T) -> Result<T, StoreError>;

    /// Replace the record stored under `id`, keeping its position.
    fn update_by_id(&self, id: RecordId, record: T) -> Result<T, StoreError>;

    /// Number of stored records.
    fn len(&self) -> Result<usize, StoreError>;

    /// Whether the collection is empty.
    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
