//! In-memory record collections.
//!
//! # Collections
//!
//! - users - customer accounts (CRUD, status toggle)
//! - journeys - plan progress (read-only)
//! - tickets - support desk (CRUD, replies)
//! - content - learning-centre items (CRUD, visibility toggle)
//!
//! Collections start from the demo data in [`seed`] and live for the
//! lifetime of the process. Newly created records are placed first.

pub mod seed;

use thiserror::Error;

use crate::clock::Clock;
use crate::components::Record;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// Requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A record with the same id already exists.
    #[error("conflict: id {0} already exists")]
    Conflict(String),

    /// An update tried to change a record's id.
    #[error("id {0} is immutable")]
    ImmutableId(String),
}

/// Ordered collection of records with unique ids.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record + Clone> RecordStore<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing records, in order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if two records share an id.
    pub fn with_records(records: Vec<T>) -> Result<Self, RepositoryError> {
        let mut store = Self::new();
        for record in records {
            if store.contains(record.id()) {
                return Err(RepositoryError::Conflict(record.id().to_string()));
            }
            store.records.push(record);
        }
        Ok(store)
    }

    /// All records, newest first.
    #[must_use]
    pub fn list(&self) -> &[T] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Whether a record with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Insert a new record at the front.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id is taken.
    pub fn insert(&mut self, record: T) -> Result<&T, RepositoryError> {
        if self.contains(record.id()) {
            return Err(RepositoryError::Conflict(record.id().to_string()));
        }
        self.records.insert(0, record);
        self.records
            .first()
            .ok_or_else(|| RepositoryError::NotFound(String::new()))
    }

    /// Modify a record in place.
    ///
    /// The closure's return value is passed through, so callers can surface
    /// validation failures from inside the update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has `id`, or
    /// `RepositoryError::ImmutableId` if the closure changed the id (the
    /// record is restored in that case).
    pub fn update<R>(&mut self, id: &T::Id, f: impl FnOnce(&mut T) -> R) -> Result<R, RepositoryError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        let before = record.clone();
        let result = f(record);
        if record.id() != id {
            *record = before;
            return Err(RepositoryError::ImmutableId(id.to_string()));
        }
        Ok(result)
    }

    /// Remove a record, returning it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has `id`.
    pub fn remove(&mut self, id: &T::Id) -> Result<T, RepositoryError> {
        let position = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        Ok(self.records.remove(position))
    }

    /// Allocate an unused id from the current time in milliseconds.
    ///
    /// If the timestamp is taken, the next millisecond is tried.
    #[must_use]
    pub fn next_id(&self, clock: &dyn Clock) -> T::Id {
        let mut millis = clock.now().timestamp_millis();
        loop {
            let id = T::Id::from(millis.to_string());
            if !self.contains(&id) {
                return id;
            }
            millis += 1;
        }
    }
}
