//! # Repository Trait
//!
//! The async seam between a transport adapter and whatever keeps the records. Adapters hold an
//! `Arc<dyn Repository<T>>`, so the in-memory [`RecordStore`] and a database-backed
//! implementation are interchangeable.

use crate::error::StoreError;
use crate::record::Record;
use crate::store::RecordStore;
use async_trait::async_trait;

/// CRUD + Patch operations over records of type `T`.
///
/// Implementations report a missing id as [`StoreError::NotFound`] and every other failure
/// as [`StoreError::Backend`].
///
/// # Example
///
/// ```rust
/// use record_framework::{Record, RecordStore, Repository};
/// use std::sync::Arc;
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: u64, name: String }
///
/// impl Record for Tag {
///     type Id = u64;
///     type Patch = ();
///     fn id(&self) -> u64 { self.id }
///     fn assign_id(&mut self, id: u64) { self.id = id; }
///     fn apply_patch(&mut self, _: ()) {}
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let repo: Arc<dyn Repository<Tag>> = Arc::new(RecordStore::<Tag>::new());
///     let tag = repo.create(Tag { id: 0, name: "rust".into() }).await.unwrap();
///     assert_eq!(repo.get(tag.id).await.unwrap().name, "rust");
/// }
/// ```
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    async fn get(&self, id: T::Id) -> Result<T, StoreError>;

    /// Stores `candidate` under a freshly assigned id.
    async fn create(&self, candidate: T) -> Result<T, StoreError>;

    /// Full replacement of an existing record. Never inserts.
    async fn update(&self, id: T::Id, replacement: T) -> Result<T, StoreError>;

    /// Partial merge into an existing record.
    async fn patch(&self, id: T::Id, patch: T::Patch) -> Result<T, StoreError>;

    async fn delete(&self, id: T::Id) -> Result<(), StoreError>;
}

// Store calls never await, so no lock is held across a suspension point.
#[async_trait]
impl<T: Record> Repository<T> for RecordStore<T> {
    async fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(RecordStore::list(self))
    }

    async fn get(&self, id: T::Id) -> Result<T, StoreError> {
        RecordStore::get(self, id)
    }

    async fn create(&self, candidate: T) -> Result<T, StoreError> {
        Ok(RecordStore::create(self, candidate))
    }

    async fn update(&self, id: T::Id, replacement: T) -> Result<T, StoreError> {
        RecordStore::update(self, id, replacement)
    }

    async fn patch(&self, id: T::Id, patch: T::Patch) -> Result<T, StoreError> {
        RecordStore::patch(self, id, patch)
    }

    async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        RecordStore::delete(self, id)
    }
}
