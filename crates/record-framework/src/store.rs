//! # Concurrent Record Store
//!
//! This module defines the `RecordStore`, an in-process map from id to record guarded by a
//! single reader/writer lock, with monotonically increasing id assignment.

use crate::error::StoreError;
use crate::record::Record;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// The generic store that manages a collection of records.
///
/// # Architecture Note
/// The map and the `next_id` counter live in one struct behind one `RwLock`, so an id is
/// allocated and its record inserted in the same critical section. Two concurrent creates
/// can never observe the same counter value.
///
/// ## Operations
///
/// * **List**: shared lock, clones every value. No ordering guarantee.
/// * **Get**: shared lock, clones the value for `id` or returns `NotFound`.
/// * **Create**:
///     1. Takes the exclusive lock.
///     2. Converts `next_id` to `T::Id` and increments the counter.
///     3. Overwrites the candidate's id and inserts it.
///     4. Returns the stored value.
/// * **Update**: exclusive lock; replaces the value at `id`, forcing its id to `id`.
///   No upsert.
/// * **Patch**: exclusive lock; merges the patch into the existing value.
/// * **Delete**: exclusive lock; removes the value. The id is never handed out again.
///
/// Every operation either applies completely or leaves the map untouched.
pub struct RecordStore<T: Record> {
    state: RwLock<StoreState<T>>,
}

struct StoreState<T: Record> {
    records: HashMap<T::Id, T>,
    next_id: u64,
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordStore<T> {
    /// Creates an empty store whose first assigned id is `1`.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                records: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Returns a snapshot of all current records.
    pub fn list(&self) -> Vec<T> {
        let records: Vec<T> = self.state.read().records.values().cloned().collect();
        debug!(entity_type = entity_type::<T>(), count = records.len(), "List");
        records
    }

    pub fn get(&self, id: T::Id) -> Result<T, StoreError> {
        let record = self.state.read().records.get(&id).cloned();
        debug!(entity_type = entity_type::<T>(), %id, found = record.is_some(), "Get");
        record.ok_or_else(|| not_found::<T>(id))
    }

    /// Assigns the next id to `candidate`, stores it and returns the stored value.
    ///
    /// Whatever id the candidate carried is discarded.
    pub fn create(&self, mut candidate: T) -> T {
        let size = {
            let mut state = self.state.write();
            let id = T::Id::from(state.next_id);
            state.next_id += 1;
            candidate.assign_id(id);
            state.records.insert(id, candidate.clone());
            state.records.len()
        };
        info!(entity_type = entity_type::<T>(), id = %candidate.id(), size, "Created");
        candidate
    }

    /// Replaces the record at `id`. The replacement's own id is overwritten with `id`.
    pub fn update(&self, id: T::Id, mut replacement: T) -> Result<T, StoreError> {
        replacement.assign_id(id);
        let replaced = {
            let mut state = self.state.write();
            match state.records.get_mut(&id) {
                Some(slot) => {
                    *slot = replacement.clone();
                    true
                }
                None => false,
            }
        };
        if !replaced {
            return Err(not_found::<T>(id));
        }
        info!(entity_type = entity_type::<T>(), %id, "Updated");
        Ok(replacement)
    }

    /// Merges `patch` into the record at `id` and returns the result.
    pub fn patch(&self, id: T::Id, patch: T::Patch) -> Result<T, StoreError> {
        debug!(entity_type = entity_type::<T>(), %id, ?patch, "Patch");
        let patched = {
            let mut state = self.state.write();
            state.records.get_mut(&id).map(|slot| {
                slot.apply_patch(patch);
                debug_assert!(slot.id() == id, "apply_patch must not change the id");
                slot.clone()
            })
        };
        let patched = patched.ok_or_else(|| not_found::<T>(id))?;
        info!(entity_type = entity_type::<T>(), %id, "Patched");
        Ok(patched)
    }

    pub fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        let size = {
            let mut state = self.state.write();
            state.records.remove(&id).map(|_| state.records.len())
        };
        let size = size.ok_or_else(|| not_found::<T>(id))?;
        info!(entity_type = entity_type::<T>(), %id, size, "Deleted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn not_found<T: Record>(id: T::Id) -> StoreError {
    warn!(entity_type = entity_type::<T>(), %id, "Not found");
    StoreError::NotFound(id.to_string())
}

// "User" instead of "user_service::model::user::User"
fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
