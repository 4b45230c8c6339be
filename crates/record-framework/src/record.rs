//! # Record Trait
//!
//! The `Record` trait is the contract a domain type implements to be kept in a
//! [`RecordStore`](crate::RecordStore). It names the identifier type and the partial-update
//! shape, and provides the two hooks the store needs to keep keys and values consistent.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored entity must implement to be managed by `RecordStore`.
///
/// # Identifiers
/// Ids are assigned by the store from a monotonically increasing `u64` counter, so
/// `Id` must be constructible from `u64`. The store calls [`Record::assign_id`] on create
/// and on full replacement, which is the only way a record's id ever changes.
///
/// # Partial Updates
/// `Patch` is a statically typed set of optional fields. [`Record::apply_patch`] merges the
/// fields that are present and must leave the id untouched.
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this record (e.g. a `u64` newtype).
    type Id: Copy + Eq + Hash + Send + Sync + Display + Debug + From<u64> + 'static;

    /// The optional-field set accepted by `patch`.
    type Patch: Send + Sync + Debug;

    /// Returns the id currently stored on the value.
    fn id(&self) -> Self::Id;

    /// Overwrites the id. Called by the store only.
    fn assign_id(&mut self, id: Self::Id);

    /// Merges the present fields of `patch` into `self`.
    fn apply_patch(&mut self, patch: Self::Patch);
}
