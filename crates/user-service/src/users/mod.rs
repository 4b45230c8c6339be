//! # User Records
//!
//! This module wires the [`User`] type into the record framework.
//!
//! ## Structure
//!
//! - [`entity`] - [`Record`](record_framework::Record) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the shared in-memory store
//!
//! ## Usage
//!
//! ```rust
//! use user_service::model::{User, UserPatch};
//! use user_service::users;
//!
//! let store = users::new();
//! let alice = store.create(User::new("alice", "alice@example.com", "555-0100"));
//!
//! let patch = UserPatch { email: Some("a@example.com".into()), ..Default::default() };
//! let patched = store.patch(alice.id, patch).unwrap();
//! assert_eq!(patched.username, "alice");
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::User;
use record_framework::RecordStore;
use std::sync::Arc;

/// Creates an empty, shareable User store. The first user gets id `1`.
pub fn new() -> Arc<RecordStore<User>> {
    Arc::new(RecordStore::new())
}
