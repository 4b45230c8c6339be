//! # Record Framework
//!
//! This crate provides the building blocks for a concurrent, in-process record store
//! with a uniform **Resource-Oriented** API: List, Get, Create, Update, Patch and Delete
//! over a single entity type.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Record Layer** ([`Record`]) - Your domain type, its identifier and its partial-update shape
//! 2. **Storage Layer** ([`RecordStore`]) - Identifier assignment and reader/writer exclusion
//! 3. **Interface Layer** ([`Repository`]) - The async seam adapters are written against
//!
//! You describe the record **once** through the trait, and the store handles locking,
//! id assignment and error reporting.
//!
//! ## Quick Example
//!
//! ```rust
//! use record_framework::{Record, RecordStore, StoreError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Note { id: u64, text: String }
//!
//! #[derive(Debug, Default)]
//! struct NotePatch { text: Option<String> }
//!
//! impl Record for Note {
//!     type Id = u64;
//!     type Patch = NotePatch;
//!
//!     fn id(&self) -> u64 { self.id }
//!     fn assign_id(&mut self, id: u64) { self.id = id; }
//!     fn apply_patch(&mut self, patch: NotePatch) {
//!         if let Some(text) = patch.text { self.text = text; }
//!     }
//! }
//!
//! let store = RecordStore::<Note>::new();
//! let note = store.create(Note { id: 0, text: "hello".into() });
//! assert_eq!(note.id, 1);
//! assert_eq!(store.get(1).unwrap(), note);
//!
//! store.delete(1).unwrap();
//! assert!(matches!(store.get(1), Err(StoreError::NotFound(_))));
//! ```
//!
//! ## Concurrency Model
//!
//! - A single [`parking_lot::RwLock`] guards the record map together with the id counter
//! - `list` and `get` take the shared lock, so readers run in parallel
//! - `create`, `update`, `patch` and `delete` take the exclusive lock and are fully serialized
//! - Guards are scoped to the map operation; nothing awaits or performs I/O while holding one
//!
//! ## Testing
//!
//! [`mock::MockRepository`] implements [`Repository`] from a queue of expectations, which makes
//! it easy to inject backend failures into adapter code. See the [`mock`] module.

pub mod error;
pub mod mock;
pub mod record;
pub mod repository;
pub mod store;
pub mod tracing;

// Re-export core types for convenience
pub use error::StoreError;
pub use record::Record;
pub use repository::Repository;
pub use store::RecordStore;
