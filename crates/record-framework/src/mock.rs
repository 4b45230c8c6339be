//! # Mock Repository & Testing Guide
//!
//! `MockRepository<T>` implements [`Repository<T>`] from a queue of expectations. It lets adapter
//! tests script exact responses, including failures that the in-memory store can never produce
//! (a dropped database connection, a timed-out query).
//!
//! ## When to use the Mock vs the Real Store
//!
//! | Feature | MockRepository | RecordStore |
//! |---------|----------------|-------------|
//! | **State** | None (scripted responses) | Real map + id counter |
//! | **Error Injection** | Easy (`return_err`) | Only `NotFound` |
//! | **Call Checking** | Order and ids are asserted | None |
//! | **Use Case** | Error mapping in adapters | Behaviour of the store itself |
//!
//! ## Example
//!
//! ```rust
//! use record_framework::mock::MockRepository;
//! use record_framework::{Record, Repository, StoreError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Tag { id: u64, name: String }
//!
//! impl Record for Tag {
//!     type Id = u64;
//!     type Patch = ();
//!     fn id(&self) -> u64 { self.id }
//!     fn assign_id(&mut self, id: u64) { self.id = id; }
//!     fn apply_patch(&mut self, _: ()) {}
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockRepository::<Tag>::new();
//!     mock.expect_get(1).return_ok(Tag { id: 1, name: "rust".into() });
//!     mock.expect_delete(2).return_err(StoreError::backend("connection reset"));
//!
//!     assert_eq!(mock.get(1).await.unwrap().name, "rust");
//!     assert!(matches!(mock.delete(2).await, Err(StoreError::Backend(_))));
//!
//!     mock.verify(); // Ensures all expectations were met
//! }
//! ```
//!
//! A call that does not match the next queued expectation panics, which fails the test.

use crate::error::StoreError;
use crate::record::Record;
use crate::repository::Repository;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Represents an expected call on the mock repository.
enum Expectation<T: Record> {
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Get {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Create {
        response: Result<T, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Patch {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
}

impl<T: Record> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::List { .. } => "list",
            Expectation::Get { .. } => "get",
            Expectation::Create { .. } => "create",
            Expectation::Update { .. } => "update",
            Expectation::Patch { .. } => "patch",
            Expectation::Delete { .. } => "delete",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A repository with expectation tracking for fluent testing.
pub struct MockRepository<T: Record> {
    expectations: Queue<T>,
}

impl<T: Record> Default for MockRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockRepository<T> {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn expect_list(&self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_get(&self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_patch(&self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Patch { id, response })
    }

    pub fn expect_delete(&self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            make: Box::new(make),
        }
    }

    fn next(&self, call: &str) -> Expectation<T> {
        match self.expectations.lock().pop_front() {
            Some(expectation) => expectation,
            None => panic!("Unexpected {} call: no expectations left", call),
        }
    }
}

fn check_id<I: PartialEq + std::fmt::Debug>(call: &str, expected: I, actual: I) {
    assert_eq!(expected, actual, "{} called with an unexpected id", call);
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: Record, R> {
    expectations: Queue<T>,
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: Record, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().push_back(expectation);
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MockRepository<T> {
    async fn list(&self) -> Result<Vec<T>, StoreError> {
        match self.next("list") {
            Expectation::List { response } => response,
            other => panic!("Expected {} call, got list", other.name()),
        }
    }

    async fn get(&self, id: T::Id) -> Result<T, StoreError> {
        match self.next("get") {
            Expectation::Get {
                id: expected,
                response,
            } => {
                check_id("get", expected, id);
                response
            }
            other => panic!("Expected {} call, got get", other.name()),
        }
    }

    async fn create(&self, _candidate: T) -> Result<T, StoreError> {
        match self.next("create") {
            Expectation::Create { response } => response,
            other => panic!("Expected {} call, got create", other.name()),
        }
    }

    async fn update(&self, id: T::Id, _replacement: T) -> Result<T, StoreError> {
        match self.next("update") {
            Expectation::Update {
                id: expected,
                response,
            } => {
                check_id("update", expected, id);
                response
            }
            other => panic!("Expected {} call, got update", other.name()),
        }
    }

    async fn patch(&self, id: T::Id, _patch: T::Patch) -> Result<T, StoreError> {
        match self.next("patch") {
            Expectation::Patch {
                id: expected,
                response,
            } => {
                check_id("patch", expected, id);
                response
            }
            other => panic!("Expected {} call, got patch", other.name()),
        }
    }

    async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        match self.next("delete") {
            Expectation::Delete {
                id: expected,
                response,
            } => {
                check_id("delete", expected, id);
                response
            }
            other => panic!("Expected {} call, got delete", other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Tag {
        id: u64,
        name: String,
    }

    impl Record for Tag {
        type Id = u64;
        type Patch = ();

        fn id(&self) -> u64 {
            self.id
        }

        fn assign_id(&mut self, id: u64) {
            self.id = id;
        }

        fn apply_patch(&mut self, _patch: ()) {}
    }

    fn tag(id: u64) -> Tag {
        Tag {
            id,
            name: "rust".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_repository_with_expectations() {
        let mock = MockRepository::<Tag>::new();
        mock.expect_create().return_ok(tag(1));
        mock.expect_list().return_ok(vec![tag(1)]);
        mock.expect_patch(1).return_err(StoreError::NotFound("1".to_string()));

        let created = mock.create(tag(0)).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(mock.list().await.unwrap().len(), 1);
        assert!(mock.patch(1, ()).await.unwrap_err().is_not_found());

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "unexpected id")]
    async fn test_mock_repository_rejects_wrong_id() {
        let mock = MockRepository::<Tag>::new();
        mock.expect_get(1).return_ok(tag(1));
        let _ = mock.get(2).await;
    }

    #[test]
    #[should_panic(expected = "1 remaining")]
    fn test_verify_reports_unmet_expectations() {
        let mock = MockRepository::<Tag>::new();
        mock.expect_delete(3).return_ok(());
        mock.verify();
    }
}
