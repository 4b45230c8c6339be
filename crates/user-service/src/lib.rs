//! # User Service Library
//!
//! A small HTTP service that keeps User records in a concurrent in-memory store.
//!
//! ## Module Tour
//!
//! - **[model]**: Pure data structures ([`User`](model::User), [`UserPatch`](model::UserPatch)).
//! - **[users]**: The [`Record`](record_framework::Record) implementation, the store factory and
//!   [`UserError`](users::UserError).
//! - **[http]**: The axum router and handlers for `/users`.
//! - **[config]**: Flags and environment variables.
//! - **[lifecycle]**: Binding, serving and graceful shutdown.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod users;
