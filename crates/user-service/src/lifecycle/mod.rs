//! # Service Lifecycle
//!
//! This module owns the runtime lifecycle of the HTTP service: building the store,
//! binding the listener, serving requests and shutting down cleanly.
//!
//! ## Startup
//!
//! [`UserService::bind`] constructs the in-memory store once and hands it to the router as
//! shared state. There is no process-wide singleton; tests can build as many services as
//! they like, each with its own store, or inject a different repository through
//! [`UserService::bind_with`].
//!
//! ## Graceful Shutdown
//!
//! 1. **Signal** - SIGINT (Ctrl+C) or SIGTERM, see [`shutdown_signal`]
//! 2. **Stop accepting** - the listener is closed
//! 3. **Drain** - in-flight requests get the configured grace period
//! 4. **Exit** - if the grace period runs out, remaining connections are abandoned
//!
//! Store contents are not persisted; everything is lost on exit.

pub mod service;
pub mod signal;

pub use service::*;
pub use signal::*;
