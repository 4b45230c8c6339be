//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## What Gets Traced
//!
//! - **Store Operations**: `Created`, `Updated`, `Patched`, `Deleted` at `info` with the record
//!   id and the store size
//! - **Reads**: `List` and `Get` at `debug`
//! - **Misses**: every `NotFound` at `warn` with the requested id
//! - **Requests**: adapters add spans around each request (`get_user{id=3}: Get ...`)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Default: info
//! cargo run -p user-service
//!
//! # Show reads and patch payloads
//! RUST_LOG=debug cargo run -p user-service
//!
//! # Only the store
//! RUST_LOG=record_framework=debug cargo run -p user-service
//! ```
//!
//! ## Output Format
//!
//! The compact format hides module paths (`with_target(false)`), relying on the
//! `entity_type` field instead, and renders spans inline:
//!
//! ```text
//! INFO create_user: Created entity_type="User" id=1 size=1
//! WARN get_user{id=7}: Not found entity_type="User" id=7
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Falls back to `info` when `RUST_LOG` is unset.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
