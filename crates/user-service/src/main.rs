//! # User Service
//!
//! Serves Create/Read/Update/Patch/Delete over `/users`, backed by an in-memory store.
//!
//! ```bash
//! # Listen on :8080, info logs
//! cargo run -p user-service
//!
//! # Another port, debug logs
//! PORT=9000 RUST_LOG=debug cargo run -p user-service
//! ```

use clap::Parser;
use record_framework::tracing::setup_tracing;
use tracing::info;
use user_service::config::ServiceConfig;
use user_service::lifecycle::UserService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ServiceConfig::parse();
    info!(?config, "Starting user service");

    let service = UserService::bind(&config).await?;
    service.serve().await?;

    info!("Shutdown complete");
    Ok(())
}
