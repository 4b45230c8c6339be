use crate::config::ServiceConfig;
use crate::http::{self, UserRepo};
use crate::users;
use anyhow::Context;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::{info, warn};

/// A bound, not yet running, HTTP service.
pub struct UserService {
    listener: TcpListener,
    repo: UserRepo,
    shutdown_timeout: Duration,
}

impl UserService {
    /// Binds the configured address and creates an empty in-memory store.
    pub async fn bind(config: &ServiceConfig) -> anyhow::Result<Self> {
        Self::bind_with(config, users::new()).await
    }

    /// Binds the configured address and serves `repo` instead of a fresh store.
    pub async fn bind_with(config: &ServiceConfig, repo: UserRepo) -> anyhow::Result<Self> {
        let addr = config.bind_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        Ok(Self {
            listener,
            repo,
            shutdown_timeout: config.shutdown_timeout(),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until SIGINT or SIGTERM.
    pub async fn serve(self) -> anyhow::Result<()> {
        self.serve_until(super::shutdown_signal()).await
    }

    /// Serves until `signal` resolves, then drains in-flight requests for at most the
    /// configured shutdown timeout.
    pub async fn serve_until<F>(self, signal: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.local_addr()?;
        let repo = self.repo.clone();
        let app = http::router(self.repo);
        let draining = Arc::new(Notify::new());
        let trigger = draining.clone();

        info!(%addr, "HTTP server listening");
        let server = axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                signal.await;
                trigger.notify_one();
            })
            .into_future();
        tokio::pin!(server);

        tokio::select! {
            result = &mut server => result.context("HTTP server failed")?,
            _ = draining.notified() => {
                info!(timeout = ?self.shutdown_timeout, "Shutting down, draining connections");
                match tokio::time::timeout(self.shutdown_timeout, &mut server).await {
                    Ok(result) => result.context("HTTP server failed")?,
                    Err(_) => warn!("Shutdown timeout elapsed, abandoning open connections"),
                }
            }
        }

        match repo.list().await {
            Ok(users) => info!(%addr, size = users.len(), "HTTP server stopped"),
            Err(e) => warn!(%addr, error = %e, "HTTP server stopped, store unreadable"),
        }
        Ok(())
    }
}
