use std::future::{Future, IntoFuture};

use tokio::net::TcpListener;
use tracing::info;

use super::router;
use crate::config::ServerConfig;
use crate::error::{Error, Result};

/// HTTP server for the walk feed
pub struct WalkServer {
    config: ServerConfig,
}

impl WalkServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;

        Self::serve(listener, shutdown).await
    }

    /// Serve on an already bound listener.
    ///
    /// Open streams never finish on their own, so shutdown drops them
    /// instead of waiting for them to drain.
    pub async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let local_addr = listener.local_addr()?;
        info!("Listening on port: {}", local_addr.port());

        tokio::select! {
            result = axum::serve(listener, router::build_router()).into_future() => result?,
            _ = shutdown => info!("HTTP server shutting down"),
        }

        Ok(())
    }
}
