// Main activities application implementation.

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db;
use crate::liveness;

use super::server::{Http, HttpServer};

/// Encapsulates the entire application state.
pub struct App {
    shutdown_token: CancellationToken,
    storage: Arc<dyn db::Storage>,
    probe: Arc<liveness::Probe>,
    server: Arc<HttpServer>,
}

impl App {
    /// Creates a new application instance: seeds the activity directory and
    /// mounts the HTTP API on top of it.
    pub async fn new(
        shutdown_token: CancellationToken,
        cfg: Config,
        probe: Arc<liveness::Probe>,
    ) -> Result<Self> {
        let storage = db::DB::new(&cfg)? as Arc<dyn db::Storage>;
        let server = Arc::new(HttpServer::new(
            shutdown_token.clone(),
            cfg,
            storage.clone(),
            probe.clone(),
        )?);

        Ok(Self {
            shutdown_token,
            storage,
            probe,
            server,
        })
    }

    /// Serves the HTTP API, handles graceful shutdown.
    pub async fn serve(&self, gsh: Arc<crate::shutdown::GracefulShutdown>) -> Result<()> {
        // Register liveness target before serving.
        self.probe
            .watch(vec![Arc::new(self.clone()) as Arc<dyn liveness::Service>]);

        let server = self.server.clone();
        let app_for_close = self.clone();

        tokio::task::spawn(async move {
            // Start server
            if let Err(e) = server.listen_and_serve().await {
                error!(
                    component = "app",
                    scope = "server",
                    event = "serve_failed",
                    error = %e,
                    "server failed to serve"
                );
            }

            if let Err(e) = app_for_close.close().await {
                error!(
                    component = "app",
                    scope = "shutdown",
                    event = "close_failed",
                    error = %e,
                    "application close failed"
                );
            }

            // Signal graceful shutdown
            gsh.done();
        });

        info!(component = "app", event = "started", "application lifecycle");

        Ok(())
    }

    /// Storage backing the API.
    pub fn storage(&self) -> Arc<dyn db::Storage> {
        self.storage.clone()
    }

    /// Assembled router, for serving in-process.
    pub fn router(&self) -> Router {
        self.server.router()
    }

    /// Address the HTTP server is bound to, once listening.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.local_addr()
    }

    /// Checks whether the HTTP server is still alive.
    pub fn is_alive(&self) -> bool {
        if !self.server.is_alive() {
            warn!(
                component = "app",
                scope = "http_server",
                event = "gone_away",
                "http server has gone away"
            );
            return false;
        }
        true
    }

    /// Closes application resources.
    pub async fn close(&self) -> Result<()> {
        if let Err(e) = self.storage.close().await {
            error!(
                component = "app",
                scope = "storage",
                event = "close_failed",
                error = %e,
                "error closing storage"
            );
        }

        self.shutdown_token.cancel();

        info!(component = "app", event = "stopped", "application lifecycle");

        Ok(())
    }
}

impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            shutdown_token: self.shutdown_token.clone(),
            storage: self.storage.clone(),
            probe: self.probe.clone(),
            server: self.server.clone(),
        }
    }
}

/// App implements liveness::Service for the probe endpoint.
impl liveness::Service for App {
    fn is_alive(&self) -> bool {
        App::is_alive(self)
    }
}
