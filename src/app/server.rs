// HTTP server wiring for the activities application.

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, ConfigTrait};
use crate::db::Storage;
use crate::http::{Controller, Middleware, Server as HttpServerTrait};
use crate::liveness;

/// Operations the application needs from its HTTP server.
#[async_trait::async_trait]
pub trait Http: Send + Sync {
    async fn listen_and_serve(&self) -> Result<()>;
    fn is_alive(&self) -> bool;
    fn local_addr(&self) -> Option<SocketAddr>;
}

/// HTTP server implementation that wraps all dependencies.
pub struct HttpServer {
    server: Arc<crate::http::HttpServer>,
    is_server_alive: Arc<AtomicBool>,
}

impl HttpServer {
    /// Creates a new HttpServer with every controller and middleware mounted.
    pub fn new(
        ctx: CancellationToken,
        cfg: Config,
        db: Arc<dyn Storage>,
        probe: Arc<liveness::Probe>,
    ) -> Result<Self> {
        let controllers = Self::controllers(&cfg, db, probe);
        let middlewares = Self::middlewares();

        // Compose server with controllers and middlewares.
        let server = crate::http::HttpServer::new(ctx, cfg, controllers, middlewares)?;

        Ok(Self {
            server,
            is_server_alive: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns the assembled router.
    pub fn router(&self) -> Router {
        self.server.router()
    }

    /// Returns all HTTP controllers for the server.
    fn controllers(
        cfg: &Config,
        db: Arc<dyn Storage>,
        probe: Arc<liveness::Probe>,
    ) -> Vec<Box<dyn Controller>> {
        use crate::controller;

        vec![
            // Healthcheck probe endpoint
            Box::new(controller::LivenessProbeController::new(probe)),
            // Lists activities and single activity records
            Box::new(controller::ActivitiesController::new(db.clone())),
            // Enrolls participants
            Box::new(controller::SignupController::new(db.clone())),
            // Withdraws participants (DELETE and POST bindings)
            Box::new(controller::UnregisterController::new(db)),
            // Root redirect and static front-end
            Box::new(controller::RootController::new(cfg.static_dir())),
        ]
    }

    /// Returns the request middlewares for the server, executed in reverse order.
    fn middlewares() -> Vec<Box<dyn Middleware>> {
        vec![
            // Exec first - request tracing
            Box::new(crate::middleware::trace_middleware::TraceMiddleware::new()),
            // Exec second - panic recovery
            Box::new(crate::middleware::recover_middleware::PanicRecoverMiddleware::new()),
        ]
    }
}

#[async_trait::async_trait]
impl Http for HttpServer {
    /// Starts the HTTP server (blocking call).
    async fn listen_and_serve(&self) -> Result<()> {
        self.is_server_alive.store(true, Ordering::Relaxed);

        let result = HttpServerTrait::listen_and_serve(self.server.as_ref()).await;

        self.is_server_alive.store(false, Ordering::Relaxed);
        result
    }

    /// Returns true if the server is marked as alive.
    fn is_alive(&self) -> bool {
        self.is_server_alive.load(Ordering::Relaxed)
    }

    fn local_addr(&self) -> Option<SocketAddr> {
        HttpServerTrait::local_addr(self.server.as_ref())
    }
}
