//! Request tracing middleware.

use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// TraceMiddleware emits a span per request and logs every response.
pub struct TraceMiddleware;

impl TraceMiddleware {
    /// Creates a new tracing middleware.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TraceMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::middleware::middleware::Middleware for TraceMiddleware {
    fn apply(&self, router: Router) -> Router {
        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
    }
}
