//! Panic recovery middleware.
//

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

/// Global panic counter.
static PANICS_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Gets the current panic counter value.
pub fn panics_counter() -> u64 {
    PANICS_COUNTER.load(Ordering::Relaxed)
}

/// Increments the panic counter.
/// Should be called when a panic is caught.
pub fn inc_panics() {
    PANICS_COUNTER.fetch_add(1, Ordering::Relaxed);
}

/// Turns a caught handler panic into a 500 with the usual error body.
fn recover(err: Box<dyn Any + Send + 'static>) -> Response {
    inc_panics();

    let reason = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    error!(
        component = "recover-middleware",
        event = "panic_recovered",
        reason = reason,
        panics = panics_counter(),
        "handler panicked"
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [("content-type", "application/json")],
        r#"{"detail":"Internal Server Error"}"#,
    )
        .into_response()
}

/// PanicRecoverMiddleware recovers from panics in HTTP handlers.
pub struct PanicRecoverMiddleware;

impl PanicRecoverMiddleware {
    /// Creates a new panic recovery middleware.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PanicRecoverMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

// Implementation of Middleware trait
impl crate::middleware::middleware::Middleware for PanicRecoverMiddleware {
    fn apply(&self, router: Router) -> Router {
        router.layer(CatchPanicLayer::custom(recover))
    }
}
