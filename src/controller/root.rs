//! Front-end controller: root redirect and static assets.

use axum::{response::Redirect, routing::get, Router};
use tower_http::services::ServeDir;

use crate::http::Controller;

/// Path the root URL redirects to.
pub const INDEX_PATH: &str = "/static/index.html";

/// Mount point of the static front-end.
pub const STATIC_PREFIX: &str = "/static";

/// RootController redirects `/` to the front-end and serves its files.
pub struct RootController {
    static_dir: String,
}

impl RootController {
    /// Creates a new root controller serving files from `static_dir`.
    pub fn new(static_dir: impl Into<String>) -> Self {
        Self {
            static_dir: static_dir.into(),
        }
    }

    /// Handles GET / with 307 so the method is preserved.
    async fn root() -> Redirect {
        Redirect::temporary(INDEX_PATH)
    }
}

impl Controller for RootController {
    fn add_route(&self, router: Router) -> Router {
        router
            .route("/", get(Self::root))
            .nest_service(STATIC_PREFIX, ServeDir::new(&self.static_dir))
    }
}
