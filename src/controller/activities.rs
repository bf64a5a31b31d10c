//! Activity listing controller.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::db::Storage;
use crate::http::Controller;

use super::response::json;

/// ActivitiesController exposes the activity directory read-only.
pub struct ActivitiesController {
    db: Arc<dyn Storage>,
}

impl ActivitiesController {
    /// Creates a new activities controller.
    pub fn new(db: Arc<dyn Storage>) -> Self {
        Self { db }
    }

    /// Handles GET /activities.
    async fn list(db: Arc<dyn Storage>) -> Response {
        json(StatusCode::OK, &db.list())
    }

    /// Handles GET /activities/:name.
    async fn get(db: Arc<dyn Storage>, name: String) -> Response {
        match db.get(&name) {
            Ok(activity) => json(StatusCode::OK, &activity),
            Err(e) => e.into_response(),
        }
    }
}

impl Controller for ActivitiesController {
    fn add_route(&self, router: Router) -> Router {
        let list_db = self.db.clone();
        let get_db = self.db.clone();
        router
            .route(
                "/activities",
                get(move || {
                    let db = list_db.clone();
                    async move { Self::list(db).await }
                }),
            )
            .route(
                "/activities/:name",
                get(move |Path(name): Path<String>| {
                    let db = get_db.clone();
                    async move { Self::get(db, name).await }
                }),
            )
    }
}
