//! Participant withdrawal controller.
//!
//! Serves two bindings of the same operation:
//! `DELETE /activities/:name/participants/:email` and
//! `POST /activities/:name/unregister?email=`.

use axum::{
    extract::{Path, Query},
    response::{IntoResponse, Response},
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::db::Storage;
use crate::http::Controller;

use super::response::message;
use super::signup::EmailQuery;

/// UnregisterController removes participants from activities.
pub struct UnregisterController {
    db: Arc<dyn Storage>,
}

impl UnregisterController {
    /// Creates a new unregister controller.
    pub fn new(db: Arc<dyn Storage>) -> Self {
        Self { db }
    }

    async fn withdraw(db: Arc<dyn Storage>, name: String, email: String) -> Response {
        match db.withdraw(&name, &email) {
            Ok(text) => message(text),
            Err(e) => e.into_response(),
        }
    }

    /// Handles POST /activities/:name/unregister?email=.
    async fn unregister(db: Arc<dyn Storage>, name: String, query: EmailQuery) -> Response {
        match query.require() {
            Ok(email) => Self::withdraw(db, name, email).await,
            Err(resp) => resp,
        }
    }
}

impl Controller for UnregisterController {
    fn add_route(&self, router: Router) -> Router {
        let delete_db = self.db.clone();
        let post_db = self.db.clone();
        router
            .route(
                "/activities/:name/participants/:email",
                delete(move |Path((name, email)): Path<(String, String)>| {
                    let db = delete_db.clone();
                    async move { Self::withdraw(db, name, email).await }
                }),
            )
            .route(
                "/activities/:name/unregister",
                post(
                    move |Path(name): Path<String>, Query(query): Query<EmailQuery>| {
                        let db = post_db.clone();
                        async move { Self::unregister(db, name, query).await }
                    },
                ),
            )
    }
}
