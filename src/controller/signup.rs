//! Activity sign-up controller.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::Storage;
use crate::http::Controller;

use super::response::{detail, message};

/// Query parameters carrying the participant email.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    /// Returns the email or a 400 response when it is missing or blank.
    /// The format itself is not validated.
    pub fn require(self) -> Result<String, Response> {
        match self.email {
            Some(email) if !email.trim().is_empty() => Ok(email),
            _ => Err(detail(
                StatusCode::BAD_REQUEST,
                "Missing required query parameter: email",
            )),
        }
    }
}

/// SignupController enrolls participants into activities.
pub struct SignupController {
    db: Arc<dyn Storage>,
}

impl SignupController {
    /// Creates a new signup controller.
    pub fn new(db: Arc<dyn Storage>) -> Self {
        Self { db }
    }

    /// Handles POST /activities/:name/signup?email=.
    async fn signup(db: Arc<dyn Storage>, name: String, query: EmailQuery) -> Response {
        let email = match query.require() {
            Ok(email) => email,
            Err(resp) => return resp,
        };

        match db.enroll(&name, &email) {
            Ok(text) => message(text),
            Err(e) => e.into_response(),
        }
    }
}

impl Controller for SignupController {
    fn add_route(&self, router: Router) -> Router {
        let db = self.db.clone();
        router.route(
            "/activities/:name/signup",
            post(
                move |Path(name): Path<String>, Query(query): Query<EmailQuery>| {
                    let db = db.clone();
                    async move { Self::signup(db, name, query).await }
                },
            ),
        )
    }
}
