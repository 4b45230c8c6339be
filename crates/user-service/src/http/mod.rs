//! # HTTP Adapter
//!
//! Maps the `/users` resource onto a [`Repository<User>`](record_framework::Repository).
//!
//! | Method + Path        | Operation | Success |
//! |----------------------|-----------|---------|
//! | `GET /users`         | list      | 200 |
//! | `GET /users/:id`     | get       | 200 |
//! | `POST /users`        | create    | 201 + `Location` |
//! | `PUT /users/:id`     | update    | 200 |
//! | `PATCH /users/:id`   | patch     | 200 |
//! | `DELETE /users/:id`  | delete    | 204 |
//! | `GET /healthz`       | -         | 200 `ok` |
//!
//! Ids, bodies and required fields are checked here before the repository is called;
//! see [`error`] for how failures become status codes.
//!
//! Every route is wrapped in request logging at `info`, permissive CORS, and a panic
//! guard that turns a panicking handler into a JSON 500.

pub mod error;
pub mod handlers;

use crate::model::User;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use error::ErrorBody;
use record_framework::Repository;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, Level};

/// Shared handle the handlers receive as axum state.
pub type UserRepo = Arc<dyn Repository<User>>;

pub fn router(repo: UserRepo) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .patch(handlers::patch_user)
                .delete(handlers::delete_user),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(repo)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(%detail, "Handler panicked");
    let body = ErrorBody {
        message: "internal server error".to_string(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
