//! Translation of [`UserError`] into HTTP responses.
//!
//! Every error body is a JSON object with a single `message` field. Storage failures are
//! logged with their detail and reported to the client as a generic 500.

use crate::users::UserError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
            UserError::InvalidId(_) | UserError::MalformedBody(_) | UserError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            UserError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            UserError::NotFound(_) => "user not found".to_string(),
            UserError::InvalidId(_) => "invalid id".to_string(),
            UserError::MalformedBody(_) => "invalid JSON".to_string(),
            UserError::Validation(message) => message.clone(),
            UserError::Storage(_) => "internal storage error".to_string(),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        if let UserError::Storage(detail) = &self {
            error!(%detail, "Storage failure");
        }
        let body = ErrorBody {
            message: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
