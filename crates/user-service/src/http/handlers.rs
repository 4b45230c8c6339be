//! Request handlers for the `/users` resource.

use super::UserRepo;
use crate::model::{User, UserId, UserPatch};
use crate::users::UserError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::{debug, instrument};

const REQUIRED_FIELDS: &str = "username, email and phone are required";

pub async fn healthz() -> &'static str {
    "ok"
}

#[instrument(skip(repo))]
pub async fn list_users(State(repo): State<UserRepo>) -> Result<Json<Vec<User>>, UserError> {
    let users = repo.list().await?;
    Ok(Json(users))
}

#[instrument(skip(repo))]
pub async fn get_user(
    State(repo): State<UserRepo>,
    Path(raw_id): Path<String>,
) -> Result<Json<User>, UserError> {
    let id = parse_id(&raw_id)?;
    let user = repo.get(assigned(id, &raw_id)?).await?;
    Ok(Json(user))
}

#[instrument(skip(repo, body))]
pub async fn create_user(
    State(repo): State<UserRepo>,
    body: Result<Json<User>, JsonRejection>,
) -> Result<impl IntoResponse, UserError> {
    let candidate = required_fields(decode(body)?)?;
    let created = repo.create(candidate).await?;
    let location = format!("/users/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

#[instrument(skip(repo, body))]
pub async fn update_user(
    State(repo): State<UserRepo>,
    Path(raw_id): Path<String>,
    body: Result<Json<User>, JsonRejection>,
) -> Result<Json<User>, UserError> {
    let id = parse_id(&raw_id)?;
    let replacement = required_fields(decode(body)?)?;
    let updated = repo.update(assigned(id, &raw_id)?, replacement).await?;
    Ok(Json(updated))
}

#[instrument(skip(repo, body))]
pub async fn patch_user(
    State(repo): State<UserRepo>,
    Path(raw_id): Path<String>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<User>, UserError> {
    let id = parse_id(&raw_id)?;
    let patch = decode(body)?;
    let patched = repo.patch(assigned(id, &raw_id)?, patch).await?;
    Ok(Json(patched))
}

#[instrument(skip(repo))]
pub async fn delete_user(
    State(repo): State<UserRepo>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, UserError> {
    let id = parse_id(&raw_id)?;
    repo.delete(assigned(id, &raw_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Any signed 64-bit integer is a well-formed id. Negative ids parse to `None`: they
/// can never have been assigned, so they are not found without asking the repository.
fn parse_id(raw: &str) -> Result<Option<UserId>, UserError> {
    let id: i64 = raw
        .parse()
        .map_err(|_| UserError::InvalidId(raw.to_string()))?;
    Ok(u64::try_from(id).ok().map(UserId))
}

fn assigned(id: Option<UserId>, raw: &str) -> Result<UserId, UserError> {
    id.ok_or_else(|| UserError::NotFound(raw.to_string()))
}

fn decode<T: std::fmt::Debug>(body: Result<Json<T>, JsonRejection>) -> Result<T, UserError> {
    match body {
        Ok(Json(payload)) => {
            debug!(?payload, "Decoded body");
            Ok(payload)
        }
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Rejected body");
            Err(UserError::MalformedBody(rejection.body_text()))
        }
    }
}

fn required_fields(user: User) -> Result<User, UserError> {
    if user.has_required_fields() {
        Ok(user)
    } else {
        Err(UserError::Validation(REQUIRED_FIELDS.to_string()))
    }
}
