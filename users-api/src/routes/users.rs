use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{UserPayload, UserResponse},
    app_state::AppState,
    domain::models::UserId,
    routes::{error::ErrorCode, ApiError},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// A path segment that is not an id cannot name a stored user.
fn user_id(path: Result<Path<i32>, PathRejection>) -> Result<UserId, ApiError> {
    let Path(id) = path.map_err(|_| {
        ApiError::not_found("user not found").with_code(ErrorCode::UserNotFound)
    })?;
    Ok(UserId::from(id))
}

#[instrument(name = "create_user", skip(app_state, payload))]
async fn create_user(
    State(app_state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(payload) = payload?;

    let user = app_state.user_service.create_user(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(name = "list_users", skip(app_state))]
async fn list_users(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = app_state.user_service.list_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[instrument(name = "get_user", skip(app_state))]
async fn get_user(
    path: Result<Path<i32>, PathRejection>,
    State(app_state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = user_id(path)?;

    let user = app_state.user_service.get_user(id).await?;

    Ok(Json(user.into()))
}

#[instrument(name = "update_user", skip(app_state, payload))]
async fn update_user(
    path: Result<Path<i32>, PathRejection>,
    State(app_state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = user_id(path)?;

    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            // Report an unknown id before complaining about the body.
            app_state.user_service.get_user(id).await?;
            return Err(rejection.into());
        }
    };

    let user = app_state
        .user_service
        .update_user(id, payload.into())
        .await?;

    Ok(Json(user.into()))
}

#[instrument(name = "delete_user", skip(app_state))]
async fn delete_user(
    path: Result<Path<i32>, PathRejection>,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let id = user_id(path)?;

    app_state.user_service.delete_user(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
