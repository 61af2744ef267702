use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};

use gaswatch_core::{CreateUserRequest, User, UserResponse};

use super::{decode_json, error::ApiError};
use crate::app_state::AppState;

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let req: CreateUserRequest = decode_json(body)?;
    let user = User::from(req);
    let resp = UserResponse::from(&user);

    state.store().create_user(user)?;
    tracing::info!(email = %resp.email, "user created");

    Ok((StatusCode::CREATED, Json(resp)))
}

/// `GET /users`, sorted by email.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let mut users: Vec<UserResponse> = state
        .store()
        .get_all_users()?
        .values()
        .map(UserResponse::from)
        .collect();
    users.sort_by(|a, b| a.email.cmp(&b.email));
    Ok(Json(users))
}
