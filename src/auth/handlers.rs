use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{dto::LoginRequest, dto::TokenResponse, extractors::BearerSubject, jwt::JwtKeys, services},
    error::AppError,
    state::AppState,
    users::repo_types::User,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let keys = JwtKeys::from_ref(&state);
    let res = services::login(
        state.store.as_ref(),
        &keys,
        &payload.username,
        &payload.password,
    )
    .await?;
    Ok(Json(res))
}

#[instrument(skip(state, subject))]
pub async fn get_me(
    State(state): State<AppState>,
    subject: BearerSubject,
) -> Result<Json<User>, AppError> {
    let BearerSubject(username) = subject;
    Ok(Json(
        services::current_user(state.store.as_ref(), &username).await?,
    ))
}
