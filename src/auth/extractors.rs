use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::jwt::{JwtKeys, TokenError};
use crate::error::AppError;

/// Username taken from a valid `Authorization: Bearer <token>` header.
pub struct BearerSubject(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerSubject
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")))
            .ok_or(TokenError::InvalidToken)?;

        let subject = keys.decode(token).map_err(|e| {
            warn!(error = %e, "bearer token rejected");
            e
        })?;
        Ok(BearerSubject(subject))
    }
}
